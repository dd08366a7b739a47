use std::path::{
  Path,
  PathBuf,
};

use log::LevelFilter;

/// Level for a `-v` count.
pub fn level_for(verbosity: u64) -> LevelFilter {
  match verbosity {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

/// Install the global logger, appending to `file`.
pub fn setup_logging(verbosity: u64, file: &Path) -> Result<(), fern::InitError> {
  if let Some(parent) = file.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)?;
  }

  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(level_for(verbosity))
    .chain(fern::log_file(file)?)
    .apply()?;
  Ok(())
}

/// Install the global logger on `file`, or on the loader's default log file.
pub fn setup_default_logging(verbosity: u64, file: Option<PathBuf>) -> Result<(), fern::InitError> {
  the_extman_loader::initialize_log_file(file);
  setup_logging(verbosity, &the_extman_loader::log_file())
}
