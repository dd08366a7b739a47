//! Loading client scripts from the host's script directories.

use std::path::{
  Path,
  PathBuf,
};

use the_extman_loader::scripts::{
  ScriptSearch,
  scan_dir,
};

use crate::{
  Error,
  Extman,
  host::Host,
};

/// Runs one script file against the extension manager.
pub trait ScriptEngine<H: Host> {
  fn load(&mut self, ctx: &mut Extman<H>, path: &Path) -> anyhow::Result<()>;

  /// Run script source that has no file behind it, such as an unsaved buffer.
  fn eval(&mut self, _ctx: &mut Extman<H>, source: &str) -> anyhow::Result<()> {
    anyhow::bail!("cannot evaluate {} bytes of unsaved source", source.len())
  }
}

impl<H, F> ScriptEngine<H> for F
where
  H: Host,
  F: FnMut(&mut Extman<H>, &Path) -> anyhow::Result<()>,
{
  fn load(&mut self, ctx: &mut Extman<H>, path: &Path) -> anyhow::Result<()> {
    self(ctx, path)
  }
}

/// Outcome of [`Extman::load_scripts`].
#[derive(Debug, Default)]
pub struct LoadReport {
  pub loaded: Vec<PathBuf>,
  /// One [`Error::Script`] per script that failed.
  pub failed: Vec<Error>,
}

impl LoadReport {
  pub fn is_clean(&self) -> bool {
    self.failed.is_empty()
  }
}

impl<H: Host> Extman<H> {
  /// Where scripts are looked up, from the host properties.
  pub fn script_search(&self) -> ScriptSearch {
    let props = self.host().props();
    let path = |key: &str| props.get_non_empty(key).map(PathBuf::from);
    ScriptSearch {
      windows:      props.get_int("PLAT_WIN") == Some(1),
      default_home: path("SciteDefaultHome"),
      user_home:    path("SciteUserHome"),
      directory:    path(&self.config().script_dir_property),
    }
  }

  /// Load every script of every script directory with `engine`.
  ///
  /// A script that fails is reported and skipped; the remaining scripts are
  /// still loaded.
  pub fn load_scripts(&mut self, engine: &mut dyn ScriptEngine<H>) -> LoadReport {
    let mut report = LoadReport::default();
    let extension = self.config().script_extension.clone();

    for dir in self.script_search().directories(&self.config().script_dir_name) {
      let scripts = match scan_dir(&dir, &extension) {
        Ok(scripts) => scripts,
        Err(err) => {
          self.report(&format!("cannot read script directory {}: {err}", dir.display()));
          continue;
        },
      };

      for path in scripts {
        log::debug!("loading script {}", path.display());
        match engine.load(self, &path) {
          Ok(()) => report.loaded.push(path),
          Err(source) => {
            self.report(&format!("failed to load script {}: {source:#}", path.display()));
            report.failed.push(Error::Script { path, source });
          },
        }
      }
    }
    report
  }
}
