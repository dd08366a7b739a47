//! Toggle between a C/C++ source file and its header.

use std::path::{
  Path,
  PathBuf,
};

use crate::{
  Extman,
  Result,
  command::CommandSpec,
  host::Host,
};

pub const NAME: &str = "Switch Source/Header";
pub const MODE: &str = "*.c;*.cpp;*.cxx;*.c++;*.h;*.hpp";
pub const SHORTCUT: &str = "Shift+Ctrl+H";

const SOURCE_EXTENSIONS: &[&str] = &["cpp", "cxx", "c++", "c"];
const HEADER_EXTENSIONS: &[&str] = &["h", "hpp"];

pub fn install<H: Host>(ctx: &mut Extman<H>) -> Result<u32> {
  ctx.define_command(
    CommandSpec::new(NAME).mode(MODE).shortcut(SHORTCUT),
    |ctx, _| -> anyhow::Result<()> {
      switch_source_header(ctx);
      Ok(())
    },
  )
}

/// Extensions of the files a file with extension `ext` pairs with.
pub fn counterpart_extensions(ext: &str) -> Option<&'static [&'static str]> {
  if SOURCE_EXTENSIONS.contains(&ext) {
    Some(HEADER_EXTENSIONS)
  } else if HEADER_EXTENSIONS.contains(&ext) {
    Some(SOURCE_EXTENSIONS)
  } else {
    None
  }
}

/// First existing `<base>.<ext>` for the given extensions.
pub fn find_counterpart(base: &Path, extensions: &[&str]) -> Option<PathBuf> {
  extensions
    .iter()
    .map(|ext| {
      let mut file = base.as_os_str().to_owned();
      file.push(".");
      file.push(ext);
      PathBuf::from(file)
    })
    .find(|file| file.exists())
}

fn switch_source_header<H: Host>(ctx: &mut Extman<H>) {
  let file = ctx.current_file().unwrap_or_default();
  let ext = ctx.file_ext().unwrap_or_default();
  let Some(extensions) = counterpart_extensions(&ext) else {
    ctx.report(&format!("not a C++ file: {file}"));
    return;
  };

  let base = Path::new(&ctx.file_dir().unwrap_or_default()).join(ctx.file_name().unwrap_or_default());
  match find_counterpart(&base, extensions) {
    Some(other) => ctx.host_mut().open(&other.to_string_lossy()),
    None => ctx.report(&format!("source/header does not exist: {file}")),
  }
}
