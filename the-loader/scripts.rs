//! Script directory discovery.

use std::{
  io,
  path::{
    Path,
    PathBuf,
  },
};

/// Where the host says scripts may live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptSearch {
  /// Whether the host runs on Windows, where the global home is searched too.
  pub windows:      bool,
  /// The host's global (installation) home directory.
  pub default_home: Option<PathBuf>,
  /// The host's per-user home directory.
  pub user_home:    Option<PathBuf>,
  /// An explicit script directory that replaces the per-user one.
  pub directory:    Option<PathBuf>,
}

impl ScriptSearch {
  /// Directories to scan, in load order. Directories that do not exist are
  /// left out.
  pub fn directories(&self, dir_name: &str) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if self.windows
      && let Some(home) = &self.default_home
    {
      dirs.push(home.join(dir_name));
    }

    let user_dir = match &self.directory {
      Some(dir) => Some(dir.clone()),
      None => self.user_home.as_ref().map(|home| home.join(dir_name)),
    };
    dirs.extend(user_dir);

    dirs.retain(|dir| {
      let exists = dir.is_dir();
      if !exists {
        log::debug!("skipping missing script directory {}", dir.display());
      }
      exists
    });
    dirs.dedup();
    dirs
  }
}

/// Files in `dir` with the given extension, sorted by path.
pub fn scan_dir(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
  let mut scripts = Vec::new();
  for entry in std::fs::read_dir(dir)? {
    let path = entry?.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
      scripts.push(path);
    }
  }
  scripts.sort();
  Ok(scripts)
}
