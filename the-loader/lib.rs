pub mod config;
pub mod scripts;

use std::{
  path::{
    Path,
    PathBuf,
  },
  sync::OnceLock,
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

static CONFIG_FILE: OnceLock<PathBuf> = OnceLock::new();

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

/// Name of the per-workspace configuration directory.
pub const WORKSPACE_DIR: &str = ".the-extman";

pub fn initialize_config_file(specified_file: Option<PathBuf>) {
  let config_file = specified_file.unwrap_or_else(default_config_file);
  ensure_parent_dir(&config_file);
  CONFIG_FILE.set(config_file).ok();
}

pub fn initialize_log_file(specified_file: Option<PathBuf>) {
  let log_file = specified_file.unwrap_or_else(default_log_file);
  ensure_parent_dir(&log_file);
  LOG_FILE.set(log_file).ok();
}

/// User configuration directory.
///
/// `THE_EXTMAN_CONFIG_DIR` takes precedence over the platform default. When
/// neither is available the current directory is used.
pub fn config_dir() -> PathBuf {
  if let Ok(dir) = std::env::var("THE_EXTMAN_CONFIG_DIR") {
    return PathBuf::from(dir);
  }
  match choose_base_strategy() {
    Ok(strategy) => strategy.config_dir().join("the-extman"),
    Err(err) => {
      log::warn!("unable to find the config directory: {err}");
      PathBuf::from(".")
    },
  }
}

pub fn cache_dir() -> PathBuf {
  if let Ok(dir) = std::env::var("THE_EXTMAN_CACHE_DIR") {
    return PathBuf::from(dir);
  }
  match choose_base_strategy() {
    Ok(strategy) => strategy.cache_dir().join("the-extman"),
    Err(err) => {
      log::warn!("unable to find the cache directory: {err}");
      PathBuf::from(".")
    },
  }
}

pub fn config_file() -> PathBuf {
  CONFIG_FILE.get_or_init(default_config_file).clone()
}

pub fn log_file() -> PathBuf {
  LOG_FILE.get_or_init(default_log_file).clone()
}

pub fn workspace_config_file() -> PathBuf {
  find_workspace().0.join(WORKSPACE_DIR).join("config.toml")
}

pub fn default_log_file() -> PathBuf {
  cache_dir().join("the-extman.log")
}

/// Merge two TOML documents, merging values from `right` onto `left`
///
/// `merge_depth` sets the nesting depth up to which tables are merged instead
/// of overridden. Arrays and scalars from `right` always replace the value in
/// `left`.
pub fn merge_toml_values(left: toml::Value, right: toml::Value, merge_depth: usize) -> toml::Value {
  use toml::Value;

  match (left, right) {
    (Value::Table(mut left_map), Value::Table(right_map)) if merge_depth > 0 => {
      for (rname, rvalue) in right_map {
        let merged = match left_map.remove(&rname) {
          Some(lvalue) => merge_toml_values(lvalue, rvalue, merge_depth - 1),
          None => rvalue,
        };
        left_map.insert(rname, merged);
      }
      Value::Table(left_map)
    },
    (_, value) => value,
  }
}

/// Finds the current workspace folder.
///
/// Searches upward from the current directory for a directory containing
/// `.git` or `.the-extman`. If none is found returns (CWD, true), otherwise
/// (workspace, false).
pub fn find_workspace() -> (PathBuf, bool) {
  match std::env::current_dir() {
    Ok(current_dir) => find_workspace_in(current_dir),
    Err(_) => (PathBuf::new(), true),
  }
}

pub fn find_workspace_in(dir: impl AsRef<Path>) -> (PathBuf, bool) {
  let dir = dir.as_ref();
  for ancestor in dir.ancestors() {
    if ancestor.join(".git").exists() || ancestor.join(WORKSPACE_DIR).exists() {
      return (ancestor.to_owned(), false);
    }
  }

  (dir.to_owned(), true)
}

fn default_config_file() -> PathBuf {
  config_dir().join("config.toml")
}

fn ensure_parent_dir(path: &Path) {
  if let Some(parent) = path.parent()
    && !parent.exists()
  {
    std::fs::create_dir_all(parent).ok();
  }
}

#[cfg(test)]
mod tests {
  use toml::Value;

  use super::merge_toml_values;

  #[test]
  fn user_values_override_defaults() {
    let base: Value = toml::from_str(
      r#"
        menu-base = 10
        list-separator = ";"
        "#,
    )
    .unwrap();
    let user: Value = toml::from_str("menu-base = 20").unwrap();

    let merged = merge_toml_values(base, user, 3);
    assert_eq!(merged.get("menu-base").unwrap().as_integer(), Some(20));
    assert_eq!(merged.get("list-separator").unwrap().as_str(), Some(";"));
  }

  #[test]
  fn nested_tables_merge_up_to_depth() {
    let base: Value = toml::from_str(
      r#"
        [scripts]
        extension = "rb"
        dir-name = "extman"
        "#,
    )
    .unwrap();
    let user: Value = toml::from_str(
      r#"
        [scripts]
        extension = "lua"
        "#,
    )
    .unwrap();

    let merged = merge_toml_values(base.clone(), user.clone(), 2);
    let scripts = merged.get("scripts").unwrap();
    assert_eq!(scripts.get("extension").unwrap().as_str(), Some("lua"));
    assert_eq!(scripts.get("dir-name").unwrap().as_str(), Some("extman"));

    // With no merge depth the right table replaces the left one wholesale.
    let replaced = merge_toml_values(base, user, 0);
    assert!(replaced.get("scripts").unwrap().get("dir-name").is_none());
  }

  #[test]
  fn workspace_is_found_by_marker() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::create_dir(dir.path().join(super::WORKSPACE_DIR)).unwrap();

    let (root, fallback) = super::find_workspace_in(&nested);
    assert_eq!(root, dir.path());
    assert!(!fallback);
  }
}
