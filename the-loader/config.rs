use std::path::Path;

use anyhow::{
  Context,
  Result,
};
use serde::{
  Deserialize,
  Serialize,
};

/// Tunables for the extension manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExtConfig {
  /// First command slot handed out to scripts. Lower slots belong to the host.
  pub menu_base:           u32,
  /// Separator used to join the entries of a selection list.
  pub list_separator:      char,
  /// List type id used when a script does not pick one.
  pub list_type:           i32,
  /// Host command that re-enters the extension manager by command name.
  pub command_prefix:      String,
  /// Subsystem tag the host uses to route command lines to the script engine.
  pub subsystem:           String,
  /// Execution flags stored with every command.
  pub command_mode:        String,
  /// Extension of the script files picked up from script directories.
  pub script_extension:    String,
  /// Name of the script directory under the host's home directories.
  pub script_dir_name:     String,
  /// Host property naming an explicit script directory.
  pub script_dir_property: String,
}

impl Default for ExtConfig {
  fn default() -> Self {
    Self {
      menu_base:           10,
      list_separator:      ';',
      list_type:           13,
      command_prefix:      "extman:call".to_string(),
      subsystem:           "3".to_string(),
      command_mode:        "savebefore:no".to_string(),
      script_extension:    "rb".to_string(),
      script_dir_name:     "extman".to_string(),
      script_dir_property: "ext.extman.directory".to_string(),
    }
  }
}

pub fn parse_config(source: &str) -> Result<ExtConfig> {
  toml::from_str(source).context("failed to parse extension config")
}

/// Read the configuration file at `path`. A missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<ExtConfig> {
  match std::fs::read_to_string(path) {
    Ok(source) => parse_config(&source).with_context(|| format!("in {}", path.display())),
    Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ExtConfig::default()),
    Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
  }
}

/// User configuration with the workspace-local file merged on top.
pub fn user_config() -> Result<ExtConfig> {
  load_merged([crate::config_file(), crate::workspace_config_file()])
}

/// Merge the given files in order, later files overriding earlier ones.
/// Files that do not exist are skipped.
pub fn load_merged<I, P>(files: I) -> Result<ExtConfig>
where
  I: IntoIterator<Item = P>,
  P: AsRef<Path>,
{
  let mut merged = toml::Value::Table(toml::Table::new());
  for file in files {
    let file = file.as_ref();
    let source = match std::fs::read_to_string(file) {
      Ok(source) => source,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
      Err(err) => return Err(err).with_context(|| format!("failed to read {}", file.display())),
    };
    let value: toml::Value =
      toml::from_str(&source).with_context(|| format!("failed to parse {}", file.display()))?;
    log::debug!("merging config from {}", file.display());
    merged = crate::merge_toml_values(merged, value, 3);
  }

  merged
    .try_into()
    .context("invalid extension config")
}
