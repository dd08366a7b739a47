use std::path::PathBuf;

use the_extman_dispatch::ResolveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A shortcut was bound to a second command. Nothing of the offending
  /// definition is applied.
  #[error("shortcut '{shortcut}' already used in \"{owner}\"")]
  ShortcutConflict { shortcut: String, owner: String },
  #[error("unknown command '{0}'")]
  UnknownCommand(String),
  #[error("cannot resolve command target '{path}'")]
  UnresolvedTarget {
    path:   String,
    #[source]
    source: ResolveError,
  },
  #[error("malformed command declaration '{0}'")]
  MalformedDeclaration(String),
  #[error("command '{name}' failed")]
  Command {
    name:   String,
    #[source]
    source: anyhow::Error,
  },
  #[error("failed to load script {}", path.display())]
  Script {
    path:   PathBuf,
    #[source]
    source: anyhow::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
