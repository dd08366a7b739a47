//! The host editor as seen from the extension manager.

mod memory;

use std::fmt;

use foldhash::fast::RandomState;
use hashbrown::HashMap;
pub use memory::{
  MemoryHost,
  MemoryPane,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneId {
  /// The primary editing pane.
  Editor,
  /// The secondary output pane.
  Output,
}

/// End-of-line mode of a pane, in the host's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum EolMode {
  /// CarriageReturn followed by LineFeed.
  CrLf = 0,
  Cr   = 1,
  #[default]
  Lf   = 2,
}

impl EolMode {
  pub const fn from_host(mode: i32) -> Option<EolMode> {
    match mode {
      0 => Some(EolMode::CrLf),
      1 => Some(EolMode::Cr),
      2 => Some(EolMode::Lf),
      _ => None,
    }
  }

  #[inline]
  pub const fn as_str(self) -> &'static str {
    match self {
      EolMode::CrLf => "\r\n",
      EolMode::Cr => "\r",
      EolMode::Lf => "\n",
    }
  }

  #[inline]
  pub const fn len_chars(self) -> usize {
    match self {
      EolMode::CrLf => 2,
      _ => 1,
    }
  }
}

/// A text pane of the host.
pub trait Pane {
  /// Caret position.
  fn current_pos(&self) -> usize;
  /// Zero-based line containing `pos`.
  fn line_from_position(&self, pos: usize) -> usize;
  /// Raw text of `line`, including its line ending.
  fn line(&self, line: usize) -> Option<String>;
  fn eol_mode(&self) -> EolMode;
  /// The whole text of the pane.
  fn contents(&self) -> String;
  /// Whether the text has changed since it was last saved.
  fn is_modified(&self) -> bool;
  /// Character separating the entries of a user list.
  fn set_list_separator(&mut self, separator: char);
  fn show_user_list(&mut self, list_type: i32, items: &str);
}

/// Flat string-keyed host configuration.
pub trait PropertyStore {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&mut self, key: &str, value: &str);

  fn get_int(&self, key: &str) -> Option<i64> {
    self.get(key).and_then(|value| value.trim().parse().ok())
  }

  /// The value of `key` unless it is missing or empty.
  fn get_non_empty(&self, key: &str) -> Option<String> {
    self.get(key).filter(|value| !value.is_empty())
  }
}

/// In-memory property store.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
  values: HashMap<String, String, RandomState>,
}

impl PropertySet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Keys starting with `prefix`, sorted.
  pub fn keys_with_prefix(&self, prefix: &str) -> Vec<&str> {
    let mut keys: Vec<_> = self
      .values
      .keys()
      .map(String::as_str)
      .filter(|key| key.starts_with(prefix))
      .collect();
    keys.sort_unstable();
    keys
  }
}

impl fmt::Debug for PropertySet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut entries: Vec<_> = self.values.iter().collect();
    entries.sort_unstable();
    f.debug_map().entries(entries).finish()
  }
}

impl PropertyStore for PropertySet {
  fn get(&self, key: &str) -> Option<String> {
    self.values.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: &str) {
    self.values.insert(key.to_string(), value.to_string());
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertySet {
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    Self {
      values: iter
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect(),
    }
  }
}

/// Services the host editor provides to the extension manager.
pub trait Host: 'static {
  fn focused_pane(&self) -> PaneId;
  fn pane(&self, pane: PaneId) -> &dyn Pane;
  fn pane_mut(&mut self, pane: PaneId) -> &mut dyn Pane;
  fn props(&self) -> &dyn PropertyStore;
  fn props_mut(&mut self) -> &mut dyn PropertyStore;
  /// Open `path` in the editor, or switch to it if it is already open.
  fn open(&mut self, path: &str);
  fn strip_show(&mut self, description: &str);
  /// Print a line on the output pane.
  fn print(&mut self, text: &str);
}
