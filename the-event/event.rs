use std::fmt;

use bitflags::bitflags;

/// Identity of a handler chain.
///
/// The order of the variants carries no meaning. `EditorLine`, `OutputLine`
/// and `OpenSwitch` are derived: the host never delivers them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
  MarginClick,
  DoubleClick,
  SavePointLeft,
  SavePointReached,
  Char,
  Save,
  BeforeSave,
  SwitchFile,
  Open,
  UpdateUI,
  Key,
  DwellStart,
  Close,
  EditorLine,
  OutputLine,
  OpenSwitch,
  UserListSelection,
  Strip,
}

impl EventKind {
  pub const ALL: [EventKind; 18] = [
    EventKind::MarginClick,
    EventKind::DoubleClick,
    EventKind::SavePointLeft,
    EventKind::SavePointReached,
    EventKind::Char,
    EventKind::Save,
    EventKind::BeforeSave,
    EventKind::SwitchFile,
    EventKind::Open,
    EventKind::UpdateUI,
    EventKind::Key,
    EventKind::DwellStart,
    EventKind::Close,
    EventKind::EditorLine,
    EventKind::OutputLine,
    EventKind::OpenSwitch,
    EventKind::UserListSelection,
    EventKind::Strip,
  ];

  /// Whether the kind is synthesized from other events.
  pub const fn is_derived(self) -> bool {
    matches!(
      self,
      EventKind::EditorLine | EventKind::OutputLine | EventKind::OpenSwitch
    )
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      EventKind::MarginClick => "margin-click",
      EventKind::DoubleClick => "double-click",
      EventKind::SavePointLeft => "save-point-left",
      EventKind::SavePointReached => "save-point-reached",
      EventKind::Char => "char",
      EventKind::Save => "save",
      EventKind::BeforeSave => "before-save",
      EventKind::SwitchFile => "switch-file",
      EventKind::Open => "open",
      EventKind::UpdateUI => "update-ui",
      EventKind::Key => "key",
      EventKind::DwellStart => "dwell-start",
      EventKind::Close => "close",
      EventKind::EditorLine => "editor-line",
      EventKind::OutputLine => "output-line",
      EventKind::OpenSwitch => "open-switch",
      EventKind::UserListSelection => "user-list-selection",
      EventKind::Strip => "strip",
    }
  }
}

impl fmt::Display for EventKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

bitflags! {
  /// Modifier keys held during a key event, in the host's encoding.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
  pub struct Modifiers: u8 {
    const SHIFT = 1;
    const CTRL  = 2;
    const ALT   = 4;
  }
}

impl Modifiers {
  pub fn shift(self) -> bool {
    self.contains(Modifiers::SHIFT)
  }

  pub fn ctrl(self) -> bool {
    self.contains(Modifiers::CTRL)
  }

  pub fn alt(self) -> bool {
    self.contains(Modifiers::ALT)
  }
}

/// An event together with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
  MarginClick,
  DoubleClick,
  SavePointLeft,
  SavePointReached,
  Char(char),
  Save(&'a str),
  BeforeSave(&'a str),
  SwitchFile(&'a str),
  Open(&'a str),
  UpdateUI,
  Key {
    key:       i32,
    modifiers: Modifiers,
  },
  DwellStart {
    pos:  usize,
    word: &'a str,
  },
  Close(&'a str),
  /// A line just completed in the editor pane, without its line ending.
  EditorLine(&'a str),
  /// A line just completed in the output pane, without its line ending.
  OutputLine(&'a str),
  /// A real buffer became current, either by opening or switching.
  OpenSwitch(&'a str),
  UserListSelection {
    list_type: i32,
    selection: &'a str,
  },
  Strip {
    control: i32,
    change:  i32,
  },
}

impl Event<'_> {
  pub fn kind(&self) -> EventKind {
    match self {
      Event::MarginClick => EventKind::MarginClick,
      Event::DoubleClick => EventKind::DoubleClick,
      Event::SavePointLeft => EventKind::SavePointLeft,
      Event::SavePointReached => EventKind::SavePointReached,
      Event::Char(_) => EventKind::Char,
      Event::Save(_) => EventKind::Save,
      Event::BeforeSave(_) => EventKind::BeforeSave,
      Event::SwitchFile(_) => EventKind::SwitchFile,
      Event::Open(_) => EventKind::Open,
      Event::UpdateUI => EventKind::UpdateUI,
      Event::Key { .. } => EventKind::Key,
      Event::DwellStart { .. } => EventKind::DwellStart,
      Event::Close(_) => EventKind::Close,
      Event::EditorLine(_) => EventKind::EditorLine,
      Event::OutputLine(_) => EventKind::OutputLine,
      Event::OpenSwitch(_) => EventKind::OpenSwitch,
      Event::UserListSelection { .. } => EventKind::UserListSelection,
      Event::Strip { .. } => EventKind::Strip,
    }
  }

  /// The file argument of file-carrying events.
  pub fn file(&self) -> Option<&str> {
    match *self {
      Event::Save(file)
      | Event::BeforeSave(file)
      | Event::SwitchFile(file)
      | Event::Open(file)
      | Event::Close(file)
      | Event::OpenSwitch(file) => Some(file),
      _ => None,
    }
  }

  /// The text argument of line and selection events.
  pub fn text(&self) -> Option<&str> {
    match *self {
      Event::EditorLine(line) | Event::OutputLine(line) => Some(line),
      Event::UserListSelection { selection, .. } => Some(selection),
      Event::DwellStart { word, .. } => Some(word),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_event_maps_to_its_kind() {
    let events = [
      Event::MarginClick,
      Event::DoubleClick,
      Event::SavePointLeft,
      Event::SavePointReached,
      Event::Char('x'),
      Event::Save("a"),
      Event::BeforeSave("a"),
      Event::SwitchFile("a"),
      Event::Open("a"),
      Event::UpdateUI,
      Event::Key {
        key:       65,
        modifiers: Modifiers::CTRL,
      },
      Event::DwellStart { pos: 3, word: "w" },
      Event::Close("a"),
      Event::EditorLine("l"),
      Event::OutputLine("l"),
      Event::OpenSwitch("a"),
      Event::UserListSelection {
        list_type: 13,
        selection: "s",
      },
      Event::Strip {
        control: 1,
        change:  2,
      },
    ];
    let kinds: Vec<_> = events.iter().map(Event::kind).collect();
    assert_eq!(kinds, EventKind::ALL);
  }

  #[test]
  fn only_synthesized_kinds_are_derived() {
    let derived: Vec<_> = EventKind::ALL
      .into_iter()
      .filter(|kind| kind.is_derived())
      .collect();
    assert_eq!(derived, [
      EventKind::EditorLine,
      EventKind::OutputLine,
      EventKind::OpenSwitch
    ]);
  }

  #[test]
  fn modifiers_decode_host_bits() {
    let mods = Modifiers::from_bits_truncate(0b011);
    assert!(mods.shift());
    assert!(mods.ctrl());
    assert!(!mods.alt());
  }
}
