//! Command slots, shortcuts and invocation thunks.
//!
//! A command occupies a numbered slot in the host configuration. The host
//! shows `command.name.<slot>.<mode>` in its menu and runs
//! `command.<slot>.<mode>` when the entry is picked; that command line
//! re-enters the extension manager, which looks the thunk up by name.

use std::{
  collections::BTreeMap,
  fmt::Write as _,
};

use foldhash::fast::RandomState;
use globset::{
  Glob,
  GlobSetBuilder,
};
use hashbrown::HashMap;
use the_extman_dispatch::DynHandler;
use the_extman_loader::config::ExtConfig;

use crate::{
  Error,
  host::PropertyStore,
};

/// Mode pattern that applies a command to every file.
pub const ANY_MODE: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  pub name:     String,
  /// `;`-separated file globs the command applies to.
  pub mode:     String,
  pub shortcut: Option<String>,
  /// Parameter baked into the host command line.
  pub param:    Option<String>,
}

impl CommandSpec {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:     name.into(),
      mode:     ANY_MODE.to_string(),
      shortcut: None,
      param:    None,
    }
  }

  pub fn mode(mut self, mode: impl Into<String>) -> Self {
    self.mode = mode.into();
    self
  }

  pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
    self.shortcut = Some(shortcut.into());
    self
  }

  pub fn param(mut self, param: impl Into<String>) -> Self {
    self.param = Some(param.into());
    self
  }
}

/// A command as recorded in its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSlot {
  pub slot:     u32,
  pub name:     String,
  pub mode:     String,
  pub shortcut: Option<String>,
  pub param:    Option<String>,
}

impl CommandSlot {
  /// Whether the slot's mode pattern matches `file_name`.
  pub fn applies_to(&self, file_name: &str) -> bool {
    mode_matches(&self.mode, file_name)
  }
}

/// Whether a `;`-separated glob list matches `file_name`. `*` matches any
/// file; invalid globs never match.
pub fn mode_matches(mode: &str, file_name: &str) -> bool {
  let mut builder = GlobSetBuilder::new();
  for pattern in mode.split(';').map(str::trim).filter(|p| !p.is_empty()) {
    if pattern == ANY_MODE {
      return true;
    }
    match Glob::new(pattern) {
      Ok(glob) => {
        builder.add(glob);
      },
      Err(err) => log::warn!("ignoring invalid mode pattern '{pattern}': {err}"),
    }
  }
  match builder.build() {
    Ok(set) => set.is_match(file_name),
    Err(err) => {
      log::warn!("invalid mode '{mode}': {err}");
      false
    },
  }
}

pub(crate) fn name_key(slot: u32, mode: &str) -> String {
  format!("command.name.{slot}.{mode}")
}

/// Host command line that calls back into the extension manager.
pub fn format_invocation(prefix: &str, name: &str, param: Option<&str>) -> String {
  let mut line = format!("{prefix} {}", quote(name));
  if let Some(param) = param {
    let _ = write!(line, ", {}", quote(param));
  }
  line
}

/// Reverse of [`format_invocation`]. Returns `None` when `line` is not a
/// command line for `prefix`.
pub fn parse_invocation(prefix: &str, line: &str) -> Option<(String, Option<String>)> {
  let rest = line.trim().strip_prefix(prefix)?;
  if !rest.starts_with(char::is_whitespace) {
    return None;
  }
  let (name, rest) = unquote(rest.trim_start())?;
  let rest = rest.trim();
  if rest.is_empty() {
    return Some((name, None));
  }
  let (param, rest) = unquote(rest.strip_prefix(',')?.trim_start())?;
  rest.trim().is_empty().then_some((name, Some(param)))
}

fn quote(value: &str) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('\'');
  for ch in value.chars() {
    if matches!(ch, '\'' | '\\') {
      quoted.push('\\');
    }
    quoted.push(ch);
  }
  quoted.push('\'');
  quoted
}

fn unquote(input: &str) -> Option<(String, &str)> {
  let body = input.strip_prefix('\'')?;
  let mut value = String::new();
  let mut chars = body.char_indices();
  while let Some((idx, ch)) = chars.next() {
    match ch {
      '\\' => value.push(chars.next()?.1),
      '\'' => return Some((value, &body[idx + 1..])),
      ch => value.push(ch),
    }
  }
  None
}

/// One entry of the batch form, `name|target [param]|mode|shortcut`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
  pub spec:   CommandSpec,
  /// Path of the routine the command forwards to.
  pub target: String,
}

impl Declaration {
  /// With three fields the last one is the shortcut and the mode is `*`.
  pub fn parse(declaration: &str) -> Result<Declaration, Error> {
    let malformed = || Error::MalformedDeclaration(declaration.to_string());

    let mut fields = declaration.split('|').map(str::trim);
    let name = fields.next().filter(|name| !name.is_empty()).ok_or_else(malformed)?;
    let mut command = fields.next().ok_or_else(malformed)?.split_whitespace();
    let target = command.next().ok_or_else(malformed)?;
    let param = command.next();

    let (mode, shortcut) = match (fields.next(), fields.next()) {
      (mode, Some(shortcut)) => (mode, Some(shortcut)),
      (shortcut, None) => (None, shortcut),
    };
    if fields.next().is_some() {
      return Err(malformed());
    }

    let mut spec = CommandSpec::new(name);
    if let Some(mode) = mode.filter(|mode| !mode.is_empty()) {
      spec = spec.mode(mode);
    }
    if let Some(shortcut) = shortcut.filter(|shortcut| !shortcut.is_empty()) {
      spec = spec.shortcut(shortcut);
    }
    if let Some(param) = param {
      spec = spec.param(param);
    }

    Ok(Declaration {
      spec,
      target: target.to_string(),
    })
  }
}

/// Slot allocation, shortcut ownership and the name to thunk table.
pub struct Commands<Ctx> {
  base:      u32,
  next_slot: u32,
  slots:     BTreeMap<u32, CommandSlot>,
  /// Shortcut to the name of the command owning it.
  shortcuts: HashMap<String, String, RandomState>,
  thunks:    HashMap<String, DynHandler<Ctx>, RandomState>,
}

impl<Ctx> Commands<Ctx> {
  pub fn new(base: u32) -> Self {
    Self {
      base,
      next_slot: base,
      slots: BTreeMap::new(),
      shortcuts: HashMap::default(),
      thunks: HashMap::default(),
    }
  }

  /// Define or redefine a command and return its slot.
  ///
  /// A name keeps its slot for the session; redefining it only replaces the
  /// thunk and the stored metadata. When the host records the name in more
  /// than one slot of the same mode, the highest one is reused. A shortcut owned by another command is
  /// rejected before anything is written.
  pub fn define(
    &mut self,
    props: &mut dyn PropertyStore,
    config: &ExtConfig,
    spec: CommandSpec,
    thunk: DynHandler<Ctx>,
  ) -> Result<u32, Error> {
    if let Some(shortcut) = &spec.shortcut
      && let Some(owner) = self.shortcuts.get(shortcut)
      && *owner != spec.name
    {
      return Err(Error::ShortcutConflict {
        shortcut: shortcut.clone(),
        owner:    owner.clone(),
      });
    }

    let existing = (self.base..=self.next_slot)
      .rev()
      .find(|slot| props.get(&name_key(*slot, &spec.mode)).as_deref() == Some(spec.name.as_str()));
    let slot = existing.unwrap_or(self.next_slot);
    let which = format!("{slot}.{}", spec.mode);

    if let Some(shortcut) = &spec.shortcut {
      props.set(&format!("command.shortcut.{which}"), shortcut);
      self.shortcuts.insert(shortcut.clone(), spec.name.clone());
    }
    props.set(&format!("command.name.{which}"), &spec.name);
    props.set(
      &format!("command.{which}"),
      &format_invocation(&config.command_prefix, &spec.name, spec.param.as_deref()),
    );
    props.set(&format!("command.subsystem.{which}"), &config.subsystem);
    props.set(&format!("command.mode.{which}"), &config.command_mode);

    self.thunks.insert(spec.name.clone(), thunk);
    if slot == self.next_slot {
      self.next_slot += 1;
    }
    log::debug!(
      "command '{}' in slot {which}{}",
      spec.name,
      if existing.is_some() { " (reused)" } else { "" }
    );

    self.slots.insert(slot, CommandSlot {
      slot,
      name: spec.name,
      mode: spec.mode,
      shortcut: spec.shortcut,
      param: spec.param,
    });
    Ok(slot)
  }

  pub fn thunk(&self, name: &str) -> Option<DynHandler<Ctx>> {
    self.thunks.get(name).cloned()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.thunks.contains_key(name)
  }

  /// Name of the command owning `shortcut`.
  pub fn shortcut_owner(&self, shortcut: &str) -> Option<&str> {
    self.shortcuts.get(shortcut).map(String::as_str)
  }

  pub fn slot(&self, slot: u32) -> Option<&CommandSlot> {
    self.slots.get(&slot)
  }

  /// Slots in ascending order.
  pub fn slots(&self) -> impl Iterator<Item = &CommandSlot> {
    self.slots.values()
  }

  /// Commands whose mode pattern matches `file_name`, by slot.
  pub fn applicable(&self, file_name: &str) -> Vec<&CommandSlot> {
    self
      .slots
      .values()
      .filter(|slot| slot.applies_to(file_name))
      .collect()
  }

  /// Next slot that would be handed out.
  pub fn next_slot(&self) -> u32 {
    self.next_slot
  }

  /// Forget slots, shortcuts and thunks. The slot counter is kept, since the
  /// host still holds every slot handed out so far.
  pub fn reset(&mut self) {
    self.slots.clear();
    self.shortcuts.clear();
    self.thunks.clear();
  }
}
