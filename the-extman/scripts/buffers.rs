//! Buffer switcher: a drop-down of buffers in most-recently-used order.

use std::{
  cell::RefCell,
  rc::Rc,
};

use the_extman_event::EventKind;

use crate::{
  Extman,
  Result,
  host::Host,
};

pub const SWITCH_BUFFER: &str = "Switch Buffer|buffers::show_list|Alt+F12";
pub const LAST_BUFFER: &str = "Last Buffer|buffers::last|Ctrl+F12";

/// Buffers in most-recently-used order, current buffer first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferList {
  buffers: Vec<String>,
}

impl BufferList {
  /// Move `file` to the front.
  pub fn touch(&mut self, file: &str) {
    self.buffers.retain(|buffer| buffer != file && !buffer.is_empty());
    if !file.is_empty() {
      self.buffers.insert(0, file.to_string());
    }
  }

  /// The buffer that was current before the current one.
  pub fn previous(&self) -> Option<&str> {
    self.buffers.get(1).map(String::as_str)
  }

  pub fn as_slice(&self) -> &[String] {
    &self.buffers
  }

  pub fn len(&self) -> usize {
    self.buffers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffers.is_empty()
  }
}

pub type SharedBuffers = Rc<RefCell<BufferList>>;

/// Track buffers and define the switcher commands. Returns the tracked list.
pub fn install<H: Host>(ctx: &mut Extman<H>) -> Result<SharedBuffers> {
  ctx.command(&[SWITCH_BUFFER, LAST_BUFFER])?;

  let buffers = SharedBuffers::default();

  let recent = buffers.clone();
  ctx.on(EventKind::OpenSwitch, false, move |_, event| {
    if let Some(file) = event.file() {
      recent.borrow_mut().touch(file);
    }
    false
  });

  let list = buffers.clone();
  ctx.register_routine("buffers::show_list", move |ctx, _| -> anyhow::Result<()> {
    let items = list.borrow().as_slice().to_vec();
    ctx.user_list_show(&items, 1, |ctx, file| ctx.host_mut().open(file));
    Ok(())
  });

  let last = buffers.clone();
  ctx.register_routine("buffers::last", move |ctx, _| -> anyhow::Result<()> {
    let previous = last.borrow().previous().map(str::to_string);
    if let Some(file) = previous {
      ctx.host_mut().open(&file);
    }
    Ok(())
  });

  Ok(buffers)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn touch_keeps_most_recent_first_without_duplicates() {
    let mut buffers = BufferList::default();
    buffers.touch("a.rs");
    buffers.touch("b.rs");
    buffers.touch("a.rs");
    buffers.touch("");

    assert_eq!(buffers.as_slice(), ["a.rs", "b.rs"]);
    assert_eq!(buffers.previous(), Some("b.rs"));
  }

  #[test]
  fn single_buffer_has_no_previous() {
    let mut buffers = BufferList::default();
    buffers.touch("only.rs");
    assert_eq!(buffers.previous(), None);
    assert_eq!(buffers.len(), 1);
  }
}
