//! Events synthesized from primitive host events.
//!
//! `Open` and `SwitchFile` feed `OpenSwitch`; a newline typed into a pane
//! feeds `EditorLine` or `OutputLine` with the line that was just completed.

use the_extman_event::{
  Event,
  EventKind,
  Registry,
};

use crate::{
  Extman,
  host::{
    Host,
    Pane,
    PaneId,
  },
};

/// Register the hooks that synthesize derived events. They go first in their
/// chains and take part in short-circuiting like any other handler.
pub(crate) fn install<H: Host>(registry: &mut Registry<Extman<H>>) {
  registry.register_fn(EventKind::Open, on_buffer_switch::<H>, false);
  registry.register_fn(EventKind::SwitchFile, on_buffer_switch::<H>, false);
  registry.register_fn(EventKind::Char, on_line_char::<H>, false);
}

/// Paths ending in a separator name pseudo-buffers, not files.
fn is_pseudo_buffer(file: &str) -> bool {
  file.ends_with(['/', '\\'])
}

fn on_buffer_switch<H: Host>(ctx: &mut Extman<H>, event: &Event<'_>) -> bool {
  if let Some(file) = event.file()
    && !is_pseudo_buffer(file)
  {
    ctx.dispatch(&Event::OpenSwitch(file));
  }
  false
}

fn on_line_char<H: Host>(ctx: &mut Extman<H>, event: &Event<'_>) -> bool {
  if *event != Event::Char('\n') {
    return false;
  }

  let (pane, kind) = match ctx.host().focused_pane() {
    PaneId::Editor => (PaneId::Editor, EventKind::EditorLine),
    PaneId::Output => (PaneId::Output, EventKind::OutputLine),
  };
  if ctx.handlers().is_empty(kind) {
    return false;
  }
  // The output pane consumes the newline whenever it has line handlers.
  let Some(line) = grab_line(ctx.host().pane(pane)) else {
    log::debug!("no completed line to report for {kind}");
    return pane == PaneId::Output;
  };

  match pane {
    PaneId::Editor => {
      ctx.dispatch(&Event::EditorLine(&line));
      false
    },
    PaneId::Output => {
      ctx.dispatch(&Event::OutputLine(&line));
      true
    },
  }
}

/// The line above the caret, without its line ending.
pub fn grab_line(pane: &dyn Pane) -> Option<String> {
  let line = pane.line_from_position(pane.current_pos()).checked_sub(1)?;
  let text = pane.line(line)?;
  let stripped = match text.strip_suffix(pane.eol_mode().as_str()) {
    Some(stripped) => stripped,
    None => text.trim_end_matches(['\r', '\n']),
  };
  Some(stripped.to_string())
}
