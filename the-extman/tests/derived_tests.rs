use std::{
  cell::RefCell,
  rc::Rc,
};

use the_extman::{
  Event,
  EventKind,
  ExtConfig,
  Extman,
  command::CommandSpec,
  host::{
    EolMode,
    MemoryHost,
    PaneId,
  },
};

type Log = Rc<RefCell<Vec<String>>>;

fn setup() -> (Extman<MemoryHost>, Log) {
  (
    Extman::new(MemoryHost::new(), ExtConfig::default()),
    Rc::new(RefCell::new(Vec::new())),
  )
}

fn record(extman: &mut Extman<MemoryHost>, log: &Log, kind: EventKind, handled: bool) {
  let log = log.clone();
  extman.on(kind, false, move |_, event| {
    let arg = event.file().or(event.text()).unwrap_or_default();
    log.borrow_mut().push(format!("{kind} {arg}"));
    handled
  });
}

#[test]
fn test_open_dispatches_open_switch() {
  let (mut extman, log) = setup();
  record(&mut extman, &log, EventKind::OpenSwitch, false);

  assert!(!extman.on_open("foo.txt"));
  assert!(!extman.on_switch_file("bar.txt"));
  assert_eq!(*log.borrow(), [
    "open-switch foo.txt",
    "open-switch bar.txt"
  ]);
}

#[test]
fn test_trailing_separator_is_not_a_buffer() {
  let (mut extman, log) = setup();
  record(&mut extman, &log, EventKind::OpenSwitch, false);

  extman.on_open("dir/");
  extman.on_switch_file(r"C:\dir\");
  assert!(log.borrow().is_empty());
}

#[test]
fn test_open_handlers_after_the_hook_still_run() {
  let (mut extman, log) = setup();
  record(&mut extman, &log, EventKind::OpenSwitch, true);
  record(&mut extman, &log, EventKind::Open, true);

  assert!(extman.on_open("foo.txt"));
  assert_eq!(*log.borrow(), ["open-switch foo.txt", "open foo.txt"]);
}

#[test]
fn test_newline_in_editor_pane_is_passed_through() {
  let (mut extman, log) = setup();
  record(&mut extman, &log, EventKind::EditorLine, true);

  extman.host_mut().editor.type_text("fn main() {}\n");
  assert!(!extman.on_char('\n'));
  assert_eq!(*log.borrow(), ["editor-line fn main() {}"]);
}

#[test]
fn test_newline_in_output_pane_is_consumed() {
  let (mut extman, log) = setup();
  record(&mut extman, &log, EventKind::OutputLine, false);

  extman.host_mut().focus(PaneId::Output);
  extman.host_mut().output.type_text("make: ok\n");
  assert!(extman.on_char('\n'));
  assert_eq!(*log.borrow(), ["output-line make: ok"]);
}

#[test]
fn test_newline_in_empty_output_pane_is_still_consumed() {
  let (mut extman, log) = setup();
  record(&mut extman, &log, EventKind::OutputLine, false);

  extman.host_mut().focus(PaneId::Output);
  assert!(extman.on_char('\n'));
  assert!(log.borrow().is_empty());

  extman.host_mut().focus(PaneId::Editor);
  record(&mut extman, &log, EventKind::EditorLine, true);
  assert!(!extman.on_char('\n'));
  assert!(log.borrow().is_empty());
}

#[test]
fn test_newline_without_line_handlers_is_ignored() {
  let (mut extman, log) = setup();
  record(&mut extman, &log, EventKind::EditorLine, true);

  extman.host_mut().focus(PaneId::Output);
  extman.host_mut().output.type_text("ignored\n");
  assert!(!extman.on_char('\n'));
  assert!(log.borrow().is_empty());
}

#[test]
fn test_crlf_line_ending_is_stripped() {
  let (mut extman, log) = setup();
  record(&mut extman, &log, EventKind::EditorLine, false);

  let editor = &mut extman.host_mut().editor;
  editor.set_eol_mode(EolMode::CrLf);
  editor.type_text("first\r\nsecond\r\n");
  extman.on_char('\n');
  assert_eq!(*log.borrow(), ["editor-line second"]);
}

#[test]
fn test_other_characters_do_not_produce_lines() {
  let (mut extman, log) = setup();
  record(&mut extman, &log, EventKind::EditorLine, false);
  record(&mut extman, &log, EventKind::Char, false);

  extman.host_mut().editor.type_text("a\n");
  extman.on_char('a');
  assert_eq!(*log.borrow(), ["char "]);
}

#[test]
fn test_borland_style_key_sequence() {
  let (mut extman, log) = setup();

  // Ctrl+K arms a one-shot Char handler that swallows the next key.
  let seen = log.clone();
  extman
    .define_command(
      CommandSpec::new("ctrl-k").shortcut("Ctrl+K"),
      move |ctx, _| -> anyhow::Result<()> {
        let seen = seen.clone();
        ctx.on(EventKind::Char, true, move |_, event| {
          if let Event::Char(ch) = event {
            seen.borrow_mut().push(format!("ctrl-k {ch}"));
          }
          true
        });
        Ok(())
      },
    )
    .unwrap();

  assert!(!extman.on_char('x'));
  extman.execute("extman:call 'ctrl-k'").unwrap();
  assert!(extman.on_char('b'));
  assert!(!extman.on_char('b'));
  assert_eq!(*log.borrow(), ["ctrl-k b"]);
  assert_eq!(extman.handlers().len(EventKind::Char), 1);
}
