//! Run the current buffer as a script.
//!
//! A saved buffer is loaded from its file through the script engine. A
//! buffer with unsaved changes is evaluated from its text instead. Failures
//! are reported on the output pane and never reach the caller.

use std::{
  cell::RefCell,
  path::Path,
  rc::Rc,
};

use crate::{
  Extman,
  Result,
  command::{
    ANY_MODE,
    CommandSpec,
  },
  host::{
    Host,
    PaneId,
  },
  loader::ScriptEngine,
};

pub const NAME: &str = "Run as script";
pub const SHORTCUT: &str = "Alt+Ctrl+R";

pub fn install<H, E>(ctx: &mut Extman<H>, engine: E) -> Result<u32>
where
  H: Host,
  E: ScriptEngine<H> + 'static,
{
  let engine = Rc::new(RefCell::new(engine));
  ctx.define_command(
    CommandSpec::new(NAME).mode(ANY_MODE).shortcut(SHORTCUT),
    move |ctx, _| -> anyhow::Result<()> {
      run_current(ctx, &mut *engine.borrow_mut());
      Ok(())
    },
  )
}

fn run_current<H: Host>(ctx: &mut Extman<H>, engine: &mut dyn ScriptEngine<H>) {
  let editor = ctx.host().pane(PaneId::Editor);
  if editor.is_modified() {
    let source = editor.contents();
    if let Err(err) = engine.eval(ctx, &source) {
      ctx.report(&format!("failed to run buffer: {err:#}"));
    }
    return;
  }

  let Some(file) = ctx.current_file() else {
    ctx.report("no current file to run");
    return;
  };
  log::info!("running {file}");
  if let Err(err) = engine.load(ctx, Path::new(&file)) {
    ctx.report(&format!("failed to run {file}: {err:#}"));
  }
}
