use std::{
  cell::{
    Cell,
    RefCell,
  },
  rc::Rc,
};

use the_extman_event::{
  Event,
  EventContext,
  EventKind,
  Handler,
  HandlerId,
  Registry,
  dispatch,
};

struct TestCtx {
  registry: Registry<TestCtx>,
  log:      Rc<RefCell<Vec<String>>>,
}

impl TestCtx {
  fn new() -> Self {
    Self {
      registry: Registry::new(),
      log:      Rc::new(RefCell::new(Vec::new())),
    }
  }

  fn push(&self, msg: &str) {
    self.log.borrow_mut().push(msg.to_string());
  }

  fn logs(&self) -> Vec<String> {
    self.log.borrow().clone()
  }
}

impl EventContext for TestCtx {
  fn registry(&mut self) -> &mut Registry<Self> {
    &mut self.registry
  }
}

fn recorder(name: &'static str, handled: bool) -> Handler<TestCtx> {
  Rc::new(move |ctx: &mut TestCtx, _: &Event<'_>| {
    ctx.push(name);
    handled
  })
}

#[test]
fn test_dispatch_without_handlers_is_not_handled() {
  let mut ctx = TestCtx::new();
  assert!(!dispatch(&mut ctx, &Event::Open("foo.txt")));
  assert!(ctx.logs().is_empty());
}

#[test]
fn test_dispatch_stops_at_first_handled() {
  let mut ctx = TestCtx::new();
  ctx.registry.register(EventKind::Char, recorder("first", false), false);
  ctx.registry.register(EventKind::Char, recorder("second", true), false);
  ctx.registry.register(EventKind::Char, recorder("third", false), false);

  assert!(dispatch(&mut ctx, &Event::Char('a')));
  assert_eq!(ctx.logs(), vec!["first", "second"]);
}

#[test]
fn test_dispatch_visits_every_handler_when_none_claims() {
  let mut ctx = TestCtx::new();
  ctx.registry.register(EventKind::Save, recorder("a", false), false);
  ctx.registry.register(EventKind::Save, recorder("b", false), false);

  assert!(!dispatch(&mut ctx, &Event::Save("x.rs")));
  assert_eq!(ctx.logs(), vec!["a", "b"]);
}

#[test]
fn test_dispatch_only_runs_the_chain_of_the_event_kind() {
  let mut ctx = TestCtx::new();
  ctx.registry.register(EventKind::Save, recorder("save", false), false);
  ctx.registry.register(EventKind::BeforeSave, recorder("before", false), false);

  dispatch(&mut ctx, &Event::BeforeSave("x.rs"));
  assert_eq!(ctx.logs(), vec!["before"]);
}

#[test]
fn test_duplicate_registration_runs_once_per_dispatch() {
  let mut ctx = TestCtx::new();
  let handler = recorder("dup", false);
  ctx.registry.register(EventKind::Key, handler.clone(), false);
  ctx.registry.register(EventKind::Key, handler, false);

  dispatch(&mut ctx, &Event::Key {
    key:       75,
    modifiers: Default::default(),
  });
  assert_eq!(ctx.logs(), vec!["dup"]);
}

#[test]
fn test_one_shot_handler_is_removed_even_when_not_handled() {
  let mut ctx = TestCtx::new();
  ctx.registry.register(EventKind::Close, recorder("once", false), true);
  ctx.registry.register(EventKind::Close, recorder("always", false), false);

  dispatch(&mut ctx, &Event::Close("a"));
  dispatch(&mut ctx, &Event::Close("a"));

  assert_eq!(ctx.logs(), vec!["once", "always", "always"]);
  assert_eq!(ctx.registry.len(EventKind::Close), 1);
}

#[test]
fn test_one_shot_handler_is_removed_when_it_short_circuits() {
  let mut ctx = TestCtx::new();
  ctx.registry.register(EventKind::Char, recorder("once", true), true);
  ctx.registry.register(EventKind::Char, recorder("later", false), false);

  assert!(dispatch(&mut ctx, &Event::Char('1')));
  assert!(!dispatch(&mut ctx, &Event::Char('2')));
  assert_eq!(ctx.logs(), vec!["once", "later"]);
}

#[test]
fn test_removal_during_dispatch_does_not_skip_the_next_handler() {
  let mut ctx = TestCtx::new();
  ctx.registry.register(EventKind::Open, recorder("zero", false), false);
  ctx.registry.register(EventKind::Open, recorder("one", false), true);
  ctx.registry.register(EventKind::Open, recorder("two", false), false);
  ctx.registry.register(EventKind::Open, recorder("three", false), true);

  dispatch(&mut ctx, &Event::Open("f"));
  assert_eq!(ctx.logs(), vec!["zero", "one", "two", "three"]);

  ctx.log.borrow_mut().clear();
  dispatch(&mut ctx, &Event::Open("f"));
  assert_eq!(ctx.logs(), vec!["zero", "two"]);
}

#[test]
fn test_handler_removing_itself_does_not_disturb_iteration() {
  let mut ctx = TestCtx::new();
  let own_id: Rc<Cell<Option<HandlerId>>> = Rc::new(Cell::new(None));

  ctx.registry.register(EventKind::UpdateUI, recorder("before", false), false);
  let id = ctx.registry.register_fn(
    EventKind::UpdateUI,
    {
      let own_id = own_id.clone();
      move |ctx: &mut TestCtx, _: &Event<'_>| {
        ctx.push("self-removing");
        if let Some(id) = own_id.get() {
          ctx.registry.unregister(EventKind::UpdateUI, id);
        }
        false
      }
    },
    false,
  );
  own_id.set(Some(id));
  ctx.registry.register(EventKind::UpdateUI, recorder("after", false), false);

  dispatch(&mut ctx, &Event::UpdateUI);
  dispatch(&mut ctx, &Event::UpdateUI);
  assert_eq!(ctx.logs(), vec![
    "before",
    "self-removing",
    "after",
    "before",
    "after"
  ]);
}

#[test]
fn test_handler_removed_by_earlier_handler_is_skipped() {
  let mut ctx = TestCtx::new();
  let victim = Rc::new(Cell::new(None));

  ctx.registry.register_fn(
    EventKind::DoubleClick,
    {
      let victim = victim.clone();
      move |ctx: &mut TestCtx, _: &Event<'_>| {
        ctx.push("remover");
        if let Some(id) = victim.get() {
          ctx.registry.unregister(EventKind::DoubleClick, id);
        }
        false
      }
    },
    false,
  );
  victim.set(Some(ctx.registry.register(
    EventKind::DoubleClick,
    recorder("victim", false),
    false,
  )));
  ctx.registry.register(EventKind::DoubleClick, recorder("survivor", false), false);

  dispatch(&mut ctx, &Event::DoubleClick);
  assert_eq!(ctx.logs(), vec!["remover", "survivor"]);
}

#[test]
fn test_handler_added_during_dispatch_runs_next_time() {
  let mut ctx = TestCtx::new();
  ctx.registry.register_fn(
    EventKind::MarginClick,
    |ctx: &mut TestCtx, _: &Event<'_>| {
      ctx.push("installer");
      ctx
        .registry
        .register(EventKind::MarginClick, recorder("installed", false), true);
      false
    },
    true,
  );

  dispatch(&mut ctx, &Event::MarginClick);
  assert_eq!(ctx.logs(), vec!["installer"]);

  dispatch(&mut ctx, &Event::MarginClick);
  assert_eq!(ctx.logs(), vec!["installer", "installed"]);
  assert!(ctx.registry.is_empty(EventKind::MarginClick));
}

#[test]
fn test_one_shot_handler_runs_once_under_reentrant_dispatch() {
  let mut ctx = TestCtx::new();
  ctx.registry.register_fn(
    EventKind::SavePointLeft,
    |ctx: &mut TestCtx, event: &Event<'_>| {
      ctx.push("one-shot");
      dispatch(ctx, event);
      false
    },
    true,
  );

  dispatch(&mut ctx, &Event::SavePointLeft);
  assert_eq!(ctx.logs(), vec!["one-shot"]);
}

#[test]
fn test_handlers_see_event_arguments() {
  let mut ctx = TestCtx::new();
  ctx.registry.register_fn(
    EventKind::DwellStart,
    |ctx: &mut TestCtx, event: &Event<'_>| {
      if let Event::DwellStart { pos, word } = event {
        ctx.push(&format!("{word}@{pos}"));
      }
      true
    },
    false,
  );

  assert!(dispatch(&mut ctx, &Event::DwellStart {
    pos:  42,
    word: "main",
  }));
  assert_eq!(ctx.logs(), vec!["main@42"]);
}
