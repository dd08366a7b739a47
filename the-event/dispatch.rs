use crate::{
  Event,
  Registry,
};

/// Context contract for dispatching.
///
/// The context owns its [`Registry`]; handlers receive the whole context so
/// they can reach the host and register further handlers.
pub trait EventContext: Sized {
  fn registry(&mut self) -> &mut Registry<Self>;
}

/// Run the handler chain for `event`.
///
/// Handlers run in registration order until one returns `true`, which is then
/// the result. An empty chain, or a chain in which no handler claims the
/// event, yields `false`.
///
/// The chain is snapshotted before the first handler runs. Entries removed by
/// a handler are skipped if they have not been visited yet, and entries added
/// by a handler only take part in later dispatches. One-shot entries are
/// removed before they are invoked, so they run at most once even when a
/// handler dispatches the same kind again.
pub fn dispatch<Ctx: EventContext>(ctx: &mut Ctx, event: &Event<'_>) -> bool {
  let kind = event.kind();
  let snapshot = ctx.registry().snapshot(kind);
  if snapshot.is_empty() {
    return false;
  }
  log::trace!("dispatching {kind} to {} handler(s)", snapshot.len());

  for entry in snapshot {
    let registry = ctx.registry();
    if !registry.contains(kind, entry.id) {
      continue;
    }
    if entry.once {
      registry.unregister(kind, entry.id);
    }

    if (entry.callback)(ctx, event) {
      log::trace!("{kind} handled by {}", entry.id);
      return true;
    }
  }
  false
}
