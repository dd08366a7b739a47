use std::{
  fmt,
  rc::Rc,
};

use foldhash::fast::RandomState;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::{
  Event,
  EventKind,
};

/// A shared handler callable.
///
/// Handlers receive the context object and the event and return whether they
/// handled it. Cloning the `Rc` and registering it again is recognised as the
/// same handler.
pub type Handler<Ctx> = Rc<dyn Fn(&mut Ctx, &Event<'_>) -> bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl fmt::Display for HandlerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

pub struct HandlerEntry<Ctx> {
  pub id:       HandlerId,
  pub callback: Handler<Ctx>,
  /// Remove the entry the first time it is invoked.
  pub once:     bool,
}

impl<Ctx> HandlerEntry<Ctx> {
  fn same_as(&self, callback: &Handler<Ctx>, once: bool) -> bool {
    self.once == once && Rc::ptr_eq(&self.callback, callback)
  }
}

impl<Ctx> Clone for HandlerEntry<Ctx> {
  fn clone(&self) -> Self {
    Self {
      id:       self.id,
      callback: self.callback.clone(),
      once:     self.once,
    }
  }
}

impl<Ctx> fmt::Debug for HandlerEntry<Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HandlerEntry")
      .field("id", &self.id)
      .field("once", &self.once)
      .finish_non_exhaustive()
  }
}

pub(crate) type Snapshot<Ctx> = SmallVec<[HandlerEntry<Ctx>; 4]>;

/// Per-kind handler chains in registration order.
pub struct Registry<Ctx> {
  chains:  HashMap<EventKind, Vec<HandlerEntry<Ctx>>, RandomState>,
  next_id: u64,
}

impl<Ctx> Default for Registry<Ctx> {
  fn default() -> Self {
    Self::new()
  }
}

impl<Ctx> fmt::Debug for Registry<Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut map = f.debug_map();
    for kind in EventKind::ALL {
      if let Some(chain) = self.chains.get(&kind).filter(|chain| !chain.is_empty()) {
        map.entry(&kind, chain);
      }
    }
    map.finish()
  }
}

impl<Ctx> Registry<Ctx> {
  pub fn new() -> Self {
    Self {
      chains:  HashMap::default(),
      next_id: 1,
    }
  }

  /// Append `callback` to the chain for `kind`.
  ///
  /// Registering a callback that is already in the chain with the same `once`
  /// flag does not add a second entry; the existing id is returned instead.
  pub fn register(&mut self, kind: EventKind, callback: Handler<Ctx>, once: bool) -> HandlerId {
    let chain = self.chains.entry(kind).or_default();
    if let Some(existing) = chain.iter().find(|entry| entry.same_as(&callback, once)) {
      log::trace!("{kind}: handler {} already registered", existing.id);
      return existing.id;
    }

    let id = HandlerId(self.next_id);
    self.next_id += 1;
    chain.push(HandlerEntry { id, callback, once });
    log::trace!("{kind}: registered handler {id} (once: {once})");
    id
  }

  pub fn register_fn<F>(&mut self, kind: EventKind, callback: F, once: bool) -> HandlerId
  where
    F: Fn(&mut Ctx, &Event<'_>) -> bool + 'static,
  {
    self.register(kind, Rc::new(callback), once)
  }

  /// Remove the entry `id` from the chain for `kind`.
  pub fn unregister(&mut self, kind: EventKind, id: HandlerId) -> bool {
    let Some(chain) = self.chains.get_mut(&kind) else {
      return false;
    };
    match chain.iter().position(|entry| entry.id == id) {
      Some(idx) => {
        chain.remove(idx);
        true
      },
      None => false,
    }
  }

  pub fn contains(&self, kind: EventKind, id: HandlerId) -> bool {
    self
      .chains
      .get(&kind)
      .is_some_and(|chain| chain.iter().any(|entry| entry.id == id))
  }

  /// Drop every handler for `kind`.
  pub fn clear(&mut self, kind: EventKind) {
    if let Some(chain) = self.chains.get_mut(&kind) {
      chain.clear();
    }
  }

  /// Drop every handler of every kind.
  pub fn reset(&mut self) {
    self.chains.clear();
  }

  pub fn len(&self, kind: EventKind) -> usize {
    self.chains.get(&kind).map_or(0, Vec::len)
  }

  pub fn is_empty(&self, kind: EventKind) -> bool {
    self.len(kind) == 0
  }

  pub fn entries(&self, kind: EventKind) -> &[HandlerEntry<Ctx>] {
    self.chains.get(&kind).map(Vec::as_slice).unwrap_or(&[])
  }

  pub(crate) fn snapshot(&self, kind: EventKind) -> Snapshot<Ctx> {
    self.entries(kind).iter().cloned().collect()
  }
}
