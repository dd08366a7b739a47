//! # the-extman-event
//!
//! Ordered handler chains for a fixed set of editor lifecycle events.
//!
//! Every [`EventKind`] owns one chain. Handlers run in registration order and
//! the first handler that reports the event as handled stops the chain:
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use the_extman_event::{
//!   Event,
//!   EventContext,
//!   EventKind,
//!   Registry,
//!   dispatch,
//! };
//!
//! struct Ctx {
//!   registry: Registry<Ctx>,
//!   typed:    String,
//! }
//!
//! impl EventContext for Ctx {
//!   fn registry(&mut self) -> &mut Registry<Self> {
//!     &mut self.registry
//!   }
//! }
//!
//! let mut ctx = Ctx {
//!   registry: Registry::new(),
//!   typed:    String::new(),
//! };
//!
//! ctx.registry.register(
//!   EventKind::Char,
//!   Rc::new(|ctx: &mut Ctx, event: &Event<'_>| {
//!     if let Event::Char(ch) = event {
//!       ctx.typed.push(*ch);
//!     }
//!     false
//!   }),
//!   false,
//! );
//!
//! assert!(!dispatch(&mut ctx, &Event::Char('h')));
//! assert!(!dispatch(&mut ctx, &Event::Char('i')));
//! assert_eq!(ctx.typed, "hi");
//! ```
//!
//! One-shot handlers are removed the first time they run, whatever they
//! return. Handlers may register or remove other handlers (including
//! themselves) while a chain is being dispatched.

mod dispatch;
mod event;
mod registry;

pub use dispatch::{
  EventContext,
  dispatch,
};
pub use event::{
  Event,
  EventKind,
  Modifiers,
};
pub use registry::{
  Handler,
  HandlerEntry,
  HandlerId,
  Registry,
};
