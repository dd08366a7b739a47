//! # the-extman-dispatch
//!
//! A string-keyed routine registry with nested namespaces, used to bind
//! commands to routines that may not exist yet when the command is declared.
//!
//! Routines are looked up by path (`Borland::mark` or `borland.mark`) at call
//! time, so a declaration can refer to a routine that a later script installs.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use the_extman_dispatch::DispatchRegistry;
//!
//! struct Ctx {
//!   calls: Vec<String>,
//! }
//!
//! let mut registry = DispatchRegistry::<Ctx>::new();
//! registry.set(
//!   "buffers::last",
//!   Rc::new(|ctx: &mut Ctx, arg: Option<&str>| -> anyhow::Result<()> {
//!     ctx.calls.push(format!("last {arg:?}"));
//!     Ok(())
//!   }),
//! );
//!
//! let mut ctx = Ctx { calls: Vec::new() };
//! let routine = registry.resolve("buffers.last").unwrap();
//! routine(&mut ctx, None).unwrap();
//! assert_eq!(ctx.calls, ["last None"]);
//! ```

mod registry;

pub use registry::{
  DispatchRegistry,
  DynHandler,
  ResolveError,
  split_path,
};
