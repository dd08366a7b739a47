//! # the-extman
//!
//! Extension manager for a host editor. Scripts share the host's event
//! callbacks through ordered handler chains, define menu commands with
//! shortcuts, and show selection lists.
//!
//! ```rust
//! use the_extman::{
//!   EventKind,
//!   ExtConfig,
//!   Extman,
//!   host::{
//!     Host,
//!     MemoryHost,
//!   },
//! };
//!
//! let mut extman = Extman::new(MemoryHost::new(), ExtConfig::default());
//! extman.on(EventKind::OpenSwitch, false, |ctx, event| {
//!   let file = event.file().unwrap_or_default().to_string();
//!   ctx.host_mut().print(&format!("now editing {file}"));
//!   false
//! });
//!
//! extman.on_open("notes.txt");
//! extman.on_open("some/dir/");
//! assert_eq!(extman.host().printed(), ["now editing notes.txt"]);
//! ```

pub mod command;
mod derived;
mod error;
mod extman;
pub mod host;
pub mod loader;
pub mod logging;
pub mod scripts;
mod selection;

pub use derived::grab_line;
pub use error::{
  Error,
  Result,
};
pub use extman::Extman;
pub use the_extman_event::{
  Event,
  EventKind,
  HandlerId,
  Modifiers,
};
pub use the_extman_loader::config::ExtConfig;
