//! Client scripts shipped with the extension manager.

pub mod buffers;
pub mod headers;
pub mod run;
