//! XML Reader Module
//!
//! - Backend: hook trait the reader reports to
//! - Expanding: the single-pass reader with entity re-parsing

pub mod backend;
pub mod expanding;

pub use backend::{AsyncBackend, Backend, Outcome};
pub use expanding::{read, read_async, Reader};
