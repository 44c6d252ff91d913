//! SAX (Simple API for XML) Module
//!
//! Collects reader hooks into owned events for batch return to Elixir.
//!
//! ## Architecture
//!
//! ```text
//! Reader ---> SaxCollector ---> SaxEvent[]
//!                  |
//!                  v
//!            Elixir Terms (via NIF)
//! ```
//!
//! ## Event Types
//!
//! - `Head` - Raw prolog, exactly once per read
//! - `Open` - Element start (void elements too) with attributes
//! - `Close` - Element end
//! - `Text` - Merged character data, entities expanded

pub mod collector;
pub mod events;

pub use collector::{parse_sax, EntityMap, SaxCollector};
pub use events::SaxEvent;
