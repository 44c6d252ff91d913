//! Reading Strategy Module
//!
//! - Sequential: `reader::read` over one document
//! - Parallel: independent documents on the Rayon pool

pub mod parallel;

pub use parallel::read_parallel;
