//! Parallel Batch Reads
//!
//! Uses Rayon to read independent documents concurrently. Every read owns
//! its own cursor, stack and accumulators, so nothing is shared but the
//! entity map, which every read borrows.

use rayon::prelude::*;
use crate::reader::Outcome;
use crate::sax::{parse_sax, EntityMap, SaxEvent};

/// Read every document in parallel, results in input order
pub fn read_parallel<S: AsRef<str> + Sync>(
    inputs: &[S],
    entities: &EntityMap,
) -> Vec<(Vec<SaxEvent>, Outcome)> {
    inputs
        .par_iter()
        .map(|input| parse_sax(input.as_ref(), entities))
        .collect()
}
