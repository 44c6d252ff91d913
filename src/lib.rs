//! XmlSplice - single-pass XML reading with entity re-parsing
//!
//! Entity references are expanded by re-lexing their replacement text in
//! place: as markup at the top level, as literal text inside attribute
//! values. Malformed input never raises; the read stops and reports
//! `:truncated` alongside every event delivered before that point.
//!
//! Entry points:
//! A: Single read with an inline entity list (read_events)
//! B: Single read against a persistent entity table (read_events_with_table)
//! C: Batch of independent reads on the Rayon pool (read_events_batch)

use rustler::{Binary, Encoder, Env, NifResult, ResourceArc, Term};
use std::borrow::Cow;

pub mod core;
pub mod reader;
pub mod resource;
pub mod sax;
pub mod strategy;
pub mod term;

use crate::core::encoding::decode_document;
use resource::{EntityTableRef, EntityTableResource};
use sax::{parse_sax, EntityMap};
use term::{error_to_term, read_result_to_term};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "memory_tracking")]
mod tracking {
    use std::alloc::{GlobalAlloc, Layout};
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
    pub static PEAK_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

    pub struct TrackingAllocator;

    #[cfg(feature = "mimalloc")]
    static UNDERLYING: mimalloc::MiMalloc = mimalloc::MiMalloc;

    #[cfg(not(feature = "mimalloc"))]
    static UNDERLYING: std::alloc::System = std::alloc::System;

    unsafe impl GlobalAlloc for TrackingAllocator {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            let ptr = UNDERLYING.alloc(layout);
            if !ptr.is_null() {
                let current = ALLOCATED.fetch_add(layout.size(), Ordering::Relaxed) + layout.size();
                PEAK_ALLOCATED.fetch_max(current, Ordering::Relaxed);
            }
            ptr
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            ALLOCATED.fetch_sub(layout.size(), Ordering::Relaxed);
            UNDERLYING.dealloc(ptr, layout)
        }
    }
}

#[cfg(feature = "memory_tracking")]
#[global_allocator]
static GLOBAL: tracking::TrackingAllocator = tracking::TrackingAllocator;

#[cfg(all(feature = "mimalloc", not(feature = "memory_tracking")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Memory Tracking NIFs
// ============================================================================

#[cfg(feature = "memory_tracking")]
use std::sync::atomic::Ordering;

#[cfg(feature = "memory_tracking")]
#[rustler::nif]
fn get_rust_memory() -> usize {
    tracking::ALLOCATED.load(Ordering::SeqCst)
}

#[cfg(feature = "memory_tracking")]
#[rustler::nif]
fn get_rust_memory_peak() -> usize {
    tracking::PEAK_ALLOCATED.load(Ordering::SeqCst)
}

#[cfg(feature = "memory_tracking")]
#[rustler::nif]
fn reset_rust_memory_stats() -> (usize, usize) {
    let current = tracking::ALLOCATED.load(Ordering::SeqCst);
    let peak = tracking::PEAK_ALLOCATED.swap(current, Ordering::SeqCst);
    (current, peak)
}

#[cfg(not(feature = "memory_tracking"))]
#[rustler::nif]
fn get_rust_memory() -> usize {
    0
}

#[cfg(not(feature = "memory_tracking"))]
#[rustler::nif]
fn get_rust_memory_peak() -> usize {
    0
}

#[cfg(not(feature = "memory_tracking"))]
#[rustler::nif]
fn reset_rust_memory_stats() -> (usize, usize) {
    (0, 0)
}

// ============================================================================
// Entry A: Single Read
// ============================================================================

/// Read a document, expanding the given `{name, replacement}` entities.
/// Returns `{:completed | :truncated, events}` or `{:error, reason}`.
#[rustler::nif]
fn read_events<'a>(
    env: Env<'a>,
    input: Binary<'a>,
    entities: Vec<(String, String)>,
) -> NifResult<Term<'a>> {
    let document = match decode_document(input.as_slice()) {
        Ok(document) => document,
        Err(reason) => return Ok(error_to_term(env, reason)),
    };

    let entities: EntityMap = entities.into_iter().collect();
    let (events, outcome) = parse_sax(&document, &entities);
    Ok(read_result_to_term(env, events, outcome))
}

// ============================================================================
// Entry B: Persistent Entity Tables
// ============================================================================

/// Create an empty entity table
#[rustler::nif]
fn entities_new() -> EntityTableRef {
    ResourceArc::new(EntityTableResource::new())
}

/// Define or replace an entity, returning whether it replaced one
#[rustler::nif]
fn entities_put(table: EntityTableRef, name: String, replacement: String) -> NifResult<bool> {
    table
        .with_table(|entities| entities.insert(name, replacement).is_some())
        .map_err(|e| rustler::Error::Term(Box::new(e)))
}

/// Remove an entity, returning whether it existed
#[rustler::nif]
fn entities_delete(table: EntityTableRef, name: String) -> NifResult<bool> {
    table
        .with_table(|entities| entities.remove(&name).is_some())
        .map_err(|e| rustler::Error::Term(Box::new(e)))
}

/// Number of entities in the table
#[rustler::nif]
fn entities_count(table: EntityTableRef) -> NifResult<usize> {
    table
        .with_table(|entities| entities.len())
        .map_err(|e| rustler::Error::Term(Box::new(e)))
}

/// Read a document against `table`, holding its lock for the read
#[rustler::nif]
fn read_events_with_table<'a>(
    env: Env<'a>,
    input: Binary<'a>,
    table: EntityTableRef,
) -> NifResult<Term<'a>> {
    let document = match decode_document(input.as_slice()) {
        Ok(document) => document,
        Err(reason) => return Ok(error_to_term(env, reason)),
    };

    match table.with_table(|entities| parse_sax(&document, entities)) {
        Ok((events, outcome)) => Ok(read_result_to_term(env, events, outcome)),
        Err(reason) => Ok(error_to_term(env, reason)),
    }
}

// ============================================================================
// Entry C: Parallel Batch
// ============================================================================

/// Read many documents in parallel with one shared entity list.
/// Returns one result per input, in input order.
#[rustler::nif(schedule = "DirtyCpu")]
fn read_events_batch<'a>(
    env: Env<'a>,
    inputs: Vec<Binary<'a>>,
    entities: Vec<(String, String)>,
) -> NifResult<Term<'a>> {
    let entities: EntityMap = entities.into_iter().collect();
    let decoded: Vec<Result<Cow<'_, str>, &'static str>> = inputs
        .iter()
        .map(|input| decode_document(input.as_slice()))
        .collect();

    let documents: Vec<&str> = decoded.iter().filter_map(|d| d.as_deref().ok()).collect();
    let mut results = strategy::read_parallel(&documents, &entities).into_iter();

    let terms: Vec<Term<'a>> = decoded
        .iter()
        .map(|d| match d {
            Err(reason) => error_to_term(env, reason),
            Ok(_) => match results.next() {
                Some((events, outcome)) => read_result_to_term(env, events, outcome),
                None => error_to_term(env, "missing_result"),
            },
        })
        .collect();

    Ok(terms.encode(env))
}

// ============================================================================
// NIF Initialization
// ============================================================================

// EntityTableResource registers itself through #[rustler::resource_impl]
rustler::init!("Elixir.XmlSplice.Native");
