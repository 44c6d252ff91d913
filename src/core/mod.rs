//! Core XML reading primitives
//!
//! This module contains the fundamental building blocks for reading:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Prolog: locates the end of the prolog
//! - Tokenizer: token classes for top-level, attribute-list and value lexing
//! - Entities: predefined and numeric character references
//! - Expansion: saved cursors for entities being expanded
//! - Attributes: ordered attribute mapping
//! - Encoding: UTF-16 detection and conversion to UTF-8

pub mod attributes;
pub mod encoding;
pub mod entities;
pub mod expansion;
pub mod prolog;
pub mod scanner;
pub mod tokenizer;
