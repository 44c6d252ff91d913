//! Elixir Term Conversion Utilities
//!
//! Converts reader results to Elixir terms.

use crate::reader::Outcome;
use crate::sax::SaxEvent;
use rustler::{Encoder, Env, NewBinary, Term};

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    head,
    open,
    close,
    text,
    completed,
    truncated,
    error,
}

/// Convert an outcome to its atom
pub fn outcome_to_term<'a>(env: Env<'a>, outcome: Outcome) -> Term<'a> {
    match outcome {
        Outcome::Completed => completed().encode(env),
        Outcome::Truncated => truncated().encode(env),
    }
}

/// Convert a read result to `{outcome, events}`
pub fn read_result_to_term<'a>(env: Env<'a>, events: Vec<SaxEvent>, outcome: Outcome) -> Term<'a> {
    (outcome_to_term(env, outcome), events_to_term(env, events)).encode(env)
}

/// Convert an error message to `{:error, reason}`
pub fn error_to_term<'a>(env: Env<'a>, reason: &str) -> Term<'a> {
    (error(), reason).encode(env)
}

/// Convert SAX events to Elixir terms
pub fn events_to_term<'a>(env: Env<'a>, events: Vec<SaxEvent>) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for event in events.into_iter().rev() {
        let event_term = event_to_term(env, event);
        list = list.list_prepend(event_term);
    }
    list
}

/// Convert a single event to an Elixir term
pub fn event_to_term<'a>(env: Env<'a>, event: SaxEvent) -> Term<'a> {
    match event {
        SaxEvent::Head(prolog) => (head(), str_to_binary(env, &prolog)).encode(env),
        SaxEvent::Open { name, attributes } => {
            let name_term = str_to_binary(env, &name);

            // Build in reverse order so the list keeps document order
            let mut attrs = Term::list_new_empty(env);
            for (k, v) in attributes.into_pairs().into_iter().rev() {
                let tuple = (str_to_binary(env, &k), str_to_binary(env, &v));
                attrs = attrs.list_prepend(tuple.encode(env));
            }

            (open(), name_term, attrs).encode(env)
        }
        SaxEvent::Close(name) => (close(), str_to_binary(env, &name)).encode(env),
        SaxEvent::Text(content) => (text(), str_to_binary(env, &content)).encode(env),
    }
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
