//! Screenplay domain types, validation rules and prompt builders.
//!
//! Everything here is I/O-free: the `llm` crate sends the prompts built in
//! [`prompts`], the `db` crate stores the records filtered through the
//! `is_storable` rules, and the `api` crate glues both to HTTP.

pub mod beat;
pub mod character;
pub mod coaching;
pub mod error;
pub mod ingredients;
pub mod lenient;
pub mod prompts;
pub mod stage;
pub mod types;
pub mod validation;
