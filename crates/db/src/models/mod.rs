//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and, where the API writes the table, an insert DTO built from the
//! wire types in `screenplay_core`.

pub mod beat;
pub mod character;
pub mod motif;
pub mod project;
