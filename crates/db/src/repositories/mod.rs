//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod beat_repo;
pub mod character_repo;
pub mod motif_repo;
pub mod project_repo;

pub use beat_repo::BeatRepo;
pub use character_repo::CharacterRepo;
pub use motif_repo::MotifRepo;
pub use project_repo::ProjectRepo;
