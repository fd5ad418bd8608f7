//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod project_repo;
pub mod version_repo;

pub use project_repo::ProjectRepo;
pub use version_repo::VersionRepo;
