//! Domain types shared by the Moqqins storage and HTTP layers.

pub mod document;
pub mod error;
pub mod project;
pub mod types;
pub mod version;
