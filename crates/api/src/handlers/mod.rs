pub mod meta;
pub mod project;
pub mod version;
