//! Infrastructure layer
//!
//! Concrete stores behind the domain's directory contract.

pub mod directory;

pub use directory::InMemoryDirectory;
