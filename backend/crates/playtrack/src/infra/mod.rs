//! Infrastructure Layer
//!
//! Repository implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryPlaytrackRepository;
pub use postgres::PgPlaytrackRepository;
