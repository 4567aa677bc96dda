//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations that carry no game-tracking semantics:
//! - Password hashing (Argon2id with optional pepper)

pub mod password;
