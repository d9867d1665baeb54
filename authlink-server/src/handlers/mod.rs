//! Request handlers

pub mod health;
pub mod verify;

pub use health::{health, ready};
pub use verify::{verify_handler, verify_tag_handler};
