//! Record manager and its presentation helpers.
//!
//! # Responsibility
//! - Own the ordered record collection and every mutation over it.
//! - Render summary/full views for front-end collaborators.

pub mod manager;
pub mod render;
