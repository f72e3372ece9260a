//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by route group.

/// Chat reply handlers.
pub mod chat;
/// Memory toggle handlers.
pub mod memory;
/// Liveness, endpoint directory and entry page.
pub mod meta;
/// System statistics handlers.
pub mod system;
