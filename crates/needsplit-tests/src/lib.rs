//! Shared helpers for needsplit integration tests.

pub mod helpers;
