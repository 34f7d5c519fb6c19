//! Data transfer objects
//!
//! Wire-facing request and response shapes for the HTTP surface.

pub mod job;
