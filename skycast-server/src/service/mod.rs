//! Service layer
//!
//! Business logic for the job engine: the submission/polling boundary,
//! the per-job pipeline driver, and TTL eviction of stored records.

pub mod job;
pub mod pipeline;
pub mod reaper;
