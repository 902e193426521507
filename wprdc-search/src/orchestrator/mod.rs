//! Aggregation orchestrator: session assignment, concurrent fan-out,
//! barrier join, flattening and teardown.
//!
//! One run queries every configured source concurrently through the
//! connection context of its host, waits for all of them, and merges the
//! normalised records in source configuration order.

pub mod aggregate;
pub mod flatten;
