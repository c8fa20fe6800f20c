//! Core resolution engine for the price oracle.
//!
//! This crate orchestrates price requests over the cache and the
//! upstream feed: read-through lookups with stale fallback on the
//! single-key path, partition-and-batch consolidation on the multi-key
//! path, and the scored market listing built against the static staking
//! reference dataset.

/// Market listing assembly: staking summaries, scores, ordering.
pub mod markets;
/// Read-through price resolution over cache and feed.
pub mod resolver;

pub use resolver::Resolver;
