//! The scoring core: candidate ranking, mentor matching, improvement ranking,
//! gap analysis and profile summaries over an in-memory skill population.
//!
//! Everything here except `handlers` is pure and synchronous.

pub mod candidates;
pub mod gap_analysis;
pub mod handlers;
pub mod improvement;
pub mod mentors;
pub mod profile;
pub mod records;
pub mod tier;
pub mod weights;
