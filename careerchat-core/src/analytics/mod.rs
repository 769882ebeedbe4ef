//! Analytics over the interaction log
//!
//! All aggregates are derived on demand from the raw log; nothing in
//! this module is persisted.

pub mod aggregator;

pub use aggregator::Aggregator;
