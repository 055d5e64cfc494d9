//! Shared leaf types for spamscan.
//!
//! - [`symbol`] -- Input symbols, including the end-of-stream sentinel
//! - [`character`] -- Byte classification used by automaton guards

pub mod character;
pub mod symbol;

/// Numeric identifier carried by a `<DOCID>` marker.
pub type RecordId = u64;
