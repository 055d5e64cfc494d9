//! Spam record detection over tagged message streams.
//!
//! A stream of `<DOC>` records is scanned one byte at a time by a single
//! automaton that both recognizes the record markers (capturing the numeric
//! `<DOCID>`) and matches a dictionary of flagged phrases in the record
//! body. The identifiers of flagged records are reported in input order.
//!
//! # Architecture
//!
//! - [`dictionary`] -- The flagged-phrase dictionary
//! - [`graph`] -- The concrete state graph (record markers + phrase matcher)
//! - [`source`] -- Input collaborators producing one symbol at a time
//! - [`trace`] -- Optional per-transition observers
//! - [`driver`] -- The scan loop, options and report
//! - [`detector`] -- [`SpamDetector`], an automaton built once and reused per scan

pub mod detector;
pub mod dictionary;
pub mod driver;
pub mod graph;
pub mod source;
pub mod trace;

pub use detector::SpamDetector;
pub use dictionary::Dictionary;
pub use driver::{Driver, ScanOptions, ScanReport};
pub use source::{IterSource, ReadSource, SymbolSource};
pub use spamscan_fsm::OverflowPolicy;
pub use trace::{NoTrace, RecordingObserver, TraceEvent, TraceObserver, TracingObserver};

use spamscan_fsm::FsmError;

/// Error type for detector construction and scanning.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// The state graph failed validation. This is a construction defect.
    #[error("failed to build automaton: {0}")]
    Build(#[from] FsmError),

    /// The scan halted; no result is produced.
    #[error("scan halted after {consumed} symbols: {source}")]
    Scan {
        consumed: u64,
        #[source]
        source: FsmError,
    },

    #[error("dictionary has no phrases")]
    EmptyDictionary,

    #[error("invalid phrase {phrase:?}: {reason}")]
    InvalidPhrase {
        phrase: String,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn fsm_errors_convert_into_build_errors() {
        fn build() -> Result<(), DetectError> {
            Err(FsmError::DuplicateState("start".to_string()))?
        }
        let err = build().unwrap_err();
        assert!(matches!(err, DetectError::Build(FsmError::DuplicateState(_))));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("failed to build automaton"));
    }
}
