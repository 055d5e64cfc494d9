//! Deterministic, priority-ordered finite automaton engine.
//!
//! Each state owns an ordered list of transition rules. For every input byte
//! the first rule whose guard accepts it is taken: its action (if any) runs
//! against the per-scan [`ParseContext`], then its target becomes the
//! current state. There is no backtracking and no lookahead.
//!
//! # Architecture
//!
//! - [`guard`] -- Pure byte predicates (catch-all, digit, whitespace, delimiter, literal)
//! - [`action`] -- Side-effecting transition actions
//! - [`context`] -- Per-scan mutable state mutated by actions
//! - [`rule`] -- Transition rules and state identifiers
//! - [`automaton`] -- The immutable state graph and single-step execution
//! - [`builder`] -- Incremental construction with validation
//! - [`coverage`] -- Reachability and symbol-coverage checks

pub mod action;
pub mod automaton;
pub mod builder;
pub mod context;
pub mod coverage;
pub mod guard;
pub mod rule;

pub use action::Action;
pub use automaton::{Automaton, State};
pub use builder::AutomatonBuilder;
pub use context::{OverflowPolicy, ParseContext};
pub use guard::Guard;
pub use rule::{Rule, StateId};

use spamscan_core::RecordId;
use spamscan_core::character::escape_byte;

/// Error type for automaton construction and execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FsmError {
    /// No rule of the current state accepted the byte. This is a defect in
    /// the automaton, never in the input.
    #[error("unhandled symbol '{}' in state \"{state}\"", shown(.symbol))]
    UnhandledSymbol { state: String, symbol: u8 },

    /// A reachable state does not cover every byte value.
    #[error("state \"{state}\" does not handle symbol '{}'", shown(.symbol))]
    Uncovered { state: String, symbol: u8 },

    #[error("duplicate state name: {0}")]
    DuplicateState(String),

    #[error("unknown state id: {0}")]
    UnknownState(u32),

    #[error("literal chain has {states} states but {symbols} symbols")]
    ChainMismatch { states: usize, symbols: usize },

    /// The identifier accumulator overflowed under [`OverflowPolicy::Reject`].
    #[error("record identifier overflow: {id} followed by digit {digit}")]
    IdentifierOverflow { id: RecordId, digit: u8 },
}

fn shown(symbol: &u8) -> String {
    escape_byte(*symbol)
}
