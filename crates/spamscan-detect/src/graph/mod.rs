// The concrete state graph for tagged spam records.
//
// Two sub-graphs share one automaton:
// - `markers` recognizes `<DOC>`, `<DOCID>` with its digits, `</DOCID>` and
//   the two skipped header lines, resynchronizing on any unexpected byte;
// - `phrases` scans the body with a shared-prefix phrase matcher, a flagged
//   sink and two parallel close-marker chains.

mod markers;
mod phrases;

use spamscan_fsm::{Automaton, AutomatonBuilder, FsmError};

use crate::dictionary::Dictionary;

/// Name of the start state (outside any record).
pub const START: &str = "start";
/// Name of the state entered after the subject line; leading whitespace
/// keeps it here.
pub const BODY_START: &str = "body_start";
/// Name of the body state right after a delimiter.
pub const DELIMITED: &str = "delimited";
/// Name of the body state inside an undelimited run of bytes.
pub const NOT_DELIMITED: &str = "not_delimited";
/// Name of the sink state of a flagged record.
pub const FLAGGED: &str = "flagged";

/// Build and validate the automaton for `dictionary`.
pub fn build_automaton(dictionary: &Dictionary) -> Result<Automaton, FsmError> {
    let mut b = AutomatonBuilder::new();
    let start = b.add_state(START)?;
    let body = phrases::declare_body(&mut b)?;
    markers::wire_header(&mut b, start, body.start)?;
    phrases::wire_body(&mut b, start, &body, dictionary)?;
    b.build(start)
}
