// The scan loop: pull a symbol, step the automaton, notify the observer.

use spamscan_core::RecordId;
use spamscan_core::symbol::Symbol;
use spamscan_fsm::{Automaton, OverflowPolicy, ParseContext};

use crate::DetectError;
use crate::source::SymbolSource;
use crate::trace::{TraceEvent, TraceObserver};

/// Per-scan options. The automaton itself is not affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOptions {
    /// Behavior when a record identifier overflows `RecordId`.
    pub overflow: OverflowPolicy,
    /// Forward every transition to `tracing` when the detector picks the
    /// observer itself.
    pub trace: bool,
}

/// The result of a scan that ran to the end of its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Identifiers of flagged records, in the order they appeared.
    pub flagged_ids: Vec<RecordId>,
    /// Number of `</DOC>` markers completed.
    pub records_closed: usize,
    pub symbols_consumed: u64,
    /// Name of the state the scan ended in.
    pub final_state: String,
    /// True if the input ended after a `<DOC>` whose `</DOC>` never came.
    pub ended_in_record: bool,
}

/// Drives one automaton over a symbol source.
#[derive(Debug, Clone, Copy)]
pub struct Driver<'a> {
    automaton: &'a Automaton,
    options: ScanOptions,
}

impl<'a> Driver<'a> {
    pub fn new(automaton: &'a Automaton, options: ScanOptions) -> Self {
        Self { automaton, options }
    }

    /// Scan `source` to its end.
    ///
    /// Each consumed byte is reported to `observer` as a step, and the end of
    /// input as a final event. An unhandled symbol halts the scan at once and
    /// no report is produced.
    pub fn run<S, O>(&self, source: &mut S, observer: &mut O) -> Result<ScanReport, DetectError>
    where
        S: SymbolSource + ?Sized,
        O: TraceObserver + ?Sized,
    {
        let automaton = self.automaton;
        let mut ctx = ParseContext::new(self.options.overflow);
        let mut current = automaton.start();
        let mut consumed: u64 = 0;

        while let Symbol::Byte(b) = source.next_symbol() {
            let next = match automaton.step(current, b, &mut ctx) {
                Ok(next) => next,
                Err(source) => {
                    tracing::error!(
                        state = automaton.state_name(current),
                        symbol = %Symbol::Byte(b),
                        consumed,
                        "scan halted"
                    );
                    return Err(DetectError::Scan { consumed, source });
                }
            };
            observer.observe(TraceEvent::Step {
                from: automaton.state_name(current),
                symbol: b,
                to: automaton.state_name(next),
            });
            current = next;
            consumed += 1;
        }

        let final_state = automaton.state_name(current);
        observer.observe(TraceEvent::End { state: final_state });

        let ended_in_record = ctx.in_record() && current != automaton.start();
        if ended_in_record {
            tracing::warn!(state = final_state, "input ended inside a record");
        }

        Ok(ScanReport {
            records_closed: ctx.records_closed(),
            flagged_ids: ctx.into_flagged_ids(),
            symbols_consumed: consumed,
            final_state: final_state.to_string(),
            ended_in_record,
        })
    }
}
