// Optional per-transition observers.
//
// Observers are informational only; nothing they do affects a scan.

use spamscan_core::symbol::Symbol;

/// One observed step of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent<'a> {
    /// `symbol` was consumed in `from`, moving to `to`.
    Step {
        from: &'a str,
        symbol: u8,
        to: &'a str,
    },
    /// The input ended while in `state`.
    End { state: &'a str },
}

pub trait TraceObserver {
    fn observe(&mut self, event: TraceEvent<'_>);
}

impl<O: TraceObserver + ?Sized> TraceObserver for &mut O {
    fn observe(&mut self, event: TraceEvent<'_>) {
        (**self).observe(event);
    }
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceObserver for NoTrace {
    fn observe(&mut self, _event: TraceEvent<'_>) {}
}

/// Forwards events to `tracing` at TRACE level under `spamscan::trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TraceObserver for TracingObserver {
    fn observe(&mut self, event: TraceEvent<'_>) {
        match event {
            TraceEvent::Step { from, symbol, to } => {
                tracing::trace!(
                    target: "spamscan::trace",
                    from,
                    symbol = %Symbol::Byte(symbol),
                    to
                );
            }
            TraceEvent::End { state } => {
                tracing::trace!(target: "spamscan::trace", state, symbol = %Symbol::End);
            }
        }
    }
}

/// A step recorded by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStep {
    pub from: String,
    pub symbol: u8,
    pub to: String,
}

/// Keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub steps: Vec<RecordedStep>,
    pub end_state: Option<String>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The visited state names: the first step's origin, then every target.
    pub fn path(&self) -> Vec<&str> {
        let mut path: Vec<&str> = self.steps.first().map(|s| s.from.as_str()).into_iter().collect();
        path.extend(self.steps.iter().map(|s| s.to.as_str()));
        path
    }
}

impl TraceObserver for RecordingObserver {
    fn observe(&mut self, event: TraceEvent<'_>) {
        match event {
            TraceEvent::Step { from, symbol, to } => self.steps.push(RecordedStep {
                from: from.to_string(),
                symbol,
                to: to.to_string(),
            }),
            TraceEvent::End { state } => self.end_state = Some(state.to_string()),
        }
    }
}
