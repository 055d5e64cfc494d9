// SpamDetector: builds the automaton once and runs any number of scans.

use spamscan_fsm::Automaton;

use crate::DetectError;
use crate::dictionary::Dictionary;
use crate::driver::{Driver, ScanOptions, ScanReport};
use crate::graph;
use crate::source::{IterSource, SymbolSource};
use crate::trace::{NoTrace, TraceObserver, TracingObserver};

/// Owns a validated automaton for one dictionary plus default scan options.
///
/// Scans never mutate the automaton; every scan gets its own parse context,
/// so one detector can be reused for any number of inputs.
#[derive(Debug)]
pub struct SpamDetector {
    automaton: Automaton,
    dictionary: Dictionary,
    options: ScanOptions,
}

impl SpamDetector {
    /// A detector for the shipped dictionary.
    pub fn new() -> Result<Self, DetectError> {
        Self::with_dictionary(Dictionary::default())
    }

    pub fn with_dictionary(dictionary: Dictionary) -> Result<Self, DetectError> {
        let automaton = graph::build_automaton(&dictionary)?;
        Ok(Self {
            automaton,
            dictionary,
            options: ScanOptions::default(),
        })
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }

    pub fn set_options(&mut self, options: ScanOptions) {
        self.options = options;
    }

    /// Scan an in-memory buffer.
    pub fn scan_bytes(&self, input: &[u8]) -> Result<ScanReport, DetectError> {
        self.scan_source(&mut IterSource::new(input.iter().copied()))
    }

    /// Scan a symbol source, tracing transitions if the options ask for it.
    pub fn scan_source<S: SymbolSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<ScanReport, DetectError> {
        if self.options.trace {
            self.scan_with_observer(source, &mut TracingObserver)
        } else {
            self.scan_with_observer(source, &mut NoTrace)
        }
    }

    /// Scan a symbol source, reporting every transition to `observer`.
    pub fn scan_with_observer<S, O>(
        &self,
        source: &mut S,
        observer: &mut O,
    ) -> Result<ScanReport, DetectError>
    where
        S: SymbolSource + ?Sized,
        O: TraceObserver + ?Sized,
    {
        Driver::new(&self.automaton, self.options).run(source, observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ReadSource;
    use spamscan_fsm::OverflowPolicy;
    use std::io::Cursor;

    const TWO_RECORDS: &[u8] = b"<DOC>\n<DOCID>msg12</DOCID>\nHello\n\nwin \n</DOC>\n\
<DOC>\n<DOCID>msg5</DOCID>\nBye\n\nnothing here\n</DOC>\n";

    #[test]
    fn detector_is_reusable() {
        let detector = SpamDetector::new().unwrap();
        let first = detector.scan_bytes(TWO_RECORDS).unwrap();
        let second = detector.scan_bytes(TWO_RECORDS).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.flagged_ids, vec![12]);
        assert_eq!(first.records_closed, 2);
    }

    #[test]
    fn reader_input() {
        let detector = SpamDetector::new().unwrap();
        let mut source = ReadSource::new(Cursor::new(TWO_RECORDS.to_vec()));
        let report = detector.scan_source(&mut source).unwrap();
        assert_eq!(report.flagged_ids, vec![12]);
        assert!(source.take_error().is_none());
    }

    #[test]
    fn options_are_per_detector() {
        let mut detector = SpamDetector::new().unwrap();
        assert_eq!(detector.options(), ScanOptions::default());
        detector.set_options(ScanOptions {
            overflow: OverflowPolicy::Wrap,
            trace: true,
        });
        assert_eq!(detector.options().overflow, OverflowPolicy::Wrap);
        let report = detector.scan_bytes(TWO_RECORDS).unwrap();
        assert_eq!(report.flagged_ids, vec![12]);
    }

    #[test]
    fn custom_dictionary() {
        let dict = Dictionary::new(["nothing"]).unwrap();
        let detector = SpamDetector::with_dictionary(dict).unwrap();
        assert_eq!(detector.dictionary().len(), 1);
        let report = detector.scan_bytes(TWO_RECORDS).unwrap();
        assert_eq!(report.flagged_ids, vec![5]);
        assert!(detector.automaton().find_state("phrase:nothing").is_some());
    }
}
