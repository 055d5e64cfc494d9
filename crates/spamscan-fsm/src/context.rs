// Per-scan mutable state threaded through every transition action.

use spamscan_core::RecordId;

/// What the digit action does when the identifier no longer fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Clamp at `RecordId::MAX`.
    #[default]
    Saturate,
    /// Wrapping arithmetic.
    Wrap,
    /// Fail the scan with [`FsmError::IdentifierOverflow`](crate::FsmError::IdentifierOverflow).
    Reject,
}

impl OverflowPolicy {
    /// Parse a policy name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "saturate" => Some(OverflowPolicy::Saturate),
            "wrap" => Some(OverflowPolicy::Wrap),
            "reject" => Some(OverflowPolicy::Reject),
            _ => None,
        }
    }
}

/// Mutable state owned by exactly one in-flight scan.
///
/// `current_id` accumulates the digits of the current record's identifier
/// and is cleared when a record opens. `flagged_ids` receives the identifier
/// of each flagged record, in input order.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    current_id: RecordId,
    flagged_ids: Vec<RecordId>,
    records_closed: usize,
    in_record: bool,
    overflow: OverflowPolicy,
}

impl ParseContext {
    pub fn new(overflow: OverflowPolicy) -> Self {
        Self {
            overflow,
            ..Self::default()
        }
    }

    #[inline]
    pub fn current_id(&self) -> RecordId {
        self.current_id
    }

    #[inline]
    pub fn flagged_ids(&self) -> &[RecordId] {
        &self.flagged_ids
    }

    /// Number of close markers completed so far.
    #[inline]
    pub fn records_closed(&self) -> usize {
        self.records_closed
    }

    /// True between a `<DOC>` and the `</DOC>` that closes it.
    #[inline]
    pub fn in_record(&self) -> bool {
        self.in_record
    }

    #[inline]
    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Consume the context, keeping only the flagged identifiers.
    pub fn into_flagged_ids(self) -> Vec<RecordId> {
        self.flagged_ids
    }

    pub(crate) fn open_record(&mut self) {
        self.current_id = 0;
        self.in_record = true;
    }

    /// `current_id = current_id * 10 + digit`, subject to the overflow policy.
    pub(crate) fn push_digit(&mut self, digit: u8) -> Result<(), crate::FsmError> {
        let d = RecordId::from(digit);
        self.current_id = match self.overflow {
            OverflowPolicy::Saturate => self.current_id.saturating_mul(10).saturating_add(d),
            OverflowPolicy::Wrap => self.current_id.wrapping_mul(10).wrapping_add(d),
            OverflowPolicy::Reject => self
                .current_id
                .checked_mul(10)
                .and_then(|v| v.checked_add(d))
                .ok_or(crate::FsmError::IdentifierOverflow {
                    id: self.current_id,
                    digit,
                })?,
        };
        Ok(())
    }

    pub(crate) fn flag_current(&mut self) {
        self.flagged_ids.push(self.current_id);
    }

    pub(crate) fn close_record(&mut self) {
        self.records_closed += 1;
        self.in_record = false;
    }
}
