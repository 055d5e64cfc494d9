// Side-effecting transition actions.

use spamscan_core::character::digit_value;

use crate::FsmError;
use crate::context::ParseContext;

/// The closed set of actions a transition rule can run.
///
/// An action runs exactly once, when its rule is taken, before the current
/// state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// A record opened: clear the identifier accumulator.
    BeginRecord,
    /// Append the consumed digit to the identifier accumulator.
    AccumulateDigit,
    /// Append the current identifier to the flagged list.
    FlagRecord,
    /// A record closed.
    CloseRecord,
}

impl Action {
    /// Run the action for the consumed byte `b`.
    ///
    /// `AccumulateDigit` ignores bytes that are not digits; it is only ever
    /// attached to digit-guarded rules.
    pub fn apply(self, ctx: &mut ParseContext, b: u8) -> Result<(), FsmError> {
        match self {
            Action::BeginRecord => ctx.open_record(),
            Action::AccumulateDigit => {
                if let Some(d) = digit_value(b) {
                    ctx.push_digit(d)?;
                }
            }
            Action::FlagRecord => {
                ctx.flag_current();
                tracing::debug!(record_id = ctx.current_id(), "record flagged");
            }
            Action::CloseRecord => ctx.close_record(),
        }
        Ok(())
    }
}
