// Transition rules and state identifiers.

use crate::action::Action;
use crate::guard::Guard;

/// Index of a state inside its [`Automaton`](crate::Automaton).
///
/// Ids are handed out by the builder and are only meaningful for the
/// automaton that builder produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) u32);

impl StateId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// One outgoing transition: guard, optional action, target.
///
/// Rules of a state are evaluated in insertion order and the first accepting
/// guard wins, so literal rules must come before the class or catch-all rules
/// they overlap with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    pub guard: Guard,
    pub action: Option<Action>,
    pub target: StateId,
}

impl Rule {
    /// A rule without an action.
    #[inline]
    pub const fn on(guard: Guard, target: StateId) -> Self {
        Self {
            guard,
            action: None,
            target,
        }
    }

    /// Shorthand for a literal-byte rule.
    #[inline]
    pub const fn literal(b: u8, target: StateId) -> Self {
        Self::on(Guard::Literal(b), target)
    }

    /// Shorthand for a catch-all rule.
    #[inline]
    pub const fn otherwise(target: StateId) -> Self {
        Self::on(Guard::Always, target)
    }

    /// Attach an action to this rule.
    #[inline]
    pub const fn with(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}
