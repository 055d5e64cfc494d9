// The immutable state graph and single-step execution.

use hashbrown::HashMap;

use crate::FsmError;
use crate::context::ParseContext;
use crate::rule::{Rule, StateId};

/// A named state and its ordered outgoing rules.
#[derive(Debug, Clone)]
pub struct State {
    pub(crate) name: String,
    pub(crate) rules: Vec<Rule>,
}

impl State {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// A complete, validated automaton.
///
/// Built once by [`AutomatonBuilder`](crate::AutomatonBuilder) and read-only
/// afterwards. It holds no per-scan state, so one automaton can serve any
/// number of scans, each with its own [`ParseContext`].
pub struct Automaton {
    states: Vec<State>,
    names: HashMap<String, StateId>,
    start: StateId,
}

impl std::fmt::Debug for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("state_count", &self.states.len())
            .field("rule_count", &self.rule_count())
            .field("start", &self.state_name(self.start))
            .finish()
    }
}

impl Automaton {
    pub(crate) fn from_parts(
        states: Vec<State>,
        names: HashMap<String, StateId>,
        start: StateId,
    ) -> Self {
        Self {
            states,
            names,
            start,
        }
    }

    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn rule_count(&self) -> usize {
        self.states.iter().map(|s| s.rules.len()).sum()
    }

    /// Look up a state by id.
    pub fn state(&self, id: StateId) -> Result<&State, FsmError> {
        self.states
            .get(id.index())
            .ok_or(FsmError::UnknownState(id.raw()))
    }

    /// Name of a state, or `"?"` for an id from another automaton.
    pub fn state_name(&self, id: StateId) -> &str {
        self.states.get(id.index()).map_or("?", |s| s.name.as_str())
    }

    /// Find a state by its name.
    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (StateId(i as u32), s))
    }

    /// The rule that would be taken from `from` on byte `b`, without running
    /// its action.
    pub fn select(&self, from: StateId, b: u8) -> Result<Option<&Rule>, FsmError> {
        let state = self.state(from)?;
        Ok(state.rules.iter().find(|rule| rule.guard.accepts(b)))
    }

    /// Consume one byte: take the first accepting rule of `from`, run its
    /// action and return the target.
    ///
    /// Returns [`FsmError::UnhandledSymbol`] if no rule accepts `b`. A
    /// validated automaton never does that; the error exists so a defect
    /// halts the scan instead of silently dropping input.
    pub fn step(&self, from: StateId, b: u8, ctx: &mut ParseContext) -> Result<StateId, FsmError> {
        let rule = self
            .select(from, b)?
            .ok_or_else(|| FsmError::UnhandledSymbol {
                state: self.state_name(from).to_string(),
                symbol: b,
            })?;
        if let Some(action) = rule.action {
            action.apply(ctx, b)?;
        }
        Ok(rule.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::guard::Guard;

    /// Two states: `a` loops on everything except `x`, which moves to `b`
    /// and flags. `b` only handles digits, so it is deliberately incomplete.
    fn tiny() -> Automaton {
        let a = StateId(0);
        let b = StateId(1);
        let states = vec![
            State {
                name: "a".to_string(),
                rules: vec![
                    Rule::literal(b'x', b).with(Action::FlagRecord),
                    Rule::on(Guard::Literal(b'x'), a),
                    Rule::otherwise(a),
                ],
            },
            State {
                name: "b".to_string(),
                rules: vec![Rule::on(Guard::Digit, b).with(Action::AccumulateDigit)],
            },
        ];
        let mut names = HashMap::new();
        names.insert("a".to_string(), a);
        names.insert("b".to_string(), b);
        Automaton::from_parts(states, names, a)
    }

    #[test]
    fn first_matching_rule_wins() {
        let fsm = tiny();
        let mut ctx = ParseContext::default();
        let next = fsm.step(fsm.start(), b'x', &mut ctx).unwrap();
        assert_eq!(fsm.state_name(next), "b");
        assert_eq!(ctx.flagged_ids(), &[0]);
    }

    #[test]
    fn catch_all_self_loop() {
        let fsm = tiny();
        let mut ctx = ParseContext::default();
        let next = fsm.step(fsm.start(), b'q', &mut ctx).unwrap();
        assert_eq!(next, fsm.start());
        assert!(ctx.flagged_ids().is_empty());
    }

    #[test]
    fn unhandled_symbol_is_reported() {
        let fsm = tiny();
        let mut ctx = ParseContext::default();
        let b = fsm.find_state("b").unwrap();
        assert_eq!(fsm.step(b, b'4', &mut ctx).unwrap(), b);
        assert_eq!(ctx.current_id(), 4);
        let err = fsm.step(b, b'z', &mut ctx).unwrap_err();
        assert_eq!(
            err,
            FsmError::UnhandledSymbol {
                state: "b".to_string(),
                symbol: b'z'
            }
        );
        assert_eq!(err.to_string(), "unhandled symbol 'z' in state \"b\"");
    }

    #[test]
    fn select_does_not_run_actions() {
        let fsm = tiny();
        let rule = fsm.select(fsm.start(), b'x').unwrap().unwrap();
        assert_eq!(rule.action, Some(Action::FlagRecord));
        let b = fsm.find_state("b").unwrap();
        assert!(fsm.select(b, b'z').unwrap().is_none());
    }

    #[test]
    fn introspection() {
        let fsm = tiny();
        assert_eq!(fsm.state_count(), 2);
        assert_eq!(fsm.rule_count(), 4);
        assert_eq!(fsm.state_name(StateId(9)), "?");
        assert_eq!(fsm.state(StateId(9)).unwrap_err(), FsmError::UnknownState(9));
        assert_eq!(fsm.find_state("missing"), None);
        let names: Vec<&str> = fsm.states().map(|(_, s)| s.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
