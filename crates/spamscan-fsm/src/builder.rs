// Incremental automaton construction.
//
// States are declared first (so rules can refer to states that get their own
// rules later), then rules are appended in priority order. `build` checks
// that every rule target exists and that the reachable graph covers the
// whole byte alphabet.

use hashbrown::HashMap;

use crate::FsmError;
use crate::action::Action;
use crate::automaton::{Automaton, State};
use crate::rule::{Rule, StateId};

#[derive(Debug, Default)]
pub struct AutomatonBuilder {
    states: Vec<State>,
    names: HashMap<String, StateId>,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new state with no rules.
    pub fn add_state(&mut self, name: impl Into<String>) -> Result<StateId, FsmError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(FsmError::DuplicateState(name));
        }
        let id = StateId(self.states.len() as u32);
        self.names.insert(name.clone(), id);
        self.states.push(State {
            name,
            rules: Vec::new(),
        });
        Ok(id)
    }

    /// Declare `count` states named `{prefix}_0` .. `{prefix}_{count-1}`.
    pub fn add_states(&mut self, prefix: &str, count: usize) -> Result<Vec<StateId>, FsmError> {
        (0..count)
            .map(|i| self.add_state(format!("{prefix}_{i}")))
            .collect()
    }

    /// Append one rule to `from`. Earlier rules take precedence.
    pub fn push(&mut self, from: StateId, rule: Rule) -> Result<(), FsmError> {
        let state = self
            .states
            .get_mut(from.index())
            .ok_or(FsmError::UnknownState(from.raw()))?;
        state.rules.push(rule);
        Ok(())
    }

    /// Append several rules to `from`, in order.
    pub fn extend(&mut self, from: StateId, rules: &[Rule]) -> Result<(), FsmError> {
        for rule in rules {
            self.push(from, *rule)?;
        }
        Ok(())
    }

    /// Wire a chain that recognizes `text` one literal byte at a time.
    ///
    /// `chain[i]` expects `text[i]` and moves to `chain[i + 1]`; the last
    /// state moves to `exit`, running `exit_action` if given. Every chain
    /// state then gets `fallback` appended for all other bytes.
    pub fn literal_chain(
        &mut self,
        chain: &[StateId],
        text: &[u8],
        exit: StateId,
        exit_action: Option<Action>,
        fallback: &[Rule],
    ) -> Result<(), FsmError> {
        if chain.len() != text.len() {
            return Err(FsmError::ChainMismatch {
                states: chain.len(),
                symbols: text.len(),
            });
        }
        for (i, (&state, &b)) in chain.iter().zip(text).enumerate() {
            let rule = match chain.get(i + 1) {
                Some(&next) => Rule::literal(b, next),
                None => {
                    let last = Rule::literal(b, exit);
                    match exit_action {
                        Some(action) => last.with(action),
                        None => last,
                    }
                }
            };
            self.push(state, rule)?;
            self.extend(state, fallback)?;
        }
        Ok(())
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Finish construction and validate coverage from `start`.
    pub fn build(self, start: StateId) -> Result<Automaton, FsmError> {
        let automaton = self.build_unchecked(start)?;
        automaton.check_coverage()?;
        tracing::debug!(
            states = automaton.state_count(),
            rules = automaton.rule_count(),
            "automaton built"
        );
        Ok(automaton)
    }

    /// Finish construction checking only that every referenced state exists.
    pub fn build_unchecked(self, start: StateId) -> Result<Automaton, FsmError> {
        let count = self.states.len();
        if start.index() >= count {
            return Err(FsmError::UnknownState(start.raw()));
        }
        for state in &self.states {
            if let Some(bad) = state.rules.iter().find(|r| r.target.index() >= count) {
                return Err(FsmError::UnknownState(bad.target.raw()));
            }
        }
        Ok(Automaton::from_parts(self.states, self.names, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParseContext;
    use crate::guard::Guard;

    #[test]
    fn duplicate_names_are_rejected() {
        let mut b = AutomatonBuilder::new();
        b.add_state("start").unwrap();
        assert_eq!(
            b.add_state("start"),
            Err(FsmError::DuplicateState("start".to_string()))
        );
    }

    #[test]
    fn iterated_names() {
        let mut b = AutomatonBuilder::new();
        let ids = b.add_states("open", 3).unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(b.state_count(), 3);
        b.extend(ids[0], &[Rule::otherwise(ids[0])]).unwrap();
        let fsm = b.build(ids[0]).unwrap();
        assert_eq!(fsm.find_state("open_2"), Some(ids[2]));
    }

    #[test]
    fn literal_chain_recognizes_text() {
        let mut b = AutomatonBuilder::new();
        let start = b.add_state("start").unwrap();
        let done = b.add_state("done").unwrap();
        let chain = b.add_states("abc", 3).unwrap();
        b.push(start, Rule::literal(b'<', chain[0])).unwrap();
        b.push(start, Rule::otherwise(start)).unwrap();
        b.literal_chain(&chain, b"abc", done, Some(Action::CloseRecord), &[Rule::otherwise(start)])
            .unwrap();
        b.push(done, Rule::otherwise(start)).unwrap();
        let fsm = b.build(start).unwrap();

        let mut ctx = ParseContext::default();
        let mut s = fsm.start();
        for &c in b"x<abc" {
            s = fsm.step(s, c, &mut ctx).unwrap();
        }
        assert_eq!(fsm.state_name(s), "done");
        assert_eq!(ctx.records_closed(), 1);

        let mut s = fsm.start();
        for &c in b"<ab?" {
            s = fsm.step(s, c, &mut ctx).unwrap();
        }
        assert_eq!(s, fsm.start());
        assert_eq!(ctx.records_closed(), 1);
    }

    #[test]
    fn chain_length_mismatch() {
        let mut b = AutomatonBuilder::new();
        let chain = b.add_states("c", 2).unwrap();
        assert_eq!(
            b.literal_chain(&chain, b"abc", chain[0], None, &[]),
            Err(FsmError::ChainMismatch {
                states: 2,
                symbols: 3
            })
        );
    }

    #[test]
    fn build_rejects_uncovered_state() {
        let mut b = AutomatonBuilder::new();
        let start = b.add_state("start").unwrap();
        let stuck = b.add_state("stuck").unwrap();
        b.push(start, Rule::on(Guard::Digit, stuck)).unwrap();
        b.push(start, Rule::otherwise(start)).unwrap();
        b.push(stuck, Rule::literal(b'a', start)).unwrap();
        assert!(matches!(
            b.build(start),
            Err(FsmError::Uncovered { ref state, symbol: 0 }) if state == "stuck"
        ));
    }

    #[test]
    fn build_rejects_foreign_ids() {
        let mut b = AutomatonBuilder::new();
        let start = b.add_state("start").unwrap();
        b.push(start, Rule::otherwise(StateId(42))).unwrap();
        assert_eq!(b.build(start).unwrap_err(), FsmError::UnknownState(42));

        let b = AutomatonBuilder::new();
        assert_eq!(b.build(StateId(0)).unwrap_err(), FsmError::UnknownState(0));

        let mut b = AutomatonBuilder::new();
        assert_eq!(
            b.push(StateId(1), Rule::otherwise(StateId(1))),
            Err(FsmError::UnknownState(1))
        );
    }
}
