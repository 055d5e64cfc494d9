// Reachability and symbol-coverage checks.
//
// Every state reachable from the start state must accept every byte value
// through at least one rule. A state that does not would stop a scan with
// an unhandled-symbol error, which is an automaton defect.

use crate::FsmError;
use crate::automaton::Automaton;
use crate::rule::StateId;

impl Automaton {
    /// States reachable from the start state, in breadth-first order.
    pub fn reachable_states(&self) -> Vec<StateId> {
        let mut seen = vec![false; self.state_count()];
        let mut order = Vec::new();
        let start = self.start();
        if start.index() >= seen.len() {
            return order;
        }
        seen[start.index()] = true;
        order.push(start);

        let mut next = 0;
        while next < order.len() {
            let id = order[next];
            next += 1;
            let Ok(state) = self.state(id) else {
                continue;
            };
            for rule in state.rules() {
                let t = rule.target.index();
                if t < seen.len() && !seen[t] {
                    seen[t] = true;
                    order.push(rule.target);
                }
            }
        }
        order
    }

    /// Check that every reachable state handles every byte value.
    ///
    /// Returns the first uncovered (state, byte) pair found.
    pub fn check_coverage(&self) -> Result<(), FsmError> {
        for id in self.reachable_states() {
            let state = self.state(id)?;
            if state.rules().iter().any(|r| r.guard.is_catch_all()) {
                continue;
            }
            for b in 0..=u8::MAX {
                if !state.rules().iter().any(|r| r.guard.accepts(b)) {
                    return Err(FsmError::Uncovered {
                        state: state.name().to_string(),
                        symbol: b,
                    });
                }
            }
        }
        Ok(())
    }
}
