// Record body: shared-prefix phrase matching with boundary rules.
//
// The dictionary is merged into a trie and each trie node becomes one state.
// A phrase can only start in the `delimited` state (or at the start of the
// body, past any leading blank lines), and only completes when
// the byte after its last symbol is a delimiter; that transition flags the
// record and enters the `flagged` sink, which ignores everything up to the
// closing marker. Any byte that continues no phrase is reinterpreted against
// the mid-token rules in the same step.

use spamscan_core::character::is_delimiter;
use spamscan_fsm::{Action, AutomatonBuilder, FsmError, Guard, Rule, StateId};

use super::{BODY_START, DELIMITED, FLAGGED, NOT_DELIMITED};
use crate::dictionary::Dictionary;

/// `</DOC>` after its leading `<`.
const CLOSE_DOC: &[u8] = b"/DOC>";

// ---------------------------------------------------------------------------
// Phrase trie
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct TrieNode {
    prefix: Vec<u8>,
    /// Children in first-insertion order.
    children: Vec<(u8, usize)>,
    terminal: bool,
}

/// The dictionary phrases merged by common prefix. Node 0 is the root.
#[derive(Debug, Clone)]
struct PhraseTrie {
    nodes: Vec<TrieNode>,
}

impl PhraseTrie {
    fn new(dictionary: &Dictionary) -> Self {
        let mut trie = Self {
            nodes: vec![TrieNode {
                prefix: Vec::new(),
                children: Vec::new(),
                terminal: false,
            }],
        };
        for phrase in dictionary.phrases() {
            trie.insert(phrase);
        }
        trie
    }

    fn insert(&mut self, phrase: &[u8]) {
        let mut node = 0;
        for &b in phrase {
            node = match self.child(node, b) {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    let mut prefix = self.nodes[node].prefix.clone();
                    prefix.push(b);
                    self.nodes.push(TrieNode {
                        prefix,
                        children: Vec::new(),
                        terminal: false,
                    });
                    self.nodes[node].children.push((b, next));
                    next
                }
            };
        }
        self.nodes[node].terminal = true;
    }

    fn child(&self, node: usize, b: u8) -> Option<usize> {
        self.nodes[node]
            .children
            .iter()
            .find(|&&(c, _)| c == b)
            .map(|&(_, n)| n)
    }
}

// ---------------------------------------------------------------------------
// Body sub-graph
// ---------------------------------------------------------------------------

/// Body states other sub-graphs refer to.
pub(super) struct Body {
    pub start: StateId,
    pub delimited: StateId,
    pub not_delimited: StateId,
    pub flagged: StateId,
    close: Vec<StateId>,
    close_flagged: Vec<StateId>,
}

pub(super) fn declare_body(b: &mut AutomatonBuilder) -> Result<Body, FsmError> {
    Ok(Body {
        start: b.add_state(BODY_START)?,
        delimited: b.add_state(DELIMITED)?,
        not_delimited: b.add_state(NOT_DELIMITED)?,
        flagged: b.add_state(FLAGGED)?,
        close: b.add_states("close_doc", CLOSE_DOC.len())?,
        close_flagged: b.add_states("close_doc_flagged", CLOSE_DOC.len())?,
    })
}

pub(super) fn wire_body(
    b: &mut AutomatonBuilder,
    start: StateId,
    body: &Body,
    dictionary: &Dictionary,
) -> Result<(), FsmError> {
    let trie = PhraseTrie::new(dictionary);

    let mut node_states = Vec::with_capacity(trie.nodes.len());
    node_states.push(body.delimited);
    for node in &trie.nodes[1..] {
        let name = format!("phrase:{}", String::from_utf8_lossy(&node.prefix));
        node_states.push(b.add_state(name)?);
    }

    // Mid-token rules: what any unexpected byte in the body falls back to.
    let mid_token = [
        Rule::literal(b'<', body.close[0]),
        Rule::on(Guard::Delimiter, body.delimited),
        Rule::otherwise(body.not_delimited),
    ];
    let phrase_starts: Vec<Rule> = trie.nodes[0]
        .children
        .iter()
        .map(|&(c, n)| Rule::literal(c, node_states[n]))
        .collect();

    b.push(body.start, Rule::on(Guard::Whitespace, body.start))?;
    for anchor in [body.start, body.delimited] {
        b.extend(anchor, &phrase_starts)?;
        b.extend(anchor, &mid_token)?;
    }
    b.extend(body.not_delimited, &mid_token)?;

    for (index, node) in trie.nodes.iter().enumerate().skip(1) {
        let state = node_states[index];
        // A completed phrase wins over a longer phrase continuing with a
        // delimiter (`cash` vs `cash prize`): the record is flagged either way.
        if node.terminal {
            b.push(
                state,
                Rule::on(Guard::Delimiter, body.flagged).with(Action::FlagRecord),
            )?;
        }
        for &(c, n) in &node.children {
            b.push(state, Rule::literal(c, node_states[n]))?;
        }
        // A node ending on an interior delimiter (`free `) is itself a phrase
        // boundary, so every phrase may start again from here.
        if node.prefix.last().is_some_and(|&last| is_delimiter(last)) {
            for rule in &phrase_starts {
                let taken = node
                    .children
                    .iter()
                    .any(|&(c, _)| rule.guard == Guard::Literal(c));
                if !taken {
                    b.push(state, *rule)?;
                }
            }
        }
        b.extend(state, &mid_token)?;
    }

    let flagged_fallback = [
        Rule::literal(b'<', body.close_flagged[0]),
        Rule::otherwise(body.flagged),
    ];
    b.extend(body.flagged, &flagged_fallback)?;

    b.literal_chain(&body.close, CLOSE_DOC, start, Some(Action::CloseRecord), &mid_token)?;
    b.literal_chain(
        &body.close_flagged,
        CLOSE_DOC,
        start,
        Some(Action::CloseRecord),
        &flagged_fallback,
    )?;
    Ok(())
}
