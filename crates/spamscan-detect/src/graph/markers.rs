// Record marker recognition: `<DOC>`, `<DOCID>msg123</DOCID>` and the header.
//
// Any byte that does not continue a marker is reinterpreted against the
// start state's rules in the same step, so garbage between or inside
// markers never aborts the scan and a stray `<` still begins a new
// candidate marker.

use spamscan_fsm::{Action, AutomatonBuilder, FsmError, Guard, Rule, StateId};

/// `<DOC>` after its leading `<`.
const OPEN_DOC: &[u8] = b"DOC>";
/// `<DOCID>` after its leading `<`.
const OPEN_DOCID: &[u8] = b"DOCID>";
/// Optional literal prefix of the identifier digits.
const ID_PREFIX: &[u8] = b"msg";
/// `</DOCID>` after its leading `<`.
const CLOSE_DOCID: &[u8] = b"/DOCID>";
/// `</DOC>` after its leading `</`.
const CLOSE_DOC_TAIL: &[u8] = b"DOC>";

/// Wire the header sub-graph from `start` up to `body`.
///
/// After `</DOCID>` the rest of that line is skipped, then the subject line;
/// the subject's newline enters the body. Both skipped lines still honor
/// `<DOC>` and `</DOC>`, so a record cut short in its header never swallows
/// the next one.
pub(super) fn wire_header(
    b: &mut AutomatonBuilder,
    start: StateId,
    body: StateId,
) -> Result<(), FsmError> {
    let open_doc = b.add_states("open_doc", OPEN_DOC.len() + 1)?;
    let open_docid = b.add_states("open_docid", OPEN_DOCID.len() + 1)?;
    let msg = b.add_states("msg", ID_PREFIX.len())?;
    let id_digits = b.add_state("id_digits")?;
    let id_trailing = b.add_state("id_trailing")?;
    let close_docid = b.add_states("close_docid", CLOSE_DOCID.len())?;
    let header_line = b.add_state("header_line")?;
    let subject_line = b.add_state("subject_line")?;

    let resync = [Rule::literal(b'<', open_doc[0]), Rule::otherwise(start)];
    let accumulate = Rule::on(Guard::Digit, id_digits).with(Action::AccumulateDigit);

    b.extend(start, &resync)?;

    // <DOC>
    let (chain, after_open) = open_doc.split_at(OPEN_DOC.len());
    let after_open = after_open[0];
    b.literal_chain(chain, OPEN_DOC, after_open, Some(Action::BeginRecord), &resync)?;
    b.extend(
        after_open,
        &[
            Rule::on(Guard::Whitespace, after_open),
            Rule::literal(b'<', open_docid[0]),
            Rule::otherwise(start),
        ],
    )?;

    // <DOCID>
    let (chain, after_docid) = open_docid.split_at(OPEN_DOCID.len());
    b.literal_chain(chain, OPEN_DOCID, after_docid[0], None, &resync)?;
    b.extend(
        after_docid[0],
        &[
            Rule::on(Guard::Whitespace, after_docid[0]),
            Rule::literal(ID_PREFIX[0], msg[0]),
            accumulate,
        ],
    )?;
    b.extend(after_docid[0], &resync)?;

    // msg prefix: msg[0] has consumed `m`, the last state the whole prefix.
    let last = msg.len() - 1;
    b.literal_chain(&msg[..last], &ID_PREFIX[1..], msg[last], None, &resync)?;
    b.push(msg[last], accumulate)?;
    b.extend(msg[last], &resync)?;

    // Identifier digits, optional trailing whitespace, then </DOCID>.
    b.extend(
        id_digits,
        &[
            accumulate,
            Rule::literal(b'<', close_docid[0]),
            Rule::on(Guard::Whitespace, id_trailing),
            Rule::otherwise(start),
        ],
    )?;
    b.extend(
        id_trailing,
        &[
            Rule::literal(b'<', close_docid[0]),
            Rule::on(Guard::Whitespace, id_trailing),
            Rule::otherwise(start),
        ],
    )?;
    b.literal_chain(&close_docid, CLOSE_DOCID, header_line, None, &resync)?;

    let markers = LineMarkers { start, after_open };
    markers.wire(b, "header_line", header_line, subject_line)?;
    markers.wire(b, "subject_line", subject_line, body)?;
    Ok(())
}

/// Where record markers found inside a skipped header line lead.
struct LineMarkers {
    start: StateId,
    after_open: StateId,
}

impl LineMarkers {
    /// Skip `line` up to its newline, which moves to `next`.
    ///
    /// A `<DOC>` inside the line opens a new record and a `</DOC>` closes the
    /// current one; any other `<` is just line content.
    fn wire(
        &self,
        b: &mut AutomatonBuilder,
        name: &str,
        line: StateId,
        next: StateId,
    ) -> Result<(), FsmError> {
        let tag = b.add_state(format!("{name}_tag"))?;
        let open = b.add_states(&format!("{name}_open"), OPEN_DOC.len() - 1)?;
        let close = b.add_states(&format!("{name}_close"), CLOSE_DOC_TAIL.len())?;

        let skip = [
            Rule::literal(b'\n', next),
            Rule::literal(b'<', tag),
            Rule::otherwise(line),
        ];
        b.extend(line, &skip)?;
        b.extend(
            tag,
            &[
                Rule::literal(OPEN_DOC[0], open[0]),
                Rule::literal(b'/', close[0]),
            ],
        )?;
        b.extend(tag, &skip)?;
        b.literal_chain(
            &open,
            &OPEN_DOC[1..],
            self.after_open,
            Some(Action::BeginRecord),
            &skip,
        )?;
        b.literal_chain(
            &close,
            CLOSE_DOC_TAIL,
            self.start,
            Some(Action::CloseRecord),
            &skip,
        )?;
        Ok(())
    }
}
