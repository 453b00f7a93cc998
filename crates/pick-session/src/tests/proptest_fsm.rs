//! Property-based tests for the selection engine.
//!
//! Generates random input/reply/selection sequences and checks the
//! structural invariants after every step.

use proptest::prelude::*;

use super::*;
use crate::{Query, SuggestionStatus};

#[derive(Debug, Clone)]
enum Action {
    Type(char),
    Backspace,
    Clear,
    /// Deliver the reply of the pending query at this index (mod len).
    Reply(usize),
    ReplyFailure(usize),
    SelectShown(usize),
    DeselectFirst,
    Bulk(Vec<u8>),
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        40 => prop::sample::select(vec!['r', 'u', 's', 't', 'g', 'o', 'p', 'y', ' ', ','])
            .prop_map(Action::Type),
        8 => Just(Action::Backspace),
        3 => Just(Action::Clear),
        15 => any::<usize>().prop_map(Action::Reply),
        4 => any::<usize>().prop_map(Action::ReplyFailure),
        6 => any::<usize>().prop_map(Action::SelectShown),
        3 => Just(Action::DeselectFirst),
        2 => prop::collection::vec(0u8..15, 0..5).prop_map(Action::Bulk),
    ]
}

struct Harness {
    engine: SelectionEngine,
    client: CountingClient,
    buffer: String,
    pending: Vec<Query>,
    shown: Vec<Candidate>,
    highest_issued: u64,
    highest_surfaced: u64,
}

impl Harness {
    fn new(engine: SelectionEngine) -> Self {
        Self {
            engine,
            client: CountingClient::new(),
            buffer: String::new(),
            pending: Vec::new(),
            shown: Vec::new(),
            highest_issued: 0,
            highest_surfaced: 0,
        }
    }

    fn input(&mut self) {
        let resp = self.engine.on_input(&self.buffer);
        let min = self.engine.config().min_query_length;
        assert_eq!(resp.remainder.is_some(), resp.bulk.is_some());
        if let Some(rest) = &resp.remainder {
            self.buffer = rest.clone();
        }
        match (&resp.request, resp.shown()) {
            (Some(q), None) => {
                assert!(q.term.chars().count() >= min, "issued short query {q:?}");
                assert!(q.sequence > self.highest_issued);
                self.highest_issued = q.sequence;
                self.pending.push(q.clone());
            }
            (None, Some(s)) => {
                assert!(s.candidates.is_empty());
                assert!(matches!(s.status, SuggestionStatus::TooShort { .. }));
                assert!(s.term.chars().count() < min);
                self.shown.clear();
            }
            other => panic!("on_input must either issue or show, got {other:?}"),
        }
    }

    fn reply(&mut self, idx: usize, fail: bool) {
        if self.pending.is_empty() {
            return;
        }
        let q = self.pending.remove(idx % self.pending.len());
        let was_current = self.engine.is_current(&q);
        let outcome = if fail {
            Err(RemoteError::Status(503))
        } else {
            self.client.search(&q.term, &q.field_key)
        };
        let got = self.engine.receive_suggestions(&q, outcome);
        assert_eq!(got.is_some(), was_current);
        if let Some(s) = got {
            assert!(q.sequence > self.highest_surfaced);
            assert_eq!(q.sequence, self.highest_issued.max(q.sequence));
            self.highest_surfaced = q.sequence;

            let synthesized: Vec<usize> = s
                .candidates
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_synthesized)
                .map(|(i, _)| i)
                .collect();
            assert!(synthesized.len() <= 1);
            if let Some(&i) = synthesized.first() {
                assert_eq!(i, s.candidates.len() - 1);
                assert!(s.candidates[i].label.ends_with(pick_core::SYNTHESIZED_SUFFIX));
            }
            if fail {
                assert!(s.is_failure() && s.candidates.is_empty());
            }
            self.shown = s.candidates;
        }
    }

    fn step(&mut self, action: &Action) {
        match action {
            Action::Type(ch) => {
                self.buffer.push(*ch);
                self.input();
            }
            Action::Backspace => {
                self.buffer.pop();
                self.input();
            }
            Action::Clear => {
                self.buffer.clear();
                self.input();
            }
            Action::Reply(i) => self.reply(*i, false),
            Action::ReplyFailure(i) => self.reply(*i, true),
            Action::SelectShown(i) => {
                if self.shown.is_empty() {
                    return;
                }
                let c = self.shown[i % self.shown.len()].clone();
                let before = self.engine.selection().to_list();
                if self.engine.on_select(c).is_err() {
                    assert_eq!(self.engine.selection().to_list(), before);
                } else {
                    self.buffer.clear();
                    self.shown.clear();
                }
            }
            Action::DeselectFirst => {
                let first = self.engine.selection().iter().next().map(|c| c.id.clone());
                if let Some(id) = first {
                    assert!(self.engine.on_deselect(&id));
                }
            }
            Action::Bulk(ns) => {
                let raw: Vec<String> = ns.iter().map(|n| format!("b{n}")).collect();
                let bulk = self.engine.on_bulk_input(&raw.join(","));
                assert_eq!(bulk.is_some(), self.engine.config().allow_bulk_tokenization);
            }
        }
    }

    fn assert_invariants(&self, action: &Action) {
        let sel = self.engine.selection();
        assert!(
            sel.len() <= self.engine.config().selection_bound(),
            "selection over bound after {action:?}"
        );
        let mut ids = sel.ids();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), sel.len(), "duplicate ids after {action:?}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn engine_invariants_hold(
        tag_mode in any::<bool>(),
        actions in prop::collection::vec(arb_action(), 1..80),
    ) {
        let engine = if tag_mode { tag_engine() } else { lookup_engine() };
        let mut h = Harness::new(engine);
        for action in &actions {
            h.step(action);
            h.assert_invariants(action);
        }
    }
}
