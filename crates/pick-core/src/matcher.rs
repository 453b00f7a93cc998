//! Exact-match detection and "create new" synthesis.
//!
//! Both functions are pure: the output depends only on the term and the
//! candidate list, and the input order is preserved.

use tracing::debug;

use crate::candidate::Candidate;

/// Whether any candidate's trimmed label equals the trimmed term,
/// ignoring case.
pub fn has_exact_match(term: &str, candidates: &[Candidate]) -> bool {
    let needle = term.trim().to_lowercase();
    candidates
        .iter()
        .any(|c| c.label.trim().to_lowercase() == needle)
}

/// Return `candidates` with a synthesized entry appended when nothing matches
/// the term exactly. Empty or whitespace-only terms never synthesize.
pub fn match_term(term: &str, candidates: Vec<Candidate>) -> Vec<Candidate> {
    let trimmed = term.trim();
    if trimmed.is_empty() || has_exact_match(trimmed, &candidates) {
        return candidates;
    }
    debug!(term = trimmed, remote = candidates.len(), "synthesizing candidate");
    let mut out = candidates;
    out.push(Candidate::synthesized(trimmed));
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn widgets() -> Vec<Candidate> {
        vec![
            Candidate::remote("widget", "Widget"),
            Candidate::remote("widget-pro", "Widget Pro"),
        ]
    }

    #[test]
    fn padded_term_matches_case_insensitively() {
        let out = match_term("  Widget  ", widgets());
        assert_eq!(out, widgets());
    }

    #[test]
    fn different_case_is_still_a_match() {
        assert_eq!(match_term("wIDGET pro", widgets()), widgets());
    }

    #[test]
    fn prefix_is_not_an_exact_match() {
        let out = match_term("Widg", widgets());
        assert_eq!(out.len(), 3);
        let last = out.last().unwrap();
        assert_eq!(last.id, "Widg");
        assert_eq!(last.label, "Widg (new tag)");
        assert!(last.is_synthesized);
        assert_eq!(&out[..2], &widgets()[..]);
    }

    #[test]
    fn empty_list_synthesizes() {
        let out = match_term(" gadget", Vec::new());
        assert_eq!(out, vec![Candidate::synthesized("gadget")]);
    }

    #[test]
    fn blank_term_never_synthesizes() {
        assert!(match_term("", Vec::new()).is_empty());
        assert!(match_term("   \t", Vec::new()).is_empty());
        assert_eq!(match_term("  ", widgets()), widgets());
    }

    #[test]
    fn remote_label_with_padding_matches() {
        let cands = vec![Candidate::remote("1", "  Ops  ")];
        assert_eq!(match_term("ops", cands.clone()), cands);
    }

    fn arb_label() -> impl Strategy<Value = String> {
        "[a-zA-Z ]{0,8}"
    }

    fn arb_candidates() -> impl Strategy<Value = Vec<Candidate>> {
        prop::collection::vec(
            (arb_label(), arb_label()).prop_map(|(id, label)| Candidate::remote(id, label)),
            0..6,
        )
    }

    proptest! {
        #[test]
        fn no_match_appends_exactly_one(term in "[a-z]{1,6}", cands in arb_candidates()) {
            prop_assume!(!has_exact_match(&term, &cands));
            let out = match_term(&term, cands.clone());
            prop_assert_eq!(out.len(), cands.len() + 1);
            prop_assert_eq!(&out[..cands.len()], &cands[..]);
            let last = out.last().unwrap();
            prop_assert!(last.is_synthesized);
            prop_assert_eq!(&last.id, term.trim());
        }

        #[test]
        fn exact_match_is_unchanged_and_idempotent(term in "[a-zA-Z]{1,6}", cands in arb_candidates()) {
            let mut cands = cands;
            cands.push(Candidate::remote("x", term.to_uppercase()));
            let once = match_term(&term, cands.clone());
            prop_assert_eq!(&once, &cands);
            let twice = match_term(&term, once.clone());
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn deterministic(term in "[a-zA-Z ]{0,6}", cands in arb_candidates()) {
            prop_assert_eq!(match_term(&term, cands.clone()), match_term(&term, cands));
        }
    }
}
