#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `matching` provides the partial-match capability the traversal session
//! uses to prune whole subtrees before they are read from disk. A compiled
//! [`PartialPattern`] can report not just "matches" or "does not match" for
//! a path prefix, but the third verdict that makes pruning sound: "no
//! extension of this prefix can ever match". Only that verdict may cut a
//! subtree; anything weaker keeps the walk alive.
//!
//! # Design
//!
//! - [`PartialPattern::compile`] builds a dense DFA for the pattern. The DFA
//!   is walked byte by byte over the candidate prefix; a dead state proves
//!   that no suffix can rescue the prefix, a match state proves a full match
//!   already exists, and surviving to the end of input without either means
//!   more path segments could still produce a match.
//! - [`PrefixHints`] analyses the pattern's parsed form before any DFA is
//!   built: pruning is only worthwhile when the pattern is anchored at the
//!   start or every literal prefix begins with `/`, because only then can a
//!   growing absolute path ever be rejected early. Callers consult the hints
//!   to decide whether to retain the compiled pattern at all.
//!
//! # Errors
//!
//! Compilation reports [`PatternError::Compile`]/[`PatternError::Parse`] for
//! malformed patterns. [`PartialPattern::partial_match`] reports
//! [`PatternError::Engine`] when the automaton gives up mid-subject (for
//! example on bytes a Unicode word boundary cannot handle); callers treat
//! that as fatal to the enclosing evaluation, never as a verdict.

use regex_automata::Input;
use regex_automata::dfa::Automaton;
use regex_automata::dfa::dense::DFA;
use regex_syntax::ParserBuilder;
use regex_syntax::hir::{Look, literal};

/// Verdict of a partial-match probe against a path prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PartialMatchResult {
    /// A full match already exists within the probed prefix.
    Match,
    /// No extension of the probed prefix can ever match; the subtree below
    /// it is safe to prune.
    NoMatch,
    /// The prefix does not match yet, but appending more input could still
    /// produce a match.
    Partial,
}

/// A pattern compiled for prefix-feasibility probing.
#[derive(Debug)]
pub struct PartialPattern {
    dfa: DFA<Vec<u32>>,
    pattern: String,
}

impl PartialPattern {
    /// Compiles `pattern` into a dense automaton suitable for partial
    /// matching.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let dfa = DFA::new(pattern).map_err(|source| PatternError::Compile {
            pattern: pattern.to_owned(),
            source: Box::new(source),
        })?;
        Ok(Self {
            dfa,
            pattern: pattern.to_owned(),
        })
    }

    /// Returns the original pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Probes whether `subject` matches, can never match, or could still
    /// match given more input.
    pub fn partial_match(&self, subject: &str) -> Result<PartialMatchResult, PatternError> {
        let input = Input::new(subject);
        let mut state = self
            .dfa
            .start_state_forward(&input)
            .map_err(|_| self.engine_error())?;

        for &byte in subject.as_bytes() {
            state = self.dfa.next_state(state, byte);
            if self.dfa.is_match_state(state) {
                return Ok(PartialMatchResult::Match);
            }
            if self.dfa.is_dead_state(state) {
                return Ok(PartialMatchResult::NoMatch);
            }
            if self.dfa.is_quit_state(state) {
                return Err(self.engine_error());
            }
        }

        let eoi = self.dfa.next_eoi_state(state);
        if self.dfa.is_match_state(eoi) {
            Ok(PartialMatchResult::Match)
        } else if self.dfa.is_dead_state(eoi) {
            Ok(PartialMatchResult::NoMatch)
        } else {
            Ok(PartialMatchResult::Partial)
        }
    }

    fn engine_error(&self) -> PatternError {
        PatternError::Engine {
            pattern: self.pattern.clone(),
        }
    }
}

/// Structural facts about a pattern that decide whether retaining a pruning
/// automaton for it is sound.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrefixHints {
    anchored_start: bool,
    leading_slash: bool,
}

impl PrefixHints {
    /// Analyses the parsed pattern for a start anchor and for literal
    /// prefixes beginning with `/`.
    pub fn of(pattern: &str) -> Result<Self, PatternError> {
        let hir = ParserBuilder::new()
            .build()
            .parse(pattern)
            .map_err(|source| PatternError::Parse {
                pattern: pattern.to_owned(),
                source: Box::new(source),
            })?;

        let anchored_start = hir.properties().look_set_prefix().contains(Look::Start);

        let seq = literal::Extractor::new().extract(&hir);
        let leading_slash = seq.literals().is_some_and(|literals| {
            !literals.is_empty()
                && literals
                    .iter()
                    .all(|lit| lit.as_bytes().first() == Some(&b'/'))
        });

        Ok(Self {
            anchored_start,
            leading_slash,
        })
    }

    /// True when the pattern is anchored at the start of the subject.
    #[must_use]
    pub const fn anchored_start(&self) -> bool {
        self.anchored_start
    }

    /// True when every literal prefix of the pattern begins with `/`.
    #[must_use]
    pub const fn leading_slash(&self) -> bool {
        self.leading_slash
    }

    /// True when a pruning automaton for this pattern can ever reject a
    /// growing absolute path early.
    #[must_use]
    pub const fn supports_pruning(&self) -> bool {
        self.anchored_start || self.leading_slash
    }
}

/// Error raised while compiling or executing a partial-match pattern.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// The pattern could not be parsed.
    #[error("failed to parse pattern '{pattern}': {source}")]
    Parse {
        /// The offending pattern text.
        pattern: String,
        /// Underlying parser diagnostic.
        #[source]
        source: Box<regex_syntax::Error>,
    },
    /// The pattern parsed but could not be compiled into an automaton.
    #[error("failed to compile pattern '{pattern}': {source}")]
    Compile {
        /// The offending pattern text.
        pattern: String,
        /// Underlying compiler diagnostic.
        #[source]
        source: Box<regex_automata::dfa::dense::BuildError>,
    },
    /// The automaton gave up while probing a subject.
    #[error("pattern engine gave up while probing against '{pattern}'")]
    Engine {
        /// The pattern whose probe failed.
        pattern: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{PartialMatchResult, PartialPattern, PrefixHints};
    use proptest::prelude::*;

    #[test]
    fn anchored_prefix_reports_all_three_verdicts() {
        let pattern = PartialPattern::compile("^/tmp/x/.*").expect("compile");
        assert_eq!(
            pattern.partial_match("/tmp").expect("probe"),
            PartialMatchResult::Partial
        );
        assert_eq!(
            pattern.partial_match("/var").expect("probe"),
            PartialMatchResult::NoMatch
        );
        assert_eq!(
            pattern.partial_match("/tmp/x/a").expect("probe"),
            PartialMatchResult::Match
        );
    }

    #[test]
    fn match_is_reported_as_soon_as_it_exists() {
        let pattern = PartialPattern::compile("^/etc/passwd$").expect("compile");
        // The anchored end cannot be satisfied yet, so this is only partial.
        assert_eq!(
            pattern.partial_match("/etc/pass").expect("probe"),
            PartialMatchResult::Partial
        );
        assert_eq!(
            pattern.partial_match("/etc/passwd").expect("probe"),
            PartialMatchResult::Match
        );
        assert_eq!(
            pattern.partial_match("/etc/passwdX").expect("probe"),
            PartialMatchResult::NoMatch
        );
    }

    #[test]
    fn unanchored_pattern_never_prunes() {
        let pattern = PartialPattern::compile("shadow").expect("compile");
        assert_eq!(
            pattern.partial_match("/etc").expect("probe"),
            PartialMatchResult::Partial
        );
        assert_eq!(
            pattern.partial_match("/etc/shadow").expect("probe"),
            PartialMatchResult::Match
        );
    }

    #[test]
    fn compile_rejects_malformed_patterns() {
        assert!(PartialPattern::compile("^/tmp/(").is_err());
    }

    #[test]
    fn hints_detect_start_anchor() {
        let hints = PrefixHints::of("^/tmp/.*").expect("hints");
        assert!(hints.anchored_start());
        assert!(hints.supports_pruning());
    }

    #[test]
    fn hints_detect_leading_slash_literal() {
        let hints = PrefixHints::of("/tmp/[ab]/.*").expect("hints");
        assert!(!hints.anchored_start());
        assert!(hints.leading_slash());
        assert!(hints.supports_pruning());
    }

    #[test]
    fn hints_reject_floating_patterns() {
        let hints = PrefixHints::of(".*\\.conf$").expect("hints");
        assert!(!hints.supports_pruning());
    }

    proptest! {
        // Pruning soundness: the partial verdict may never contradict the
        // full engine. A full-engine match implies Match; NoMatch implies
        // the full engine rejects the subject and every tested extension.
        #[test]
        fn partial_verdicts_agree_with_the_full_engine(
            subject in "(/[a-z]{1,4}){0,4}",
            suffix in "(/[a-z]{1,4}){0,2}",
        ) {
            let full = regex::Regex::new("^/tmp/[a-z]/.*").expect("regex");
            let partial = PartialPattern::compile("^/tmp/[a-z]/.*").expect("compile");

            let verdict = partial.partial_match(&subject).expect("probe");
            if full.is_match(&subject) {
                prop_assert_eq!(verdict, PartialMatchResult::Match);
            }
            if verdict == PartialMatchResult::NoMatch {
                prop_assert!(!full.is_match(&subject));
                let extended = format!("{subject}{suffix}");
                prop_assert!(!full.is_match(&extended));
            }
        }
    }
}
