//! Tail-state tracking — what the last injected text ended with.
//!
//! [`FormattingState`] is the single piece of persistent state in the
//! engine.  Exactly one instance exists per mirroring session, owned by
//! the orchestrator, updated atomically *after* (never during) each
//! successful injection, and never read by more than one logical utterance
//! at a time.

/// Characters that terminate a sentence.
pub(crate) const SENTENCE_END: &[char] = &['.', '!', '?', '…'];

/// Trailing characteristics of the most recently injected text, used to
/// decide spacing and capitalization of the next chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattingState {
    /// Last injected character was whitespace.
    pub ended_with_space: bool,
    /// Last injected character was a newline.
    pub ended_with_newline: bool,
    /// Last non-space injected character is a sentence terminator.
    pub ended_sentence: bool,
    /// Last non-space character injected, `None` before any injection.
    pub last_char: Option<char>,
    /// True after the first successful injection of the session.
    pub has_injected: bool,
    /// True until the first alphabetic character has been injected, so the
    /// very first word of a session/field is capitalized even when the
    /// opening utterance was pure punctuation.  Sticky: once cleared it
    /// never becomes true again in the session.
    pub force_capital_next: bool,
}

impl Default for FormattingState {
    /// Fresh-session state: behaves as if the previous text ended a
    /// sentence with a space, so the first chunk gets a capital and no
    /// leading space.
    fn default() -> Self {
        Self {
            ended_with_space: true,
            ended_with_newline: false,
            ended_sentence: true,
            last_char: None,
            has_injected: false,
            force_capital_next: true,
        }
    }
}

impl FormattingState {
    /// Restore the fresh-session state (new field, new session).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the next chunk's first letter must be uppercased.
    pub fn wants_leading_capital(&self) -> bool {
        self.force_capital_next
            || self.ended_sentence
            || self.ended_with_newline
            || !self.has_injected
    }

    /// Record how `injected` ended.  Total over any input; the empty
    /// string is a no-op.
    pub fn update(&mut self, injected: &str) {
        let Some(last) = injected.chars().last() else {
            return;
        };

        self.ended_with_newline = last == '\n';
        self.ended_with_space = last.is_whitespace();

        // Walk back over trailing whitespace to the last real character;
        // an all-whitespace injection leaves these two fields as they were.
        if let Some(last_non_space) = injected.chars().rev().find(|c| !c.is_whitespace()) {
            self.last_char = Some(last_non_space);
            self.ended_sentence = SENTENCE_END.contains(&last_non_space);
        }

        if injected.chars().any(|c| c.is_alphabetic()) {
            self.force_capital_next = false;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_wants_capital_and_no_space() {
        let st = FormattingState::default();
        assert!(st.wants_leading_capital());
        assert!(st.ended_with_space);
        assert!(!st.has_injected);
    }

    #[test]
    fn sentence_end_round_trip() {
        let mut st = FormattingState::default();
        st.update("fin de phrase. ");
        assert!(st.ended_sentence);
        assert!(st.ended_with_space);
        assert!(!st.ended_with_newline);
        assert_eq!(st.last_char, Some('.'));
    }

    #[test]
    fn plain_word_clears_sentence_flags() {
        let mut st = FormattingState::default();
        st.update("bonjour");
        assert!(!st.ended_sentence);
        assert!(!st.ended_with_space);
        assert_eq!(st.last_char, Some('r'));
    }

    #[test]
    fn newline_tail() {
        let mut st = FormattingState::default();
        st.update("ligne\n");
        assert!(st.ended_with_newline);
        assert!(st.ended_with_space);
        assert_eq!(st.last_char, Some('e'));
    }

    #[test]
    fn empty_update_is_noop() {
        let mut st = FormattingState::default();
        st.update("bonjour");
        let before = st.clone();
        st.update("");
        assert_eq!(st, before);
    }

    #[test]
    fn all_whitespace_keeps_last_char() {
        let mut st = FormattingState::default();
        st.update("mot.");
        st.update("   ");
        assert_eq!(st.last_char, Some('.'));
        assert!(st.ended_sentence);
        assert!(st.ended_with_space);
    }

    #[test]
    fn force_capital_is_sticky_once_cleared() {
        let mut st = FormattingState::default();
        // Pure punctuation does not clear the flag.
        st.update("...");
        assert!(st.force_capital_next);
        // The first letter does, permanently.
        st.update("a");
        assert!(!st.force_capital_next);
        st.update("!!!");
        assert!(!st.force_capital_next);
    }

    #[test]
    fn reset_restores_fresh_state() {
        let mut st = FormattingState::default();
        st.update("bonjour.");
        st.has_injected = true;
        st.reset();
        assert_eq!(st, FormattingState::default());
    }
}
