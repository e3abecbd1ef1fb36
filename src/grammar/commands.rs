//! Voice command vocabulary — spoken phrase → [`Command`] resolution.
//!
//! The table mirrors what the recognizer actually emits: lower-case
//! phrases, sometimes with accents dropped, so common accent-stripped
//! variants are listed alongside the canonical spellings.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// An editing or mirroring command resolved from a spoken phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Press Enter once.
    NewLine,
    /// Press Enter twice (blank line between paragraphs).
    NewParagraph,
    /// Press Tab.
    Tab,
    /// Delete the word left of the caret.
    DeleteLastWord,
    /// Select the whole field.
    SelectAll,
    /// Extend the selection one word left (« le mot précédent »).
    SelectPrevWord,
    /// Extend the selection one word right (« le mot suivant »).
    SelectNextWord,
    /// Search left of the caret for the spoken word and select it.
    SelectWordLeft(String),
    /// Search right of the caret for the spoken word and select it.
    SelectWordRight(String),
    /// Stop mirroring until woken.
    Sleep,
    /// Resume mirroring.
    Wake,
}

// ---------------------------------------------------------------------------
// Phrase tables
// ---------------------------------------------------------------------------

/// Exact spoken phrases (already lower-cased), canonical and
/// accent-stripped forms.
static PHRASES: LazyLock<Vec<(&'static str, Command)>> = LazyLock::new(|| {
    vec![
        ("à la ligne", Command::NewLine),
        ("a la ligne", Command::NewLine),
        ("nouvelle ligne", Command::NewLine),
        ("retour à la ligne", Command::NewLine),
        ("retour a la ligne", Command::NewLine),
        ("aller à la ligne", Command::NewLine),
        ("aller a la ligne", Command::NewLine),
        ("retour", Command::NewLine),
        ("ligne suivante", Command::NewLine),
        ("saut de ligne", Command::NewLine),
        ("retour ligne", Command::NewLine),
        ("nouveau paragraphe", Command::NewParagraph),
        ("tabulation", Command::Tab),
        ("supprime le dernier mot", Command::DeleteLastWord),
        ("supprimer le dernier mot", Command::DeleteLastWord),
        ("efface le dernier mot", Command::DeleteLastWord),
        ("effacer le dernier mot", Command::DeleteLastWord),
        ("efface le mot", Command::DeleteLastWord),
        ("efface ça", Command::DeleteLastWord),
        ("efface cela", Command::DeleteLastWord),
        ("effacer ça", Command::DeleteLastWord),
        ("effacer cela", Command::DeleteLastWord),
        ("supprime ça", Command::DeleteLastWord),
        ("supprime cela", Command::DeleteLastWord),
        ("supprimer ça", Command::DeleteLastWord),
        ("supprimer cela", Command::DeleteLastWord),
        ("sélectionner le mot précédent", Command::SelectPrevWord),
        ("sélectionne le mot précédent", Command::SelectPrevWord),
        ("selectionner le mot precedent", Command::SelectPrevWord),
        ("sélectionner le mot suivant", Command::SelectNextWord),
        ("sélectionne le mot suivant", Command::SelectNextWord),
        ("selectionner le mot suivant", Command::SelectNextWord),
        ("sélectionner tout", Command::SelectAll),
        ("selectionner tout", Command::SelectAll),
        ("tout sélectionner", Command::SelectAll),
        ("tout selectionner", Command::SelectAll),
        ("au repos", Command::Sleep),
        ("au travail", Command::Wake),
        ("réveille-toi", Command::Wake),
        ("réveille toi", Command::Wake),
        ("reveille-toi", Command::Wake),
        ("reveille toi", Command::Wake),
    ]
});

/// « sélectionne [le mot] <cible> à/vers la gauche » — the captured group
/// is the search target for the word locator.
static SELECT_LEFT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^s[ée]lectionne[rz]?\s+(?:le\s+mot\s+)?(.+?)\s+(?:à|a|vers\s+la)\s+gauche$")
        .expect("valid select-left pattern")
});

static SELECT_RIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^s[ée]lectionne[rz]?\s+(?:le\s+mot\s+)?(.+?)\s+(?:à|a|vers\s+la)\s+droite$")
        .expect("valid select-right pattern")
});

// ---------------------------------------------------------------------------
// CommandTable
// ---------------------------------------------------------------------------

/// Resolver from a raw spoken utterance to a [`Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandTable;

impl CommandTable {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `utterance` to a command, or `None` when it is dictation.
    pub fn parse(&self, utterance: &str) -> Option<Command> {
        let t = utterance.trim().to_lowercase();
        if t.is_empty() {
            return None;
        }
        if let Some((_, command)) = PHRASES.iter().find(|(phrase, _)| *phrase == t) {
            return Some(command.clone());
        }
        if let Some(caps) = SELECT_LEFT.captures(&t) {
            return Some(Command::SelectWordLeft(caps[1].to_string()));
        }
        if let Some(caps) = SELECT_RIGHT.captures(&t) {
            return Some(Command::SelectWordRight(caps[1].to_string()));
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_phrases_resolve() {
        let table = CommandTable::new();
        assert_eq!(table.parse("à la ligne"), Some(Command::NewLine));
        assert_eq!(table.parse("nouveau paragraphe"), Some(Command::NewParagraph));
        assert_eq!(table.parse("tabulation"), Some(Command::Tab));
        assert_eq!(
            table.parse("supprime le dernier mot"),
            Some(Command::DeleteLastWord)
        );
        assert_eq!(table.parse("au repos"), Some(Command::Sleep));
        assert_eq!(table.parse("au travail"), Some(Command::Wake));
    }

    #[test]
    fn accent_stripped_variants_resolve() {
        let table = CommandTable::new();
        assert_eq!(table.parse("a la ligne"), Some(Command::NewLine));
        assert_eq!(table.parse("selectionner tout"), Some(Command::SelectAll));
        assert_eq!(table.parse("reveille-toi"), Some(Command::Wake));
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        let table = CommandTable::new();
        assert_eq!(table.parse("  Nouvelle Ligne  "), Some(Command::NewLine));
        assert_eq!(table.parse("AU REPOS"), Some(Command::Sleep));
    }

    #[test]
    fn select_word_captures_target() {
        let table = CommandTable::new();
        assert_eq!(
            table.parse("sélectionne chat à gauche"),
            Some(Command::SelectWordLeft("chat".into()))
        );
        assert_eq!(
            table.parse("sélectionner bonjour à droite"),
            Some(Command::SelectWordRight("bonjour".into()))
        );
        assert_eq!(
            table.parse("selectionnez maison a gauche"),
            Some(Command::SelectWordLeft("maison".into()))
        );
    }

    #[test]
    fn select_word_tolerates_le_mot_and_vers_la() {
        let table = CommandTable::new();
        assert_eq!(
            table.parse("sélectionner le mot chat à gauche"),
            Some(Command::SelectWordLeft("chat".into()))
        );
        assert_eq!(
            table.parse("sélectionne chat vers la droite"),
            Some(Command::SelectWordRight("chat".into()))
        );
        assert_eq!(
            table.parse("sélectionner le mot maison vers la gauche"),
            Some(Command::SelectWordLeft("maison".into()))
        );
    }

    #[test]
    fn quick_delete_phrases_resolve() {
        let table = CommandTable::new();
        assert_eq!(table.parse("efface ça"), Some(Command::DeleteLastWord));
        assert_eq!(table.parse("supprime cela"), Some(Command::DeleteLastWord));
        assert_eq!(table.parse("supprimer ça"), Some(Command::DeleteLastWord));
    }

    #[test]
    fn all_new_line_phrasings_resolve() {
        let table = CommandTable::new();
        for phrase in [
            "aller à la ligne",
            "retour",
            "ligne suivante",
            "saut de ligne",
            "retour ligne",
        ] {
            assert_eq!(table.parse(phrase), Some(Command::NewLine), "{phrase}");
        }
    }

    #[test]
    fn adjacent_word_selection_resolves() {
        let table = CommandTable::new();
        assert_eq!(
            table.parse("sélectionner le mot précédent"),
            Some(Command::SelectPrevWord)
        );
        assert_eq!(
            table.parse("selectionner le mot suivant"),
            Some(Command::SelectNextWord)
        );
    }

    #[test]
    fn dictation_does_not_resolve() {
        let table = CommandTable::new();
        assert_eq!(table.parse("bonjour le monde"), None);
        assert_eq!(table.parse("la tabulation est utile"), None);
        assert_eq!(table.parse(""), None);
    }
}
