//! Command classification — decide whether an utterance is a voice command
//! or literal dictation.
//!
//! The mirror is non-exclusive: a separate always-on command grammar runs
//! alongside it, and any utterance that grammar would claim must not be
//! injected as text.  [`is_command`] is therefore a pure predicate over
//! static tables; the orchestrator uses it to short-circuit before
//! injection.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Whole-phrase patterns
// ---------------------------------------------------------------------------

/// Exact whole-phrase commands: sleep/wake, select-all, clipboard, undo/redo,
/// save, delete-selection, page navigation.
static COMMAND_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^au repos$",
        r"^au travail$",
        r"^réveille[- ]?toi$",
        r"^sélectionner tout$",
        r"^copier$",
        r"^coller$",
        r"^couper$",
        r"^annuler$",
        r"^rétablir$",
        r"^enregistrer$",
        r"^supprimer( ça| cela)?$",
        r"^effacer( (ça|cela))?$",
        r"^haut de page$",
        r"^bas de page$",
    ]
    .into_iter()
    .map(|pat| Regex::new(pat).expect("valid command phrase"))
    .collect()
});

/// Verb-led phrases: first word in this list and at most 7 words total
/// (verb + 6).  The word-count cap keeps long dictation that merely starts
/// with a command-like verb out of the command path.  Accent-stripped and
/// conjugated variants are listed because the recognizer emits both forms.
const COMMAND_VERBS: &[&str] = &[
    "ouvrir",
    "lancer",
    "afficher",
    "basculer",
    "activer",
    "désactiver",
    "fermer",
    "sélectionner",
    "copier",
    "coller",
    "couper",
    "supprimer",
    "effacer",
    "annuler",
    "rétablir",
    "enregistrer",
    "imprimer",
    "rechercher",
    "aller",
    "déplacer",
    "cliquer",
    "scroll",
    "zoomer",
    "réduire",
    "agrandir",
    // recognizer variants
    "clique",
    "cliquez",
    "selectionner",
    "retablir",
    "desactiver",
    "deplacer",
    "efface",
    "supprime",
];

/// Maximum word count for a verb-led phrase to still count as a command.
const MAX_COMMAND_WORDS: usize = 7;

// ---------------------------------------------------------------------------
// is_command
// ---------------------------------------------------------------------------

/// Returns `true` when the trimmed, lower-cased utterance is a navigation
/// or editing command that must be left to the external command grammar.
pub fn is_command(utterance: &str) -> bool {
    let t = utterance.trim().to_lowercase();
    if t.is_empty() {
        return false;
    }
    if COMMAND_PHRASES.iter().any(|pat| pat.is_match(&t)) {
        return true;
    }
    let words: Vec<&str> = t.split_whitespace().collect();
    match words.first() {
        Some(first) => COMMAND_VERBS.contains(first) && words.len() <= MAX_COMMAND_WORDS,
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
