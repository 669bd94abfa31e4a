//! Lexical features of ontology entities.
//!
//! Names are reduced to sets of lowercase tokens so that `ConferenceMember`,
//! `conference_member` and `"Conference member"` all carry the same features.

use std::collections::BTreeSet;

/// Returns the local name of an IRI: the part after the last `#` or `/`.
#[must_use]
pub fn local_name(iri: &str) -> &str {
    let trimmed = iri.trim_end_matches(['/', '#']);
    match trimmed.rfind(['#', '/']) {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// Splits a name into lowercase tokens.
///
/// Token boundaries are non-alphanumeric characters, lower-to-upper case
/// transitions (`hasName` → `has`, `name`), the last capital of an acronym
/// run (`XMLParser` → `xml`, `parser`) and letter/digit transitions.
#[must_use]
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    let chars: Vec<char> = text.chars().collect();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            flush(&mut current, &mut tokens);
            continue;
        }
        if let Some(&prev) = i.checked_sub(1).and_then(|j| chars.get(j)) {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (prev.is_lowercase() && ch.is_uppercase())
                || (prev.is_uppercase() && ch.is_uppercase() && next_is_lower)
                || (prev.is_alphabetic() && ch.is_numeric())
                || (prev.is_numeric() && ch.is_alphabetic());
            if boundary {
                flush(&mut current, &mut tokens);
            }
        }
        current.extend(ch.to_lowercase());
    }
    flush(&mut current, &mut tokens);
    tokens
}

fn flush(current: &mut String, tokens: &mut BTreeSet<String>) {
    if !current.is_empty() {
        tokens.insert(std::mem::take(current));
    }
}
