//! Autocomplete ranking over the cached command listing.
//!
//! `suggest` is a pure function of `(query, commands)`: it filters by
//! case-insensitive substring, orders candidates, caps the list, and records
//! where the query matched so a renderer can emphasise it.

use std::cmp::Ordering;

use crate::config::MAX_SUGGESTIONS;

/// A command annotated with its first case-insensitive match.
/// `match_start` and `match_len` count characters, not bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub match_start: usize,
    pub match_len: usize,
}

impl Suggestion {
    /// Split `text` into `(before, matched, after)` plain-text slices.
    pub fn segments(&self) -> (&str, &str, &str) {
        let start = char_to_byte(&self.text, self.match_start);
        let end = char_to_byte(&self.text, self.match_start + self.match_len);
        (&self.text[..start], &self.text[start..end], &self.text[end..])
    }
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

/// Lowercased text plus, for every byte of it, the index of the source char.
struct Folded {
    text: String,
    origin: Vec<usize>,
}

fn fold(s: &str) -> Folded {
    let mut text = String::with_capacity(s.len());
    let mut origin = Vec::with_capacity(s.len());
    for (idx, c) in s.chars().enumerate() {
        for lc in c.to_lowercase() {
            text.push(lc);
            origin.extend(std::iter::repeat(idx).take(lc.len_utf8()));
        }
    }
    Folded { text, origin }
}

struct Candidate<'a> {
    text: &'a str,
    folded: Folded,
    chars: usize,
    exact: bool,
    prefix: bool,
    match_byte: usize,
}

fn rank(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.exact
        .cmp(&a.exact)
        .then_with(|| b.prefix.cmp(&a.prefix))
        .then_with(|| a.chars.cmp(&b.chars))
        .then_with(|| a.folded.text.cmp(&b.folded.text))
        // Names equal up to case: lowercase sorts first.
        .then_with(|| b.text.cmp(a.text))
}

pub fn suggest(query: &str, commands: &[String]) -> Vec<Suggestion> {
    if query.is_empty() || commands.is_empty() {
        return Vec::new();
    }
    let needle = fold(query).text;

    let mut candidates: Vec<Candidate<'_>> = commands
        .iter()
        .filter_map(|cmd| {
            let folded = fold(cmd);
            let match_byte = folded.text.find(&needle)?;
            Some(Candidate {
                text: cmd.as_str(),
                chars: cmd.chars().count(),
                exact: folded.text == needle,
                prefix: match_byte == 0,
                match_byte,
                folded,
            })
        })
        .collect();

    candidates.sort_by(rank);
    candidates.truncate(MAX_SUGGESTIONS);

    candidates
        .into_iter()
        .map(|c| {
            let start = c.folded.origin[c.match_byte];
            let end = c.folded.origin[c.match_byte + needle.len() - 1] + 1;
            Suggestion {
                text: c.text.to_string(),
                match_start: start,
                match_len: end - start,
            }
        })
        .collect()
}
