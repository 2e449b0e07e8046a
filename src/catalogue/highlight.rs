//! Locates search matches inside displayed text.
//!
//! The subject is split into alternating [`MatchSegment::Plain`] and
//! [`MatchSegment::Match`] runs. Matching is case-insensitive but every segment keeps
//! the subject's original casing, so concatenating the segments gives back the subject.

use crate::search::normalize_query;
use serde::Serialize;

/// A segment of displayed text, either plain or matching the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum MatchSegment {
    Plain(String),
    Match(String),
}

impl MatchSegment {
    pub fn text(&self) -> &str {
        match self {
            MatchSegment::Plain(s) | MatchSegment::Match(s) => s,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchSegment::Match(_))
    }
}

/// Lower-cased copy of a subject that remembers which subject char every lowered byte
/// came from. Matching runs on the lowered text, the same text search matches against,
/// and spans are widened back to whole subject chars.
struct Folded {
    lower: String,
    /// Subject char index of every byte of `lower`.
    owner: Vec<usize>,
    /// Per subject char: its byte range in the subject and where its lowered form ends.
    chars: Vec<(usize, usize, usize)>,
}

impl Folded {
    fn new(subject: &str) -> Self {
        let mut lower = String::with_capacity(subject.len());
        let mut owner = Vec::with_capacity(subject.len());
        let mut chars = Vec::new();
        for (start, c) in subject.char_indices() {
            let before = lower.len();
            lower.extend(c.to_lowercase());
            owner.extend(std::iter::repeat(chars.len()).take(lower.len() - before));
            chars.push((start, start + c.len_utf8(), lower.len()));
        }
        Self {
            lower,
            owner,
            chars,
        }
    }

    /// Subject byte range of the next match at or after lowered offset `from`, plus the
    /// lowered offset to resume from.
    fn find(&self, needle: &str, from: usize) -> Option<(usize, usize, usize)> {
        let found = from + self.lower[from..].find(needle)?;
        let (start, _, _) = self.chars[self.owner[found]];
        let (_, end, resume) = self.chars[self.owner[found + needle.len() - 1]];
        Some((start, end, resume))
    }
}

fn push_plain(segments: &mut Vec<MatchSegment>, text: &str) {
    if !text.is_empty() {
        segments.push(MatchSegment::Plain(text.to_string()));
    }
}

/// Splits `subject` around the leftmost, non-overlapping matches of `query`.
///
/// A nullish query yields the whole subject as one plain segment. An empty subject
/// yields no segments.
pub fn highlight(query: Option<&str>, subject: &str) -> Vec<MatchSegment> {
    let mut segments = Vec::new();
    let Some(needle) = normalize_query(query) else {
        push_plain(&mut segments, subject);
        return segments;
    };

    let folded = Folded::new(subject);
    let mut plain_start = 0;
    let mut from = 0;
    while let Some((start, end, resume)) = folded.find(&needle, from) {
        push_plain(&mut segments, &subject[plain_start..start]);
        segments.push(MatchSegment::Match(subject[start..end].to_string()));
        plain_start = end;
        from = resume;
    }
    push_plain(&mut segments, &subject[plain_start..]);
    segments
}
