use std::path::Path;

use rand::Rng;

use crate::foundation::error::{SynthError, SynthResult};

/// Number of leading sentences kept from a corpus line.
pub const DEFAULT_MAX_SENTENCES: usize = 2;

/// Plain-text corpus, one candidate text per line.
#[derive(Clone, Debug)]
pub struct Corpus {
    lines: Vec<String>,
}

impl Corpus {
    /// Build a corpus from in-memory text. Blank lines are not candidates.
    pub fn from_text(text: &str) -> SynthResult<Self> {
        let lines: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect();
        if lines.is_empty() {
            return Err(SynthError::text("corpus contains no non-empty lines"));
        }
        Ok(Self { lines })
    }

    pub fn load(path: &Path) -> SynthResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SynthError::io(format!("read corpus '{}': {e}", path.display())))?;
        Self::from_text(&text).map_err(|e| match e {
            SynthError::Text(msg) => SynthError::text(format!("'{}': {msg}", path.display())),
            other => other,
        })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Choose one line uniformly and cut it down to its first two sentences.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let line = &self.lines[rng.random_range(0..self.lines.len())];
        truncate_sentences(line, DEFAULT_MAX_SENTENCES)
    }
}

/// Keep the first `max_sentences` `.`-delimited fragments, joined with `". "` and closed
/// with a trailing `.`. Text without any `.` becomes a single sentence. Empty fragments (from
/// a trailing `.` or runs of dots) are not sentences.
pub fn truncate_sentences(text: &str, max_sentences: usize) -> String {
    let kept: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(max_sentences.max(1))
        .collect();
    let mut out = kept.join(". ").trim().to_string();
    out.push('.');
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/corpus.rs"]
mod tests;
