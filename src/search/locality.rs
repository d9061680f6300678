//! Typo-tolerant substring matching weighted towards the start of a field.
//!
//! For each field the pattern is aligned against its best substring
//! (semi-global edit distance). The field score is
//! `errors / pattern_len + start / distance`, so a perfect match at offset 0
//! scores 0.0 and anything above `threshold` is discarded.

use super::{CorpusEntry, FuzzyMatcher, ScoredMatch};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalityMatcher {
    /// Largest accepted field score
    pub threshold: f64,
    /// Characters over which a late match start costs a full point
    pub distance: usize,
    /// Patterns are truncated to this many characters
    pub max_pattern_len: usize,
}

impl Default for LocalityMatcher {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            distance: 80,
            max_pattern_len: 32,
        }
    }
}

/// One DP cell: edit cost so far and where in the text the alignment began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    cost: usize,
    start: usize,
}

impl LocalityMatcher {
    /// Score of `pattern` against `text`, or `None` past the threshold.
    fn field_score(&self, pattern: &[char], text: &[char]) -> Option<f64> {
        let m = pattern.len();
        if m == 0 {
            return None;
        }

        // Row 0: an alignment may start at any text offset for free.
        let mut prev: Vec<Cell> = (0..=text.len()).map(|j| Cell { cost: 0, start: j }).collect();
        let mut cur = prev.clone();

        for (i, &p) in pattern.iter().enumerate() {
            cur[0] = Cell { cost: i + 1, start: 0 };
            for (j, &t) in text.iter().enumerate() {
                let diagonal = Cell {
                    cost: prev[j].cost + usize::from(p != t),
                    start: prev[j].start,
                };
                let skip_pattern = Cell {
                    cost: prev[j + 1].cost + 1,
                    start: prev[j + 1].start,
                };
                let skip_text = Cell {
                    cost: cur[j].cost + 1,
                    start: cur[j].start,
                };
                cur[j + 1] = self.better(m, self.better(m, diagonal, skip_pattern), skip_text);
            }
            std::mem::swap(&mut prev, &mut cur);
        }

        prev.iter()
            .map(|cell| self.score(cell.cost, m, cell.start))
            .filter(|&score| score <= self.threshold)
            .min_by(f64::total_cmp)
    }

    /// Keep the candidate with the lower final score. Later steps only add
    /// cost, so comparing `cost / m + start / distance` per cell is exact.
    /// Integer cross-multiplication keeps the comparison free of rounding.
    fn better(&self, m: usize, a: Cell, b: Cell) -> Cell {
        let key = |cell: Cell| {
            let weighted = if self.distance == 0 {
                cell.cost + if cell.start == 0 { 0 } else { m }
            } else {
                cell.cost * self.distance + cell.start * m
            };
            (weighted, cell.cost, cell.start)
        };
        if key(b) < key(a) { b } else { a }
    }

    #[allow(clippy::cast_precision_loss)]
    fn score(&self, errors: usize, pattern_len: usize, start: usize) -> f64 {
        let accuracy = errors as f64 / pattern_len as f64;
        if self.distance == 0 {
            return if start == 0 { accuracy } else { 1.0 + accuracy };
        }
        accuracy + start as f64 / self.distance as f64
    }

    /// Mean score over the fields of `entry` that matched.
    #[allow(clippy::cast_precision_loss)]
    fn entry_score(&self, pattern: &[char], entry: &CorpusEntry) -> Option<f64> {
        let scores: Vec<f64> = [entry.name.as_str(), entry.id.as_str()]
            .into_iter()
            .filter_map(|field| {
                let text: Vec<char> = field.to_lowercase().chars().collect();
                self.field_score(pattern, &text)
            })
            .collect();

        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

impl FuzzyMatcher for LocalityMatcher {
    fn rank(&self, corpus: &[CorpusEntry], query: &str) -> Vec<ScoredMatch> {
        let pattern: Vec<char> = query
            .trim()
            .to_lowercase()
            .chars()
            .take(self.max_pattern_len)
            .collect();

        let mut matches: Vec<ScoredMatch> = corpus
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                self.entry_score(&pattern, entry)
                    .map(|score| ScoredMatch { index, score })
            })
            .collect();

        // Stable: equal scores keep corpus order.
        matches.sort_by(|a, b| a.score.total_cmp(&b.score));
        matches
    }
}
