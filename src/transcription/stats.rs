use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::transcription::{
    cleaner::{AmbiguityNote, CleanedToken},
    tag::LineContext,
};

pub const MAX_AMBIGUOUS_EXAMPLES: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousExample {
    pub original: String,
    pub cleaned: Option<String>,
    pub notes: Vec<AmbiguityNote>,
}

// 出現順を保った頻度表 (同数のときは先に出た語を上にする)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFrequency {
    index: HashMap<String, usize>,
    counts: Vec<(String, usize)>,
}

impl TokenFrequency {
    pub fn add(&mut self, token: &str, count: usize) {
        match self.index.get(token) {
            Some(&i) => self.counts[i].1 += count,
            None => {
                self.index.insert(token.to_owned(), self.counts.len());
                self.counts.push((token.to_owned(), count));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(token, count)| (token.as_str(), *count))
    }

    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut top: Vec<_> = self.iter().collect();
        // sort_by は安定なので同数は出現順のまま
        top.sort_by(|a, b| b.1.cmp(&a.1));
        top.truncate(n);
        top
    }
}

// 1 回の解析で積み上げる集計値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub total_lines: usize,
    pub blank_lines: usize,
    pub untagged_lines: usize,
    pub total_tagged_lines: usize,
    pub removed_leading_marker: usize,
    pub total_words: usize,
    pub words_with_markup: usize,
    pub folios: BTreeSet<String>,
    pub frequency: TokenFrequency,
    pub ambiguous_examples: Vec<AmbiguousExample>,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_blank_line(&mut self) {
        self.total_lines += 1;
        self.blank_lines += 1;
    }

    pub fn record_line(&mut self, ctx: &LineContext) {
        self.total_lines += 1;
        if ctx.is_tagged() {
            self.total_tagged_lines += 1;
        } else if ctx.is_untagged() {
            self.untagged_lines += 1;
        }

        if !self.folios.contains(&ctx.folio) {
            self.folios.insert(ctx.folio.clone());
        }
    }

    pub fn record_removed_leading_marker(&mut self) {
        self.removed_leading_marker += 1;
    }

    pub fn record_word(&mut self, original: &str, token: &CleanedToken) {
        self.total_words += 1;
        if token.has_markup {
            self.words_with_markup += 1;
        }

        if let Some(unified) = &token.unified {
            self.frequency.add(unified, 1);
        }

        if !token.notes.is_empty() && self.ambiguous_examples.len() < MAX_AMBIGUOUS_EXAMPLES {
            self.ambiguous_examples.push(AmbiguousExample {
                original: original.to_owned(),
                cleaned: token.cleaned.clone(),
                notes: token.notes.clone(),
            });
        }
    }

    pub fn top_tokens(&self, n: usize) -> Vec<(&str, usize)> {
        self.frequency.top(n)
    }

    // other は self より後ろの行を解析した結果であること
    pub fn merge(&mut self, other: RunStatistics) {
        self.total_lines += other.total_lines;
        self.blank_lines += other.blank_lines;
        self.untagged_lines += other.untagged_lines;
        self.total_tagged_lines += other.total_tagged_lines;
        self.removed_leading_marker += other.removed_leading_marker;
        self.total_words += other.total_words;
        self.words_with_markup += other.words_with_markup;

        self.folios.extend(other.folios);

        for (token, count) in other.frequency.iter() {
            self.frequency.add(token, count);
        }

        self.ambiguous_examples.extend(other.ambiguous_examples);
        self.ambiguous_examples.truncate(MAX_AMBIGUOUS_EXAMPLES);
    }
}
