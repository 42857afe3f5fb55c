use std::path::Path;

use serde::Serialize;

use crate::transcription::{
    builder::ParsedTranscription,
    cleaner::join_notes,
    stats::{AmbiguousExample, MAX_AMBIGUOUS_EXAMPLES},
};

pub const DEFAULT_TOP_TOKENS: usize = 20;

// 前処理ログ (人が読む要約)
pub fn summarize(source: &Path, parsed: &ParsedTranscription, top_n: usize) -> Vec<String> {
    let stats = &parsed.stats;

    let mut lines = vec![
        format!("Source file: {}", source.display()),
        format!("Total word-level rows: {}", parsed.records.len()),
        format!("Total tokens processed: {}", stats.total_words),
        format!("Blank lines skipped: {}", stats.blank_lines),
        format!("Untagged lines: {}", stats.untagged_lines),
        format!(
            "Lines with removed leading 'H>': {}",
            stats.removed_leading_marker
        ),
        format!(
            "Words containing markup (e.g., '*'): {}",
            stats.words_with_markup
        ),
        format!("Unique folios found: {}", stats.folios.len()),
        String::new(),
    ];

    lines.push(format!("Top {} unified tokens (by frequency):", top_n));
    for (token, count) in stats.top_tokens(top_n) {
        lines.push(format!("  {:30} {}", token, count));
    }
    lines.push(String::new());

    lines.push(
        "Examples of tokens flagged as ambiguous (original -> cleaned ; notes):".to_owned(),
    );
    for example in stats.ambiguous_examples.iter().take(MAX_AMBIGUOUS_EXAMPLES) {
        lines.push(format_example(example));
    }

    lines
}

fn format_example(example: &AmbiguousExample) -> String {
    format!(
        "  {:30} -> {:30} ; {}",
        example.original,
        example.cleaned.as_deref().unwrap_or("<empty>"),
        join_notes(&example.notes)
    )
}

#[derive(Debug, Serialize)]
pub struct TokenCount<'a> {
    pub token: &'a str,
    pub count: usize,
}

// 後段の集計から読むための要約 (JSON)
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub source: String,
    pub rows: usize,
    pub total_lines: usize,
    pub total_words: usize,
    pub blank_lines: usize,
    pub untagged_lines: usize,
    pub total_tagged_lines: usize,
    pub removed_leading_marker: usize,
    pub words_with_markup: usize,
    pub folios: Vec<&'a str>,
    pub top_tokens: Vec<TokenCount<'a>>,
    pub ambiguous_examples: &'a [AmbiguousExample],
}

impl<'a> RunSummary<'a> {
    pub fn new(source: &Path, parsed: &'a ParsedTranscription, top_n: usize) -> Self {
        let stats = &parsed.stats;
        RunSummary {
            source: source.display().to_string(),
            rows: parsed.records.len(),
            total_lines: stats.total_lines,
            total_words: stats.total_words,
            blank_lines: stats.blank_lines,
            untagged_lines: stats.untagged_lines,
            total_tagged_lines: stats.total_tagged_lines,
            removed_leading_marker: stats.removed_leading_marker,
            words_with_markup: stats.words_with_markup,
            folios: stats.folios.iter().map(String::as_str).collect(),
            top_tokens: stats
                .top_tokens(top_n)
                .into_iter()
                .map(|(token, count)| TokenCount { token, count })
                .collect(),
            ambiguous_examples: &stats.ambiguous_examples,
        }
    }
}
