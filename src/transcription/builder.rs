use std::io::BufRead;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{
    transcription::{
        cleaner::clean_token, record::WordRecord, stats::RunStatistics, tag::parse_tag,
    },
    utility::{decode_utf8_lossy, read_line},
};

// 一部の転写に残っている行頭の "H>"
const LEGACY_LINE_PREFIX: &str = "H>";

#[derive(Debug, Clone, Default)]
pub struct ParsedTranscription {
    pub records: Vec<WordRecord>,
    pub stats: RunStatistics,
}

impl ParsedTranscription {
    // other は self より後ろの行を解析した結果であること
    pub fn concat(&mut self, other: ParsedTranscription) {
        self.records.extend(other.records);
        self.stats.merge(other.stats);
    }
}

#[derive(Debug, Default)]
pub struct RecordBuilder {
    records: Vec<WordRecord>,
    stats: RunStatistics,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            self.stats.record_blank_line();
            return;
        }

        let mut ctx = parse_tag(line);
        self.stats.record_line(&ctx);

        if let Some(rest) = ctx.content.strip_prefix(LEGACY_LINE_PREFIX) {
            ctx.content = rest.trim_start().to_owned();
            self.stats.record_removed_leading_marker();
        }

        if ctx.content.is_empty() {
            self.records.push(WordRecord::empty_line(&ctx));
            return;
        }

        for (i, word) in ctx.content.split_whitespace().enumerate() {
            let token = clean_token(word);
            self.stats.record_word(word, &token);
            self.records.push(WordRecord::word(&ctx, i + 1, word, token));
        }
    }

    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn finish(self) -> ParsedTranscription {
        ParsedTranscription {
            records: self.records,
            stats: self.stats,
        }
    }
}

pub fn build_records<I, S>(lines: I) -> ParsedTranscription
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = RecordBuilder::new();
    for line in lines {
        builder.push_line(line.as_ref());
    }
    builder.finish()
}

// 1 行ずつ最後まで読む
// 不正な UTF-8 は置き換えて続行し、読み込みの失敗だけをエラーにする
pub fn parse_transcription<R: BufRead>(mut reader: R) -> Result<ParsedTranscription> {
    let mut builder = RecordBuilder::new();
    let mut buffer = Vec::new();
    let mut line_number = 0;

    while read_line(&mut reader, &mut buffer)
        .with_context(|| format!("Failed to read line {}", line_number + 1))?
    {
        line_number += 1;

        let (line, had_errors) = decode_utf8_lossy(&buffer);
        if had_errors {
            warn!("Invalid UTF-8 replaced at line {}", line_number);
        }

        builder.push_line(&line);
    }

    debug!(
        "Read {} lines into {} records",
        line_number,
        builder.records().len()
    );

    Ok(builder.finish())
}
