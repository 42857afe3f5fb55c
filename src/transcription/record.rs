use serde::{Serialize, Serializer};

use crate::transcription::{
    cleaner::{join_notes, AmbiguityNote, CleanedToken},
    tag::LineContext,
};

pub const WORD_TABLE_COLUMNS: [&str; 11] = [
    "folio",
    "tag",
    "meta_left",
    "scribal",
    "line_text",
    "word_index",
    "original_word",
    "cleaned_word",
    "unified_word",
    "has_markup",
    "ambiguity_notes",
];

// 語単位の表の 1 行
// 語の無い行は word_index 以降が全て空の 1 行になる
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordRecord {
    pub folio: String,
    pub tag: Option<String>,
    pub meta_left: Option<String>,
    pub scribal: Option<String>,
    pub line_text: String,
    pub word_index: Option<usize>,
    pub original_word: Option<String>,
    pub cleaned_word: Option<String>,
    pub unified_word: Option<String>,
    pub has_markup: bool,
    #[serde(serialize_with = "serialize_notes")]
    pub ambiguity_notes: Vec<AmbiguityNote>,
}

impl WordRecord {
    pub fn empty_line(ctx: &LineContext) -> Self {
        WordRecord {
            folio: ctx.folio.clone(),
            tag: ctx.tag.clone(),
            meta_left: ctx.meta_left.clone(),
            scribal: ctx.scribal.clone(),
            line_text: ctx.content.clone(),
            word_index: None,
            original_word: None,
            cleaned_word: None,
            unified_word: None,
            has_markup: false,
            ambiguity_notes: Vec::new(),
        }
    }

    pub fn word(ctx: &LineContext, word_index: usize, original: &str, token: CleanedToken) -> Self {
        WordRecord {
            folio: ctx.folio.clone(),
            tag: ctx.tag.clone(),
            meta_left: ctx.meta_left.clone(),
            scribal: ctx.scribal.clone(),
            line_text: ctx.content.clone(),
            word_index: Some(word_index),
            original_word: Some(original.to_owned()),
            cleaned_word: token.cleaned,
            unified_word: token.unified,
            has_markup: token.has_markup,
            ambiguity_notes: token.notes,
        }
    }
}

// 印が無ければ空欄
#[allow(clippy::ptr_arg)]
fn serialize_notes<S: Serializer>(
    notes: &Vec<AmbiguityNote>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if notes.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_str(&join_notes(notes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::{cleaner::clean_token, tag::parse_tag};

    #[test]
    fn word_record_copies_line_context() {
        let ctx = parse_tag("<f1r.P1.1;H> da*iin");
        let record = WordRecord::word(&ctx, 1, "da*iin", clean_token("da*iin"));
        assert_eq!(record.folio, "f1r");
        assert_eq!(record.scribal.as_deref(), Some("H"));
        assert_eq!(record.line_text, "da*iin");
        assert_eq!(record.word_index, Some(1));
        assert_eq!(record.original_word.as_deref(), Some("da*iin"));
        assert_eq!(record.cleaned_word.as_deref(), Some("daiin"));
        assert!(record.has_markup);
    }

    #[test]
    fn empty_line_record_has_no_token_fields() {
        let ctx = parse_tag("<f2v.4>");
        let record = WordRecord::empty_line(&ctx);
        assert_eq!(record.word_index, None);
        assert_eq!(record.original_word, None);
        assert_eq!(record.cleaned_word, None);
        assert_eq!(record.unified_word, None);
        assert!(!record.has_markup);
        assert!(record.ambiguity_notes.is_empty());
        assert_eq!(record.tag.as_deref(), Some("f2v.4"));
    }
}
