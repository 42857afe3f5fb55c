use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::utility::chars::{contains_char_type, count_char_type, is_all_standard, CharType};

// 語の整形で元の綴りから離れた可能性を示す印
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AmbiguityNote {
    #[serde(rename = "none_input")]
    NoneInput,
    #[serde(rename = "contains_*")]
    ContainsMarker,
    #[serde(rename = "non_standard_chars")]
    NonStandardChars,
    #[serde(rename = "markup_removed")]
    MarkupRemoved,
    #[serde(rename = "empty_after_clean")]
    EmptyAfterClean,
    #[serde(rename = "changed_by_cleaning")]
    ChangedByCleaning,
    #[serde(rename = "many_dots")]
    ManyDots,
}

impl AmbiguityNote {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoneInput => "none_input",
            Self::ContainsMarker => "contains_*",
            Self::NonStandardChars => "non_standard_chars",
            Self::MarkupRemoved => "markup_removed",
            Self::EmptyAfterClean => "empty_after_clean",
            Self::ChangedByCleaning => "changed_by_cleaning",
            Self::ManyDots => "many_dots",
        }
    }
}

impl fmt::Display for AmbiguityNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn join_notes(notes: &[AmbiguityNote]) -> String {
    notes
        .iter()
        .map(AmbiguityNote::as_str)
        .collect::<Vec<_>>()
        .join(";")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedToken {
    pub cleaned: Option<String>,
    pub unified: Option<String>,
    pub has_markup: bool,
    pub notes: Vec<AmbiguityNote>,
}

const MANY_DOTS: usize = 4;

pub fn clean_optional_token(original: Option<&str>) -> CleanedToken {
    match original {
        Some(original) => clean_token(original),
        None => CleanedToken {
            cleaned: None,
            unified: None,
            has_markup: false,
            notes: vec![AmbiguityNote::NoneInput],
        },
    }
}

// 規則の順序は固定 (後の規則は前の規則の結果に適用する)
pub fn clean_token(original: &str) -> CleanedToken {
    static REGEX_DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());
    static REGEX_EDGES: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[^A-Za-z0-9.]+|[^A-Za-z0-9.]+$").unwrap());

    let mut notes = Vec::new();
    let mut has_markup = false;

    if contains_char_type(original, CharType::Marker) {
        has_markup = true;
        notes.push(AmbiguityNote::ContainsMarker);
    }

    if !is_all_standard(original) {
        has_markup = true;
        notes.push(AmbiguityNote::NonStandardChars);
    }

    let cleaned = original.replace('*', "");
    let cleaned = REGEX_DOTS.replace_all(&cleaned, ".");
    let cleaned = REGEX_EDGES.replace_all(&cleaned, "");

    // '.' だけが残った場合は語として扱わない
    let cleaned = if cleaned.chars().all(|c| c == '.') {
        None
    } else {
        Some(cleaned.into_owned())
    };

    let unified = cleaned.as_ref().map(|c| c.to_lowercase());

    if has_markup {
        notes.push(AmbiguityNote::MarkupRemoved);
    }

    match &unified {
        None => notes.push(AmbiguityNote::EmptyAfterClean),
        // 大文字・小文字の違いだけなら変更とみなさない
        Some(unified) if *unified != original.to_lowercase() => {
            notes.push(AmbiguityNote::ChangedByCleaning)
        }
        Some(_) => {}
    }

    if count_char_type(original, CharType::Dot) >= MANY_DOTS {
        notes.push(AmbiguityNote::ManyDots);
    }

    CleanedToken {
        cleaned,
        unified,
        has_markup,
        notes,
    }
}
