use once_cell::sync::Lazy;
use regex::Regex;

// タグの無い行が属する folio
pub const UNGROUPED_FOLIO: &str = "UNGROUPED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineContext {
    pub folio: String,
    pub tag: Option<String>,
    pub meta_left: Option<String>,
    pub scribal: Option<String>,
    pub content: String,
}

impl LineContext {
    // "<  >" のように空のタグは tagged に数えない
    pub fn is_tagged(&self) -> bool {
        matches!(&self.tag, Some(tag) if !tag.is_empty())
    }

    pub fn is_untagged(&self) -> bool {
        self.tag.is_none()
    }
}

// "<f1r.P1.1;H> daiin.shedy qokain" のような行
// 空行はここに渡さない (呼び出し側で数えて捨てる)
pub fn parse_tag(line: &str) -> LineContext {
    static REGEX_TAG_LINE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\s*<(?P<tag>[^>]+)>\s*(?P<content>.*)$").unwrap());

    let caps = match REGEX_TAG_LINE.captures(line) {
        Some(caps) => caps,
        None => {
            return LineContext {
                folio: UNGROUPED_FOLIO.to_owned(),
                tag: None,
                meta_left: None,
                scribal: None,
                content: line.trim().to_owned(),
            }
        }
    };

    let tag = caps["tag"].trim();
    let content = caps["content"].trim();

    let (meta_left, scribal) = match tag.split_once(';') {
        Some((left, scribal)) => (left.trim(), Some(scribal.trim().to_owned())),
        None => (tag, None),
    };

    let folio = match meta_left.split_once('.') {
        Some((folio, _)) => folio,
        None => meta_left,
    };

    LineContext {
        folio: folio.to_owned(),
        tag: Some(tag.to_owned()),
        meta_left: Some(meta_left.to_owned()),
        scribal,
        content: content.to_owned(),
    }
}
