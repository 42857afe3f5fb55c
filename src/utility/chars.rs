// 転写テキストの文字種別
// 標準の文字は ASCII の英数字と '.'（語の区切り）と '*'（判読不確かの印）だけ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Alphanumeric,
    Dot,
    Marker,
    Other,
}

impl CharType {
    pub fn from(c: char) -> Self {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' => Self::Alphanumeric,
            '.' => Self::Dot,
            '*' => Self::Marker,
            _ => Self::Other,
        }
    }

    pub fn is_standard(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

pub fn contains_char_type(s: &str, char_type: CharType) -> bool {
    s.chars().any(|c| CharType::from(c) == char_type)
}

pub fn count_char_type(s: &str, char_type: CharType) -> usize {
    s.chars().filter(|&c| CharType::from(c) == char_type).count()
}

pub fn is_all_standard(s: &str) -> bool {
    s.chars().all(|c| CharType::from(c).is_standard())
}
