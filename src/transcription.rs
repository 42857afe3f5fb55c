// 写本の転写テキスト ("<f1r.P1.1;H> daiin.shedy qokain" 形式の行) を語単位の表に変換する
//
// 行の形式から外れたものもエラーにはせず、タグ無しの行 (UNGROUPED) として扱う：
// - タグは "<folio.locator;hand>" で、";" 以降 (筆写者) と "." 以降 (位置) は省略されることがある
// - 一部の転写では本文の先頭に "H>" が残っている
// - '*' は判読の不確かな箇所の印で、語からは取り除いて記録する

pub mod builder;
pub mod cleaner;
pub mod record;
pub mod report;
pub mod stats;
pub mod tag;
