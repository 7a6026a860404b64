//! 关键词匹配器
//!
//! 每个关键词编译为一个正则表达式，只接受两侧为非单词字符（或字符串边界）的匹配，
//! 因此 "will" 不会匹配 "willing" 或 "downwill" 中的子串。

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::config::KeywordDictionary;
use crate::parsers::html::utils::is_word_char;

/// 编译后的关键词匹配器，与词典条目一一对应
pub struct KeywordMatcher {
    patterns: Vec<Option<Regex>>,
}

impl KeywordMatcher {
    pub fn new(dictionary: &KeywordDictionary, case_sensitive: bool) -> Self {
        let patterns = dictionary
            .iter()
            .map(|entry| match compile_keyword(&entry.keyword, case_sensitive) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!("无法编译关键词 '{}'，已跳过: {}", entry.keyword, e);
                    None
                }
            })
            .collect();

        Self { patterns }
    }

    /// 在 `text` 的 `from` 位置之后查找第 `index` 个关键词的首个单词边界匹配
    pub fn find(&self, index: usize, text: &str, from: usize) -> Option<Range<usize>> {
        let regex = self.patterns.get(index)?.as_ref()?;
        find_word_bounded(regex, text, from)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// 将关键词编译为正则表达式
///
/// 关键词中的空白匹配任意长度的空白（包括换行和不换行空格）
pub fn compile_keyword(keyword: &str, case_sensitive: bool) -> Result<Regex, regex::Error> {
    let pattern = keyword
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    RegexBuilder::new(&pattern)
        .case_insensitive(!case_sensitive)
        .build()
}

/// 从 `from` 开始查找第一个两侧都处于单词边界的匹配
pub fn find_word_bounded(regex: &Regex, text: &str, from: usize) -> Option<Range<usize>> {
    let mut start = from;

    while start <= text.len() {
        let found = regex.find_at(text, start)?;

        if found.start() < found.end()
            && is_boundary_before(text, found.start())
            && is_boundary_after(text, found.end())
        {
            return Some(found.range());
        }

        // Retry one character further, matches may overlap
        start = found.start()
            + text[found.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
    }

    None
}

fn is_boundary_before(text: &str, index: usize) -> bool {
    text[..index].chars().next_back().map_or(true, |c| !is_word_char(c))
}

fn is_boundary_after(text: &str, index: usize) -> bool {
    text[index..].chars().next().map_or(true, |c| !is_word_char(c))
}
