//! 关键词词典
//!
//! 有序的 (关键词, URL) 列表，声明顺序即匹配优先级

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// 关键词条目
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub url: String,
}

impl KeywordEntry {
    pub fn new(keyword: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            url: url.into(),
        }
    }

    /// 解析 `关键词=URL` 形式的条目（命令行使用）
    ///
    /// 以第一个 `=` 分隔，URL 查询串中可以包含 `=`
    pub fn parse_pair(pair: &str) -> Option<Self> {
        let (keyword, url) = pair.split_once('=')?;
        let entry = Self::new(keyword.trim(), url.trim());
        if entry.keyword.is_empty() || entry.url.is_empty() {
            return None;
        }
        Some(entry)
    }
}

/// 关键词词典
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordDictionary {
    entries: Vec<KeywordEntry>,
}

impl KeywordDictionary {
    /// 从条目列表构建词典
    ///
    /// 去除首尾空白，丢弃关键词或URL为空的条目，重复关键词只保留第一次出现。
    /// 不区分大小写时，仅大小写不同的关键词视为重复。
    pub fn from_entries<I>(entries: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = KeywordEntry>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut kept: Vec<KeywordEntry> = Vec::new();

        for entry in entries {
            let keyword = entry.keyword.trim();
            let url = entry.url.trim();

            if keyword.is_empty() || url.is_empty() {
                tracing::debug!("丢弃空关键词条目: {:?}", entry);
                continue;
            }

            let key = if case_sensitive {
                keyword.to_string()
            } else {
                keyword.to_lowercase()
            };

            if !seen.insert(key) {
                tracing::debug!("丢弃重复关键词: {}", keyword);
                continue;
            }

            kept.push(KeywordEntry::new(keyword, url));
        }

        Self { entries: kept }
    }

    /// 追加条目（已存在的关键词被忽略）
    pub fn extend<I>(&mut self, entries: I, case_sensitive: bool)
    where
        I: IntoIterator<Item = KeywordEntry>,
    {
        let combined = self.entries.drain(..).chain(entries).collect::<Vec<_>>();
        *self = Self::from_entries(combined, case_sensitive);
    }

    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeywordEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a KeywordDictionary {
    type Item = &'a KeywordEntry;
    type IntoIter = std::slice::Iter<'a, KeywordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
