//! 规则引擎与配额跟踪
//!
//! 规则引擎决定节点是否处于排除区域，配额跟踪器决定是否还能插入链接。
//! 配额状态只存在于一次调用内，调用结束即丢弃。

use std::collections::HashMap;

use markup5ever_rcdom::{Handle, NodeData};

use crate::config::constants::OPT_OUT_ATTR;
use crate::config::Settings;
use crate::parsers::html::dom::{get_node_attr, get_node_name};
use crate::parsers::html::utils::{is_never_link_element, ANCHOR_TAG};

/// 单次调用的链接计数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationState {
    pub total_links_inserted: usize,
    /// 文档中已存在、指向词典目标的链接数
    pub existing_links: usize,
    per_keyword_counts: HashMap<String, usize>,
    existing_per_keyword: HashMap<String, usize>,
    max_links_per_post: usize,
    max_links_per_keyword: usize,
}

impl AnnotationState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            total_links_inserted: 0,
            existing_links: 0,
            per_keyword_counts: HashMap::new(),
            existing_per_keyword: HashMap::new(),
            max_links_per_post: settings.max_links_per_post,
            max_links_per_keyword: settings.max_links_per_keyword,
        }
    }

    /// 关键词是否还能插入链接
    pub fn can_link(&self, keyword: &str) -> bool {
        self.keyword_count(keyword) + self.existing_count(keyword) < self.max_links_per_keyword
            && !self.is_budget_exhausted()
    }

    /// 记录一次链接插入
    pub fn record_link(&mut self, keyword: &str) {
        self.total_links_inserted += 1;
        *self
            .per_keyword_counts
            .entry(keyword.to_string())
            .or_insert(0) += 1;
    }

    /// 记录一个已存在、指向 `keywords` 目标的链接
    ///
    /// 已有链接占用配额，但不计入 `total_links_inserted` 和 `keyword_count`
    pub fn record_existing_link<'k, I>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = &'k str>,
    {
        self.existing_links += 1;
        for keyword in keywords {
            *self
                .existing_per_keyword
                .entry(keyword.to_string())
                .or_insert(0) += 1;
        }
    }

    /// 全局配额是否已用尽（`max_links_per_post` 为 0 时永不用尽）
    pub fn is_budget_exhausted(&self) -> bool {
        self.max_links_per_post > 0
            && self.total_links_inserted + self.existing_links >= self.max_links_per_post
    }

    /// 关键词已插入的链接数
    pub fn keyword_count(&self, keyword: &str) -> usize {
        self.per_keyword_counts.get(keyword).copied().unwrap_or(0)
    }

    /// 文档中已存在、指向该关键词目标的链接数
    pub fn existing_count(&self, keyword: &str) -> usize {
        self.existing_per_keyword.get(keyword).copied().unwrap_or(0)
    }
}

/// 排除区域规则
pub struct RuleEngine<'a> {
    settings: &'a Settings,
}

impl<'a> RuleEngine<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// 节点是否可以进入
    ///
    /// 返回 `false` 时整棵子树都应跳过。`ancestors` 是从根到父节点的标签名。
    pub fn is_node_eligible(&self, node: &Handle, ancestors: &[String]) -> bool {
        if ancestors.iter().any(|tag| self.is_excluded_zone(tag)) {
            return false;
        }

        match node.data {
            NodeData::Document | NodeData::Text { .. } => true,
            NodeData::Element { .. } => {
                let Some(tag_name) = get_node_name(node) else {
                    return false;
                };

                if self.is_excluded_zone(tag_name) {
                    return false;
                }

                // Authors can opt a subtree out explicitly
                get_node_attr(node, OPT_OUT_ATTR).is_none()
            }
            _ => false,
        }
    }

    /// 标签本身是否构成排除区域
    pub fn is_excluded_zone(&self, tag_name: &str) -> bool {
        let tag_name = tag_name.to_ascii_lowercase();

        self.settings.is_excluded_tag(&tag_name)
            || is_never_link_element(&tag_name)
            || (self.settings.exclude_existing_links && tag_name == ANCHOR_TAG)
    }
}
