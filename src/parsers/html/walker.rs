//! DOM遍历器模块
//!
//! 深度优先（前序）遍历 DOM 树，把正文文本节点中的关键词替换为链接。
//!
//! # 处理流程
//!
//! 1. 对每个节点询问规则引擎，处于排除区域的节点连同子树一起跳过
//! 2. 文本节点按词典顺序逐个尝试关键词，匹配从游标处向后查找，
//!    命中后文本节点被替换为 `[前缀, <a>, 后缀]`，游标移到后缀开头
//! 3. 元素节点递归处理其子节点的快照（插入新兄弟节点不会影响正在进行的迭代）
//! 4. 全局配额用尽后立即停止遍历
//!
//! 对已处理过的输出再次处理不会插入新的链接：
//!
//! - 遍历开始前，文档中已有的、指向词典目标的链接先计入配额
//! - 紧邻"引擎形态"链接（href 为词典 URL，文本恰为该关键词）的文本节点，
//!   只尝试词典中位于该链接关键词之后（左侧链接）或之前（右侧链接）的关键词，
//!   与首次处理时游标的行为一致

use std::ops::Range;
use std::rc::Rc;

use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::config::constants::NEW_WINDOW_REL;
use crate::config::{KeywordDictionary, KeywordEntry, Settings};
use crate::linker::{AnnotationState, KeywordMatcher, RuleEngine};

use super::dom::{
    create_anchor, create_text_node, find_nodes, get_node_attr, get_node_name, get_parent_node,
    get_text_content, replace_child, set_node_attr,
};
use super::utils::ANCHOR_TAG;

/// 遍历结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkFlow {
    Continue,
    /// 全局配额已用尽，剩余节点无需访问
    BudgetExhausted,
}

/// 链接插入遍历器
pub struct LinkWalker<'a> {
    dom: &'a RcDom,
    settings: &'a Settings,
    dictionary: &'a KeywordDictionary,
    matcher: KeywordMatcher,
    rules: RuleEngine<'a>,
    state: AnnotationState,
    text_nodes_visited: usize,
}

impl<'a> LinkWalker<'a> {
    pub fn new(dom: &'a RcDom, settings: &'a Settings, dictionary: &'a KeywordDictionary) -> Self {
        Self {
            dom,
            settings,
            dictionary,
            matcher: KeywordMatcher::new(dictionary, settings.case_sensitive),
            rules: RuleEngine::new(settings),
            state: AnnotationState::new(settings),
            text_nodes_visited: 0,
        }
    }

    /// 从内容根节点开始遍历
    pub fn walk(&mut self, root: &Handle) -> WalkFlow {
        self.count_existing_links(root);
        if self.state.is_budget_exhausted() {
            tracing::debug!("已有链接已用尽配额，跳过遍历");
            return WalkFlow::BudgetExhausted;
        }

        let mut ancestors: Vec<String> = Vec::new();
        self.walk_node(root, &mut ancestors)
    }

    pub fn state(&self) -> &AnnotationState {
        &self.state
    }

    pub fn text_nodes_visited(&self) -> usize {
        self.text_nodes_visited
    }

    /// 各关键词插入的链接数（词典顺序）
    pub fn keyword_counts(&self) -> Vec<(String, usize)> {
        self.dictionary
            .iter()
            .map(|entry| (entry.keyword.clone(), self.state.keyword_count(&entry.keyword)))
            .collect()
    }

    /// 已有链接按目标 URL 计入对应关键词的配额
    fn count_existing_links(&mut self, root: &Handle) {
        let dictionary = self.dictionary;

        for anchor in find_nodes(root, vec![ANCHOR_TAG]) {
            let Some(href) = get_node_attr(&anchor, "href") else {
                continue;
            };
            let href = href.trim();

            let keywords: Vec<&str> = dictionary
                .iter()
                .filter(|entry| entry.url == href)
                .map(|entry| entry.keyword.as_str())
                .collect();

            if !keywords.is_empty() {
                self.state.record_existing_link(keywords);
            }
        }
    }

    fn walk_node(&mut self, node: &Handle, ancestors: &mut Vec<String>) -> WalkFlow {
        if !self.rules.is_node_eligible(node, ancestors) {
            return WalkFlow::Continue;
        }

        match node.data {
            NodeData::Text { .. } => {
                let Some(parent) = get_parent_node(node) else {
                    return WalkFlow::Continue;
                };
                self.text_nodes_visited += 1;
                self.annotate_text(node, &parent)
            }
            NodeData::Document | NodeData::Element { .. } => {
                let tag_name = get_node_name(node).map(str::to_string);
                if let Some(tag_name) = tag_name.clone() {
                    ancestors.push(tag_name);
                }

                // Snapshot: annotating a text child splices new siblings into the live list
                let children: Vec<Handle> = node.children.borrow().clone();

                let mut flow = WalkFlow::Continue;
                for child in children.iter() {
                    flow = self.walk_node(child, ancestors);
                    if flow == WalkFlow::BudgetExhausted {
                        break;
                    }
                }

                if tag_name.is_some() {
                    ancestors.pop();
                }

                flow
            }
            _ => WalkFlow::Continue,
        }
    }

    /// 处理单个文本节点
    fn annotate_text(&mut self, node: &Handle, parent: &Handle) -> WalkFlow {
        let Some(text) = get_text_content(node) else {
            return WalkFlow::Continue;
        };

        let (after, before) = self.keyword_window(node, parent);

        // Counts are committed only once the node has actually been replaced
        let mut state = self.state.clone();
        let mut matches: Vec<(Range<usize>, &KeywordEntry)> = Vec::new();
        let mut cursor = 0;

        for (index, entry) in self.dictionary.iter().enumerate() {
            if after.is_some_and(|after| index <= after)
                || before.is_some_and(|before| index >= before)
            {
                continue;
            }

            if !state.can_link(&entry.keyword) {
                continue;
            }

            if let Some(range) = self.matcher.find(index, &text, cursor) {
                cursor = range.end;
                state.record_link(&entry.keyword);
                matches.push((range, entry));

                if state.is_budget_exhausted() {
                    break;
                }
            }
        }

        if matches.is_empty() {
            return WalkFlow::Continue;
        }

        let mut replacements: Vec<Handle> = Vec::with_capacity(matches.len() * 2 + 1);
        let mut consumed = 0;

        for (range, entry) in matches.iter() {
            if range.start > consumed {
                replacements.push(create_text_node(&text[consumed..range.start]));
            }
            tracing::trace!("插入链接: '{}' -> {}", &text[range.clone()], entry.url);
            replacements.push(self.build_anchor(&text[range.clone()], &entry.url));
            consumed = range.end;
        }

        if consumed < text.len() {
            replacements.push(create_text_node(&text[consumed..]));
        }

        if !replace_child(parent, node, replacements) {
            tracing::debug!("文本节点已不在父节点中，跳过");
            return WalkFlow::Continue;
        }

        self.state = state;

        if self.state.is_budget_exhausted() {
            WalkFlow::BudgetExhausted
        } else {
            WalkFlow::Continue
        }
    }

    /// 前后相邻兄弟节点中引擎形态链接的词典下标
    fn keyword_window(&self, node: &Handle, parent: &Handle) -> (Option<usize>, Option<usize>) {
        let children = parent.children.borrow();
        let Some(position) = children.iter().position(|child| Rc::ptr_eq(child, node)) else {
            return (None, None);
        };

        let after = position
            .checked_sub(1)
            .and_then(|index| children.get(index))
            .and_then(|sibling| self.linked_keyword_index(sibling));
        let before = children
            .get(position + 1)
            .and_then(|sibling| self.linked_keyword_index(sibling));

        (after, before)
    }

    /// 节点是否为引擎形态的链接，是则返回对应关键词的词典下标
    fn linked_keyword_index(&self, node: &Handle) -> Option<usize> {
        if get_node_name(node) != Some(ANCHOR_TAG) {
            return None;
        }

        let href = get_node_attr(node, "href")?;
        let children = node.children.borrow();
        let [child] = children.as_slice() else {
            return None;
        };
        let text = get_text_content(child)?;

        self.dictionary
            .iter()
            .enumerate()
            .find(|(index, entry)| {
                entry.url == href.trim() && self.matcher.find(*index, &text, 0) == Some(0..text.len())
            })
            .map(|(index, _)| index)
    }

    /// 创建带配置属性的链接元素
    fn build_anchor(&self, text: &str, href: &str) -> Handle {
        let anchor = create_anchor(self.dom, text, href);

        if let Some(target) = self.settings.link_target.target_attr() {
            set_node_attr(&anchor, "target", Some(target.to_string()));
        }

        let mut rel: Vec<&str> = Vec::new();
        if self.settings.link_target.target_attr().is_some() {
            rel.push(NEW_WINDOW_REL);
        }
        if self.settings.nofollow {
            rel.push("nofollow");
        }
        if !rel.is_empty() {
            set_node_attr(&anchor, "rel", Some(rel.join(" ")));
        }

        if let Some(class) = &self.settings.link_class {
            set_node_attr(&anchor, "class", Some(class.trim().to_string()));
        }

        anchor
    }
}
