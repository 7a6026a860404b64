//! # 链接规则模块
//!
//! - `matcher` - 单词边界关键词匹配
//! - `rules` - 排除区域判断与链接配额跟踪

pub mod matcher;
pub mod rules;

pub use matcher::{compile_keyword, find_word_bounded, KeywordMatcher};
pub use rules::{AnnotationState, RuleEngine};
