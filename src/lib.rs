//! # Autolinker Library
//!
//! 在 HTML 正文中自动为关键词插入内部链接的引擎。
//!
//! ## 模块组织
//!
//! - `core` - 入口函数、错误类型和调用结果
//! - `config` - 设置、关键词词典和配置管理
//! - `env` - 环境变量
//! - `linker` - 关键词匹配、排除区域规则和配额跟踪
//! - `parsers` - HTML 解析、遍历和序列化

pub mod config;
pub mod core;
pub mod env;
pub mod linker;
pub mod parsers;

// Re-export commonly used items for convenience
pub use crate::config::{
    ConfigManager, KeywordDictionary, KeywordEntry, LinkTarget, LinkerConfig, Settings,
};
pub use crate::core::{
    autolink_content, autolink_html, autolink_html_with_stats, try_autolink_html, AutolinkError,
    AutolinkOutcome, AutolinkResult, AutolinkStatus, Autolinker, NoOpReason,
};
