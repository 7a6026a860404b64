//! 自动链接配置模块
//!
//! 提供设置、关键词词典以及持久化配置的加载与缓存

pub mod dictionary;
pub mod manager;
pub mod settings;

// 重新导出主要类型
pub use dictionary::{KeywordDictionary, KeywordEntry};
pub use manager::{ConfigManager, LinkerConfig};
pub use settings::{LinkTarget, Settings};

/// 配置常量
pub mod constants {
    /// 每篇内容最大链接数（0 表示不限制）
    pub const DEFAULT_MAX_LINKS_PER_POST: usize = 0;
    /// 每个关键词最大链接数
    pub const DEFAULT_MAX_LINKS_PER_KEYWORD: usize = 1;

    /// 默认可处理的内容范围
    pub const DEFAULT_CONTENT_SCOPES: &[&str] = &["post", "page"];

    /// 新窗口链接附带的 rel 值
    pub const NEW_WINDOW_REL: &str = "noopener noreferrer";

    /// 标记元素不参与自动链接的属性
    pub const OPT_OUT_ATTR: &str = "data-no-autolink";

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "autolink.toml",
        "autolink.json",
        "~/.config/autolinker/config.toml",
        "/etc/autolinker/config.toml",
    ];
}
