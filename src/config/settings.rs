//! 自动链接设置
//!
//! 所有字段都有默认值，配置文件中缺失的字段使用默认值补全

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::parsers::html::utils::HEADING_TAGS;

/// 链接打开方式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkTarget {
    /// 当前窗口打开
    #[default]
    SameWindow,
    /// 新窗口打开 (`target="_blank"`)
    NewWindow,
}

impl LinkTarget {
    /// 对应的 `target` 属性值
    pub fn target_attr(&self) -> Option<&'static str> {
        match self {
            LinkTarget::SameWindow => None,
            LinkTarget::NewWindow => Some("_blank"),
        }
    }
}

impl FromStr for LinkTarget {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "same-window" | "same" | "_self" | "self" => Ok(LinkTarget::SameWindow),
            "new-window" | "new" | "_blank" | "blank" => Ok(LinkTarget::NewWindow),
            other => Err(format!(
                "无效的链接打开方式 '{}'，可选值: same-window, new-window",
                other
            )),
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkTarget::SameWindow => write!(f, "same-window"),
            LinkTarget::NewWindow => write!(f, "new-window"),
        }
    }
}

/// 自动链接设置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// 每篇内容最大链接数，0 表示不限制
    pub max_links_per_post: usize,
    /// 每个关键词在一篇内容中的最大链接数
    pub max_links_per_keyword: usize,
    pub link_target: LinkTarget,
    pub case_sensitive: bool,
    /// 排除区域标签（默认标题标签）
    pub excluded_tag_names: BTreeSet<String>,
    /// 不在已有链接内部插入链接
    pub exclude_existing_links: bool,
    /// 允许自动链接的内容范围（如 post、page）
    pub eligible_content_scopes: BTreeSet<String>,
    /// 插入链接的 CSS 类
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_class: Option<String>,
    /// 为插入的链接加上 `rel="nofollow"`
    pub nofollow: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_links_per_post: constants::DEFAULT_MAX_LINKS_PER_POST,
            max_links_per_keyword: constants::DEFAULT_MAX_LINKS_PER_KEYWORD,
            link_target: LinkTarget::default(),
            case_sensitive: false,
            excluded_tag_names: HEADING_TAGS.iter().map(|s| s.to_string()).collect(),
            exclude_existing_links: true,
            eligible_content_scopes: constants::DEFAULT_CONTENT_SCOPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            link_class: None,
            nofollow: false,
        }
    }
}

impl Settings {
    /// 校验并修正设置
    ///
    /// 不会失败：越界值被修正并记录警告
    pub fn validate_and_clamp(&mut self) {
        if self.max_links_per_keyword < 1 {
            tracing::warn!(
                "max_links_per_keyword 必须至少为 1，已从 {} 修正为 1",
                self.max_links_per_keyword
            );
            self.max_links_per_keyword = 1;
        }

        self.excluded_tag_names = self
            .excluded_tag_names
            .iter()
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();

        self.eligible_content_scopes = self
            .eligible_content_scopes
            .iter()
            .map(|scope| scope.trim().to_lowercase())
            .filter(|scope| !scope.is_empty())
            .collect();

        if let Some(class) = &self.link_class {
            if class.trim().is_empty() {
                self.link_class = None;
            }
        }
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{linker, EnvVar};

        match linker::MaxLinksPerPost::get() {
            Ok(value) => self.max_links_per_post = value,
            Err(e) if e.is_set() => tracing::warn!("{}", e),
            Err(_) => {}
        }

        match linker::MaxLinksPerKeyword::get() {
            Ok(value) => self.max_links_per_keyword = value,
            Err(e) if e.is_set() => tracing::warn!("{}", e),
            Err(_) => {}
        }

        match linker::CaseSensitive::get() {
            Ok(value) => self.case_sensitive = value,
            Err(e) if e.is_set() => tracing::warn!("{}", e),
            Err(_) => {}
        }

        match linker::Target::get() {
            Ok(value) => self.link_target = value,
            Err(e) if e.is_set() => tracing::warn!("{}", e),
            Err(_) => {}
        }
    }

    /// 检查内容范围是否允许自动链接
    pub fn is_scope_eligible(&self, scope: &str) -> bool {
        self.eligible_content_scopes
            .contains(&scope.trim().to_lowercase())
    }

    /// 检查标签是否属于排除区域
    ///
    /// 比较时忽略大小写和首尾空白，未经 `validate_and_clamp` 的设置同样生效
    pub fn is_excluded_tag(&self, tag_name: &str) -> bool {
        let tag_name = tag_name.trim();

        self.excluded_tag_names.contains(tag_name)
            || self
                .excluded_tag_names
                .iter()
                .any(|tag| tag.trim().eq_ignore_ascii_case(tag_name))
    }
}
