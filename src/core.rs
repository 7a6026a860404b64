use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigManager, KeywordDictionary, LinkerConfig, Settings};
use crate::parsers::html::{html_to_dom, serialize_document, LinkWalker, WalkFlow};

/// Represents errors that can occur while auto-linking a document
///
/// None of these reach the caller of the `autolink_*` entry points: every
/// failure degrades to returning the original markup.
#[derive(Error, Debug)]
pub enum AutolinkError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialize(String),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 错误结果类型别名
pub type AutolinkResult<T> = Result<T, AutolinkError>;

/// Why an invocation returned its input untouched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoOpReason {
    /// The keyword dictionary is empty
    EmptyDictionary,
    /// The content scope is not configured for auto-linking
    ScopeNotEligible,
    /// No quota headroom at entry, either configured away or used up by existing links
    QuotaExhausted,
    /// Nothing in the eligible text matched
    NoMatches,
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NoOpReason::EmptyDictionary => write!(f, "empty dictionary"),
            NoOpReason::ScopeNotEligible => write!(f, "scope not eligible"),
            NoOpReason::QuotaExhausted => write!(f, "quota exhausted"),
            NoOpReason::NoMatches => write!(f, "no matches"),
        }
    }
}

/// Result classification of one invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AutolinkStatus {
    /// At least one link was inserted
    Linked,
    /// Nothing to do, input returned unchanged
    NoOp(NoOpReason),
    /// Annotation was abandoned (parse or serialization failure), input returned unchanged
    Skipped(String),
}

/// Annotated markup plus statistics about the invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutolinkOutcome {
    pub html: String,
    pub status: AutolinkStatus,
    pub links_inserted: usize,
    /// Links inserted per keyword, in dictionary order
    pub keyword_counts: Vec<(String, usize)>,
    pub text_nodes_visited: usize,
    pub budget_exhausted: bool,
}

impl AutolinkOutcome {
    fn unchanged(markup: &str, status: AutolinkStatus) -> Self {
        Self {
            html: markup.to_string(),
            status,
            links_inserted: 0,
            keyword_counts: Vec::new(),
            text_nodes_visited: 0,
            budget_exhausted: false,
        }
    }

    /// Whether the returned markup differs from the input
    pub fn is_modified(&self) -> bool {
        self.status == AutolinkStatus::Linked
    }
}

/// Inserts keyword links into markup and returns the annotated markup
///
/// Never fails: on any problem the input is returned unchanged.
///
/// # Examples
///
/// ```
/// use autolinker::config::{KeywordDictionary, KeywordEntry, Settings};
/// use autolinker::core::autolink_html;
///
/// let dictionary = KeywordDictionary::from_entries(
///     vec![KeywordEntry::new("estate planning", "/services/estate-planning")],
///     false,
/// );
/// let html = autolink_html(
///     "<p>Ask about estate planning.</p>",
///     &Settings::default(),
///     &dictionary,
/// );
///
/// assert_eq!(
///     html,
///     "<p>Ask about <a href=\"/services/estate-planning\">estate planning</a>.</p>"
/// );
/// ```
pub fn autolink_html(markup: &str, settings: &Settings, dictionary: &KeywordDictionary) -> String {
    autolink_html_with_stats(markup, settings, dictionary).html
}

/// Same as [`autolink_html`], also reporting what happened
pub fn autolink_html_with_stats(
    markup: &str,
    settings: &Settings,
    dictionary: &KeywordDictionary,
) -> AutolinkOutcome {
    if dictionary.is_empty() {
        tracing::debug!("词典为空，跳过自动链接");
        return AutolinkOutcome::unchanged(markup, AutolinkStatus::NoOp(NoOpReason::EmptyDictionary));
    }

    if settings.max_links_per_keyword == 0 {
        return AutolinkOutcome::unchanged(markup, AutolinkStatus::NoOp(NoOpReason::QuotaExhausted));
    }

    match try_autolink_html(markup, settings, dictionary) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("自动链接失败，返回原始内容: {}", e);
            AutolinkOutcome::unchanged(markup, AutolinkStatus::Skipped(e.to_string()))
        }
    }
}

/// Fallible core of the engine: parse, walk, serialize
///
/// Returns the original markup byte-for-byte when no link was inserted.
pub fn try_autolink_html(
    markup: &str,
    settings: &Settings,
    dictionary: &KeywordDictionary,
) -> AutolinkResult<AutolinkOutcome> {
    let parsed = html_to_dom(markup)?;
    let root = parsed.content_root()?;

    let mut walker = LinkWalker::new(&parsed.dom, settings, dictionary);
    let flow = walker.walk(&root);

    let links_inserted = walker.state().total_links_inserted;
    let keyword_counts = walker.keyword_counts();
    let text_nodes_visited = walker.text_nodes_visited();
    let budget_exhausted = flow == WalkFlow::BudgetExhausted;

    tracing::debug!(
        links_inserted,
        text_nodes_visited,
        budget_exhausted,
        "自动链接遍历完成"
    );

    if links_inserted == 0 {
        let reason = if budget_exhausted {
            NoOpReason::QuotaExhausted
        } else {
            NoOpReason::NoMatches
        };
        let mut outcome = AutolinkOutcome::unchanged(markup, AutolinkStatus::NoOp(reason));
        outcome.keyword_counts = keyword_counts;
        outcome.text_nodes_visited = text_nodes_visited;
        outcome.budget_exhausted = budget_exhausted;
        return Ok(outcome);
    }

    let html = serialize_document(&parsed)?;

    Ok(AutolinkOutcome {
        html,
        status: AutolinkStatus::Linked,
        links_inserted,
        keyword_counts,
        text_nodes_visited,
        budget_exhausted,
    })
}

/// Annotates content for a given scope using a configuration snapshot
pub fn autolink_content(markup: &str, scope: &str, config: &LinkerConfig) -> AutolinkOutcome {
    if !config.settings.is_scope_eligible(scope) {
        tracing::debug!("内容范围 '{}' 不允许自动链接", scope);
        return AutolinkOutcome::unchanged(
            markup,
            AutolinkStatus::NoOp(NoOpReason::ScopeNotEligible),
        );
    }

    autolink_html_with_stats(markup, &config.settings, &config.dictionary)
}

/// Entry point for content pipelines
///
/// Reads the latest configuration snapshot once per invocation and never
/// writes to the configuration store.
pub struct Autolinker {
    manager: ConfigManager,
}

impl Autolinker {
    pub fn new(manager: ConfigManager) -> Self {
        Self { manager }
    }

    /// Builds an autolinker over an in-memory configuration
    pub fn from_config(config: LinkerConfig) -> Self {
        Self::new(ConfigManager::from_config(config))
    }

    /// Annotates one piece of content
    pub fn annotate(&self, markup: &str, scope: &str) -> AutolinkOutcome {
        let snapshot: Arc<LinkerConfig> = self.manager.load();
        autolink_content(markup, scope, &snapshot)
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.manager
    }
}
