//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问，用于覆盖配置文件中的设置

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::config::LinkTarget;

/// 环境变量解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
    /// 变量存在但值无效（而不是未设置）
    set: bool,
}

impl EnvError {
    fn missing(variable: &str) -> Self {
        Self {
            variable: variable.to_string(),
            message: "Required environment variable not set".to_string(),
            set: false,
        }
    }

    fn invalid(variable: &str, message: impl Into<String>) -> Self {
        Self {
            variable: variable.to_string(),
            message: message.into(),
            set: true,
        }
    }

    /// 变量已设置但无法解析
    pub fn is_set(&self) -> bool {
        self.set
    }
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::DEFAULT.ok_or_else(|| EnvError::missing(Self::NAME)),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "AUTOLINK_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError::invalid(
                    Self::NAME,
                    format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                )),
            }
        }
    }

    /// 配置文件路径
    pub struct ConfigPath;
    impl EnvVar<PathBuf> for ConfigPath {
        const NAME: &'static str = "AUTOLINK_CONFIG";
        const DEFAULT: Option<PathBuf> = None;
        const DESCRIPTION: &'static str = "Path to the settings and keyword dictionary file";

        fn parse(value: &str) -> EnvResult<PathBuf> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(EnvError::invalid(Self::NAME, "Path must not be empty"));
            }
            Ok(PathBuf::from(shellexpand::tilde(trimmed).as_ref()))
        }
    }
}

/// 自动链接相关环境变量
pub mod linker {
    use super::*;

    /// 每篇内容最大链接数
    pub struct MaxLinksPerPost;
    impl EnvVar<usize> for MaxLinksPerPost {
        const NAME: &'static str = "AUTOLINK_MAX_LINKS_PER_POST";
        const DEFAULT: Option<usize> = None;
        const DESCRIPTION: &'static str = "Maximum links inserted per document (0 = unlimited)";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_usize(value, Self::NAME)
        }
    }

    /// 每个关键词最大链接数
    pub struct MaxLinksPerKeyword;
    impl EnvVar<usize> for MaxLinksPerKeyword {
        const NAME: &'static str = "AUTOLINK_MAX_LINKS_PER_KEYWORD";
        const DEFAULT: Option<usize> = None;
        const DESCRIPTION: &'static str = "Maximum links inserted per keyword per document";

        fn parse(value: &str) -> EnvResult<usize> {
            let count = parse_usize(value, Self::NAME)?;
            if count == 0 {
                return Err(EnvError::invalid(Self::NAME, "Must be at least 1"));
            }
            Ok(count)
        }
    }

    /// 区分大小写匹配
    pub struct CaseSensitive;
    impl EnvVar<bool> for CaseSensitive {
        const NAME: &'static str = "AUTOLINK_CASE_SENSITIVE";
        const DEFAULT: Option<bool> = None;
        const DESCRIPTION: &'static str = "Match keywords case-sensitively";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 链接打开方式
    pub struct Target;
    impl EnvVar<LinkTarget> for Target {
        const NAME: &'static str = "AUTOLINK_LINK_TARGET";
        const DEFAULT: Option<LinkTarget> = None;
        const DESCRIPTION: &'static str = "Link target: same-window, new-window";

        fn parse(value: &str) -> EnvResult<LinkTarget> {
            value
                .parse()
                .map_err(|message: String| EnvError::invalid(Self::NAME, message))
        }
    }
}

/// 解析布尔值
pub fn parse_bool(value: &str, name: &str) -> EnvResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(EnvError::invalid(
            name,
            format!("Invalid boolean value '{}'. Use: true/false, 1/0, yes/no", value),
        )),
    }
}

/// 解析非负整数
pub fn parse_usize(value: &str, name: &str) -> EnvResult<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| EnvError::invalid(name, format!("'{}' is not a valid non-negative integer", value)))
}

/// 所有已知环境变量的名称和说明
pub fn describe_all() -> Vec<(&'static str, &'static str)> {
    vec![
        (core::LogLevel::NAME, core::LogLevel::DESCRIPTION),
        (core::ConfigPath::NAME, core::ConfigPath::DESCRIPTION),
        (linker::MaxLinksPerPost::NAME, linker::MaxLinksPerPost::DESCRIPTION),
        (linker::MaxLinksPerKeyword::NAME, linker::MaxLinksPerKeyword::DESCRIPTION),
        (linker::CaseSensitive::NAME, linker::CaseSensitive::DESCRIPTION),
        (linker::Target::NAME, linker::Target::DESCRIPTION),
    ]
}
