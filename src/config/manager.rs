//! 配置管理器
//!
//! 从持久化配置文件读取设置和关键词词典，并作为只读快照缓存。
//! 快照只会被整体替换（管理端保存或重新加载），读取方可能看到旧快照，但快照本身始终一致。

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::constants;
use super::dictionary::{KeywordDictionary, KeywordEntry};
use super::settings::Settings;
use crate::core::{AutolinkError, AutolinkResult};

/// 配置文件结构
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigFile {
    pub settings: Settings,
    pub keywords: Vec<KeywordEntry>,
}

/// 一次调用所需的完整配置快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkerConfig {
    pub settings: Settings,
    pub dictionary: KeywordDictionary,
}

impl LinkerConfig {
    /// 由设置和原始条目构建配置（设置会先被校验修正）
    pub fn new<I>(mut settings: Settings, entries: I) -> Self
    where
        I: IntoIterator<Item = KeywordEntry>,
    {
        settings.validate_and_clamp();
        let dictionary = KeywordDictionary::from_entries(entries, settings.case_sensitive);

        Self {
            settings,
            dictionary,
        }
    }

    /// 从配置文件结构构建
    pub fn from_file(file: ConfigFile, apply_env: bool) -> Self {
        let mut settings = file.settings;
        if apply_env {
            settings.apply_env_overrides();
        }
        Self::new(settings, file.keywords)
    }

    /// 转换回配置文件结构
    pub fn to_file(&self) -> ConfigFile {
        ConfigFile {
            settings: self.settings.clone(),
            keywords: self.dictionary.entries().to_vec(),
        }
    }
}

/// 配置管理器
pub struct ConfigManager {
    config: RwLock<Arc<LinkerConfig>>,
    last_modified: RwLock<Option<SystemTime>>,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 创建新的配置管理器
    ///
    /// 配置文件路径取自 `AUTOLINK_CONFIG`，否则按搜索路径查找。
    /// 找不到或无法读取时使用默认设置和空词典。
    pub fn new() -> Self {
        use crate::env::{core, EnvVar};

        match core::ConfigPath::get() {
            Ok(path) => return Self::from_path(path),
            Err(e) if e.is_set() => tracing::warn!("{}", e),
            Err(_) => {}
        }

        match Self::find_config_file() {
            Some(path) => Self::from_path(path),
            None => {
                tracing::info!("未找到配置文件，使用默认配置");
                let mut settings = Settings::default();
                settings.apply_env_overrides();
                Self::from_config(LinkerConfig::new(settings, Vec::new()))
            }
        }
    }

    /// 从指定文件创建配置管理器
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let manager = Self {
            config: RwLock::new(Arc::new(LinkerConfig::default())),
            last_modified: RwLock::new(None),
            config_path: Some(path),
        };

        // Failure is already logged and replaced by defaults
        let _ = manager.reload();

        manager
    }

    /// 使用内存中的配置创建（无持久化文件）
    pub fn from_config(config: LinkerConfig) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
            last_modified: RwLock::new(None),
            config_path: None,
        }
    }

    /// 获取当前配置快照
    pub fn load(&self) -> Arc<LinkerConfig> {
        let guard = self.config.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// 整体替换配置快照（管理端保存配置时调用）
    pub fn replace(&self, config: LinkerConfig) {
        let mut guard = self.config.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(config);
    }

    /// 配置文件路径
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// 从配置文件重新加载
    ///
    /// 失败时安装默认设置和空词典并返回错误
    pub fn reload(&self) -> AutolinkResult<()> {
        let Some(path) = self.config_path.as_deref() else {
            return Ok(());
        };

        let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok();

        match Self::load_from_file(path) {
            Ok(file) => {
                let config = LinkerConfig::from_file(file, true);
                tracing::info!(
                    "加载配置文件: {} ({} 个关键词)",
                    path.display(),
                    config.dictionary.len()
                );
                self.replace(config);
                *self.last_modified.write().unwrap_or_else(|e| e.into_inner()) = modified;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("配置加载失败，使用默认配置和空词典: {}", e);
                let mut settings = Settings::default();
                settings.apply_env_overrides();
                self.replace(LinkerConfig::new(settings, Vec::new()));
                *self.last_modified.write().unwrap_or_else(|e| e.into_inner()) = modified;
                Err(e)
            }
        }
    }

    /// 配置文件修改时间变化时才重新加载
    pub fn reload_if_changed(&self) -> AutolinkResult<bool> {
        let Some(path) = self.config_path.as_deref() else {
            return Ok(false);
        };

        let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok();
        let last = *self.last_modified.read().unwrap_or_else(|e| e.into_inner());

        if modified.is_some() && modified == last {
            return Ok(false);
        }

        self.reload()?;
        Ok(true)
    }

    /// 从指定文件读取配置
    ///
    /// `.toml` 扩展名按 TOML 解析，其他按 JSON 解析
    pub fn load_from_file(path: &Path) -> AutolinkResult<ConfigFile> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AutolinkError::Config(format!("读取配置文件 {} 失败: {}", path.display(), e))
        })?;

        if path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
            toml::from_str(&content)
                .map_err(|e| AutolinkError::Config(format!("解析TOML配置失败: {}", e)))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| AutolinkError::Config(format!("解析JSON配置失败: {}", e)))
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &Path) -> AutolinkResult<()> {
        let example = ConfigFile {
            settings: Settings::default(),
            keywords: vec![
                KeywordEntry::new("estate planning", "/services/estate-planning"),
                KeywordEntry::new("lasting power of attorney", "/services/power-of-attorney"),
            ],
        };

        let content = if path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
            toml::to_string_pretty(&example)
                .map_err(|e| AutolinkError::Config(format!("序列化配置失败: {}", e)))?
        } else {
            serde_json::to_string_pretty(&example)
                .map_err(|e| AutolinkError::Config(format!("序列化配置失败: {}", e)))?
        };

        std::fs::write(path, content)?;

        Ok(())
    }

    /// 按搜索路径查找配置文件
    fn find_config_file() -> Option<PathBuf> {
        constants::CONFIG_PATHS
            .iter()
            .map(|path| PathBuf::from(shellexpand::tilde(path).as_ref()))
            .find(|path| path.exists())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
