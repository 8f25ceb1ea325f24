//! 扫描与解析配置

use crate::errors::{ConfigError, ConfigResult};
use crate::metadata::{Capability, DEFAULT_NAMESPACE_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// 名称推导选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// 源文件标记，文件名包含该标记才被视为候选源文件
    pub source_marker: String,
    /// 命名空间声明关键字
    pub namespace_keyword: String,
    /// 命名空间分隔符，必须与类型目录的分隔符一致
    pub namespace_separator: String,
    /// 语句结束符
    pub statement_terminator: char,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            source_marker: ".php".to_string(),
            namespace_keyword: "namespace".to_string(),
            namespace_separator: DEFAULT_NAMESPACE_SEPARATOR.to_string(),
            statement_terminator: ';',
        }
    }
}

impl ResolverOptions {
    /// 验证选项
    pub fn validate(&self) -> ConfigResult<()> {
        if self.source_marker.is_empty() {
            return Err(ConfigError::validation("resolver.source_marker 不能为空"));
        }
        if self.namespace_keyword.trim().is_empty() {
            return Err(ConfigError::validation("resolver.namespace_keyword 不能为空"));
        }
        if self.namespace_separator.is_empty() {
            return Err(ConfigError::validation("resolver.namespace_separator 不能为空"));
        }
        Ok(())
    }
}

/// 扫描配置
///
/// ```toml
/// marker_capability = "App\\Attribute\\Autowire"
///
/// [resolver]
/// source_marker = ".php"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    /// 标记类可自动装配的注解能力
    pub marker_capability: Capability,
    /// 名称推导选项
    #[serde(default)]
    pub resolver: ResolverOptions,
}

impl ScanSettings {
    /// 使用默认解析选项创建配置
    pub fn new(marker_capability: impl Into<String>) -> Self {
        Self {
            marker_capability: Capability::new(marker_capability),
            resolver: ResolverOptions::default(),
        }
    }

    /// 设置解析选项
    pub fn with_resolver(mut self, resolver: ResolverOptions) -> Self {
        self.resolver = resolver;
        self
    }

    /// 从 TOML 字符串加载
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// 从 TOML 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("加载扫描配置: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.marker_capability.as_str().trim().is_empty() {
            return Err(ConfigError::validation("marker_capability 不能为空"));
        }
        self.resolver.validate()
    }
}
