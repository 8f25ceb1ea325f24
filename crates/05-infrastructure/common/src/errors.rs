//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// 类型内省错误
///
/// 由类型目录在描述类型或实例化注解时返回。候选解析器会吸收这些错误，
/// 将其转换为否定结果。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntrospectionError {
    #[error("类型不存在: {type_name}")]
    NotFound { type_name: String },

    #[error("类型加载失败: {type_name}, 原因: {reason}")]
    LoadFailed { type_name: String, reason: String },

    #[error("类型定义无效: {type_name}, 原因: {reason}")]
    Malformed { type_name: String, reason: String },

    #[error("注解实例化失败: {annotation}, 原因: {reason}")]
    AnnotationInstantiation { annotation: String, reason: String },
}

impl IntrospectionError {
    /// 创建类型不存在错误
    pub fn not_found(type_name: impl Into<String>) -> Self {
        Self::NotFound {
            type_name: type_name.into(),
        }
    }

    /// 是否为类型不存在
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// 组件错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("组件扫描失败: {message}")]
    ScanError { message: String },

    #[error("组件元数据无效: {message}")]
    InvalidMetadata { message: String },
}

impl ComponentError {
    /// 创建扫描错误
    pub fn scan_error(message: impl Into<String>) -> Self {
        Self::ScanError {
            message: message.into(),
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ComponentResult<T> = Result<T, ComponentError>;
pub type IntrospectionResult<T> = Result<T, IntrospectionError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
