//! 日志初始化

use infrastructure_common::{InfrastructureError, InfrastructureResult};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别（`RUST_LOG` 存在时以其为准）
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
    /// 是否输出到标准错误（标准输出留给扫描结果）
    pub to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
            to_stderr: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
            to_stderr: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
            to_stderr: false,
        }
    }

    /// 设置日志级别
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// 输出到标准错误
    pub fn with_stderr(mut self) -> Self {
        self.to_stderr = true;
        self
    }
}

/// 解析日志级别，无法识别时使用 INFO
pub fn parse_log_level(level: &str) -> tracing::Level {
    level.parse().unwrap_or(tracing::Level::INFO)
}

/// 初始化全局日志订阅者
///
/// 全局订阅者只能设置一次，重复调用返回 `BootstrapFailed`。
pub fn init_logging(config: &LoggingConfig) -> InfrastructureResult<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level).into())
        .from_env_lossy();

    let writer = if config.to_stderr {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    if config.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| InfrastructureError::BootstrapFailed {
        message: format!("日志初始化失败: {}", e),
    })?;

    info!("日志系统初始化完成");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug"), tracing::Level::DEBUG);
        assert_eq!(parse_log_level("WARN"), tracing::Level::WARN);
        assert_eq!(parse_log_level("verbose"), tracing::Level::INFO);
    }

    #[test]
    fn test_presets() {
        assert!(LoggingConfig::production().json_format);
        assert_eq!(LoggingConfig::development().level, tracing::Level::DEBUG);
        assert!(LoggingConfig::default().with_level(tracing::Level::TRACE).with_stderr().to_stderr);
    }
}
