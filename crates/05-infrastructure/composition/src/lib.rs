//! # 基础设施组合层
//!
//! 将候选解析器与类型目录组合成可以批量运行的扫描器，并提供统一的日志初始化。
//!
//! ## 主要功能
//!
//! - **组件扫描**: 对一批文件并发解析，汇总可装配组件与跳过原因
//! - **日志初始化**: 开发与生产两套预设的 tracing 订阅者配置
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use di_abstractions::ComponentScanner;
//! use di_impl::TypeCatalog;
//! use infrastructure_common::ScanSettings;
//! use infrastructure_composition::{init_logging, AutowireScanner, LoggingConfig};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging(&LoggingConfig::development())?;
//!
//!     let catalog = TypeCatalog::from_json_file("catalog.json")?;
//!     let settings = ScanSettings::from_file("autowire.toml")?;
//!     let scanner = AutowireScanner::new(Arc::new(catalog), settings);
//!
//!     let report = scanner.scan(&[PathBuf::from("src/UserRepository.php")]).await?;
//!     println!("发现 {} 个组件", report.candidates.len());
//!
//!     Ok(())
//! }
//! ```

pub mod component_scanner;
pub mod logging;

// 重新导出主要类型
pub use component_scanner::{AutowireScanner, FileOutcome};
pub use logging::{init_logging, parse_log_level, LoggingConfig};

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;

#[cfg(test)]
mod tests;
