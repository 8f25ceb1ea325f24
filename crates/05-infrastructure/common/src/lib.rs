//! # Infrastructure Common
//!
//! 自动装配（autowire）候选解析的公共数据模型、错误类型与配置。
//!
//! ## 核心类型
//!
//! - [`QualifiedName`] - 由命名空间前缀与本地标识符组成的全限定类型名
//! - [`Capability`] - 标记注解的能力标识（注解类型或其实现的接口）
//! - [`ParameterList`] - 构造函数参数元数据
//! - [`ResolvedDescriptor`] - 提供给容器的解析结果
//! - [`ScanSettings`] - 扫描与解析配置
//!
//! ## 设计原则
//!
//! - 解析过程中的失败一律降级为否定结果，不向调用方抛出
//! - 类型目录显式传入，不依赖隐式的全局状态

pub mod configuration;
pub mod errors;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use metadata::*;
