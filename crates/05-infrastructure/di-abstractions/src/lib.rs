//! # Dependency Injection Abstractions
//!
//! 自动装配候选解析的抽象层，定义宿主运行时需要提供的类型内省能力，
//! 以及面向容器的解析与扫描接口。
//!
//! ## 核心接口
//!
//! - [`TypeIntrospector`] - 按全限定名描述类型
//! - [`TypeDescriptor`] - 类型上的注解与构造函数签名
//! - [`AnnotationHandle`] / [`AnnotationInstance`] - 注解句柄与实例化后的注解
//! - [`AutowireCandidate`] - 单个候选文件的解析查询
//! - [`ComponentScanner`] - 批量扫描候选文件

pub mod annotation;
pub mod candidate;
pub mod introspector;
pub mod resolver;
pub mod scanner;

pub use annotation::*;
pub use candidate::*;
pub use introspector::*;
pub use resolver::*;
pub use scanner::*;
