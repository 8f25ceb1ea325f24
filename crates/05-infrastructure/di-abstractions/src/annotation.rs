//! 注解实例抽象
//!
//! 标记注解可以选择性地提供两种能力：覆盖注册名、预置构造参数。
//! 解析器在调用前先探测实例是否具备对应能力。

use infrastructure_common::ArgumentValue;
use std::fmt::Debug;

/// 实例化后的注解
pub trait AnnotationInstance: Debug + Send + Sync {
    /// 注解类型名
    fn type_name(&self) -> &str;

    /// 探测覆盖名能力
    fn qualified_name_override(&self) -> Option<&dyn QualifiedNameOverride> {
        None
    }

    /// 探测预置构造参数能力
    fn custom_constructor_arguments(&self) -> Option<&dyn CustomConstructorArguments> {
        None
    }
}

/// 覆盖注册名能力
pub trait QualifiedNameOverride {
    /// 注解声明的覆盖名，声明为空值时返回 `None`
    fn qualified_name(&self) -> Option<String>;
}

/// 预置构造参数能力
pub trait CustomConstructorArguments {
    /// 按声明顺序返回预置参数
    fn custom_constructor_arguments(&self) -> Vec<ArgumentValue>;
}
