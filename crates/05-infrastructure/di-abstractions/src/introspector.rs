//! 类型内省抽象接口
//!
//! 由宿主提供：按全限定名加载并描述类型，查询类型上的注解。

use crate::annotation::AnnotationInstance;
use infrastructure_common::{Capability, IntrospectionResult, ParameterList, QualifiedName};
use std::fmt::Debug;
use std::sync::Arc;

/// 类型内省器 trait
///
/// 实现必须可重入：多个解析器可以在不同线程上同时调用 [`describe`](Self::describe)。
pub trait TypeIntrospector: Send + Sync {
    /// 描述指定类型
    ///
    /// 未知的名称返回 `IntrospectionError::NotFound`，不能 panic。
    fn describe(&self, name: &QualifiedName) -> IntrospectionResult<Arc<dyn TypeDescriptor>>;

    /// 获取内省器名称
    fn name(&self) -> &str;
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for Arc<T> {
    fn describe(&self, name: &QualifiedName) -> IntrospectionResult<Arc<dyn TypeDescriptor>> {
        (**self).describe(name)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// 类型描述
pub trait TypeDescriptor: Debug + Send + Sync {
    /// 类型的全限定名
    fn qualified_name(&self) -> &QualifiedName;

    /// 查询满足指定能力的注解，按声明顺序返回
    ///
    /// 注解类型与能力相同，或者注解的能力集合包含该能力，都视为匹配。
    fn annotations_matching(&self, capability: &Capability) -> Vec<Arc<dyn AnnotationHandle>>;

    /// 主构造函数的参数列表，未声明构造函数时为空列表
    fn constructor_signature(&self) -> ParameterList;
}

/// 注解句柄
///
/// 指向类型上声明的一个注解，调用 [`invoke`](Self::invoke) 时才实例化。
pub trait AnnotationHandle: Debug + Send + Sync {
    /// 注解类型名
    fn type_name(&self) -> &str;

    /// 使用源码中声明的参数实例化注解
    fn invoke(&self) -> IntrospectionResult<Arc<dyn AnnotationInstance>>;
}
