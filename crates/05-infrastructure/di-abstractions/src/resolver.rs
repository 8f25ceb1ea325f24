//! 候选解析器抽象接口
//!
//! 容器对每个候选文件按以下顺序调用：构造 → `can_autowire` →
//! （为真时）`qualified_name_override`、`custom_constructor_arguments`、`constructor_signature`。

use crate::candidate::CandidateFile;
use infrastructure_common::{ArgumentValue, ParameterList, QualifiedName, ResolvedDescriptor};

/// 自动装配候选 trait
///
/// 所有查询都不返回错误：任何失败都降级为否定或空结果。
pub trait AutowireCandidate {
    /// 候选文件
    fn file(&self) -> &CandidateFile;

    /// 推导出的全限定名，文件无法读取时为空
    fn qualified_name(&self) -> Option<&QualifiedName>;

    /// 文件名是否表明这是预期类型的源文件
    fn is_eligible_file(&self) -> bool;

    /// 类型是否带有标记注解
    fn has_marker(&self) -> bool;

    /// 第一个匹配注解提供的覆盖名
    fn qualified_name_override(&self) -> Option<String>;

    /// 第一个匹配注解提供的预置构造参数
    fn custom_constructor_arguments(&self) -> Vec<ArgumentValue>;

    /// 类型的构造函数签名，类型无法描述时为空
    fn constructor_signature(&self) -> Option<ParameterList>;

    /// 是否可以自动装配
    fn can_autowire(&self) -> bool {
        self.is_eligible_file() && self.qualified_name().is_some() && self.has_marker()
    }

    /// 组装解析结果
    fn descriptor(&self) -> ResolvedDescriptor {
        let qualified_name = self.qualified_name().cloned();
        if !self.can_autowire() {
            return ResolvedDescriptor::not_autowirable(qualified_name);
        }

        ResolvedDescriptor {
            qualified_name,
            qualified_name_override: self.qualified_name_override(),
            custom_constructor_arguments: self.custom_constructor_arguments(),
            constructor_signature: self.constructor_signature(),
            is_autowirable: true,
        }
    }
}
