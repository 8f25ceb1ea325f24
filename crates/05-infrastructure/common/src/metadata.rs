//! 元数据定义
//!
//! 提供全限定类型名、注解能力标识、构造函数参数与解析结果等元数据

use serde::{Deserialize, Serialize};
use std::fmt;

/// 默认的命名空间分隔符
pub const DEFAULT_NAMESPACE_SEPARATOR: &str = "\\";

/// 预置构造参数的值
///
/// 注解中声明的参数可以是任意字面量，直接以 JSON 值表示
pub type ArgumentValue = serde_json::Value;

/// 计算类型查找键
///
/// 去掉一个前导分隔符并转换为 ASCII 小写，与宿主语言的类名解析规则一致。
pub fn normalize_type_key(name: &str, separator: &str) -> String {
    let trimmed = if separator.is_empty() {
        name
    } else {
        name.strip_prefix(separator).unwrap_or(name)
    };
    trimmed.to_ascii_lowercase()
}

/// 全限定类型名
///
/// 由命名空间前缀、分隔符和本地标识符组成。没有命名空间声明时前缀为空，
/// 名称以分隔符开头（例如 `\ClassName`）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// 直接从字符串创建
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 组合前缀、分隔符和本地标识符
    pub fn compose(prefix: &str, separator: &str, local: &str) -> Self {
        let mut name = String::with_capacity(prefix.len() + separator.len() + local.len());
        name.push_str(prefix);
        name.push_str(separator);
        name.push_str(local);
        Self(name)
    }

    /// 获取字符串表示
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 类型目录中的查找键
    pub fn lookup_key(&self, separator: &str) -> String {
        normalize_type_key(&self.0, separator)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for QualifiedName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 注解能力标识
///
/// 标记一个类可以被自动装配的注解类型或接口名。注解本身的类型与之相同，
/// 或者注解声明的能力集合中包含它，都视为匹配。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    /// 创建能力标识
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 获取字符串表示
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 检查类型名是否指向同一能力
    pub fn matches(&self, type_name: &str, separator: &str) -> bool {
        normalize_type_key(&self.0, separator) == normalize_type_key(type_name, separator)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// 构造函数参数信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// 参数名
    pub name: String,
    /// 类型提示
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
    /// 是否可为空
    #[serde(default)]
    pub nullable: bool,
    /// 是否有默认值
    #[serde(default)]
    pub has_default: bool,
    /// 是否为可变参数
    #[serde(default)]
    pub variadic: bool,
    /// 是否为构造器属性提升参数
    #[serde(default)]
    pub promoted: bool,
}

impl ParameterInfo {
    /// 创建新的参数信息
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            nullable: false,
            has_default: false,
            variadic: false,
            promoted: false,
        }
    }

    /// 设置类型提示
    pub fn with_type(mut self, type_hint: impl Into<String>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }

    /// 设置为有默认值
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// 设置为可变参数
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// 设置为属性提升参数
    pub fn promoted(mut self) -> Self {
        self.promoted = true;
        self
    }

    /// 调用方是否必须提供该参数
    pub fn is_required(&self) -> bool {
        !self.has_default && !self.variadic
    }
}

/// 构造函数参数列表（按声明顺序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterList(Vec<ParameterInfo>);

impl ParameterList {
    /// 创建空参数列表
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// 追加参数
    pub fn with_parameter(mut self, parameter: ParameterInfo) -> Self {
        self.0.push(parameter);
        self
    }

    /// 参数数量
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 是否没有参数
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 遍历参数
    pub fn iter(&self) -> std::slice::Iter<'_, ParameterInfo> {
        self.0.iter()
    }

    /// 按名称查找参数
    pub fn get(&self, name: &str) -> Option<&ParameterInfo> {
        self.0.iter().find(|parameter| parameter.name == name)
    }

    /// 必须提供的参数数量
    pub fn required_count(&self) -> usize {
        self.0.iter().filter(|parameter| parameter.is_required()).count()
    }
}

impl From<Vec<ParameterInfo>> for ParameterList {
    fn from(parameters: Vec<ParameterInfo>) -> Self {
        Self(parameters)
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a ParameterInfo;
    type IntoIter = std::slice::Iter<'a, ParameterInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// 候选解析结果
///
/// 容器据此构建实例：注册名、预置构造参数以及构造函数签名。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDescriptor {
    /// 由文件推导出的全限定名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<QualifiedName>,
    /// 标记注解提供的覆盖名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name_override: Option<String>,
    /// 标记注解提供的预置构造参数
    #[serde(default)]
    pub custom_constructor_arguments: Vec<ArgumentValue>,
    /// 构造函数签名，类型无法描述时为空
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor_signature: Option<ParameterList>,
    /// 是否可以自动装配
    pub is_autowirable: bool,
}

impl ResolvedDescriptor {
    /// 创建不可装配的结果
    pub fn not_autowirable(qualified_name: Option<QualifiedName>) -> Self {
        Self {
            qualified_name,
            qualified_name_override: None,
            custom_constructor_arguments: Vec::new(),
            constructor_signature: None,
            is_autowirable: false,
        }
    }

    /// 容器注册使用的名称：优先使用覆盖名，否则使用推导名
    pub fn registration_name(&self) -> Option<&str> {
        self.qualified_name_override
            .as_deref()
            .or_else(|| self.qualified_name.as_ref().map(QualifiedName::as_str))
    }
}
