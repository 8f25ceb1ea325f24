//! 内存类型目录
//!
//! 在发现阶段构建、随后只读的显式类型注册表，实现 [`TypeIntrospector`]。
//! 可以通过构建器 API 填充，也可以从 JSON 清单加载。

use di_abstractions::{
    AnnotationHandle, AnnotationInstance, CustomConstructorArguments, QualifiedNameOverride,
    TypeDescriptor, TypeIntrospector,
};
use infrastructure_common::{
    ArgumentValue, Capability, ComponentError, ComponentResult, ConfigError, ConfigResult,
    IntrospectionError, IntrospectionResult, ParameterList, QualifiedName,
    DEFAULT_NAMESPACE_SEPARATOR,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// 注解访问器
///
/// 注解类型提供哪些访问器在声明时就已确定，而不是每次调用时探测。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationAccessors {
    /// 不提供任何访问器
    #[default]
    Plain,
    /// 只提供覆盖名
    WithOverride { qualified_name: Option<String> },
    /// 只提供预置构造参数
    WithArguments { arguments: Vec<ArgumentValue> },
    /// 同时提供两者
    WithBoth {
        qualified_name: Option<String>,
        arguments: Vec<ArgumentValue>,
    },
}

impl AnnotationAccessors {
    fn qualified_name(&self) -> Option<Option<&String>> {
        match self {
            Self::WithOverride { qualified_name } | Self::WithBoth { qualified_name, .. } => {
                Some(qualified_name.as_ref())
            }
            _ => None,
        }
    }

    fn arguments(&self) -> Option<&[ArgumentValue]> {
        match self {
            Self::WithArguments { arguments } | Self::WithBoth { arguments, .. } => {
                Some(arguments.as_slice())
            }
            _ => None,
        }
    }
}

/// 类型上声明的注解
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDeclaration {
    /// 注解类型名
    pub type_name: String,
    /// 注解类型实现的能力（父类与接口）
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    /// 注解提供的访问器
    #[serde(default)]
    pub accessors: AnnotationAccessors,
    /// 实例化失败的原因
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instantiation_error: Option<String>,
}

impl AnnotationDeclaration {
    /// 创建不带访问器的注解声明
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            capabilities: Vec::new(),
            accessors: AnnotationAccessors::Plain,
            instantiation_error: None,
        }
    }

    /// 添加实现的能力
    pub fn implements(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(Capability::new(capability));
        self
    }

    /// 提供覆盖名访问器
    pub fn with_qualified_name(mut self, qualified_name: Option<String>) -> Self {
        self.accessors = match self.accessors {
            AnnotationAccessors::Plain | AnnotationAccessors::WithOverride { .. } => {
                AnnotationAccessors::WithOverride { qualified_name }
            }
            AnnotationAccessors::WithArguments { arguments }
            | AnnotationAccessors::WithBoth { arguments, .. } => AnnotationAccessors::WithBoth {
                qualified_name,
                arguments,
            },
        };
        self
    }

    /// 提供预置构造参数访问器
    pub fn with_arguments(mut self, arguments: Vec<ArgumentValue>) -> Self {
        self.accessors = match self.accessors {
            AnnotationAccessors::Plain | AnnotationAccessors::WithArguments { .. } => {
                AnnotationAccessors::WithArguments { arguments }
            }
            AnnotationAccessors::WithOverride { qualified_name }
            | AnnotationAccessors::WithBoth { qualified_name, .. } => AnnotationAccessors::WithBoth {
                qualified_name,
                arguments,
            },
        };
        self
    }

    /// 标记为实例化失败
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.instantiation_error = Some(reason.into());
        self
    }

    /// 检查注解是否满足能力（类型相同或能力集合包含）
    pub fn satisfies(&self, capability: &Capability, separator: &str) -> bool {
        capability.matches(&self.type_name, separator)
            || self
                .capabilities
                .iter()
                .any(|declared| capability.matches(declared.as_str(), separator))
    }
}

/// 类型加载状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeStatus {
    /// 可以正常加载
    #[default]
    Loadable,
    /// 类型存在但加载失败
    LoadFailed { reason: String },
    /// 类型定义无效
    Malformed { reason: String },
}

/// 类型声明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// 全限定名
    pub name: QualifiedName,
    /// 按声明顺序排列的注解
    #[serde(default)]
    pub annotations: Vec<AnnotationDeclaration>,
    /// 主构造函数参数
    #[serde(default)]
    pub constructor: ParameterList,
    /// 加载状态
    #[serde(default)]
    pub status: TypeStatus,
}

impl TypeDeclaration {
    /// 创建新的类型声明
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            constructor: ParameterList::new(),
            status: TypeStatus::Loadable,
        }
    }

    /// 添加注解
    pub fn with_annotation(mut self, annotation: AnnotationDeclaration) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// 设置构造函数参数
    pub fn with_constructor(mut self, constructor: ParameterList) -> Self {
        self.constructor = constructor;
        self
    }

    /// 设置加载状态
    pub fn with_status(mut self, status: TypeStatus) -> Self {
        self.status = status;
        self
    }
}

/// 目录清单（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogManifest {
    #[serde(default = "default_separator")]
    separator: String,
    #[serde(default)]
    types: Vec<TypeDeclaration>,
}

fn default_separator() -> String {
    DEFAULT_NAMESPACE_SEPARATOR.to_string()
}

/// 内存类型目录
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    separator: String,
    types: HashMap<String, Arc<CatalogEntry>>,
}

impl TypeCatalog {
    /// 使用默认分隔符创建空目录
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_NAMESPACE_SEPARATOR)
    }

    /// 使用指定分隔符创建空目录
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            types: HashMap::new(),
        }
    }

    /// 注册类型声明
    ///
    /// 名称为空或与已注册的类型重名（忽略大小写与前导分隔符）时返回错误。
    pub fn register(&mut self, declaration: TypeDeclaration) -> ComponentResult<()> {
        let key = declaration.name.lookup_key(&self.separator);
        if key.is_empty() {
            return Err(ComponentError::InvalidMetadata {
                message: "类型名不能为空".to_string(),
            });
        }
        if self.types.contains_key(&key) {
            return Err(ComponentError::InvalidMetadata {
                message: format!("类型重复注册: {}", declaration.name),
            });
        }

        debug!("注册类型: {}", declaration.name);
        let entry = CatalogEntry {
            declaration,
            separator: self.separator.clone(),
        };
        self.types.insert(key, Arc::new(entry));
        Ok(())
    }

    /// 链式注册，便于测试与一次性构建
    pub fn with_type(mut self, declaration: TypeDeclaration) -> ComponentResult<Self> {
        self.register(declaration)?;
        Ok(self)
    }

    /// 命名空间分隔符，必须与名称推导使用的分隔符一致
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// 已注册的类型数量
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// 是否包含指定类型
    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.types.contains_key(&name.lookup_key(&self.separator))
    }

    /// 从 JSON 清单加载
    ///
    /// 清单未声明 `separator` 时使用 `\`，需与扫描配置的分隔符一致。
    ///
    /// ```json
    /// {
    ///   "types": [
    ///     {
    ///       "name": "App\\Repository\\UserRepository",
    ///       "annotations": [
    ///         { "type_name": "App\\Attribute\\Autowire",
    ///           "accessors": { "kind": "with_arguments", "arguments": ["readonly"] } }
    ///       ],
    ///       "constructor": [{ "name": "mode", "type_hint": "string" }]
    ///     }
    ///   ]
    /// }
    /// ```
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let manifest: CatalogManifest = serde_json::from_str(content)?;
        let mut catalog = Self::with_separator(manifest.separator);
        for declaration in manifest.types {
            catalog
                .register(declaration)
                .map_err(|e| ConfigError::validation(e.to_string()))?;
        }
        Ok(catalog)
    }

    /// 从 JSON 清单文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("加载类型目录清单: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeIntrospector for TypeCatalog {
    fn describe(&self, name: &QualifiedName) -> IntrospectionResult<Arc<dyn TypeDescriptor>> {
        let entry = self
            .types
            .get(&name.lookup_key(&self.separator))
            .ok_or_else(|| IntrospectionError::not_found(name.as_str()))?;

        match &entry.declaration.status {
            TypeStatus::Loadable => Ok(entry.clone() as Arc<dyn TypeDescriptor>),
            TypeStatus::LoadFailed { reason } => Err(IntrospectionError::LoadFailed {
                type_name: name.to_string(),
                reason: reason.clone(),
            }),
            TypeStatus::Malformed { reason } => Err(IntrospectionError::Malformed {
                type_name: name.to_string(),
                reason: reason.clone(),
            }),
        }
    }

    fn name(&self) -> &str {
        "TypeCatalog"
    }
}

/// 目录中的一个类型
#[derive(Debug)]
struct CatalogEntry {
    declaration: TypeDeclaration,
    separator: String,
}

impl TypeDescriptor for CatalogEntry {
    fn qualified_name(&self) -> &QualifiedName {
        &self.declaration.name
    }

    fn annotations_matching(&self, capability: &Capability) -> Vec<Arc<dyn AnnotationHandle>> {
        self.declaration
            .annotations
            .iter()
            .filter(|annotation| annotation.satisfies(capability, &self.separator))
            .map(|annotation| {
                Arc::new(DeclaredAnnotationHandle {
                    declaration: annotation.clone(),
                }) as Arc<dyn AnnotationHandle>
            })
            .collect()
    }

    fn constructor_signature(&self) -> ParameterList {
        self.declaration.constructor.clone()
    }
}

#[derive(Debug)]
struct DeclaredAnnotationHandle {
    declaration: AnnotationDeclaration,
}

impl AnnotationHandle for DeclaredAnnotationHandle {
    fn type_name(&self) -> &str {
        &self.declaration.type_name
    }

    fn invoke(&self) -> IntrospectionResult<Arc<dyn AnnotationInstance>> {
        if let Some(reason) = &self.declaration.instantiation_error {
            return Err(IntrospectionError::AnnotationInstantiation {
                annotation: self.declaration.type_name.clone(),
                reason: reason.clone(),
            });
        }

        Ok(Arc::new(DeclaredAnnotation {
            type_name: self.declaration.type_name.clone(),
            accessors: self.declaration.accessors.clone(),
        }))
    }
}

/// 实例化后的声明注解
#[derive(Debug, Clone)]
struct DeclaredAnnotation {
    type_name: String,
    accessors: AnnotationAccessors,
}

impl AnnotationInstance for DeclaredAnnotation {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn qualified_name_override(&self) -> Option<&dyn QualifiedNameOverride> {
        self.accessors
            .qualified_name()
            .map(|_| self as &dyn QualifiedNameOverride)
    }

    fn custom_constructor_arguments(&self) -> Option<&dyn CustomConstructorArguments> {
        self.accessors
            .arguments()
            .map(|_| self as &dyn CustomConstructorArguments)
    }
}

impl QualifiedNameOverride for DeclaredAnnotation {
    fn qualified_name(&self) -> Option<String> {
        self.accessors.qualified_name().flatten().cloned()
    }
}

impl CustomConstructorArguments for DeclaredAnnotation {
    fn custom_constructor_arguments(&self) -> Vec<ArgumentValue> {
        self.accessors.arguments().map(<[_]>::to_vec).unwrap_or_default()
    }
}
