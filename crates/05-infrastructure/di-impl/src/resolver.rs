//! 自动装配候选解析器
//!
//! 每个候选文件构造一个解析器。名称推导在构造时完成；类型描述与注解查询
//! 在第一次用到时执行并缓存在实例上，实例之间不共享任何状态。

use crate::naming;
use di_abstractions::{
    AnnotationHandle, AnnotationInstance, AutowireCandidate, CandidateFile, TypeDescriptor,
    TypeIntrospector,
};
use infrastructure_common::{ArgumentValue, Capability, ParameterList, QualifiedName, ResolverOptions};
use once_cell::unsync::OnceCell;
use std::sync::Arc;
use tracing::{debug, warn};

/// 类型描述与匹配注解
struct Resolution {
    descriptor: Option<Arc<dyn TypeDescriptor>>,
    annotations: Vec<Arc<dyn AnnotationHandle>>,
}

impl Resolution {
    fn unresolved() -> Self {
        Self {
            descriptor: None,
            annotations: Vec::new(),
        }
    }
}

/// 候选解析器
///
/// 所有查询都不返回错误：文件不可读、类型不存在或加载失败、注解缺少访问器，
/// 都降级为否定或空结果，批量扫描不会因为单个文件中断。
pub struct CandidateResolver<'a> {
    file: &'a CandidateFile,
    marker: &'a Capability,
    introspector: &'a dyn TypeIntrospector,
    eligible: bool,
    qualified_name: Option<QualifiedName>,
    resolution: OnceCell<Resolution>,
    marker_instance: OnceCell<Option<Arc<dyn AnnotationInstance>>>,
}

impl<'a> CandidateResolver<'a> {
    /// 使用默认选项创建解析器
    pub fn new(
        file: &'a CandidateFile,
        marker: &'a Capability,
        introspector: &'a dyn TypeIntrospector,
    ) -> Self {
        Self::with_options(file, marker, introspector, &ResolverOptions::default())
    }

    /// 使用指定选项创建解析器，立即推导全限定名
    pub fn with_options(
        file: &'a CandidateFile,
        marker: &'a Capability,
        introspector: &'a dyn TypeIntrospector,
        options: &ResolverOptions,
    ) -> Self {
        let eligible = naming::is_source_file(&file.file_name(), options);
        let qualified_name = naming::derive_qualified_name(file, options);

        Self {
            file,
            marker,
            introspector,
            eligible,
            qualified_name,
            resolution: OnceCell::new(),
            marker_instance: OnceCell::new(),
        }
    }

    /// 标记能力
    pub fn marker(&self) -> &Capability {
        self.marker
    }

    /// 描述类型并查询匹配的注解，只执行一次
    fn resolution(&self) -> Option<&Resolution> {
        let qualified_name = self.qualified_name.as_ref()?;
        Some(self.resolution.get_or_init(|| {
            match self.introspector.describe(qualified_name) {
                Ok(descriptor) => {
                    let annotations = descriptor.annotations_matching(self.marker);
                    debug!(
                        "类型 {} 匹配到 {} 个 {} 注解",
                        qualified_name,
                        annotations.len(),
                        self.marker
                    );
                    Resolution {
                        descriptor: Some(descriptor),
                        annotations,
                    }
                }
                Err(e) => {
                    debug!("无法描述类型 {}: {}", qualified_name, e);
                    Resolution::unresolved()
                }
            }
        }))
    }

    /// 第一个匹配注解的实例，只实例化一次
    fn marker_instance(&self) -> Option<&Arc<dyn AnnotationInstance>> {
        self.marker_instance
            .get_or_init(|| {
                let handle = self.resolution()?.annotations.first()?;
                match handle.invoke() {
                    Ok(instance) => Some(instance),
                    Err(e) => {
                        warn!(
                            "注解实例化失败 {} ({}): {}",
                            handle.type_name(),
                            self.file.path().display(),
                            e
                        );
                        None
                    }
                }
            })
            .as_ref()
    }
}

impl AutowireCandidate for CandidateResolver<'_> {
    fn file(&self) -> &CandidateFile {
        self.file
    }

    fn qualified_name(&self) -> Option<&QualifiedName> {
        self.qualified_name.as_ref()
    }

    fn is_eligible_file(&self) -> bool {
        self.eligible
    }

    fn has_marker(&self) -> bool {
        self.resolution()
            .is_some_and(|resolution| !resolution.annotations.is_empty())
    }

    fn qualified_name_override(&self) -> Option<String> {
        self.marker_instance()?
            .qualified_name_override()?
            .qualified_name()
    }

    fn custom_constructor_arguments(&self) -> Vec<ArgumentValue> {
        self.marker_instance()
            .and_then(|instance| instance.custom_constructor_arguments())
            .map(|accessor| accessor.custom_constructor_arguments())
            .unwrap_or_default()
    }

    fn constructor_signature(&self) -> Option<ParameterList> {
        self.resolution()?
            .descriptor
            .as_ref()
            .map(|descriptor| descriptor.constructor_signature())
    }
}
