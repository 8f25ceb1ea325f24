//! 组件扫描功能
//!
//! 对一批候选文件逐个构造解析器，汇总可装配的组件，并为每个被跳过的
//! 文件记录原因。

use async_trait::async_trait;
use di_abstractions::{
    AutowireCandidate, CandidateFile, ComponentScanner, ScanReport, SkipReason, SkippedFile,
    TypeIntrospector,
};
use di_impl::{naming, CandidateResolver, TypeCatalog};
use infrastructure_common::{
    ComponentError, ConfigError, InfrastructureResult, ResolvedDescriptor, ScanSettings,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// 单个文件的扫描结果
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// 可以自动装配
    Candidate(ResolvedDescriptor),
    /// 被跳过
    Skipped(SkippedFile),
}

impl FileOutcome {
    fn record(self, report: &mut ScanReport) {
        match self {
            FileOutcome::Candidate(descriptor) => report.candidates.push(descriptor),
            FileOutcome::Skipped(skipped) => report.skipped.push(skipped),
        }
    }
}

/// 自动装配扫描器
///
/// 类型目录在扫描期间只读，因此多个文件可以在不同的工作线程上同时解析。
pub struct AutowireScanner {
    introspector: Arc<dyn TypeIntrospector>,
    settings: Arc<ScanSettings>,
}

impl AutowireScanner {
    /// 创建新的扫描器
    pub fn new(introspector: Arc<dyn TypeIntrospector>, settings: ScanSettings) -> Self {
        Self {
            introspector,
            settings: Arc::new(settings),
        }
    }

    /// 从扫描配置文件（TOML）与类型目录清单（JSON）构建扫描器
    ///
    /// 清单的命名空间分隔符必须与扫描配置一致，否则推导出的名称无法在目录中查到。
    pub fn from_files<S, C>(settings_path: S, catalog_path: C) -> InfrastructureResult<Self>
    where
        S: AsRef<Path>,
        C: AsRef<Path>,
    {
        let settings = ScanSettings::from_file(settings_path)?;
        let catalog = TypeCatalog::from_json_file(catalog_path)?;

        let expected = settings.resolver.namespace_separator.as_str();
        if catalog.separator() != expected {
            return Err(ConfigError::validation(format!(
                "类型目录分隔符 `{}` 与扫描配置分隔符 `{}` 不一致",
                catalog.separator(),
                expected
            ))
            .into());
        }

        info!("类型目录已加载，共 {} 个类型", catalog.len());
        Ok(Self::new(Arc::new(catalog), settings))
    }

    /// 扫描配置
    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// 解析单个文件
    pub fn scan_file(&self, path: &Path) -> FileOutcome {
        resolve_path(path, &self.settings, self.introspector.as_ref())
    }

    /// 顺序扫描一批文件，结果顺序与输入一致
    pub fn scan_files<I, P>(&self, paths: I) -> ScanReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = ScanReport::new();
        for path in paths {
            self.scan_file(path.as_ref()).record(&mut report);
        }

        log_summary(&report);
        report
    }
}

#[async_trait]
impl ComponentScanner for AutowireScanner {
    async fn scan(&self, files: &[PathBuf]) -> Result<ScanReport, ComponentError> {
        debug!("开始并发扫描 {} 个文件", files.len());

        let tasks: Vec<_> = files
            .iter()
            .cloned()
            .map(|path| {
                let introspector = Arc::clone(&self.introspector);
                let settings = Arc::clone(&self.settings);
                tokio::task::spawn_blocking(move || {
                    resolve_path(&path, &settings, introspector.as_ref())
                })
            })
            .collect();

        let mut report = ScanReport::new();
        for task in tasks {
            let outcome = task
                .await
                .map_err(|e| ComponentError::scan_error(format!("扫描任务失败: {}", e)))?;
            outcome.record(&mut report);
        }

        log_summary(&report);
        Ok(report)
    }

    fn name(&self) -> &str {
        "AutowireScanner"
    }

    fn supports(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| naming::is_source_file(&name.to_string_lossy(), &self.settings.resolver))
            .unwrap_or(false)
    }
}

/// 解析一个路径并归类
fn resolve_path(
    path: &Path,
    settings: &ScanSettings,
    introspector: &dyn TypeIntrospector,
) -> FileOutcome {
    let file = CandidateFile::new(path);
    let resolver = CandidateResolver::with_options(
        &file,
        &settings.marker_capability,
        introspector,
        &settings.resolver,
    );

    let reason = if !resolver.is_eligible_file() {
        Some(SkipReason::NotSourceFile)
    } else if resolver.qualified_name().is_none() {
        Some(SkipReason::NameUnresolved)
    } else if !resolver.has_marker() {
        Some(SkipReason::MarkerMissing)
    } else {
        None
    };

    if let Some(reason) = reason {
        debug!("跳过 {}: {}", path.display(), reason);
        return FileOutcome::Skipped(SkippedFile {
            path: path.to_path_buf(),
            reason,
        });
    }

    let descriptor = resolver.descriptor();
    info!(
        "发现可装配组件: {} ({})",
        descriptor.registration_name().unwrap_or_default(),
        path.display()
    );
    FileOutcome::Candidate(descriptor)
}

fn log_summary(report: &ScanReport) {
    info!(
        "扫描完成：共 {} 个文件，发现 {} 个组件，跳过 {} 个",
        report.total(),
        report.candidates.len(),
        report.skipped.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use di_impl::{AnnotationDeclaration, TypeDeclaration};
    use infrastructure_common::InfrastructureError;
    use std::fs;

    const AUTOWIRE: &str = "App\\Attribute\\Autowire";

    fn scanner() -> AutowireScanner {
        let catalog = TypeCatalog::new()
            .with_type(
                TypeDeclaration::new("App\\Service\\Mailer").with_annotation(
                    AnnotationDeclaration::new(AUTOWIRE)
                        .with_qualified_name(Some("mailer".to_string())),
                ),
            )
            .unwrap()
            .with_type(TypeDeclaration::new("App\\Service\\Plain"))
            .unwrap();

        AutowireScanner::new(Arc::new(catalog), ScanSettings::new(AUTOWIRE))
    }

    #[test]
    fn test_scan_files_classifies_each_file() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = dir.path().join("Mailer.php");
        let plain = dir.path().join("Plain.php");
        let readme = dir.path().join("README.md");
        let missing = dir.path().join("Gone.php");
        fs::write(&mailer, "<?php\nnamespace App\\Service;\n").unwrap();
        fs::write(&plain, "<?php\nnamespace App\\Service;\n").unwrap();
        fs::write(&readme, "# docs\n").unwrap();

        let report = scanner().scan_files([&mailer, &plain, &readme, &missing]);

        assert_eq!(report.total(), 4);
        assert_eq!(report.candidates.len(), 1);
        assert!(report.find("mailer").is_some());
        assert_eq!(report.skipped_by(SkipReason::MarkerMissing), 1);
        assert_eq!(report.skipped_by(SkipReason::NotSourceFile), 1);
        assert_eq!(report.skipped_by(SkipReason::NameUnresolved), 1);
        assert_eq!(report.skipped[0].path, plain);
    }

    const JAVA_SETTINGS: &str = r#"
marker_capability = "com.shop.Autowire"

[resolver]
source_marker = ".java"
namespace_keyword = "package"
namespace_separator = "."
"#;

    #[test]
    fn test_from_files_rejects_separator_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("autowire.toml");
        let catalog = dir.path().join("catalog.json");
        fs::write(&settings, JAVA_SETTINGS).unwrap();
        fs::write(&catalog, r#"{ "types": [ { "name": "com.shop.OrderService" } ] }"#).unwrap();

        let result = AutowireScanner::from_files(&settings, &catalog);
        assert!(matches!(
            result,
            Err(InfrastructureError::ConfigError {
                source: ConfigError::ValidationError { .. }
            })
        ));
    }

    #[test]
    fn test_from_files_with_matching_separator() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("autowire.toml");
        let catalog = dir.path().join("catalog.json");
        let source = dir.path().join("OrderService.java");
        fs::write(&settings, JAVA_SETTINGS).unwrap();
        fs::write(
            &catalog,
            r#"{
                "separator": ".",
                "types": [
                    {
                        "name": "com.shop.orders.OrderService",
                        "annotations": [ { "type_name": "com.shop.Autowire" } ]
                    }
                ]
            }"#,
        )
        .unwrap();
        fs::write(&source, "package com.shop.orders;\n").unwrap();

        let scanner = AutowireScanner::from_files(&settings, &catalog).unwrap();
        assert_eq!(scanner.settings().resolver.namespace_separator, ".");

        let report = scanner.scan_files([&source]);
        assert!(report.find("com.shop.orders.OrderService").is_some());
    }

    #[test]
    fn test_supports_source_files_only() {
        let scanner = scanner();
        assert!(scanner.supports(Path::new("src/Mailer.php")));
        assert!(!scanner.supports(Path::new("src/mailer.rs")));
        assert_eq!(scanner.name(), "AutowireScanner");
    }
}
