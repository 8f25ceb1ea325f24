//! 扫描器并发扫描集成测试

use crate::component_scanner::AutowireScanner;
use crate::logging::{init_logging, LoggingConfig};
use di_abstractions::{ComponentScanner, SkipReason};
use di_impl::{AnnotationDeclaration, TypeCatalog, TypeDeclaration};
use infrastructure_common::{ParameterInfo, ParameterList, ScanSettings};
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Arc, Once};
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        init_logging(&LoggingConfig::development()).ok(); // 忽略初始化失败的错误
    });
}

const AUTOWIRE: &str = "App\\Attribute\\Autowire";

fn catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    for index in 0..8 {
        catalog
            .register(
                TypeDeclaration::new(format!("App\\Handler\\Handler{index}"))
                    .with_annotation(
                        AnnotationDeclaration::new("App\\Attribute\\AsHandler")
                            .implements(AUTOWIRE)
                            .with_arguments(vec![json!(index)]),
                    )
                    .with_constructor(
                        ParameterList::new().with_parameter(ParameterInfo::new("priority")),
                    ),
            )
            .unwrap();
    }
    catalog
        .register(TypeDeclaration::new("App\\Handler\\Unmarked"))
        .unwrap();
    catalog
}

fn write_sources(dir: &TempDir) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for index in 0..8 {
        let path = dir.path().join(format!("Handler{index}.php"));
        std::fs::write(&path, "<?php\n\nnamespace App\\Handler;\n").unwrap();
        files.push(path);
    }

    let unmarked = dir.path().join("Unmarked.php");
    std::fs::write(&unmarked, "<?php\n\nnamespace App\\Handler;\n").unwrap();
    files.push(unmarked);

    let fixture = dir.path().join("handlers.json");
    std::fs::write(&fixture, "{}").unwrap();
    files.push(fixture);
    files
}

/// 并发扫描与顺序扫描结果一致
#[tokio::test]
async fn test_concurrent_scan_matches_sequential_scan() {
    init_test_logger();

    let dir = tempfile::tempdir().unwrap();
    let files = write_sources(&dir);
    let scanner = AutowireScanner::new(Arc::new(catalog()), ScanSettings::new(AUTOWIRE));

    let concurrent = scanner.scan(&files).await.unwrap();
    let sequential = scanner.scan_files(&files);

    assert_eq!(concurrent, sequential);
    assert_eq!(concurrent.candidates.len(), 8);
    assert_eq!(concurrent.skipped_by(SkipReason::MarkerMissing), 1);
    assert_eq!(concurrent.skipped_by(SkipReason::NotSourceFile), 1);
}

/// 并发扫描保持输入顺序
#[tokio::test]
async fn test_concurrent_scan_preserves_order() {
    init_test_logger();

    let dir = tempfile::tempdir().unwrap();
    let files = write_sources(&dir);
    let scanner = AutowireScanner::new(Arc::new(catalog()), ScanSettings::new(AUTOWIRE));

    let report = scanner.scan(&files).await.unwrap();
    for (index, candidate) in report.candidates.iter().enumerate() {
        let expected = format!("App\\Handler\\Handler{index}");
        assert_eq!(candidate.registration_name(), Some(expected.as_str()));
        assert_eq!(candidate.custom_constructor_arguments, vec![json!(index)]);
    }
}

/// 空文件列表
#[tokio::test]
async fn test_scan_empty_list() {
    let scanner = AutowireScanner::new(Arc::new(TypeCatalog::new()), ScanSettings::new(AUTOWIRE));
    let report = scanner.scan(&[]).await.unwrap();
    assert_eq!(report.total(), 0);
}
