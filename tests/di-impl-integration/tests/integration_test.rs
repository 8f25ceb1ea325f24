//! 自动装配解析的集中集成测试
//!
//! 覆盖宿主自定义内省器、清单驱动的批量扫描以及报告输出。

use di_abstractions::{
    AnnotationHandle, AnnotationInstance, CandidateFile, ComponentScanner, QualifiedNameOverride,
    SkipReason, TypeDescriptor, TypeIntrospector,
};
use di_impl::{AutowireCandidate, CandidateResolver};
use infrastructure_common::{
    Capability, IntrospectionError, IntrospectionResult, ParameterInfo, ParameterList,
    QualifiedName, ScanSettings,
};
use infrastructure_composition::AutowireScanner;
use serde_json::json;
use std::fs;
use std::sync::Arc;

const AUTOWIRE: &str = "App\\Attribute\\Autowire";

/// 宿主侧的内省器：只认识一个类型，注解只提供覆盖名能力
#[derive(Debug)]
struct HostIntrospector;

#[derive(Debug)]
struct HostDescriptor {
    name: QualifiedName,
}

#[derive(Debug)]
struct HostHandle;

#[derive(Debug)]
struct NamedAnnotation;

impl TypeIntrospector for HostIntrospector {
    fn describe(&self, name: &QualifiedName) -> IntrospectionResult<Arc<dyn TypeDescriptor>> {
        if name.as_str() == "App\\Mail\\Mailer" {
            Ok(Arc::new(HostDescriptor { name: name.clone() }))
        } else {
            Err(IntrospectionError::not_found(name.as_str()))
        }
    }

    fn name(&self) -> &str {
        "HostIntrospector"
    }
}

impl TypeDescriptor for HostDescriptor {
    fn qualified_name(&self) -> &QualifiedName {
        &self.name
    }

    fn annotations_matching(&self, capability: &Capability) -> Vec<Arc<dyn AnnotationHandle>> {
        if capability.as_str() == AUTOWIRE {
            vec![Arc::new(HostHandle)]
        } else {
            Vec::new()
        }
    }

    fn constructor_signature(&self) -> ParameterList {
        ParameterList::new().with_parameter(ParameterInfo::new("transport").with_type("Transport"))
    }
}

impl AnnotationHandle for HostHandle {
    fn type_name(&self) -> &str {
        AUTOWIRE
    }

    fn invoke(&self) -> IntrospectionResult<Arc<dyn AnnotationInstance>> {
        Ok(Arc::new(NamedAnnotation))
    }
}

impl AnnotationInstance for NamedAnnotation {
    fn type_name(&self) -> &str {
        AUTOWIRE
    }

    fn qualified_name_override(&self) -> Option<&dyn QualifiedNameOverride> {
        Some(self)
    }
}

impl QualifiedNameOverride for NamedAnnotation {
    fn qualified_name(&self) -> Option<String> {
        Some("mailer.default".to_string())
    }
}

#[test]
fn test_host_introspector_drives_resolver() {
    let file = CandidateFile::from_bytes("Mailer.php", "<?php\nnamespace App\\Mail;\nclass Mailer {}\n");
    let marker = Capability::new(AUTOWIRE);
    let resolver = CandidateResolver::new(&file, &marker, &HostIntrospector);

    assert!(resolver.can_autowire());
    assert_eq!(resolver.qualified_name_override().as_deref(), Some("mailer.default"));
    // 注解没有预置参数能力
    assert!(resolver.custom_constructor_arguments().is_empty());

    let descriptor = resolver.descriptor();
    assert_eq!(descriptor.registration_name(), Some("mailer.default"));
    assert_eq!(
        descriptor.constructor_signature.as_ref().map(ParameterList::len),
        Some(1)
    );
}

#[test]
fn test_host_introspector_unknown_type() {
    let file = CandidateFile::from_bytes("Transport.php", "<?php\nnamespace App\\Mail;\n");
    let marker = Capability::new(AUTOWIRE);
    let resolver = CandidateResolver::new(&file, &marker, &HostIntrospector);

    assert!(resolver.is_eligible_file());
    assert!(!resolver.has_marker());
    assert!(resolver.constructor_signature().is_none());
    assert!(!resolver.descriptor().is_autowirable);
}

const MANIFEST: &str = r#"{
    "types": [
        {
            "name": "App\\Repository\\UserRepository",
            "annotations": [
                {
                    "type_name": "App\\Attribute\\AsRepository",
                    "capabilities": ["App\\Attribute\\Autowire"],
                    "accessors": { "kind": "with_both", "qualified_name": "users", "arguments": ["readonly", 3] }
                },
                {
                    "type_name": "App\\Attribute\\Autowire",
                    "accessors": { "kind": "with_override", "qualified_name": "ignored" }
                }
            ],
            "constructor": [
                { "name": "mode", "type_hint": "string" },
                { "name": "retries", "type_hint": "int", "has_default": true }
            ]
        },
        {
            "name": "App\\Repository\\AuditRepository",
            "status": { "kind": "load_failed", "reason": "parent class missing" }
        },
        {
            "name": "App\\Repository\\PlainRepository"
        }
    ]
}"#;

const SETTINGS: &str = r#"
marker_capability = "App\\Attribute\\Autowire"

[resolver]
source_marker = ".php"
"#;

#[tokio::test]
async fn test_manifest_driven_scan() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let catalog_path = dir.path().join("catalog.json");
    let settings_path = dir.path().join("autowire.toml");
    fs::write(&catalog_path, MANIFEST)?;
    fs::write(&settings_path, SETTINGS)?;

    let source = "<?php\n\nnamespace App\\Repository;\n";
    let mut files = Vec::new();
    for name in ["UserRepository.php", "AuditRepository.php", "PlainRepository.php", "notes.txt"] {
        let path = dir.path().join(name);
        fs::write(&path, source)?;
        files.push(path);
    }

    let catalog = di_impl::TypeCatalog::from_json_file(&catalog_path)?;
    let settings = ScanSettings::from_file(&settings_path)?;
    let scanner = AutowireScanner::new(Arc::new(catalog), settings);

    let report = scanner.scan(&files).await?;

    assert_eq!(report.total(), 4);
    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.skipped_by(SkipReason::MarkerMissing), 2);
    assert_eq!(report.skipped_by(SkipReason::NotSourceFile), 1);

    // 只取第一个匹配的注解
    let users = report.find("users").expect("users 应被发现");
    assert_eq!(users.custom_constructor_arguments, vec![json!("readonly"), json!(3)]);
    let signature = users.constructor_signature.as_ref().expect("构造函数签名");
    assert_eq!(signature.required_count(), 1);

    let output = serde_json::to_value(&report)?;
    assert_eq!(
        output["candidates"][0]["qualified_name"],
        json!("App\\Repository\\UserRepository")
    );
    assert_eq!(output["candidates"][0]["qualified_name_override"], json!("users"));
    Ok(())
}

#[test]
fn test_invalid_manifest_is_rejected() {
    let error = di_impl::TypeCatalog::from_json_str(r#"{ "types": [ { "name": "" } ] }"#)
        .expect_err("空类型名应被拒绝");
    assert!(error.to_string().contains("配置验证失败"));
}
