//! # 自动装配候选解析实现
//!
//! 提供候选解析器、全限定名推导以及内存类型目录。
//!
//! ```rust
//! use di_impl::{AnnotationDeclaration, AutowireCandidate, CandidateResolver, TypeCatalog, TypeDeclaration};
//! use di_abstractions::CandidateFile;
//! use infrastructure_common::Capability;
//!
//! let catalog = TypeCatalog::new()
//!     .with_type(
//!         TypeDeclaration::new("App\\Repository\\UserRepository")
//!             .with_annotation(AnnotationDeclaration::new("App\\Attribute\\Autowire")),
//!     )
//!     .unwrap();
//!
//! let file = CandidateFile::from_bytes(
//!     "UserRepository.php",
//!     "<?php\nnamespace App\\Repository;\n",
//! );
//! let marker = Capability::new("App\\Attribute\\Autowire");
//! let resolver = CandidateResolver::new(&file, &marker, &catalog);
//!
//! assert!(resolver.can_autowire());
//! ```

pub mod catalog;
pub mod naming;
pub mod resolver;

pub use catalog::{
    AnnotationAccessors, AnnotationDeclaration, TypeCatalog, TypeDeclaration, TypeStatus,
};
pub use di_abstractions::AutowireCandidate;
pub use resolver::CandidateResolver;
