//! 组件扫描器抽象接口
//!
//! 对一批候选文件逐个解析，汇总可装配的组件与被跳过的文件

use async_trait::async_trait;
use infrastructure_common::{ComponentError, ResolvedDescriptor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 组件扫描器 trait
#[async_trait]
pub trait ComponentScanner: Send + Sync {
    /// 扫描指定的候选文件，结果顺序与输入一致
    async fn scan(&self, files: &[PathBuf]) -> Result<ScanReport, ComponentError>;

    /// 获取扫描器名称
    fn name(&self) -> &str;

    /// 检查是否支持指定的文件
    fn supports(&self, path: &Path) -> bool;
}

/// 文件被跳过的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// 文件名不是预期的源文件
    NotSourceFile,
    /// 无法推导全限定名（文件不可读）
    NameUnresolved,
    /// 类型不存在或没有标记注解
    MarkerMissing,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NotSourceFile => "不是源文件",
            SkipReason::NameUnresolved => "无法推导类型名",
            SkipReason::MarkerMissing => "缺少标记注解",
        };
        f.write_str(text)
    }
}

/// 被跳过的文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    /// 文件路径
    pub path: PathBuf,
    /// 跳过原因
    pub reason: SkipReason,
}

/// 扫描报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// 可以自动装配的组件
    pub candidates: Vec<ResolvedDescriptor>,
    /// 被跳过的文件
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    /// 创建空报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 扫描的文件总数
    pub fn total(&self) -> usize {
        self.candidates.len() + self.skipped.len()
    }

    /// 按原因统计被跳过的文件数
    pub fn skipped_by(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|file| file.reason == reason).count()
    }

    /// 按注册名查找组件
    pub fn find(&self, registration_name: &str) -> Option<&ResolvedDescriptor> {
        self.candidates
            .iter()
            .find(|candidate| candidate.registration_name() == Some(registration_name))
    }
}
