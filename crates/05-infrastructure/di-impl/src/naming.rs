//! 全限定名推导
//!
//! 只对文件开头做浅层的词法扫描：找到第一行命名空间声明即停止，不做完整解析。

use di_abstractions::CandidateFile;
use infrastructure_common::{QualifiedName, ResolverOptions};
use std::io::{self, BufRead};
use tracing::{debug, warn};

/// 文件名是否包含源文件标记
pub fn is_source_file(file_name: &str, options: &ResolverOptions) -> bool {
    file_name.contains(&options.source_marker)
}

/// 从文件名得到本地标识符（去掉所有源文件标记）
pub fn local_identifier(file_name: &str, options: &ResolverOptions) -> String {
    file_name.replace(&options.source_marker, "")
}

/// 扫描命名空间声明
///
/// 返回第一条以声明关键字开头的行中的第二个词，并去掉结尾的语句结束符。
/// 关键字后没有名称时返回空字符串；读到文件末尾仍没有声明行时返回 `None`。
/// 读取出错时返回错误，不当作没有声明。
pub fn scan_namespace<R: BufRead>(
    mut reader: R,
    options: &ResolverOptions,
) -> io::Result<Option<String>> {
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&buffer);
        if !line.starts_with(options.namespace_keyword.as_str()) {
            continue;
        }

        let namespace = line
            .split_whitespace()
            .nth(1)
            .map(|token| token.trim_end_matches(options.statement_terminator))
            .unwrap_or_default();
        return Ok(Some(namespace.to_string()));
    }
}

/// 推导候选文件应当定义的全限定名
///
/// 文件不是源文件、无法打开或读取失败时返回 `None`。没有命名空间声明时
/// 前缀为空，结果以分隔符开头。
pub fn derive_qualified_name(
    file: &CandidateFile,
    options: &ResolverOptions,
) -> Option<QualifiedName> {
    let file_name = file.file_name();
    if !is_source_file(&file_name, options) {
        return None;
    }

    let reader = match file.open() {
        Ok(reader) => reader,
        Err(e) => {
            warn!("无法读取候选文件 {}: {}", file.path().display(), e);
            return None;
        }
    };

    let namespace = match scan_namespace(reader, options) {
        Ok(Some(namespace)) => namespace,
        Ok(None) => {
            debug!("未找到命名空间声明: {}", file.path().display());
            String::new()
        }
        Err(e) => {
            warn!("读取候选文件失败 {}: {}", file.path().display(), e);
            return None;
        }
    };

    let local = local_identifier(&file_name, options);
    Some(QualifiedName::compose(
        &namespace,
        &options.namespace_separator,
        &local,
    ))
}
