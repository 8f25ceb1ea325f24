//! 候选文件
//!
//! 路径加上可读取的字节源。解析器在一次解析期间只读借用。

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 候选源文件
#[derive(Debug, Clone)]
pub struct CandidateFile {
    path: PathBuf,
    source: CandidateSource,
}

#[derive(Debug, Clone)]
enum CandidateSource {
    Disk,
    Memory(Arc<[u8]>),
}

impl CandidateFile {
    /// 磁盘上的文件
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            source: CandidateSource::Disk,
        }
    }

    /// 内容已在内存中的文件，路径只用于文件名推导
    pub fn from_bytes(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            source: CandidateSource::Memory(Arc::from(content.into())),
        }
    }

    /// 文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 文件名（不含目录），路径没有文件名时为空字符串
    pub fn file_name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map_or(Cow::Borrowed(""), |name| name.to_string_lossy())
    }

    /// 以只读方式打开
    pub fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        match &self.source {
            CandidateSource::Disk => Ok(Box::new(BufReader::new(File::open(&self.path)?))),
            CandidateSource::Memory(content) => Ok(Box::new(Cursor::new(&content[..]))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_file_name_strips_directories() {
        let file = CandidateFile::new("src/Repository/UserRepository.php");
        assert_eq!(file.file_name(), "UserRepository.php");
        assert_eq!(file.path(), Path::new("src/Repository/UserRepository.php"));
    }

    #[test]
    fn test_open_in_memory_content() {
        let file = CandidateFile::from_bytes("Kernel.php", "<?php\nnamespace App;\n");
        let mut content = String::new();
        file.open().unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "<?php\nnamespace App;\n");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = CandidateFile::new(dir.path().join("Missing.php"));
        assert!(file.open().is_err());
    }
}
