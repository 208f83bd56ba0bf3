//! 迭代器风格的检查记录加载器.

use super::latest_artifact_with_timestamp;
use crate::marker::record::{RecordError, StudyRecord};
use std::path::{Path, PathBuf};

/// 为 `dir` 下的全部检查子目录创建加载器. 子目录按名称排序.
///
/// `dir` 不可读时返回 I/O 错误. 非目录项与名称不是合法 UTF-8 的子目录会被跳过.
pub fn study_loader<P: AsRef<Path>>(dir: P, stem: &str) -> std::io::Result<StudyLoader> {
    let mut studies: Vec<(String, PathBuf)> = std::fs::read_dir(dir.as_ref())?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .filter_map(|p| Some((p.file_name()?.to_str()?.to_string(), p)))
        .collect();
    studies.sort_unstable_by(|a, b| b.0.cmp(&a.0));

    Ok(StudyLoader {
        stem: stem.to_string(),
        studies_rev: studies,
    })
}

/// 检查记录加载器. 每次产出 `(检查标识, 记录)`.
#[derive(Debug)]
pub struct StudyLoader {
    stem: String,
    studies_rev: Vec<(String, PathBuf)>,
}

impl StudyLoader {
    fn load(&self, dir: &Path) -> Result<StudyRecord, RecordError> {
        let (path, ts) = latest_artifact_with_timestamp(dir, &self.stem)
            .ok_or_else(|| RecordError::NotFound(dir.to_owned()))?;
        log::debug!("loading `{}`", path.display());
        let mut record = StudyRecord::from_path(&path)?;
        if record.timestamp.is_none() {
            record.timestamp = ts;
        }
        Ok(record)
    }
}

impl Iterator for StudyLoader {
    type Item = (String, Result<StudyRecord, RecordError>);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, dir) = self.studies_rev.pop()?;
        let record = self.load(&dir);
        Some((id, record))
    }
}

impl ExactSizeIterator for StudyLoader {
    #[inline]
    fn len(&self) -> usize {
        self.studies_rev.len()
    }
}
