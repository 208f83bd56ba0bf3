//! 对 `knee-berry::dataset` 的更一层封装. 提供更直接的数据集加载器.

use knee_berry::consts::DEFAULT_RECORD_STEM;
use knee_berry::dataset::{self, StudyLoader};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// 数据集目录的环境变量.
pub const DATASET_DIR_VAR: &str = "KNEE_DATASET_DIR";

/// 记录文件名主干的环境变量.
pub const RECORD_STEM_VAR: &str = "KNEE_RECORD_STEM";

/// 报表输出路径的环境变量.
pub const REPORT_PATH_VAR: &str = "KNEE_REPORT_PATH";

/// 报表是否带出处列的环境变量.
pub const REPORT_PROVENANCE_VAR: &str = "KNEE_REPORT_PROVENANCE";

/// 读取非空的环境变量.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// 获取数据集基本路径.
///
/// 1. 若环境变量 `$KNEE_DATASET_DIR` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/knee`. 无法确定用户主目录时返回 `None`.
pub fn dataset_dir_from_env_or_home() -> Option<PathBuf> {
    match non_empty_var(DATASET_DIR_VAR) {
        Some(d) => Some(PathBuf::from(d)),
        None => dataset::home_dataset_dir_with(["knee"]),
    }
}

/// 获取记录文件名主干. 默认为 [`DEFAULT_RECORD_STEM`].
pub fn record_stem_from_env() -> String {
    non_empty_var(RECORD_STEM_VAR).unwrap_or_else(|| DEFAULT_RECORD_STEM.to_string())
}

/// 获取报表输出路径. 未设置时返回 `None`, 表示输出到标准输出.
pub fn report_path_from_env() -> Option<PathBuf> {
    non_empty_var(REPORT_PATH_VAR).map(PathBuf::from)
}

/// 报表是否带 `User`, `Timestamp` 两列出处.
///
/// 默认带出处; `$KNEE_REPORT_PROVENANCE` 为 `0`, `false` 或 `no` 时输出固定的 29 列布局.
pub fn report_provenance_from_env() -> bool {
    non_empty_var(REPORT_PROVENANCE_VAR).map_or(true, |v| parse_flag(&v))
}

fn parse_flag(v: &str) -> bool {
    !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no")
}

/// 获取数据集加载器.
#[inline]
pub fn study_loader<P: AsRef<Path>>(path: P, stem: &str) -> io::Result<StudyLoader> {
    dataset::study_loader(path, stem)
}

/// 从 `$KNEE_DATASET_DIR` 或者 `$HOME/dataset/knee` 下加载数据集.
pub fn study_loader_from_env_or_home() -> io::Result<StudyLoader> {
    let dir = dataset_dir_from_env_or_home().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "cannot determine dataset directory")
    })?;
    log::info!("Dataset directory: `{}`", dir.display());
    study_loader(dir, &record_stem_from_env())
}
