//! 数据集操作.
//!
//! 数据集目录下每个子目录对应一次检查, 子目录名即检查标识.
//! 每次检查可能保存了多个版本的标记点记录文件:
//!
//! - `fields.json`: 不带时间戳的初始版本;
//! - `fields_2021-03-04T10:22:31.json`: 带时间戳的修订版本.
//!
//! 总是选用时间戳最新的那一个, 初始版本排在所有修订版本之前.

use crate::consts::{RECORD_EXTENSION, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
mod loader;

#[cfg(feature = "serde")]
pub use loader::{study_loader, StudyLoader};

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset` 目录下给定继续项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = home_dataset_dir()?;
    ans.extend(it);
    Some(ans)
}

/// 解析记录文件名.
///
/// - 文件名不是 `{stem}.json` 或 `{stem}_{时间戳}.json` 形式时返回 `None`;
/// - `{stem}.json` 返回 `Some(None)`;
/// - `{stem}_{时间戳}.json` 返回 `Some(Some(时间戳))`.
///
/// 时间戳必须符合 [`TIMESTAMP_FORMAT`] 且是合法的日期时间.
pub fn parse_timestamped(file_name: &str, stem: &str) -> Option<Option<String>> {
    let rest = file_name.strip_prefix(stem)?;
    let rest = rest.strip_suffix(RECORD_EXTENSION)?.strip_suffix('.')?;
    if rest.is_empty() {
        return Some(None);
    }
    let ts = rest.strip_prefix('_')?;
    NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok()?;
    Some(Some(ts.to_string()))
}

/// 在 `dir` 中挑选最新的记录文件, 同时返回其时间戳.
///
/// 目录不存在、不可读或没有匹配的文件时返回 `None`.
pub fn latest_artifact_with_timestamp<P: AsRef<Path>>(
    dir: P,
    stem: &str,
) -> Option<(PathBuf, Option<String>)> {
    std::fs::read_dir(dir.as_ref())
        .ok()?
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .filter_map(|e| {
            let ts = parse_timestamped(e.file_name().to_str()?, stem)?;
            Some((e.path(), ts))
        })
        // 同格式的时间戳按字典序即按时间序; `None` 小于任意 `Some`.
        .max_by(|(_, a), (_, b)| a.cmp(b))
}

/// 在 `dir` 中挑选最新的记录文件.
#[inline]
pub fn latest_artifact<P: AsRef<Path>>(dir: P, stem: &str) -> Option<PathBuf> {
    latest_artifact_with_timestamp(dir, stem).map(|(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::{latest_artifact, latest_artifact_with_timestamp, parse_timestamped};
    use std::fs;

    #[test]
    fn test_parse_timestamped() {
        assert_eq!(parse_timestamped("fields.json", "fields"), Some(None));
        assert_eq!(
            parse_timestamped("fields_2021-03-04T10:22:31.json", "fields"),
            Some(Some("2021-03-04T10:22:31".to_string()))
        );
        assert_eq!(parse_timestamped("fields.txt", "fields"), None);
        assert_eq!(parse_timestamped("other.json", "fields"), None);
        assert_eq!(parse_timestamped("fieldsx.json", "fields"), None);
        assert_eq!(parse_timestamped("fields_.json", "fields"), None);
        assert_eq!(parse_timestamped("fields_yesterday.json", "fields"), None);
        assert_eq!(
            parse_timestamped("fields_2021-13-04T10:22:31.json", "fields"),
            None
        );
    }

    #[test]
    fn test_latest_artifact() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest_artifact(dir.path(), "fields"), None);

        fs::write(dir.path().join("fields.json"), "{}").unwrap();
        assert_eq!(
            latest_artifact(dir.path(), "fields"),
            Some(dir.path().join("fields.json"))
        );

        for name in [
            "fields_2021-03-04T10:22:31.json",
            "fields_2022-01-01T00:00:00.json",
            "fields_2021-12-31T23:59:59.json",
            "notes_2030-01-01T00:00:00.json",
        ] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        let (path, ts) = latest_artifact_with_timestamp(dir.path(), "fields").unwrap();
        assert_eq!(path, dir.path().join("fields_2022-01-01T00:00:00.json"));
        assert_eq!(ts.as_deref(), Some("2022-01-01T00:00:00"));

        assert_eq!(latest_artifact(dir.path().join("missing"), "fields"), None);
    }
}
