//! 单次检查的标记点记录文件 (JSON).
//!
//! 记录格式为 `{ "markers": [ { "name": ..., "pos": [x, y, z, ...] }, ... ] }`,
//! 另外可能带有 `__raters__` 与 `__timestamp__` 两个附加字段. 其余字段一律忽略.

use super::{InitMarkerError, MarkerSet};
use crate::report::Provenance;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 读取或转换记录文件时的错误.
#[derive(Debug, Error)]
pub enum RecordError {
    /// 底层 I/O 错误.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 解析错误.
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    /// `pos` 不足三个分量.
    #[error("marker `{name}` has only {len} coordinate(s)")]
    ShortPosition {
        /// 标记点名称.
        name: String,
        /// 实际分量个数.
        len: usize,
    },

    /// 标记点本身不合法.
    #[error(transparent)]
    InvalidMarker(#[from] InitMarkerError),

    /// 目录下没有可用的记录文件.
    #[error("no record file found in `{}`", .0.display())]
    NotFound(PathBuf),
}

/// 记录中的单个标记点.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMarker {
    /// 完整标记点名称, 如 `Sulc_R`.
    pub name: String,

    /// 坐标. 只使用前三个分量.
    pub pos: Vec<f64>,
}

/// 标注者信息.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rater {
    /// 用户名.
    pub username: String,

    /// 标注时间.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// 一次检查的标记点记录.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyRecord {
    /// 全部标记点.
    pub markers: Vec<RawMarker>,

    /// 历任标注者, 最后一位是最近一次修改者.
    #[serde(default, rename = "__raters__")]
    pub raters: Vec<Rater>,

    /// 记录文件的时间戳 (来自文件名).
    #[serde(default, rename = "__timestamp__")]
    pub timestamp: Option<String>,
}

impl StudyRecord {
    /// 从 JSON 流解析.
    pub fn from_reader<R: Read>(r: R) -> Result<Self, RecordError> {
        Ok(serde_json::from_reader(r)?)
    }

    /// 从本地 JSON 文件解析.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RecordError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// 从 JSON 字符串解析.
    pub fn from_json_str(s: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(s)?)
    }

    /// 最近一次的标注者.
    #[inline]
    pub fn last_rater(&self) -> Option<&Rater> {
        self.raters.last()
    }

    /// 报表行的出处: 最近一次标注者的用户名与标注时间.
    ///
    /// 标注者没有时间戳时退回到记录文件自身的时间戳.
    pub fn provenance(&self) -> Provenance {
        let rater = self.last_rater();
        Provenance {
            rater: rater.map(|r| r.username.clone()),
            timestamp: rater
                .and_then(|r| r.timestamp.clone())
                .or_else(|| self.timestamp.clone()),
        }
    }

    /// 构建标记点集合. 每个 `pos` 只取前三个分量, 重名时后者覆盖前者.
    pub fn marker_set(&self) -> Result<MarkerSet, RecordError> {
        let mut set = MarkerSet::new();
        for m in self.markers.iter() {
            let &[x, y, z, ..] = m.pos.as_slice() else {
                return Err(RecordError::ShortPosition {
                    name: m.name.clone(),
                    len: m.pos.len(),
                });
            };
            set.insert(m.name.as_str(), Point3::new(x, y, z))?;
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::{Provenance, RecordError, StudyRecord};
    use nalgebra::Point3;

    const RECORD: &str = r#"{
        "markers": [
            {"name": "Sup_Pat_R", "pos": [0.0, 0.0, 10.0, 1.0]},
            {"name": "Inf_Pat_R", "pos": [0, 0, 0]},
            {"name": "Tub_Tib_R", "pos": [0.0, 2.0, -5.0, 0.0, 7.0]}
        ],
        "__raters__": [
            {"username": "first", "timestamp": "2021-01-01T00:00:00"},
            {"username": "second", "timestamp": "2021-02-01T00:00:00"}
        ],
        "something_else": {"ignored": true}
    }"#;

    #[test]
    fn test_record_marker_set() {
        let record = StudyRecord::from_json_str(RECORD).unwrap();
        assert_eq!(record.markers.len(), 3);
        assert_eq!(record.timestamp, None);
        assert_eq!(record.last_rater().unwrap().username, "second");

        let set = record.marker_set().unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("Sup_Pat_R"), Some(&Point3::new(0.0, 0.0, 10.0)));
        assert_eq!(set.get("Tub_Tib_R"), Some(&Point3::new(0.0, 2.0, -5.0)));
    }

    #[test]
    fn test_record_provenance() {
        let p = StudyRecord::from_json_str(RECORD).unwrap().provenance();
        assert_eq!(p.rater.as_deref(), Some("second"));
        assert_eq!(p.timestamp.as_deref(), Some("2021-02-01T00:00:00"));

        let mut record = StudyRecord::from_json_str(
            r#"{"markers": [], "__raters__": [{"username": "solo"}]}"#,
        )
        .unwrap();
        record.timestamp = Some("2022-03-04T05:06:07".to_string());
        let p = record.provenance();
        assert_eq!(p.rater.as_deref(), Some("solo"));
        assert_eq!(p.timestamp.as_deref(), Some("2022-03-04T05:06:07"));

        let p = StudyRecord::from_json_str(r#"{"markers": []}"#)
            .unwrap()
            .provenance();
        assert_eq!(p, Provenance::default());
    }

    #[test]
    fn test_record_short_position() {
        let record =
            StudyRecord::from_json_str(r#"{"markers": [{"name": "Sulc_L", "pos": [1.0, 2.0]}]}"#)
                .unwrap();
        assert!(record.raters.is_empty());
        match record.marker_set() {
            Err(RecordError::ShortPosition { name, len }) => {
                assert_eq!(name, "Sulc_L");
                assert_eq!(len, 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_record_malformed() {
        assert!(matches!(
            StudyRecord::from_json_str(r#"{"points": []}"#),
            Err(RecordError::Json(_))
        ));
        assert!(matches!(
            StudyRecord::from_json_str("not json"),
            Err(RecordError::Json(_))
        ));
    }
}
