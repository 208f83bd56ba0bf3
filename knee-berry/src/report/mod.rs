//! 汇总报表.
//!
//! 每次检查一行, 列顺序固定: 检查标识, 右侧 14 项, 左侧 14 项.
//! 不可用的指标输出为空单元格, 与计算结果 `0` 可以区分.
//!
//! 另有一种带出处的布局, 在标识之后多出标注者与标注时间两列.

use crate::consts::{ID_COLUMN, INDICES_TOTAL, TIMESTAMP_COLUMN, USER_COLUMN};
use crate::index::{IndexKey, IndexKind, KneeIndices};
use crate::marker::Side;
use itertools::Itertools;
use ndarray::Array2;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::path::Path;

/// 28 个指标键, 按报表列顺序.
static COLUMNS: Lazy<Vec<IndexKey>> = Lazy::new(|| {
    Side::ALL
        .into_iter()
        .flat_map(|side| IndexKind::ALL.map(|kind| IndexKey::new(kind, side)))
        .collect()
});

/// 按报表列顺序的 28 个指标键.
#[inline]
pub fn columns() -> &'static [IndexKey] {
    COLUMNS.as_slice()
}

/// 报表行的出处.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    /// 最近一次的标注者.
    pub rater: Option<String>,

    /// 标注时间.
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone)]
struct Row {
    id: String,
    provenance: Provenance,
    indices: KneeIndices,
}

/// 多次检查的汇总报表.
#[derive(Debug, Clone, Default)]
pub struct Report {
    rows: Vec<Row>,
}

impl Report {
    /// 空报表.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一行, 出处未知.
    #[inline]
    pub fn push(&mut self, id: impl Into<String>, indices: KneeIndices) {
        self.push_with_provenance(id, Provenance::default(), indices);
    }

    /// 追加一行.
    pub fn push_with_provenance(
        &mut self,
        id: impl Into<String>,
        provenance: Provenance,
        indices: KneeIndices,
    ) {
        self.rows.push(Row {
            id: id.into(),
            provenance,
            indices,
        });
    }

    /// 行数.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 是否没有任何行.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按插入顺序遍历.
    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = (&str, &KneeIndices)> {
        self.rows.iter().map(|r| (r.id.as_str(), &r.indices))
    }

    /// 按插入顺序遍历, 带出处.
    #[inline]
    pub fn rows_with_provenance(
        &self,
    ) -> impl Iterator<Item = (&str, &Provenance, &KneeIndices)> {
        self.rows
            .iter()
            .map(|r| (r.id.as_str(), &r.provenance, &r.indices))
    }

    /// 表头: `ID` 以及 28 个列标题.
    pub fn header() -> Vec<String> {
        std::iter::once(ID_COLUMN.to_string())
            .chain(columns().iter().map(IndexKey::title))
            .collect()
    }

    /// 带出处的表头: `ID`, `User`, `Timestamp` 以及 28 个列标题.
    pub fn header_with_provenance() -> Vec<String> {
        [ID_COLUMN, USER_COLUMN, TIMESTAMP_COLUMN]
            .into_iter()
            .map(str::to_string)
            .chain(columns().iter().map(IndexKey::title))
            .collect()
    }

    /// 以 CSV 格式写出. 不可用的指标写为空单元格.
    #[inline]
    pub fn write_csv<W: Write>(&self, w: W) -> io::Result<()> {
        self.write_csv_impl(w, false)
    }

    /// 以带出处的布局写出 CSV. 出处未知时写为空单元格.
    #[inline]
    pub fn write_csv_with_provenance<W: Write>(&self, w: W) -> io::Result<()> {
        self.write_csv_impl(w, true)
    }

    fn write_csv_impl<W: Write>(&self, mut w: W, with_provenance: bool) -> io::Result<()> {
        let header = if with_provenance {
            Self::header_with_provenance()
        } else {
            Self::header()
        };
        writeln!(w, "{}", header.iter().map(|s| csv_field(s)).join(","))?;

        for r in self.rows.iter() {
            let mut cells = vec![csv_field(&r.id)];
            if with_provenance {
                for cell in [&r.provenance.rater, &r.provenance.timestamp] {
                    cells.push(cell.as_deref().map_or_else(String::new, csv_field));
                }
            }
            cells.extend(
                columns()
                    .iter()
                    .map(|k| r.indices.value(*k).map_or_else(String::new, |v| v.to_string())),
            );
            writeln!(w, "{}", cells.iter().join(","))?;
        }
        w.flush()
    }

    /// 转换为 `(行数, 28)` 的数值矩阵. 不可用的指标为 `NaN`.
    pub fn to_matrix(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.len(), INDICES_TOTAL), |(r, c)| {
            self.rows[r].indices.value(columns()[c]).unwrap_or(f64::NAN)
        })
    }

    /// 将 [`Self::to_matrix`] 保存为 `.npy` 文件.
    pub fn save_npy<P: AsRef<Path>>(&self, path: P) -> Result<(), ndarray_npy::WriteNpyError> {
        ndarray_npy::write_npy(path, &self.to_matrix())
    }

    /// 每一列成功计算的行数, 按报表列顺序.
    pub fn summary(&self) -> Vec<(IndexKey, usize)> {
        columns()
            .iter()
            .map(|k| {
                let n = self
                    .rows
                    .iter()
                    .filter(|r| r.indices.get(*k).is_available())
                    .count();
                (*k, n)
            })
            .collect()
    }
}

/// 必要时为 CSV 字段加引号.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
