#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 从膝关节影像上人工标注的三维解剖标记点出发, 计算左右两侧各 14 项
//! 髌股关节对线指标 (patellofemoral indices).
//!
//! 该 crate 只提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. 标记点坐标的单位和坐标系由标注工具决定, 本 crate 不做任何换算.
//!   距离类指标只乘以固定的成像比例系数 [`consts::SCALE_FACTOR`].
//! 2. 缺失标记点或几何退化不会导致 panic, 也不会影响其它指标.
//!   对应指标以 [`Outcome::Unavailable`] 或 [`Outcome::Fault`] 给出.
//!
//! # 开发计划
//!
//! ### 标记点集合与侧别 ✅
//!
//! 标记点名称解析, 按侧别批量取点, 镜像.
//!
//! 实现位于 `knee-berry/src/marker`.
//!
//! ### 几何基础运算 ✅
//!
//! 投影, 点到直线的垂足与距离, 直线交点, 向量夹角.
//!
//! 实现位于 `knee-berry/src/geometry`.
//!
//! ### 14 项指标公式 ✅
//!
//! 1. 比值类: Insall-Salvati, 改良 Insall-Salvati, Caton-Deschamps, Blackburne-Peele. ✅
//! 2. 距离类: 外侧平移, TT-TG, 滑车深度, bisect offset. ✅
//! 3. 角度类: 髌骨倾斜, 髌骨外侧倾斜, 滑车沟角, 内外侧滑车倾斜, 滑车角. ✅
//!
//! 实现位于 `knee-berry/src/index`.
//!
//! ### 记录文件与数据集 ✅
//!
//! 1. JSON 标记点记录解析. ✅
//! 2. 同一检查多版本记录中选取最新版本. ✅
//! 3. Data iterator ✅
//!
//! 实现位于 `knee-berry/src/marker/record.rs` 与 `knee-berry/src/dataset`.
//!
//! ### 汇总报表 ✅
//!
//! CSV 输出, `ndarray` 矩阵与 `.npy` 导出, 各列覆盖率统计.
//!
//! 实现位于 `knee-berry/src/report`.
//!
//! ### 多名标注者一致性校正 ⌛️
//!
//! 暂不支持.
//!
//! ### 完善代码文档 ✅
//!
//! 给每个 public API 提供文档, 并视情况给 private
//! API 提供文档.

pub mod consts;

pub mod geometry;

pub mod marker;

pub mod index;

mod analyze;

pub use analyze::{analyze, analyze_batch, analyze_side, AnalyzeError};

pub use geometry::{CalcError, CalcResult};
pub use index::{IndexKey, IndexKind, KneeIndices, Outcome, SideIndices};
pub use marker::{InitMarkerError, Landmark, MarkerSet, Side};

pub mod dataset;
pub mod prelude;
pub mod report;

#[cfg(test)]
mod testing;
