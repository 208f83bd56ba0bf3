//! 指标计算调度.
//!
//! 按公式目录逐项计算, 每项之间相互隔离: 缺失标记点或几何退化只影响对应指标,
//! 左右两侧互不影响.

use crate::geometry::finite;
use crate::index::{Formula, KneeIndices, Outcome, SideIndices};
use crate::marker::{MarkerSet, Side};
use thiserror::Error;

/// 整体分析失败. 只有输入本身不可用时才会发生.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// 标记点集合为空, 任何部分结果都没有意义.
    #[error("marker set is empty")]
    EmptyMarkerSet,
}

/// 计算一次检查的全部 28 项指标.
///
/// 标记点集合为空时返回 `Err(AnalyzeError::EmptyMarkerSet)`, 其余情况总是成功,
/// 无法计算的指标以 [`Outcome::Unavailable`] / [`Outcome::Fault`] 给出.
pub fn analyze(markers: &MarkerSet) -> Result<KneeIndices, AnalyzeError> {
    if markers.is_empty() {
        return Err(AnalyzeError::EmptyMarkerSet);
    }
    Ok(KneeIndices::new(
        analyze_side(markers, Side::Right),
        analyze_side(markers, Side::Left),
    ))
}

/// 计算单侧的 14 项指标.
pub fn analyze_side(markers: &MarkerSet, side: Side) -> SideIndices {
    let mut ans = SideIndices::empty(side);
    for formula in Formula::ALL {
        let outcomes = eval_formula(markers, formula, side);
        for (kind, outcome) in formula.outputs().iter().zip(outcomes) {
            ans.set(*kind, outcome);
        }
    }
    ans
}

/// 计算单个公式, 结果与 `formula.outputs()` 一一对应.
fn eval_formula(markers: &MarkerSet, formula: Formula, side: Side) -> Vec<Outcome> {
    let n = formula.outputs().len();

    let points = match markers.gather(formula.landmarks(), side) {
        Ok(points) => points,
        Err(missing) => {
            log::warn!(
                "Markers missing; will continue without {} {side} calculation: {missing:?}",
                formula.name()
            );
            return vec![Outcome::Unavailable(missing); n];
        }
    };

    match formula.eval(&points) {
        Ok(values) => values
            .into_iter()
            .map(|v| match finite(v) {
                Ok(v) => {
                    log::debug!("{} {side}: {v}", formula.name());
                    Outcome::Value(v)
                }
                Err(e) => Outcome::Fault(e),
            })
            .collect(),
        Err(e) => {
            log::warn!("{} {side} is not computable: {e}", formula.name());
            vec![Outcome::Fault(e); n]
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IntoParallelRefIterator, IndexedParallelIterator, ParallelIterator};
    }
}

/// 批量分析多次检查. 输出顺序与输入一致.
///
/// 打开 `rayon` feature 时各次检查并行计算.
pub fn analyze_batch<S>(
    studies: &[(S, MarkerSet)],
) -> Vec<(S, Result<KneeIndices, AnalyzeError>)>
where
    S: Clone + Send + Sync,
{
    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            let mut ans = Vec::with_capacity(studies.len());
            studies
                .par_iter()
                .map(|(id, markers)| (id.clone(), analyze(markers)))
                .collect_into_vec(&mut ans);
            ans
        } else {
            studies
                .iter()
                .map(|(id, markers)| (id.clone(), analyze(markers)))
                .collect()
        }
    }
}
