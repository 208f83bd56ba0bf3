//! 几何计算错误.

use thiserror::Error;

/// 单个指标公式在退化几何情况下产生的错误.
///
/// 该错误只影响产生它的那个指标, 不会中断其余指标的计算.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// 参与夹角计算的向量长度为零 (两个标记点重合).
    #[error("zero-length vector")]
    ZeroLength,

    /// 用于定义直线的两个点重合.
    #[error("line defined by two coincident points")]
    DegenerateLine,

    /// 两条直线平行, 没有交点.
    #[error("lines do not intersect")]
    ParallelLines,

    /// 比值的分母为零.
    #[error("zero denominator")]
    ZeroDenominator,

    /// 计算结果为 NaN 或无穷大.
    #[error("non-finite result")]
    NonFinite,
}

#[cfg(test)]
mod tests {
    use super::CalcError;

    #[test]
    fn test_error_display() {
        assert!(format!("{}", CalcError::ParallelLines).contains("intersect"));
        assert!(format!("{}", CalcError::ZeroDenominator).contains("denominator"));
    }
}
