//! 平面/空间几何基础运算.
//!
//! 所有运算都不会 panic: 退化情况 (零长度向量, 两点重合的直线, 平行线,
//! 零分母) 一律以 [`CalcError`] 返回, 由上层决定如何处理.

mod error;

pub use error::CalcError;

use nalgebra::{Point2, Point3, Vector2, Vector3};

/// 几何计算结果.
pub type CalcResult<T> = Result<T, CalcError>;

/// 两直线夹角的正弦小于该值时视为平行.
const PARALLEL_TOLERANCE: f64 = 1e-12;

/// 二维投影平面. 通过丢弃三维坐标中的一个分量得到.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Plane {
    /// 丢弃第一个分量, 保留 `(y, z)`. 用于髌骨高度类比值.
    Sagittal,

    /// 丢弃第三个分量, 保留 `(x, y)`. 用于平移/距离类指标.
    Axial,
}

impl Plane {
    /// 将三维点投影到本平面.
    #[inline]
    pub fn project(&self, p: &Point3<f64>) -> Point2<f64> {
        match self {
            Plane::Sagittal => Point2::new(p.y, p.z),
            Plane::Axial => Point2::new(p.x, p.y),
        }
    }
}

/// 二维叉积 (标量).
#[inline]
pub fn cross2(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// 结果必须是有限值, 否则返回 `CalcError::NonFinite`.
#[inline]
pub fn finite(v: f64) -> CalcResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CalcError::NonFinite)
    }
}

/// `numerator / denominator`. 分母为零时返回 `CalcError::ZeroDenominator`.
#[inline]
pub fn ratio(numerator: f64, denominator: f64) -> CalcResult<f64> {
    if denominator == 0.0 {
        return Err(CalcError::ZeroDenominator);
    }
    finite(numerator / denominator)
}

/// 单位向量. 零长度时返回 `CalcError::ZeroLength`.
#[inline]
pub fn unit(v: &Vector3<f64>) -> CalcResult<Vector3<f64>> {
    let norm = v.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Err(CalcError::ZeroLength);
    }
    Ok(v / norm)
}

/// 两个向量的夹角, 以角度为单位, 取值 `[0, 180]`.
///
/// 点积会被截断到 `[-1, 1]` 以避免浮点误差导致 `acos` 返回 NaN.
pub fn angle_deg(a: &Vector3<f64>, b: &Vector3<f64>) -> CalcResult<f64> {
    let cos = num::clamp(unit(a)?.dot(&unit(b)?), -1.0, 1.0);
    finite(180.0 * cos.acos() / std::f64::consts::PI)
}

/// 点 `p` 在过 `a`, `b` 两点的直线上的垂足.
///
/// 以 `b` 为锚点沿 `b - a` 方向计算. `a`, `b` 重合时返回 `CalcError::DegenerateLine`.
pub fn foot_on_line(
    p: &Point2<f64>,
    a: &Point2<f64>,
    b: &Point2<f64>,
) -> CalcResult<Point2<f64>> {
    let d = b - a;
    let det = d.norm_squared();
    if det == 0.0 {
        return Err(CalcError::DegenerateLine);
    }
    let t = d.dot(&(p - b)) / det;
    Ok(b + d * t)
}

/// 点 `p` 到过 `a`, `b` 两点的直线的距离, 借助叉积计算.
pub fn distance_to_line(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> CalcResult<f64> {
    let ab = a - b;
    let len = ab.norm();
    if len == 0.0 {
        return Err(CalcError::DegenerateLine);
    }
    finite(cross2(&ab, &(b - p)).abs() / len)
}

/// 直线 `(p1, p2)` 与直线 `(q1, q2)` 的交点.
///
/// 两直线平行 (包括任一直线退化为点) 时返回 `CalcError::ParallelLines`.
/// 平行判断带有相对容差, 避免 "几乎平行" 产生巨大的交点坐标.
pub fn line_intersection(
    (p1, p2): (&Point2<f64>, &Point2<f64>),
    (q1, q2): (&Point2<f64>, &Point2<f64>),
) -> CalcResult<Point2<f64>> {
    let r = p1 - p2;
    let s = q1 - q2;
    let div = cross2(&r, &s);
    if div.abs() <= PARALLEL_TOLERANCE * r.norm() * s.norm() {
        return Err(CalcError::ParallelLines);
    }

    // 两条直线各自的 "行列式".
    let d = Vector2::new(cross2(&p1.coords, &p2.coords), cross2(&q1.coords, &q2.coords));
    let x = cross2(&d, &Vector2::new(r.x, s.x)) / div;
    let y = cross2(&d, &Vector2::new(r.y, s.y)) / div;
    Ok(Point2::new(finite(x)?, finite(y)?))
}
