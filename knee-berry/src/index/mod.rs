//! 髌股对线指标 (index) 及其计算结果.
//!
//! 每侧 14 项指标, 两侧共 28 项. 结果集合总是包含全部 28 项,
//! 无法计算的指标以 [`Outcome::Unavailable`] 或 [`Outcome::Fault`] 表示, 而不会被省略.

mod formula;

pub use formula::*;

use crate::consts::INDICES_PER_SIDE;
use crate::geometry::CalcError;
use crate::marker::Side;
use std::fmt;

/// 指标种类. 枚举顺序即报表列顺序.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IndexKind {
    /// Insall-Salvati 比值.
    InsallSalvati,
    /// 髌骨外侧平移.
    LateralTranslation,
    /// TT-TG 距离.
    TtTg,
    /// 髌骨倾斜角.
    PatellarTilt,
    /// 髌骨外侧倾斜角.
    LateralPatellarTilt,
    /// Bisect offset.
    BisectOffset,
    /// 滑车沟角.
    SulcusAngle,
    /// 外侧滑车倾斜角.
    LateralInclination,
    /// 内侧滑车倾斜角.
    MedialInclination,
    /// 滑车深度.
    TrochlearDepth,
    /// 改良 Insall-Salvati 比值.
    ModifiedInsallSalvati,
    /// Caton-Deschamps 比值.
    CatonDeschamps,
    /// Blackburne-Peele 比值.
    BlackburnePeele,
    /// 滑车角.
    TrochlearAngle,
}

impl IndexKind {
    /// 全部指标, 按报表列顺序.
    pub const ALL: [IndexKind; INDICES_PER_SIDE] = [
        IndexKind::InsallSalvati,
        IndexKind::LateralTranslation,
        IndexKind::TtTg,
        IndexKind::PatellarTilt,
        IndexKind::LateralPatellarTilt,
        IndexKind::BisectOffset,
        IndexKind::SulcusAngle,
        IndexKind::LateralInclination,
        IndexKind::MedialInclination,
        IndexKind::TrochlearDepth,
        IndexKind::ModifiedInsallSalvati,
        IndexKind::CatonDeschamps,
        IndexKind::BlackburnePeele,
        IndexKind::TrochlearAngle,
    ];

    /// 在 [`Self::ALL`] 中的位置.
    #[inline]
    pub const fn position(&self) -> usize {
        *self as usize
    }

    /// 简短键名, 如 `tttg`.
    pub const fn key(&self) -> &'static str {
        match self {
            IndexKind::InsallSalvati => "i_s",
            IndexKind::LateralTranslation => "lt",
            IndexKind::TtTg => "tttg",
            IndexKind::PatellarTilt => "pt",
            IndexKind::LateralPatellarTilt => "lpt",
            IndexKind::BisectOffset => "bo",
            IndexKind::SulcusAngle => "sa",
            IndexKind::LateralInclination => "lat_incl",
            IndexKind::MedialInclination => "med_incl",
            IndexKind::TrochlearDepth => "td",
            IndexKind::ModifiedInsallSalvati => "mis",
            IndexKind::CatonDeschamps => "cd",
            IndexKind::BlackburnePeele => "bp",
            IndexKind::TrochlearAngle => "ta",
        }
    }

    /// 报表列标题 (不含侧别).
    pub const fn title(&self) -> &'static str {
        match self {
            IndexKind::InsallSalvati => "Insall Salvati Ratio",
            IndexKind::LateralTranslation => "Lateral Translation Patella",
            IndexKind::TtTg => "TT-TG Distance",
            IndexKind::PatellarTilt => "Patellar Tilt",
            IndexKind::LateralPatellarTilt => "Lateral Patellar Tilt",
            IndexKind::BisectOffset => "Bisect Offset",
            IndexKind::SulcusAngle => "Sulcus Angle",
            IndexKind::LateralInclination => "Lateral Inclination",
            IndexKind::MedialInclination => "Medial Inclination",
            IndexKind::TrochlearDepth => "Trochlear Depth",
            IndexKind::ModifiedInsallSalvati => "Modified Insall Salvati",
            IndexKind::CatonDeschamps => "Caton-Deschamps Ratio",
            IndexKind::BlackburnePeele => "Blackburne-Peele Ratio",
            IndexKind::TrochlearAngle => "Trochlear Angle",
        }
    }

    /// 是否乘以了 [`crate::consts::SCALE_FACTOR`].
    #[inline]
    pub const fn is_scaled(&self) -> bool {
        matches!(
            self,
            IndexKind::LateralTranslation | IndexKind::TtTg | IndexKind::TrochlearDepth
        )
    }

    /// 计算本指标的公式.
    #[inline]
    pub fn formula(&self) -> Formula {
        Formula::ALL
            .into_iter()
            .find(|f| f.outputs().contains(self))
            .unwrap_or_else(|| unreachable!("every index belongs to a formula"))
    }
}

/// 指标全名: 种类 + 侧别, 如 `tttg_R`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IndexKey {
    /// 指标种类.
    pub kind: IndexKind,
    /// 侧别.
    pub side: Side,
}

impl IndexKey {
    /// 构建.
    #[inline]
    pub const fn new(kind: IndexKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// 报表列标题, 如 `TT-TG Distance R`.
    pub fn title(&self) -> String {
        format!("{} {}", self.kind.title(), self.side)
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.key(), self.side)
    }
}

/// 单项指标的计算结果.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// 计算成功, 一定是有限值.
    Value(f64),

    /// 缺少必需的标记点. 内容为缺失的标记点名称.
    Unavailable(Vec<String>),

    /// 标记点齐全, 但几何退化导致无法计算.
    Fault(CalcError),
}

impl Outcome {
    /// 计算成功时返回数值, 否则返回 `None`.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// 是否计算成功.
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }
}

/// 单侧膝关节的 14 项指标.
#[derive(Clone, Debug, PartialEq)]
pub struct SideIndices {
    side: Side,
    outcomes: [Outcome; INDICES_PER_SIDE],
}

impl SideIndices {
    /// 全部指标都未计算的初始状态.
    pub(crate) fn empty(side: Side) -> Self {
        Self {
            side,
            outcomes: std::array::from_fn(|_| Outcome::Unavailable(vec![])),
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, kind: IndexKind, outcome: Outcome) {
        self.outcomes[kind.position()] = outcome;
    }

    /// 侧别.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// 获取某项指标的结果.
    #[inline]
    pub fn get(&self, kind: IndexKind) -> &Outcome {
        &self.outcomes[kind.position()]
    }

    /// 获取某项指标的数值.
    #[inline]
    pub fn value(&self, kind: IndexKind) -> Option<f64> {
        self.get(kind).value()
    }

    /// 按列顺序遍历.
    pub fn iter(&self) -> impl Iterator<Item = (IndexKind, &Outcome)> {
        IndexKind::ALL.into_iter().zip(self.outcomes.iter())
    }

    /// 成功计算的指标个数.
    pub fn available(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_available()).count()
    }
}

/// 一次检查的全部 28 项指标 (左右两侧).
#[derive(Clone, Debug, PartialEq)]
pub struct KneeIndices {
    right: SideIndices,
    left: SideIndices,
}

impl KneeIndices {
    /// 由左右两侧结果组装.
    pub fn new(right: SideIndices, left: SideIndices) -> Self {
        debug_assert_eq!(right.side(), Side::Right);
        debug_assert_eq!(left.side(), Side::Left);
        Self { right, left }
    }

    /// 28 项全部不可用. 用于记录无法读取的检查, 使其在报表中仍占一行.
    pub fn unavailable() -> Self {
        Self::new(SideIndices::empty(Side::Right), SideIndices::empty(Side::Left))
    }

    /// 获取某一侧.
    #[inline]
    pub fn side(&self, side: Side) -> &SideIndices {
        match side {
            Side::Right => &self.right,
            Side::Left => &self.left,
        }
    }

    /// 获取单项结果.
    #[inline]
    pub fn get(&self, key: IndexKey) -> &Outcome {
        self.side(key.side).get(key.kind)
    }

    /// 获取单项数值.
    #[inline]
    pub fn value(&self, key: IndexKey) -> Option<f64> {
        self.get(key).value()
    }

    /// 按报表列顺序 (先右 14 项, 后左 14 项) 遍历.
    pub fn iter(&self) -> impl Iterator<Item = (IndexKey, &Outcome)> {
        Side::ALL.into_iter().flat_map(move |side| {
            self.side(side)
                .iter()
                .map(move |(kind, o)| (IndexKey::new(kind, side), o))
        })
    }

    /// 总是 28.
    #[inline]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// 总是 `false`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 成功计算的指标个数.
    #[inline]
    pub fn available(&self) -> usize {
        self.right.available() + self.left.available()
    }
}
