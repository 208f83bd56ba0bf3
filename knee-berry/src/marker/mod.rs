//! 解剖标记点 (marker) 与标记点集合.
//!
//! 标记点名称由 "解剖角色" 与 "侧别后缀" 组成, 例如 `Sup_Pat_R` 是右膝的髌骨上极.
//! 同一个指标所需的所有标记点一定来自同一侧.

#[cfg(feature = "serde")]
pub mod record;

use nalgebra::Point3;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// 膝关节侧别.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// 右膝, 后缀 `_R`.
    Right,

    /// 左膝, 后缀 `_L`.
    Left,
}

impl Side {
    /// 报表中的侧别顺序: 先右后左.
    pub const ALL: [Side; 2] = [Side::Right, Side::Left];

    /// 侧别后缀 (不含下划线).
    #[inline]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Side::Right => "R",
            Side::Left => "L",
        }
    }

    /// 另一侧.
    #[inline]
    pub const fn opposite(&self) -> Side {
        match self {
            Side::Right => Side::Left,
            Side::Left => Side::Right,
        }
    }

    /// 从后缀字符串解析侧别.
    #[inline]
    pub fn from_suffix(s: &str) -> Option<Side> {
        match s {
            "R" => Some(Side::Right),
            "L" => Some(Side::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// 标记点的解剖角色.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Landmark {
    /// 髌骨上极.
    SupPat,
    /// 髌骨下极.
    InfPat,
    /// 髌骨关节面下缘.
    InfArtPat,
    /// 髌骨前缘.
    AntPat,
    /// 髌骨后缘.
    PosPat,
    /// 髌骨内侧缘.
    MedPat,
    /// 髌骨外侧缘.
    LatPat,
    /// 滑车沟最深点.
    Sulc,
    /// 股骨内侧前髁.
    MedAntCond,
    /// 股骨外侧前髁.
    LatAntCond,
    /// 股骨内侧后髁.
    MedPosCond,
    /// 股骨外侧后髁.
    LatPosCond,
    /// 胫骨结节.
    TubTib,
    /// 胫骨前上角.
    SupAntTib,
    /// 胫骨平台上缘.
    SupTib,
}

impl Landmark {
    /// 全部解剖角色.
    pub const ALL: [Landmark; 15] = [
        Landmark::SupPat,
        Landmark::InfPat,
        Landmark::InfArtPat,
        Landmark::AntPat,
        Landmark::PosPat,
        Landmark::MedPat,
        Landmark::LatPat,
        Landmark::Sulc,
        Landmark::MedAntCond,
        Landmark::LatAntCond,
        Landmark::MedPosCond,
        Landmark::LatPosCond,
        Landmark::TubTib,
        Landmark::SupAntTib,
        Landmark::SupTib,
    ];

    /// 标记点名称主干 (不含侧别后缀).
    pub const fn stem(&self) -> &'static str {
        match self {
            Landmark::SupPat => "Sup_Pat",
            Landmark::InfPat => "Inf_Pat",
            Landmark::InfArtPat => "Inf_Art_Pat",
            Landmark::AntPat => "Ant_Pat",
            Landmark::PosPat => "Pos_Pat",
            Landmark::MedPat => "Med_Pat",
            Landmark::LatPat => "Lat_Pat",
            Landmark::Sulc => "Sulc",
            Landmark::MedAntCond => "Med_Ant_Cond",
            Landmark::LatAntCond => "Lat_Ant_Cond",
            Landmark::MedPosCond => "Med_Pos_Cond",
            Landmark::LatPosCond => "Lat_Pos_Cond",
            Landmark::TubTib => "Tub_Tib",
            Landmark::SupAntTib => "Sup_Ant_Tib",
            Landmark::SupTib => "Sup_Tib",
        }
    }

    /// 完整标记点名称, 如 `Sulc_R`.
    #[inline]
    pub fn marker_name(&self, side: Side) -> String {
        format!("{}_{}", self.stem(), side.suffix())
    }

    /// 解析完整标记点名称. 未知名称返回 `None`.
    pub fn parse(name: &str) -> Option<(Landmark, Side)> {
        let (stem, suffix) = name.rsplit_once('_')?;
        let side = Side::from_suffix(suffix)?;
        let landmark = Self::ALL.into_iter().find(|l| l.stem() == stem)?;
        Some((landmark, side))
    }
}

/// 构建 [`MarkerSet`] 时的错误.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitMarkerError {
    /// 坐标中含有 NaN 或无穷大.
    #[error("marker `{0}` has a non-finite coordinate")]
    NonFinite(String),

    /// 标记点名称为空.
    #[error("marker name is empty")]
    EmptyName,
}

/// 一次影像检查的标记点集合: 名称 -> 三维坐标.
///
/// 集合在构建完成后即视为只读. 分析过程只借用它, 不会修改, 也不会在分析结束后保留引用.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSet {
    points: HashMap<String, Point3<f64>>,
}

impl MarkerSet {
    /// 创建空集合.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 `(名称, 坐标)` 序列构建集合. 重名时后者覆盖前者.
    pub fn try_from_iter<S, I>(it: I) -> Result<Self, InitMarkerError>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Point3<f64>)>,
    {
        let mut set = Self::new();
        for (name, p) in it {
            set.insert(name, p)?;
        }
        Ok(set)
    }

    /// 插入一个标记点, 返回被覆盖的旧坐标 (若有).
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        point: Point3<f64>,
    ) -> Result<Option<Point3<f64>>, InitMarkerError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InitMarkerError::EmptyName);
        }
        if !point.coords.iter().all(|c| c.is_finite()) {
            return Err(InitMarkerError::NonFinite(name));
        }
        Ok(self.points.insert(name, point))
    }

    /// 按完整名称获取坐标.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Point3<f64>> {
        self.points.get(name)
    }

    /// 按解剖角色与侧别获取坐标.
    #[inline]
    pub fn landmark(&self, landmark: Landmark, side: Side) -> Option<&Point3<f64>> {
        self.get(&landmark.marker_name(side))
    }

    /// 是否包含给定名称.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.points.contains_key(name)
    }

    /// 标记点个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否为空集合.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 遍历 `(名称, 坐标)`. 顺序不确定.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Point3<f64>)> {
        self.points.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 移除一个标记点, 返回其坐标.
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Point3<f64>> {
        self.points.remove(name)
    }

    /// 一次性取出 `landmarks` 在 `side` 一侧的全部坐标.
    ///
    /// 任一标记点缺失时返回 `Err`, 其中包含全部缺失的标记点名称.
    pub fn gather(
        &self,
        landmarks: &[Landmark],
        side: Side,
    ) -> Result<Vec<Point3<f64>>, Vec<String>> {
        let mut found = Vec::with_capacity(landmarks.len());
        let mut missing = vec![];
        for l in landmarks {
            let name = l.marker_name(side);
            match self.points.get(&name) {
                Some(p) => found.push(*p),
                None => missing.push(name),
            }
        }
        if missing.is_empty() {
            Ok(found)
        } else {
            Err(missing)
        }
    }

    /// 交换所有 `_R` / `_L` 后缀 (包括未知角色的名称), 得到左右镜像的集合.
    /// 不带侧别后缀的名称保持不变.
    pub fn mirrored(&self) -> Self {
        let points = self
            .points
            .iter()
            .map(|(name, p)| {
                let name = match name.rsplit_once('_') {
                    Some((stem, suffix)) => match Side::from_suffix(suffix) {
                        Some(side) => format!("{stem}_{}", side.opposite()),
                        None => name.clone(),
                    },
                    None => name.clone(),
                };
                (name, *p)
            })
            .collect();
        Self { points }
    }

    /// 对每个坐标施加 `op`, 返回新的集合.
    pub fn map_points<F>(&self, op: F) -> Self
    where
        F: Fn(&Point3<f64>) -> Point3<f64>,
    {
        let points = self
            .points
            .iter()
            .map(|(name, p)| (name.clone(), op(p)))
            .collect();
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::{InitMarkerError, Landmark, MarkerSet, Side};
    use nalgebra::Point3;

    #[test]
    fn test_landmark_parse() {
        assert_eq!(
            Landmark::parse("Sup_Pat_R"),
            Some((Landmark::SupPat, Side::Right))
        );
        assert_eq!(
            Landmark::parse("Lat_Pos_Cond_L"),
            Some((Landmark::LatPosCond, Side::Left))
        );
        assert_eq!(Landmark::parse("Sulc_X"), None);
        assert_eq!(Landmark::parse("Sulc"), None);
        assert_eq!(Landmark::parse("Foo_R"), None);

        for l in Landmark::ALL {
            for side in Side::ALL {
                assert_eq!(Landmark::parse(&l.marker_name(side)), Some((l, side)));
            }
        }
    }

    #[test]
    fn test_marker_set_insert() {
        let mut set = MarkerSet::new();
        assert!(set.is_empty());
        assert_eq!(set.insert("Sulc_R", Point3::new(1.0, 2.0, 3.0)), Ok(None));
        assert_eq!(
            set.insert("Sulc_R", Point3::new(4.0, 5.0, 6.0)),
            Ok(Some(Point3::new(1.0, 2.0, 3.0)))
        );
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.insert("Sulc_L", Point3::new(f64::NAN, 0.0, 0.0)),
            Err(InitMarkerError::NonFinite("Sulc_L".to_string()))
        );
        assert_eq!(
            set.insert("", Point3::origin()),
            Err(InitMarkerError::EmptyName)
        );
        assert_eq!(
            set.landmark(Landmark::Sulc, Side::Right),
            Some(&Point3::new(4.0, 5.0, 6.0))
        );
    }

    #[test]
    fn test_marker_set_gather() {
        let set = MarkerSet::try_from_iter([
            ("Sup_Pat_R", Point3::new(0.0, 0.0, 10.0)),
            ("Inf_Pat_R", Point3::origin()),
        ])
        .unwrap();

        let ok = set
            .gather(&[Landmark::InfPat, Landmark::SupPat], Side::Right)
            .unwrap();
        assert_eq!(ok, vec![Point3::origin(), Point3::new(0.0, 0.0, 10.0)]);

        let missing = set
            .gather(&[Landmark::SupPat, Landmark::TubTib, Landmark::Sulc], Side::Right)
            .unwrap_err();
        assert_eq!(missing, vec!["Tub_Tib_R".to_string(), "Sulc_R".to_string()]);

        // 另一侧完全独立.
        let missing = set.gather(&[Landmark::SupPat], Side::Left).unwrap_err();
        assert_eq!(missing, vec!["Sup_Pat_L".to_string()]);
    }

    #[test]
    fn test_marker_set_mirrored() {
        let set = MarkerSet::try_from_iter([
            ("Sulc_R", Point3::new(1.0, 0.0, 0.0)),
            ("Sulc_L", Point3::new(2.0, 0.0, 0.0)),
            ("Tub_Tib_R", Point3::new(3.0, 0.0, 0.0)),
            ("Unknown_Thing", Point3::new(4.0, 0.0, 0.0)),
        ])
        .unwrap();
        let m = set.mirrored();
        assert_eq!(m.len(), 4);
        assert_eq!(m.get("Sulc_L"), Some(&Point3::new(1.0, 0.0, 0.0)));
        assert_eq!(m.get("Sulc_R"), Some(&Point3::new(2.0, 0.0, 0.0)));
        assert_eq!(m.get("Tub_Tib_L"), Some(&Point3::new(3.0, 0.0, 0.0)));
        assert!(!m.contains("Tub_Tib_R"));
        assert_eq!(m.get("Unknown_Thing"), Some(&Point3::new(4.0, 0.0, 0.0)));
        assert_eq!(m.mirrored(), set);
    }
}
