//! 各项指标的几何公式与公式目录.
//!
//! 一个公式可以同时给出多项指标 (内外侧倾斜角成对计算, 三项髌骨高度比值一起计算),
//! 它们共享同一组必需标记点.

use super::IndexKind;
use crate::consts::SCALE_FACTOR;
use crate::geometry::{
    angle_deg, distance_to_line, foot_on_line, line_intersection, ratio, CalcResult, Plane,
};
use crate::marker::Landmark;
use nalgebra::{distance, Point3};

/// Insall-Salvati 比值: 髌腱长度 / 髌骨长度, 在 `(y, z)` 平面内计算.
pub fn insall_salvati(
    sup_pat: &Point3<f64>,
    inf_pat: &Point3<f64>,
    tub_tib: &Point3<f64>,
) -> CalcResult<f64> {
    let [sup, inf, tub] = [sup_pat, inf_pat, tub_tib].map(|p| Plane::Sagittal.project(p));
    let patella = distance(&sup, &inf);
    let tendon = distance(&inf, &tub);
    ratio(tendon, patella)
}

/// 髌骨外侧平移: 滑车沟到髌骨前后缘连线的距离, 在 `(x, y)` 平面内计算.
pub fn lateral_translation(
    ant_pat: &Point3<f64>,
    pos_pat: &Point3<f64>,
    sulc: &Point3<f64>,
) -> CalcResult<f64> {
    let [ant, pos, sulc] = [ant_pat, pos_pat, sulc].map(|p| Plane::Axial.project(p));
    Ok(distance_to_line(&sulc, &ant, &pos)? * SCALE_FACTOR)
}

/// TT-TG 距离: 胫骨结节与滑车沟分别投影到后髁连线上, 两投影点之间的距离.
pub fn tt_tg(
    med_pos_cond: &Point3<f64>,
    lat_pos_cond: &Point3<f64>,
    tub_tib: &Point3<f64>,
    sulc: &Point3<f64>,
) -> CalcResult<f64> {
    let [med, lat, tub, sulc] =
        [med_pos_cond, lat_pos_cond, tub_tib, sulc].map(|p| Plane::Axial.project(p));
    let tt = foot_on_line(&tub, &med, &lat)?;
    let tg = foot_on_line(&sulc, &med, &lat)?;
    Ok(distance(&tt, &tg) * SCALE_FACTOR)
}

/// 髌骨倾斜角: 髌骨横轴 (内缘 - 外缘) 与后髁连线 (内 - 外) 的夹角.
pub fn patellar_tilt(
    med_pat: &Point3<f64>,
    lat_pat: &Point3<f64>,
    med_pos_cond: &Point3<f64>,
    lat_pos_cond: &Point3<f64>,
) -> CalcResult<f64> {
    angle_deg(&(med_pat - lat_pat), &(med_pos_cond - lat_pos_cond))
}

/// 髌骨外侧倾斜角: 髌骨外侧关节面 (后缘 - 外缘) 与前髁连线 (外 - 内) 的夹角.
///
/// # 注意
///
/// 旧版分析脚本调用时把内外侧前髁传反了, 实际以 (内 - 外) 为基准,
/// 其历史结果等于 `180 - 本函数结果`. 与历史数据对比时需要换算.
pub fn lateral_patellar_tilt(
    pos_pat: &Point3<f64>,
    lat_pat: &Point3<f64>,
    med_ant_cond: &Point3<f64>,
    lat_ant_cond: &Point3<f64>,
) -> CalcResult<f64> {
    angle_deg(&(pos_pat - lat_pat), &(lat_ant_cond - med_ant_cond))
}

/// Bisect offset: 过滑车沟作后髁连线的垂线, 与髌骨内外缘连线相交,
/// 交点外侧部分占髌骨宽度的比例. 在 `(x, y)` 平面内计算.
///
/// 垂线与髌骨连线平行时返回 `CalcError::ParallelLines`.
pub fn bisect_offset(
    sulc: &Point3<f64>,
    med_pos_cond: &Point3<f64>,
    lat_pos_cond: &Point3<f64>,
    lat_pat: &Point3<f64>,
    med_pat: &Point3<f64>,
) -> CalcResult<f64> {
    let [sulc, med_pc, lat_pc, lat, med] =
        [sulc, med_pos_cond, lat_pos_cond, lat_pat, med_pat].map(|p| Plane::Axial.project(p));
    let foot = foot_on_line(&sulc, &med_pc, &lat_pc)?;
    let cross = line_intersection((&foot, &sulc), (&lat, &med))?;
    ratio(lat.x - cross.x, lat.x - med.x)
}

/// 滑车沟角: 沟底分别指向外侧前髁与内侧前髁的两个向量的夹角.
pub fn sulcus_angle(
    lat_ant_cond: &Point3<f64>,
    med_ant_cond: &Point3<f64>,
    sulc: &Point3<f64>,
) -> CalcResult<f64> {
    angle_deg(&(lat_ant_cond - sulc), &(med_ant_cond - sulc))
}

/// 内外侧滑车倾斜角, 返回 `(外侧, 内侧)`.
///
/// 两者都以后髁连线 (外 - 内) 为基准.
pub fn inclination(
    lat_ant_cond: &Point3<f64>,
    med_ant_cond: &Point3<f64>,
    sulc: &Point3<f64>,
    med_pos_cond: &Point3<f64>,
    lat_pos_cond: &Point3<f64>,
) -> CalcResult<(f64, f64)> {
    let pcl = lat_pos_cond - med_pos_cond;
    let lateral = angle_deg(&(lat_ant_cond - sulc), &pcl)?;
    let medial = angle_deg(&(med_ant_cond - sulc), &pcl)?;
    Ok((lateral, medial))
}

/// 滑车深度: 滑车沟到前髁连线的垂直距离, 在 `(x, y)` 平面内计算.
pub fn trochlear_depth(
    med_ant_cond: &Point3<f64>,
    lat_ant_cond: &Point3<f64>,
    sulc: &Point3<f64>,
) -> CalcResult<f64> {
    let [med, lat, sulc] = [med_ant_cond, lat_ant_cond, sulc].map(|p| Plane::Axial.project(p));
    let foot = foot_on_line(&sulc, &med, &lat)?;
    Ok(distance(&foot, &sulc) * SCALE_FACTOR)
}

/// 三项髌骨高度比值.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PatellarHeight {
    /// 改良 Insall-Salvati 比值.
    pub modified_insall_salvati: f64,
    /// Caton-Deschamps 比值.
    pub caton_deschamps: f64,
    /// Blackburne-Peele 比值.
    pub blackburne_peele: f64,
}

/// 改良 Insall-Salvati, Caton-Deschamps 与 Blackburne-Peele 比值.
///
/// 长度均在 `(y, z)` 平面内计算. Blackburne-Peele 的分子是关节面下缘的竖直坐标
/// 减去胫骨平台点的原始第三分量, 两者其实是同一轴.
pub fn patellar_height(
    sup_pat: &Point3<f64>,
    inf_art_pat: &Point3<f64>,
    sup_ant_tib: &Point3<f64>,
    tub_tib: &Point3<f64>,
    sup_tib: &Point3<f64>,
) -> CalcResult<PatellarHeight> {
    let [sup, inf_art, ant_tib, tub] =
        [sup_pat, inf_art_pat, sup_ant_tib, tub_tib].map(|p| Plane::Sagittal.project(p));

    let articular = distance(&sup, &inf_art);
    let to_tibia = distance(&inf_art, &ant_tib);
    let to_tubercle = distance(&inf_art, &tub);

    Ok(PatellarHeight {
        modified_insall_salvati: ratio(to_tubercle, articular)?,
        caton_deschamps: ratio(to_tibia, articular)?,
        blackburne_peele: ratio(inf_art.y - sup_tib.z, articular)?,
    })
}

/// 滑车角: 前髁连线 (内 - 外) 与后髁连线 (内 - 外) 的夹角.
pub fn trochlear_angle(
    med_ant_cond: &Point3<f64>,
    lat_ant_cond: &Point3<f64>,
    med_pos_cond: &Point3<f64>,
    lat_pos_cond: &Point3<f64>,
) -> CalcResult<f64> {
    angle_deg(
        &(med_ant_cond - lat_ant_cond),
        &(med_pos_cond - lat_pos_cond),
    )
}

/// 公式目录中的一项: 输出哪些指标, 需要哪些标记点, 如何计算.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Formula {
    /// -> Insall-Salvati.
    InsallSalvati,
    /// -> 外侧平移.
    LateralTranslation,
    /// -> TT-TG.
    TtTg,
    /// -> 髌骨倾斜角.
    PatellarTilt,
    /// -> 髌骨外侧倾斜角.
    LateralPatellarTilt,
    /// -> Bisect offset.
    BisectOffset,
    /// -> 滑车沟角.
    SulcusAngle,
    /// -> 外侧/内侧倾斜角.
    Inclination,
    /// -> 滑车深度.
    TrochlearDepth,
    /// -> 改良 Insall-Salvati, Caton-Deschamps, Blackburne-Peele.
    PatellarHeight,
    /// -> 滑车角.
    TrochlearAngle,
}

impl Formula {
    /// 完整公式目录.
    pub const ALL: [Formula; 11] = [
        Formula::InsallSalvati,
        Formula::LateralTranslation,
        Formula::TtTg,
        Formula::PatellarTilt,
        Formula::LateralPatellarTilt,
        Formula::BisectOffset,
        Formula::SulcusAngle,
        Formula::Inclination,
        Formula::TrochlearDepth,
        Formula::PatellarHeight,
        Formula::TrochlearAngle,
    ];

    /// 日志中使用的名称.
    pub const fn name(&self) -> &'static str {
        match self {
            Formula::InsallSalvati => "Insall-Salvati",
            Formula::LateralTranslation => "Lateral Translation",
            Formula::TtTg => "TT-TG",
            Formula::PatellarTilt => "Patellar Tilt",
            Formula::LateralPatellarTilt => "Lateral Patellar Tilt",
            Formula::BisectOffset => "Bisect Offset",
            Formula::SulcusAngle => "Sulcus Angle",
            Formula::Inclination => "Inclination",
            Formula::TrochlearDepth => "Trochlear Depth",
            Formula::PatellarHeight => "Patellar Height Ratios",
            Formula::TrochlearAngle => "Trochlear Angle",
        }
    }

    /// 本公式给出的指标, 与 [`Self::eval`] 返回值一一对应.
    pub const fn outputs(&self) -> &'static [IndexKind] {
        match self {
            Formula::InsallSalvati => &[IndexKind::InsallSalvati],
            Formula::LateralTranslation => &[IndexKind::LateralTranslation],
            Formula::TtTg => &[IndexKind::TtTg],
            Formula::PatellarTilt => &[IndexKind::PatellarTilt],
            Formula::LateralPatellarTilt => &[IndexKind::LateralPatellarTilt],
            Formula::BisectOffset => &[IndexKind::BisectOffset],
            Formula::SulcusAngle => &[IndexKind::SulcusAngle],
            Formula::Inclination => &[IndexKind::LateralInclination, IndexKind::MedialInclination],
            Formula::TrochlearDepth => &[IndexKind::TrochlearDepth],
            Formula::PatellarHeight => &[
                IndexKind::ModifiedInsallSalvati,
                IndexKind::CatonDeschamps,
                IndexKind::BlackburnePeele,
            ],
            Formula::TrochlearAngle => &[IndexKind::TrochlearAngle],
        }
    }

    /// 必需的标记点, 顺序即 [`Self::eval`] 的参数顺序.
    pub const fn landmarks(&self) -> &'static [Landmark] {
        use Landmark::*;

        match self {
            Formula::InsallSalvati => &[SupPat, InfPat, TubTib],
            Formula::LateralTranslation => &[AntPat, PosPat, Sulc],
            Formula::TtTg => &[MedPosCond, LatPosCond, TubTib, Sulc],
            Formula::PatellarTilt => &[MedPat, LatPat, MedPosCond, LatPosCond],
            Formula::LateralPatellarTilt => &[PosPat, LatPat, MedAntCond, LatAntCond],
            Formula::BisectOffset => &[Sulc, MedPosCond, LatPosCond, LatPat, MedPat],
            Formula::SulcusAngle => &[LatAntCond, MedAntCond, Sulc],
            Formula::Inclination => &[LatAntCond, MedAntCond, Sulc, MedPosCond, LatPosCond],
            Formula::TrochlearDepth => &[MedAntCond, LatAntCond, Sulc],
            Formula::PatellarHeight => &[SupPat, InfArtPat, SupAntTib, TubTib, SupTib],
            Formula::TrochlearAngle => &[MedAntCond, LatAntCond, MedPosCond, LatPosCond],
        }
    }

    /// 以 [`Self::landmarks`] 顺序给出的坐标计算.
    ///
    /// # 注意
    ///
    /// `points` 的长度必须与 [`Self::landmarks`] 一致, 否则程序 panic.
    pub fn eval(&self, points: &[Point3<f64>]) -> CalcResult<Vec<f64>> {
        let ans = match (self, points) {
            (Formula::InsallSalvati, [sup, inf, tub]) => vec![insall_salvati(sup, inf, tub)?],
            (Formula::LateralTranslation, [ant, pos, sulc]) => {
                vec![lateral_translation(ant, pos, sulc)?]
            }
            (Formula::TtTg, [med, lat, tub, sulc]) => vec![tt_tg(med, lat, tub, sulc)?],
            (Formula::PatellarTilt, [med, lat, med_pc, lat_pc]) => {
                vec![patellar_tilt(med, lat, med_pc, lat_pc)?]
            }
            (Formula::LateralPatellarTilt, [pos, lat, med_ac, lat_ac]) => {
                vec![lateral_patellar_tilt(pos, lat, med_ac, lat_ac)?]
            }
            (Formula::BisectOffset, [sulc, med_pc, lat_pc, lat, med]) => {
                vec![bisect_offset(sulc, med_pc, lat_pc, lat, med)?]
            }
            (Formula::SulcusAngle, [lat_ac, med_ac, sulc]) => {
                vec![sulcus_angle(lat_ac, med_ac, sulc)?]
            }
            (Formula::Inclination, [lat_ac, med_ac, sulc, med_pc, lat_pc]) => {
                let (lateral, medial) = inclination(lat_ac, med_ac, sulc, med_pc, lat_pc)?;
                vec![lateral, medial]
            }
            (Formula::TrochlearDepth, [med_ac, lat_ac, sulc]) => {
                vec![trochlear_depth(med_ac, lat_ac, sulc)?]
            }
            (Formula::PatellarHeight, [sup, inf_art, ant_tib, tub, plateau]) => {
                let h = patellar_height(sup, inf_art, ant_tib, tub, plateau)?;
                vec![
                    h.modified_insall_salvati,
                    h.caton_deschamps,
                    h.blackburne_peele,
                ]
            }
            (Formula::TrochlearAngle, [med_ac, lat_ac, med_pc, lat_pc]) => {
                vec![trochlear_angle(med_ac, lat_ac, med_pc, lat_pc)?]
            }
            (f, p) => unreachable!(
                "formula `{}` takes {} landmarks, got {}",
                f.name(),
                f.landmarks().len(),
                p.len()
            ),
        };
        debug_assert_eq!(ans.len(), self.outputs().len());
        Ok(ans)
    }
}
