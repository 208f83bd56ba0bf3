//! 单元测试共用的标记点数据.

use crate::marker::MarkerSet;
use nalgebra::Point3;

/// 右膝的一组完整且不退化的标记点.
const RIGHT: [(&str, [f64; 3]); 15] = [
    ("Sup_Pat", [5.0, 42.0, 45.0]),
    ("Inf_Pat", [5.0, 40.0, 5.0]),
    ("Inf_Art_Pat", [5.0, 36.0, 10.0]),
    ("Ant_Pat", [6.0, 45.0, 20.0]),
    ("Pos_Pat", [4.0, 30.0, 20.0]),
    ("Med_Pat", [-12.0, 36.0, 21.0]),
    ("Lat_Pat", [20.0, 38.0, 19.0]),
    ("Sulc", [2.0, 18.0, 0.5]),
    ("Med_Ant_Cond", [-18.0, 25.0, 1.0]),
    ("Lat_Ant_Cond", [22.0, 28.0, 0.0]),
    ("Med_Pos_Cond", [-20.0, -10.0, 0.0]),
    ("Lat_Pos_Cond", [20.0, -12.0, 0.0]),
    ("Tub_Tib", [12.0, 30.0, -60.0]),
    ("Sup_Ant_Tib", [5.0, 32.0, -15.0]),
    ("Sup_Tib", [5.0, 10.0, -12.0]),
];

/// 左右两侧都完整的标记点集合. 左侧是右侧做 x 方向镜像后再轻微扰动的结果,
/// 因此两侧的指标数值不同.
pub(crate) fn full_marker_set() -> MarkerSet {
    let right = RIGHT
        .iter()
        .map(|(stem, [x, y, z])| (format!("{stem}_R"), Point3::new(*x, *y, *z)));
    let left = RIGHT.iter().enumerate().map(|(i, (stem, [x, y, z]))| {
        let jitter = 0.25 * (i % 4) as f64;
        (
            format!("{stem}_L"),
            Point3::new(-*x + jitter, *y - jitter, *z + 0.5 * jitter),
        )
    });
    MarkerSet::try_from_iter(right.chain(left)).unwrap()
}
