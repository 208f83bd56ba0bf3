//! 通用常量.

/// 距离类指标的成像比例校正系数.
///
/// 仅作用于外侧平移 (lateral translation), TT-TG 距离和滑车深度三项,
/// 且每项只乘一次. 角度与比值类指标均不使用它.
pub const SCALE_FACTOR: f64 = 0.7;

/// 单侧膝关节的指标个数.
pub const INDICES_PER_SIDE: usize = 14;

/// 左右两侧的指标总数.
pub const INDICES_TOTAL: usize = INDICES_PER_SIDE * 2;

/// 标记点记录文件的默认文件名主干 (不含时间戳与扩展名).
pub const DEFAULT_RECORD_STEM: &str = "fields";

/// 标记点记录文件扩展名.
pub const RECORD_EXTENSION: &str = "json";

/// 时间戳格式, 例如 `2021-03-04T10:22:31`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// 报表首列列名.
pub const ID_COLUMN: &str = "ID";

/// 带出处的报表中, 标注者列名.
pub const USER_COLUMN: &str = "User";

/// 带出处的报表中, 标注时间列名.
pub const TIMESTAMP_COLUMN: &str = "Timestamp";
