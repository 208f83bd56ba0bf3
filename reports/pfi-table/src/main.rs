//! 批量计算数据集中全部检查的髌股对线指标, 输出 CSV 报表.
//!
//! 环境变量:
//!
//! - `KNEE_DATASET_DIR`: 数据集目录, 默认 `$HOME/dataset/knee`;
//! - `KNEE_RECORD_STEM`: 记录文件名主干, 默认 `fields`;
//! - `KNEE_REPORT_PATH`: 报表输出路径, 默认输出到标准输出;
//! - `KNEE_REPORT_PROVENANCE`: 为 `0` 时不输出标注者与标注时间两列;
//! - `RUST_LOG`: 日志级别, 默认 `info`.

mod result;
mod runner;

use simple_logger::SimpleLogger;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()?;

    let report = runner::run()?;
    result::emit(
        &report,
        utils::loader::report_path_from_env().as_deref(),
        utils::loader::report_provenance_from_env(),
    )?;
    Ok(())
}
