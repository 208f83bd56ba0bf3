//! 程序运行函数.

use knee_berry::prelude::*;
use std::error::Error;
use utils::loader;

/// 检查标识与报表行出处.
type StudyKey = (String, Provenance);

/// 实际运行.
///
/// 找不到记录文件的检查不进入报表. 记录无法读取或转换的检查会记录日志,
/// 并在报表中占一行全部不可用的指标.
pub fn run() -> Result<Report, Box<dyn Error>> {
    let studies = load_studies(loader::study_loader_from_env_or_home()?);
    if studies.is_empty() {
        return Err("no study record found in dataset directory".into());
    }

    log::info!("Analyzing {} studies...", studies.len());
    Ok(build_report(analyze_batch(&studies)))
}

/// 读取全部检查的标记点集合. 无法使用的记录以空集合代替.
fn load_studies<I>(loader: I) -> Vec<(StudyKey, MarkerSet)>
where
    I: Iterator<Item = (String, Result<StudyRecord, RecordError>)>,
{
    loader
        .filter_map(|(id, record)| {
            let record = match record {
                Ok(record) => record,
                Err(RecordError::NotFound(dir)) => {
                    log::warn!("Skipping study `{id}`: no record in `{}`", dir.display());
                    return None;
                }
                Err(e) => {
                    log::error!("Study `{id}` is unreadable: {e}");
                    return Some(((id, Provenance::default()), MarkerSet::new()));
                }
            };

            let provenance = record.provenance();
            log::debug!(
                "Study `{id}` last rated by `{}` at {}",
                provenance.rater.as_deref().unwrap_or("/"),
                provenance.timestamp.as_deref().unwrap_or("/")
            );
            let markers = record.marker_set().unwrap_or_else(|e| {
                log::error!("Study `{id}` has invalid markers: {e}");
                MarkerSet::new()
            });
            Some(((id, provenance), markers))
        })
        .collect()
}

/// 汇总分析结果. 整体分析失败的检查以全部不可用的一行出现在报表中.
fn build_report<I>(results: I) -> Report
where
    I: IntoIterator<Item = (StudyKey, Result<KneeIndices, AnalyzeError>)>,
{
    let mut report = Report::new();
    for ((id, provenance), indices) in results {
        let indices = match indices {
            Ok(indices) => {
                log::info!(
                    "Study `{id}`: {}/{INDICES_TOTAL} indices computed",
                    indices.available()
                );
                indices
            }
            Err(e) => {
                log::warn!("Study `{id}` reported as unavailable: {e}");
                KneeIndices::unavailable()
            }
        };
        report.push_with_provenance(id, provenance, indices);
    }
    report
}
