//! 报表输出.

use knee_berry::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// 将 `report` 各列的覆盖率写进 `w` 中.
fn describe_into<W: Write>(report: &Report, w: &mut W) -> io::Result<()> {
    const S4: &str = "    ";

    #[inline]
    fn percent_to_display(n: usize, total: usize) -> String {
        match total {
            0 => "/".to_string(),
            t => format!("{:.1}%", 100.0 * n as f64 / t as f64),
        }
    }

    writeln!(w, "Studies in report: {}", report.len())?;
    for (key, n) in report.summary() {
        writeln!(
            w,
            "{S4}{:<36}{n:>6} ({})",
            key.title(),
            percent_to_display(n, report.len())
        )?;
    }
    Ok(())
}

/// 以 CSV 写出 `report`. `with_provenance` 为真时带出处列.
fn write_csv<W: Write>(report: &Report, w: W, with_provenance: bool) -> io::Result<()> {
    if with_provenance {
        report.write_csv_with_provenance(w)
    } else {
        report.write_csv(w)
    }
}

/// 输出报表: 有 `path` 时写入文件, 否则写到标准输出. 覆盖率写入日志.
pub fn emit(report: &Report, path: Option<&Path>, with_provenance: bool) -> io::Result<()> {
    match path {
        Some(p) => {
            write_csv(report, BufWriter::new(File::create(p)?), with_provenance)?;
            log::info!("Report written to `{}`", p.display());
        }
        None => write_csv(report, io::stdout().lock(), with_provenance)?,
    }

    let mut buf = Vec::with_capacity(2048);
    utils::sep_to(&mut buf)?;
    describe_into(report, &mut buf)?;
    utils::sep_to(&mut buf)?;
    log::info!("Coverage:\n{}", String::from_utf8_lossy(&buf));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{describe_into, emit};
    use knee_berry::prelude::*;

    #[test]
    fn test_describe_empty() {
        let mut buf = Vec::new();
        describe_into(&Report::new(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Studies in report: 0\n"));
        assert_eq!(text.lines().count(), 1 + INDICES_TOTAL);
        assert!(text.lines().skip(1).all(|l| l.ends_with("0 (/)")));
    }

    #[test]
    fn test_emit_to_file() {
        let mut report = Report::new();
        report.push_with_provenance(
            "s1",
            Provenance {
                rater: Some("rater".to_string()),
                timestamp: None,
            },
            KneeIndices::unavailable(),
        );

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.csv");
        emit(&report, Some(&plain), false).unwrap();
        let text = std::fs::read_to_string(&plain).unwrap();
        assert!(text.starts_with("ID,Insall Salvati Ratio R,"));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], format!("s1{}", ",".repeat(INDICES_TOTAL)));

        let with = dir.path().join("with.csv");
        emit(&report, Some(&with), true).unwrap();
        let text = std::fs::read_to_string(&with).unwrap();
        assert!(text.starts_with("ID,User,Timestamp,Insall Salvati Ratio R,"));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], format!("s1,rater,{}", ",".repeat(INDICES_TOTAL)));
    }
}
