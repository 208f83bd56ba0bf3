//! 报表工具依赖的通用组件.

pub mod loader;

const SEP: &str = "--------------------------------------------------------";

/// 简单分隔线.
#[inline]
pub fn sep_to<W: std::io::Write>(mut w: W) -> std::io::Result<()> {
    writeln!(&mut w, "{SEP}")
}

#[cfg(test)]
mod tests {
    use super::{sep_to, SEP};

    #[test]
    fn test_sep_to() {
        let mut buf = Vec::new();
        sep_to(&mut buf).unwrap();
        sep_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), format!("{SEP}\n{SEP}\n"));
    }
}
