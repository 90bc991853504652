use super::params;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Config {
    #[default]
    Uncompressed,
    Gzip(params::Deflate),
    Bgzf(params::Bgzf),
}

impl Config {
    pub fn infer_from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| match ext {
                "gz" | "gzip" => Config::Gzip(Default::default()),
                "bgz" | "bgzf" => Config::Bgzf(Default::default()),
                _ => Config::Uncompressed,
            })
            .unwrap_or(Config::Uncompressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_from_path() {
        for (path, expected) in [
            ("calls.vcf", Config::Uncompressed),
            ("calls", Config::Uncompressed),
            ("calls.vcf.gz", Config::Gzip(params::Deflate::DEFAULT)),
            ("calls.vcf.bgz", Config::Bgzf(params::Bgzf::DEFAULT)),
        ] {
            assert_eq!(Config::infer_from_path(path), expected, "{path}");
        }
    }
}
