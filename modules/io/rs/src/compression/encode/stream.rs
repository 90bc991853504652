use super::config::Config;
use eyre::{Result, WrapErr};
use noodles::bgzf;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Output byte stream, optionally wrapped into a compression container.
pub enum Stream<W: Write + Send + Sync + 'static> {
    Raw(W),
    Gzip(flate2::write::GzEncoder<W>),
    Bgzf(bgzf::io::Writer<W>),
    MultithreadedBgzf(bgzf::io::MultithreadedWriter<W>),
}

impl Stream<File> {
    /// Create (or truncate) the file at `path` and wrap it according to the config.
    pub fn from_path(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .wrap_err_with(|| format!("Failed to create output file {}", path.display()))?;
        Self::new(file, config)
    }
}

impl<W: Write + Send + Sync + 'static> Stream<W> {
    pub fn new(inner: W, config: &Config) -> Result<Self> {
        match config {
            Config::Uncompressed => Ok(Stream::Raw(inner)),
            Config::Gzip(params) => {
                let encoder = flate2::write::GzEncoder::new(
                    inner,
                    flate2::Compression::new(*params.level() as u32),
                );
                Ok(Stream::Gzip(encoder))
            }
            Config::Bgzf(params) => {
                let level = bgzf::io::writer::CompressionLevel::new(*params.deflate().level())
                    .ok_or_else(|| eyre::eyre!("Invalid BGZF compression level"))?;
                if params.threads().get() == 1 {
                    let writer = bgzf::io::writer::Builder::default()
                        .set_compression_level(level)
                        .build_from_writer(inner);
                    Ok(Stream::Bgzf(writer))
                } else {
                    let writer = bgzf::io::multithreaded_writer::Builder::default()
                        .set_compression_level(level)
                        .set_worker_count(*params.threads())
                        .build_from_writer(inner);
                    Ok(Stream::MultithreadedBgzf(writer))
                }
            }
        }
    }

    pub fn boxed(self) -> Box<dyn Write + Send + Sync + 'static> {
        match self {
            Stream::Raw(file) => Box::new(file),
            Stream::Gzip(encoder) => Box::new(encoder),
            Stream::Bgzf(writer) => Box::new(writer),
            Stream::MultithreadedBgzf(writer) => Box::new(writer),
        }
    }
}
