mod config;
pub mod params;
mod stream;

pub use config::Config;
pub use stream::Stream;

/// Create the file and wrap it with the encoder inferred from its extension.
pub fn infer_from_path(path: impl AsRef<std::path::Path>) -> eyre::Result<Stream<std::fs::File>> {
    let path = path.as_ref();
    Stream::from_path(path, &Config::infer_from_path(path))
}
