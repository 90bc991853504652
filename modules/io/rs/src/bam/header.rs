use std::path::Path;

use eyre::{Result, WrapErr};
use noodles::{bam, sam};

/// Read the SAM header of a BAM file.
pub fn read_header(path: impl AsRef<Path>) -> Result<sam::Header> {
    let path = path.as_ref();
    let mut reader = bam::io::reader::Builder::default()
        .build_from_path(path)
        .wrap_err_with(|| format!("Failed to open BAM file {}", path.display()))?;
    let header = reader
        .read_header()
        .wrap_err_with(|| format!("Failed to read BAM header from {}", path.display()))?;
    log::debug!(
        "Read BAM header of {}: {} reference sequence(s), {} read group(s)",
        path.display(),
        header.reference_sequences().len(),
        header.read_groups().len()
    );
    Ok(header)
}

/// Render the header as SAM text, the form metadata lookups operate on.
pub fn header_text(header: &sam::Header) -> Result<String> {
    let mut buffer = Vec::new();
    {
        let mut writer = sam::io::Writer::new(&mut buffer);
        writer.write_header(header)?;
    }
    Ok(String::from_utf8(buffer)?)
}
