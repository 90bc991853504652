use std::io::Write;
use std::path::Path;

use eyre::{Result, WrapErr};
use svbit_evidence_rs::CohortCounts;
use svbit_io_rs::compression::encode;

use crate::writer::WriterStats;

/// Write the evidence totals of the run followed by the writer statistics.
pub fn write_run_report(
    path: impl AsRef<Path>,
    evidence: &CohortCounts,
    stats: &WriterStats,
) -> Result<()> {
    let path = path.as_ref();
    let mut out = encode::infer_from_path(path)?.boxed();
    evidence
        .write(&mut out)
        .and_then(|_| stats.write(&mut out))
        .and_then(|_| Ok(out.flush()?))
        .wrap_err_with(|| format!("Failed to write the run report {}", path.display()))?;
    log::info!("Run report saved to {}", path.display());
    Ok(())
}
