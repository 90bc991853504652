pub mod bam;
pub mod compression;
mod traits;

pub use traits::WriteRecord;
