pub use contigs::{headers_compatible, Contig, ContigTable};
pub use header::{header_text, read_header};
pub use region::{parse_region, Region, RegionError};
pub use sample::{extract_sample_name, sample_name};

mod contigs;
mod header;
mod region;
mod sample;
