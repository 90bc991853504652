pub use cohort::CohortCounts;
pub use engine::{Collector, Engine, EngineBuilder, Harvest, Partition};
pub use evidence_type::{EvidenceType, PerEvidenceType};
pub use input::{EvidenceCount, ReadInputCounts};
pub use merge::Merge;
pub use sample::{EvidenceTypeCounts, SampleCounts};

pub mod checkpoint;
mod cohort;
mod engine;
mod evidence_type;
mod input;
mod merge;
mod sample;
