pub use candidate::{AssemblyData, Breakend, Junction, JunctionFilter, Support, SvCandidate, SvType};
pub use config::{Config, Destination, Outputs};
pub use id::{JunctionId, JunctionIdGenerator};
pub use model::{GenotypeModel, Mode, OutputKind, PerModel};
pub use record::{Filter, Sink, SvRecord, Writer, COLUMNS};
pub use report::write_run_report;
pub use score::{Call, Genotype, Scorer, ScoringInput};
pub use streams::Streams;
pub use writer::{SvWriter, WriterStats};

mod candidate;
mod config;
mod id;
mod model;
mod record;
mod report;
mod score;
mod streams;
mod writer;
