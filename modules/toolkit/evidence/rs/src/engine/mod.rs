pub use builder::EngineBuilder;
pub use collector::Collector;
pub use engine::{Engine, Harvest};
pub use partition::Partition;
use worker::Worker;

mod builder;
mod collector;
#[allow(clippy::module_inception)]
mod engine;
mod partition;
mod worker;
