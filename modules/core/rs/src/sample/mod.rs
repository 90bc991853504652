pub use per_sample::PerSample;
pub use role::SampleRole;

mod per_sample;
mod role;
