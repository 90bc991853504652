pub use direction::Direction;
pub use interval::Interval;

mod direction;
mod interval;
