pub mod sequence;
pub mod time;
