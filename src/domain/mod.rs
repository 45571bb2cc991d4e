pub mod color;
pub mod round;
pub mod rules;
