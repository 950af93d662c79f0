pub mod round;
pub mod score;
pub mod slot;
pub mod state;
