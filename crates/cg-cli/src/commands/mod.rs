pub mod check;
pub mod levels;
pub mod play;
