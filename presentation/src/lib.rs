pub mod cli;
pub mod pacing;
pub mod render;
