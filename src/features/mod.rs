pub mod chart;
pub mod export;
pub mod launcher;
pub mod probe;
pub mod sampling;
