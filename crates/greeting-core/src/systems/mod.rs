pub mod celebration;
pub mod confetti;
pub mod navigator;
pub mod particle;
pub mod pile;
