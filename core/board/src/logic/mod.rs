//! 核心業務邏輯

pub mod board;
pub mod generator;
pub mod movement;
pub mod range;
