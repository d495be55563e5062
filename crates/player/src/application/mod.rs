//! Application layer: the randomizer roll engine.

pub mod randomizer;
