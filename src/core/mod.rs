// src/core/mod.rs
pub mod dictionary;
pub mod normalize;
pub mod types;
