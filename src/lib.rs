// src/lib.rs

pub mod core;
pub mod error;
pub mod logging;
pub mod persistence;
pub use crate::core::dictionary::Dictionary;
pub use crate::core::normalize::normalize;
pub use crate::core::types::{Count, WordEntry};
pub use crate::error::{DictionaryError, LogError};
pub use crate::logging::{LogLevel, LogSink};
