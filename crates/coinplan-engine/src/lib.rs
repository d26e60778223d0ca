//! coinplan engine: coin identity resolution, technical analysis and
//! request coordination.
//!
//! The [`Coordinator`] is the only component with side effects beyond
//! memory. It depends on the stateful [`CoinDirectory`] and plan cache,
//! and on the pure [`analyzer`] and [`narrative`] modules.

pub mod analyzer;
pub mod coordinator;
pub mod directory;
pub mod error;
pub mod narrative;

pub use analyzer::{analyze, PlanLevels, ATR_PERIOD, MIN_CANDLES};
pub use coordinator::Coordinator;
pub use directory::{populate, CoinDirectory};
pub use error::EngineError;
pub use narrative::narrate;
