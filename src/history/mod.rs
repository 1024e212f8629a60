//! Loading and normalizing optimizer iteration histories.

pub mod parser;
pub mod record;

pub use parser::{parse, parse_json, ParsedHistory, Snapshot};
pub use record::{IterationRecord, OptimizationRecord, PersonalBest, PositionEntry};
