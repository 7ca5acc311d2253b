//! Cost of Delay engine: urgency loss profiles, CD3 and opportunity cost, team burn rates, plus
//! the comparison, persistence and export layers built on top of them.

pub mod comparison;
pub mod delay;
pub mod employee;
pub mod error;
pub mod evaluate;
pub mod executive;
pub mod export;
pub mod format;
pub mod models;
pub mod report;
pub mod session;
pub mod store;
pub mod urgency;
