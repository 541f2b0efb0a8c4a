//! Savings growth projection with monthly compounding and contributions

mod input;
mod state;
mod projection;
mod engine;

pub use input::SavingsInput;
pub use state::SavingsState;
pub use projection::{ProjectionPoint, SavingsResult};
pub use engine::{compute_projection, ProjectionEngine, ProjectionMethod};
