//! Valuation jobs: the entity, its storage and its evaluation.

mod evaluator;
mod memory_store;
mod store;
mod types;

pub use evaluator::{EvaluationError, EvaluationOutcome, Evaluator, SimulatedEvaluator};
pub use memory_store::InMemoryJobStore;
pub use store::{JobError, JobStore};
pub use types::{Job, JobId, JobStatus};
