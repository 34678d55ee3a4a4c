//! Admission control: quota-gated job creation and owner-scoped lookups.

mod error;
mod service;

pub use error::AdmissionError;
pub use service::AdmissionService;
