pub mod engine;
pub mod generator;
pub mod template;
pub mod verifier;

pub use crate::domain::model::{MatchPolicy, TxtRecord, VerificationRequest, VerificationResult};
pub use crate::domain::ports::{ConfigProvider, EntropySource, TxtResolver};
pub use crate::utils::error::Result;
