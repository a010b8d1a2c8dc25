use crate::adapters::{HickoryTxtResolver, OsEntropy};
use crate::core::generator::TokenGenerator;
use crate::core::verifier::TxtVerifier;
use crate::domain::model::{MatchPolicy, VerificationRequest, VerificationResult};
use crate::domain::ports::{EntropySource, TxtResolver};
use crate::utils::error::Result;

/// Generation and verification behind one value. Holds no mutable state, so
/// a shared reference can serve concurrent callers.
pub struct DomainVerifier<E: EntropySource, R: TxtResolver> {
    generator: TokenGenerator<E>,
    verifier: TxtVerifier<R>,
}

impl DomainVerifier<OsEntropy, HickoryTxtResolver> {
    pub fn from_system_conf() -> Result<Self> {
        Ok(Self::new(OsEntropy, HickoryTxtResolver::from_system_conf()?))
    }
}

impl<E: EntropySource, R: TxtResolver> DomainVerifier<E, R> {
    pub fn new(entropy: E, resolver: R) -> Self {
        Self {
            generator: TokenGenerator::new(entropy),
            verifier: TxtVerifier::new(resolver),
        }
    }

    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.verifier = self.verifier.with_match_policy(policy);
        self
    }

    pub async fn generate(&self, request: &VerificationRequest) -> Result<VerificationResult> {
        self.generator.generate(request)
    }

    /// Callback form of [`generate`](Self::generate); the callback receives
    /// exactly what the direct call would return.
    pub async fn generate_with<F>(&self, request: &VerificationRequest, callback: F)
    where
        F: FnOnce(Result<VerificationResult>),
    {
        callback(self.generate(request).await);
    }

    pub async fn verify(&self, domain: &str, verification_string: &str) -> Result<bool> {
        self.verifier.verify(domain, verification_string).await
    }

    pub async fn verify_with<F>(&self, domain: &str, verification_string: &str, callback: F)
    where
        F: FnOnce(Result<bool>),
    {
        callback(self.verify(domain, verification_string).await);
    }
}
