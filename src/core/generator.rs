use crate::core::template;
use crate::domain::model::{VerificationRequest, VerificationResult};
use crate::domain::ports::EntropySource;
use crate::utils::error::Result;
use chrono::Utc;

/// 16 bytes, 32 hex characters.
pub const CODE_BYTES: usize = 16;

pub struct TokenGenerator<E: EntropySource> {
    entropy: E,
}

impl<E: EntropySource> TokenGenerator<E> {
    pub fn new(entropy: E) -> Self {
        Self { entropy }
    }

    /// 每次呼叫都重新取 entropy，呼叫之間沒有共用狀態
    pub fn generate_code(&self) -> Result<String> {
        let mut bytes = [0u8; CODE_BYTES];
        self.entropy.fill(&mut bytes)?;
        Ok(hex::encode(bytes))
    }

    pub fn generate(&self, request: &VerificationRequest) -> Result<VerificationResult> {
        let code = self.generate_code()?;
        let formatted_string = template::render(&request.format, &request.business_name, &code);
        let instructions = template::instructions(&request.domain, &formatted_string);

        tracing::debug!(
            "Generated verification code for {} ({} chars)",
            request.domain,
            code.len()
        );

        Ok(VerificationResult {
            domain: request.domain.clone(),
            code,
            formatted_string,
            instructions,
            issued_at: Utc::now(),
        })
    }
}
