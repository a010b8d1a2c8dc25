use crate::domain::model::{BUSINESS_NAME_PLACEHOLDER, CODE_PLACEHOLDER};

/// 套用格式字串。每個 placeholder 只替換第一次出現的位置，先 businessName 再 code
pub fn render(format: &str, business_name: &str, code: &str) -> String {
    format
        .replacen(BUSINESS_NAME_PLACEHOLDER, business_name, 1)
        .replacen(CODE_PLACEHOLDER, code, 1)
}

pub fn instructions(domain: &str, formatted_string: &str) -> String {
    format!(
        "Please add the following TXT record to your DNS settings for the domain {}: {}",
        domain, formatted_string
    )
}
