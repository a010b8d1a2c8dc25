use domain_verify::utils::logger::{self, LogFormat};
use domain_verify::{generate_verification_code, verify_domain, Result};

const DOMAIN: &str = "yourwebsite.com";
const BUSINESS_NAME: &str = "yourbusinessname"; // 僅限英數字
const FORMAT: &str = "{{businessName}}-domain-verification={{code}}";
// 示範用的固定 code，實際使用時應該是先前產生並保存的 code
const WANTED_CODE: &str = "asdf1234asdf1234asdf1234asdf1234asdf1234";

async fn verify_domain_ownership() -> Result<bool> {
    let result = generate_verification_code(DOMAIN, BUSINESS_NAME, Some(FORMAT)).await?;
    println!("{}", result.instructions);

    // 網域擁有者加上 TXT 記錄之後
    let verification_string = format!("{}-domain-verification={}", BUSINESS_NAME, WANTED_CODE);
    verify_domain(DOMAIN, &verification_string).await
}

#[tokio::main]
async fn main() {
    logger::init_cli_logger(false, LogFormat::Compact);

    match verify_domain_ownership().await {
        Ok(true) => println!("Verification successful."),
        Ok(false) => println!("Verification failed."),
        Err(e) => eprintln!("Error during verification: {}", e),
    }
}
