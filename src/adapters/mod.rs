// Adapters layer: concrete implementations of the domain ports (DNS, entropy).

pub mod dns;
pub mod entropy;
pub mod static_resolver;

pub use dns::HickoryTxtResolver;
pub use entropy::OsEntropy;
pub use static_resolver::StaticTxtResolver;
