// Domain layer: models and ports. Concrete DNS/entropy implementations live under adapters.

pub mod model;
pub mod ports;
