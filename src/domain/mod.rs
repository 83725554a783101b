// Domain layer: response models and ports (interfaces). Concrete adapters live in `adapters`.

pub mod model;
pub mod ports;
