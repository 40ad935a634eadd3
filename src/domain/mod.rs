// Domain layer: core models and ports (interfaces). No broker or CLI types in here.

pub mod model;
pub mod ports;
