// Domain layer: request/response models, enum tables and ports. No network code here.

pub mod enums;
pub mod model;
pub mod ports;
