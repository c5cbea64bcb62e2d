// Domain layer: data model shared by the core and the adapters, plus the ports the core depends on.

pub mod model;
pub mod ports;
