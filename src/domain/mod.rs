// Domain layer: the card model and the ports the fetch machinery depends on.

pub mod model;
pub mod ports;
