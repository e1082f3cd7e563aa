// Domain layer: the student entity and the ports the directory depends on.

pub mod model;
pub mod ports;
