// Domain layer: ladder models and the ports the fetcher and renderer talk through.

pub mod model;
pub mod ports;
