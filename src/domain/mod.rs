// Domain layer: search parameters, results, view models and ports.

pub mod flight;
pub mod hotel;
pub mod model;
pub mod ports;
pub mod restaurant;
