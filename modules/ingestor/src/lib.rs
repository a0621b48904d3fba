pub mod endpoints;
pub mod extract;
pub mod graph;
pub mod model;
pub mod normalize;
pub mod service;
