pub mod emitters;
pub mod generator;

pub use generator::{EndpointMapGenerator, ReferenceGenerator, SummaryGenerator};
