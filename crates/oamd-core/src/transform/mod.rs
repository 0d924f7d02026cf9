pub mod spec_to_ir;

pub use spec_to_ir::{TransformOptions, transform, transform_with_options};
