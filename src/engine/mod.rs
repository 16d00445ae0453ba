pub mod engine;


pub use engine::{TransformSummary, Transformer};
