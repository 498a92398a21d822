//! OpenAPI rendering adapters.

mod generator_cli;
pub mod openapi;
mod skeleton;

pub use generator_cli::{DEFAULT_BINARY, OpenApiGeneratorCli};
pub use skeleton::{SPEC_FILE_NAME, SkeletonRenderer};
