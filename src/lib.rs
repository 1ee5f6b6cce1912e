pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod parser;
pub mod utils;

pub use adapters::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use config::CliConfig;
pub use core::{etl::EtlEngine, pipeline::SpecPipeline};
pub use domain::model::{RawSpecRecord, TypedSpecRecord};
pub use parser::calibration::Calibration;
pub use parser::{parse_record, SpecParser};
pub use utils::error::{EtlError, Result};
