pub mod toml_config;

use crate::core::ConfigProvider;
use crate::parser::calibration::Calibration;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate, OUTPUT_FORMATS};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "mobile-spec-etl"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Normalize free-text phone specifications into typed records")
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(short, long, help = "Delimited file with raw spec records"))]
    pub input: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ',', default_value = "csv"))]
    pub formats: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = ","))]
    pub delimiter: char,

    #[cfg_attr(
        feature = "cli",
        arg(long, help = "Bundle all outputs into this ZIP file inside the output path")
    )]
    pub compress: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "TOML file overriding the calibration tables"))]
    pub calibration_file: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Parse records on a single thread"))]
    pub sequential: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(skip))]
    #[serde(default)]
    pub calibration: Calibration,
}

impl CliConfig {
    /// 載入 `--calibration-file` 指定的校正表 (若有)
    pub fn load_calibration(&mut self) -> Result<()> {
        if let Some(path) = &self.calibration_file {
            self.calibration = load_calibration_file(path)?;
        }
        Ok(())
    }
}

pub fn load_calibration_file<P: AsRef<Path>>(path: P) -> Result<Calibration> {
    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| EtlError::ConfigValidationError {
        field: "calibration_file".to_string(),
        message: format!("TOML parsing error: {}", e),
    })
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn delimiter(&self) -> u8 {
        self.delimiter as u8
    }

    fn compression(&self) -> Option<&str> {
        self.compress.as_deref()
    }

    fn parallel(&self) -> bool {
        !self.sequential
    }

    fn calibration(&self) -> Calibration {
        self.calibration.clone()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_allowed_values("formats", &self.formats, OUTPUT_FORMATS)?;
        validation::validate_delimiter("delimiter", self.delimiter)?;
        if let Some(archive) = &self.compress {
            validation::validate_non_empty_string("compress", archive)?;
        }
        self.calibration.validate()
    }
}
