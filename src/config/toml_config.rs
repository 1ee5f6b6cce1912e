use crate::core::ConfigProvider;
use crate::parser::calibration::Calibration;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate, OUTPUT_FORMATS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env placeholder pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
    pub calibration: Option<Calibration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    pub parallel: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    fn delimiter_char(&self) -> char {
        self.source
            .delimiter
            .as_deref()
            .and_then(|d| d.chars().next())
            .unwrap_or(',')
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn delimiter(&self) -> u8 {
        self.delimiter_char() as u8
    }

    fn compression(&self) -> Option<&str> {
        self.load
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_str())
    }

    fn parallel(&self) -> bool {
        self.transform.parallel.unwrap_or(true)
    }

    fn calibration(&self) -> Calibration {
        self.calibration.clone().unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("source.path", &self.source.path)?;

        if let Some(delimiter) = &self.source.delimiter {
            if delimiter.chars().count() != 1 {
                return Err(EtlError::InvalidConfigValueError {
                    field: "source.delimiter".to_string(),
                    value: delimiter.clone(),
                    reason: "Delimiter must be a single character".to_string(),
                });
            }
        }
        validation::validate_delimiter("source.delimiter", self.delimiter_char())?;

        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_allowed_values(
            "load.output_formats",
            &self.load.output_formats,
            OUTPUT_FORMATS,
        )?;

        if let Some(compression) = self.load.compression.as_ref().filter(|c| c.enabled) {
            validation::validate_non_empty_string("load.compression.filename", &compression.filename)?;
        }

        if let Some(calibration) = &self.calibration {
            calibration.validate()?;
        }

        Ok(())
    }
}
