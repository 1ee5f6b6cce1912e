pub mod battery;
pub mod calibration;
pub mod camera;
pub mod display;
pub mod features;
pub mod identity;
pub mod missing;
pub mod os;
pub mod performance;
pub mod resolution;
pub mod sections;
pub mod units;

use std::sync::LazyLock;

use crate::domain::model::{RawSpecRecord, TypedSpecRecord};
use crate::utils::error::Result;
use battery::{BatteryExtractor, BatterySpec};
use calibration::Calibration;
use camera::CameraSpec;
use display::{DisplayExtractor, DisplaySpec};
use features::FeatureSpec;
use os::OsSpec;
use performance::{PerformanceExtractor, PerformanceSpec};
use sections::{split_sections, DetailsNormalizer};

static DEFAULT_PARSER: LazyLock<SpecParser> = LazyLock::new(|| {
    SpecParser::new(Calibration::default()).expect("default calibration patterns compile")
});

/// Every extracted attribute before the missing-value policy runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedSpec {
    pub mobile_name: Option<String>,
    pub price: Option<u64>,
    pub spec_score: Option<u32>,
    pub performance: PerformanceSpec,
    pub display: DisplaySpec,
    pub camera: CameraSpec,
    pub battery: BatterySpec,
    pub os: OsSpec,
    pub features: FeatureSpec,
}

/// Record-local transform from raw catalog text to a typed record.
///
/// Holds only compiled patterns and read-only tables, so one instance can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct SpecParser {
    calibration: Calibration,
    normalizer: DetailsNormalizer,
    performance: PerformanceExtractor,
    display: DisplayExtractor,
    battery: BatteryExtractor,
}

impl SpecParser {
    pub fn new(calibration: Calibration) -> Result<Self> {
        Ok(Self {
            normalizer: DetailsNormalizer::new(&calibration.camera_false_splits)?,
            performance: PerformanceExtractor::new(&calibration)?,
            display: DisplayExtractor::new(&calibration)?,
            battery: BatteryExtractor::new(&calibration)?,
            calibration,
        })
    }

    pub fn extract(&self, raw: &RawSpecRecord) -> ExtractedSpec {
        let normalized = self.normalizer.normalize(&raw.details_text);
        let sections = split_sections(&normalized);

        ExtractedSpec {
            mobile_name: identity::mobile_name(&raw.mobile_name),
            price: identity::price(&raw.price_text),
            spec_score: identity::spec_score(&raw.spec_score_text),
            performance: self
                .performance
                .extract(sections.performance.as_deref(), &self.calibration),
            display: self.display.extract(sections.display.as_deref()),
            camera: camera::extract(sections.camera.as_deref()),
            battery: self.battery.extract(sections.battery.as_deref()),
            os: os::extract(&raw.os_text, &self.calibration),
            features: features::extract(&raw.features_text),
        }
    }

    pub fn parse(&self, raw: &RawSpecRecord) -> TypedSpecRecord {
        if raw.is_blank() {
            tracing::debug!("Blank raw record, emitting all-missing row");
        }
        let extracted = self.extract(raw);
        tracing::debug!(
            mobile_name = extracted.mobile_name.as_deref().unwrap_or(""),
            "Parsed spec record"
        );
        missing::apply(extracted, &self.calibration.missing_sentinel)
    }
}

/// Parse with the default calibration tables.
pub fn parse_record(raw: &RawSpecRecord) -> TypedSpecRecord {
    DEFAULT_PARSER.parse(raw)
}
