use serde::{Deserialize, Serialize};

/// One source row. Every field is free text and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSpecRecord {
    #[serde(default, alias = "name", alias = "Mobile Name", alias = "model")]
    pub mobile_name: String,
    #[serde(default, alias = "spec_score", alias = "Spec Score", alias = "rating")]
    pub spec_score_text: String,
    #[serde(default, alias = "os", alias = "OS", alias = "Operating System")]
    pub os_text: String,
    #[serde(default, alias = "price", alias = "Price")]
    pub price_text: String,
    #[serde(default, alias = "details", alias = "specs", alias = "Specifications")]
    pub details_text: String,
    #[serde(default, alias = "features", alias = "other_features", alias = "Features")]
    pub features_text: String,
}

impl RawSpecRecord {
    pub fn is_blank(&self) -> bool {
        [
            &self.mobile_name,
            &self.spec_score_text,
            &self.os_text,
            &self.price_text,
            &self.details_text,
            &self.features_text,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }
}

/// Normalized output row.
///
/// Numeric attributes are `None` when unknown; categorical attributes carry
/// the missing sentinel instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedSpecRecord {
    pub mobile_name: String,
    pub price: Option<u64>,
    pub spec_score: Option<u32>,

    pub cores: String,
    pub no_of_cores: Option<u32>,
    pub clock_speed_ghz: Option<f64>,
    pub chipset: String,
    pub ram_gb: Option<f64>,

    pub display_size_inches: Option<f64>,
    pub display_size_cm: Option<f64>,
    pub resolution: String,
    pub resolution_width: Option<u32>,
    pub resolution_height: Option<u32>,
    pub display_type: String,
    pub refresh_rate_hz: Option<u32>,

    pub rear_camera: String,
    pub front_camera: String,
    pub flash: String,
    pub primary_camera_mp: Option<f64>,
    pub front_camera_mp: Option<f64>,
    pub rear_camera_count: Option<u32>,

    pub battery_mah: Option<u32>,
    pub charging_port: String,
    pub usb_version: Option<f64>,
    pub charging_type: String,
    pub removable_battery: String,

    pub os_family: String,
    pub os_version: String,

    pub storage_gb: Option<f64>,
    pub expandable_storage_gb: Option<f64>,
    pub sim_type: String,
    pub wifi_calling: String,
    pub fingerprint_sensor: String,
    pub ip_rating: String,
}

impl TypedSpecRecord {
    pub const HEADERS: [&'static str; 34] = [
        "mobile_name",
        "price",
        "spec_score",
        "cores",
        "no_of_cores",
        "clock_speed_ghz",
        "chipset",
        "ram_gb",
        "display_size_inches",
        "display_size_cm",
        "resolution",
        "resolution_width",
        "resolution_height",
        "display_type",
        "refresh_rate_hz",
        "rear_camera",
        "front_camera",
        "flash",
        "primary_camera_mp",
        "front_camera_mp",
        "rear_camera_count",
        "battery_mah",
        "charging_port",
        "usb_version",
        "charging_type",
        "removable_battery",
        "os_family",
        "os_version",
        "storage_gb",
        "expandable_storage_gb",
        "sim_type",
        "wifi_calling",
        "fingerprint_sensor",
        "ip_rating",
    ];

    /// Field values in `HEADERS` order; `None` renders as an empty cell.
    pub fn to_row(&self) -> Vec<String> {
        fn num<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        vec![
            self.mobile_name.clone(),
            num(&self.price),
            num(&self.spec_score),
            self.cores.clone(),
            num(&self.no_of_cores),
            num(&self.clock_speed_ghz),
            self.chipset.clone(),
            num(&self.ram_gb),
            num(&self.display_size_inches),
            num(&self.display_size_cm),
            self.resolution.clone(),
            num(&self.resolution_width),
            num(&self.resolution_height),
            self.display_type.clone(),
            num(&self.refresh_rate_hz),
            self.rear_camera.clone(),
            self.front_camera.clone(),
            self.flash.clone(),
            num(&self.primary_camera_mp),
            num(&self.front_camera_mp),
            num(&self.rear_camera_count),
            num(&self.battery_mah),
            self.charging_port.clone(),
            num(&self.usb_version),
            self.charging_type.clone(),
            self.removable_battery.clone(),
            self.os_family.clone(),
            self.os_version.clone(),
            num(&self.storage_gb),
            num(&self.expandable_storage_gb),
            self.sim_type.clone(),
            self.wifi_calling.clone(),
            self.fingerprint_sensor.clone(),
            self.ip_rating.clone(),
        ]
    }
}

/// A source row that could not be read into a `RawSpecRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractBatch {
    pub records: Vec<RawSpecRecord>,
    pub rejected: Vec<RejectedRow>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<TypedSpecRecord>,
    pub csv_output: String,
    pub tsv_output: String,
    pub rejected: Vec<RejectedRow>,
}
