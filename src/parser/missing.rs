//! Final missing-value pass.
//!
//! Numeric attributes stay `None` so aggregates never see a fake zero.
//! Categorical attributes fall back to a sentinel so the row still shows up
//! under equality filters.

use super::ExtractedSpec;
use crate::domain::model::TypedSpecRecord;

fn text(value: Option<String>, sentinel: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => sentinel.to_string(),
    }
}

pub fn apply(spec: ExtractedSpec, sentinel: &str) -> TypedSpecRecord {
    let ExtractedSpec {
        mobile_name,
        price,
        spec_score,
        performance,
        display,
        camera,
        battery,
        os,
        features,
    } = spec;

    TypedSpecRecord {
        mobile_name: text(mobile_name, sentinel),
        price,
        spec_score,

        cores: text(performance.cores, sentinel),
        no_of_cores: performance.no_of_cores,
        clock_speed_ghz: performance.clock_speed_ghz,
        chipset: text(performance.chipset, sentinel),
        ram_gb: performance.ram_gb,

        display_size_inches: display.size_inches,
        display_size_cm: display.size_cm,
        resolution: text(display.resolution.category, sentinel),
        resolution_width: display.resolution.width,
        resolution_height: display.resolution.height,
        display_type: text(display.display_type, sentinel),
        refresh_rate_hz: display.refresh_rate_hz,

        rear_camera: text(camera.rear_camera, sentinel),
        front_camera: text(camera.front_camera, sentinel),
        flash: text(camera.flash, sentinel),
        primary_camera_mp: camera.primary_camera_mp,
        front_camera_mp: camera.front_camera_mp,
        rear_camera_count: camera.rear_camera_count,

        battery_mah: battery.capacity_mah,
        charging_port: text(battery.charging_port, sentinel),
        usb_version: battery.usb_version,
        charging_type: text(battery.charging_type, sentinel),
        removable_battery: text(battery.removable, sentinel),

        os_family: text(os.family, sentinel),
        os_version: text(os.version, sentinel),

        storage_gb: features.storage_gb,
        expandable_storage_gb: features.expandable_storage_gb,
        sim_type: text(features.sim_type, sentinel),
        wifi_calling: text(Some(features.wifi_calling), sentinel),
        fingerprint_sensor: text(features.fingerprint_sensor, sentinel),
        ip_rating: text(features.ip_rating, sentinel),
    }
}
