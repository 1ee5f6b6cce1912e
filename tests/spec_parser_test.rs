use mobile_spec_etl::core::ConfigProvider;
use mobile_spec_etl::parser::resolution::{category_for_height, category_pixels, classify, parse_pixels, RawResolution};
use mobile_spec_etl::{parse_record, RawSpecRecord, SpecParser, TomlConfig};

fn record(details: &str, os: &str, features: &str) -> RawSpecRecord {
    RawSpecRecord {
        mobile_name: "Test Phone".to_string(),
        details_text: details.to_string(),
        os_text: os.to_string(),
        features_text: features.to_string(),
        ..Default::default()
    }
}

fn canonical_round(height: u32) -> Option<(&'static str, u32)> {
    let category = category_for_height(height)?;
    let (_, canonical_height) = category_pixels(category).and_then(parse_pixels)?;
    Some((category, canonical_height))
}

#[test]
fn test_pixel_resolution_canonicalization_is_stable() {
    for height in (25..=3150).step_by(25) {
        let Some((_, once)) = canonical_round(height) else {
            continue;
        };
        let twice = canonical_round(once);
        let thrice = twice.and_then(|(_, h)| canonical_round(h));
        assert_eq!(twice, thrice, "unstable at height {}", height);
    }

    let categorical = classify(&RawResolution::Category("Full HD".to_string()));
    assert_eq!(categorical.category.as_deref(), Some("FHD"));
    assert_eq!(categorical.height, Some(1920));
}

#[test]
fn test_pixel_display_is_reclassified_from_height() {
    let parsed = parse_record(&record(
        "Performance Quad Core Display 6.5 inches 1080 x 2400 pixels Battery 4000 mAh",
        "",
        "",
    ));
    assert_eq!(parsed.display_size_inches, Some(6.5));
    assert_eq!(parsed.resolution_width, Some(1080));
    assert_eq!(parsed.resolution_height, Some(2400));
    assert_eq!(parsed.resolution, "QHD");
    assert_eq!(parsed.battery_mah, Some(4000));
}

#[test]
fn test_os_families() {
    let cases = [
        ("Android 5.2, One UI", "Android", "5.1"),
        ("iOS v14.1", "iOS", "14.1"),
        ("BlackBerry OS 7.1", "Blackberry", "7.1"),
        ("Windows Phone 8.1", "Windows Phone", "8.1"),
        ("Windows Mobile 6.5", "Windows Mobile", "6.5"),
    ];
    for (os, family, version) in cases {
        let parsed = parse_record(&record("", os, ""));
        assert_eq!(parsed.os_family, family, "family of {}", os);
        assert_eq!(parsed.os_version, version, "version of {}", os);
    }
}

#[test]
fn test_battery_section() {
    let parsed = parse_record(&record(
        "Battery 5000 mAh, Type-C, Fast Charging, Non-Removable",
        "",
        "",
    ));
    assert_eq!(parsed.battery_mah, Some(5000));
    assert_eq!(parsed.charging_port, "Type-C");
    assert_eq!(parsed.removable_battery, "No");
    assert_eq!(parsed.chipset, "No Data");
}

#[test]
fn test_storage_terabyte_rule() {
    let small = parse_record(&record("", "", "Dual SIM, 1 TB inbuilt"));
    assert_eq!(small.storage_gb, Some(1024.0));

    let mislabeled = parse_record(&record("", "", "Dual SIM, 500 TB inbuilt"));
    assert_eq!(mislabeled.storage_gb, Some(500.0));
}

#[test]
fn test_memory_card_clause_keeps_inbuilt_storage() {
    let not_supported = parse_record(&record(
        "",
        "",
        "Dual SIM, 4G, Memory Card Not Supported, 128 GB inbuilt",
    ));
    assert_eq!(not_supported.storage_gb, Some(128.0));
    assert_eq!(not_supported.expandable_storage_gb, None);

    let supported = parse_record(&record("", "", "Dual SIM, Memory Card Supported, 64 GB inbuilt"));
    assert_eq!(supported.storage_gb, Some(64.0));
    assert_eq!(supported.expandable_storage_gb, None);
}

#[test]
fn test_refresh_rate_clause_keeps_panel_type() {
    let parsed = parse_record(&record(
        "Display 6.5 inches, 1080 x 2400 px, IPS LCD, 90 Hz",
        "",
        "",
    ));
    assert_eq!(parsed.display_type, "IPS LCD");
    assert_eq!(parsed.refresh_rate_hz, Some(90));
}

#[test]
fn test_toml_calibration_drives_the_parser() {
    let config = TomlConfig::from_toml_str(
        r#"
[pipeline]
name = "calibrated"

[source]
path = "raw.csv"

[load]
output_path = "./out"
output_formats = ["csv"]

[calibration]
missing_sentinel = "N/A"
charging_ports = ["USB-C"]
"#,
    )
    .unwrap();

    let parser = SpecParser::new(config.calibration()).unwrap();
    let parsed = parser.parse(&record(
        "Performance Octa Core Display 6.1 inches Battery 3000 mAh, USB-C",
        "",
        "",
    ));

    assert_eq!(parsed.charging_port, "USB-C");
    assert_eq!(parsed.charging_type, "N/A");
    assert_eq!(parsed.flash, "N/A");
    assert_eq!(parsed.mobile_name, "Test Phone");
}
