use crate::core::{ConfigProvider, ExtractBatch, Pipeline, Storage, TransformResult};
use crate::domain::model::{RawSpecRecord, RejectedRow, TypedSpecRecord};
use crate::parser::SpecParser;
use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use zip::write::{FileOptions, ZipWriter};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub const CSV_FILENAME: &str = "spec_records.csv";
pub const TSV_FILENAME: &str = "spec_records.tsv";
pub const JSON_FILENAME: &str = "spec_records.json";
pub const REJECTED_FILENAME: &str = "rejected_rows.json";

#[derive(Serialize)]
struct NumberedRecord<'a> {
    id: usize,
    #[serde(flatten)]
    record: &'a TypedSpecRecord,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    generated_at: String,
    record_count: usize,
    records: Vec<NumberedRecord<'a>>,
}

pub struct SpecPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    parser: Arc<SpecParser>,
}

impl<S: Storage, C: ConfigProvider> SpecPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let parser = SpecParser::new(config.calibration())?;
        Ok(Self {
            storage,
            config,
            parser: Arc::new(parser),
        })
    }
}

#[cfg(feature = "rayon")]
fn parse_all(parser: &SpecParser, records: &[RawSpecRecord], parallel: bool) -> Vec<TypedSpecRecord> {
    if parallel {
        records.par_iter().map(|r| parser.parse(r)).collect()
    } else {
        records.iter().map(|r| parser.parse(r)).collect()
    }
}

#[cfg(not(feature = "rayon"))]
fn parse_all(parser: &SpecParser, records: &[RawSpecRecord], _parallel: bool) -> Vec<TypedSpecRecord> {
    records.iter().map(|r| parser.parse(r)).collect()
}

/// Read raw records, isolating rows that fail to deserialize.
pub fn read_raw_records(data: &[u8], delimiter: u8) -> Result<ExtractBatch> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    // 標頭讀取失敗代表整個檔案無法解析
    reader.headers()?;

    let mut batch = ExtractBatch::default();
    for (index, row) in reader.deserialize::<RawSpecRecord>().enumerate() {
        // 第 1 行是標頭
        let row_number = index + 2;
        match row {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                tracing::warn!("⚠️ Skipping row {}: {}", row_number, e);
                batch.rejected.push(RejectedRow {
                    row: row_number,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(batch)
}

/// Render typed records with a leading surrogate `id` column.
pub fn render_delimited(records: &[TypedSpecRecord], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    let mut header = vec!["id"];
    header.extend_from_slice(&TypedSpecRecord::HEADERS);
    writer.write_record(&header)?;

    for (index, record) in records.iter().enumerate() {
        let mut row = vec![(index + 1).to_string()];
        row.extend(record.to_row());
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("Failed to flush delimited output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
        message: format!("Delimited output is not valid UTF-8: {}", e),
    })
}

pub fn render_json(records: &[TypedSpecRecord]) -> Result<String> {
    let output = JsonOutput {
        generated_at: chrono::Utc::now().to_rfc3339(),
        record_count: records.len(),
        records: records
            .iter()
            .enumerate()
            .map(|(index, record)| NumberedRecord {
                id: index + 1,
                record,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SpecPipeline<S, C> {
    async fn extract(&self) -> Result<ExtractBatch> {
        tracing::debug!("Reading raw records from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        read_raw_records(&data, self.config.delimiter())
    }

    async fn transform(&self, batch: ExtractBatch) -> Result<TransformResult> {
        let ExtractBatch { records, rejected } = batch;
        let parser = Arc::clone(&self.parser);
        let parallel = self.config.parallel();

        tracing::debug!("Parsing {} records (parallel: {})", records.len(), parallel);
        let typed = tokio::task::spawn_blocking(move || parse_all(&parser, &records, parallel))
            .await
            .map_err(|e| EtlError::ProcessingError {
                message: format!("Parser task failed: {}", e),
            })?;

        Ok(TransformResult {
            csv_output: render_delimited(&typed, b',')?,
            tsv_output: render_delimited(&typed, b'\t')?,
            records: typed,
            rejected,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let formats = self.config.output_formats();
        let mut files: Vec<(&str, Vec<u8>)> = Vec::new();

        for format in formats {
            match format.as_str() {
                "csv" => files.push((CSV_FILENAME, result.csv_output.as_bytes().to_vec())),
                "tsv" => files.push((TSV_FILENAME, result.tsv_output.as_bytes().to_vec())),
                "json" => files.push((JSON_FILENAME, render_json(&result.records)?.into_bytes())),
                other => {
                    return Err(EtlError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported output format".to_string(),
                    })
                }
            }
        }

        if !result.rejected.is_empty() {
            files.push((
                REJECTED_FILENAME,
                serde_json::to_string_pretty(&result.rejected)?.into_bytes(),
            ));
        }

        if let Some(archive) = self.config.compression() {
            tracing::debug!("Creating ZIP file with {} files", files.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, data) in &files {
                    zip.start_file::<_, ()>(*name, FileOptions::default())?;
                    zip.write_all(data)?;
                }
                zip.finish()?.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(archive, &zip_data).await?;
            return Ok(format!("{}/{}", self.config.output_path(), archive));
        }

        for (name, data) in &files {
            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            self.storage.write_file(name, data).await?;
        }

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::calibration::Calibration;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_input(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        output_formats: Vec<String>,
        compression: Option<String>,
        parallel: bool,
    }

    impl MockConfig {
        fn new(formats: &[&str]) -> Self {
            Self {
                output_formats: formats.iter().map(|f| f.to_string()).collect(),
                compression: None,
                parallel: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "raw.csv"
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn delimiter(&self) -> u8 {
            b','
        }

        fn compression(&self) -> Option<&str> {
            self.compression.as_deref()
        }

        fn parallel(&self) -> bool {
            self.parallel
        }

        fn calibration(&self) -> Calibration {
            Calibration::default()
        }
    }

    const INPUT: &str = "\
name,spec_score,os,price,details,features
Alpha X,82%,\"Android 12, MIUI\",\"₹12,999\",Performance Octa Core 2 GHz MediaTek Helio G85 4 GB RAM Display 6.5 inches 720 x 1600 px Camera 48 MP Primary Camera 8 MP Front Camera Battery 5000 mAh,\"Dual SIM, 64 GB inbuilt\"
Beta,,iOS v16,\"$799\",Performance Hexa Core Apple A15 Bionic Display 6.1 inches,Fingerprint Sensor
";

    #[tokio::test]
    async fn test_extract_reads_aliased_columns() {
        let storage = MockStorage::with_input("raw.csv", INPUT);
        let pipeline = SpecPipeline::new(storage, MockConfig::new(&["csv"])).unwrap();

        let batch = pipeline.extract().await.unwrap();

        assert_eq!(batch.records.len(), 2);
        assert!(batch.rejected.is_empty());
        assert_eq!(batch.records[0].mobile_name, "Alpha X");
        assert_eq!(batch.records[0].os_text, "Android 12, MIUI");
        assert_eq!(batch.records[1].spec_score_text, "");
    }

    #[tokio::test]
    async fn test_extract_missing_input_fails() {
        let storage = MockStorage::with_input("other.csv", INPUT);
        let pipeline = SpecPipeline::new(storage, MockConfig::new(&["csv"])).unwrap();

        let result = pipeline.extract().await;
        assert!(matches!(result, Err(EtlError::IoError(_))));
    }

    #[tokio::test]
    async fn test_transform_renders_csv_and_tsv() {
        let storage = MockStorage::with_input("raw.csv", INPUT);
        let pipeline = SpecPipeline::new(storage, MockConfig::new(&["csv"])).unwrap();

        let batch = pipeline.extract().await.unwrap();
        let result = pipeline.transform(batch).await.unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].chipset, "MediaTek Helio G85");
        assert_eq!(result.records[0].resolution, "HD+");
        assert_eq!(result.records[1].os_family, "iOS");
        assert_eq!(result.records[1].battery_mah, None);

        let csv_lines: Vec<&str> = result.csv_output.lines().collect();
        assert_eq!(csv_lines.len(), 3);
        assert!(csv_lines[0].starts_with("id,mobile_name,price,spec_score"));
        assert!(csv_lines[1].starts_with("1,Alpha X,12999,82,Octa,8,2,MediaTek Helio G85,4,"));

        let tsv_lines: Vec<&str> = result.tsv_output.lines().collect();
        assert!(tsv_lines[2].starts_with("2\tBeta\t799\t\tHexa\t6\t"));
    }

    #[tokio::test]
    async fn test_transform_parallel_keeps_order() {
        let storage = MockStorage::with_input("raw.csv", INPUT);
        let mut config = MockConfig::new(&["csv"]);
        config.parallel = true;
        let pipeline = SpecPipeline::new(storage, config).unwrap();

        let batch = pipeline.extract().await.unwrap();
        let result = pipeline.transform(batch).await.unwrap();

        assert_eq!(result.records[0].mobile_name, "Alpha X");
        assert_eq!(result.records[1].mobile_name, "Beta");
    }

    #[tokio::test]
    async fn test_load_writes_each_format() {
        let storage = MockStorage::with_input("raw.csv", INPUT);
        let pipeline =
            SpecPipeline::new(storage.clone(), MockConfig::new(&["csv", "tsv", "json"])).unwrap();

        let batch = pipeline.extract().await.unwrap();
        let result = pipeline.transform(batch).await.unwrap();
        let output = pipeline.load(result).await.unwrap();

        assert_eq!(output, "test_output");
        assert!(storage.get_file(CSV_FILENAME).await.is_some());
        assert!(storage.get_file(TSV_FILENAME).await.is_some());
        assert!(storage.get_file(REJECTED_FILENAME).await.is_none());

        let json = storage.get_file(JSON_FILENAME).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["record_count"], 2);
        assert_eq!(value["records"][0]["id"], 1);
        assert_eq!(value["records"][1]["mobile_name"], "Beta");
        assert!(value["records"][1]["ram_gb"].is_null());
        assert_eq!(value["records"][1]["charging_port"], "No Data");
    }

    #[tokio::test]
    async fn test_load_zip_bundle() {
        let storage = MockStorage::with_input("raw.csv", INPUT);
        let mut config = MockConfig::new(&["csv", "json"]);
        config.compression = Some("specs.zip".to_string());
        let pipeline = SpecPipeline::new(storage.clone(), config).unwrap();

        let batch = pipeline.extract().await.unwrap();
        let result = pipeline.transform(batch).await.unwrap();
        let output = pipeline.load(result).await.unwrap();

        assert_eq!(output, "test_output/specs.zip");
        let zip_data = storage.get_file("specs.zip").await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&CSV_FILENAME));
        assert!(names.contains(&JSON_FILENAME));
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_bad_rows_are_isolated() {
        let mut input = b"name,price\n".to_vec();
        input.extend_from_slice(b"\xff\xfe,100\n");
        input.extend_from_slice("Delta,\"\u{20b9}9,999\"\n".as_bytes());

        let batch = read_raw_records(&input, b',').unwrap();

        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].mobile_name, "Delta");
        assert_eq!(batch.records[0].price_text, "\u{20b9}9,999");
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].row, 2);
    }

    #[test]
    fn test_render_delimited_empty() {
        let output = render_delimited(&[], b',').unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("id,mobile_name"));
    }
}
