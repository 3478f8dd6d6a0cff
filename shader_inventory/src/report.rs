//! CSV reports passed between the scan, aggregate, and usage jobs.
//!
//! Each job writes a complete new report.
//! Only the scan report is read back by the later jobs.
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::error::ReportError;

/// The scan report with one row per material.
pub const SHADER_REPORT: &str = "shader_report.csv";

/// The aggregate report with one row per shader.
pub const SHADER_AGGREGATE: &str = "shader_aggregate.csv";

/// The usage report with one row per referenced material.
pub const MATERIAL_USAGE: &str = "material_usage_by_guid.csv";

/// The shader references found in a single material file.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// The material path relative to the project root like `Assets/Materials/M1.mat`.
    pub material: String,
    /// The GUID in the material's `m_Shader` block.
    #[serde(deserialize_with = "non_empty")]
    pub shader_guid: Option<String>,
    /// The project relative path of the asset with the shader GUID.
    #[serde(deserialize_with = "non_empty")]
    pub shader_asset: Option<String>,
    /// The literal name from a `shader:` field.
    #[serde(deserialize_with = "non_empty")]
    pub shader_name_text: Option<String>,
    /// The error that stopped this material from being fully read.
    #[serde(skip)]
    pub error: Option<String>,
}

/// The number of materials using a single shader.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ShaderAggregate {
    /// The shader asset, the shader name, or [UNKNOWN_SHADER](crate::aggregate::UNKNOWN_SHADER).
    pub shader_asset_or_name: String,
    pub count: usize,
    /// Up to [SAMPLE_SIZE](crate::aggregate::SAMPLE_SIZE) material paths separated by `;`.
    pub materials_sample: String,
}

/// The files referencing a single material by GUID.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct MaterialUsage {
    pub material: String,
    /// The material's own GUID from its sidecar.
    pub guid: String,
    pub shader_asset: String,
    pub shader_name_text: String,
    /// The total number of GUID occurrences in all files.
    /// A file can reference the same material more than once.
    pub usage_count: usize,
    /// Sorted unique file paths separated by `;`.
    pub referenced_in_files: String,
}

/// A row type for a report with a fixed header.
pub trait CsvRow: Serialize {
    const HEADER: &'static [&'static str];
}

impl CsvRow for MaterialRecord {
    const HEADER: &'static [&'static str] =
        &["material", "shader_guid", "shader_asset", "shader_name_text"];
}

impl CsvRow for ShaderAggregate {
    const HEADER: &'static [&'static str] = &["shader_asset_or_name", "count", "materials_sample"];
}

impl CsvRow for MaterialUsage {
    const HEADER: &'static [&'static str] = &[
        "material",
        "guid",
        "shader_asset",
        "shader_name_text",
        "usage_count",
        "referenced_in_files",
    ];
}

fn non_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

/// Write `rows` with a header row, replacing any existing file.
/// The header is written even if there are no rows.
pub fn write_csv<P: AsRef<Path>, T: CsvRow>(path: P, rows: &[T]) -> Result<(), ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(T::HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read every row of a report with a header row.
pub fn read_csv<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> Result<Vec<T>, ReportError> {
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize()
        .map(|row| row.map_err(ReportError::from))
        .collect()
}

/// Read the report created by the scan job.
pub fn read_shader_report<P: AsRef<Path>>(path: P) -> Result<Vec<MaterialRecord>, ReportError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ReportError::MissingShaderReport {
            path: path.to_path_buf(),
        });
    }
    read_csv(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn write_material_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SHADER_REPORT);

        let rows = vec![
            MaterialRecord {
                material: "Assets/M1.mat".to_string(),
                shader_guid: Some("aaa111".to_string()),
                shader_asset: Some("Assets/Shaders/S1.shader".to_string()),
                shader_name_text: None,
                error: None,
            },
            MaterialRecord {
                material: "Assets/M2, Copy.mat".to_string(),
                shader_guid: None,
                shader_asset: None,
                shader_name_text: Some("Custom/Toon".to_string()),
                error: Some("stream did not contain valid UTF-8".to_string()),
            },
        ];
        write_csv(&path, &rows).unwrap();

        assert_eq!(
            indoc! {r#"
                material,shader_guid,shader_asset,shader_name_text
                Assets/M1.mat,aaa111,Assets/Shaders/S1.shader,
                "Assets/M2, Copy.mat",,,Custom/Toon
            "#},
            std::fs::read_to_string(&path).unwrap()
        );
    }

    #[test]
    fn read_material_records_trims_and_skips_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SHADER_REPORT);
        std::fs::write(
            &path,
            indoc! {"
                material,shader_guid,shader_asset,shader_name_text
                Assets/M1.mat,aaa111, Assets/Shaders/S1.shader ,
                Assets/M2.mat,,,
            "},
        )
        .unwrap();

        assert_eq!(
            vec![
                MaterialRecord {
                    material: "Assets/M1.mat".to_string(),
                    shader_guid: Some("aaa111".to_string()),
                    shader_asset: Some("Assets/Shaders/S1.shader".to_string()),
                    shader_name_text: None,
                    error: None,
                },
                MaterialRecord {
                    material: "Assets/M2.mat".to_string(),
                    ..Default::default()
                },
            ],
            read_shader_report(&path).unwrap()
        );
    }

    #[test]
    fn read_shader_report_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SHADER_REPORT);

        let error = read_shader_report(&path).unwrap_err();
        assert!(matches!(error, ReportError::MissingShaderReport { .. }));
        assert!(error.to_string().contains("shader_inventory scan"));
    }

    #[test]
    fn write_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SHADER_AGGREGATE);

        write_csv::<_, ShaderAggregate>(&path, &[]).unwrap();
        assert_eq!(
            "shader_asset_or_name,count,materials_sample\n",
            std::fs::read_to_string(&path).unwrap()
        );
    }

    #[test]
    fn write_usage_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MATERIAL_USAGE);

        let rows = vec![MaterialUsage {
            material: "Assets/M1.mat".to_string(),
            guid: "abc123".to_string(),
            shader_asset: "Assets/Shaders/S1.shader".to_string(),
            shader_name_text: String::new(),
            usage_count: 2,
            referenced_in_files: "Assets/Scenes/Main.unity".to_string(),
        }];
        write_csv(&path, &rows).unwrap();

        assert_eq!(
            indoc! {"
                material,guid,shader_asset,shader_name_text,usage_count,referenced_in_files
                Assets/M1.mat,abc123,Assets/Shaders/S1.shader,,2,Assets/Scenes/Main.unity
            "},
            std::fs::read_to_string(&path).unwrap()
        );
    }
}
