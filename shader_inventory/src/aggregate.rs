//! Group materials by shader to decide which shaders to port first.
use indexmap::IndexMap;

use crate::report::{MaterialRecord, ShaderAggregate};

/// The key for materials without a resolved shader asset or a shader name.
pub const UNKNOWN_SHADER: &str = "UNKNOWN";

/// The maximum number of materials listed for each shader.
pub const SAMPLE_SIZE: usize = 10;

/// The grouping key for `record` preferring the resolved shader asset over the literal name.
pub fn shader_key(record: &MaterialRecord) -> &str {
    record
        .shader_asset
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(record.shader_name_text.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or(UNKNOWN_SHADER)
}

/// Count the materials for each shader key sorted from most to least used.
/// Ties keep the order each key first appears in `records`.
pub fn aggregate_by_shader(records: &[MaterialRecord]) -> Vec<ShaderAggregate> {
    let mut materials_by_key = IndexMap::<&str, Vec<&str>>::new();
    for record in records {
        materials_by_key
            .entry(shader_key(record))
            .or_default()
            .push(record.material.as_str());
    }

    let mut aggregates: Vec<_> = materials_by_key
        .into_iter()
        .map(|(key, materials)| ShaderAggregate {
            shader_asset_or_name: key.to_string(),
            count: materials.len(),
            materials_sample: materials
                .iter()
                .take(SAMPLE_SIZE)
                .copied()
                .collect::<Vec<_>>()
                .join(";"),
        })
        .collect();

    // Vec::sort_by_key is stable.
    aggregates.sort_by_key(|a| std::cmp::Reverse(a.count));
    aggregates
}

/// Print the most used shaders like `  42 Assets/Shaders/S1.shader`.
pub fn print_top_shaders(aggregates: &[ShaderAggregate], count: usize) {
    println!("Top shader usages (sample):");
    for aggregate in aggregates.iter().take(count) {
        println!("  {} {}", aggregate.count, aggregate.shader_asset_or_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn record(
        material: &str,
        shader_asset: Option<&str>,
        shader_name: Option<&str>,
    ) -> MaterialRecord {
        MaterialRecord {
            material: material.to_string(),
            shader_guid: None,
            shader_asset: shader_asset.map(ToString::to_string),
            shader_name_text: shader_name.map(ToString::to_string),
            error: None,
        }
    }

    #[test]
    fn shader_key_precedence() {
        assert_eq!(
            "Assets/S1.shader",
            shader_key(&record("M1.mat", Some("Assets/S1.shader"), Some("Custom/S1")))
        );
        assert_eq!("Custom/S1", shader_key(&record("M1.mat", None, Some("Custom/S1"))));
        assert_eq!(UNKNOWN_SHADER, shader_key(&record("M1.mat", None, None)));
        assert_eq!(UNKNOWN_SHADER, shader_key(&record("M1.mat", Some(""), Some(""))));
    }

    #[test]
    fn aggregate_empty() {
        assert!(aggregate_by_shader(&[]).is_empty());
    }

    #[test]
    fn aggregate_single_material() {
        let records = vec![record("Assets/M1.mat", Some("Assets/Shaders/S1.shader"), None)];
        assert_eq!(
            vec![ShaderAggregate {
                shader_asset_or_name: "Assets/Shaders/S1.shader".to_string(),
                count: 1,
                materials_sample: "Assets/M1.mat".to_string(),
            }],
            aggregate_by_shader(&records)
        );
    }

    #[test]
    fn aggregate_sorted_by_count_stable_ties() {
        let records = vec![
            record("M1.mat", None, None),
            record("M2.mat", None, Some("Custom/Toon")),
            record("M3.mat", Some("S1.shader"), None),
            record("M4.mat", Some("S1.shader"), Some("Custom/Ignored")),
            record("M5.mat", Some("S2.shader"), None),
            record("M6.mat", None, Some("Custom/Toon")),
        ];

        let aggregates = aggregate_by_shader(&records);
        assert_eq!(
            vec![
                ("Custom/Toon", 2, "M2.mat;M6.mat"),
                ("S1.shader", 2, "M3.mat;M4.mat"),
                ("UNKNOWN", 1, "M1.mat"),
                ("S2.shader", 1, "M5.mat"),
            ],
            aggregates
                .iter()
                .map(|a| (
                    a.shader_asset_or_name.as_str(),
                    a.count,
                    a.materials_sample.as_str()
                ))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn aggregate_counts_match_records() {
        let records: Vec<_> = (0..25)
            .map(|i| {
                let shader = format!("S{}.shader", i % 3);
                record(&format!("M{i}.mat"), Some(shader.as_str()), None)
            })
            .collect();

        let aggregates = aggregate_by_shader(&records);
        assert_eq!(records.len(), aggregates.iter().map(|a| a.count).sum::<usize>());
        for aggregate in &aggregates {
            let expected = records
                .iter()
                .filter(|r| shader_key(r) == aggregate.shader_asset_or_name)
                .count();
            assert_eq!(expected, aggregate.count);
        }
    }

    #[test]
    fn aggregate_sample_limited() {
        let records: Vec<_> = (0..12)
            .map(|i| record(&format!("M{i}.mat"), Some("S1.shader"), None))
            .collect();

        let aggregates = aggregate_by_shader(&records);
        assert_eq!(12, aggregates[0].count);
        assert_eq!(
            "M0.mat;M1.mat;M2.mat;M3.mat;M4.mat;M5.mat;M6.mat;M7.mat;M8.mat;M9.mat",
            aggregates[0].materials_sample
        );
    }
}
