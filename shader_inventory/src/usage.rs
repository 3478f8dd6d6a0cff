//! Count references to materials from scenes, prefabs, and other assets.
//!
//! Unity references a material from other assets by the GUID in the material's sidecar.
//! Every content file is read once and searched for the GUIDs of all materials at the same time.
use std::{collections::BTreeSet, path::Path};

use indexmap::IndexMap;
use log::{info, warn};

use crate::{
    error::ScanError,
    meta::read_guid,
    read_text_lossy,
    relative_path,
    report::{MaterialRecord, MaterialUsage},
    walk::find_files,
    ASSETS_FOLDER,
};

/// Files that can reference materials by GUID.
/// Binary serialized `.bytes` files are searched as text.
pub const CONTENT_PATTERNS: [&str; 6] = [
    "*.unity",
    "*.prefab",
    "*.asset",
    "*.controller",
    "*.anim",
    "*.bytes",
];

/// A material with a known shader that may be referenced in the project.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct UsageCandidate {
    pub material: String,
    /// The material's own GUID or [None] if the sidecar is missing.
    pub guid: Option<String>,
    pub shader_asset: String,
    pub shader_name_text: String,
}

/// Select the materials with a resolved shader asset or shader name
/// and read each material's GUID from its sidecar.
///
/// Materials without any shader information are skipped
/// since they can't be assigned to a shader for the migration.
pub fn prioritized_materials(root: &Path, records: &[MaterialRecord]) -> Vec<UsageCandidate> {
    let candidates: Vec<_> = records
        .iter()
        .filter_map(|record| {
            let shader_asset = non_empty(&record.shader_asset);
            let shader_name_text = non_empty(&record.shader_name_text);
            if shader_asset.is_none() && shader_name_text.is_none() {
                return None;
            }

            let material = record.material.replace('\\', "/");
            Some(UsageCandidate {
                guid: read_guid(root.join(&material)),
                material,
                shader_asset: shader_asset.unwrap_or_default().replace('\\', "/"),
                shader_name_text: shader_name_text.unwrap_or_default().to_string(),
            })
        })
        .collect();

    info!(
        "Resolved GUIDs for {} prioritized materials.",
        candidates.len()
    );
    candidates
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Default)]
struct Usage {
    count: usize,
    files: BTreeSet<String>,
}

/// Search every content file under the `Assets` folder of `root` for the candidate GUIDs.
///
/// Results are sorted from most to least referenced.
/// Ties keep the order materials were first referenced.
/// Unreferenced candidates are only included with `include_unreferenced`.
pub fn count_usages(
    root: &Path,
    candidates: &[UsageCandidate],
    include_unreferenced: bool,
) -> Result<Vec<MaterialUsage>, ScanError> {
    let assets = root.join(ASSETS_FOLDER);
    if !assets.is_dir() {
        return Err(ScanError::MissingAssets { path: assets });
    }

    // Candidates without a GUID can never match anything.
    let searchable: Vec<(usize, &str)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.guid.as_deref().filter(|g| !g.is_empty()).map(|g| (i, g)))
        .collect();

    // Keyed by candidate index in the order materials are first referenced.
    let mut usages = IndexMap::<usize, Usage>::new();
    for path in find_files(&assets, &CONTENT_PATTERNS, false)? {
        let content = match read_text_lossy(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Error reading {path:?}: {e}");
                continue;
            }
        };

        for (i, guid) in &searchable {
            let count = content.matches(*guid).count();
            if count > 0 {
                let usage = usages.entry(*i).or_default();
                usage.count += count;
                usage.files.insert(relative_path(root, &path));
            }
        }
    }

    if include_unreferenced {
        for i in 0..candidates.len() {
            usages.entry(i).or_default();
        }
    }

    let mut results: Vec<_> = usages
        .into_iter()
        .map(|(i, usage)| {
            let candidate = &candidates[i];
            MaterialUsage {
                material: candidate.material.clone(),
                guid: candidate.guid.clone().unwrap_or_default(),
                shader_asset: candidate.shader_asset.clone(),
                shader_name_text: candidate.shader_name_text.clone(),
                usage_count: usage.count,
                referenced_in_files: usage.files.into_iter().collect::<Vec<_>>().join(";"),
            }
        })
        .collect();

    results.sort_by_key(|u| std::cmp::Reverse(u.usage_count));
    Ok(results)
}

/// Print the most referenced materials like `12 Assets/M1.mat -> Assets/Shaders/S1.shader`.
pub fn print_top_usages(usages: &[MaterialUsage], count: usize) {
    println!("Top referenced materials (sample):");
    for usage in usages.iter().take(count) {
        let shader = if usage.shader_asset.is_empty() {
            &usage.shader_name_text
        } else {
            &usage.shader_asset
        };
        println!("{} {} -> {}", usage.usage_count, usage.material, shader);
    }
}
