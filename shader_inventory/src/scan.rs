//! Find every material in the project and the shader it references.
use std::path::Path;

use log::{info, warn};

use crate::{
    error::ScanError,
    material::{shader_guid, shader_name},
    read_text_lossy,
    relative_path,
    report::MaterialRecord,
    resolve::GuidResolver,
    walk::find_files,
    ASSETS_FOLDER,
};

/// How often to log the number of scanned materials.
const PROGRESS_INTERVAL: usize = 100;

/// Scan every `.mat` file under the `Assets` folder of `root`.
///
/// Records are in walk order with one record for each material file.
pub fn scan_materials(
    root: &Path,
    resolver: &GuidResolver,
) -> Result<Vec<MaterialRecord>, ScanError> {
    let assets = root.join(ASSETS_FOLDER);
    if !assets.is_dir() {
        return Err(ScanError::MissingAssets { path: assets });
    }

    // Unity doesn't care about the extension case.
    let materials: Vec<_> = find_files(&assets, &["*.mat"], true)?.collect();
    info!("Found {} material files. Scanning...", materials.len());

    let mut records = Vec::with_capacity(materials.len());
    for (i, path) in materials.iter().enumerate() {
        records.push(scan_material(root, path, resolver)?);

        if (i + 1) % PROGRESS_INTERVAL == 0 {
            info!("Scanned {}", i + 1);
        }
    }

    Ok(records)
}

/// Find the shader references for the material at `path`.
///
/// Read errors are stored on the record instead of failing the scan.
pub fn scan_material(
    root: &Path,
    path: &Path,
    resolver: &GuidResolver,
) -> Result<MaterialRecord, ScanError> {
    let mut record = MaterialRecord {
        material: relative_path(root, path),
        ..Default::default()
    };

    let content = match read_text_lossy(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Error reading {path:?}: {e}");
            record.error = Some(e.to_string());
            return Ok(record);
        }
    };

    if let Some(guid) = shader_guid(&content) {
        record.shader_guid = Some(guid.to_string());
        record.shader_asset = resolver.asset_path(guid)?;
    }

    // The name is extracted even if the GUID resolves to use as a hint for the migration.
    record.shader_name_text = shader_name(&content).map(ToString::to_string);

    Ok(record)
}
