//! Unity `.meta` sidecar files.
//!
//! Every asset and folder has a sidecar at the same path with `.meta` appended.
//! The sidecar stores the asset's GUID on a line like `guid: 933532a4fcc9baf4fa0491de14d08ed7`
//! followed by the importer settings.
use std::path::{Path, PathBuf};

use log::{debug, warn};

/// The suffix appended to an asset path to get its sidecar path.
pub const META_SUFFIX: &str = ".meta";

/// The sidecar path for `asset` like `Assets/M1.mat` -> `Assets/M1.mat.meta`.
pub fn meta_path<P: AsRef<Path>>(asset: P) -> PathBuf {
    let mut path = asset.as_ref().as_os_str().to_owned();
    path.push(META_SUFFIX);
    PathBuf::from(path)
}

/// The asset path for the sidecar `meta` like `S1.shader.meta` -> `S1.shader`
/// or [None] if the path does not end with the sidecar suffix.
pub fn asset_path<P: AsRef<Path>>(meta: P) -> Option<PathBuf> {
    let meta = meta.as_ref().to_str()?;
    meta.strip_suffix(META_SUFFIX).map(PathBuf::from)
}

/// The value of the first `guid:` line in the sidecar text `content`.
pub fn parse_guid(content: &str) -> Option<&str> {
    content
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("guid:"))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Read the GUID for `asset` from its sidecar.
/// Missing or unreadable sidecars are treated as having no GUID.
pub fn read_guid<P: AsRef<Path>>(asset: P) -> Option<String> {
    let path = meta_path(asset);
    if !path.is_file() {
        debug!("No sidecar found at {path:?}");
        return None;
    }

    match crate::read_text_lossy(&path) {
        Ok(content) => parse_guid(&content).map(ToString::to_string),
        Err(e) => {
            warn!("Error reading {path:?}: {e}");
            None
        }
    }
}
