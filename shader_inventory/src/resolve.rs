//! Find the asset with a given GUID.
//!
//! Nothing maps a GUID back to a path, so the only option is searching the text of every sidecar.
//! [GuidResolver::TreeSearch] walks the whole project again for each lookup.
//! This is O(materials * files) but needs no memory and is fine for a one off report.
//! [GuidResolver::Indexed] reads every sidecar once up front and answers lookups from memory
//! with the same results.
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::{meta::asset_path, read_text_lossy, relative_path, walk::find_files};

/// The strategy for finding the asset with a shader GUID.
pub enum GuidResolver {
    /// Walk every sidecar under the project root on each lookup.
    TreeSearch { root: PathBuf },
    /// Search sidecars preloaded into memory.
    Indexed(MetaIndex),
}

impl GuidResolver {
    pub fn tree_search<P: AsRef<Path>>(root: P) -> Self {
        Self::TreeSearch {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn indexed<P: AsRef<Path>>(root: P) -> Result<Self, globwalk::GlobError> {
        MetaIndex::from_root(root).map(Self::Indexed)
    }

    /// The asset path relative to the root for the first sidecar whose text contains `guid`.
    ///
    /// The path is returned even if the asset itself does not exist.
    /// The sidecar may belong to a folder or an asset that was deleted without its sidecar.
    pub fn asset_path(&self, guid: &str) -> Result<Option<String>, globwalk::GlobError> {
        match self {
            GuidResolver::TreeSearch { root } => find_asset_for_guid(root, guid),
            GuidResolver::Indexed(index) => Ok(index.asset_path(guid).map(ToString::to_string)),
        }
    }
}

/// The text of every sidecar in the project in walk order.
pub struct MetaIndex {
    entries: Vec<MetaEntry>,
}

struct MetaEntry {
    asset: String,
    content: String,
}

impl MetaIndex {
    pub fn from_root<P: AsRef<Path>>(root: P) -> Result<Self, globwalk::GlobError> {
        let root = root.as_ref();
        let entries: Vec<_> = sidecar_files(root)?
            .filter_map(|(path, asset)| match read_text_lossy(&path) {
                Ok(content) => Some(MetaEntry {
                    asset: relative_path(root, &asset),
                    content,
                }),
                Err(e) => {
                    warn!("Error reading {path:?}: {e}");
                    None
                }
            })
            .collect();

        info!("Indexed {} sidecar files", entries.len());
        Ok(Self { entries })
    }

    pub fn asset_path(&self, guid: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.content.contains(guid))
            .map(|e| e.asset.as_str())
    }
}

/// Search every sidecar under `root` for `guid` without any caching.
pub fn find_asset_for_guid(root: &Path, guid: &str) -> Result<Option<String>, globwalk::GlobError> {
    for (path, asset) in sidecar_files(root)? {
        match read_text_lossy(&path) {
            Ok(content) => {
                if content.contains(guid) {
                    return Ok(Some(relative_path(root, &asset)));
                }
            }
            Err(e) => warn!("Error reading {path:?}: {e}"),
        }
    }
    Ok(None)
}

fn sidecar_files(
    root: &Path,
) -> Result<impl Iterator<Item = (PathBuf, PathBuf)>, globwalk::GlobError> {
    let files = find_files(root, &["*.meta"], false)?;
    Ok(files.filter_map(|path| {
        let asset = asset_path(&path)?;
        Some((path, asset))
    }))
}
