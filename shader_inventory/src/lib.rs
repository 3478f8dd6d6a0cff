//! # shader_inventory
//! shader_inventory finds the shaders referenced by the materials in a Unity project
//! to help plan a shader migration like Built-in to URP or HDRP.
//!
//! Materials reference shaders by GUID in a `m_Shader: {fileID: ..., guid: ..., type: ...}` block.
//! The GUID of every asset is stored in the `.meta` sidecar file next to the asset.
//! Everything is found with plain text matching instead of a YAML parser
//! since the files only need to be read and partial matches are still useful.
//!
//! # Getting Started
//! The analysis runs as three separate jobs that communicate through CSV reports.
//!
//! ```rust no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use shader_inventory::{aggregate, report, resolve::GuidResolver, scan, usage};
//!
//! let root = std::path::Path::new("MyProject");
//!
//! // shader_report.csv
//! let materials = scan::scan_materials(root, &GuidResolver::tree_search(root))?;
//! report::write_csv(root.join(report::SHADER_REPORT), &materials)?;
//!
//! // shader_aggregate.csv
//! let shaders = aggregate::aggregate_by_shader(&materials);
//! report::write_csv(root.join(report::SHADER_AGGREGATE), &shaders)?;
//!
//! // material_usage_by_guid.csv
//! let candidates = usage::prioritized_materials(root, &materials);
//! let usages = usage::count_usages(root, &candidates, false)?;
//! report::write_csv(root.join(report::MATERIAL_USAGE), &usages)?;
//! # Ok(())
//! # }
//! ```
use std::path::{Component, Path, PathBuf};

pub mod aggregate;
pub mod error;
pub mod material;
pub mod meta;
pub mod report;
pub mod resolve;
pub mod scan;
pub mod usage;
mod walk;

/// The folder under the project root containing materials, scenes, and prefabs.
pub const ASSETS_FOLDER: &str = "Assets";

/// The path of `path` relative to `root` using `/` as the separator on all platforms.
/// `.` components are ignored, so `./project` and `project` are the same root.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let root: Vec<_> = root.components().filter(|c| *c != Component::CurDir).collect();
    let path: Vec<_> = path.components().filter(|c| *c != Component::CurDir).collect();
    let relative = path.strip_prefix(root.as_slice()).unwrap_or(path.as_slice());
    relative
        .iter()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// `path` without any `.` components like `./project/./Assets` -> `project/Assets`.
/// An empty result becomes `.` to still refer to the current directory.
pub(crate) fn without_cur_dir(path: &Path) -> PathBuf {
    let path: PathBuf = path
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    if path.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        path
    }
}

/// Read a file as text, replacing any invalid UTF-8.
/// Unity text assets are almost always valid but binary `.bytes` files are not.
pub fn read_text_lossy<P: AsRef<Path>>(path: P) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
