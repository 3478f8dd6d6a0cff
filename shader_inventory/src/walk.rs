use std::path::{Path, PathBuf};

use log::warn;

use crate::without_cur_dir;

/// Recursively find the files under `base` matching any of the glob `patterns`.
/// Entries are sorted by name so the order is the same for every run on an unchanged tree.
///
/// Symlinks to files are included but symlinked folders are not followed.
pub(crate) fn find_files(
    base: &Path,
    patterns: &[&str],
    case_insensitive: bool,
) -> Result<impl Iterator<Item = PathBuf>, globwalk::GlobError> {
    // globwalk expects entry paths to start with the base as written,
    // but the walker drops a leading "./" from the paths it returns.
    let base = without_cur_dir(base);

    let walker = globwalk::GlobWalkerBuilder::from_patterns(&base, patterns)
        .case_insensitive(case_insensitive)
        .file_type(globwalk::FileType::FILE | globwalk::FileType::SYMLINK)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        .build()?;

    Ok(walker.filter_map(move |entry| match entry {
        Ok(entry) => {
            if entry.path_is_symlink() && !entry.path().is_file() {
                None
            } else {
                Some(entry.into_path())
            }
        }
        Err(e) => {
            warn!("Error walking {base:?}: {e}");
            None
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn file_names(files: impl Iterator<Item = PathBuf>) -> Vec<String> {
        files
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn find_files_current_dir_prefix() {
        // Relative paths are resolved against the package folder when running tests.
        let dir = tempfile::tempdir_in(".").unwrap();
        let base = Path::new(".").join(dir.path().file_name().unwrap());
        std::fs::write(base.join("B.mat"), "").unwrap();
        std::fs::write(base.join("A.mat"), "").unwrap();
        std::fs::write(base.join("A.mat.meta"), "").unwrap();

        assert_eq!(
            vec!["A.mat", "B.mat"],
            file_names(find_files(&base, &["*.mat"], false).unwrap())
        );
    }

    #[cfg(unix)]
    #[test]
    fn find_files_symlinked_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Target");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("Real.mat"), "").unwrap();

        let base = dir.path().join("Assets");
        std::fs::create_dir(&base).unwrap();
        std::os::unix::fs::symlink(target.join("Real.mat"), base.join("Linked.mat")).unwrap();
        std::os::unix::fs::symlink(target.join("Missing.mat"), base.join("Broken.mat")).unwrap();
        std::os::unix::fs::symlink(&target, base.join("Folder.mat")).unwrap();

        assert_eq!(
            vec!["Linked.mat"],
            file_names(find_files(&base, &["*.mat"], false).unwrap())
        );
    }
}
