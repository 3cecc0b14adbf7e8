//! Discovery of the file types present in a raw source tree.

use std::{collections::BTreeSet, path::Path};

use walkdir::WalkDir;

/// Returns the distinct file extensions found anywhere under `dir`.
///
/// Extensions are lowercased and have no leading dot. Files without an extension contribute
/// the empty string.
///
/// # Errors
///
/// Returns a [`walkdir::Error`] if part of the tree cannot be read.
pub fn file_extensions(dir: &Path) -> Result<BTreeSet<String>, walkdir::Error> {
    let mut extensions = BTreeSet::new();

    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let extension = entry
            .path()
            .extension()
            .map(|extension| extension.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        extensions.insert(extension);
    }

    Ok(extensions)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn empty_directories_have_no_extensions() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("dir1")).unwrap();
        fs::create_dir_all(root.path().join("dir2")).unwrap();

        assert!(file_extensions(root.path()).unwrap().is_empty());
    }

    #[test]
    fn files_without_extensions() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("README"), b"").unwrap();

        assert_eq!(
            file_extensions(root.path()).unwrap(),
            BTreeSet::from([String::new()])
        );
    }

    #[test]
    fn collects_nested_and_lowercases() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("font1").join("書");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("1.GIF"), b"").unwrap();
        fs::write(nested.join("2.gif"), b"").unwrap();
        fs::write(root.path().join("a.png"), b"").unwrap();
        fs::write(root.path().join("font1").join("b.jpeg"), b"").unwrap();

        assert_eq!(
            file_extensions(root.path()).unwrap(),
            BTreeSet::from(["gif".to_owned(), "jpeg".to_owned(), "png".to_owned()])
        );
    }
}
