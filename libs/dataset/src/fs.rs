//! Filesystem helpers that keep dataset files world-accessible.
//!
//! Datasets are usually produced by one user and consumed by training jobs running as another,
//! so every directory and file written by this crate is given mode `0o777`.

use std::{fs, io, path::Path};

/// The permission bits applied to dataset files and directories.
#[cfg(unix)]
const OPEN_MODE: u32 = 0o777;

/// Creates `path` and all of its parents, then opens up the permissions of `path` and of every
/// ancestor this call had to create.
///
/// Pre-existing ancestors are left untouched.
/// Calling this again on an existing directory is a no-op apart from re-applying the
/// permissions of `path`.
///
/// # Errors
///
/// Returns an [`io::Error`] if a directory cannot be created or its permissions cannot be
/// changed.
pub fn ensure_dir_with_permissions<P: AsRef<Path>>(path: P) -> io::Result<()> {
    let path = path.as_ref();

    let missing = path
        .ancestors()
        .skip(1)
        .filter(|ancestor| !ancestor.as_os_str().is_empty())
        .take_while(|ancestor| !ancestor.exists())
        .map(Path::to_path_buf)
        .collect::<Vec<_>>();

    fs::create_dir_all(path)?;

    set_open_permissions(path)?;
    for ancestor in missing {
        set_open_permissions(ancestor)?;
    }

    Ok(())
}

/// Gives the file or directory at `path` mode `0o777`.
///
/// # Errors
///
/// Returns an [`io::Error`] if the permissions cannot be changed.
#[cfg(unix)]
pub fn set_open_permissions<P: AsRef<Path>>(path: P) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(OPEN_MODE))
}

/// Gives the file or directory at `path` mode `0o777`.
///
/// Permission bits do not exist on this platform, so this only checks that `path` exists.
///
/// # Errors
///
/// Returns an [`io::Error`] if `path` cannot be accessed.
#[cfg(not(unix))]
pub fn set_open_permissions<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fs::metadata(path).map(|_| ())
}

/// Copies `from` to `to` and opens up the permissions of the copy.
///
/// # Errors
///
/// Returns an [`io::Error`] if the copy fails or its permissions cannot be changed.
pub fn copy_with_permissions<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> io::Result<()> {
    fs::copy(from, to.as_ref())?;
    set_open_permissions(to)
}

/// Lists the entries of `dir` sorted by file name.
///
/// # Errors
///
/// Returns an [`io::Error`] if `dir` cannot be read.
pub fn sorted_entries<P: AsRef<Path>>(dir: P) -> io::Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_directories() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b").join("c");

        ensure_dir_with_permissions(&nested).unwrap();
        assert!(nested.is_dir());

        ensure_dir_with_permissions(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn opens_permissions_of_created_chain() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        ensure_dir_with_permissions(&nested).unwrap();

        for dir in [root.path().join("a"), nested] {
            let mode = fs::metadata(&dir).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o777, "{}", dir.display());
        }
    }

    #[cfg(unix)]
    #[test]
    fn leaves_existing_ancestors_untouched() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let existing = root.path().join("existing");
        fs::create_dir(&existing).unwrap();
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o755)).unwrap();

        let nested = existing.join("new");
        ensure_dir_with_permissions(&nested).unwrap();

        let mode = |dir: &Path| fs::metadata(dir).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&existing), 0o755);
        assert_eq!(mode(&nested), 0o777);
    }

    #[test]
    fn copies_files() {
        let root = tempfile::tempdir().unwrap();
        let from = root.path().join("from.txt");
        let to = root.path().join("to.txt");
        fs::write(&from, b"glyph").unwrap();

        copy_with_permissions(&from, &to).unwrap();
        assert_eq!(fs::read(&to).unwrap(), b"glyph");
    }

    #[test]
    fn entries_are_sorted() {
        let root = tempfile::tempdir().unwrap();
        for name in ["c", "a", "b"] {
            fs::write(root.path().join(name), b"").unwrap();
        }

        let names = sorted_entries(root.path())
            .unwrap()
            .into_iter()
            .map(|entry| entry.file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
