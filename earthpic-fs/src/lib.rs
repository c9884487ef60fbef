//! Capability-based filesystem helpers for sample files and rendered images.
//!
//! Every operation resolves the parent directory of its target with ambient
//! authority and then acts on the file name relative to that directory, so
//! callers only ever pass plain UTF-8 paths.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Read a whole file into memory.
///
/// # Errors
///
/// Returns the underlying I/O error if the parent directory cannot be opened
/// or the file cannot be read.
pub fn read_file(path: &Utf8Path) -> io::Result<Vec<u8>> {
    let (dir, name) = open_parent(path)?;
    dir.read(name.as_str())
}

/// Write `contents` to `path`, creating missing parent directories and
/// replacing any existing file.
///
/// # Errors
///
/// Returns the underlying I/O error if a directory cannot be created or the
/// file cannot be written.
pub fn write_file(path: &Utf8Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent(path)?;
    dir.write(name.as_str(), contents)
}

/// Whether an existing `path` is a regular file rather than a directory or
/// other entry.
///
/// # Errors
///
/// Returns the underlying I/O error, [`io::ErrorKind::NotFound`] included,
/// if `path` or its parent directory cannot be inspected.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Create every missing directory above `path`.
///
/// # Errors
///
/// Returns the underlying I/O error if the directories cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (base, relative) = split_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Open the directory containing `path` and return it with the file name.
fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `dir` into an opened root (`/`, a Windows prefix, or `.`) and the
/// path below it.
fn split_root(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_dir = dir.as_std_path();
    let root = match std_dir.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR.to_string())
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string()),
        _ => Utf8PathBuf::from("."),
    };
    let relative = if root == "." {
        dir.to_path_buf()
    } else {
        dir.strip_prefix(&root)
            .map_err(|_| io::Error::other(format!("cannot strip {root} from {dir}")))?
            .to_path_buf()
    };
    let base = fs_utf8::Dir::open_ambient_dir(&root, ambient_authority())?;
    Ok((base, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        (dir, root)
    }

    #[rstest]
    fn writes_into_missing_directories(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let target = root.join("nested/deeper/samples.csv");

        write_file(&target, "1,2,0.5,0.5,0.5\n").expect("write");

        assert_eq!(read_file(&target).expect("read"), b"1,2,0.5,0.5,0.5\n");
        assert!(file_is_file(&target).expect("metadata"));
    }

    #[rstest]
    fn overwrites_existing_files(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let target = root.join("out.csv");

        write_file(&target, "first").expect("write");
        write_file(&target, "second").expect("rewrite");

        assert_eq!(read_file(&target).expect("read"), b"second");
    }

    #[rstest]
    fn missing_file_reports_not_found(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let err = file_is_file(&root.join("absent.csv")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn directory_is_not_a_file(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        ensure_parent_dir(&root.join("sub/file")).expect("mkdir");
        assert!(!file_is_file(&root.join("sub")).expect("metadata"));
    }

    #[rstest]
    fn reading_a_missing_file_fails(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let err = read_file(&root.join("absent.csv")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    #[case("samples.csv")]
    #[case("/")]
    fn parentless_paths_need_no_directories(#[case] path: &str) {
        ensure_parent_dir(Utf8Path::new(path)).expect("nothing to create");
    }
}
