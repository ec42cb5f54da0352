//! Sitemap storage.
//!
//! `FsStore` replaces the file through a temp file in the same directory
//! followed by a rename, so a failed write never leaves a truncated sitemap
//! behind. The original file's permissions carry over to the new one, and a
//! target the caller may not write to is refused before anything is created.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Read/write access to the sitemap file.
pub trait SitemapStore {
    fn load(&self, path: &Path) -> io::Result<String>;
    fn save(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Local filesystem store with atomic replacement.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl SitemapStore for FsStore {
    fn load(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn save(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        // Write next to the real file, not next to a symlink pointing at it
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let permissions = fs::metadata(&target).map(|m| m.permissions()).ok();

        // A rename ignores the target's own mode, so check write access first
        if let Some(permissions) = &permissions {
            if permissions.readonly() {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("`{}` is read-only", target.display()),
                ));
            }
            fs::OpenOptions::new().write(true).open(&target)?;
        }

        let mut tmp = tempfile::Builder::new()
            .prefix(".sitemap-touch-")
            .suffix(".tmp")
            .tempfile_in(parent_dir(&target))?;

        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        if let Some(permissions) = permissions {
            tmp.as_file().set_permissions(permissions)?;
        }

        tmp.persist(&target).map_err(|err| err.error)?;
        Ok(())
    }
}

/// Directory a temp file for `path` must live in to allow a plain rename.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("/var/www/sitemap.xml")), Path::new("/var/www"));
        assert_eq!(parent_dir(Path::new("sitemap.xml")), Path::new("."));
    }

    #[test]
    fn test_fs_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::write(&path, "<urlset/>").unwrap();

        let store = FsStore;
        assert_eq!(store.load(&path).unwrap(), "<urlset/>");

        store.save(&path, b"<urlset></urlset>").unwrap();
        assert_eq!(store.load(&path).unwrap(), "<urlset></urlset>");
    }

    #[test]
    fn test_fs_store_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::write(&path, "<urlset/>").unwrap();

        FsStore.save(&path, b"<urlset></urlset>").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("sitemap.xml")]);
    }

    fn dir_entries(dir: &Path) -> Vec<std::ffi::OsString> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        names.sort();
        names
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_store_refuses_read_only_target() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::write(&path, "<urlset/>").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();

        let err = FsStore.save(&path, b"<urlset></urlset>").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<urlset/>");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o444);
        assert_eq!(dir_entries(dir.path()), vec![std::ffi::OsString::from("sitemap.xml")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_store_fails_in_read_only_dir() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::write(&path, "<urlset/>").unwrap();
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o555)).unwrap();

        // root ignores directory permissions
        let probe = dir.path().join("writable");
        if fs::write(&probe, "").is_ok() {
            fs::remove_file(&probe).unwrap();
            fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = FsStore.save(&path, b"<urlset></urlset>");
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<urlset/>");
        assert_eq!(dir_entries(dir.path()), vec![std::ffi::OsString::from("sitemap.xml")]);
    }

    #[test]
    fn test_fs_store_fails_on_directory_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        assert!(FsStore.save(&path, b"<urlset></urlset>").is_err());

        assert!(path.is_dir());
        assert_eq!(fs::read_to_string(path.join("keep")).unwrap(), "x");
        assert_eq!(dir_entries(dir.path()), vec![std::ffi::OsString::from("sitemap.xml")]);
    }

    #[test]
    fn test_fs_store_load_missing() {
        let dir = TempDir::new().unwrap();
        let err = FsStore.load(&dir.path().join("missing.xml")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_store_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::write(&path, "<urlset/>").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        FsStore.save(&path, b"<urlset></urlset>").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_store_writes_through_symlink() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.xml");
        let link = dir.path().join("sitemap.xml");
        fs::write(&real, "<urlset/>").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        FsStore.save(&link, b"<urlset></urlset>").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "<urlset></urlset>");
    }
}
