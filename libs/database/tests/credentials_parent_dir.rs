//! Credentials lookup relative to the parent directory.
//!
//! Lives in its own test binary because it changes the process working
//! directory.

#![cfg(feature = "mongodb")]

use std::fs;
use std::path::{Path, PathBuf};

use database::mongodb::{CredentialSource, resolve_credentials};

#[test]
fn test_missing_dot_relative_file_is_found_in_parent_directory() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("creds.txt"), "mongodb://parent:27017\n").unwrap();
    let backend = root.path().join("backend");
    fs::create_dir(&backend).unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(&backend).unwrap();
    let resolved = resolve_credentials(Some(Path::new("./creds.txt")), None);
    std::env::set_current_dir(previous).unwrap();

    let resolved = resolved.unwrap();
    assert_eq!(
        resolved.source,
        CredentialSource::File(PathBuf::from("../creds.txt"))
    );
    assert_eq!(resolved.url, "mongodb://parent:27017");
}
