//! End-to-end contract of the file store through the public API.

use flate2::Compression;
use flate2::write::GzEncoder;
use galah_core::config::{CleanupPolicy, StoreConfig};
use galah_core::domain::{ErrorKind, StoreError, Submission, SubmissionId};
use galah_core::impls::{FileStore, StoreRegistry};
use galah_core::ports::SubmissionStore;
use std::collections::BTreeSet;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;

fn zip_archive(path: &Path, files: &[(&str, &str)]) {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, data) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data.as_bytes()).unwrap();
    }
    fs::write(path, writer.finish().unwrap().into_inner()).unwrap();
}

fn tar_gz_archive(path: &Path, files: &[(&str, &str)]) {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_mode(0o644);
        header.set_size(data.len() as u64);
        header.set_cksum();
        builder.append_data(&mut header, name, data.as_bytes()).unwrap();
    }
    fs::write(path, builder.into_inner().unwrap().finish().unwrap()).unwrap();
}

fn file_set(root: &Path) -> BTreeSet<(PathBuf, String)> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeSet<(PathBuf, String)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                out.insert((rel, fs::read_to_string(&path).unwrap()));
            }
        }
    }
    let mut out = BTreeSet::new();
    walk(root, root, &mut out);
    out
}

fn expected_set(files: &[(&str, &str)]) -> BTreeSet<(PathBuf, String)> {
    files
        .iter()
        .map(|(n, d)| (PathBuf::from(n), d.to_string()))
        .collect()
}

#[test]
fn upload_then_grade_round_trip() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("submissions");
    let config = StoreConfig::new(&root);
    let store = Arc::new(FileStore::from_config(&config).unwrap());

    let mut registry = StoreRegistry::new();
    registry.register(store.clone()).unwrap();

    let files = [("main.py", "print('hi')\n"), ("tests.py", "assert True\n")];
    let archive = tmp.path().join("submission.zip");
    zip_archive(&archive, &files);

    // upload handler
    let mut submission = Submission::with_id(SubmissionId::parse("507f1f77bcf86cd799439011").unwrap());
    let location = store.store_submission(&mut submission, &archive, false).unwrap();
    fs::remove_file(&archive).unwrap();
    assert!(store.can_handle(&location));

    // grading pipeline
    let path = registry.load(&submission).unwrap();
    assert_eq!(path, root.join("507f1f77bcf86cd799439011"));
    assert_eq!(file_set(&path), expected_set(&files));
}

#[test]
fn resubmission_requires_overwrite() {
    let tmp = tempdir().unwrap();
    let store = FileStore::new(tmp.path().join("submissions")).unwrap();
    let first = tmp.path().join("first.tar.gz");
    let second = tmp.path().join("second.zip");
    tar_gz_archive(&first, &[("a.txt", "first"), ("dir/b.txt", "nested")]);
    zip_archive(&second, &[("c.txt", "second")]);

    let stored = store.store(None, &first, false).unwrap();

    let conflict = store
        .store(Some(stored.id.clone()), &second, false)
        .unwrap_err();
    assert!(matches!(conflict, StoreError::DirectoryConflict { .. }));
    assert_eq!(conflict.kind(), ErrorKind::Permanent);
    assert_eq!(
        file_set(&store.directory_for(&stored.id)),
        expected_set(&[("a.txt", "first"), ("dir/b.txt", "nested")])
    );

    let replaced = store.store(Some(stored.id.clone()), &second, true).unwrap();
    assert_eq!(replaced.location, stored.location);
    assert_eq!(
        file_set(&store.directory_for(&stored.id)),
        expected_set(&[("c.txt", "second")])
    );
}

#[test]
fn failed_extraction_leaves_no_directory() {
    let tmp = tempdir().unwrap();
    let store = FileStore::new(tmp.path().join("submissions"))
        .unwrap()
        .with_cleanup(CleanupPolicy::Recursive);
    let archive = tmp.path().join("broken.tar.gz");
    fs::write(&archive, b"\x1f\x8b truncated").unwrap();
    let id = SubmissionId::parse("deadbeefdeadbeefdeadbeef").unwrap();

    let error = store.store(Some(id.clone()), &archive, false).unwrap_err();

    assert!(matches!(error, StoreError::ExtractionFailure { .. }));
    assert!(!store.directory_for(&id).exists());
}

#[test]
fn fresh_ids_never_collide() {
    let tmp = tempdir().unwrap();
    let store = FileStore::new(tmp.path().join("submissions")).unwrap();
    let archive = tmp.path().join("a.zip");
    zip_archive(&archive, &[("a.txt", "a")]);

    let locations: BTreeSet<String> = (0..20)
        .map(|_| store.store(None, &archive, false).unwrap().location)
        .collect();
    assert_eq!(locations.len(), 20);
}
