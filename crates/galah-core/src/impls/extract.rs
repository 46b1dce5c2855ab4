//! In-process extractors (flate2 + tar, zip).
//!
//! どちらもアーカイブ内のパスが `dest` の外を指すエントリは展開しません
//! （tar は `..` を含むエントリを飛ばし、zip は enclosed name のみ扱う）。

use crate::domain::archive::ArchiveFormat;
use crate::domain::errors::ExtractError;
use crate::ports::ArchiveExtractor;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// `.tar.gz` を展開
#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzExtractor;

impl TarGzExtractor {
    pub fn unpack(&self, archive: &Path, dest: &Path) -> Result<(), ExtractError> {
        let file = File::open(archive)?;
        let mut tar = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
        tar.set_overwrite(true);
        tar.unpack(dest)?;
        Ok(())
    }
}

/// `.zip` を展開
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl ZipExtractor {
    pub fn unpack(&self, archive: &Path, dest: &Path) -> Result<(), ExtractError> {
        let file = File::open(archive)?;
        let mut zip = zip::ZipArchive::new(BufReader::new(file))?;
        debug!(entries = zip.len(), archive = %archive.display(), "unpacking zip");
        zip.extract(dest)?;
        Ok(())
    }
}

/// FormatDispatch は形式ごとに extractor を選ぶ
///
/// FileStore のデフォルト extractor です。
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatDispatch {
    tar_gz: TarGzExtractor,
    zip: ZipExtractor,
}

impl FormatDispatch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArchiveExtractor for FormatDispatch {
    fn extract(
        &self,
        format: ArchiveFormat,
        archive: &Path,
        dest: &Path,
    ) -> Result<(), ExtractError> {
        match format {
            ArchiveFormat::TarGz => self.tar_gz.unpack(archive, dest),
            ArchiveFormat::Zip => self.zip.unpack(archive, dest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{snapshot, tar_gz_bytes, write_file, zip_bytes};
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn expected(files: &[(&str, &[u8])]) -> BTreeMap<String, Vec<u8>> {
        files
            .iter()
            .map(|(name, data)| (name.to_string(), data.to_vec()))
            .collect()
    }

    #[test]
    fn unpacks_tar_gz_with_nested_dirs() {
        let tmp = tempdir().unwrap();
        let files: &[(&str, &[u8])] = &[("main.py", b"print(1)\n"), ("lib/util.py", b"x = 2\n")];
        let archive = write_file(tmp.path(), "a.tar.gz", &tar_gz_bytes(files));
        let dest = tmp.path().join("out");
        std::fs::create_dir(&dest).unwrap();

        FormatDispatch::new()
            .extract(ArchiveFormat::TarGz, &archive, &dest)
            .unwrap();

        assert_eq!(snapshot(&dest), expected(files));
    }

    #[test]
    fn unpacks_zip() {
        let tmp = tempdir().unwrap();
        let files: &[(&str, &[u8])] = &[("main.py", b"print(1)\n"), ("tests.py", b"assert True\n")];
        let archive = write_file(tmp.path(), "a.zip", &zip_bytes(files));
        let dest = tmp.path().join("out");
        std::fs::create_dir(&dest).unwrap();

        FormatDispatch::new()
            .extract(ArchiveFormat::Zip, &archive, &dest)
            .unwrap();

        assert_eq!(snapshot(&dest), expected(files));
    }

    #[test]
    fn corrupt_tar_gz_is_an_io_error() {
        let tmp = tempdir().unwrap();
        let archive = write_file(tmp.path(), "a.tar.gz", b"definitely not gzip");
        let dest = tmp.path().join("out");
        std::fs::create_dir(&dest).unwrap();

        let result = FormatDispatch::new().extract(ArchiveFormat::TarGz, &archive, &dest);
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }

    #[test]
    fn corrupt_zip_is_a_zip_error() {
        let tmp = tempdir().unwrap();
        let archive = write_file(tmp.path(), "a.zip", b"definitely not zip");
        let dest = tmp.path().join("out");
        std::fs::create_dir(&dest).unwrap();

        let result = FormatDispatch::new().extract(ArchiveFormat::Zip, &archive, &dest);
        assert!(matches!(result, Err(ExtractError::Zip(_))));
    }

    #[test]
    fn missing_archive_is_an_io_error() {
        let tmp = tempdir().unwrap();
        let result = FormatDispatch::new().extract(
            ArchiveFormat::Zip,
            &tmp.path().join("missing.zip"),
            tmp.path(),
        );
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }
}
