//! FileStore - ローカルディレクトリへの提出物ストレージ
//!
//! 単一サーバ構成用です。提出物ごとに `<root>/<id>/` を作り、
//! アップロードされたアーカイブをそこへ展開します。
//!
//! # 不変条件
//! - id ごとにディレクトリは 1 つ
//! - 返すロケーションは常に `file://` で始まる
//! - 展開に失敗したディレクトリは残さない（`CleanupPolicy::EmptyOnly` を除く）
//!
//! # 並行性
//! ロックは持ちません。同じ id への同時 `store` は呼び出し側で直列化すること。

use crate::config::{CleanupPolicy, ConfigError, ExtractionMode, StoreConfig};
use crate::domain::archive::ArchiveFormat;
use crate::domain::errors::{ExtractError, StoreError};
use crate::domain::ids::SubmissionId;
use crate::domain::location::{self, FILE_SCHEME};
use crate::domain::submission::{Stored, Submission};
use crate::impls::{CommandExtractor, FormatDispatch};
use crate::ports::{ArchiveExtractor, IdGenerator, ObjectIdGenerator, SubmissionStore, SystemClock};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct FileStore {
    root: PathBuf,
    cleanup: CleanupPolicy,
    extractor: Arc<dyn ArchiveExtractor>,
    ids: Arc<dyn IdGenerator>,
}

impl FileStore {
    /// `root` 直下に提出物を置く FileStore を作成
    ///
    /// extractor は FormatDispatch、id は ObjectIdGenerator、
    /// 後始末は `CleanupPolicy::Recursive`。
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let root = root.into();
        if !root.is_absolute() {
            return Err(ConfigError::RelativeRoot(root));
        }
        Ok(Self {
            root,
            cleanup: CleanupPolicy::default(),
            extractor: Arc::new(FormatDispatch::new()),
            ids: Arc::new(ObjectIdGenerator::new(SystemClock)),
        })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, ConfigError> {
        let store = Self::new(config.submission_root.clone())?.with_cleanup(config.cleanup);
        Ok(match config.extraction {
            ExtractionMode::InProcess => store,
            ExtractionMode::Command => store.with_extractor(CommandExtractor::new()),
        })
    }

    pub fn with_extractor(mut self, extractor: impl ArchiveExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn with_cleanup(mut self, cleanup: CleanupPolicy) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// id に対応するディレクトリ（存在確認はしない）
    pub fn directory_for(&self, id: &SubmissionId) -> PathBuf {
        self.root.join(id.as_str())
    }

    /// 展開先ディレクトリを作成
    ///
    /// 親は `create_dir_all`、末端は `create_dir` で作り、
    /// 「既に存在する」を他のエラーと区別する。
    fn create_target(&self, dir: &Path, overwrite: bool) -> Result<(), StoreError> {
        let creation_error = |source: io::Error| StoreError::DirectoryCreation {
            path: dir.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(creation_error)?;
        match fs::create_dir(dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if !overwrite {
                    return Err(StoreError::DirectoryConflict {
                        path: dir.to_path_buf(),
                    });
                }
                debug!(path = %dir.display(), "overwriting existing submission directory");
                fs::remove_dir_all(dir).map_err(creation_error)?;
                fs::create_dir(dir).map_err(creation_error)
            }
            Err(e) => Err(creation_error(e)),
        }
    }

    fn extract_into(
        &self,
        format: ArchiveFormat,
        archive: &Path,
        dir: &Path,
    ) -> Result<(), ExtractError> {
        self.extractor.extract(format, archive, dir)?;
        if fs::read_dir(dir)?.next().is_none() {
            return Err(ExtractError::EmptyArchive);
        }
        Ok(())
    }

    /// 展開失敗後の後始末。失敗しても元のエラーを優先する
    fn discard(&self, dir: &Path) {
        let removed = match self.cleanup {
            CleanupPolicy::Recursive => fs::remove_dir_all(dir),
            CleanupPolicy::EmptyOnly => fs::remove_dir(dir),
        };
        if let Err(e) = removed {
            warn!(path = %dir.display(), error = %e, "failed to remove submission directory after extraction failure");
        }
    }
}

impl SubmissionStore for FileStore {
    fn scheme(&self) -> &'static str {
        FILE_SCHEME
    }

    fn store(
        &self,
        id: Option<SubmissionId>,
        archive: &Path,
        overwrite: bool,
    ) -> Result<Stored, StoreError> {
        let id = id.unwrap_or_else(|| self.ids.generate_submission_id());

        // 展開時の cwd に依存しないよう絶対パスにしておく
        let archive = std::path::absolute(archive).map_err(|source| StoreError::ArchivePath {
            path: archive.to_path_buf(),
            source,
        })?;

        let format = ArchiveFormat::detect(&archive).ok_or_else(|| {
            StoreError::UnsupportedFormat {
                archive: archive.clone(),
            }
        })?;

        let dir = self.directory_for(&id);
        debug!(submission_id = %id, %format, path = %dir.display(), overwrite, "storing submission");

        self.create_target(&dir, overwrite)?;

        if let Err(source) = self.extract_into(format, &archive, &dir) {
            self.discard(&dir);
            return Err(StoreError::ExtractionFailure { archive, source });
        }

        Ok(Stored {
            location: location::encode(FILE_SCHEME, &dir),
            id,
        })
    }

    fn load(&self, submission: &Submission) -> Result<PathBuf, StoreError> {
        let location = submission.testables_or_empty();
        location::decode(FILE_SCHEME, location).ok_or_else(|| StoreError::IncompatibleLocation {
            location: location.to_string(),
        })
    }
}
