//! Domain model (ids, submission records, archive formats, locations, errors).

pub mod archive;
pub mod errors;
pub mod ids;
pub mod location;
pub mod submission;

pub use self::archive::ArchiveFormat;
pub use self::errors::{ErrorKind, ExtractError, StoreError};
pub use self::ids::{IdError, SubmissionId};
pub use self::location::FILE_SCHEME;
pub use self::submission::{Stored, Submission};
