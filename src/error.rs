use std::path::PathBuf;

/// Everything that can go wrong during preprocessing.
///
/// The posture is fail fast: a bad input file or a mismatched shape
/// aborts the whole run with the offending path or lengths attached.
/// There is no retry and no partial-dataset recovery.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode NIfTI scan {path}")]
    Nifti {
        path: PathBuf,
        #[source]
        source: nifti::NiftiError,
    },

    #[error("scan {path} is not a 3-dimensional volume")]
    NotVolume3d { path: PathBuf },

    #[error("failed to decode image {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("volume is empty")]
    EmptyVolume,

    #[error("data length {len} does not match shape {width}x{height}x{depth}")]
    ShapeMismatch {
        len: usize,
        width: usize,
        height: usize,
        depth: usize,
    },

    #[error("failed to write artifact {path}")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("failed to read artifact {path}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("failed to parse config {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
