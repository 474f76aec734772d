use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemplotError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Collection failed: {0}")]
    Collection(#[from] CollectionError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Launch failed: {0}")]
    Launch(#[from] LaunchError),
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Sample interval must be greater than zero")]
    InvalidInterval,

    #[error("There must be at least two samples: {total:?} / {interval:?} is too few samples requested")]
    TooFewSamples { interval: Duration, total: Duration },

    #[error("Unsupported output extension '{0}' (supported: .eps, .jpg, .jpeg, .pdf, .png, .svg, .tex, .tif, .tiff)")]
    UnsupportedExtension(String),

    #[error("Output path {0} has no file extension")]
    MissingExtension(PathBuf),

    #[error("Invalid length '{0}': expected a number followed by cm, mm, in or pt")]
    InvalidLength(String),

    #[error("Invalid duration '{0}': expected e.g. 5ms, 1.5s or 1m30s")]
    InvalidDuration(String),

    #[error("Invalid PID. Please specify a PID using --pid or a command to exec and sample")]
    MissingSubject,

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Process {0} not found")]
    SubjectNotFound(u32),

    #[error("Process {pid} exited after {elapsed:?}, before the requested duration elapsed")]
    SubjectExited { pid: u32, elapsed: Duration },

    #[error("Failed to read memory of process {pid}: {reason}")]
    Probe { pid: u32, reason: String },

    #[error("Invalid collection: {0}")]
    InvalidCollection(String),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("A plot needs at least two samples, got {0}")]
    TooFewSamples(usize),

    #[error("Cannot build series {label}: {reason}")]
    InvalidSeries { label: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Drawing failed: {0}")]
    Drawing(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to move plot into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("No command given")]
    EmptyCommand,

    #[error("Command '{program}' not found: {source}")]
    NotFound {
        program: String,
        source: which::Error,
    },

    #[error("Failed to spawn '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("Launcher thread ended before reporting a PID")]
    HandoffDropped,

    #[error("Launcher thread panicked while waiting on the child")]
    WaiterPanicked,

    #[error("Failed to kill launched process {0}")]
    Kill(u32),
}

pub type Result<T, E = MemplotError> = std::result::Result<T, E>;
