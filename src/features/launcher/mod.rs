mod process;

pub use process::{LaunchedProcess, ProcessLauncher};
