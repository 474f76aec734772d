use crate::shared::config::Settings;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "memplot")]
#[command(version, about = "Plot the memory usage of a process over time", long_about = None)]
#[command(after_help = "Arguments following options will be interpreted as the command to spawn and sample.

EXAMPLES:
    memplot --pid 1234 --dur 10s -o plot.png
    memplot --vsz --sd 10ms -o build.svg -- cargo build
    memplot --config memplot.yaml")]
pub struct Cli {
    /// PID of the process to analyze
    #[arg(long, value_name = "PID", allow_negative_numbers = true)]
    pub pid: Option<i64>,

    /// Output image file name. Supported extensions are
    /// .eps, .jpg, .jpeg, .pdf, .png, .svg, .tex, .tif and .tiff [default: output-plot.png]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Time between samples, e.g. 5ms [default: 5ms]
    #[arg(long = "sd", visible_alias = "sample-interval", value_name = "DURATION")]
    pub sample_interval: Option<String>,

    /// Total profiling time. A value of 0 means that the program
    /// will be sampled until it is no longer running [default: 0s]
    #[arg(long = "dur", visible_alias = "duration", value_name = "DURATION")]
    pub duration: Option<String>,

    /// Plot virtual size
    #[arg(long)]
    pub vsz: bool,

    /// Do not plot resident set size
    #[arg(long)]
    pub no_rss: bool,

    /// Plot image width (cm, mm, in or pt) [default: 16cm]
    #[arg(long, value_name = "LENGTH")]
    pub width: Option<String>,

    /// Plot image height (cm, mm, in or pt) [default: 12cm]
    #[arg(long, value_name = "LENGTH")]
    pub height: Option<String>,

    /// YAML file with default settings; command-line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to spawn and sample when no PID is given
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            pid: self.pid,
            command: self.command.clone(),
            output: self.output.clone(),
            sample_interval: self.sample_interval.clone(),
            duration: self.duration.clone(),
            rss: self.no_rss.then_some(false),
            vsz: self.vsz.then_some(true),
            width: self.width.clone(),
            height: self.height.clone(),
        }
    }
}
