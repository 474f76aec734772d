//! Run configuration.
//!
//! A [`RunConfig`] is assembled once, from command-line [`Settings`] layered
//! over an optional YAML file layered over built-in defaults, and then handed
//! to every stage of the run.

use crate::features::chart::RenderConfig;
use crate::features::export::ImageFormat;
use crate::features::sampling::SamplingPlan;
use crate::shared::error::ConfigurationError;
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_OUTPUT: &str = "output-plot.png";
pub const DEFAULT_SAMPLE_INTERVAL: &str = "5ms";
pub const DEFAULT_DURATION: &str = "0s";
pub const DEFAULT_WIDTH: &str = "16cm";
pub const DEFAULT_HEIGHT: &str = "12cm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Centimeters,
    Millimeters,
    Inches,
    Points,
}

impl LengthUnit {
    fn points_per_unit(self) -> f64 {
        match self {
            LengthUnit::Centimeters => 72.0 / 2.54,
            LengthUnit::Millimeters => 72.0 / 25.4,
            LengthUnit::Inches => 72.0,
            LengthUnit::Points => 1.0,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Centimeters => "cm",
            LengthUnit::Millimeters => "mm",
            LengthUnit::Inches => "in",
            LengthUnit::Points => "pt",
        }
    }
}

/// A physical length such as `16cm` or `4.5in`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    value: f64,
    unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Result<Self, ConfigurationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigurationError::InvalidLength(format!(
                "{}{}",
                value,
                unit.suffix()
            )));
        }
        Ok(Self { value, unit })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Length in PostScript points (1/72 inch).
    pub fn points(&self) -> f64 {
        self.value * self.unit.points_per_unit()
    }

    pub fn inches(&self) -> f64 {
        self.points() / 72.0
    }
}

impl FromStr for Length {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static LENGTH_RE: OnceLock<Regex> = OnceLock::new();
        let re = LENGTH_RE.get_or_init(|| {
            Regex::new(r"^\s*([0-9]*\.?[0-9]+)\s*(cm|mm|in|pt)\s*$").expect("length pattern")
        });

        let invalid = || ConfigurationError::InvalidLength(s.to_string());
        let caps = re.captures(s).ok_or_else(invalid)?;
        let value: f64 = caps[1].parse().map_err(|_| invalid())?;
        let unit = match &caps[2] {
            "cm" => LengthUnit::Centimeters,
            "mm" => LengthUnit::Millimeters,
            "in" => LengthUnit::Inches,
            _ => LengthUnit::Points,
        };
        Length::new(value, unit).map_err(|_| invalid())
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// Parses a duration written like `5ms`, `1.5s`, `1m30s` or a bare `0`.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigurationError> {
    static WHOLE_RE: OnceLock<Regex> = OnceLock::new();
    static PART_RE: OnceLock<Regex> = OnceLock::new();
    let whole = WHOLE_RE.get_or_init(|| {
        Regex::new(r"^(?:(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:ns|us|µs|ms|s|m|h))+$")
            .expect("duration pattern")
    });
    let part = PART_RE.get_or_init(|| {
        Regex::new(r"([0-9]+(?:\.[0-9]*)?|\.[0-9]+)(ns|us|µs|ms|s|m|h)").expect("duration part")
    });

    let trimmed = s.trim();
    if trimmed == "0" {
        return Ok(Duration::ZERO);
    }
    if !whole.is_match(trimmed) {
        return Err(ConfigurationError::InvalidDuration(s.to_string()));
    }

    let mut nanos = 0f64;
    for caps in part.captures_iter(trimmed) {
        let value: f64 = caps[1]
            .parse()
            .map_err(|_| ConfigurationError::InvalidDuration(s.to_string()))?;
        let scale = match &caps[2] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            _ => 3600e9,
        };
        nanos += value * scale;
    }

    if !nanos.is_finite() || nanos > u64::MAX as f64 {
        return Err(ConfigurationError::InvalidDuration(s.to_string()));
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}

/// Raw, partially specified settings as they come from the command line or
/// a config file. Unset fields fall through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub pid: Option<i64>,
    pub command: Vec<String>,
    pub output: Option<PathBuf>,
    pub sample_interval: Option<String>,
    pub duration: Option<String>,
    pub rss: Option<bool>,
    pub vsz: Option<bool>,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_yaml::from_str(&text).map_err(|source| {
            ConfigurationError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Fills every unset field of `self` from `fallback`.
    pub fn merge(self, fallback: Settings) -> Settings {
        Settings {
            pid: self.pid.or(fallback.pid),
            command: if self.command.is_empty() {
                fallback.command
            } else {
                self.command
            },
            output: self.output.or(fallback.output),
            sample_interval: self.sample_interval.or(fallback.sample_interval),
            duration: self.duration.or(fallback.duration),
            rss: self.rss.or(fallback.rss),
            vsz: self.vsz.or(fallback.vsz),
            width: self.width.or(fallback.width),
            height: self.height.or(fallback.height),
        }
    }
}

/// The process to sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Pid(u32),
    Command(Vec<String>),
}

impl Subject {
    /// A positive pid wins over a command; the command is then ignored.
    pub fn resolve(pid: Option<i64>, command: Vec<String>) -> Result<Self, ConfigurationError> {
        let pid = pid
            .filter(|pid| *pid > 0)
            .and_then(|pid| u32::try_from(pid).ok());

        match pid {
            Some(pid) => {
                if !command.is_empty() {
                    warn!(
                        "A pid was specified. Ignoring additional arguments: {}",
                        command.join(" ")
                    );
                }
                Ok(Subject::Pid(pid))
            }
            None if !command.is_empty() => Ok(Subject::Command(command)),
            None => Err(ConfigurationError::MissingSubject),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub subject: Subject,
    pub sample_interval: Duration,
    pub total_duration: Duration,
    pub render: RenderConfig,
    pub format: ImageFormat,
}

impl RunConfig {
    pub fn from_settings(settings: Settings) -> Result<Self, ConfigurationError> {
        let subject = Subject::resolve(settings.pid, settings.command)?;

        let output = settings
            .output
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let format = ImageFormat::from_path(&output)?;

        let sample_interval = parse_duration(
            settings
                .sample_interval
                .as_deref()
                .unwrap_or(DEFAULT_SAMPLE_INTERVAL),
        )?;
        let total_duration =
            parse_duration(settings.duration.as_deref().unwrap_or(DEFAULT_DURATION))?;
        SamplingPlan::new(sample_interval, total_duration).check()?;

        let width: Length = settings.width.as_deref().unwrap_or(DEFAULT_WIDTH).parse()?;
        let height: Length = settings.height.as_deref().unwrap_or(DEFAULT_HEIGHT).parse()?;

        Ok(Self {
            subject,
            sample_interval,
            total_duration,
            render: RenderConfig {
                show_resident: settings.rss.unwrap_or(true),
                show_virtual: settings.vsz.unwrap_or(false),
                width,
                height,
                output_path: output,
            },
            format,
        })
    }

    pub fn plan(&self) -> SamplingPlan {
        SamplingPlan::new(self.sample_interval, self.total_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lengths_in_all_units() {
        let width: Length = "16cm".parse().unwrap();
        assert_eq!(width.unit(), LengthUnit::Centimeters);
        assert!((width.points() - 16.0 * 72.0 / 2.54).abs() < 1e-9);

        let height: Length = " 4.5in ".parse().unwrap();
        assert!((height.points() - 324.0).abs() < 1e-9);

        assert_eq!("120mm".parse::<Length>().unwrap().unit(), LengthUnit::Millimeters);
        assert_eq!("300pt".parse::<Length>().unwrap().points(), 300.0);
    }

    #[test]
    fn rejects_malformed_lengths() {
        for bad in ["16", "cm", "16px", "-3cm", "0in", "1.2.3cm", ""] {
            assert!(
                matches!(bad.parse::<Length>(), Err(ConfigurationError::InvalidLength(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn parses_go_style_durations() {
        assert_eq!(parse_duration("5ms").unwrap(), Duration::from_millis(5));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("250us").unwrap(), Duration::from_micros(250));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn rejects_malformed_durations() {
        for bad in ["", "5", "ms", "-1s", "5 ms", "1d", "s5"] {
            assert!(
                matches!(parse_duration(bad), Err(ConfigurationError::InvalidDuration(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn pid_wins_over_command() {
        let subject = Subject::resolve(Some(42), vec!["sleep".into(), "1".into()]).unwrap();
        assert_eq!(subject, Subject::Pid(42));
    }

    #[test]
    fn non_positive_pid_falls_back_to_command() {
        let subject = Subject::resolve(Some(-1), vec!["true".into()]).unwrap();
        assert_eq!(subject, Subject::Command(vec!["true".into()]));
        assert!(matches!(
            Subject::resolve(Some(0), vec![]),
            Err(ConfigurationError::MissingSubject)
        ));
        assert!(matches!(
            Subject::resolve(None, vec![]),
            Err(ConfigurationError::MissingSubject)
        ));
    }

    #[test]
    fn cli_settings_override_file_settings() {
        let cli = Settings {
            pid: Some(7),
            vsz: Some(true),
            ..Default::default()
        };
        let file = Settings {
            pid: Some(9),
            width: Some("10cm".into()),
            vsz: Some(false),
            command: vec!["ignored".into()],
            ..Default::default()
        };

        let merged = cli.merge(file);
        assert_eq!(merged.pid, Some(7));
        assert_eq!(merged.vsz, Some(true));
        assert_eq!(merged.width.as_deref(), Some("10cm"));
        assert_eq!(merged.command, vec!["ignored".to_string()]);
    }

    #[test]
    fn defaults_match_the_command_line_tool() {
        let config = RunConfig::from_settings(Settings {
            pid: Some(1),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.subject, Subject::Pid(1));
        assert_eq!(config.sample_interval, Duration::from_millis(5));
        assert_eq!(config.total_duration, Duration::ZERO);
        assert_eq!(config.format, ImageFormat::Png);
        assert!(config.render.show_resident);
        assert!(!config.render.show_virtual);
        assert_eq!(config.render.output_path, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.render.width.to_string(), "16cm");
        assert_eq!(config.render.height.to_string(), "12cm");
    }

    #[test]
    fn rejects_bad_plans_and_outputs_before_running() {
        let too_short = Settings {
            pid: Some(1),
            sample_interval: Some("1s".into()),
            duration: Some("1500ms".into()),
            ..Default::default()
        };
        assert!(matches!(
            RunConfig::from_settings(too_short),
            Err(ConfigurationError::TooFewSamples { .. })
        ));

        let bmp = Settings {
            pid: Some(1),
            output: Some("plot.bmp".into()),
            ..Default::default()
        };
        assert!(matches!(
            RunConfig::from_settings(bmp),
            Err(ConfigurationError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn reads_yaml_settings() {
        let settings: Settings = serde_yaml::from_str(
            "pid: 12\nsample_interval: 10ms\nduration: 2s\nvsz: true\nwidth: 6in\n",
        )
        .unwrap();
        assert_eq!(settings.pid, Some(12));
        assert_eq!(settings.sample_interval.as_deref(), Some("10ms"));
        assert_eq!(settings.vsz, Some(true));
        assert!(settings.command.is_empty());

        let unknown: Result<Settings, _> = serde_yaml::from_str("colour: red\n");
        assert!(unknown.is_err());
    }
}
