// Required external crates for configuration management and serialization
use serde::Deserialize;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError, Environment, File};

use crate::export::{ExportFormat, Precision};

/// Configuration for the source model artifact
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Weights file name, also used by the export library as the model identifier
    pub name: String,
    /// Optional URL to fetch the weights from when they are not already on disk
    pub weights_url: Option<String>,
    /// Directory holding the weights and receiving the export output
    pub work_dir: PathBuf,
}

/// Configuration for the export call
#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Python interpreter that has the export library installed
    pub python: PathBuf,
    /// Target inference format
    pub format: ExportFormat,
    /// Square input resolution
    pub imgsz: u32,
    /// Quantize to 8-bit integers
    pub int8: bool,
    /// Export with 16-bit float weights
    pub half: bool,
    /// Upper bound on the export subprocess, in seconds
    pub timeout_secs: u64,
}

/// Configuration for where the exported artifact ends up
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Final path of the exported file
    pub destination: PathBuf,
}

/// Configuration for application logging
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Directory for the rolling log files
    pub directory: PathBuf,
}

/// Main settings struct that contains all configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Model-related settings
    pub model: ModelConfig,
    /// Export-related settings
    pub export: ExportConfig,
    /// Output-related settings
    pub output: OutputConfig,
    /// Logging-related settings
    pub logging: LoggingConfig,
}

/// Values supplied on the command line. Anything set here wins over every
/// other configuration source.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub model: Option<String>,
    pub weights_url: Option<String>,
    pub work_dir: Option<PathBuf>,
    pub python: Option<PathBuf>,
    pub imgsz: Option<u32>,
    pub int8: bool,
    pub half: bool,
    pub destination: Option<PathBuf>,
}

impl Settings {
    /// Creates a new Settings instance by layering sources in the following
    /// order of precedence (highest to lowest):
    /// 1. Command line overrides
    /// 2. Environment variables prefixed with TFLITE_EXPORT__
    /// 3. Local config file (local.toml) if present
    /// 4. Default config file (default.toml) if present
    /// 5. Built-in defaults
    pub fn load(config_dir: &Path, overrides: &Overrides) -> Result<Self, ConfigError> {
        let default_config = config_dir.join("default.toml");
        let local_config = config_dir.join("local.toml");

        // Convert paths to strings and keep them alive
        let default_config_path = default_config.to_string_lossy();
        let local_config_path = local_config.to_string_lossy();

        let mut builder = Config::builder()
            .set_default("model.name", "yolo11n.pt")?
            .set_default("model.work_dir", ".")?
            .set_default("export.python", "python3")?
            .set_default("export.format", "tflite")?
            .set_default("export.imgsz", 640)?
            .set_default("export.int8", false)?
            .set_default("export.half", false)?
            .set_default("export.timeout_secs", 1800)?
            .set_default("output.destination", "assets/models/yolo11n.tflite")?
            .set_default("logging.level", "info")?
            .set_default("logging.directory", "logs")?
            .add_source(File::with_name(&default_config_path).required(false))
            .add_source(File::with_name(&local_config_path).required(false))
            .add_source(
                Environment::with_prefix("TFLITE_EXPORT")
                    .prefix_separator("__")
                    .separator("__"),
            );

        if let Some(model) = &overrides.model {
            builder = builder.set_override("model.name", model.as_str())?;
        }
        if let Some(url) = &overrides.weights_url {
            builder = builder.set_override("model.weights_url", url.as_str())?;
        }
        if let Some(dir) = &overrides.work_dir {
            builder = builder.set_override("model.work_dir", dir.to_string_lossy().as_ref())?;
        }
        if let Some(python) = &overrides.python {
            builder = builder.set_override("export.python", python.to_string_lossy().as_ref())?;
        }
        if let Some(imgsz) = overrides.imgsz {
            builder = builder.set_override("export.imgsz", imgsz)?;
        }
        if overrides.int8 {
            builder = builder.set_override("export.int8", true)?;
        }
        if overrides.half {
            builder = builder.set_override("export.half", true)?;
        }
        if let Some(destination) = &overrides.destination {
            builder = builder.set_override(
                "output.destination",
                destination.to_string_lossy().as_ref(),
            )?;
        }

        let settings = builder.build()?.try_deserialize::<Settings>()?;

        // Validate settings after loading
        settings.validate()?;

        Ok(settings)
    }

    /// Precision implied by the int8/half flags.
    pub fn precision(&self) -> Precision {
        if self.export.int8 {
            Precision::Int8
        } else if self.export.half {
            Precision::Float16
        } else {
            Precision::Float32
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.model.name.trim().is_empty() {
            return Err(ConfigError::Message("model.name must not be empty".to_string()));
        }

        if Path::new(&self.model.name).file_stem().is_none() {
            return Err(ConfigError::Message(
                format!("model.name has no file stem: {}", self.model.name)
            ));
        }

        if let Some(url) = &self.model.weights_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Message(
                    format!("model.weights_url must be an http(s) URL, got: {}", url)
                ));
            }
        }

        // Export resolution must be a positive multiple of the model stride
        if self.export.imgsz == 0 || self.export.imgsz % 32 != 0 {
            return Err(ConfigError::Message(
                format!("export.imgsz must be a positive multiple of 32, got: {}", self.export.imgsz)
            ));
        }

        if self.export.int8 && self.export.half {
            return Err(ConfigError::Message(
                "export.int8 and export.half are mutually exclusive".to_string()
            ));
        }

        if self.export.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "export.timeout_secs must be greater than 0".to_string()
            ));
        }

        if self.output.destination.file_name().is_none() {
            return Err(ConfigError::Message(
                format!("output.destination must name a file, got: {}", self.output.destination.display())
            ));
        }

        // Validate logging level
        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            _ => Err(ConfigError::Message(
                format!("Invalid logging level: {}. Must be one of: error, warn, info, debug, trace",
                    self.logging.level)
            )),
        }?;

        Ok(())
    }
}
