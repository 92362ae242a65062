use clap::Parser;
use std::path::PathBuf;

use crate::config::Overrides;

/// Download a pretrained YOLO model, export it to TFLite and move the result
/// into the app's assets.
#[derive(Parser, Debug)]
#[command(name = "tflite-export", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and local.toml
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,

    /// Weights file name, e.g. yolo11n.pt
    #[arg(short, long)]
    pub model: Option<String>,

    /// URL to download the weights from when they are not on disk
    #[arg(long)]
    pub weights_url: Option<String>,

    /// Directory the export runs in
    #[arg(short, long)]
    pub work_dir: Option<PathBuf>,

    /// Python interpreter with ultralytics installed
    #[arg(long)]
    pub python: Option<PathBuf>,

    /// Square input resolution
    #[arg(long)]
    pub imgsz: Option<u32>,

    /// Quantize weights to 8-bit integers
    #[arg(long, conflicts_with = "half")]
    pub int8: bool,

    /// Export 16-bit float weights
    #[arg(long)]
    pub half: bool,

    /// Where the exported file is moved to
    #[arg(short, long)]
    pub destination: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            model: self.model.clone(),
            weights_url: self.weights_url.clone(),
            work_dir: self.work_dir.clone(),
            python: self.python.clone(),
            imgsz: self.imgsz,
            int8: self.int8,
            half: self.half,
            destination: self.destination.clone(),
        }
    }
}
