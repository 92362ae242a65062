use std::fmt;
use std::path::{Path, PathBuf};
use serde::Deserialize;

/// Inference formats the export library can be asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// TensorFlow Lite flatbuffer, written inside a `<stem>_saved_model` directory
    Tflite,
}

impl ExportFormat {
    /// Identifier passed to the export library
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Tflite => "tflite",
        }
    }

    /// File extension of the produced artifact
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Tflite => "tflite",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric precision of the exported weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Float32,
    Float16,
    Int8,
}

impl Precision {
    /// Suffix the export library appends to the output file stem
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Precision::Float32 => "float32",
            Precision::Float16 => "float16",
            Precision::Int8 => "int8",
        }
    }

    pub fn is_int8(&self) -> bool {
        matches!(self, Precision::Int8)
    }

    pub fn is_half(&self) -> bool {
        matches!(self, Precision::Float16)
    }
}

/// Everything the export library needs for one conversion
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Directory the export runs in; weights and output live here
    pub work_dir: PathBuf,
    /// Weights file name. When it is not present in `work_dir` the library downloads it.
    pub model: String,
    /// Target format
    pub format: ExportFormat,
    /// Square input resolution
    pub imgsz: u32,
    /// Weight precision
    pub precision: Precision,
}

impl ExportRequest {
    /// Model stem, e.g. `yolo11n` for `yolo11n.pt`
    pub fn stem(&self) -> String {
        Path::new(&self.model)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Local path of the weights file
    pub fn weights_path(&self) -> PathBuf {
        self.work_dir.join(&self.model)
    }
}

/// What happened to the exported file
#[derive(Debug, Clone, PartialEq)]
pub enum Relocation {
    /// The file was moved to `destination`; `bytes` is its size there
    Moved { destination: PathBuf, bytes: u64 },
    /// Nothing was found at the expected path
    Missing { expected: PathBuf },
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Last line the export call printed, normally the path it wrote
    pub status: String,
    /// Where the library's output was expected
    pub expected: PathBuf,
    pub relocation: Relocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(model: &str, precision: Precision) -> ExportRequest {
        ExportRequest {
            work_dir: PathBuf::from("work"),
            model: model.to_string(),
            format: ExportFormat::Tflite,
            imgsz: 640,
            precision,
        }
    }

    #[test]
    fn test_request_stem_and_weights_path() {
        let request = request("yolo11n.pt", Precision::Float32);
        assert_eq!(request.stem(), "yolo11n");
        assert_eq!(request.weights_path(), PathBuf::from("work/yolo11n.pt"));
    }

    #[test]
    fn test_precision_flags() {
        assert!(request("yolo11n.pt", Precision::Int8).precision.is_int8());
        assert!(request("yolo11n.pt", Precision::Float16).precision.is_half());
        assert_eq!(Precision::Float32.file_suffix(), "float32");
    }
}
