//! Export options for STL output

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::EXPORT_FILE_STEM;

/// STL encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StlFormat {
    /// 80-byte header, triangle count, 50-byte records
    #[default]
    Binary,
    /// Plain-text `solid` / `facet` form
    Ascii,
}

impl StlFormat {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            StlFormat::Binary => "Binary",
            StlFormat::Ascii => "ASCII",
        }
    }
}

/// Export options for STL files
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Output directory
    pub output_dir: PathBuf,
    /// Encoding
    pub format: StlFormat,
    /// Name written after `solid` in ASCII output
    pub solid_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            format: StlFormat::Binary,
            solid_name: EXPORT_FILE_STEM.to_string(),
        }
    }
}

impl ExportOptions {
    /// Options writing into `output_dir` with the default format
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: StlFormat) -> Self {
        self.format = format;
        self
    }

    /// File name stamped with the session time, e.g. `12.35_exported_mesh.stl`
    pub fn file_name(elapsed_secs: f64) -> String {
        format!("{:.2}_{}.stl", elapsed_secs, EXPORT_FILE_STEM)
    }

    /// Full path of the file written at `elapsed_secs`
    pub fn file_path(&self, elapsed_secs: f64) -> PathBuf {
        self.output_dir.join(Self::file_name(elapsed_secs))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_uses_two_decimals() {
        assert_eq!(ExportOptions::file_name(12.3456), "12.35_exported_mesh.stl");
        assert_eq!(ExportOptions::file_name(0.0), "0.00_exported_mesh.stl");
    }

    #[test]
    fn test_file_path_joins_output_dir() {
        let options = ExportOptions::new("/tmp/out");
        assert_eq!(
            options.file_path(1.5),
            PathBuf::from("/tmp/out/1.50_exported_mesh.stl")
        );
    }
}
