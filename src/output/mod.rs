//! Output generation module.
//!
//! Formats the parsed struct descriptors (Go source or JSON) and writes the
//! result to stdout or to a file.

pub mod formatter;
pub mod go;
pub mod json;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::config::OutputTarget;
use crate::generator::GenerateError;
use crate::model::StructDescriptor;
use formatter::create_formatter;

/// Errors that can occur during output generation.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to generate code: {0}")]
    Generate(#[from] GenerateError),

    #[error("failed to serialize descriptors: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes formatted descriptors to stdout or a file.
pub struct OutputWriter {
    format: OutputFormat,
    target: OutputTarget,
    no_color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, target: OutputTarget, no_color: bool) -> Self {
        Self {
            format,
            target,
            no_color,
        }
    }

    /// Formats `descriptors` and writes them to the configured target.
    ///
    /// Nothing is written when formatting fails.
    pub fn write(&self, descriptors: &[StructDescriptor]) -> Result<(), OutputError> {
        let formatter = create_formatter(self.format);
        let formatted = formatter.format(descriptors)?;

        match &self.target {
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(formatted.as_bytes())?;
                handle.flush()?;
            }
            OutputTarget::File(path) => {
                self.write_to_file(path, &formatted)?;
                self.print_summary(descriptors.len(), path);
            }
        }

        Ok(())
    }

    fn write_to_file(&self, path: &Path, contents: &str) -> Result<(), OutputError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, contents)?;

        log::debug!("Written: {}", path.display());
        Ok(())
    }

    fn print_summary(&self, count: usize, path: &Path) {
        let message = format!(
            "Generated flags code for {} struct(s) in {}",
            count,
            path.display()
        );
        if self.no_color {
            println!("{}", message);
        } else {
            println!("{}", message.green());
        }
    }
}
