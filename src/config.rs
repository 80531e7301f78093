use std::path::{Component, Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use crate::error::FlagsGenError;
use crate::output::formatter::create_formatter;

/// Largest input file accepted (10 MB).
pub const MAX_INPUT_SIZE: u64 = 10 * 1024 * 1024;

/// Where the generated text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

#[derive(Debug)]
pub struct Config {
    pub no_color: bool,
    pub input: PathBuf,
    pub output: OutputTarget,
    pub format: OutputFormat,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, FlagsGenError> {
        let input = Self::validate_file_path(&cli.input)?;

        let metadata = match std::fs::metadata(&input) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FlagsGenError::Config(format!(
                    "Input file {} does not exist\n\nTip: Make sure the file path is correct and the file has a .go extension",
                    input.display()
                )));
            }
            Err(e) => {
                return Err(FlagsGenError::Config(format!(
                    "Cannot access input file {}: {}",
                    input.display(),
                    e
                )));
            }
        };

        if !metadata.is_file() {
            return Err(FlagsGenError::Config(format!(
                "Input path is not a file: {}",
                input.display()
            )));
        }

        if metadata.len() > MAX_INPUT_SIZE {
            return Err(FlagsGenError::Config(format!(
                "Input file {} is too large ({} bytes), maximum allowed size is {} bytes",
                input.display(),
                metadata.len(),
                MAX_INPUT_SIZE
            )));
        }

        if !Self::has_go_extension(&input) {
            return Err(FlagsGenError::Config(
                "Input file must be a Go source file (.go extension)".to_string(),
            ));
        }

        let output = if cli.stdout {
            OutputTarget::Stdout
        } else {
            let path = match cli.output {
                Some(path) => path,
                None => Self::default_output_path(&input, cli.format),
            };
            OutputTarget::File(Self::validate_file_path(&path)?)
        };

        Ok(Self {
            no_color: cli.no_color,
            input,
            output,
            format: cli.format,
        })
    }

    /// Rejects empty paths and paths with `..` components, then resolves the
    /// path against the current directory.
    pub fn validate_file_path(path: &Path) -> Result<PathBuf, FlagsGenError> {
        if path.as_os_str().is_empty() {
            return Err(FlagsGenError::Config(
                "file path cannot be empty".to_string(),
            ));
        }

        if path
            .components()
            .any(|component| component == Component::ParentDir)
        {
            return Err(FlagsGenError::Config(format!(
                "path contains directory traversal patterns: {}",
                path.display()
            )));
        }

        Self::resolve_path(path)
    }

    /// Resolves a path to an absolute path.
    /// - Absolute paths are returned as-is
    /// - Relative paths are resolved relative to current directory
    pub fn resolve_path(path: &Path) -> Result<PathBuf, FlagsGenError> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().map_err(|e| {
                FlagsGenError::Config(format!("Cannot determine current directory: {}", e))
            })?;
            Ok(current_dir.join(path))
        }
    }

    /// `<dir>/<stem>_flags.go` next to the input, or `.json` for JSON output.
    pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = create_formatter(format).extension();
        input.with_file_name(format!("{}_flags.{}", stem, extension))
    }

    fn has_go_extension(path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("go"))
    }
}
