use std::path::PathBuf;

use thiserror::Error;

use crate::output::OutputError;
use crate::parser::{ANNOTATION_MARKER, ParseError};

#[derive(Error, Debug)]
pub enum FlagsGenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse input file: {0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Output(#[from] OutputError),

    #[error("no structs with {} annotation found in {}", ANNOTATION_MARKER, .0.display())]
    NoAnnotatedStructs(PathBuf),
}

pub type Result<T> = std::result::Result<T, FlagsGenError>;
