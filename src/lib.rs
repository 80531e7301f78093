//! Generates pflag `AddFlags` methods for Go structs annotated with
//! `+flags-gen`.
//!
//! The pipeline is [`parse`] (Go source to [`StructDescriptor`]s) followed by
//! [`generate`] for a single method or [`render_file`] for a complete file.

pub mod cli;
pub mod config;
pub mod error;
pub mod flag_type;
pub mod generator;
mod literal;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;

pub use error::{FlagsGenError, Result};
pub use generator::{GenerateError, generate, render_file};
pub use model::{DefaultValue, FieldDescriptor, FieldType, StructDescriptor};
pub use parser::{ParseError, parse};
