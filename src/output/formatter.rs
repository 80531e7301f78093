//! Output formatter trait and factory.

use crate::cli::OutputFormat;
use crate::model::StructDescriptor;

use super::OutputError;

/// Turns the structs parsed from one source file into the text written out.
pub trait OutputFormatter {
    /// Formats all descriptors into a single document.
    fn format(&self, descriptors: &[StructDescriptor]) -> Result<String, OutputError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &'static str;
}

/// Creates the appropriate formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    use super::go::GoFormatter;
    use super::json::JsonFormatter;

    match format {
        OutputFormat::Go => Box::new(GoFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_formatter_go() {
        assert_eq!(create_formatter(OutputFormat::Go).extension(), "go");
    }

    #[test]
    fn create_formatter_json() {
        assert_eq!(create_formatter(OutputFormat::Json).extension(), "json");
    }
}
