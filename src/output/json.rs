//! JSON output of the parsed struct descriptors.
//!
//! Lets other tooling consume what the parser extracted (flag names,
//! defaults, descriptions) without parsing Go.

use crate::model::StructDescriptor;

use super::OutputError;
use super::formatter::OutputFormatter;

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, descriptors: &[StructDescriptor]) -> Result<String, OutputError> {
        let mut output = serde_json::to_string_pretty(descriptors)?;
        output.push('\n');
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
