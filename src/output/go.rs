//! Go source output: one file with an `AddFlags` method per struct.

use crate::generator::render_file;
use crate::model::StructDescriptor;

use super::OutputError;
use super::formatter::OutputFormatter;

pub struct GoFormatter;

impl OutputFormatter for GoFormatter {
    fn format(&self, descriptors: &[StructDescriptor]) -> Result<String, OutputError> {
        Ok(render_file(descriptors)?)
    }

    fn extension(&self) -> &'static str {
        "go"
    }
}
