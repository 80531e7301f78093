//! Go code generation for parsed struct descriptors.
//!
//! [`generate`] renders the `AddFlags` method for one struct. [`render_file`]
//! wraps the methods of every struct from one source file in a complete Go
//! file with package clause and imports.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::literal::quote;
use crate::model::{FieldDescriptor, StructDescriptor};

/// Import path of the flag library the generated code registers flags with.
pub const PFLAG_IMPORT: &str = "github.com/spf13/pflag";

/// Header marking the output as generated, recognised by Go tooling.
pub const GENERATED_HEADER: &str = "// Code generated by flags-gen. DO NOT EDIT.";

/// Name of the generated method.
pub const METHOD_NAME: &str = "AddFlags";

const FLAG_SET: &str = "fs";

/// Errors that can occur while rendering Go code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no structs to generate flags for")]
    Empty,

    #[error("struct {name} belongs to package {found}, expected {expected}")]
    MixedPackages {
        name: String,
        expected: String,
        found: String,
    },
}

/// Renders Go source from struct descriptors.
pub struct Generator;

impl Generator {
    /// Renders the `AddFlags` method of one struct.
    ///
    /// Fields without a pflag binding are left out.
    pub fn method(descriptor: &StructDescriptor) -> Result<String, GenerateError> {
        let receiver = receiver_name(&descriptor.name);
        let mut out = String::new();

        out.push_str(&format!(
            "// {METHOD_NAME} registers the fields of {} as flags on {FLAG_SET}.\n",
            descriptor.name
        ));
        out.push_str(&format!(
            "func ({receiver} *{}) {METHOD_NAME}({FLAG_SET} *pflag.FlagSet) {{\n",
            descriptor.name
        ));
        for field in descriptor.registered_fields() {
            if let Some(statement) = registration(&receiver, field) {
                out.push('\t');
                out.push_str(&statement);
                out.push('\n');
            }
        }
        out.push_str("}\n");

        Ok(out)
    }

    /// Renders a complete Go file holding the methods of all `descriptors`,
    /// in order, separated by blank lines.
    pub fn file(descriptors: &[StructDescriptor]) -> Result<String, GenerateError> {
        let first = descriptors.first().ok_or(GenerateError::Empty)?;
        if let Some(stray) = descriptors
            .iter()
            .find(|descriptor| descriptor.package != first.package)
        {
            return Err(GenerateError::MixedPackages {
                name: stray.name.clone(),
                expected: first.package.clone(),
                found: stray.package.clone(),
            });
        }

        let methods = descriptors
            .iter()
            .map(Self::method)
            .collect::<Result<Vec<_>, _>>()?;

        let mut out = String::new();
        out.push_str(GENERATED_HEADER);
        out.push_str("\n\n");
        out.push_str(&format!("package {}\n\n", first.package));
        out.push_str(&import_block(descriptors));
        out.push('\n');
        out.push_str(&methods.join("\n"));

        Ok(out)
    }
}

/// Renders the `AddFlags` method of one struct.
pub fn generate(descriptor: &StructDescriptor) -> Result<String, GenerateError> {
    Generator::method(descriptor)
}

/// Renders a complete Go file for all structs parsed from one source file.
pub fn render_file(descriptors: &[StructDescriptor]) -> Result<String, GenerateError> {
    Generator::file(descriptors)
}

/// Go convention: a short receiver named after the type. Falls back to `c`
/// when the first letter does not lowercase to a single letter.
fn receiver_name(struct_name: &str) -> String {
    let mut lowered = struct_name.chars().take(1).flat_map(char::to_lowercase);
    match (lowered.next(), lowered.next()) {
        (Some(letter), None) if letter.is_alphabetic() => letter.to_string(),
        _ => "c".to_string(),
    }
}

fn registration(receiver: &str, field: &FieldDescriptor) -> Option<String> {
    let method = field.registration_method?;
    let default = field.default_literal.as_deref()?;
    let name = quote(&field.flag_name);
    let usage = quote(&field.description);
    let target = format!("&{receiver}.{}", field.name);

    Some(match field.short_flag {
        Some(short) => format!(
            "{FLAG_SET}.{method}P({target}, {name}, {}, {default}, {usage})",
            quote(&short.to_string())
        ),
        None => format!("{FLAG_SET}.{method}({target}, {name}, {default}, {usage})"),
    })
}

/// Standard-library imports first, then pflag, as goimports groups them.
fn import_block(descriptors: &[StructDescriptor]) -> String {
    let standard: BTreeSet<&str> = descriptors
        .iter()
        .flat_map(|descriptor| descriptor.imports.iter().map(String::as_str))
        .collect();

    let mut out = String::from("import (\n");
    for import in &standard {
        out.push_str(&format!("\t{}\n", quote(import)));
    }
    if !standard.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("\t{}\n", quote(PFLAG_IMPORT)));
    out.push_str(")\n");
    out
}
