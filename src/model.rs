use serde::Serialize;

use crate::flag_type::FlagType;

/// The normalized type of a struct field.
///
/// Parsing succeeds for every type the resolver understands (named,
/// package-qualified and slice types), but only the types listed in
/// [`FlagType`] can be bound to a flag. The rest keep their normalized
/// spelling so they show up in descriptor dumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum FieldType {
    Supported(FlagType),
    Unsupported(String),
}

impl FieldType {
    /// Classifies a normalized type string such as `int64` or `[]string`.
    pub fn from_type_name(name: &str) -> Self {
        match FlagType::from_type_name(name) {
            Some(flag_type) => Self::Supported(flag_type),
            None => Self::Unsupported(name.to_string()),
        }
    }

    /// Returns the Go spelling of the type.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Supported(flag_type) => flag_type.type_name(),
            Self::Unsupported(name) => name,
        }
    }

    pub fn flag_type(&self) -> Option<FlagType> {
        match self {
            Self::Supported(flag_type) => Some(*flag_type),
            Self::Unsupported(_) => None,
        }
    }
}

/// A default value taken from a `default:"..."` struct tag, typed by the
/// field it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    StringList(Vec<String>),
    IntList(Vec<i64>),
    /// Duration text such as `30s`, interpreted when the literal is rendered.
    Duration(String),
    /// The tag text as written, kept when it could not be read as the
    /// field's type or when the type is unsupported.
    Raw(String),
}

/// One exported struct field selected for flag generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Identifier as declared in the struct.
    pub name: String,
    pub field_type: FieldType,
    /// Key from the `json` tag, without options such as `omitempty`.
    pub external_name: Option<String>,
    /// Kebab-case flag name.
    pub flag_name: String,
    /// Single-character shorthand from the `short` tag.
    pub short_flag: Option<char>,
    pub description: String,
    pub default_value: Option<DefaultValue>,
    /// Go literal passed as the flag default. Only set for supported types.
    pub default_literal: Option<String>,
    /// pflag method used to bind the field. Only set for supported types.
    pub registration_method: Option<&'static str>,
}

/// A struct declaration annotated with `+flags-gen`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructDescriptor {
    pub name: String,
    /// Go package the struct was declared in.
    pub package: String,
    /// Exported fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Import paths the generated code needs besides pflag, sorted.
    pub imports: Vec<String>,
}

impl StructDescriptor {
    /// Returns the fields that the generator will register.
    pub fn registered_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(|field| field.registration_method.is_some() && field.default_literal.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_classifies_supported_names() {
        assert_eq!(
            FieldType::from_type_name("time.Duration"),
            FieldType::Supported(FlagType::Duration)
        );
        assert_eq!(
            FieldType::from_type_name("[]string"),
            FieldType::Supported(FlagType::StringSlice)
        );
    }

    #[test]
    fn field_type_keeps_unsupported_spelling() {
        let field_type = FieldType::from_type_name("[]float64");
        assert_eq!(field_type, FieldType::Unsupported("[]float64".to_string()));
        assert_eq!(field_type.type_name(), "[]float64");
        assert!(field_type.flag_type().is_none());
    }

    #[test]
    fn default_value_serializes_with_kind_tag() {
        let json = serde_json::to_string(&DefaultValue::StringList(vec!["web".to_string()]))
            .expect("serialization should succeed");
        assert_eq!(json, r#"{"kind":"string_list","value":["web"]}"#);
    }
}
