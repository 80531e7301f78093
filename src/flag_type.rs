//! The closed set of Go types that can be bound to a pflag flag.
//!
//! Each [`FlagType`] knows its Go spelling, the `pflag.FlagSet` method that
//! registers it, its zero literal, how to read a `default` tag for it and how
//! to write that default back out as Go source.

use serde::Serialize;

use crate::literal::{duration_literal, quote};
use crate::model::DefaultValue;

/// Import path of the Go time package.
pub const TIME_IMPORT: &str = "time";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagType {
    String,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    StringSlice,
    IntSlice,
    Duration,
}

impl FlagType {
    pub const ALL: [Self; 17] = [
        Self::String,
        Self::Bool,
        Self::Int,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Float32,
        Self::Float64,
        Self::StringSlice,
        Self::IntSlice,
        Self::Duration,
    ];

    /// Looks up a normalized Go type name.
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|flag_type| flag_type.type_name() == name)
    }

    pub const fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::StringSlice => "[]string",
            Self::IntSlice => "[]int",
            Self::Duration => "time.Duration",
        }
    }

    /// The `pflag.FlagSet` method that binds a variable of this type.
    pub const fn registration_method(self) -> &'static str {
        match self {
            Self::String => "StringVar",
            Self::Bool => "BoolVar",
            Self::Int => "IntVar",
            Self::Int8 => "Int8Var",
            Self::Int16 => "Int16Var",
            Self::Int32 => "Int32Var",
            Self::Int64 => "Int64Var",
            Self::Uint => "UintVar",
            Self::Uint8 => "Uint8Var",
            Self::Uint16 => "Uint16Var",
            Self::Uint32 => "Uint32Var",
            Self::Uint64 => "Uint64Var",
            Self::Float32 => "Float32Var",
            Self::Float64 => "Float64Var",
            Self::StringSlice => "StringSliceVar",
            Self::IntSlice => "IntSliceVar",
            Self::Duration => "DurationVar",
        }
    }

    pub const fn zero_literal(self) -> &'static str {
        match self {
            Self::String => r#""""#,
            Self::Bool => "false",
            Self::Int
            | Self::Int8
            | Self::Int16
            | Self::Int32
            | Self::Int64
            | Self::Uint
            | Self::Uint8
            | Self::Uint16
            | Self::Uint32
            | Self::Uint64
            | Self::Float32
            | Self::Float64 => "0",
            Self::StringSlice => "[]string{}",
            Self::IntSlice => "[]int{}",
            Self::Duration => "time.Duration(0)",
        }
    }

    /// Only simple scalar flags get a one-letter shorthand.
    pub const fn allows_short_flag(self) -> bool {
        matches!(self, Self::String | Self::Int | Self::Bool)
    }

    /// Import the generated code needs when a field of this type is present.
    pub const fn required_import(self) -> Option<&'static str> {
        match self {
            Self::Duration => Some(TIME_IMPORT),
            _ => None,
        }
    }

    /// Reads the text of a `default` tag as a value of this type.
    ///
    /// Text that does not fit the type is kept as [`DefaultValue::Raw`]
    /// instead of failing the parse.
    pub fn parse_default(self, raw: &str) -> DefaultValue {
        let parsed = match self {
            Self::String => Some(DefaultValue::Str(raw.to_string())),
            Self::Bool => parse_bool(raw).map(DefaultValue::Bool),
            Self::Int | Self::Int64 => raw.parse::<i64>().ok().map(DefaultValue::Int),
            Self::Int8 => raw.parse::<i8>().ok().map(|v| DefaultValue::Int(v.into())),
            Self::Int16 => raw.parse::<i16>().ok().map(|v| DefaultValue::Int(v.into())),
            Self::Int32 => raw.parse::<i32>().ok().map(|v| DefaultValue::Int(v.into())),
            Self::Uint | Self::Uint64 => raw.parse::<u64>().ok().map(DefaultValue::Uint),
            Self::Uint8 => raw.parse::<u8>().ok().map(|v| DefaultValue::Uint(v.into())),
            Self::Uint16 => raw.parse::<u16>().ok().map(|v| DefaultValue::Uint(v.into())),
            Self::Uint32 => raw.parse::<u32>().ok().map(|v| DefaultValue::Uint(v.into())),
            Self::Float32 => parse_float(raw, f64::from(f32::MAX)).map(DefaultValue::Float),
            Self::Float64 => parse_float(raw, f64::MAX).map(DefaultValue::Float),
            Self::StringSlice => Some(DefaultValue::StringList(split_list(raw))),
            Self::IntSlice => split_list(raw)
                .iter()
                .map(|item| item.parse::<i64>().ok())
                .collect::<Option<Vec<_>>>()
                .map(DefaultValue::IntList),
            Self::Duration => Some(DefaultValue::Duration(raw.to_string())),
        };

        parsed.unwrap_or_else(|| DefaultValue::Raw(raw.to_string()))
    }

    /// Renders a default value as a Go literal of this type.
    ///
    /// Returns `None` when the value cannot be written as this type, such as
    /// a [`DefaultValue::Raw`] fallback or a duration in an unknown format.
    pub fn render_default(self, value: &DefaultValue) -> Option<String> {
        match (self, value) {
            (Self::String, DefaultValue::Str(text)) => Some(quote(text)),
            (Self::Bool, DefaultValue::Bool(flag)) => Some(flag.to_string()),
            (
                Self::Int | Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64,
                DefaultValue::Int(number),
            ) => Some(number.to_string()),
            (
                Self::Uint | Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64,
                DefaultValue::Uint(number),
            ) => Some(number.to_string()),
            (Self::Float32 | Self::Float64, DefaultValue::Float(number)) => {
                Some(number.to_string())
            }
            (Self::StringSlice, DefaultValue::StringList(items)) => {
                let items: Vec<String> = items.iter().map(|item| quote(item)).collect();
                Some(format!("[]string{{{}}}", items.join(", ")))
            }
            (Self::IntSlice, DefaultValue::IntList(items)) => {
                let items: Vec<String> = items.iter().map(i64::to_string).collect();
                Some(format!("[]int{{{}}}", items.join(", ")))
            }
            (Self::Duration, DefaultValue::Duration(text)) => duration_literal(text),
            _ => None,
        }
    }
}

/// Accepts the spellings understood by Go's `strconv.ParseBool`.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_float(raw: &str, max: f64) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|number| number.is_finite() && number.abs() <= max)
}

/// Splits a comma-separated tag value. An empty value is an empty list.
fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}
