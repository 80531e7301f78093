//! Go source parsing.
//!
//! The source is parsed into a tree-sitter syntax tree. Top-level type
//! declarations documented with `+flags-gen` are turned into
//! [`StructDescriptor`]s, one [`FieldDescriptor`] per exported field.

mod comments;
mod naming;
mod tags;

use std::collections::BTreeSet;

use log::{debug, warn};
use thiserror::Error;
use tree_sitter::{Node, Tree};

use crate::flag_type::FlagType;
use crate::model::{DefaultValue, FieldDescriptor, FieldType, StructDescriptor};
use comments::Attached;
use tags::StructTag;

pub use comments::ANNOTATION_MARKER;
pub use naming::to_kebab_case;

/// Node kinds allowed at the top level of a Go file after the package clause.
const TOP_LEVEL_DECLARATIONS: &[&str] = &[
    "import_declaration",
    "const_declaration",
    "var_declaration",
    "type_declaration",
    "function_declaration",
    "method_declaration",
];

/// Errors that abort parsing of a source file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Go grammar could not be loaded: {0}")]
    Grammar(String),

    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },

    #[error("missing package clause")]
    MissingPackage,

    #[error("unsupported type for field {field} in struct {struct_name}: {kind}")]
    UnsupportedType {
        struct_name: String,
        field: String,
        kind: String,
    },
}

/// Extracts flag descriptors from Go source.
pub struct SourceParser;

impl SourceParser {
    /// Parses one Go source file and returns its annotated structs in
    /// declaration order.
    ///
    /// Any syntax error, or any selected field with a type the resolver does
    /// not understand, fails the whole file.
    pub fn parse(source: &str) -> Result<Vec<StructDescriptor>, ParseError> {
        let tree = Self::syntax_tree(source)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(Self::syntax_error(root));
        }

        let package = Self::package_name(root, source)?;
        let top_level = named_children(root);
        let declarations = comments::attach(&top_level, source, None, |node| {
            node.kind() == "type_declaration"
        });

        let mut structs = Vec::new();
        for (declaration, attached) in declarations {
            Self::collect_declaration(declaration, &attached, source, &package, &mut structs)?;
        }

        debug!(
            "Found {} annotated struct(s) in package {}",
            structs.len(),
            package
        );
        Ok(structs)
    }

    fn syntax_tree(source: &str) -> Result<Tree, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ParseError::Grammar(e.to_string()))?;
        parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Grammar("parser produced no syntax tree".to_string()))
    }

    /// Locates the first error or missing node below `root`.
    fn syntax_error(root: Node<'_>) -> ParseError {
        let mut node = root;
        while let Some(child) = first_child_with_error(node) {
            node = child;
            if node.is_error() || node.is_missing() {
                break;
            }
        }

        syntax_error_at(node)
    }

    /// Checks the top-level layout of the file and returns its package name.
    ///
    /// The grammar is more permissive than Go: it accepts statements at the
    /// top level and any number of package clauses anywhere in the file.
    fn package_name(root: Node<'_>, source: &str) -> Result<String, ParseError> {
        let mut package = None;
        let mut seen_declaration = false;

        for node in named_children(root) {
            match node.kind() {
                "comment" => {}
                "package_clause" => {
                    if package.is_some() || seen_declaration {
                        return Err(syntax_error_at(node));
                    }
                    let identifier = named_children(node)
                        .into_iter()
                        .find(|child| child.kind() == "package_identifier")
                        .ok_or_else(|| syntax_error_at(node))?;
                    package = Some(node_text(identifier, source).to_string());
                }
                kind if TOP_LEVEL_DECLARATIONS.contains(&kind) => seen_declaration = true,
                _ => return Err(syntax_error_at(node)),
            }
        }

        package.ok_or(ParseError::MissingPackage)
    }

    /// Handles one `type` declaration, which is either a single spec or a
    /// parenthesized group. The group's documentation applies to every spec
    /// in it; each spec may also carry its own.
    fn collect_declaration(
        declaration: Node<'_>,
        attached: &Attached<'_>,
        source: &str,
        package: &str,
        structs: &mut Vec<StructDescriptor>,
    ) -> Result<(), ParseError> {
        let group_marked = attached.has_marker();
        let specs = named_children(declaration);
        let opening_row = Self::group_opening_row(declaration);
        let is_spec = |node: &Node<'_>| matches!(node.kind(), "type_spec" | "type_alias");

        for (spec, spec_attached) in comments::attach(&specs, source, opening_row, is_spec) {
            if !group_marked && !spec_attached.has_marker() {
                continue;
            }
            if let Some(descriptor) = Self::parse_spec(spec, source, package)? {
                structs.push(descriptor);
            }
        }
        Ok(())
    }

    fn group_opening_row(declaration: Node<'_>) -> Option<usize> {
        let mut cursor = declaration.walk();
        let opening = declaration
            .children(&mut cursor)
            .find(|node| node.kind() == "(")
            .map(|paren| paren.start_position().row);
        opening
    }

    /// Builds a descriptor for an annotated type spec, or `None` when the type
    /// is not a plain struct.
    fn parse_spec(
        spec: Node<'_>,
        source: &str,
        package: &str,
    ) -> Result<Option<StructDescriptor>, ParseError> {
        let name = spec
            .child_by_field_name("name")
            .map(|node| node_text(node, source))
            .unwrap_or_default();

        if spec.kind() == "type_alias" {
            debug!("Skipping annotated alias {}", name);
            return Ok(None);
        }

        let Some(body) = spec
            .child_by_field_name("type")
            .filter(|node| node.kind() == "struct_type")
        else {
            debug!("Skipping annotated non-struct type {}", name);
            return Ok(None);
        };

        if spec.child_by_field_name("type_parameters").is_some() {
            warn!("Skipping generic struct {}: type parameters are not supported", name);
            return Ok(None);
        }

        Self::parse_struct(name, body, source, package).map(Some)
    }

    fn parse_struct(
        name: &str,
        body: Node<'_>,
        source: &str,
        package: &str,
    ) -> Result<StructDescriptor, ParseError> {
        let mut fields = Vec::new();
        let mut imports = BTreeSet::new();

        let field_list = named_children(body)
            .into_iter()
            .find(|node| node.kind() == "field_declaration_list");
        let Some(field_list) = field_list else {
            return Ok(Self::descriptor(name, package, fields, imports));
        };

        let entries = named_children(field_list);
        let opening_row = Some(field_list.start_position().row);
        let declarations = comments::attach(&entries, source, opening_row, |node| {
            node.kind() == "field_declaration"
        });

        for (declaration, attached) in declarations {
            let mut cursor = declaration.walk();
            let names: Vec<Node<'_>> = declaration
                .children_by_field_name("name", &mut cursor)
                .collect();
            if names.is_empty() {
                debug!("Skipping embedded field in struct {}", name);
                continue;
            }

            let tag = declaration
                .child_by_field_name("tag")
                .map(|node| StructTag::from_literal(node_text(node, source)))
                .unwrap_or_default();
            let description = attached.description();

            for field_name in names.iter().map(|node| node_text(*node, source)) {
                if !naming::is_exported(field_name) {
                    debug!("Skipping unexported field {}.{}", name, field_name);
                    continue;
                }

                let type_name = declaration
                    .child_by_field_name("type")
                    .ok_or_else(|| Self::syntax_error(declaration))
                    .and_then(|node| {
                        resolve_type(node, source).map_err(|kind| ParseError::UnsupportedType {
                            struct_name: name.to_string(),
                            field: field_name.to_string(),
                            kind,
                        })
                    })?;

                let field = Self::build_field(name, field_name, &type_name, &tag, &description);
                if let Some(import) = field.field_type.flag_type().and_then(FlagType::required_import)
                {
                    imports.insert(import.to_string());
                }
                fields.push(field);
            }
        }

        Ok(Self::descriptor(name, package, fields, imports))
    }

    fn descriptor(
        name: &str,
        package: &str,
        fields: Vec<FieldDescriptor>,
        imports: BTreeSet<String>,
    ) -> StructDescriptor {
        StructDescriptor {
            name: name.to_string(),
            package: package.to_string(),
            fields,
            imports: imports.into_iter().collect(),
        }
    }

    fn build_field(
        struct_name: &str,
        name: &str,
        type_name: &str,
        tag: &StructTag,
        description: &str,
    ) -> FieldDescriptor {
        let field_type = FieldType::from_type_name(type_name);
        let flag_type = field_type.flag_type();
        let external_name = tag.json_name().map(str::to_string);
        let flag_name = to_kebab_case(external_name.as_deref().unwrap_or(name));

        let default_value = tag.default_value().map(|raw| match flag_type {
            Some(flag_type) => flag_type.parse_default(raw),
            None => DefaultValue::Raw(raw.to_string()),
        });

        let (registration_method, default_literal) = match flag_type {
            Some(flag_type) => (
                Some(flag_type.registration_method()),
                Some(Self::default_literal(
                    struct_name,
                    name,
                    flag_type,
                    default_value.as_ref(),
                )),
            ),
            None => {
                debug!(
                    "Field {}.{} has type {} with no flag binding",
                    struct_name, name, type_name
                );
                (None, None)
            }
        };

        let short_flag = tag
            .short()
            .and_then(|short| Self::short_flag(struct_name, name, flag_type, short));

        FieldDescriptor {
            name: name.to_string(),
            field_type,
            external_name,
            flag_name,
            short_flag,
            description: description.to_string(),
            default_value,
            default_literal,
            registration_method,
        }
    }

    /// Renders the default as a literal of the field's type, falling back to
    /// the zero value when the tag text does not fit the type.
    fn default_literal(
        struct_name: &str,
        name: &str,
        flag_type: FlagType,
        value: Option<&DefaultValue>,
    ) -> String {
        let Some(value) = value else {
            return flag_type.zero_literal().to_string();
        };

        flag_type.render_default(value).unwrap_or_else(|| {
            warn!(
                "Default {:?} of field {}.{} is not a valid {}, using {}",
                value,
                struct_name,
                name,
                flag_type.type_name(),
                flag_type.zero_literal()
            );
            flag_type.zero_literal().to_string()
        })
    }

    fn short_flag(
        struct_name: &str,
        name: &str,
        flag_type: Option<FlagType>,
        short: &str,
    ) -> Option<char> {
        let mut chars = short.chars();
        let shorthand = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => c,
            _ => {
                warn!(
                    "Ignoring short flag {:?} of field {}.{}: expected one ASCII letter or digit",
                    short, struct_name, name
                );
                return None;
            }
        };

        if !flag_type.is_some_and(FlagType::allows_short_flag) {
            warn!(
                "Ignoring short flag {:?} of field {}.{}: only string, int and bool flags take a shorthand",
                short, struct_name, name
            );
            return None;
        }

        Some(shorthand)
    }
}

/// Parses Go source into struct descriptors.
pub fn parse(source: &str) -> Result<Vec<StructDescriptor>, ParseError> {
    SourceParser::parse(source)
}

/// Normalizes a field type to its Go spelling.
///
/// Only named types, package-qualified names and slices of those are
/// understood; any other shape is returned as `Err` with a description.
fn resolve_type(node: Node<'_>, source: &str) -> Result<String, String> {
    match node.kind() {
        "type_identifier" => Ok(node_text(node, source).to_string()),
        "qualified_type" => {
            let part = |field: &str| {
                node.child_by_field_name(field)
                    .map(|child| node_text(child, source))
                    .unwrap_or_default()
            };
            Ok(format!("{}.{}", part("package"), part("name")))
        }
        "slice_type" => {
            let element = node
                .child_by_field_name("element")
                .ok_or_else(|| "slice without element type".to_string())?;
            Ok(format!("[]{}", resolve_type(element, source)?))
        }
        other => Err(format!(
            "{} `{}`",
            other.replace('_', " "),
            node_text(node, source)
        )),
    }
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node.named_children(&mut cursor).collect();
    children
}

fn first_child_with_error(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let child = node.children(&mut cursor).find(|child| child.has_error());
    child
}

fn syntax_error_at(node: Node<'_>) -> ParseError {
    let position = node.start_position();
    ParseError::Syntax {
        line: position.row + 1,
        column: position.column + 1,
    }
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}
