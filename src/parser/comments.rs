//! Pairs comments with the declarations and fields they document.
//!
//! Tree-sitter keeps comments as plain sibling nodes, so attachment is
//! decided from line numbers the same way Go does it: consecutive comments
//! without a blank line form a group, a group that ends on the line right
//! above an item documents it, and a comment that starts on the line where
//! an item ends trails that item.

use tree_sitter::Node;

use super::node_text;

/// Marker that opts a type declaration into flag generation.
pub const ANNOTATION_MARKER: &str = "+flags-gen";

#[derive(Debug, Clone, Copy)]
pub struct Comment<'a> {
    text: &'a str,
    start_row: usize,
    end_row: usize,
}

impl<'a> Comment<'a> {
    fn new(node: Node<'_>, source: &'a str) -> Self {
        Self {
            text: node_text(node, source),
            start_row: node.start_position().row,
            end_row: node.end_position().row,
        }
    }

    /// Comment text with `//` or `/* */` markers removed, one entry per line.
    pub fn lines(&self) -> Vec<&'a str> {
        if let Some(body) = self.text.strip_prefix("//") {
            return vec![body.trim()];
        }
        let body = self.text.strip_prefix("/*").unwrap_or(self.text);
        let body = body.strip_suffix("*/").unwrap_or(body);
        body.lines().map(str::trim).collect()
    }
}

/// Comments attached to one item.
#[derive(Debug, Clone, Default)]
pub struct Attached<'a> {
    /// Documentation group directly above the item.
    pub doc: Vec<Comment<'a>>,
    /// First comment on the item's last line.
    pub trailing: Option<Comment<'a>>,
}

impl Attached<'_> {
    /// Whether the documentation group carries the `+flags-gen` marker.
    pub fn has_marker(&self) -> bool {
        self.doc
            .iter()
            .any(|comment| comment.text.contains(ANNOTATION_MARKER))
    }

    /// Help text for a field.
    ///
    /// Documentation lines are joined with single spaces, skipping blank
    /// lines and `+` annotation lines such as `+optional`. Without usable
    /// documentation the trailing comment is used.
    pub fn description(&self) -> String {
        let doc_lines: Vec<&str> = self
            .doc
            .iter()
            .flat_map(Comment::lines)
            .filter(|line| !line.is_empty() && !line.starts_with('+'))
            .collect();
        if !doc_lines.is_empty() {
            return doc_lines.join(" ");
        }

        self.trailing
            .map(|comment| {
                let lines: Vec<&str> = comment
                    .lines()
                    .into_iter()
                    .filter(|line| !line.is_empty())
                    .collect();
                lines.join(" ")
            })
            .unwrap_or_default()
    }
}

/// Walks the named children of a container and returns every item together
/// with its comments.
///
/// `opening_row` is the line of the container's opening brace or paren, so
/// a comment written right after it is not taken as documentation.
pub fn attach<'t, 's>(
    children: &[Node<'t>],
    source: &'s str,
    opening_row: Option<usize>,
    is_item: impl Fn(&Node<'t>) -> bool,
) -> Vec<(Node<'t>, Attached<'s>)> {
    let mut items: Vec<(Node<'t>, Attached<'s>)> = Vec::new();
    let mut group: Vec<Comment<'s>> = Vec::new();
    let mut previous_end_row = opening_row;
    let mut previous_was_item = false;

    for child in children {
        if child.kind() == "comment" {
            let comment = Comment::new(*child, source);

            if previous_end_row == Some(comment.start_row) {
                if previous_was_item {
                    if let Some((_, attached)) = items.last_mut() {
                        if attached.trailing.is_none() {
                            attached.trailing = Some(comment);
                        }
                    }
                }
                previous_end_row = Some(comment.end_row);
                continue;
            }

            if group
                .last()
                .is_some_and(|last| comment.start_row > last.end_row + 1)
            {
                group.clear();
            }
            group.push(comment);
            continue;
        }

        let start_row = child.start_position().row;
        let documents_child = group
            .last()
            .is_some_and(|last| last.end_row + 1 == start_row);
        let doc = if documents_child {
            std::mem::take(&mut group)
        } else {
            group.clear();
            Vec::new()
        };

        previous_end_row = Some(child.end_position().row);
        previous_was_item = is_item(child);
        if previous_was_item {
            items.push((
                *child,
                Attached {
                    doc,
                    trailing: None,
                },
            ));
        }
    }

    items
}
