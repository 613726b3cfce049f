//! Flattening of the field tree into an ordered list of terminal fields.
//!
//! The order produced here becomes the CSV column order, so callers can
//! line up rows from different documents filled from the same template.

use crate::field::{FieldNode, TerminalField};

/// Iterator over the terminal fields of a field tree, depth-first pre-order.
///
/// Children of a non-terminal node are visited in document order before the
/// node's next sibling. Non-terminal nodes without children yield nothing.
/// Created by [`FieldNode::terminals`], [`AcroForm::terminals`](crate::AcroForm::terminals)
/// or [`Terminals::new`].
#[derive(Debug, Clone)]
pub struct Terminals<'a> {
    /// Pending nodes, next node on top.
    stack: Vec<&'a FieldNode>,
}

impl<'a> Terminals<'a> {
    /// Start a traversal over a list of root nodes.
    pub fn new(roots: &'a [FieldNode]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Terminals<'a> {
    type Item = &'a TerminalField;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                FieldNode::Terminal(field) => return Some(field),
                FieldNode::NonTerminal { children, .. } => {
                    self.stack.extend(children.iter().rev());
                }
            }
        }
        None
    }
}

/// Collect all terminal fields under `roots`, preserving encounter order.
///
/// Duplicate names are kept as separate entries; nothing is sorted.
pub fn collect_terminal_fields(roots: &[FieldNode]) -> Vec<&TerminalField> {
    Terminals::new(roots).collect()
}
