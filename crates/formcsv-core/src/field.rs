//! PDF form field tree for AcroForm extraction.
//!
//! Provides [`FieldNode`], a tree of terminal and non-terminal fields as
//! exposed by a document's `/AcroForm /Fields` array, and [`FieldType`] for
//! the `/FT` entry of terminal fields.

use crate::collect::Terminals;

/// The type of a PDF form field.
///
/// Corresponds to the `/FT` entry in a field dictionary (PDF 1.7 Table 220).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Text field (`/FT /Tx`).
    Text,
    /// Button field (`/FT /Btn`): checkboxes, radio buttons, push buttons.
    Button,
    /// Choice field (`/FT /Ch`): dropdowns, list boxes.
    Choice,
    /// Signature field (`/FT /Sig`).
    Signature,
}

impl FieldType {
    /// Parse a field type from its PDF name string.
    ///
    /// Returns `None` if the string is not a recognized field type.
    pub fn from_pdf_name(name: &str) -> Option<Self> {
        match name {
            "Tx" => Some(Self::Text),
            "Btn" => Some(Self::Button),
            "Ch" => Some(Self::Choice),
            "Sig" => Some(Self::Signature),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "Text"),
            Self::Button => write!(f, "Button"),
            Self::Choice => write!(f, "Choice"),
            Self::Signature => write!(f, "Signature"),
        }
    }
}

/// A leaf of the field tree: an input that holds a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalField {
    /// Fully-qualified name: ancestors' partial names joined with `.`.
    pub name: String,
    /// Field type from `/FT`, possibly inherited from an ancestor.
    pub field_type: Option<FieldType>,
    /// Current value from `/V`, rendered as text.
    pub value: Option<String>,
}

impl TerminalField {
    /// Create a terminal field with no declared type.
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            field_type: None,
            value: value.map(str::to_string),
        }
    }

    /// Set the field type, returning the modified field.
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// The value as a string slice, `None` when the field has no value.
    pub fn value_as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// A node of a form's field tree.
///
/// A node is either a terminal field holding a value or a grouping node
/// whose children carry the hierarchical name further down. A non-terminal
/// node never holds a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNode {
    /// A value-holding leaf.
    Terminal(TerminalField),
    /// A grouping node. An absent `/Kids` array is an empty `children`.
    NonTerminal {
        /// Fully-qualified name of the group.
        name: String,
        /// Child nodes in document order.
        children: Vec<FieldNode>,
    },
}

impl FieldNode {
    /// Shorthand for a terminal node.
    pub fn terminal(name: impl Into<String>, value: Option<&str>) -> Self {
        FieldNode::Terminal(TerminalField::new(name, value))
    }

    /// Shorthand for a non-terminal node.
    pub fn group(name: impl Into<String>, children: Vec<FieldNode>) -> Self {
        FieldNode::NonTerminal {
            name: name.into(),
            children,
        }
    }

    /// Fully-qualified name of this node.
    pub fn name(&self) -> &str {
        match self {
            FieldNode::Terminal(field) => &field.name,
            FieldNode::NonTerminal { name, .. } => name,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FieldNode::Terminal(_))
    }

    /// Terminal fields of this subtree in depth-first pre-order.
    pub fn terminals(&self) -> Terminals<'_> {
        Terminals::new(std::slice::from_ref(self))
    }
}

/// A document's interactive form: its root-level field list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcroForm {
    /// Root fields from the `/Fields` array, in document order.
    pub fields: Vec<FieldNode>,
}

impl AcroForm {
    pub fn new(fields: Vec<FieldNode>) -> Self {
        Self { fields }
    }

    /// Terminal fields of the whole form in depth-first pre-order.
    pub fn terminals(&self) -> Terminals<'_> {
        Terminals::new(&self.fields)
    }
}
