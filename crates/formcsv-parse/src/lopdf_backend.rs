//! lopdf-based PDF parsing backend.
//!
//! Implements [`FormBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate. The document catalog's `/AcroForm /Fields` array is walked into a
//! [`FieldNode`] tree, keeping the order in which the document lists fields.

use std::collections::HashSet;

use formcsv_core::{AcroForm, ConvertError, ConvertOptions, FieldNode, FieldType, TerminalField};
use lopdf::encryption::DecryptionError;
use lopdf::{Object, ObjectId};
use tracing::{debug, warn};

use crate::backend::FormBackend;
use crate::error::BackendError;
use crate::text::decode_text_string;

/// A parsed PDF document backed by lopdf.
///
/// The parsed object graph is dropped by [`LopdfBackend::release`]; after
/// that the handle only reports that it was released.
pub struct LopdfDocument {
    inner: Option<lopdf::Document>,
}

impl LopdfDocument {
    /// Access the underlying lopdf document, `None` once released.
    pub fn inner(&self) -> Option<&lopdf::Document> {
        self.inner.as_ref()
    }

    pub fn is_released(&self) -> bool {
        self.inner.is_none()
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("released", &self.is_released())
            .field(
                "object_count",
                &self.inner.as_ref().map_or(0, |doc| doc.objects.len()),
            )
            .finish()
    }
}

/// The lopdf-based form backend.
///
/// # Example
///
/// ```ignore
/// use formcsv_parse::{FormBackend, LopdfBackend};
///
/// let mut doc = LopdfBackend::open(pdf_bytes)?;
/// let form = LopdfBackend::form(&doc, &ConvertOptions::default())?;
/// LopdfBackend::release(&mut doc);
/// ```
pub struct LopdfBackend;

impl FormBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        // Reject encrypted PDFs when no password is provided
        if inner.is_encrypted() {
            return Err(BackendError::Core(ConvertError::PasswordRequired));
        }

        debug!(objects = inner.objects.len(), "parsed PDF document");
        Ok(LopdfDocument { inner: Some(inner) })
    }

    fn open_with_password(bytes: &[u8], password: &str) -> Result<Self::Document, Self::Error> {
        // The reader authenticates and decrypts while loading; plain PDFs ignore the password.
        let inner = lopdf::Document::load_mem_with_password(bytes, password).map_err(|e| match e {
            lopdf::Error::InvalidPassword
            | lopdf::Error::Decryption(DecryptionError::IncorrectPassword) => {
                BackendError::Core(ConvertError::InvalidPassword)
            }
            other => BackendError::Parse(format!("failed to parse PDF: {other}")),
        })?;

        if inner.is_encrypted() {
            return Err(BackendError::Core(ConvertError::InvalidPassword));
        }

        debug!(
            objects = inner.objects.len(),
            was_encrypted = inner.was_encrypted(),
            "parsed PDF document"
        );
        Ok(LopdfDocument { inner: Some(inner) })
    }

    fn form(
        doc: &Self::Document,
        options: &ConvertOptions,
    ) -> Result<Option<AcroForm>, Self::Error> {
        let inner = doc.inner.as_ref().ok_or(BackendError::Released)?;
        Ok(extract_acroform(inner, options))
    }

    fn release(doc: &mut Self::Document) {
        if doc.inner.take().is_some() {
            debug!("released PDF document");
        }
    }
}

/// Follow an indirect reference, if `obj` is one.
fn resolve<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Read the catalog's `/AcroForm` into a field tree.
///
/// Returns `None` if the catalog has no `/AcroForm` dictionary. An
/// `/AcroForm` without a usable `/Fields` array is an empty form.
fn extract_acroform(doc: &lopdf::Document, options: &ConvertOptions) -> Option<AcroForm> {
    let catalog = doc
        .trailer
        .get(b"Root")
        .ok()
        .and_then(|root| resolve(doc, root))
        .and_then(|root| root.as_dict().ok())?;

    let acroform = catalog
        .get(b"AcroForm")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok())?;

    let Some(fields) = acroform
        .get(b"Fields")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_array().ok())
    else {
        debug!("AcroForm has no /Fields array");
        return Some(AcroForm::default());
    };

    let walker = FieldWalker {
        doc,
        max_depth: options.max_field_depth,
    };
    let mut visited = HashSet::new();
    let roots = fields
        .iter()
        .filter_map(|entry| walker.node(entry, Inherited::default(), 0, &mut visited))
        .collect();

    Some(AcroForm::new(roots))
}

/// Attributes a field picks up from its ancestors.
#[derive(Debug, Clone, Copy, Default)]
struct Inherited<'a, 'p> {
    /// Fully-qualified name of the parent.
    name: Option<&'p str>,
    /// `/FT` of the nearest ancestor that declares one.
    field_type: Option<FieldType>,
    /// `/V` of the nearest ancestor that declares one.
    value: Option<&'a Object>,
}

struct FieldWalker<'a> {
    doc: &'a lopdf::Document,
    max_depth: usize,
}

impl<'a> FieldWalker<'a> {
    /// Build the node for one field dictionary and, recursively, its kids.
    ///
    /// `visited` holds every field object already walked. A second reference
    /// to one of them (a cycle, or the same object listed twice) is dropped,
    /// so each object contributes at most one subtree.
    fn node(
        &self,
        obj: &'a Object,
        parent: Inherited<'a, '_>,
        depth: usize,
        visited: &mut HashSet<ObjectId>,
    ) -> Option<FieldNode> {
        if depth >= self.max_depth {
            warn!(
                depth,
                max_depth = self.max_depth,
                "field tree exceeds max_field_depth, subtree dropped"
            );
            return None;
        }

        let id = match obj {
            Object::Reference(id) => Some(*id),
            _ => None,
        };
        if let Some(id) = id {
            if !visited.insert(id) {
                warn!(object = ?id, "field object referenced more than once, subtree dropped");
                return None;
            }
        }

        let Some(dict) = resolve(self.doc, obj).and_then(|o| o.as_dict().ok()) else {
            debug!(object = ?id, "field entry is not a dictionary, skipped");
            return None;
        };

        let partial_name = dict.get(b"T").ok().and_then(|t| self.text(t));
        let name = match (parent.name, partial_name) {
            (Some(parent), Some(partial)) => format!("{parent}.{partial}"),
            (Some(parent), None) => parent.to_string(),
            (None, Some(partial)) => partial,
            (None, None) => String::new(),
        };

        let field_type = match dict.get(b"FT") {
            Ok(Object::Name(ft)) => FieldType::from_pdf_name(&String::from_utf8_lossy(ft)),
            _ => parent.field_type,
        };
        let value = dict.get(b"V").ok().or(parent.value);

        let kids = dict
            .get(b"Kids")
            .ok()
            .and_then(|kids| resolve(self.doc, kids))
            .and_then(|kids| kids.as_array().ok());

        if let Some(kids) = kids {
            // Kids with /T are child fields; kids without it are widget annotations.
            if kids.iter().any(|kid| self.is_field(kid)) {
                let inherited = Inherited {
                    name: Some(&name),
                    field_type,
                    value,
                };
                let children = kids
                    .iter()
                    .filter_map(|kid| self.node(kid, inherited, depth + 1, visited))
                    .collect();
                return Some(FieldNode::NonTerminal { name, children });
            }
            if field_type.is_none() {
                debug!(field = %name, "untyped field without child fields, kept as empty group");
                return Some(FieldNode::NonTerminal {
                    name,
                    children: Vec::new(),
                });
            }
        }

        let Some(field_type) = field_type else {
            debug!(field = %name, "node has no field type, skipped");
            return None;
        };

        Some(FieldNode::Terminal(TerminalField {
            name,
            field_type: Some(field_type),
            value: value.and_then(|v| self.value_text(v)),
        }))
    }

    fn is_field(&self, kid: &Object) -> bool {
        resolve(self.doc, kid)
            .and_then(|o| o.as_dict().ok())
            .is_some_and(|d| d.has(b"T"))
    }

    /// Decode a text string object.
    fn text(&self, obj: &Object) -> Option<String> {
        match resolve(self.doc, obj)? {
            Object::String(bytes, _) => Some(decode_text_string(bytes)),
            _ => None,
        }
    }

    /// Render a `/V` entry as text.
    ///
    /// Handles strings, names (checkbox and radio states), arrays of
    /// strings or names (multi-select choices, joined with `", "`), and
    /// rich-text streams.
    fn value_text(&self, obj: &Object) -> Option<String> {
        match resolve(self.doc, obj)? {
            Object::String(bytes, _) => Some(decode_text_string(bytes)),
            Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
            Object::Array(items) => {
                let values: Vec<String> = items
                    .iter()
                    .filter_map(|item| match resolve(self.doc, item)? {
                        Object::String(bytes, _) => Some(decode_text_string(bytes)),
                        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
                        _ => None,
                    })
                    .collect();
                if values.is_empty() {
                    None
                } else {
                    Some(values.join(", "))
                }
            }
            Object::Stream(stream) => {
                let content = if stream.dict.has(b"Filter") {
                    stream.decompressed_content().ok()?
                } else {
                    stream.content.clone()
                };
                Some(decode_text_string(&content))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{
        Document, EncryptionState, EncryptionVersion, Object, ObjectId, Permissions, StringFormat,
        dictionary,
    };

    /// Build a one-page PDF whose AcroForm lists the fields returned by `fields`.
    fn pdf_with_fields(fields: impl FnOnce(&mut Document) -> Vec<Object>) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id: ObjectId = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
            }),
        );

        let field_refs = fields(&mut doc);
        let acroform_id = doc.add_object(dictionary! {
            "Fields" => field_refs,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
            "AcroForm" => Object::Reference(acroform_id),
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("failed to save test PDF");
        buf
    }

    /// A PDF with a page tree and no AcroForm.
    fn pdf_without_form() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id: ObjectId = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("failed to save test PDF");
        buf
    }

    fn text_field(doc: &mut Document, name: &str, value: Option<&str>) -> Object {
        let mut dict = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "T" => Object::string_literal(name),
            "FT" => "Tx",
        };
        if let Some(value) = value {
            dict.set("V", Object::string_literal(value));
        }
        Object::Reference(doc.add_object(dict))
    }

    /// Re-save `bytes` encrypted (RC4, 128-bit) with `user_password`.
    fn encrypt_pdf(bytes: &[u8], user_password: &str) -> Vec<u8> {
        let mut doc = Document::load_mem(bytes).unwrap();
        doc.trailer.set(
            "ID",
            vec![
                Object::string_literal(b"0123456789abcdef".to_vec()),
                Object::string_literal(b"fedcba9876543210".to_vec()),
            ],
        );
        let version = EncryptionVersion::V2 {
            document: &doc,
            owner_password: "owner-pw",
            user_password,
            key_length: 128,
            permissions: Permissions::all(),
        };
        let state = EncryptionState::try_from(version).unwrap();
        doc.encrypt(&state).unwrap();

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("failed to save encrypted test PDF");
        buf
    }

    fn form_of(bytes: &[u8]) -> Option<AcroForm> {
        let doc = LopdfBackend::open(bytes).unwrap();
        LopdfBackend::form(&doc, &ConvertOptions::default()).unwrap()
    }

    fn terminal_pairs(form: &AcroForm) -> Vec<(String, Option<String>)> {
        form.terminals()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    // --- open ---

    #[test]
    fn open_invalid_bytes_returns_error() {
        let result = LopdfBackend::open(b"not a pdf");
        assert!(matches!(result, Err(BackendError::Parse(_))));
    }

    #[test]
    fn open_empty_bytes_returns_error() {
        assert!(LopdfBackend::open(b"").is_err());
    }

    #[test]
    fn open_error_converts_to_unreadable_pdf() {
        let err: ConvertError = LopdfBackend::open(b"garbage").unwrap_err().into();
        assert!(matches!(err, ConvertError::UnreadablePdf(_)));
    }

    #[test]
    fn open_with_password_on_plain_pdf_ignores_password() {
        let bytes = pdf_with_fields(|doc| vec![text_field(doc, "a", Some("1"))]);
        let doc = LopdfBackend::open_with_password(&bytes, "secret").unwrap();
        assert!(!doc.is_released());
    }

    #[test]
    fn encrypted_pdf_requires_password() {
        let plain = pdf_with_fields(|doc| vec![text_field(doc, "FirstName", Some("Dominick"))]);
        let bytes = encrypt_pdf(&plain, "secret");
        let err: ConvertError = LopdfBackend::open(&bytes).unwrap_err().into();
        assert_eq!(err, ConvertError::PasswordRequired);
    }

    #[test]
    fn encrypted_pdf_opens_with_user_password() {
        let plain = pdf_with_fields(|doc| vec![text_field(doc, "FirstName", Some("Dominick"))]);
        let bytes = encrypt_pdf(&plain, "secret");
        let doc = LopdfBackend::open_with_password(&bytes, "secret").unwrap();
        let form = LopdfBackend::form(&doc, &ConvertOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            terminal_pairs(&form),
            vec![("FirstName".to_string(), Some("Dominick".to_string()))]
        );
    }

    #[test]
    fn encrypted_pdf_rejects_wrong_password() {
        let plain = pdf_with_fields(|doc| vec![text_field(doc, "FirstName", Some("Dominick"))]);
        let bytes = encrypt_pdf(&plain, "secret");
        let err: ConvertError = LopdfBackend::open_with_password(&bytes, "wrong")
            .unwrap_err()
            .into();
        assert_eq!(err, ConvertError::InvalidPassword);
    }

    // --- form extraction ---

    #[test]
    fn no_acroform_returns_none() {
        assert_eq!(form_of(&pdf_without_form()), None);
    }

    #[test]
    fn acroform_without_fields_is_empty() {
        let bytes = pdf_with_fields(|_| Vec::new());
        let form = form_of(&bytes).unwrap();
        assert!(form.fields.is_empty());
    }

    #[test]
    fn single_text_field() {
        let bytes = pdf_with_fields(|doc| vec![text_field(doc, "FirstName", Some("Dominick"))]);
        let form = form_of(&bytes).unwrap();
        assert_eq!(form.fields.len(), 1);
        let FieldNode::Terminal(field) = &form.fields[0] else {
            panic!("expected a terminal field");
        };
        assert_eq!(field.name, "FirstName");
        assert_eq!(field.field_type, Some(FieldType::Text));
        assert_eq!(field.value.as_deref(), Some("Dominick"));
    }

    #[test]
    fn field_without_value_has_none() {
        let bytes = pdf_with_fields(|doc| vec![text_field(doc, "email", None)]);
        let form = form_of(&bytes).unwrap();
        assert_eq!(terminal_pairs(&form), vec![("email".to_string(), None)]);
    }

    #[test]
    fn fields_keep_document_order() {
        let bytes = pdf_with_fields(|doc| {
            vec![
                text_field(doc, "zeta", Some("1")),
                text_field(doc, "alpha", Some("2")),
                text_field(doc, "mid", Some("3")),
            ]
        });
        let form = form_of(&bytes).unwrap();
        let names: Vec<_> = form.terminals().map(|f| f.name.clone()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn nested_group_builds_qualified_names() {
        let bytes = pdf_with_fields(|doc| {
            let parent_id = doc.new_object_id();
            let street_id = doc.add_object(dictionary! {
                "T" => Object::string_literal("Street"),
                "FT" => "Tx",
                "Parent" => parent_id,
                "V" => Object::string_literal("1 Main St"),
            });
            let city_id = doc.add_object(dictionary! {
                "T" => Object::string_literal("City"),
                "FT" => "Tx",
                "Parent" => parent_id,
                "V" => Object::string_literal("Springfield"),
            });
            doc.objects.insert(
                parent_id,
                Object::Dictionary(dictionary! {
                    "T" => Object::string_literal("Address"),
                    "Kids" => vec![Object::Reference(street_id), Object::Reference(city_id)],
                }),
            );
            vec![Object::Reference(parent_id)]
        });

        let form = form_of(&bytes).unwrap();
        assert!(matches!(&form.fields[0], FieldNode::NonTerminal { name, .. } if name == "Address"));
        assert_eq!(
            terminal_pairs(&form),
            vec![
                (
                    "Address.Street".to_string(),
                    Some("1 Main St".to_string())
                ),
                ("Address.City".to_string(), Some("Springfield".to_string())),
            ]
        );
    }

    #[test]
    fn widget_kids_keep_field_terminal() {
        let bytes = pdf_with_fields(|doc| {
            let field_id = doc.new_object_id();
            let widget_a = doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "Parent" => field_id,
                "Rect" => vec![0.into(), 0.into(), 10.into(), 10.into()],
            });
            let widget_b = doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "Parent" => field_id,
                "Rect" => vec![20.into(), 0.into(), 30.into(), 10.into()],
            });
            doc.objects.insert(
                field_id,
                Object::Dictionary(dictionary! {
                    "T" => Object::string_literal("Choice"),
                    "FT" => "Btn",
                    "V" => "Second",
                    "Kids" => vec![Object::Reference(widget_a), Object::Reference(widget_b)],
                }),
            );
            vec![Object::Reference(field_id)]
        });

        let form = form_of(&bytes).unwrap();
        assert_eq!(
            terminal_pairs(&form),
            vec![("Choice".to_string(), Some("Second".to_string()))]
        );
    }

    #[test]
    fn type_and_value_are_inherited() {
        let bytes = pdf_with_fields(|doc| {
            let parent_id = doc.new_object_id();
            let copy_a = doc.add_object(dictionary! {
                "T" => Object::string_literal("a"),
                "Parent" => parent_id,
            });
            let copy_b = doc.add_object(dictionary! {
                "T" => Object::string_literal("b"),
                "Parent" => parent_id,
                "V" => Object::string_literal("own"),
            });
            doc.objects.insert(
                parent_id,
                Object::Dictionary(dictionary! {
                    "T" => Object::string_literal("copy"),
                    "FT" => "Tx",
                    "V" => Object::string_literal("shared"),
                    "Kids" => vec![Object::Reference(copy_a), Object::Reference(copy_b)],
                }),
            );
            vec![Object::Reference(parent_id)]
        });

        let form = form_of(&bytes).unwrap();
        let fields: Vec<_> = form.terminals().collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "copy.a");
        assert_eq!(fields[0].field_type, Some(FieldType::Text));
        assert_eq!(fields[0].value.as_deref(), Some("shared"));
        assert_eq!(fields[1].value.as_deref(), Some("own"));
    }

    #[test]
    fn checkbox_name_value() {
        let bytes = pdf_with_fields(|doc| {
            vec![Object::Reference(doc.add_object(dictionary! {
                "T" => Object::string_literal("agree"),
                "FT" => "Btn",
                "V" => "Yes",
            }))]
        });
        let form = form_of(&bytes).unwrap();
        assert_eq!(
            terminal_pairs(&form),
            vec![("agree".to_string(), Some("Yes".to_string()))]
        );
    }

    #[test]
    fn multi_select_values_are_joined() {
        let bytes = pdf_with_fields(|doc| {
            vec![Object::Reference(doc.add_object(dictionary! {
                "T" => Object::string_literal("colors"),
                "FT" => "Ch",
                "V" => vec![Object::string_literal("Red"), Object::string_literal("Blue")],
            }))]
        });
        let form = form_of(&bytes).unwrap();
        assert_eq!(
            terminal_pairs(&form),
            vec![("colors".to_string(), Some("Red, Blue".to_string()))]
        );
    }

    #[test]
    fn utf16_value_is_decoded() {
        let bytes = pdf_with_fields(|doc| {
            let value = vec![0xFE, 0xFF, 0x00, 0x5A, 0x00, 0xFC, 0x00, 0x72, 0x00, 0x69];
            vec![Object::Reference(doc.add_object(dictionary! {
                "T" => Object::string_literal("city"),
                "FT" => "Tx",
                "V" => Object::String(value, StringFormat::Hexadecimal),
            }))]
        });
        let form = form_of(&bytes).unwrap();
        assert_eq!(
            terminal_pairs(&form),
            vec![("city".to_string(), Some("Züri".to_string()))]
        );
    }

    #[test]
    fn value_with_special_characters_survives_round_trip() {
        let raw = "Hello, \"World\"\nNext line";
        let bytes = pdf_with_fields(|doc| {
            vec![Object::Reference(doc.add_object(dictionary! {
                "T" => Object::string_literal("Comment"),
                "FT" => "Tx",
                "V" => Object::String(raw.as_bytes().to_vec(), StringFormat::Hexadecimal),
            }))]
        });
        let form = form_of(&bytes).unwrap();
        assert_eq!(
            terminal_pairs(&form),
            vec![("Comment".to_string(), Some(raw.to_string()))]
        );
    }

    #[test]
    fn untyped_leaf_is_skipped() {
        let bytes = pdf_with_fields(|doc| {
            vec![
                Object::Reference(doc.add_object(dictionary! {
                    "T" => Object::string_literal("mystery"),
                })),
                text_field(doc, "known", Some("v")),
            ]
        });
        let form = form_of(&bytes).unwrap();
        assert_eq!(form.fields.len(), 1);
        assert_eq!(form.fields[0].name(), "known");
    }

    #[test]
    fn untyped_node_with_empty_kids_is_empty_group() {
        let bytes = pdf_with_fields(|doc| {
            vec![Object::Reference(doc.add_object(dictionary! {
                "T" => Object::string_literal("Section"),
                "Kids" => Vec::<Object>::new(),
            }))]
        });
        let form = form_of(&bytes).unwrap();
        assert_eq!(
            form.fields,
            vec![FieldNode::NonTerminal {
                name: "Section".to_string(),
                children: vec![],
            }]
        );
        assert_eq!(form.terminals().count(), 0);
    }

    #[test]
    fn direct_field_dictionary_in_fields_array() {
        let bytes = pdf_with_fields(|_| {
            vec![Object::Dictionary(dictionary! {
                "T" => Object::string_literal("inline"),
                "FT" => "Tx",
                "V" => Object::string_literal("direct"),
            })]
        });
        let form = form_of(&bytes).unwrap();
        assert_eq!(
            terminal_pairs(&form),
            vec![("inline".to_string(), Some("direct".to_string()))]
        );
    }

    #[test]
    fn cyclic_kids_terminate() {
        let bytes = pdf_with_fields(|doc| {
            let loop_id = doc.new_object_id();
            let leaf = text_field(doc, "leaf", Some("x"));
            doc.objects.insert(
                loop_id,
                Object::Dictionary(dictionary! {
                    "T" => Object::string_literal("loop"),
                    "Kids" => vec![Object::Reference(loop_id), leaf],
                }),
            );
            vec![Object::Reference(loop_id)]
        });
        let form = form_of(&bytes).unwrap();
        assert_eq!(
            terminal_pairs(&form),
            vec![("loop.leaf".to_string(), Some("x".to_string()))]
        );
    }

    #[test]
    fn shared_kids_are_walked_once() {
        // Each level lists the next group twice; walking every reference
        // would yield 2^20 terminals.
        let bytes = pdf_with_fields(|doc| {
            let mut next = text_field(doc, "leaf", Some("x"));
            for level in 0..20 {
                let group = doc.add_object(dictionary! {
                    "T" => Object::string_literal(format!("g{level}")),
                    "Kids" => vec![next.clone(), next],
                });
                next = Object::Reference(group);
            }
            vec![next]
        });
        let doc = LopdfBackend::open(&bytes).unwrap();
        let options = ConvertOptions::default().with_max_field_depth(64);
        let form = LopdfBackend::form(&doc, &options).unwrap().unwrap();
        assert_eq!(form.terminals().count(), 1);
    }

    #[test]
    fn same_field_listed_twice_in_fields_is_kept_once() {
        let bytes = pdf_with_fields(|doc| {
            let field = text_field(doc, "once", Some("1"));
            vec![field.clone(), field]
        });
        let form = form_of(&bytes).unwrap();
        assert_eq!(
            terminal_pairs(&form),
            vec![("once".to_string(), Some("1".to_string()))]
        );
    }

    #[test]
    fn subtrees_below_max_depth_are_dropped() {
        let bytes = pdf_with_fields(|doc| {
            let deep = text_field(doc, "deep", Some("v"));
            let inner = doc.add_object(dictionary! {
                "T" => Object::string_literal("inner"),
                "Kids" => vec![deep],
            });
            let shallow = text_field(doc, "shallow", Some("s"));
            let outer = doc.add_object(dictionary! {
                "T" => Object::string_literal("outer"),
                "Kids" => vec![Object::Reference(inner), shallow],
            });
            vec![Object::Reference(outer)]
        });
        let doc = LopdfBackend::open(&bytes).unwrap();
        let options = ConvertOptions::default().with_max_field_depth(2);
        let form = LopdfBackend::form(&doc, &options).unwrap().unwrap();
        let names: Vec<_> = form.terminals().map(|f| f.name.clone()).collect();
        assert_eq!(names, vec!["outer.shallow"]);
    }

    // --- release ---

    #[test]
    fn release_is_idempotent() {
        let bytes = pdf_with_fields(|doc| vec![text_field(doc, "a", Some("1"))]);
        let mut doc = LopdfBackend::open(&bytes).unwrap();
        assert!(doc.inner().is_some());
        LopdfBackend::release(&mut doc);
        LopdfBackend::release(&mut doc);
        assert!(doc.is_released());
    }

    #[test]
    fn form_after_release_is_an_error() {
        let bytes = pdf_with_fields(|doc| vec![text_field(doc, "a", Some("1"))]);
        let mut doc = LopdfBackend::open(&bytes).unwrap();
        LopdfBackend::release(&mut doc);
        let result = LopdfBackend::form(&doc, &ConvertOptions::default());
        assert!(matches!(result, Err(BackendError::Released)));
    }

    #[test]
    fn debug_output_reports_release_state() {
        let bytes = pdf_with_fields(|doc| vec![text_field(doc, "a", Some("1"))]);
        let mut doc = LopdfBackend::open(&bytes).unwrap();
        assert!(format!("{doc:?}").contains("released: false"));
        LopdfBackend::release(&mut doc);
        assert!(format!("{doc:?}").contains("released: true"));
    }
}
