//! Element classification from declarative marker attributes.
//!
//! The page renderer stamps every traceable element with `x-*` marker
//! attributes describing where its content comes from. Classification
//! answers three questions about a node:
//!
//! - is it **dynamic** (expression-driven, or one of several instances
//!   rendered from the same template position)?
//! - is it **editable**, and through which mechanism?
//! - is its underlying data **shared** with differently-keyed elements,
//!   so that editing it would fan out beyond the selection?
//!
//! # Edit Types
//!
//! | Edit type | Meaning |
//! |-----------|---------|
//! | `textContent` | Static element, direct text replacement |
//! | `variableEdit` | Dynamic, backed by an explicitly editable source |
//! | `readonly` | Dynamic, source not editable (or not recognized) |
//! | `sharedSource` | Editable source shared across identity keys |

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::dom::Document;
use crate::identifiers::NodeId;

// ============================================================================
// Marker Attributes
// ============================================================================

/// Identity key grouping instances rendered from one template position.
pub const ATTR_IDENTITY: &str = "x-id";
/// Flag set when the element's text depends on a non-literal expression.
pub const ATTR_DYNAMIC: &str = "x-dynamic";
/// Source category of the element's text.
pub const ATTR_SOURCE_TYPE: &str = "x-source-type";
/// Variable backing the element's text.
pub const ATTR_SOURCE_VAR: &str = "x-source-var";
/// Source file (short name).
pub const ATTR_SOURCE_FILE: &str = "x-source-file";
/// Source file (absolute path).
pub const ATTR_SOURCE_FILE_ABS: &str = "x-source-file-abs";
/// Source line.
pub const ATTR_SOURCE_LINE: &str = "x-source-line";
/// Property path into the source variable.
pub const ATTR_SOURCE_PATH: &str = "x-source-path";
/// Explicit editability flag on the source.
pub const ATTR_SOURCE_EDITABLE: &str = "x-source-editable";
/// Array variable when the element is rendered inside an iteration.
pub const ATTR_ARRAY_VAR: &str = "x-array-var";
/// File declaring the iterated array.
pub const ATTR_ARRAY_FILE: &str = "x-array-file";
/// Line declaring the iterated array.
pub const ATTR_ARRAY_LINE: &str = "x-array-line";
/// Iteration item parameter name.
pub const ATTR_ARRAY_ITEM_PARAM: &str = "x-array-item-param";
/// Provenance: file name (selection requires it).
pub const ATTR_FILE_NAME: &str = "x-file-name";
/// Provenance: line number (selection requires it).
pub const ATTR_LINE_NUMBER: &str = "x-line-number";
/// Provenance: component name (selection requires it).
pub const ATTR_COMPONENT: &str = "x-component";
/// Flag marking elements whose text is safe to replace wholesale.
pub const ATTR_DIRECT_TEXT: &str = "x-direct-text";
/// Prefix shared by every marker attribute; these are never modified.
pub const PROVENANCE_PREFIX: &str = "x-";

// ============================================================================
// EditType
// ============================================================================

/// How an element may be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditType {
    /// Direct text replacement on a static element.
    #[serde(rename = "textContent")]
    TextContent,
    /// Edit routed through the backing variable.
    #[serde(rename = "variableEdit")]
    VariableEdit,
    /// Not editable.
    #[serde(rename = "readonly")]
    Readonly,
    /// Editable source shared across identity keys; forced read-only.
    #[serde(rename = "sharedSource")]
    SharedSource,
}

// ============================================================================
// SourceType
// ============================================================================

/// Recognized source categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceType {
    /// Literal declared in the rendering file.
    StaticLocal,
    /// Literal imported from another module.
    StaticImported,
    /// Component prop.
    Prop,
    /// Component state.
    State,
    /// Derived/computed value.
    Computed,
    /// External data (network, context).
    External,
    /// Anything else; fails closed to read-only.
    Unrecognized(String),
}

impl SourceType {
    /// Parses the raw attribute value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "static-local" => Self::StaticLocal,
            "static-imported" => Self::StaticImported,
            "prop" => Self::Prop,
            "state" => Self::State,
            "computed" => Self::Computed,
            "external" => Self::External,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Returns `true` for the static categories that defer to the
    /// explicit editable flag.
    #[inline]
    #[must_use]
    pub fn is_static(&self) -> bool {
        matches!(self, Self::StaticLocal | Self::StaticImported)
    }
}

// ============================================================================
// SourceDescriptor
// ============================================================================

/// Typed view of an element's source-tracking attributes, parsed once per
/// classification call. Absent attributes are explicit `None`s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDescriptor {
    /// Raw source type value.
    pub source_type: Option<String>,
    /// Backing variable name.
    pub var_name: Option<String>,
    /// Source file (short).
    pub file: Option<String>,
    /// Source file (absolute).
    pub file_abs: Option<String>,
    /// Source line.
    pub line: Option<String>,
    /// Property path.
    pub path: Option<String>,
    /// Explicit `x-source-editable="true"`.
    pub editable: bool,
    /// Iterated array variable.
    pub array_var: Option<String>,
    /// File declaring the array.
    pub array_file: Option<String>,
    /// Line declaring the array.
    pub array_line: Option<String>,
    /// Iteration item parameter.
    pub item_param: Option<String>,
}

impl SourceDescriptor {
    /// Reads the descriptor off an element's attributes.
    #[must_use]
    pub fn parse(doc: &Document, id: NodeId) -> Self {
        let attr = |name: &str| doc.attribute(id, name).map(ToString::to_string);
        Self {
            source_type: attr(ATTR_SOURCE_TYPE),
            var_name: attr(ATTR_SOURCE_VAR),
            file: attr(ATTR_SOURCE_FILE),
            file_abs: attr(ATTR_SOURCE_FILE_ABS),
            line: attr(ATTR_SOURCE_LINE),
            path: attr(ATTR_SOURCE_PATH),
            editable: doc.attribute(id, ATTR_SOURCE_EDITABLE) == Some("true"),
            array_var: attr(ATTR_ARRAY_VAR),
            array_file: attr(ATTR_ARRAY_FILE),
            array_line: attr(ATTR_ARRAY_LINE),
            item_param: attr(ATTR_ARRAY_ITEM_PARAM),
        }
    }

    /// Returns the parsed source type, if declared.
    #[must_use]
    pub fn typed(&self) -> Option<SourceType> {
        self.source_type.as_deref().map(SourceType::parse)
    }
}

// ============================================================================
// SourceInfo (wire form)
// ============================================================================

/// Source description carried on selection and error events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    /// Raw source type.
    #[serde(rename = "type")]
    pub source_type: Option<String>,
    /// Backing variable name.
    pub var_name: Option<String>,
    /// Source file (short).
    pub file: Option<String>,
    /// Source file (absolute).
    pub file_abs: Option<String>,
    /// Source line.
    pub line: Option<String>,
    /// Property path.
    pub path: Option<String>,
    /// Explicit editability flag.
    pub editable: bool,
    /// Iterated array variable.
    pub array_var: Option<String>,
    /// File declaring the array.
    pub array_file: Option<String>,
    /// Line declaring the array.
    pub array_line: Option<String>,
    /// Iteration item parameter.
    pub item_param: Option<String>,
    /// Set when the source is shared across identity keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_shared_source: Option<bool>,
    /// Number of other elements sharing the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_count: Option<usize>,
}

impl From<&SourceDescriptor> for SourceInfo {
    fn from(descriptor: &SourceDescriptor) -> Self {
        Self {
            source_type: descriptor.source_type.clone(),
            var_name: descriptor.var_name.clone(),
            file: descriptor.file.clone(),
            file_abs: descriptor.file_abs.clone(),
            line: descriptor.line.clone(),
            path: descriptor.path.clone(),
            editable: descriptor.editable,
            array_var: descriptor.array_var.clone(),
            array_file: descriptor.array_file.clone(),
            array_line: descriptor.array_line.clone(),
            item_param: descriptor.item_param.clone(),
            is_shared_source: None,
            shared_count: None,
        }
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Derived classification of a node. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Expression-driven or multi-instance.
    pub is_dynamic: bool,
    /// Whether an edit mechanism exists.
    pub is_editable: bool,
    /// The edit mechanism.
    pub edit_type: EditType,
    /// Source description for dynamic elements.
    pub source_info: Option<SourceInfo>,
}

/// Classifies an element.
///
/// Static elements are editable by direct text replacement. Dynamic
/// elements derive editability from their source descriptor, and an
/// otherwise editable element whose source is shared with differently-keyed
/// elements is forced read-only (`sharedSource`).
#[must_use]
pub fn classify(doc: &Document, id: NodeId) -> Classification {
    let dynamic_flag = doc.attribute(id, ATTR_DYNAMIC) == Some("true");
    let instance_count = doc
        .attribute(id, ATTR_IDENTITY)
        .map(|key| doc.query_attr_eq(ATTR_IDENTITY, key).len())
        .unwrap_or(1);

    let is_dynamic = dynamic_flag || instance_count > 1;
    if !is_dynamic {
        return Classification {
            is_dynamic: false,
            is_editable: true,
            edit_type: EditType::TextContent,
            source_info: None,
        };
    }

    let descriptor = SourceDescriptor::parse(doc, id);
    let mut source_info = SourceInfo::from(&descriptor);

    // Explicit editable flag wins; static categories defer to that flag
    // (absent here, so read-only); prop/state/computed/external and any
    // unrecognized type fail closed.
    let (mut is_editable, mut edit_type) = if descriptor.editable {
        (true, EditType::VariableEdit)
    } else {
        (false, EditType::Readonly)
    };

    if is_editable {
        let shared = shared_source(doc, id, &descriptor);
        if !shared.is_empty() {
            is_editable = false;
            edit_type = EditType::SharedSource;
            source_info.is_shared_source = Some(true);
            source_info.shared_count = Some(shared.len());
        }
    }

    Classification {
        is_dynamic: true,
        is_editable,
        edit_type,
        source_info: Some(source_info),
    }
}

// ============================================================================
// Shared-Source Detection
// ============================================================================

/// Finds differently-keyed elements bound to the same underlying data.
///
/// Two strategies:
///
/// 1. **Direct source** — identical `(var, absolute file[, path])`, catching
///    the same variable rendered in two template positions.
/// 2. **Array iteration** — identical `(array var, array file, path)`,
///    catching two independent iterations over the same collection.
#[must_use]
pub fn shared_source(doc: &Document, id: NodeId, descriptor: &SourceDescriptor) -> Vec<NodeId> {
    let Some(var_name) = descriptor.var_name.as_deref() else {
        return Vec::new();
    };
    let own_key = doc.attribute(id, ATTR_IDENTITY);

    let mut shared: Vec<NodeId> = Vec::new();
    let consider = |doc: &Document, candidate: NodeId, shared: &mut Vec<NodeId>| {
        let other_key = doc.attribute(candidate, ATTR_IDENTITY);
        if candidate != id && other_key != own_key && !shared.contains(&candidate) {
            shared.push(candidate);
        }
    };

    if let Some(file_abs) = descriptor.file_abs.as_deref() {
        for candidate in doc.query_attr_eq(ATTR_SOURCE_VAR, var_name) {
            if doc.attribute(candidate, ATTR_SOURCE_FILE_ABS) != Some(file_abs) {
                continue;
            }
            if let Some(path) = descriptor.path.as_deref() {
                if doc.attribute(candidate, ATTR_SOURCE_PATH) != Some(path) {
                    continue;
                }
            }
            consider(doc, candidate, &mut shared);
        }
    }

    if let (Some(array_var), Some(array_file), Some(path)) = (
        descriptor.array_var.as_deref(),
        descriptor.array_file.as_deref(),
        descriptor.path.as_deref(),
    ) {
        for candidate in doc.query_attr_eq(ATTR_ARRAY_VAR, array_var) {
            if doc.attribute(candidate, ATTR_ARRAY_FILE) != Some(array_file)
                || doc.attribute(candidate, ATTR_SOURCE_PATH) != Some(path)
            {
                continue;
            }
            consider(doc, candidate, &mut shared);
        }
    }

    shared
}

// ============================================================================
// Cheap Checks
// ============================================================================

/// Cheap dynamic check used by hover/click paths before full
/// classification: the marker flag, or more than one instance of the
/// element's identity key.
#[must_use]
pub fn is_dynamic(doc: &Document, id: NodeId) -> bool {
    if doc.attribute(id, ATTR_DYNAMIC) == Some("true") {
        return true;
    }
    doc.attribute(id, ATTR_IDENTITY)
        .is_some_and(|key| doc.query_attr_eq(ATTR_IDENTITY, key).len() > 1)
}

/// Returns the 0-based document-order position of a grouped element among
/// its same-key siblings, or `None` when the element is ungrouped.
#[must_use]
pub fn array_index(doc: &Document, id: NodeId) -> Option<usize> {
    let key = doc.attribute(id, ATTR_IDENTITY)?;
    let instances = doc.query_attr_eq(ATTR_IDENTITY, key);
    if instances.len() <= 1 {
        return None;
    }
    instances.iter().position(|&node| node == id)
}

/// Returns the element's identity key, falling back to the closest keyed
/// ancestor.
#[must_use]
pub fn identity_key_of(doc: &Document, id: NodeId) -> Option<String> {
    if let Some(key) = doc.attribute(id, ATTR_IDENTITY) {
        return Some(key.to_string());
    }
    doc.closest(id, |d, n| d.has_attribute(n, ATTR_IDENTITY))
        .and_then(|node| doc.attribute(node, ATTR_IDENTITY))
        .map(ToString::to_string)
}

/// Returns every element sharing the identity key, in document order.
#[must_use]
pub fn group_of(doc: &Document, key: &str) -> Vec<NodeId> {
    doc.query_attr_eq(ATTR_IDENTITY, key)
}

// ============================================================================
// Tests
// ============================================================================
