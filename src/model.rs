//! Format-agnostic data model for an extracted scripting API.

use serde::Serialize;
use std::collections::BTreeMap;

/// Return type recorded when the declaration cell carries none.
pub const VOID: &str = "void";

/// Module label used when a class belongs to no documented group.
pub const UNKNOWN_MODULE: &str = "Unknown";

/// One documented class, interface or struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassRecord {
    pub name: String,
    /// Parent class name as found on the page. Only meaningful when it names
    /// another class of the same corpus.
    pub extends: Option<String>,
    /// Documentation group (`ingroups` block); empty when absent.
    pub module: String,
    /// Encounter order.
    pub methods: Vec<MethodRecord>,
    pub properties: Vec<PropertyRecord>,
    pub description: String,
}

/// Member function parsed from a member-declaration row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodRecord {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<ParameterRecord>,
    pub is_static: bool,
    pub access: String,
    pub description: String,
}

impl Default for MethodRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            return_type: VOID.to_string(),
            parameters: Vec::new(),
            is_static: false,
            access: "public".to_string(),
            description: String::new(),
        }
    }
}

/// A single formal parameter. `name` is empty for type-only slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParameterRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// Peel order, no duplicates.
    pub modifiers: Vec<Modifier>,
}

/// Calling-convention annotation that precedes a parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Out,
    Inout,
    Notnull,
    Const,
}

impl Modifier {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "out" => Some(Self::Out),
            "inout" => Some(Self::Inout),
            "notnull" => Some(Self::Notnull),
            "const" => Some(Self::Const),
            _ => None,
        }
    }
}

/// Reserved for member variables; pages do not populate it yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(dead_code)]
pub struct PropertyRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Parent → children view over one or more corpora.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct InheritanceTree {
    pub roots: Vec<String>,
    /// Children in the order they were encountered.
    pub children: BTreeMap<String, Vec<String>>,
}

/// Counts over one or more corpora.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_classes: usize,
    pub class_names: Vec<String>,
    pub modules: BTreeMap<String, usize>,
    pub method_counts: BTreeMap<String, usize>,
}
