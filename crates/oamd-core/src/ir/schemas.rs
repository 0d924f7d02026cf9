use serde::Serialize;

/// A component schema as listed in the reference document.
#[derive(Debug, Clone, Serialize)]
pub struct IrSchema {
    pub name: String,
    pub description: Option<String>,
    pub type_name: String,
    pub properties: Vec<IrProperty>,
    pub enum_values: Vec<String>,
}

/// A named object property.
#[derive(Debug, Clone, Serialize)]
pub struct IrProperty {
    pub name: String,
    pub type_name: String,
    pub required: bool,
    pub description: Option<String>,
}
