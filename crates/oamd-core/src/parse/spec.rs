use indexmap::IndexMap;
use serde::Deserialize;

use super::components::Components;
use super::operation::PathItem;
use super::server::Server;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    pub description: Option<String>,

    #[serde(default)]
    pub version: String,

    pub license: Option<License>,
}

/// License information.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct License {
    pub name: String,
    pub url: Option<String>,
}

/// Tag definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub name: String,
    pub description: Option<String>,
}

/// Top-level OpenAPI 3.x specification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: Option<String>,

    pub info: Info,

    #[serde(default)]
    pub servers: Vec<Server>,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    pub components: Option<Components>,

    #[serde(default)]
    pub tags: Vec<Tag>,
}
