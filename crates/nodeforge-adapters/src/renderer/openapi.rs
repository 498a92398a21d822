//! Minimal OpenAPI document model: just what the skeletons need.
//!
//! JSON is valid YAML, so `serde_yaml` reads both encodings.

use std::collections::BTreeMap;

use serde::Deserialize;

use nodeforge_core::{application::RenderError, domain::entities::render::to_pascal_case};

#[derive(Debug, Clone, Deserialize)]
pub struct OpenApiDocument {
    #[serde(default)]
    pub openapi: Option<String>,
    #[serde(default)]
    pub swagger: Option<String>,
    pub info: Info,
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    get: Option<OperationObject>,
    #[serde(default)]
    post: Option<OperationObject>,
    #[serde(default)]
    put: Option<OperationObject>,
    #[serde(default)]
    patch: Option<OperationObject>,
    #[serde(default)]
    delete: Option<OperationObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationObject {
    #[serde(default)]
    operation_id: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn lowercase(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

/// One HTTP operation, flattened out of the `paths` map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub method: HttpMethod,
    pub path: String,
    pub operation_id: String,
    pub summary: Option<String>,
}

impl OpenApiDocument {
    pub fn parse(content: &str) -> Result<Self, RenderError> {
        let doc: Self = serde_yaml::from_str(content).map_err(|e| RenderError::InvalidSpec {
            reason: e.to_string(),
        })?;

        if doc.openapi.is_none() && doc.swagger.is_none() {
            return Err(RenderError::InvalidSpec {
                reason: "missing `openapi` version field".into(),
            });
        }
        Ok(doc)
    }

    /// Operations sorted by path, then method in declaration order.
    pub fn operations(&self) -> Vec<Operation> {
        let mut operations = Vec::new();
        for (path, item) in &self.paths {
            let methods = [
                (HttpMethod::Get, &item.get),
                (HttpMethod::Post, &item.post),
                (HttpMethod::Put, &item.put),
                (HttpMethod::Patch, &item.patch),
                (HttpMethod::Delete, &item.delete),
            ];
            for (method, op) in methods {
                let Some(op) = op else { continue };
                let operation_id = op
                    .operation_id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| format!("{}{}", method.lowercase(), to_pascal_case(path)));
                operations.push(Operation {
                    method,
                    path: path.clone(),
                    operation_id,
                    summary: op.summary.clone(),
                });
            }
        }
        operations
    }
}
