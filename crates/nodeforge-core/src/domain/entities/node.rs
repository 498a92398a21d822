//! The `Node` configuration model.
//!
//! A `Node` is the declarative description of one service or component to
//! scaffold. It is produced upstream (project descriptor, UI graph) and is
//! read-only for the whole generation pipeline.
//!
//! Field names follow the camelCase spelling of project descriptors so a node
//! deserializes directly from YAML or JSON.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{Language, Protocol, ServerTemplate},
};

/// One service node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node name; also the name of the node's output directory.
    pub name: String,

    /// Declared implementation language, as written upstream.
    ///
    /// Kept as text: resolving it to a [`Language`] with a backend is the
    /// registry's job, so unknown languages are reported there.
    pub language: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_config: Option<RestConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grpc_config: Option<GrpcConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_config: Option<WsConfig>,
}

impl Node {
    /// A node with no protocol configured.
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            rest_config: None,
            grpc_config: None,
            ws_config: None,
        }
    }

    pub fn with_rest(mut self, rest: RestConfig) -> Self {
        self.rest_config = Some(rest);
        self
    }

    pub fn with_grpc(mut self) -> Self {
        self.grpc_config = Some(GrpcConfig::default());
        self
    }

    pub fn with_ws(mut self) -> Self {
        self.ws_config = Some(WsConfig::default());
        self
    }

    /// Resolve the declared language.
    pub fn parsed_language(&self) -> Result<Language, DomainError> {
        Language::from_str(&self.language)
    }

    /// The REST server config, if this node serves REST.
    pub fn rest_server(&self) -> Option<&RestServerConfig> {
        self.rest_config.as_ref().and_then(|rest| rest.server.as_ref())
    }

    /// Whether the node exposes a server (drives Kubernetes `Service` output).
    pub fn is_server(&self) -> bool {
        self.rest_server().is_some()
    }

    /// The exposed server port, if any.
    pub fn server_port(&self) -> Option<u16> {
        self.rest_server().map(|server| server.port)
    }

    /// Protocols with a config present, in dispatch order.
    pub fn configured_protocols(&self) -> Vec<Protocol> {
        let mut protocols = Vec::with_capacity(3);
        if self.rest_config.is_some() {
            protocols.push(Protocol::Rest);
        }
        if self.grpc_config.is_some() {
            protocols.push(Protocol::Grpc);
        }
        if self.ws_config.is_some() {
            protocols.push(Protocol::Ws);
        }
        protocols
    }
}

/// REST exposure of a node.
///
/// A config without `server` describes a REST client only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<RestServerConfig>,
}

impl RestConfig {
    pub fn server(server: RestServerConfig) -> Self {
        Self {
            server: Some(server),
        }
    }
}

/// A REST server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestServerConfig {
    #[serde(default)]
    pub template: ServerTemplate,

    pub port: u16,

    /// The OpenAPI document (YAML or JSON text).
    #[serde(default, alias = "openApiFileYamlContent")]
    pub open_api_spec_content: String,
}

impl RestServerConfig {
    pub fn open_api(port: u16, spec: impl Into<String>) -> Self {
        Self {
            template: ServerTemplate::OpenApi,
            port,
            open_api_spec_content: spec.into(),
        }
    }

    /// Whether the spec content is missing (empty or whitespace only).
    pub fn spec_is_empty(&self) -> bool {
        self.open_api_spec_content.trim().is_empty()
    }
}

/// gRPC exposure. Presence is all that matters to the current backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrpcConfig {}

/// WebSocket exposure. Presence is all that matters to the current backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsConfig {}
