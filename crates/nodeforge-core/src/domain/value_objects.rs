//! Domain value objects: Language, Protocol, ServerTemplate.
//!
//! # Design
//!
//! These are pure value types: `Copy` and compared by value.
//! They hold NO capability logic. Which backend implements which protocol
//! lives in `capabilities.rs`. This file's only job is to define the types,
//! their string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a capability entry in `capabilities.rs` if a backend exists for it

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Language ─────────────────────────────────────────────────────────────────

/// A language a node can be implemented in.
///
/// Knowing a language is not the same as supporting it: only languages with a
/// registered backend can be generated. The registry reports the rest as
/// [`DomainError::UnsupportedLanguage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Java,
    Python,
    Rust,
    TypeScript,
    DotNet,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Self::Go,
        Self::Java,
        Self::Python,
        Self::Rust,
        Self::TypeScript,
        Self::DotNet,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Java => "java",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::TypeScript => "typescript",
            Self::DotNet => "dotnet",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::Java => "Java",
            Self::Python => "Python",
            Self::Rust => "Rust",
            Self::TypeScript => "TypeScript",
            Self::DotNet => ".NET",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(Self::Go),
            "java" => Ok(Self::Java),
            "python" | "py" => Ok(Self::Python),
            "rust" | "rs" => Ok(Self::Rust),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "dotnet" | ".net" | "csharp" | "c#" => Ok(Self::DotNet),
            _ => Err(DomainError::UnsupportedLanguage {
                language: s.to_string(),
            }),
        }
    }
}

// ── Protocol ──────────────────────────────────────────────────────────────────

/// A wire protocol a node can expose.
///
/// The declaration order is the evaluation order used by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Rest,
    Grpc,
    Ws,
}

impl Protocol {
    pub const ALL: [Protocol; 3] = [Self::Rest, Self::Grpc, Self::Ws];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Grpc => "grpc",
            Self::Ws => "ws",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rest" | "http" => Ok(Self::Rest),
            "grpc" => Ok(Self::Grpc),
            "ws" | "websocket" => Ok(Self::Ws),
            other => Err(DomainError::UnknownProtocol {
                protocol: other.to_string(),
            }),
        }
    }
}

// ── ServerTemplate ────────────────────────────────────────────────────────────

/// How a REST server's source is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerTemplate {
    /// Render from the node's OpenAPI document.
    #[default]
    OpenApi,
    /// The resource-driven template. No backend renders it yet.
    Compage,
}

impl ServerTemplate {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenApi => "openApi",
            Self::Compage => "compage",
        }
    }
}

impl fmt::Display for ServerTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_aliases() {
        assert_eq!(Language::from_str("java").unwrap(), Language::Java);
        assert_eq!(Language::from_str("TS").unwrap(), Language::TypeScript);
        assert_eq!(Language::from_str("golang").unwrap(), Language::Go);
    }

    #[test]
    fn unknown_language_keeps_original_spelling() {
        let err = Language::from_str("COBOL").unwrap_err();
        assert_eq!(
            err,
            DomainError::UnsupportedLanguage {
                language: "COBOL".into()
            }
        );
    }

    #[test]
    fn protocol_order_is_rest_grpc_ws() {
        let mut sorted = vec![Protocol::Ws, Protocol::Rest, Protocol::Grpc];
        sorted.sort();
        assert_eq!(sorted, Protocol::ALL.to_vec());
    }

    #[test]
    fn server_template_serde_names() {
        let t: ServerTemplate = serde_json::from_str("\"openApi\"").unwrap();
        assert_eq!(t, ServerTemplate::OpenApi);
        let t: ServerTemplate = serde_json::from_str("\"compage\"").unwrap();
        assert_eq!(t, ServerTemplate::Compage);
    }
}
