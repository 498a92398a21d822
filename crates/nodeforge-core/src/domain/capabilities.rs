//! Backend capability registry.
//!
//! Each language backend is described exactly once by a [`BackendDef`]: which
//! protocols it implements, where its template set lives, and which external
//! `openapi-generator` generator matches it. Backends and the dispatcher read
//! this table; nothing else decides protocol support.
//!
//! # Adding a New Backend
//!
//! 1. Add a variant to `Language` in `value_objects.rs` (if it is new)
//! 2. Add one [`BackendDef`] entry to [`BACKEND_REGISTRY`]
//! 3. Implement `LanguageBackend` for it and register it in
//!    `BackendRegistry::with_builtin`

use crate::domain::value_objects::{Language, Protocol};

// ── Backend definitions ──────────────────────────────────────────────────────

/// Describes what one language backend can generate.
#[derive(Debug, Clone, Copy)]
pub struct BackendDef {
    /// The language this definition describes.
    pub language: Language,

    /// Protocols with an implementation in this backend.
    ///
    /// A node configuring any other protocol is rejected with
    /// `UnsupportedProtocol` before anything is written.
    pub protocols: &'static [Protocol],

    /// Template root, relative to the template source.
    ///
    /// Kubernetes templates are read from `<template_root>/kubernetes`.
    pub template_root: &'static str,

    /// `openapi-generator` generator name used by the external renderer.
    pub openapi_generator: &'static str,
}

/// Single source of truth for backend capabilities.
pub static BACKEND_REGISTRY: &[BackendDef] = &[
    BackendDef {
        language: Language::Java,
        protocols: &[Protocol::Rest],
        template_root: "java",
        openapi_generator: "spring",
    },
    BackendDef {
        language: Language::TypeScript,
        protocols: &[Protocol::Rest],
        template_root: "typescript",
        openapi_generator: "nodejs-express-server",
    },
];

// ── Registry lookup API ───────────────────────────────────────────────────────

/// Find the backend definition for a language.
///
/// `None` means the language is known but has no backend.
pub fn find_backend(language: Language) -> Option<&'static BackendDef> {
    BACKEND_REGISTRY.iter().find(|def| def.language == language)
}

/// Whether the language's backend implements `protocol`.
pub fn backend_supports(language: Language, protocol: Protocol) -> bool {
    find_backend(language)
        .map(|def| def.protocols.contains(&protocol))
        .unwrap_or(false)
}

/// Languages with a backend definition, in declaration order.
pub fn backend_languages() -> impl Iterator<Item = Language> {
    BACKEND_REGISTRY.iter().map(|def| def.language)
}
