use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::services::{
        backend::{LanguageBackend, Toolchain},
        backends::{JavaBackend, TypeScriptBackend},
    },
    domain::{DomainError, GenerationContext, Language, Node, NodeReport},
    error::ForgeResult,
};

/// Language → backend lookup.
///
/// Selection is purely by the node's declared language. A language without a
/// registered backend is `UnsupportedLanguage`.
#[derive(Default, Clone)]
pub struct BackendRegistry {
    backends: HashMap<Language, Arc<dyn LanguageBackend>>,
}

impl BackendRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the Java and TypeScript backends sharing one toolchain.
    pub fn with_builtin(toolchain: Toolchain) -> ForgeResult<Self> {
        let mut registry = Self::new();
        registry.register(Arc::new(JavaBackend::new(toolchain.clone())?));
        registry.register(Arc::new(TypeScriptBackend::new(toolchain)?));
        Ok(registry)
    }

    /// Register a backend, replacing any backend for the same language.
    pub fn register(&mut self, backend: Arc<dyn LanguageBackend>) {
        debug!(language = %backend.language(), "Registering backend");
        self.backends.insert(backend.language(), backend);
    }

    /// Registered languages, sorted.
    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<_> = self.backends.keys().copied().collect();
        languages.sort();
        languages
    }

    pub fn get(&self, language: Language) -> Option<&Arc<dyn LanguageBackend>> {
        self.backends.get(&language)
    }

    /// Resolve a declared language string to its backend.
    pub fn resolve(&self, language: &str) -> Result<&Arc<dyn LanguageBackend>, DomainError> {
        let unsupported = || DomainError::UnsupportedLanguage {
            language: language.to_string(),
        };
        let parsed = Language::from_str(language).map_err(|_| unsupported())?;
        self.get(parsed).ok_or_else(unsupported)
    }

    /// Generate one node with the backend for its language.
    #[instrument(skip_all, fields(node = %context.node_name()))]
    pub fn generate_node(&self, context: &GenerationContext) -> ForgeResult<NodeReport> {
        let backend = self.resolve(&context.node().language)?;
        backend.generate(context)
    }

    /// Run only the validation phase for a node.
    pub fn validate_node(&self, node: &Node) -> Result<(), DomainError> {
        self.resolve(&node.language)?.validate(node)
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}
