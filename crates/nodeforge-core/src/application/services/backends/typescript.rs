use crate::{
    application::services::backend::{LanguageBackend, Toolchain},
    domain::{BackendDef, Language},
    error::ForgeResult,
};

/// TypeScript / Express backend. REST only.
pub struct TypeScriptBackend {
    definition: &'static BackendDef,
    toolchain: Toolchain,
}

impl TypeScriptBackend {
    pub fn new(toolchain: Toolchain) -> ForgeResult<Self> {
        Ok(Self {
            definition: super::definition_for(Language::TypeScript)?,
            toolchain,
        })
    }
}

impl LanguageBackend for TypeScriptBackend {
    fn definition(&self) -> &'static BackendDef {
        self.definition
    }

    fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }
}
