use crate::{
    application::services::backend::{LanguageBackend, Toolchain},
    domain::{BackendDef, Language},
    error::ForgeResult,
};

/// Java / Spring Boot backend. REST only.
pub struct JavaBackend {
    definition: &'static BackendDef,
    toolchain: Toolchain,
}

impl JavaBackend {
    pub fn new(toolchain: Toolchain) -> ForgeResult<Self> {
        Ok(Self {
            definition: super::definition_for(Language::Java)?,
            toolchain,
        })
    }
}

impl LanguageBackend for JavaBackend {
    fn definition(&self) -> &'static BackendDef {
        self.definition
    }

    fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }
}
