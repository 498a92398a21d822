//! Built-in language backends.

mod java;
mod typescript;

pub use java::JavaBackend;
pub use typescript::TypeScriptBackend;

use crate::{
    domain::{BackendDef, Language, find_backend},
    error::{ForgeError, ForgeResult},
};

fn definition_for(language: Language) -> ForgeResult<&'static BackendDef> {
    find_backend(language).ok_or_else(|| ForgeError::Internal {
        message: format!("no capability definition for {language}"),
    })
}
