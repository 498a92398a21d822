//! Kubernetes manifest template sources.
//!
//! # Resolution order
//!
//! [`resolve_templates`] layers an on-disk directory over the compiled-in
//! set. The directory is taken from, in order:
//!
//! 1. the explicit path passed in (CLI `--templates` or `templates.local_path`)
//! 2. **`$NODEFORGE_TEMPLATES_DIR`**
//! 3. **`./templates`**, relative to the current working directory
//!
//! A root missing from the directory falls back to the embedded templates.

mod directory;
mod embedded;
mod layered;

use std::path::PathBuf;

use tracing::debug;

pub use directory::DirectoryTemplates;
pub use embedded::EmbeddedTemplates;
pub use layered::LayeredTemplates;

pub const TEMPLATES_DIR_ENV: &str = "NODEFORGE_TEMPLATES_DIR";

/// Build the template source described in the module docs.
pub fn resolve_templates(explicit: Option<PathBuf>) -> LayeredTemplates {
    let candidates = explicit.into_iter().chain(
        std::env::var_os(TEMPLATES_DIR_ENV)
            .map(PathBuf::from)
            .into_iter()
            .chain(std::iter::once(PathBuf::from("templates"))),
    );

    for candidate in candidates {
        debug!(path = %candidate.display(), "checking candidate templates path");
        if candidate.is_dir() {
            return LayeredTemplates::new(
                Some(DirectoryTemplates::new(candidate)),
                EmbeddedTemplates::new(),
            );
        }
    }

    debug!("no templates directory found, using embedded templates");
    LayeredTemplates::new(None, EmbeddedTemplates::new())
}
