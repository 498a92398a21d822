use std::path::Path;

use tracing::debug;

use nodeforge_core::application::{ManifestError, TemplateFile, ports::TemplateSource};

use super::{DirectoryTemplates, EmbeddedTemplates};

/// On-disk templates with the embedded set as fallback, per directory.
#[derive(Debug, Clone)]
pub struct LayeredTemplates {
    local: Option<DirectoryTemplates>,
    embedded: EmbeddedTemplates,
}

impl LayeredTemplates {
    pub fn new(local: Option<DirectoryTemplates>, embedded: EmbeddedTemplates) -> Self {
        Self { local, embedded }
    }
}

impl TemplateSource for LayeredTemplates {
    fn load_dir(&self, dir: &Path) -> Result<Vec<TemplateFile>, ManifestError> {
        if let Some(local) = &self.local {
            let files = local.load_dir(dir)?;
            if !files.is_empty() {
                debug!(dir = %dir.display(), base = %local.base().display(), "using local templates");
                return Ok(files);
            }
        }
        self.embedded.load_dir(dir)
    }
}
