use std::path::Path;

use nodeforge_core::application::{ManifestError, TemplateFile, ports::TemplateSource};

/// `(directory, file name, content)` for every template shipped in the binary.
static EMBEDDED: &[(&str, &str, &str)] = &[
    (
        "java/kubernetes",
        "deployment.yaml.tmpl",
        include_str!("../../templates/java/kubernetes/deployment.yaml.tmpl"),
    ),
    (
        "java/kubernetes",
        "service.yaml.tmpl",
        include_str!("../../templates/java/kubernetes/service.yaml.tmpl"),
    ),
    (
        "typescript/kubernetes",
        "deployment.yaml.tmpl",
        include_str!("../../templates/typescript/kubernetes/deployment.yaml.tmpl"),
    ),
    (
        "typescript/kubernetes",
        "service.yaml.tmpl",
        include_str!("../../templates/typescript/kubernetes/service.yaml.tmpl"),
    ),
];

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn load_dir(&self, dir: &Path) -> Result<Vec<TemplateFile>, ManifestError> {
        let mut files: Vec<_> = EMBEDDED
            .iter()
            .filter(|(root, _, _)| Path::new(root) == dir)
            .map(|(_, name, content)| TemplateFile {
                name: (*name).to_string(),
                content: (*content).to_string(),
            })
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeforge_core::domain::BACKEND_REGISTRY;

    #[test]
    fn every_backend_has_embedded_manifests() {
        for def in BACKEND_REGISTRY {
            let dir = Path::new(def.template_root).join("kubernetes");
            let files = EmbeddedTemplates.load_dir(&dir).unwrap();
            let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, vec!["deployment.yaml.tmpl", "service.yaml.tmpl"], "{}", def.language);
        }
    }

    #[test]
    fn unknown_root_is_empty() {
        assert!(EmbeddedTemplates.load_dir(Path::new("go/kubernetes")).unwrap().is_empty());
    }
}
