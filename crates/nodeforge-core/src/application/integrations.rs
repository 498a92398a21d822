//! Cross-cutting integrations every backend composes after its source step.
//!
//! A backend's `integrations()` factory returns an [`Integrations`] record.
//! Today it holds one capability, the Kubernetes manifest copier.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        error::ManifestError,
        ports::{Filesystem, TemplateSource},
        services::writer::write_structure,
    },
    domain::{ManifestSpec, ProjectStructure},
};

const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Integration capabilities produced for one node.
pub struct Integrations<'a> {
    pub kubernetes: KubernetesCopier<'a>,
}

/// Renders the backend's Kubernetes templates into `<node>/kubernetes/`.
pub struct KubernetesCopier<'a> {
    spec: ManifestSpec,
    templates: &'a dyn TemplateSource,
    filesystem: &'a dyn Filesystem,
}

impl<'a> KubernetesCopier<'a> {
    pub fn new(
        spec: ManifestSpec,
        templates: &'a dyn TemplateSource,
        filesystem: &'a dyn Filesystem,
    ) -> Self {
        Self {
            spec,
            templates,
            filesystem,
        }
    }

    pub fn spec(&self) -> &ManifestSpec {
        &self.spec
    }

    /// Render and write the manifests, returning the paths written.
    ///
    /// Templates rendering to blank output are not written.
    #[instrument(skip_all, fields(node = %self.spec.node_name, server = self.spec.is_server))]
    pub fn create_kubernetes_files(&self) -> Result<Vec<PathBuf>, ManifestError> {
        let template_dir = self.spec.kubernetes_template_dir();

        let mut templates: Vec<_> = self
            .templates
            .load_dir(&template_dir)?
            .into_iter()
            .filter(|t| t.name.ends_with(TEMPLATE_SUFFIX))
            .collect();

        if templates.is_empty() {
            return Err(ManifestError::NoTemplates { root: template_dir });
        }
        templates.sort_by(|a, b| a.name.cmp(&b.name));

        let context = self.spec.render_context();
        let mut structure = ProjectStructure::new(self.spec.kubernetes_output_dir());

        for template in &templates {
            let rendered = context.render(&template.content);
            let file_name = template.name.trim_end_matches(TEMPLATE_SUFFIX);

            if rendered.trim().is_empty() {
                debug!(template = %template.name, "Template rendered blank, skipping");
                continue;
            }
            structure.add_file(file_name, rendered);
        }

        let written = write_structure(self.filesystem, &structure)?;
        info!(count = written.len(), "Kubernetes manifests written");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::{MockFilesystem, MockTemplateSource, TemplateFile},
        domain::Language,
    };
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    fn spec(is_server: bool) -> ManifestSpec {
        ManifestSpec {
            owner_name: "acme".into(),
            repository_name: "shop".into(),
            node_name: "api".into(),
            node_directory: PathBuf::from("/out/api"),
            template_root: PathBuf::from("java"),
            is_server,
            port: is_server.then_some(8080),
            language: Language::Java,
        }
    }

    fn source_with(files: Vec<TemplateFile>) -> MockTemplateSource {
        let mut source = MockTemplateSource::new();
        source
            .expect_load_dir()
            .withf(|dir| dir == Path::new("java/kubernetes"))
            .returning(move |_| Ok(files.clone()));
        source
    }

    fn recording_fs() -> (MockFilesystem, Arc<Mutex<Vec<(PathBuf, String)>>>) {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&writes);
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(move |path, content| {
            sink.lock()
                .unwrap()
                .push((path.to_path_buf(), content.to_string()));
            Ok(())
        });
        (fs, writes)
    }

    fn templates() -> Vec<TemplateFile> {
        vec![
            TemplateFile {
                name: "service.yaml.tmpl".into(),
                content: "{{#IS_SERVER}}\nport: {{SERVER_PORT}}\n{{/IS_SERVER}}\n".into(),
            },
            TemplateFile {
                name: "deployment.yaml.tmpl".into(),
                content: "name: {{NODE_NAME}}\n".into(),
            },
            TemplateFile {
                name: "README.md".into(),
                content: "ignored".into(),
            },
        ]
    }

    #[test]
    fn server_gets_deployment_and_service() {
        let source = source_with(templates());
        let (fs, writes) = recording_fs();

        let copier = KubernetesCopier::new(spec(true), &source, &fs);
        let written = copier.create_kubernetes_files().unwrap();

        assert_eq!(
            written,
            vec![
                PathBuf::from("/out/api/kubernetes/deployment.yaml"),
                PathBuf::from("/out/api/kubernetes/service.yaml"),
            ]
        );
        let writes = writes.lock().unwrap();
        assert_eq!(writes[1].1, "port: 8080\n");
    }

    #[test]
    fn worker_skips_blank_service() {
        let source = source_with(templates());
        let (fs, _) = recording_fs();

        let copier = KubernetesCopier::new(spec(false), &source, &fs);
        let written = copier.create_kubernetes_files().unwrap();

        assert_eq!(
            written,
            vec![PathBuf::from("/out/api/kubernetes/deployment.yaml")]
        );
    }

    #[test]
    fn missing_templates_is_an_error() {
        let source = source_with(Vec::new());
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();

        let copier = KubernetesCopier::new(spec(true), &source, &fs);
        assert_eq!(
            copier.create_kubernetes_files(),
            Err(ManifestError::NoTemplates {
                root: PathBuf::from("java/kubernetes")
            })
        );
    }
}
