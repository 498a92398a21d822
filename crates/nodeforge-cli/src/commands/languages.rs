//! Implementation of the `nodeforge languages` command.

use serde::Serialize;

use nodeforge_core::domain::{Language, Protocol, find_backend};

use crate::{
    cli::{LanguagesArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct LanguageRow {
    language: Language,
    name: &'static str,
    backend: bool,
    protocols: Vec<Protocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_root: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    openapi_generator: Option<&'static str>,
}

fn rows(all: bool) -> Vec<LanguageRow> {
    Language::ALL
        .into_iter()
        .filter_map(|language| {
            let def = find_backend(language);
            if def.is_none() && !all {
                return None;
            }
            Some(LanguageRow {
                language,
                name: language.display_name(),
                backend: def.is_some(),
                protocols: def.map(|d| d.protocols.to_vec()).unwrap_or_default(),
                template_root: def.map(|d| d.template_root),
                openapi_generator: def.map(|d| d.openapi_generator),
            })
        })
        .collect()
}

fn protocol_list(protocols: &[Protocol], separator: &str) -> String {
    protocols
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn execute(args: LanguagesArgs, output: OutputManager) -> CliResult<()> {
    let rows = rows(args.all);

    match args.format {
        ListFormat::Table => {
            output.header("Supported languages:")?;
            for row in &rows {
                let line = if row.backend {
                    format!(
                        "  {:<12} {:<10} generator: {}",
                        row.language.as_str(),
                        protocol_list(&row.protocols, ", "),
                        row.openapi_generator.unwrap_or("-"),
                    )
                } else {
                    format!("  {:<12} (no backend)", row.language.as_str())
                };
                output.print(&line)?;
            }
        }
        // written even with --quiet
        ListFormat::Json => output.json(&rows)?,
        ListFormat::List => {
            for row in &rows {
                println!("{}", row.language);
            }
        }
        ListFormat::Csv => {
            println!("language,backend,protocols,template_root,openapi_generator");
            for row in &rows {
                println!(
                    "{},{},{},{},{}",
                    row.language,
                    row.backend,
                    protocol_list(&row.protocols, ";"),
                    row.template_root.unwrap_or(""),
                    row.openapi_generator.unwrap_or(""),
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rows_are_backends_only() {
        let rows = rows(false);
        let languages: Vec<_> = rows.iter().map(|r| r.language).collect();
        assert_eq!(languages, vec![Language::Java, Language::TypeScript]);
        assert!(rows.iter().all(|r| r.protocols == vec![Protocol::Rest]));
    }

    #[test]
    fn all_rows_include_languages_without_backend() {
        let rows = rows(true);
        assert_eq!(rows.len(), Language::ALL.len());
        let go = rows.iter().find(|r| r.language == Language::Go).unwrap();
        assert!(!go.backend);
        assert!(go.protocols.is_empty());
        assert_eq!(go.template_root, None);
    }
}
