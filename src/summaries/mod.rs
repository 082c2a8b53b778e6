//! Batch generation of GitHub summary draft pages.
//!
//! Feeds a list of repositories through a cookiecutter-style project
//! template, one engine invocation per repository, writing the rendered
//! drafts into a shared directory. The list comes from a JSON file of
//! `{"owner": ..., "repo": ...}` records, or from the configured slugs when
//! no file is given. There is no per-record error isolation: the first
//! failure aborts the run, matching the original tool.

mod engine;

pub use engine::{Cookiecutter, RenderContext, TemplateEngine};

use crate::cli::SummariesArgs;
use crate::config::SummariesConfig;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One repository to generate a summary draft for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoRecord {
    #[serde(default)]
    pub owner: Option<String>,
    pub repo: String,
}

impl RepoRecord {
    fn context(&self, github_username: &str) -> RenderContext {
        RenderContext {
            repo_slug: self.repo.clone(),
            github_username: github_username.to_string(),
            owner: self.owner.clone(),
        }
    }
}

/// Run the summaries subcommand with the production engine.
pub fn run(args: &SummariesArgs, config: &SummariesConfig) -> Result<()> {
    let records = load_records(args.repos.as_deref(), config)?;
    let output_dir: PathBuf = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());

    generate_all(&records, config, &output_dir, &Cookiecutter::default())
}

/// Resolve the repository list; a JSON file wins over the configured slugs.
fn load_records(repos_file: Option<&Path>, config: &SummariesConfig) -> Result<Vec<RepoRecord>> {
    match repos_file {
        Some(path) => {
            let contents = std::fs::read_to_string(path).with_context(|| {
                format!("Failed to read repository list {}", path.display())
            })?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse repository list {}", path.display()))
        }
        None => Ok(config
            .repos
            .iter()
            .map(|slug| RepoRecord {
                owner: None,
                repo: slug.clone(),
            })
            .collect()),
    }
}

/// Invoke the engine once per record, each context carrying the constant
/// username. Drafts generated before a failure are left in place.
fn generate_all(
    records: &[RepoRecord],
    config: &SummariesConfig,
    output_dir: &Path,
    engine: &dyn TemplateEngine,
) -> Result<()> {
    let progress = ProgressBar::new(records.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("can parse progress style")
            .progress_chars("#>-"),
    );

    for record in records {
        progress.set_message(record.repo.clone());
        let context = record.context(&config.github_username);
        engine.generate(&config.template, &context, output_dir)?;
        log::debug!("Generated draft for {}", record.repo);
        progress.inc(1);
    }

    progress.finish_with_message(format!("Generated {} drafts", records.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every invocation instead of running cookiecutter.
    #[derive(Default)]
    struct RecordingEngine {
        calls: RefCell<Vec<(PathBuf, RenderContext, PathBuf)>>,
    }

    impl TemplateEngine for RecordingEngine {
        fn generate(
            &self,
            template: &Path,
            context: &RenderContext,
            output_dir: &Path,
        ) -> Result<()> {
            self.calls.borrow_mut().push((
                template.to_path_buf(),
                context.clone(),
                output_dir.to_path_buf(),
            ));
            Ok(())
        }
    }

    /// Fails on the second invocation.
    #[derive(Default)]
    struct FailingEngine {
        calls: RefCell<usize>,
    }

    impl TemplateEngine for FailingEngine {
        fn generate(
            &self,
            _template: &Path,
            _context: &RenderContext,
            _output_dir: &Path,
        ) -> Result<()> {
            let mut calls = self.calls.borrow_mut();
            *calls += 1;
            if *calls >= 2 {
                anyhow::bail!("template expansion failed");
            }
            Ok(())
        }
    }

    fn config() -> SummariesConfig {
        SummariesConfig {
            github_username: "nntin".to_string(),
            template: PathBuf::from("cookiecutter/cookiecutter-github-summary"),
            output_dir: PathBuf::from("../_drafts"),
            repos: vec!["me".to_string(), "discord-logo".to_string()],
        }
    }

    #[test]
    fn invokes_engine_once_per_record_with_fixed_username() {
        let records = vec![
            RepoRecord {
                owner: Some("NNTin".to_string()),
                repo: "me".to_string(),
            },
            RepoRecord {
                owner: None,
                repo: "discord-logo".to_string(),
            },
            RepoRecord {
                owner: None,
                repo: "crosku".to_string(),
            },
        ];
        let engine = RecordingEngine::default();
        let config = config();

        generate_all(&records, &config, Path::new("drafts"), &engine)
            .expect("generation succeeds");

        let calls = engine.calls.borrow();
        assert_eq!(calls.len(), 3);
        for ((template, context, output_dir), record) in calls.iter().zip(&records) {
            assert_eq!(template, &config.template);
            assert_eq!(output_dir, Path::new("drafts"));
            assert_eq!(context.repo_slug, record.repo);
            assert_eq!(context.github_username, "nntin");
        }
    }

    #[test]
    fn first_failure_aborts_the_run() {
        let records = vec![
            RepoRecord {
                owner: None,
                repo: "a".to_string(),
            },
            RepoRecord {
                owner: None,
                repo: "b".to_string(),
            },
            RepoRecord {
                owner: None,
                repo: "c".to_string(),
            },
        ];
        let engine = FailingEngine::default();

        let result = generate_all(&records, &config(), Path::new("drafts"), &engine);

        assert!(result.is_err());
        // the run stopped at the failing record, not after it
        assert_eq!(*engine.calls.borrow(), 2);
    }

    #[test]
    fn can_load_records_from_json_file() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("repos.json");
        std::fs::write(
            &path,
            r#"[{"owner": "NNTin", "repo": "me"}, {"repo": "discord-logo"}]"#,
        )
        .expect("can write repos.json");

        let records = load_records(Some(&path), &config()).expect("records load");
        assert_eq!(
            records,
            vec![
                RepoRecord {
                    owner: Some("NNTin".to_string()),
                    repo: "me".to_string(),
                },
                RepoRecord {
                    owner: None,
                    repo: "discord-logo".to_string(),
                },
            ]
        );
    }

    #[test]
    fn configured_slugs_are_used_without_a_json_file() {
        let records = load_records(None, &config()).expect("records load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].repo, "me");
        assert!(records[0].owner.is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("repos.json");
        std::fs::write(&path, r#"{"repo": "not-a-list"}"#).expect("can write repos.json");

        assert!(load_records(Some(&path), &config()).is_err());
    }
}
