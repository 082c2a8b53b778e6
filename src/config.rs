//! Optional `site-tools.toml` configuration.
//!
//! Both tools run fine without a config file; the file exists so the
//! deployment-specific decisions (which URL prefix the live site serves
//! pages under, which GitHub account the summaries belong to, which
//! repositories get a draft) live in one explicit place instead of being
//! guessed at runtime.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "site-tools.toml";

/// Complete configuration for both tools.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Configuration {
    pub export: ExportConfig,
    pub summaries: SummariesConfig,
}

/// PDF export settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Site URL prefix rewritten to a local file:// URL before rendering.
    /// The deployed site serves pages under this prefix (e.g. "/me/"), so
    /// generated HTML references assets as "/me/assets/..." which does not
    /// resolve on the local filesystem. No rewriting happens when unset.
    pub url_prefix: Option<String>,
    /// Directory rewritten URLs resolve against. Defaults to the source
    /// file's parent directory.
    pub base_url: Option<PathBuf>,
}

/// Summary draft generation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SummariesConfig {
    /// GitHub username injected into every rendering context.
    pub github_username: String,
    /// Path of the project template to expand, relative to the working
    /// directory.
    pub template: PathBuf,
    /// Directory the rendered drafts are written into.
    pub output_dir: PathBuf,
    /// Repositories to generate summaries for when no JSON file is given.
    pub repos: Vec<String>,
}

impl Default for SummariesConfig {
    fn default() -> Self {
        SummariesConfig {
            github_username: "nntin".to_string(),
            template: PathBuf::from("cookiecutter/cookiecutter-github-summary"),
            output_dir: PathBuf::from("../_drafts"),
            repos: default_repos(),
        }
    }
}

/// The repository list the summaries tool was originally written for.
fn default_repos() -> Vec<String> {
    [
        // initial landing
        "me",
        "nntin.github.io",
        "NNTin",
        // bigger projects
        "discord-logo",
        "discord-web-bridge",
        "discord-twitter-bot",
        "Reply-Dota-2-Reddit",
        // heroku adventures
        "crosku",
        "Red-kun",
        "shell-kun",
        // reddit adventures
        "tracker-reddit-discord",
        "dev-tracker-reddit",
        "Reply-LoL-Reddit",
        "Cubify-Reddit",
        "Dota-2-Emoticons",
        "Dota-2-Reddit-Flair-Mosaic",
        // REST API adventures
        "pasteview",
        "pasteindex",
        "twitter-backend",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

impl Configuration {
    /// Load `site-tools.toml` from the working directory. A missing file
    /// yields the built-in defaults.
    pub fn load() -> Result<Configuration> {
        Configuration::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Configuration> {
        if !path.exists() {
            return Ok(Configuration::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }
}
