//! Server configuration loaded from TOML.
//!
//! Lookup order: `$DOCS_GRAPH_CONFIG`, then `<config dir>/docs-graph/config.toml`,
//! then built-in defaults. `PORT` and `DOCS_GRAPH_MODE` override the file.

use crate::doc::{Site, VersionKey};
use crate::error::{DocsError, Result};
use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DOCS_GRAPH_CONFIG";

/// Minimum Jaro-Winkler similarity for a project name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

fn is_suggestion(similarity: f64) -> bool {
    similarity >= SUGGESTION_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Http,
    Mcp,
}

impl std::str::FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "mcp" => Ok(Self::Mcp),
            other => bail!("unknown mode '{other}', expected 'http' or 'mcp'"),
        }
    }
}

/// Where one project's documentation comes from.
///
/// Templates substitute `{project}` and `{branch}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectConfig {
    pub title: String,
    /// URL of the JSON dump for a branch
    pub source: String,
    /// Prefix of source-file links
    pub repo: String,
    /// Prefix of documentation pages
    pub docs: String,
}

impl ProjectConfig {
    fn new(title: &str, source: &str, repo: &str, docs: &str) -> Self {
        Self {
            title: title.to_string(),
            source: source.to_string(),
            repo: repo.to_string(),
            docs: docs.to_string(),
        }
    }

    pub fn source_url(&self, key: &VersionKey) -> String {
        expand(&self.source, key)
    }

    pub fn site(&self, key: &VersionKey) -> Site {
        Site {
            key: key.clone(),
            title: self.title.clone(),
            base_url: expand(&self.docs, key),
            repo_url: expand(&self.repo, key),
        }
    }
}

fn expand(template: &str, key: &VersionKey) -> String {
    template
        .replace("{project}", &key.project)
        .replace("{branch}", &key.branch)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub host: String,
    pub port: u16,
    /// Maximum number of versions kept in memory
    pub cache_capacity: usize,
    pub fetch_timeout_secs: u64,
    pub icon_url: String,
    pub projects: BTreeMap<String, ProjectConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Http,
            host: "0.0.0.0".to_string(),
            port: 4000,
            cache_capacity: 32,
            fetch_timeout_secs: 30,
            icon_url: "https://i.imgur.com/LM8YCyk.png".to_string(),
            projects: default_projects(),
        }
    }
}

fn default_projects() -> BTreeMap<String, ProjectConfig> {
    const DOCS: &str = "https://discord.js.org/#/docs/{project}/{branch}/";

    BTreeMap::from([
        (
            "discord.js".to_string(),
            ProjectConfig::new(
                "Discord.js Docs",
                "https://raw.githubusercontent.com/hydrabolt/discord.js/docs/{branch}.json",
                "https://github.com/discordjs/discord.js/blob/{branch}/",
                DOCS,
            ),
        ),
        (
            "commando".to_string(),
            ProjectConfig::new(
                "Commando Docs",
                "https://raw.githubusercontent.com/Gawdl3y/discord.js-commando/docs/{branch}.json",
                "https://github.com/Gawdl3y/discord.js-commando/blob/{branch}/",
                DOCS,
            ),
        ),
        (
            "rpc".to_string(),
            ProjectConfig::new(
                "RPC Docs",
                "https://raw.githubusercontent.com/devsnek/discord-rpc/docs/{branch}.json",
                "https://github.com/devsnek/discord-rpc/blob/{branch}/",
                DOCS,
            ),
        ),
    ])
}

impl Config {
    /// Load configuration from the standard locations and the environment.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) => Self::from_file(&path)?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML; projects it names are added to (or replace) the built-in ones.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(text).context("Failed to parse config TOML")?;
        for (name, project) in default_projects() {
            config.projects.entry(name).or_insert(project);
        }
        if config.cache_capacity == 0 {
            bail!("cache_capacity must be at least 1");
        }
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port number: '{port}'"))?;
        }
        if let Ok(mode) = std::env::var("DOCS_GRAPH_MODE") {
            self.mode = mode.parse().context("Invalid DOCS_GRAPH_MODE")?;
        }
        Ok(())
    }

    /// Look up a project, suggesting close names when it is unknown.
    pub fn project(&self, name: &str) -> std::result::Result<&ProjectConfig, DocsError> {
        if let Some(project) = self.projects.get(name) {
            return Ok(project);
        }

        let mut scored: Vec<(f64, &String)> = self
            .projects
            .keys()
            .map(|known| {
                let similarity = rapidfuzz::distance::jaro_winkler::similarity(
                    name.to_lowercase().chars(),
                    known.to_lowercase().chars(),
                );
                (similarity, known)
            })
            .filter(|(similarity, _)| is_suggestion(*similarity))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Err(DocsError::UnknownProject {
            project: name.to_string(),
            suggestions: scored.into_iter().map(|(_, known)| known.clone()).collect(),
        })
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }
    dirs::config_dir()
        .map(|dir| dir.join("docs-graph").join("config.toml"))
        .filter(|path| path.is_file())
}
