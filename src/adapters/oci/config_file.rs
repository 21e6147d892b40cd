use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::ports::AuthError;

pub const DEFAULT_PROFILE: &str = "DEFAULT";

/// API key credentials from one profile of the OCI config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OciProfile {
    pub user: String,
    pub fingerprint: String,
    pub tenancy: String,
    pub region: String,
    pub key_file: PathBuf,
}

impl OciProfile {
    pub fn load(path: &Path, profile: &str) -> Result<Self, AuthError> {
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => AuthError::ConfigNotFound {
                path: path.to_path_buf(),
            },
            _ => AuthError::ConfigUnreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;

        Self::parse(&content, profile, path)
    }

    /// Profiles inherit any field they omit from [DEFAULT]
    pub fn parse(content: &str, profile: &str, path: &Path) -> Result<Self, AuthError> {
        let sections = parse_sections(content);

        let selected = sections.get(profile).ok_or_else(|| AuthError::ProfileNotFound {
            profile: profile.to_string(),
            path: path.to_path_buf(),
        })?;
        let defaults = sections.get(DEFAULT_PROFILE);

        let field = |name: &'static str| -> Result<String, AuthError> {
            selected
                .get(name)
                .or_else(|| defaults.and_then(|d| d.get(name)))
                .filter(|value| !value.is_empty())
                .cloned()
                .ok_or_else(|| AuthError::MissingField {
                    profile: profile.to_string(),
                    field: name,
                })
        };

        Ok(Self {
            user: field("user")?,
            fingerprint: field("fingerprint")?,
            tenancy: field("tenancy")?,
            region: field("region")?,
            key_file: expand_home(&field("key_file")?),
        })
    }

    /// keyId used in the Authorization header
    pub fn key_id(&self) -> String {
        format!("{}/{}/{}", self.tenancy, self.user, self.fingerprint)
    }
}

/// Location of the config file when OCI_CONFIG_FILE is not set
pub fn default_config_path() -> PathBuf {
    expand_home("~/.oci/config")
}

fn parse_sections(content: &str) -> HashMap<String, HashMap<String, String>> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let (Some(section), Some((key, value))) = (&current, line.split_once('=')) else {
            continue;
        };

        sections
            .entry(section.clone())
            .or_default()
            .insert(key.trim().to_string(), value.trim().to_string());
    }

    sections
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
