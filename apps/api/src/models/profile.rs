use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default profile compiled into the binary; `PROFILE_PATH` overrides it.
const EMBEDDED_PROFILE: &str = include_str!("../../content/profile.json");

/// Static, non-database portfolio content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    /// Rotating taglines under the hero name.
    pub phrases: Vec<String>,
    pub about: Vec<String>,
    pub contact: ContactDetails,
    pub education: Vec<Education>,
    pub skill_categories: Vec<SkillCategory>,
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub location: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub location: String,
    pub period: String,
    #[serde(default)]
    pub gpa: String,
    pub status: String,
    pub description: String,
    #[serde(default)]
    pub coursework: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    pub icon: String,
    pub color: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub image: String,
    pub category: String,
}

impl Profile {
    /// Loads the profile from `path`, or the embedded default when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read profile at {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid profile JSON at {}", path.display()))
            }
            None => Self::embedded(),
        }
    }

    pub fn embedded() -> Result<Self> {
        serde_json::from_str(EMBEDDED_PROFILE).context("Embedded profile is not valid JSON")
    }
}
