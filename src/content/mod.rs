//! Portfolio Content
//!
//! The static data behind the public page (profile, projects, skills,
//! education, contact links). It is parsed once into process-wide immutable
//! state: either the document embedded in the binary or a file named at
//! startup via [`init`].

mod types;

pub use types::*;

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Content document compiled into the binary
const EMBEDDED: &str = include_str!("../../content/portfolio.toml");

static CONTENT: OnceCell<Portfolio> = OnceCell::new();

/// Errors loading a content document
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read content file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse content: {0}")]
    Parse(String),

    #[error("Invalid content: {0}")]
    Invalid(String),

    #[error("Content already initialized")]
    AlreadyInitialized,
}

impl Portfolio {
    /// Parse and validate a content document
    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        let mut portfolio: Portfolio =
            toml::from_str(source).map_err(|e| ContentError::Parse(e.to_string()))?;
        portfolio.validate()?;
        portfolio.projects.sort_by_key(|p| p.order);
        portfolio.education.entries.sort_by_key(|e| e.order);
        Ok(portfolio)
    }

    /// Load a content document from disk
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let source = std::fs::read_to_string(path).map_err(|e| ContentError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// The document shipped with the binary
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_toml_str(EMBEDDED)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.profile.name.trim().is_empty() {
            return Err(ContentError::Invalid("profile.name is empty".to_string()));
        }
        if self.skills.categories.iter().any(|c| c.skills.is_empty()) {
            return Err(ContentError::Invalid(
                "every skill category needs at least one skill".to_string(),
            ));
        }

        let mut ids: Vec<&str> = self.projects.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(ContentError::Invalid("duplicate project id".to_string()));
        }

        Ok(())
    }
}

/// Install the process-wide content.
///
/// With `None` the embedded document is used. May only succeed once; call it
/// before the server starts rendering.
pub fn init(path: Option<&Path>) -> Result<&'static Portfolio, ContentError> {
    let portfolio = match path {
        Some(p) => {
            let loaded = Portfolio::load(p)?;
            tracing::info!(path = ?p, "Loaded portfolio content");
            loaded
        }
        None => Portfolio::embedded()?,
    };

    CONTENT
        .set(portfolio)
        .map_err(|_| ContentError::AlreadyInitialized)?;
    Ok(get())
}

/// The process-wide content, falling back to the embedded document
pub fn get() -> &'static Portfolio {
    CONTENT.get_or_init(|| {
        Portfolio::embedded().expect("embedded portfolio content must be valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_content_parses() {
        let portfolio = Portfolio::embedded().unwrap();

        assert_eq!(portfolio.profile.name, "Mano Chandran");
        assert_eq!(portfolio.profile.initials, "MC");
        assert_eq!(portfolio.about.paragraphs.len(), 4);
        assert_eq!(portfolio.about.highlights.len(), 4);
        assert_eq!(portfolio.about.stats.len(), 4);
        assert_eq!(portfolio.contact.channels.len(), 3);
        assert_eq!(portfolio.contact.socials.len(), 2);
    }

    #[test]
    fn test_projects_in_declared_order() {
        let portfolio = Portfolio::embedded().unwrap();
        let ids: Vec<&str> = portfolio.projects.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["medication-tracker", "ecommerce-website"]);
        assert_eq!(portfolio.projects[0].tech_stack.len(), 6);
        assert_eq!(portfolio.projects[1].features.len(), 5);
        assert!(portfolio.projects[0].demo_url.is_none());
    }

    #[test]
    fn test_skills_and_education() {
        let portfolio = Portfolio::embedded().unwrap();

        let titles: Vec<&str> = portfolio
            .skills
            .categories
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Frontend Development",
                "Backend Development",
                "Tools & Technologies",
                "Vibecoding Tools",
                "AI Tools",
            ]
        );
        assert_eq!(portfolio.skills.certifications[0].provider, "Career Ladder");

        let degrees: Vec<&str> = portfolio
            .education
            .entries
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(degrees, vec!["bca", "hsc", "sslc"]);
        assert_eq!(portfolio.education.entries[1].kind, "12th Grade");
    }

    #[test]
    fn test_entries_sorted_by_order() {
        let source = EMBEDDED.replace("order = 1", "order = 9");
        let portfolio = Portfolio::from_toml_str(&source).unwrap();

        assert_eq!(portfolio.projects[0].id, "ecommerce-website");
        assert_eq!(portfolio.education.entries[0].id, "hsc");
        assert_eq!(portfolio.education.entries[2].id, "bca");
    }

    #[test]
    fn test_grade_dots() {
        let mut entry = Portfolio::embedded().unwrap().education.entries[0].clone();
        assert_eq!(entry.grade_dots(), 5);

        entry.cgpa = "3.4".to_string();
        assert_eq!(entry.grade_dots(), 3);

        entry.cgpa = "n/a".to_string();
        assert_eq!(entry.grade_dots(), 0);
    }

    #[test]
    fn test_invalid_content_rejected() {
        let source = EMBEDDED.replace("name = \"Mano Chandran\"", "name = \"\"");
        assert!(matches!(
            Portfolio::from_toml_str(&source),
            Err(ContentError::Invalid(_))
        ));

        assert!(matches!(
            Portfolio::from_toml_str("not = [valid"),
            Err(ContentError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.toml");
        std::fs::write(&path, EMBEDDED).unwrap();

        let portfolio = Portfolio::load(&path).unwrap();
        assert_eq!(portfolio.projects.len(), 2);

        let missing = Portfolio::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ContentError::Io { .. })));
    }

    #[test]
    fn test_get_returns_content() {
        assert_eq!(get().profile.title, "Full-Stack Web Developer");
    }
}
