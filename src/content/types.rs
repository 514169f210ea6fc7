//! Content types
//!
//! Serde models for the portfolio content document. The API serializes
//! projects, skills and education exactly as they are declared here.

use serde::{Deserialize, Serialize};

/// The whole content document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub about: About,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub skills: Skills,
    pub education: Education,
    pub contact: ContactInfo,
}

/// Identity and headline details shown in the hero, nav and footer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    pub name: String,
    pub initials: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub github: String,
    pub linkedin: String,
    pub tagline: String,
    pub footer_blurb: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct About {
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

/// A headline number with a label ("2+ Years Experience")
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub features: Vec<String>,
    pub role: String,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Skills {
    pub categories: Vec<SkillCategory>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub summary: Vec<Stat>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillCategory {
    pub title: String,
    pub skills: Vec<String>,
    /// Tailwind gradient stops used for the category badge
    pub color: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Certification {
    pub title: String,
    pub duration: String,
    pub provider: String,
    pub year: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Education {
    pub entries: Vec<EducationEntry>,
    #[serde(default)]
    pub summary: Vec<Stat>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EducationEntry {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub cgpa: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub order: u32,
}

impl EducationEntry {
    /// Number of filled dots (out of five) for the CGPA meter.
    ///
    /// The grade is rounded to the nearest whole point and clamped; an
    /// unparseable grade shows no dots.
    pub fn grade_dots(&self) -> usize {
        self.cgpa
            .trim()
            .parse::<f64>()
            .map(|g| g.round().clamp(0.0, 5.0) as usize)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactInfo {
    pub intro: String,
    pub blurb: String,
    #[serde(default)]
    pub channels: Vec<ContactChannel>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactChannel {
    pub title: String,
    pub value: String,
    pub href: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SocialLink {
    pub name: String,
    pub href: String,
}
