use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Bundled profile so the binary runs without any setup.
const BUILTIN_PROFILE: &str = include_str!("../data/profile.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// The resume document driving both the rendered sections and the
/// assistant's system instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub summary: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub location: String,
    pub socials: Vec<SocialLink>,
    pub skills: Vec<SkillCategory>,
    pub experience: Vec<Job>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_download_link: Option<String>,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read profile file {}", path.display()))?;
        let profile: Profile = serde_json::from_str(&content)
            .with_context(|| format!("invalid profile JSON in {}", path.display()))?;
        Ok(profile)
    }

    pub fn builtin() -> Result<Self> {
        serde_json::from_str(BUILTIN_PROFILE).context("bundled profile is invalid")
    }

    /// Owner's first name, used in the contact mail body greeting.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Persona and context string sent with every assistant request.
    /// Built once at startup; the full profile is embedded as JSON so
    /// the model answers only from what the resume actually says.
    pub fn system_instruction(&self) -> String {
        let context = serde_json::to_string_pretty(self).unwrap_or_default();
        format!(
            "You are an AI assistant representing {name}.\n\
             Your goal is to answer questions about {name}'s professional background, \
             skills, and experience in a professional, friendly, and concise manner.\n\
             Strictly use the following context to answer questions. If the answer is \
             not in the context, politely say you don't have that specific information \
             but invite them to contact {name} directly at {email}.\n\n\
             CONTEXT:\n{context}\n\n\
             Do not invent experiences or skills not listed here.\n\
             Keep answers brief and relevant to a recruiter or hiring manager.",
            name = self.name,
            email = self.email,
            context = context,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_profile_parses() {
        let profile = Profile::builtin().unwrap();
        assert_eq!(profile.name, "Alex Devson");
        assert_eq!(profile.skills.len(), 3);
        assert_eq!(profile.experience.len(), 3);
        assert!(profile.phone.is_none());
    }

    #[test]
    fn first_name_takes_leading_word() {
        let profile = Profile::builtin().unwrap();
        assert_eq!(profile.first_name(), "Alex");
    }

    #[test]
    fn system_instruction_embeds_identity_and_context() {
        let profile = Profile::builtin().unwrap();
        let instruction = profile.system_instruction();
        assert!(instruction.contains("representing Alex Devson"));
        assert!(instruction.contains("alex.devson@example.com"));
        assert!(instruction.contains("CONTEXT:"));
        // Serialized resume data rides along in the context block.
        assert!(instruction.contains("TechFlow Solutions"));
    }

    #[test]
    fn load_reads_camel_case_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "name": "Jo Rivera",
                "title": "Engineer",
                "summary": "Builds things.",
                "email": "jo@example.com",
                "location": "Lisbon",
                "socials": [],
                "skills": [],
                "experience": [{{
                    "company": "Acme",
                    "role": "Engineer",
                    "startDate": "2020",
                    "endDate": "Present",
                    "description": "Built the thing.",
                    "highlights": ["Shipped v1"],
                    "technologies": ["Rust"]
                }}],
                "education": [],
                "projects": [{{
                    "title": "Widget",
                    "description": "A widget.",
                    "techStack": ["Rust"],
                    "link": "https://example.com"
                }}],
                "resumeDownloadLink": "https://example.com/cv.pdf"
            }}"#
        )
        .unwrap();

        let profile = Profile::load(file.path()).unwrap();
        assert_eq!(profile.experience[0].start_date, "2020");
        assert_eq!(
            profile.experience[0].highlights.as_deref(),
            Some(&["Shipped v1".to_string()][..])
        );
        assert_eq!(profile.projects[0].tech_stack, vec!["Rust"]);
        assert_eq!(
            profile.resume_download_link.as_deref(),
            Some("https://example.com/cv.pdf")
        );
    }

    #[test]
    fn load_rejects_missing_file() {
        assert!(Profile::load(Path::new("/nonexistent/profile.json")).is_err());
    }
}
