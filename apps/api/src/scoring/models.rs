use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Structured resume content as produced by text extraction and skill tagging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
}

impl ResumeProfile {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
            && self.skills.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
    }
}

/// What the job asks for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub min_experience: u32,
    #[serde(default)]
    pub required_education: Vec<String>,
}

/// The five scored dimensions, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    SkillsMatch,
    KeywordDensity,
    ExperienceMatch,
    EducationMatch,
    FormatScore,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::SkillsMatch,
        Component::KeywordDensity,
        Component::ExperienceMatch,
        Component::EducationMatch,
        Component::FormatScore,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Component::SkillsMatch => "skills_match",
            Component::KeywordDensity => "keyword_density",
            Component::ExperienceMatch => "experience_match",
            Component::EducationMatch => "education_match",
            Component::FormatScore => "format_score",
        }
    }
}

/// Final score. All numbers are percentages rounded to two decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_score: f64,
    pub component_scores: BTreeMap<Component, f64>,
    pub recommendations: Vec<String>,
}

impl ScoreResult {
    /// The value returned when scoring degrades.
    pub fn zero() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn component(&self, component: Component) -> Option<f64> {
        self.component_scores.get(&component).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_serializes_as_snake_case_name() {
        for component in Component::ALL {
            let json = serde_json::to_string(&component).unwrap();
            assert_eq!(json, format!("\"{}\"", component.name()));
        }
    }

    #[test]
    fn test_score_result_map_keys_are_component_names() {
        let mut result = ScoreResult::zero();
        result.component_scores.insert(Component::FormatScore, 75.0);
        result.component_scores.insert(Component::SkillsMatch, 33.33);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["component_scores"]["format_score"], 75.0);
        assert_eq!(value["component_scores"]["skills_match"], 33.33);
    }

    #[test]
    fn test_profiles_deserialize_with_missing_fields() {
        let resume: ResumeProfile = serde_json::from_str(r#"{"skills": ["rust"]}"#).unwrap();
        assert_eq!(resume.skills, vec!["rust"]);
        assert!(resume.text.is_empty());

        let job: JobProfile = serde_json::from_str(r#"{"description": "Rust dev"}"#).unwrap();
        assert_eq!(job.min_experience, 0);
        assert!(job.required_education.is_empty());
    }

    #[test]
    fn test_empty_resume_profile() {
        assert!(ResumeProfile::default().is_empty());
        let resume = ResumeProfile {
            text: "  ".to_string(),
            ..Default::default()
        };
        assert!(resume.is_empty());
    }
}
