//! Resume tagging — turns already-extracted plain text into a `ResumeProfile`.
//!
//! Skill tokens are looked up in the dictionary exactly, then fuzzily. Education
//! and experience snippets are sentence-level keyword and date heuristics.
//! Contact details come from fixed regex patterns.

pub mod handlers;

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::experience::mentions_years;
use crate::scoring::stop_words::is_stop_word;
use crate::scoring::ResumeProfile;
use crate::skills::SkillDictionary;

const EDUCATION_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "bachelor",
    "master",
    "phd",
    "degree",
    "diploma",
    "graduate",
    "undergraduate",
    "alumni",
    "school",
];

/// Longest multi-word phrase tried against the dictionary.
const MAX_PHRASE_WORDS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub linkedin: Vec<String>,
}

struct Patterns {
    token: Regex,
    sentence: Regex,
    email: Regex,
    phones: Vec<Regex>,
    linkedin: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        token: Regex::new(r"[A-Za-z0-9+#]+(?:[./\-][A-Za-z0-9+#]+)*").expect("static regex"),
        sentence: Regex::new(r"[^.!?\n]+").expect("static regex"),
        email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .expect("static regex"),
        phones: [
            r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",
            r"\(\d{3}\)\s?\d{3}[-.]?\d{4}\b",
            r"\+\d{1,3}[-.\s]?\d{3,4}[-.\s]?\d{3,4}[-.\s]?\d{3,4}\b",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("static regex"))
        .collect(),
        linkedin: Regex::new(r"linkedin\.com/in/[\w-]+").expect("static regex"),
    })
}

/// Dictionary skills found in `text`, lowercased, in discovery order.
///
/// Single tokens longer than two characters that are not stop words are matched
/// exactly, falling back to the closest fuzzy hit within `max_distance`. Runs of
/// two or three tokens are matched exactly so phrases like "machine learning"
/// are found.
pub fn extract_skills(text: &str, dictionary: &SkillDictionary, max_distance: usize) -> Vec<String> {
    let tokens: Vec<String> = patterns()
        .token
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect();

    let mut seen = HashSet::new();
    let mut skills = Vec::new();
    let mut push = |skill: String| {
        if seen.insert(skill.clone()) {
            skills.push(skill);
        }
    };

    for token in &tokens {
        if token.chars().count() <= 2 || is_stop_word(token) {
            continue;
        }
        if dictionary.exact_match(token) {
            push(token.clone());
        } else if max_distance > 0 {
            if let Some(best) = dictionary.fuzzy_search(token, max_distance).into_iter().next() {
                push(best.term);
            }
        }
    }

    for n in 2..=MAX_PHRASE_WORDS {
        for window in tokens.windows(n) {
            let phrase = window.join(" ");
            if dictionary.exact_match(&phrase) {
                push(phrase);
            }
        }
    }

    skills
}

fn sentences(text: &str) -> impl Iterator<Item = &str> {
    patterns()
        .sentence
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Sentences that mention an education keyword.
pub fn extract_education(text: &str) -> Vec<String> {
    sentences(text)
        .filter(|s| {
            let lower = s.to_lowercase();
            EDUCATION_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .map(str::to_string)
        .collect()
}

/// Sentences that mention a year count or a year range.
pub fn extract_experience(text: &str) -> Vec<String> {
    sentences(text)
        .filter(|s| mentions_years(s))
        .map(str::to_string)
        .collect()
}

pub fn extract_contacts(text: &str) -> ContactInfo {
    let p = patterns();
    let mut phones: Vec<String> = Vec::new();
    for pattern in &p.phones {
        for m in pattern.find_iter(text) {
            let phone = m.as_str().to_string();
            if !phones.contains(&phone) {
                phones.push(phone);
            }
        }
    }
    ContactInfo {
        emails: p.email.find_iter(text).map(|m| m.as_str().to_string()).collect(),
        phones,
        linkedin: p
            .linkedin
            .find_iter(&text.to_lowercase())
            .map(|m| m.as_str().to_string())
            .collect(),
    }
}

/// Builds the scoring input for a resume from its plain text.
pub fn build_resume_profile(
    text: &str,
    dictionary: &SkillDictionary,
    max_distance: usize,
) -> ResumeProfile {
    ResumeProfile {
        text: text.to_string(),
        skills: extract_skills(text, dictionary, max_distance),
        experience: extract_experience(text),
        education: extract_education(text),
    }
}
