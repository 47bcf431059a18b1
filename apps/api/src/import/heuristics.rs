//! Keyword and pattern heuristics that pull a partial resume out of plain text.
//!
//! Deliberately shallow: no date parsing, no company/title separation, no
//! splitting of multiple jobs. Every rule is first-match-wins.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{
    EducationItem, PersonalInfo, Resume, ResumeTemplate, SkillItem, WorkExperienceItem,
};

/// Job titles searched verbatim, in priority order.
const JOB_TITLES: &[&str] = &[
    "Software Engineer",
    "Web Developer",
    "Project Manager",
    "Marketing Specialist",
    "Data Analyst",
    "Product Manager",
    "Designer",
    "Engineer",
];

const WORK_KEYWORDS: &[&str] = &[
    "experience",
    "employment",
    "work history",
    "worked",
    "intern",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "university",
    "college",
    "school",
    "degree",
    "bachelor",
    "master",
    "phd",
];

const SKILL_KEYWORDS: &[&str] = &["skills", "proficient", "technologies", "languages", "tools"];

const SUMMARY_CHARS: usize = 200;

/// Level given to the single skill entry built from the skills block.
const IMPORTED_SKILL_LEVEL: i32 = 3;

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Z][a-z]+)\s+([A-Z][a-z]+)\b").unwrap())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap())
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\+\d{1,3}\s?)?(\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4})").unwrap()
    })
}

/// Which fields the heuristics actually found. Anything `false` is blank in
/// the accompanying resume, not confirmed empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedFields {
    pub name: bool,
    pub email: bool,
    pub phone: bool,
    pub profession: bool,
    pub work_experience: bool,
    pub education: bool,
    pub skills: bool,
    pub summary: bool,
}

/// Output of a heuristic import: a partial resume plus what was detected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedResume {
    pub resume: Resume,
    pub detected: DetectedFields,
}

/// Builds a partial resume from extracted document text.
pub fn extract_resume(text: &str) -> ImportedResume {
    let mut detected = DetectedFields::default();

    let (first_name, last_name) = match detect_name(text) {
        Some(name) => {
            detected.name = true;
            name
        }
        None => (String::new(), String::new()),
    };
    let email = first_match(email_re(), text);
    let phone = first_match(phone_re(), text);
    let profession = detect_profession(text);
    detected.email = email.is_some();
    detected.phone = phone.is_some();
    detected.profession = profession.is_some();

    let work_block = keyword_block(text, WORK_KEYWORDS);
    let education_block = keyword_block(text, EDUCATION_KEYWORDS);
    let skills_block = keyword_block(text, SKILL_KEYWORDS);
    detected.work_experience = work_block.is_some();
    detected.education = education_block.is_some();
    detected.skills = skills_block.is_some();

    let summary = summary_slice(text);
    detected.summary = !summary.is_empty();

    let resume = Resume {
        id: Uuid::new_v4(),
        template: ResumeTemplate::Minimal,
        personal_info: PersonalInfo {
            first_name,
            last_name,
            email: email.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            profession: profession.unwrap_or_default(),
            ..Default::default()
        },
        work_experience: work_block
            .map(|description| {
                vec![WorkExperienceItem {
                    id: Uuid::new_v4(),
                    company: String::new(),
                    position: String::new(),
                    start_date: String::new(),
                    end_date: String::new(),
                    current: false,
                    description,
                }]
            })
            .unwrap_or_default(),
        education: education_block
            .map(|description| {
                vec![EducationItem {
                    id: Uuid::new_v4(),
                    school: String::new(),
                    degree: String::new(),
                    field_of_study: String::new(),
                    start_date: String::new(),
                    end_date: String::new(),
                    description,
                }]
            })
            .unwrap_or_default(),
        skills: skills_block
            .map(|name| {
                vec![SkillItem {
                    id: Uuid::new_v4(),
                    name,
                    level: IMPORTED_SKILL_LEVEL,
                }]
            })
            .unwrap_or_default(),
        summary,
    };

    ImportedResume { resume, detected }
}

fn first_match(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().to_string())
}

/// First `Capitalized Capitalized` pair; otherwise the first non-blank line,
/// split into its first token and the rest.
fn detect_name(text: &str) -> Option<(String, String)> {
    if let Some(caps) = name_re().captures(text) {
        return Some((caps[1].to_string(), caps[2].to_string()));
    }

    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?.to_string();
    let rest = tokens.collect::<Vec<_>>().join(" ");
    Some((first, rest))
}

fn detect_profession(text: &str) -> Option<String> {
    JOB_TITLES
        .iter()
        .find(|title| text.contains(*title))
        .map(|title| title.to_string())
}

/// Lines mentioning any keyword (case-insensitive), verbatim, joined by newlines.
fn keyword_block(text: &str, keywords: &[&str]) -> Option<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| {
            let lower = line.to_lowercase();
            keywords.iter().any(|kw| lower.contains(kw))
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Leading slice of the text with whitespace collapsed, marked when cut short.
fn summary_slice(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= SUMMARY_CHARS {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(SUMMARY_CHARS).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe\n\
        Senior Software Engineer\n\
        jane.doe@example.com | (555) 123-4567\n\
        \n\
        Professional Experience\n\
        Acme Corp, 2018 - present, led platform work\n\
        \n\
        Education\n\
        State University, BS Computer Science\n\
        \n\
        Skills: Rust, Go, Kubernetes\n";

    #[test]
    fn test_email_and_phone_extracted_verbatim() {
        let imported = extract_resume(SAMPLE);
        assert_eq!(imported.resume.personal_info.email, "jane.doe@example.com");
        assert_eq!(imported.resume.personal_info.phone, "(555) 123-4567");
        assert!(imported.detected.email);
        assert!(imported.detected.phone);
    }

    #[test]
    fn test_phone_with_country_code() {
        let imported = extract_resume("Call +1 555.867.5309 anytime");
        assert_eq!(imported.resume.personal_info.phone, "+1 555.867.5309");
    }

    #[test]
    fn test_name_from_first_capitalized_pair() {
        let imported = extract_resume(SAMPLE);
        assert_eq!(imported.resume.personal_info.first_name, "Jane");
        assert_eq!(imported.resume.personal_info.last_name, "Doe");
        assert!(imported.detected.name);
    }

    #[test]
    fn test_name_falls_back_to_first_line() {
        let imported = extract_resume("\n  JOHN Q SMITH\nemail me");
        assert_eq!(imported.resume.personal_info.first_name, "JOHN");
        assert_eq!(imported.resume.personal_info.last_name, "Q SMITH");
    }

    #[test]
    fn test_profession_uses_vocabulary_order() {
        let imported = extract_resume(SAMPLE);
        // "Software Engineer" precedes the bare "Engineer" in the vocabulary.
        assert_eq!(imported.resume.personal_info.profession, "Software Engineer");

        let none = extract_resume("Chef and baker");
        assert_eq!(none.resume.personal_info.profession, "");
        assert!(!none.detected.profession);
    }

    #[test]
    fn test_sections_collected_into_single_blocks() {
        let imported = extract_resume(SAMPLE);
        let resume = &imported.resume;

        assert_eq!(resume.work_experience.len(), 1);
        assert_eq!(resume.work_experience[0].description, "Professional Experience");
        assert_eq!(resume.work_experience[0].company, "");

        assert_eq!(resume.education.len(), 1);
        assert_eq!(
            resume.education[0].description,
            "Education\nState University, BS Computer Science"
        );

        assert_eq!(resume.skills.len(), 1);
        assert_eq!(resume.skills[0].name, "Skills: Rust, Go, Kubernetes");
        assert_eq!(resume.skills[0].level, IMPORTED_SKILL_LEVEL);
    }

    #[test]
    fn test_no_keywords_leaves_lists_empty() {
        let imported = extract_resume("Jane Doe\njane@example.com");
        assert!(imported.resume.work_experience.is_empty());
        assert!(imported.resume.education.is_empty());
        assert!(imported.resume.skills.is_empty());
        assert!(!imported.detected.skills);
    }

    #[test]
    fn test_summary_is_truncated_with_marker() {
        let long = "word ".repeat(100);
        let imported = extract_resume(&long);
        assert!(imported.resume.summary.ends_with("..."));
        assert!(imported.resume.summary.chars().count() <= SUMMARY_CHARS + 3);

        let short = extract_resume("Short  text\nhere");
        assert_eq!(short.resume.summary, "Short text here");
    }

    #[test]
    fn test_empty_text_yields_blank_partial_resume() {
        let imported = extract_resume("");
        assert!(imported.resume.is_blank());
        assert_eq!(imported.detected, DetectedFields::default());
        assert_eq!(imported.resume.template, ResumeTemplate::Minimal);
    }
}
