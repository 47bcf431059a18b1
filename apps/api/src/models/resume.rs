use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visual template used to project a resume. Has no effect on the data itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeTemplate {
    #[default]
    Minimal,
    Professional,
    Creative,
    Modern,
}

impl ResumeTemplate {
    pub const ALL: [ResumeTemplate; 4] = [
        ResumeTemplate::Minimal,
        ResumeTemplate::Professional,
        ResumeTemplate::Creative,
        ResumeTemplate::Modern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeTemplate::Minimal => "minimal",
            ResumeTemplate::Professional => "professional",
            ResumeTemplate::Creative => "creative",
            ResumeTemplate::Modern => "modern",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub profession: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Inline image data (a `data:` URL).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Partial update for [`PersonalInfo`]. Absent fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl PersonalInfo {
    /// Shallow merge: every field present in `patch` overwrites the current value.
    pub fn merged(&self, patch: PersonalInfoPatch) -> PersonalInfo {
        let current = self.clone();
        PersonalInfo {
            first_name: patch.first_name.unwrap_or(current.first_name),
            last_name: patch.last_name.unwrap_or(current.last_name),
            email: patch.email.unwrap_or(current.email),
            phone: patch.phone.unwrap_or(current.phone),
            profession: patch.profession.unwrap_or(current.profession),
            city: patch.city.unwrap_or(current.city),
            province: patch.province.unwrap_or(current.province),
            postal_code: patch.postal_code.unwrap_or(current.postal_code),
            location: patch.location.or(current.location),
            website: patch.website.or(current.website),
            photo_url: patch.photo_url.or(current.photo_url),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceItem {
    pub id: Uuid,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_date: String,
    /// Ignored for display while `current` is set.
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub id: Uuid,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillItem {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    /// 1..=5 by convention; not clamped here.
    #[serde(default)]
    pub level: i32,
}

/// Anything stored in one of the resume's ordered, id-keyed lists.
pub trait ListItem {
    fn id(&self) -> Uuid;
}

impl ListItem for WorkExperienceItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl ListItem for EducationItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl ListItem for SkillItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    #[serde(default)]
    pub template: ResumeTemplate,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub work_experience: Vec<WorkExperienceItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub skills: Vec<SkillItem>,
    #[serde(default)]
    pub summary: String,
}

impl Resume {
    /// A blank resume with a freshly generated id and the minimal template.
    pub fn empty() -> Self {
        Resume {
            id: Uuid::new_v4(),
            template: ResumeTemplate::Minimal,
            personal_info: PersonalInfo::default(),
            work_experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            summary: String::new(),
        }
    }

    /// True when nothing but the id and template has been filled in.
    pub fn is_blank(&self) -> bool {
        self.personal_info == PersonalInfo::default()
            && self.work_experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.summary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Shape written by the browser builder, including its lowercase template
    // names and camelCase keys.
    const STORED_RESUME: &str = r#"{
        "id": "6f1c1a8e-3f0a-4b7e-9d54-0c2f3f0e9a11",
        "template": "creative",
        "personalInfo": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": "(555) 123-4567",
            "profession": "Engineer",
            "city": "London",
            "province": "Greater London",
            "postalCode": "NW1",
            "photoUrl": ""
        },
        "workExperience": [{
            "id": "0b7f2d4c-51e5-4a0e-8c51-0b0a1e6e2b01",
            "company": "Analytical Engines Ltd",
            "position": "Programmer",
            "startDate": "1842-01",
            "endDate": "",
            "current": true,
            "description": "Wrote the first published algorithm."
        }],
        "education": [],
        "skills": [{"id": "1c2a3b4d-0000-4000-8000-000000000001", "name": "Mathematics", "level": 5}],
        "summary": "Pioneer."
    }"#;

    #[test]
    fn test_stored_resume_deserializes() {
        let resume: Resume = serde_json::from_str(STORED_RESUME).unwrap();
        assert_eq!(resume.template, ResumeTemplate::Creative);
        assert_eq!(resume.personal_info.first_name, "Ada");
        assert_eq!(resume.personal_info.postal_code, "NW1");
        assert_eq!(resume.personal_info.photo_url.as_deref(), Some(""));
        assert!(resume.personal_info.website.is_none());
        assert!(resume.work_experience[0].current);
        assert_eq!(resume.skills[0].level, 5);
    }

    #[test]
    fn test_storage_format_round_trip_is_identity() {
        let resume: Resume = serde_json::from_str(STORED_RESUME).unwrap();
        let encoded = serde_json::to_string(&resume).unwrap();
        let decoded: Resume = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, resume);
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let resume: Resume = serde_json::from_str(STORED_RESUME).unwrap();
        let value = serde_json::to_value(&resume).unwrap();
        assert!(value.get("personalInfo").is_some());
        assert!(value.get("workExperience").is_some());
        assert_eq!(value["template"], "creative");
        assert_eq!(value["workExperience"][0]["startDate"], "1842-01");
    }

    #[test]
    fn test_missing_optional_personal_fields_default() {
        let json = r#"{"id": "6f1c1a8e-3f0a-4b7e-9d54-0c2f3f0e9a11", "personalInfo": {"firstName": "Grace"}}"#;
        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.personal_info.first_name, "Grace");
        assert_eq!(resume.personal_info.email, "");
        assert_eq!(resume.template, ResumeTemplate::Minimal);
        assert!(resume.work_experience.is_empty());
    }

    #[test]
    fn test_empty_resume_is_blank_and_minimal() {
        let resume = Resume::empty();
        assert!(resume.is_blank());
        assert_eq!(resume.template, ResumeTemplate::Minimal);
        assert_ne!(Resume::empty().id, resume.id);
    }

    #[test]
    fn test_merge_overwrites_only_present_fields() {
        let info = PersonalInfo {
            first_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        };
        let merged = info.merged(PersonalInfoPatch {
            email: Some("countess@example.com".to_string()),
            website: Some("ada.dev".to_string()),
            ..Default::default()
        });
        assert_eq!(merged.first_name, "Ada");
        assert_eq!(merged.email, "countess@example.com");
        assert_eq!(merged.website.as_deref(), Some("ada.dev"));
    }

    #[test]
    fn test_full_name_trims_blank_parts() {
        let info = PersonalInfo {
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        assert_eq!(info.full_name(), "Ada");
    }
}
