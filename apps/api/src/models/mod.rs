pub mod resume;

pub use resume::{
    EducationItem, ListItem, PersonalInfo, PersonalInfoPatch, Resume, ResumeTemplate, SkillItem,
    WorkExperienceItem,
};
