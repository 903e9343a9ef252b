pub mod document;
pub mod resume;

pub use document::StoredResume;
pub use resume::{
    Certification, Education, HasContent, Language, LanguageLevel, PersonalDetails, Project,
    ResumeData, Skill, SkillLevel, WorkExperience,
};
