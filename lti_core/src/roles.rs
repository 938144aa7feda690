//! LIS v2 role vocabulary used in the `roles` claim.
//!
//! The table is a compile-time constant. Lookups return copies of the
//! entries, so the vocabulary can never be mutated at runtime.

use serde::Serialize;

const SYSTEM: &str = "http://purl.imsglobal.org/vocab/lis/v2/system/person#";
const INSTITUTION: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#";
const MEMBERSHIP: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership#";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    System,
    Institution,
    Context,
    ContextSubRole
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleDefinition {
    pub uri: &'static str,
    pub kind: RoleKind,
    pub name: &'static str,
    /// Principal context role URI, for sub-roles.
    pub parent: Option<&'static str>
}

pub mod system {
    pub const ADMINISTRATOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/system/person#Administrator";
    pub const NONE: &str = "http://purl.imsglobal.org/vocab/lis/v2/system/person#None";
    pub const ACCOUNT_ADMIN: &str = "http://purl.imsglobal.org/vocab/lis/v2/system/person#AccountAdmin";
    pub const CREATOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/system/person#Creator";
    pub const SYS_ADMIN: &str = "http://purl.imsglobal.org/vocab/lis/v2/system/person#SysAdmin";
    pub const SYS_SUPPORT: &str = "http://purl.imsglobal.org/vocab/lis/v2/system/person#SysSupport";
    pub const USER: &str = "http://purl.imsglobal.org/vocab/lis/v2/system/person#User";
    /// LTI-specific test user role.
    pub const TEST_USER: &str = "http://purl.imsglobal.org/vocab/lti/system/person#TestUser";
}

pub mod institution {
    pub const ADMINISTRATOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Administrator";
    pub const FACULTY: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Faculty";
    pub const GUEST: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Guest";
    pub const NONE: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#None";
    pub const OTHER: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Other";
    pub const STAFF: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Staff";
    pub const STUDENT: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Student";
    pub const ALUMNI: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Alumni";
    pub const INSTRUCTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Instructor";
    pub const LEARNER: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Learner";
    pub const MEMBER: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Member";
    pub const MENTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Mentor";
    pub const OBSERVER: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Observer";
    pub const PROSPECTIVE_STUDENT: &str = "http://purl.imsglobal.org/vocab/lis/v2/institution/person#ProspectiveStudent";
}

pub mod context {
    pub const ADMINISTRATOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership#Administrator";
    pub const CONTENT_DEVELOPER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership#ContentDeveloper";
    pub const INSTRUCTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership#Instructor";
    pub const LEARNER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership#Learner";
    pub const MENTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership#Mentor";
    pub const MANAGER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership#Manager";
    pub const MEMBER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership#Member";
    pub const OFFICER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership#Officer";
}

/// Sub-roles, grouped by principal context role.
pub mod sub_role {
    pub mod administrator {
        pub const ADMINISTRATOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Administrator#Administrator";
        pub const DEVELOPER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Administrator#Developer";
        pub const EXTERNAL_DEVELOPER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Administrator#ExternalDeveloper";
        pub const EXTERNAL_SUPPORT: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Administrator#ExternalSupport";
        pub const EXTERNAL_SYSTEM_ADMINISTRATOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Administrator#ExternalSystemAdministrator";
        pub const SUPPORT: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Administrator#Support";
        pub const SYSTEM_ADMINISTRATOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Administrator#SystemAdministrator";
    }
    pub mod content_developer {
        pub const CONTENT_DEVELOPER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/ContentDeveloper#ContentDeveloper";
        pub const CONTENT_EXPERT: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/ContentDeveloper#ContentExpert";
        pub const EXTERNAL_CONTENT_EXPERT: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/ContentDeveloper#ExternalContentExpert";
        pub const LIBRARIAN: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/ContentDeveloper#Librarian";
    }
    pub mod instructor {
        pub const EXTERNAL_INSTRUCTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#ExternalInstructor";
        pub const GRADER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#Grader";
        pub const GUEST_INSTRUCTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#GuestInstructor";
        pub const LECTURER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#Lecturer";
        pub const PRIMARY_INSTRUCTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#PrimaryInstructor";
        pub const SECONDARY_INSTRUCTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#SecondaryInstructor";
        pub const TEACHING_ASSISTANT: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#TeachingAssistant";
        pub const TEACHING_ASSISTANT_GROUP: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#TeachingAssistantGroup";
        pub const TEACHING_ASSISTANT_OFFERING: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#TeachingAssistantOffering";
        pub const TEACHING_ASSISTANT_SECTION: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#TeachingAssistantSection";
        pub const TEACHING_ASSISTANT_SECTION_ASSOCIATION: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#TeachingAssistantSectionAssociation";
        pub const TEACHING_ASSISTANT_TEMPLATE: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#TeachingAssistantTemplate";
    }
    pub mod learner {
        pub const EXTERNAL_LEARNER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Learner#ExternalLearner";
        pub const GUEST_LEARNER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Learner#GuestLearner";
        pub const INSTRUCTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Learner#Instructor";
        pub const LEARNER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Learner#Learner";
        pub const NON_CREDIT_LEARNER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Learner#NonCreditLearner";
    }
    pub mod manager {
        pub const AREA_MANAGER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Manager#AreaManager";
        pub const COURSE_COORDINATOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Manager#CourseCoordinator";
        pub const EXTERNAL_OBSERVER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Manager#ExternalObserver";
        pub const MANAGER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Manager#Manager";
        pub const OBSERVER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Manager#Observer";
    }
    pub mod member {
        pub const MEMBER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Member#Member";
    }
    pub mod mentor {
        pub const ADVISOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#Advisor";
        pub const AUDITOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#Auditor";
        pub const EXTERNAL_ADVISOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#ExternalAdvisor";
        pub const EXTERNAL_AUDITOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#ExternalAuditor";
        pub const EXTERNAL_LEARNING_FACILITATOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#ExternalLearningFacilitator";
        pub const EXTERNAL_MENTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#ExternalMentor";
        pub const EXTERNAL_REVIEWER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#ExternalReviewer";
        pub const EXTERNAL_TUTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#ExternalTutor";
        pub const LEARNING_FACILITATOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#LearningFacilitator";
        pub const MENTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#Mentor";
        pub const REVIEWER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#Reviewer";
        pub const TUTOR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Mentor#Tutor";
    }
    pub mod officer {
        pub const CHAIR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Officer#Chair";
        pub const COMMUNICATIONS: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Officer#Communications";
        pub const SECRETARY: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Officer#Secretary";
        pub const TREASURER: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Officer#Treasurer";
        pub const VICE_CHAIR: &str = "http://purl.imsglobal.org/vocab/lis/v2/membership/Officer#Vice-Chair";
    }
}

pub static ROLES: [RoleDefinition; 81] = [
    RoleDefinition {
        uri: system::ADMINISTRATOR,
        kind: RoleKind::System,
        name: "Administrator",
        parent: None
    },
    RoleDefinition {
        uri: system::NONE,
        kind: RoleKind::System,
        name: "None",
        parent: None
    },
    RoleDefinition {
        uri: system::ACCOUNT_ADMIN,
        kind: RoleKind::System,
        name: "AccountAdmin",
        parent: None
    },
    RoleDefinition {
        uri: system::CREATOR,
        kind: RoleKind::System,
        name: "Creator",
        parent: None
    },
    RoleDefinition {
        uri: system::SYS_ADMIN,
        kind: RoleKind::System,
        name: "SysAdmin",
        parent: None
    },
    RoleDefinition {
        uri: system::SYS_SUPPORT,
        kind: RoleKind::System,
        name: "SysSupport",
        parent: None
    },
    RoleDefinition {
        uri: system::USER,
        kind: RoleKind::System,
        name: "User",
        parent: None
    },
    RoleDefinition {
        uri: system::TEST_USER,
        kind: RoleKind::System,
        name: "TestUser",
        parent: None
    },
    RoleDefinition {
        uri: institution::ADMINISTRATOR,
        kind: RoleKind::Institution,
        name: "Administrator",
        parent: None
    },
    RoleDefinition {
        uri: institution::FACULTY,
        kind: RoleKind::Institution,
        name: "Faculty",
        parent: None
    },
    RoleDefinition {
        uri: institution::GUEST,
        kind: RoleKind::Institution,
        name: "Guest",
        parent: None
    },
    RoleDefinition {
        uri: institution::NONE,
        kind: RoleKind::Institution,
        name: "None",
        parent: None
    },
    RoleDefinition {
        uri: institution::OTHER,
        kind: RoleKind::Institution,
        name: "Other",
        parent: None
    },
    RoleDefinition {
        uri: institution::STAFF,
        kind: RoleKind::Institution,
        name: "Staff",
        parent: None
    },
    RoleDefinition {
        uri: institution::STUDENT,
        kind: RoleKind::Institution,
        name: "Student",
        parent: None
    },
    RoleDefinition {
        uri: institution::ALUMNI,
        kind: RoleKind::Institution,
        name: "Alumni",
        parent: None
    },
    RoleDefinition {
        uri: institution::INSTRUCTOR,
        kind: RoleKind::Institution,
        name: "Instructor",
        parent: None
    },
    RoleDefinition {
        uri: institution::LEARNER,
        kind: RoleKind::Institution,
        name: "Learner",
        parent: None
    },
    RoleDefinition {
        uri: institution::MEMBER,
        kind: RoleKind::Institution,
        name: "Member",
        parent: None
    },
    RoleDefinition {
        uri: institution::MENTOR,
        kind: RoleKind::Institution,
        name: "Mentor",
        parent: None
    },
    RoleDefinition {
        uri: institution::OBSERVER,
        kind: RoleKind::Institution,
        name: "Observer",
        parent: None
    },
    RoleDefinition {
        uri: institution::PROSPECTIVE_STUDENT,
        kind: RoleKind::Institution,
        name: "ProspectiveStudent",
        parent: None
    },
    RoleDefinition {
        uri: context::ADMINISTRATOR,
        kind: RoleKind::Context,
        name: "Administrator",
        parent: None
    },
    RoleDefinition {
        uri: context::CONTENT_DEVELOPER,
        kind: RoleKind::Context,
        name: "ContentDeveloper",
        parent: None
    },
    RoleDefinition {
        uri: context::INSTRUCTOR,
        kind: RoleKind::Context,
        name: "Instructor",
        parent: None
    },
    RoleDefinition {
        uri: context::LEARNER,
        kind: RoleKind::Context,
        name: "Learner",
        parent: None
    },
    RoleDefinition {
        uri: context::MENTOR,
        kind: RoleKind::Context,
        name: "Mentor",
        parent: None
    },
    RoleDefinition {
        uri: context::MANAGER,
        kind: RoleKind::Context,
        name: "Manager",
        parent: None
    },
    RoleDefinition {
        uri: context::MEMBER,
        kind: RoleKind::Context,
        name: "Member",
        parent: None
    },
    RoleDefinition {
        uri: context::OFFICER,
        kind: RoleKind::Context,
        name: "Officer",
        parent: None
    },
    RoleDefinition {
        uri: sub_role::administrator::ADMINISTRATOR,
        kind: RoleKind::ContextSubRole,
        name: "Administrator",
        parent: Some(context::ADMINISTRATOR)
    },
    RoleDefinition {
        uri: sub_role::administrator::DEVELOPER,
        kind: RoleKind::ContextSubRole,
        name: "Developer",
        parent: Some(context::ADMINISTRATOR)
    },
    RoleDefinition {
        uri: sub_role::administrator::EXTERNAL_DEVELOPER,
        kind: RoleKind::ContextSubRole,
        name: "ExternalDeveloper",
        parent: Some(context::ADMINISTRATOR)
    },
    RoleDefinition {
        uri: sub_role::administrator::EXTERNAL_SUPPORT,
        kind: RoleKind::ContextSubRole,
        name: "ExternalSupport",
        parent: Some(context::ADMINISTRATOR)
    },
    RoleDefinition {
        uri: sub_role::administrator::EXTERNAL_SYSTEM_ADMINISTRATOR,
        kind: RoleKind::ContextSubRole,
        name: "ExternalSystemAdministrator",
        parent: Some(context::ADMINISTRATOR)
    },
    RoleDefinition {
        uri: sub_role::administrator::SUPPORT,
        kind: RoleKind::ContextSubRole,
        name: "Support",
        parent: Some(context::ADMINISTRATOR)
    },
    RoleDefinition {
        uri: sub_role::administrator::SYSTEM_ADMINISTRATOR,
        kind: RoleKind::ContextSubRole,
        name: "SystemAdministrator",
        parent: Some(context::ADMINISTRATOR)
    },
    RoleDefinition {
        uri: sub_role::content_developer::CONTENT_DEVELOPER,
        kind: RoleKind::ContextSubRole,
        name: "ContentDeveloper",
        parent: Some(context::CONTENT_DEVELOPER)
    },
    RoleDefinition {
        uri: sub_role::content_developer::CONTENT_EXPERT,
        kind: RoleKind::ContextSubRole,
        name: "ContentExpert",
        parent: Some(context::CONTENT_DEVELOPER)
    },
    RoleDefinition {
        uri: sub_role::content_developer::EXTERNAL_CONTENT_EXPERT,
        kind: RoleKind::ContextSubRole,
        name: "ExternalContentExpert",
        parent: Some(context::CONTENT_DEVELOPER)
    },
    RoleDefinition {
        uri: sub_role::content_developer::LIBRARIAN,
        kind: RoleKind::ContextSubRole,
        name: "Librarian",
        parent: Some(context::CONTENT_DEVELOPER)
    },
    RoleDefinition {
        uri: sub_role::instructor::EXTERNAL_INSTRUCTOR,
        kind: RoleKind::ContextSubRole,
        name: "ExternalInstructor",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::instructor::GRADER,
        kind: RoleKind::ContextSubRole,
        name: "Grader",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::instructor::GUEST_INSTRUCTOR,
        kind: RoleKind::ContextSubRole,
        name: "GuestInstructor",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::instructor::LECTURER,
        kind: RoleKind::ContextSubRole,
        name: "Lecturer",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::instructor::PRIMARY_INSTRUCTOR,
        kind: RoleKind::ContextSubRole,
        name: "PrimaryInstructor",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::instructor::SECONDARY_INSTRUCTOR,
        kind: RoleKind::ContextSubRole,
        name: "SecondaryInstructor",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::instructor::TEACHING_ASSISTANT,
        kind: RoleKind::ContextSubRole,
        name: "TeachingAssistant",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::instructor::TEACHING_ASSISTANT_GROUP,
        kind: RoleKind::ContextSubRole,
        name: "TeachingAssistantGroup",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::instructor::TEACHING_ASSISTANT_OFFERING,
        kind: RoleKind::ContextSubRole,
        name: "TeachingAssistantOffering",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::instructor::TEACHING_ASSISTANT_SECTION,
        kind: RoleKind::ContextSubRole,
        name: "TeachingAssistantSection",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::instructor::TEACHING_ASSISTANT_SECTION_ASSOCIATION,
        kind: RoleKind::ContextSubRole,
        name: "TeachingAssistantSectionAssociation",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::instructor::TEACHING_ASSISTANT_TEMPLATE,
        kind: RoleKind::ContextSubRole,
        name: "TeachingAssistantTemplate",
        parent: Some(context::INSTRUCTOR)
    },
    RoleDefinition {
        uri: sub_role::learner::EXTERNAL_LEARNER,
        kind: RoleKind::ContextSubRole,
        name: "ExternalLearner",
        parent: Some(context::LEARNER)
    },
    RoleDefinition {
        uri: sub_role::learner::GUEST_LEARNER,
        kind: RoleKind::ContextSubRole,
        name: "GuestLearner",
        parent: Some(context::LEARNER)
    },
    RoleDefinition {
        uri: sub_role::learner::INSTRUCTOR,
        kind: RoleKind::ContextSubRole,
        name: "Instructor",
        parent: Some(context::LEARNER)
    },
    RoleDefinition {
        uri: sub_role::learner::LEARNER,
        kind: RoleKind::ContextSubRole,
        name: "Learner",
        parent: Some(context::LEARNER)
    },
    RoleDefinition {
        uri: sub_role::learner::NON_CREDIT_LEARNER,
        kind: RoleKind::ContextSubRole,
        name: "NonCreditLearner",
        parent: Some(context::LEARNER)
    },
    RoleDefinition {
        uri: sub_role::manager::AREA_MANAGER,
        kind: RoleKind::ContextSubRole,
        name: "AreaManager",
        parent: Some(context::MANAGER)
    },
    RoleDefinition {
        uri: sub_role::manager::COURSE_COORDINATOR,
        kind: RoleKind::ContextSubRole,
        name: "CourseCoordinator",
        parent: Some(context::MANAGER)
    },
    RoleDefinition {
        uri: sub_role::manager::EXTERNAL_OBSERVER,
        kind: RoleKind::ContextSubRole,
        name: "ExternalObserver",
        parent: Some(context::MANAGER)
    },
    RoleDefinition {
        uri: sub_role::manager::MANAGER,
        kind: RoleKind::ContextSubRole,
        name: "Manager",
        parent: Some(context::MANAGER)
    },
    RoleDefinition {
        uri: sub_role::manager::OBSERVER,
        kind: RoleKind::ContextSubRole,
        name: "Observer",
        parent: Some(context::MANAGER)
    },
    RoleDefinition {
        uri: sub_role::member::MEMBER,
        kind: RoleKind::ContextSubRole,
        name: "Member",
        parent: Some(context::MEMBER)
    },
    RoleDefinition {
        uri: sub_role::mentor::ADVISOR,
        kind: RoleKind::ContextSubRole,
        name: "Advisor",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::mentor::AUDITOR,
        kind: RoleKind::ContextSubRole,
        name: "Auditor",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::mentor::EXTERNAL_ADVISOR,
        kind: RoleKind::ContextSubRole,
        name: "ExternalAdvisor",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::mentor::EXTERNAL_AUDITOR,
        kind: RoleKind::ContextSubRole,
        name: "ExternalAuditor",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::mentor::EXTERNAL_LEARNING_FACILITATOR,
        kind: RoleKind::ContextSubRole,
        name: "ExternalLearningFacilitator",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::mentor::EXTERNAL_MENTOR,
        kind: RoleKind::ContextSubRole,
        name: "ExternalMentor",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::mentor::EXTERNAL_REVIEWER,
        kind: RoleKind::ContextSubRole,
        name: "ExternalReviewer",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::mentor::EXTERNAL_TUTOR,
        kind: RoleKind::ContextSubRole,
        name: "ExternalTutor",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::mentor::LEARNING_FACILITATOR,
        kind: RoleKind::ContextSubRole,
        name: "LearningFacilitator",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::mentor::MENTOR,
        kind: RoleKind::ContextSubRole,
        name: "Mentor",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::mentor::REVIEWER,
        kind: RoleKind::ContextSubRole,
        name: "Reviewer",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::mentor::TUTOR,
        kind: RoleKind::ContextSubRole,
        name: "Tutor",
        parent: Some(context::MENTOR)
    },
    RoleDefinition {
        uri: sub_role::officer::CHAIR,
        kind: RoleKind::ContextSubRole,
        name: "Chair",
        parent: Some(context::OFFICER)
    },
    RoleDefinition {
        uri: sub_role::officer::COMMUNICATIONS,
        kind: RoleKind::ContextSubRole,
        name: "Communications",
        parent: Some(context::OFFICER)
    },
    RoleDefinition {
        uri: sub_role::officer::SECRETARY,
        kind: RoleKind::ContextSubRole,
        name: "Secretary",
        parent: Some(context::OFFICER)
    },
    RoleDefinition {
        uri: sub_role::officer::TREASURER,
        kind: RoleKind::ContextSubRole,
        name: "Treasurer",
        parent: Some(context::OFFICER)
    },
    RoleDefinition {
        uri: sub_role::officer::VICE_CHAIR,
        kind: RoleKind::ContextSubRole,
        name: "Vice-Chair",
        parent: Some(context::OFFICER)
    },
];

/// Looks up a role by its full URI.
pub fn lookup(uri: &str) -> Option<RoleDefinition> {
    ROLES.iter().find(|role| role.uri == uri).copied()
}

/// True for the principal context Mentor role, which scopes `role_scope_mentor`.
pub fn is_mentor(uri: &str) -> bool {
    uri == context::MENTOR
}

pub fn contains_mentor(roles: &[String]) -> bool {
    roles.iter().any(|role| is_mentor(role))
}

/// Expands a short context role name (`Instructor`) to its URI; full URIs pass through.
pub fn expand_context_role(role: &str) -> String {
    if role.contains("://") {
        role.to_string()
    } else {
        format!("{MEMBERSHIP}{role}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_role_uris_are_unique() {
        let uris: HashSet<_> = ROLES.iter().map(|r| r.uri).collect();
        assert_eq!(uris.len(), ROLES.len());
    }

    #[test]
    fn test_prefixes_match_kind() {
        for role in ROLES.iter() {
            match role.kind {
                RoleKind::System => assert!(role.uri.contains("/system/person#")),
                RoleKind::Institution => assert!(role.uri.starts_with(INSTITUTION)),
                RoleKind::Context => assert!(role.uri.starts_with(MEMBERSHIP)),
                RoleKind::ContextSubRole => {
                    assert!(role.uri.starts_with("http://purl.imsglobal.org/vocab/lis/v2/membership/"));
                    let parent = role.parent.expect("sub-role has a parent");
                    assert_eq!(lookup(parent).map(|p| p.kind), Some(RoleKind::Context));
                }
            }
        }
        assert!(system::SYS_ADMIN.starts_with(SYSTEM));
    }

    #[test]
    fn test_mentor_detection() {
        assert!(is_mentor("http://purl.imsglobal.org/vocab/lis/v2/membership#Mentor"));
        assert!(!is_mentor(institution::MENTOR));
        assert!(!is_mentor(sub_role::mentor::MENTOR));
        assert!(contains_mentor(&[context::LEARNER.to_string(), context::MENTOR.to_string()]));
    }

    #[test]
    fn test_lookup_and_expand() {
        assert_eq!(lookup(context::INSTRUCTOR).map(|r| r.name), Some("Instructor"));
        assert!(lookup("http://example.com/role#Nope").is_none());
        assert_eq!(expand_context_role("Learner"), context::LEARNER);
        assert_eq!(expand_context_role(system::ADMINISTRATOR), system::ADMINISTRATOR);
        assert_eq!(
            sub_role::instructor::TEACHING_ASSISTANT,
            "http://purl.imsglobal.org/vocab/lis/v2/membership/Instructor#TeachingAssistant"
        );
        assert_eq!(ROLES.iter().filter(|r| r.kind == RoleKind::Context).count(), 8);
    }
}
