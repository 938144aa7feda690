//! One tool, deployed once, placed once in one course.
//!
//! Ids: tool `tool-1` (client `client-1`), deployment `dep-1`, context
//! `ctx-1`, resource link `rl-1`, user `user-1`.

use chrono::{TimeZone, Utc};
use lti_core::claims::{ags_scope, nrps_scope};
use lti_core::roles::context::LEARNER;
use lti_core::{
    Context, CustomPermissions, CustomVariableMap, Deployment, LineItem, Platform, ResourceLink,
    Tool, User, UserPermissions
};

use crate::InMemoryDataService;

pub const REDIRECT_URI: &str = "https://tool.example/callback";

pub fn tool() -> Tool {
    Tool {
        id: "tool-1".to_string(),
        client_id: "client-1".to_string(),
        name: "Example Tool".to_string(),
        launch_url: "https://tool.example/launch".to_string(),
        deep_link_url: None,
        oidc_initiation_url: "https://tool.example/login".to_string(),
        redirect_urls: vec![REDIRECT_URI.to_string()],
        service_scopes: vec![],
        custom: CustomVariableMap::new(),
        custom_permissions: CustomPermissions::allow_all(),
        user_permissions: UserPermissions::allow_all()
    }
}

/// [`tool`] granted every AGS and NRPS scope.
pub fn tool_with_services() -> Tool {
    let mut tool = tool();
    tool.service_scopes = ags_scope::ALL
        .iter()
        .chain(nrps_scope::ALL.iter())
        .map(|s| (*s).to_string())
        .collect();
    tool
}

pub fn deployment() -> Deployment {
    Deployment {
        id: "dep-1".to_string(),
        tool_id: "tool-1".to_string(),
        custom: CustomVariableMap::new()
    }
}

pub fn context() -> Context {
    Context {
        id: "ctx-1".to_string(),
        deployment_id: "dep-1".to_string(),
        label: Some("BIO-101".to_string()),
        title: Some("Introduction to Biology".to_string()),
        types: vec!["http://purl.imsglobal.org/vocab/lis/v2/course#CourseOffering".to_string()]
    }
}

pub fn resource_link() -> ResourceLink {
    ResourceLink {
        id: "rl-1".to_string(),
        context_id: "ctx-1".to_string(),
        url: None,
        title: Some("Week 1 Quiz".to_string()),
        text: Some("Cell structure".to_string()),
        custom: CustomVariableMap::new(),
        available_start_date_time: Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).single(),
        available_end_date_time: None,
        submission_start_date_time: None,
        submission_end_date_time: Utc.with_ymd_and_hms(2024, 9, 9, 23, 59, 0).single()
    }
}

pub fn user() -> User {
    User {
        id: "user-1".to_string(),
        name: Some("Ada Lovelace".to_string()),
        given_name: Some("Ada".to_string()),
        family_name: Some("Lovelace".to_string()),
        email: Some("ada@example.edu".to_string()),
        image: None,
        locale: Some("en-GB".to_string()),
        username: Some("alovelace".to_string()),
        orgs: vec!["org-1".to_string()],
        grade_levels: vec![]
    }
}

pub fn platform() -> Platform {
    Platform {
        guid: "platform-guid-1".to_string(),
        contact_email: Some("lti-admin@example.edu".to_string()),
        description: None,
        name: Some("Example LMS".to_string()),
        url: Some("https://lms.example.com".to_string()),
        product_family_code: Some("example-lms".to_string()),
        version: Some("2024.1".to_string())
    }
}

pub fn line_item(id: &str) -> LineItem {
    LineItem {
        id: id.to_string(),
        context_id: "ctx-1".to_string(),
        resource_link_id: Some("rl-1".to_string()),
        label: "Week 1 Quiz".to_string(),
        score_maximum: 10.0,
        grades_released_date_time: None
    }
}

/// A data service holding every fixture, with `user-1` as a learner.
pub fn service() -> InMemoryDataService {
    InMemoryDataService::new()
        .with_tool(tool())
        .with_deployment(deployment())
        .with_context(context())
        .with_resource_link(resource_link())
        .with_user(user())
        .with_roles(
            "user-1",
            Some("ctx-1"),
            vec![LEARNER.to_string()]
        )
}
