//! Claim URIs and scope URIs of the LTI 1.3 / LTI Advantage vocabulary.
//!
//! These strings are JSON keys in the launch payload and must be reproduced
//! verbatim.

pub const LTI_VERSION: &str = "1.3.0";

pub const MESSAGE_TYPE: &str = "https://purl.imsglobal.org/spec/lti/claim/message_type";
pub const VERSION: &str = "https://purl.imsglobal.org/spec/lti/claim/version";
pub const DEPLOYMENT_ID: &str = "https://purl.imsglobal.org/spec/lti/claim/deployment_id";
pub const TARGET_LINK_URI: &str = "https://purl.imsglobal.org/spec/lti/claim/target_link_uri";
pub const RESOURCE_LINK: &str = "https://purl.imsglobal.org/spec/lti/claim/resource_link";
pub const CONTEXT: &str = "https://purl.imsglobal.org/spec/lti/claim/context";
pub const TOOL_PLATFORM: &str = "https://purl.imsglobal.org/spec/lti/claim/tool_platform";
pub const ROLES: &str = "https://purl.imsglobal.org/spec/lti/claim/roles";
pub const ROLE_SCOPE_MENTOR: &str = "https://purl.imsglobal.org/spec/lti/claim/role_scope_mentor";
pub const LAUNCH_PRESENTATION: &str =
    "https://purl.imsglobal.org/spec/lti/claim/launch_presentation";
pub const CUSTOM: &str = "https://purl.imsglobal.org/spec/lti/claim/custom";

pub const DEEP_LINKING_SETTINGS: &str =
    "https://purl.imsglobal.org/spec/lti-dl/claim/deep_linking_settings";

pub const AGS_ENDPOINT: &str = "https://purl.imsglobal.org/spec/lti-ags/claim/endpoint";
pub const NRPS_SERVICE: &str = "https://purl.imsglobal.org/spec/lti-nrps/claim/namesroleservice";

/// OIDC identity claims.
pub const SUB: &str = "sub";
pub const NAME: &str = "name";
pub const GIVEN_NAME: &str = "given_name";
pub const FAMILY_NAME: &str = "family_name";
pub const EMAIL: &str = "email";
pub const PICTURE: &str = "picture";
pub const LOCALE: &str = "locale";

/// ID token envelope claims.
pub const ISS: &str = "iss";
pub const AUD: &str = "aud";
pub const AZP: &str = "azp";
pub const NONCE: &str = "nonce";
pub const IAT: &str = "iat";
pub const EXP: &str = "exp";

/// Assignment and Grade Services scopes.
pub mod ags_scope {
    pub const LINE_ITEM: &str = "https://purl.imsglobal.org/spec/lti-ags/scope/lineitem";
    pub const LINE_ITEM_READONLY: &str =
        "https://purl.imsglobal.org/spec/lti-ags/scope/lineitem.readonly";
    pub const RESULT_READONLY: &str =
        "https://purl.imsglobal.org/spec/lti-ags/scope/result.readonly";
    pub const SCORE: &str = "https://purl.imsglobal.org/spec/lti-ags/scope/score";

    pub const ALL: [&str; 4] = [LINE_ITEM, LINE_ITEM_READONLY, RESULT_READONLY, SCORE];
}

/// Names and Role Provisioning Services scopes.
pub mod nrps_scope {
    pub const CONTEXT_MEMBERSHIP_READONLY: &str =
        "https://purl.imsglobal.org/spec/lti-nrps/scope/contextmembership.readonly";

    pub const ALL: [&str; 1] = [CONTEXT_MEMBERSHIP_READONLY];
}

pub const NRPS_SERVICE_VERSIONS: [&str; 1] = ["2.0"];

/// Deep linking content item types.
pub mod content_item {
    pub const LINK: &str = "link";
    pub const FILE: &str = "file";
    pub const HTML: &str = "html";
    pub const LTI_RESOURCE_LINK: &str = "ltiResourceLink";
    pub const IMAGE: &str = "image";
}

/// Launch presentation document targets.
pub mod document_target {
    pub const IFRAME: &str = "iframe";
    pub const WINDOW: &str = "window";
    pub const EMBED: &str = "embed";
}
