//! # Authorization Request Flow
//!
//! The platform half of the OIDC third-party initiated login: validates the
//! authentication request a tool sends back after initiation, then resolves
//! and assembles the launch it names.
//!
//! HTTP handling and id_token signing live outside this crate. The output
//! is the claims set for the signer plus where to post it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use config::PlatformConfig;
use errors::LaunchError;
use lti_core::claims as claim;
use lti_core::{LtiDataService, Tool};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::assembler::{ClaimsAssembler, ClaimsDocument};
use crate::scope::MessageScopeResolver;
use crate::telemetry::Telemetry;
use crate::urls::UrlBuilder;

/// Query or form parameters of the OIDC authentication request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub response_type: String,
    #[serde(default)]
    pub response_mode: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub redirect_uri: String,
    #[serde(default)]
    pub login_hint: String,
    #[serde(default)]
    pub lti_message_hint: Option<String>,
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    pub state: Option<String>
}

/// An authorized launch, ready for signing and form-posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorizedLaunch {
    pub redirect_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub claims: ClaimsDocument
}

/// Entry point composing resolution, assembly and URL building.
///
/// # M-CANONICAL-DOCS
///
/// ## Usage
/// ```rust,ignore
/// let service = LaunchService::new(data, Arc::new(PlatformConfig::new(settings)?));
/// let launch = service.authorize(&request).await?;
/// sign_and_post(&launch.redirect_uri, &launch.claims, launch.state.as_deref());
/// ```
#[derive(Clone)]
pub struct LaunchService {
    data: Arc<dyn LtiDataService>,
    config: Arc<PlatformConfig>,
    resolver: MessageScopeResolver,
    assembler: ClaimsAssembler
}

impl LaunchService {
    pub fn new(data: Arc<dyn LtiDataService>, config: Arc<PlatformConfig>) -> Self {
        Self {
            resolver: MessageScopeResolver::new(data.clone()),
            assembler: ClaimsAssembler::new(data.clone(), config.clone()),
            data,
            config
        }
    }

    pub fn resolver(&self) -> &MessageScopeResolver {
        &self.resolver
    }

    pub fn assembler(&self) -> &ClaimsAssembler {
        &self.assembler
    }

    pub fn urls(&self) -> &UrlBuilder {
        self.assembler.urls()
    }

    pub async fn authorize(&self, request: &AuthorizationRequest) -> Result<AuthorizedLaunch, LaunchError> {
        self.authorize_at(request, Utc::now()).await
    }

    /// [`Self::authorize`] with an explicit issue time.
    #[instrument(skip(self, request, issued_at), fields(client_id = %request.client_id))]
    pub async fn authorize_at(
        &self,
        request: &AuthorizationRequest,
        issued_at: DateTime<Utc>,
    ) -> Result<AuthorizedLaunch, LaunchError> {
        let (tool, message_hint) = self.authenticate(request).await.map_err(recorded)?;

        let scope = self
            .resolver
            .resolve_hints(tool, &request.login_hint, message_hint)
            .await
            .map_err(recorded)?;

        let mut claims = self.assembler.assemble(&scope).await?;

        let lifetime = self.config.token_lifetime().as_secs() as i64;
        let iat = issued_at.timestamp();
        claims.insert_new(claim::ISS, Value::String(self.config.issuer().to_string()));
        claims.insert_new(claim::AUD, Value::String(scope.tool().client_id.clone()));
        claims.insert_new(claim::AZP, Value::String(scope.tool().client_id.clone()));
        claims.insert_new(claim::NONCE, Value::String(request.nonce.clone()));
        claims.insert_new(claim::IAT, Value::from(iat));
        claims.insert_new(claim::EXP, Value::from(iat + lifetime));

        info!(
            tool_id = %scope.tool().id,
            message_type = %scope.message_type(),
            "Authorized launch"
        );

        Ok(AuthorizedLaunch {
            redirect_uri: request.redirect_uri.clone(),
            state: request.state.clone(),
            claims
        })
    }

    /// Checks the fixed OIDC parameters, then the client and its redirect URI.
    async fn authenticate<'r>(
        &self,
        request: &'r AuthorizationRequest,
    ) -> Result<(Tool, &'r str), LaunchError> {
        if !request.scope.split_whitespace().any(|s| s == "openid") {
            return Err(invalid("scope", "must include openid"));
        }
        expect_value("response_type", &request.response_type, "id_token")?;
        expect_value("response_mode", &request.response_mode, "form_post")?;
        expect_value("prompt", &request.prompt, "none")?;
        if request.nonce.is_empty() {
            return Err(invalid("nonce", "is required"));
        }
        if request.login_hint.is_empty() {
            return Err(invalid("login_hint", "is required"));
        }
        let message_hint = request
            .lti_message_hint
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("lti_message_hint", "is required"))?;

        let tool = self
            .data
            .get_tool_by_client_id(&request.client_id)
            .await
            .map_err(|e| LaunchError::upstream("get_tool_by_client_id", e))?
            .ok_or_else(|| LaunchError::UnknownClient {
                client_id: request.client_id.clone()
            })?;

        if !tool.accepts_redirect(&request.redirect_uri) {
            return Err(invalid("redirect_uri", "is not registered for this client"));
        }

        Ok((tool, message_hint))
    }
}

fn expect_value(parameter: &'static str, actual: &str, expected: &str) -> Result<(), LaunchError> {
    if actual == expected {
        Ok(())
    } else {
        Err(invalid(parameter, format!("expected {expected}, got {actual:?}")))
    }
}

fn invalid(parameter: &'static str, reason: impl Into<String>) -> LaunchError {
    LaunchError::InvalidAuthorizationRequest {
        parameter,
        reason: reason.into()
    }
}

fn recorded(error: LaunchError) -> LaunchError {
    Telemetry::record_failure(error.kind());
    warn!(error = %error, "Launch authorization failed");
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_value() {
        assert!(expect_value("prompt", "none", "none").is_ok());
        let err = expect_value("prompt", "login", "none").unwrap_err();
        assert!(matches!(
            err,
            LaunchError::InvalidAuthorizationRequest {
                parameter: "prompt",
                ..
            }
        ));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_request_deserializes_from_form_fields() {
        let request: AuthorizationRequest = serde_json::from_value(serde_json::json!({
            "scope": "openid",
            "response_type": "id_token",
            "client_id": "client-1",
            "nonce": "n-0S6_WzA2Mj"
        }))
        .unwrap();
        assert_eq!(request.client_id, "client-1");
        assert!(request.lti_message_hint.is_none());
        assert!(request.prompt.is_empty());
    }
}
