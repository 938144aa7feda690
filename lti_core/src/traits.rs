//! The data layer the launch core reads from.
//!
//! Persistence lives outside this workspace; implementations adapt whatever
//! store the platform uses. Every lookup is by id, and absent rows are `Ok(None)`
//! rather than errors.

use async_trait::async_trait;
use errors::DataServiceError;

use crate::types::{
    Attempt, Context, Deployment, Grade, LineItem, Membership, Platform, ResourceLink, Tool, User,
};

pub type DataResult<T> = Result<T, DataServiceError>;

/// Read-only access to tools, placements, people and grading records.
///
/// Dropping a returned future cancels the call; implementations must not
/// leave partial state behind when that happens.
#[async_trait]
pub trait LtiDataService: Send + Sync {
    async fn get_tool_by_client_id(&self, client_id: &str) -> DataResult<Option<Tool>>;

    async fn get_deployment(&self, deployment_id: &str) -> DataResult<Option<Deployment>>;

    async fn get_context(&self, context_id: &str) -> DataResult<Option<Context>>;

    async fn get_resource_link(&self, resource_link_id: &str) -> DataResult<Option<ResourceLink>>;

    async fn get_user(&self, user_id: &str) -> DataResult<Option<User>>;

    /// Platform descriptor presented to the tool with this client id.
    async fn get_platform(&self, client_id: &str) -> DataResult<Option<Platform>>;

    /// Effective role URIs for the user, including system and institution roles.
    async fn get_roles(&self, user_id: &str, context_id: Option<&str>) -> DataResult<Vec<String>>;

    async fn get_mentored_user_ids(
        &self,
        user_id: &str,
        context_id: Option<&str>,
    ) -> DataResult<Vec<String>>;

    async fn get_membership(&self, context_id: &str, user_id: &str)
    -> DataResult<Option<Membership>>;

    /// Line items of the context bound to the given resource link.
    async fn get_line_items(
        &self,
        context_id: &str,
        resource_link_id: &str,
    ) -> DataResult<Vec<LineItem>>;

    async fn get_grade(&self, line_item_id: &str, user_id: &str) -> DataResult<Option<Grade>>;

    async fn get_attempt(&self, resource_link_id: &str, user_id: &str)
    -> DataResult<Option<Attempt>>;
}
