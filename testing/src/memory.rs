use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use errors::DataServiceError;
use lti_core::{
    Attempt, Context, DataResult, Deployment, Grade, LineItem, LtiDataService, Membership,
    Platform, ResourceLink, Tool, User
};
use tokio::sync::RwLock;

type UserInContext = (String, Option<String>);

/// Hash-map backed [`LtiDataService`].
///
/// Every trait method counts its calls under its own name (for example
/// `"get_line_items"`), so tests can assert which lookups a launch issued.
/// A method registered with [`Self::fail`] returns
/// `DataServiceError::Unavailable` instead of reading.
#[derive(Default)]
pub struct InMemoryDataService {
    tools: RwLock<HashMap<String, Tool>>,
    deployments: RwLock<HashMap<String, Deployment>>,
    contexts: RwLock<HashMap<String, Context>>,
    resource_links: RwLock<HashMap<String, ResourceLink>>,
    users: RwLock<HashMap<String, User>>,
    platforms: RwLock<HashMap<String, Platform>>,
    roles: RwLock<HashMap<UserInContext, Vec<String>>>,
    mentored: RwLock<HashMap<UserInContext, Vec<String>>>,
    memberships: RwLock<HashMap<(String, String), Membership>>,
    line_items: RwLock<Vec<LineItem>>,
    grades: RwLock<HashMap<(String, String), Grade>>,
    attempts: RwLock<HashMap<(String, String), Attempt>>,
    failures: Mutex<HashMap<&'static str, String>>,
    calls: Mutex<HashMap<&'static str, usize>>
}

impl InMemoryDataService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored by client id.
    #[must_use]
    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.get_mut().insert(tool.client_id.clone(), tool);
        self
    }

    #[must_use]
    pub fn with_deployment(mut self, deployment: Deployment) -> Self {
        self.deployments
            .get_mut()
            .insert(deployment.id.clone(), deployment);
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.get_mut().insert(context.id.clone(), context);
        self
    }

    #[must_use]
    pub fn with_resource_link(mut self, link: ResourceLink) -> Self {
        self.resource_links.get_mut().insert(link.id.clone(), link);
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.users.get_mut().insert(user.id.clone(), user);
        self
    }

    #[must_use]
    pub fn with_platform(mut self, client_id: &str, platform: Platform) -> Self {
        self.platforms
            .get_mut()
            .insert(client_id.to_string(), platform);
        self
    }

    #[must_use]
    pub fn with_roles(mut self, user_id: &str, context_id: Option<&str>, roles: Vec<String>) -> Self {
        self.roles
            .get_mut()
            .insert(key(user_id, context_id), roles);
        self
    }

    #[must_use]
    pub fn with_mentored_users(
        mut self,
        user_id: &str,
        context_id: Option<&str>,
        mentored: Vec<String>,
    ) -> Self {
        self.mentored
            .get_mut()
            .insert(key(user_id, context_id), mentored);
        self
    }

    #[must_use]
    pub fn with_membership(mut self, membership: Membership) -> Self {
        self.memberships.get_mut().insert(
            (membership.context_id.clone(), membership.user_id.clone()),
            membership
        );
        self
    }

    #[must_use]
    pub fn with_line_item(mut self, line_item: LineItem) -> Self {
        self.line_items.get_mut().push(line_item);
        self
    }

    #[must_use]
    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grades
            .get_mut()
            .insert((grade.line_item_id.clone(), grade.user_id.clone()), grade);
        self
    }

    #[must_use]
    pub fn with_attempt(mut self, attempt: Attempt) -> Self {
        self.attempts.get_mut().insert(
            (attempt.resource_link_id.clone(), attempt.user_id.clone()),
            attempt
        );
        self
    }

    /// Makes every later call to `method` fail.
    pub fn fail(&self, method: &'static str, reason: impl Into<String>) {
        lock(&self.failures).insert(method, reason.into());
    }

    /// Number of calls made to `method` so far.
    pub fn calls(&self, method: &str) -> usize {
        lock(&self.calls).get(method).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        lock(&self.calls).values().sum()
    }

    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }

    fn record(&self, method: &'static str) -> DataResult<()> {
        *lock(&self.calls).entry(method).or_insert(0) += 1;
        match lock(&self.failures).get(method) {
            Some(reason) => {
                tracing::debug!(method, "Injected data service failure");
                Err(DataServiceError::Unavailable {
                    reason: reason.clone()
                })
            }
            None => Ok(())
        }
    }
}

fn key(user_id: &str, context_id: Option<&str>) -> UserInContext {
    (user_id.to_string(), context_id.map(str::to_string))
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[async_trait]
impl LtiDataService for InMemoryDataService {
    async fn get_tool_by_client_id(&self, client_id: &str) -> DataResult<Option<Tool>> {
        self.record("get_tool_by_client_id")?;
        Ok(self.tools.read().await.get(client_id).cloned())
    }

    async fn get_deployment(&self, deployment_id: &str) -> DataResult<Option<Deployment>> {
        self.record("get_deployment")?;
        Ok(self.deployments.read().await.get(deployment_id).cloned())
    }

    async fn get_context(&self, context_id: &str) -> DataResult<Option<Context>> {
        self.record("get_context")?;
        Ok(self.contexts.read().await.get(context_id).cloned())
    }

    async fn get_resource_link(&self, resource_link_id: &str) -> DataResult<Option<ResourceLink>> {
        self.record("get_resource_link")?;
        Ok(self.resource_links.read().await.get(resource_link_id).cloned())
    }

    async fn get_user(&self, user_id: &str) -> DataResult<Option<User>> {
        self.record("get_user")?;
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn get_platform(&self, client_id: &str) -> DataResult<Option<Platform>> {
        self.record("get_platform")?;
        Ok(self.platforms.read().await.get(client_id).cloned())
    }

    async fn get_roles(&self, user_id: &str, context_id: Option<&str>) -> DataResult<Vec<String>> {
        self.record("get_roles")?;
        Ok(self
            .roles
            .read()
            .await
            .get(&key(user_id, context_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_mentored_user_ids(
        &self,
        user_id: &str,
        context_id: Option<&str>,
    ) -> DataResult<Vec<String>> {
        self.record("get_mentored_user_ids")?;
        Ok(self
            .mentored
            .read()
            .await
            .get(&key(user_id, context_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_membership(&self, context_id: &str, user_id: &str) -> DataResult<Option<Membership>> {
        self.record("get_membership")?;
        Ok(self
            .memberships
            .read()
            .await
            .get(&(context_id.to_string(), user_id.to_string()))
            .cloned())
    }

    async fn get_line_items(
        &self,
        context_id: &str,
        resource_link_id: &str,
    ) -> DataResult<Vec<LineItem>> {
        self.record("get_line_items")?;
        Ok(self
            .line_items
            .read()
            .await
            .iter()
            .filter(|item| {
                item.context_id == context_id
                    && item.resource_link_id.as_deref() == Some(resource_link_id)
            })
            .cloned()
            .collect())
    }

    async fn get_grade(&self, line_item_id: &str, user_id: &str) -> DataResult<Option<Grade>> {
        self.record("get_grade")?;
        Ok(self
            .grades
            .read()
            .await
            .get(&(line_item_id.to_string(), user_id.to_string()))
            .cloned())
    }

    async fn get_attempt(&self, resource_link_id: &str, user_id: &str) -> DataResult<Option<Attempt>> {
        self.record("get_attempt")?;
        Ok(self
            .attempts
            .read()
            .await
            .get(&(resource_link_id.to_string(), user_id.to_string()))
            .cloned())
    }
}
