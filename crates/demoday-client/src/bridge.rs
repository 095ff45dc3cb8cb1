//! The production `DataBridge`
//!
//! Wires the app core to the real collaborators: collections read from
//! the realtime database (scope-pathed nodes, child-ordered queries,
//! WebSocket registrations), mutations go through the REST backend,
//! sessions through the identity provider, uploads through object
//! storage. One background task keeps the access token fresh and fans the
//! refresh out via the session store.

use crate::{
    config::ClientConfig,
    errors::map_api_error,
    session_store::SessionStore,
    sources::RealtimeSource,
};
use async_trait::async_trait;
use demoday_api::{
    resources::{self, NewAdminInvite, NewCourse, RequestDecision, UpdateUser},
    ApiClient, IdentityClient, StorageClient, TokenBundle,
};
use demoday_app::{
    bridge::DataBridge,
    core::{AuthEvent, Session},
    errors::AppError,
    store::{CollectionSource, Keyed},
    views::{
        AccessRequest, Activity, AdminInvite, ForumThread, GroupAdmin, JoinRequest, Notice, Offer,
        Pledge, ProfileUpdate, ResourcePage, Sector, UserProfile,
    },
};
use demoday_core::{
    CourseId, InviteId, NoticeId, RequestId, Scope, SectorId, TimeStamp, UserId,
};
use demoday_realtime::{NodePath, Query, RealtimeClient};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use tokio::{sync::broadcast, task::JoinHandle};
use url::Url;

/// Refresh this long before the token actually expires.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Production bridge over the four collaborators.
pub struct PlatformBridge {
    api: ApiClient,
    identity: IdentityClient,
    storage: StorageClient,
    realtime: RealtimeClient,
    sessions: Arc<SessionStore>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl PlatformBridge {
    /// Build every client from the configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let parse = |name: &str, raw: &str| {
            Url::parse(raw).map_err(|e| AppError::internal("config", format!("{name}: {e}")))
        };
        let sessions = Arc::new(SessionStore::new());

        let api = ApiClient::new(parse("api_url", &config.api_url)?, sessions.clone())
            .map_err(map_api_error)?;
        let identity = IdentityClient::new(parse("identity_url", &config.identity_url)?)
            .map_err(map_api_error)?;
        let storage = StorageClient::new(parse("storage_url", &config.storage_url)?, sessions.clone())
            .map_err(map_api_error)?;
        let realtime = RealtimeClient::new(
            parse("realtime_http_url", &config.realtime_http_url)?,
            parse("realtime_ws_url", &config.realtime_ws_url)?,
            sessions.clone(),
        )
        .map_err(crate::errors::map_realtime_error)?;

        Ok(Self {
            api,
            identity,
            storage,
            realtime,
            sessions,
            refresh_task: Mutex::new(None),
        })
    }

    /// The session store (shared with frontends that need raw tokens).
    pub fn sessions(&self) -> Arc<SessionStore> {
        self.sessions.clone()
    }

    fn require_scope(&self) -> Result<Scope, AppError> {
        self.sessions
            .scope()
            .ok_or_else(|| AppError::internal("bridge", "no active session"))
    }

    fn require_user(&self) -> Result<UserId, AppError> {
        self.sessions
            .user_id()
            .ok_or_else(|| AppError::internal("bridge", "no active session"))
    }

    fn scope_node(scope: &Scope, collection: &str) -> Result<NodePath, AppError> {
        let raw = match scope.course {
            Some(course) => format!(
                "groups/{}/courses/{}/{collection}",
                scope.group.uuid(),
                course.uuid()
            ),
            None => format!("groups/{}/{collection}", scope.group.uuid()),
        };
        NodePath::new(raw).map_err(crate::errors::map_realtime_error)
    }

    fn scoped_source<T>(
        &self,
        scope: &Scope,
        collection: &str,
        order_by: &str,
    ) -> Box<dyn CollectionSource<T>>
    where
        T: Keyed + DeserializeOwned + Send + Sync + 'static,
    {
        let query = Self::scope_node(scope, collection).map(|path| Query::at(path).order_by(order_by));
        Box::new(RealtimeSource::new(self.realtime.clone(), query))
    }

    fn rooted_source<T>(&self, raw_path: &str, order_by: &str) -> Box<dyn CollectionSource<T>>
    where
        T: Keyed + DeserializeOwned + Send + Sync + 'static,
    {
        let query = NodePath::new(raw_path)
            .map_err(crate::errors::map_realtime_error)
            .map(|path| Query::at(path).order_by(order_by));
        Box::new(RealtimeSource::new(self.realtime.clone(), query))
    }

    fn map_user(user: resources::ApiUser) -> UserProfile {
        UserProfile {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            admin_level: user.admin_level,
            scope: Scope {
                group: user.group_id,
                course: user.course_id,
            },
            sector_id: user.sector_id,
            bio: user.bio,
            photo_url: user.photo_url,
            website: user.website,
        }
    }

    /// Keep the access token fresh until sign-out. A failed refresh ends
    /// the session (the provider has revoked us); the store broadcast
    /// tells the core.
    fn start_token_refresh(&self, bundle: &TokenBundle) {
        let identity = self.identity.clone();
        let sessions = self.sessions.clone();
        let mut expires_in = Duration::from_secs(bundle.expires_in);

        let task = tokio::spawn(async move {
            loop {
                let wait = expires_in.saturating_sub(TOKEN_REFRESH_MARGIN);
                tokio::time::sleep(wait).await;
                let Some(refresh_token) = sessions.refresh_token() else {
                    break;
                };
                match identity.refresh(&refresh_token).await {
                    Ok(bundle) => {
                        tracing::debug!("access token refreshed");
                        sessions.replace_access_token(bundle.id_token.clone());
                        expires_in = Duration::from_secs(bundle.expires_in);
                    }
                    Err(error) => {
                        tracing::warn!(%error, "token refresh failed; ending session");
                        sessions.clear();
                        break;
                    }
                }
            }
        });

        if let Some(previous) = self.refresh_task.lock().replace(task) {
            previous.abort();
        }
    }

    fn stop_token_refresh(&self) {
        if let Some(task) = self.refresh_task.lock().take() {
            task.abort();
        }
    }
}

#[async_trait]
impl DataBridge for PlatformBridge {
    fn activities(&self, scope: &Scope) -> Box<dyn CollectionSource<Activity>> {
        self.scoped_source(scope, "activities", "occurred_at")
    }

    fn pledges(&self, scope: &Scope) -> Box<dyn CollectionSource<Pledge>> {
        self.scoped_source(scope, "pledges", "pledged_at")
    }

    fn notices(&self, user: UserId) -> Box<dyn CollectionSource<Notice>> {
        self.rooted_source(&format!("users/{}/notices", user.uuid()), "created_at")
    }

    fn join_requests(&self, scope: &Scope) -> Box<dyn CollectionSource<JoinRequest>> {
        self.scoped_source(scope, "join-requests", "created_at")
    }

    fn access_requests(&self, scope: &Scope) -> Box<dyn CollectionSource<AccessRequest>> {
        self.scoped_source(scope, "access-requests", "created_at")
    }

    fn group_admins(&self, scope: &Scope) -> Box<dyn CollectionSource<GroupAdmin>> {
        // Admin rosters always hang off the group, never a course.
        self.rooted_source(
            &format!("groups/{}/admins", scope.group.uuid()),
            "since",
        )
    }

    fn admin_invites(&self, scope: &Scope) -> Box<dyn CollectionSource<AdminInvite>> {
        self.rooted_source(
            &format!("groups/{}/admin-invites", scope.group.uuid()),
            "created_at",
        )
    }

    fn forum_threads(&self, scope: &Scope) -> Box<dyn CollectionSource<ForumThread>> {
        self.scoped_source(scope, "forum-threads", "last_post_at")
    }

    fn offers(&self, scope: &Scope) -> Box<dyn CollectionSource<Offer>> {
        self.scoped_source(scope, "offers", "updated_at")
    }

    fn sectors(&self) -> Box<dyn CollectionSource<Sector>> {
        self.rooted_source("catalog/sectors", "ordinal")
    }

    async fn respond_access_request(&self, id: RequestId, approve: bool) -> Result<(), AppError> {
        let decision = if approve {
            RequestDecision::Approve
        } else {
            RequestDecision::Deny
        };
        self.api
            .access_requests()
            .respond(id, decision)
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }

    async fn respond_join_request(&self, id: RequestId, approve: bool) -> Result<(), AppError> {
        // Join requests ride the access-request routes with a course set.
        self.respond_access_request(id, approve).await
    }

    async fn invite_course_admin(&self, email: &str, course: CourseId) -> Result<(), AppError> {
        let scope = self.require_scope()?;
        self.api
            .admin_invites()
            .create(&NewAdminInvite {
                email: email.to_string(),
                group_id: scope.group,
                course_id: course,
            })
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }

    async fn revoke_admin_invite(&self, id: InviteId) -> Result<(), AppError> {
        self.api
            .admin_invites()
            .revoke(id)
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }

    async fn create_sector(&self, name: &str) -> Result<(), AppError> {
        self.api
            .system_attributes()
            .create_sector(name)
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }

    async fn rename_sector(&self, id: SectorId, name: &str) -> Result<(), AppError> {
        self.api
            .system_attributes()
            .rename_sector(id, name)
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }

    async fn delete_sector(&self, id: SectorId) -> Result<(), AppError> {
        self.api
            .system_attributes()
            .delete_sector(id)
            .await
            .map_err(map_api_error)
    }

    async fn create_course(&self, name: &str) -> Result<(), AppError> {
        let scope = self.require_scope()?;
        self.api
            .courses()
            .create(&NewCourse {
                group_id: scope.group,
                name: name.to_string(),
            })
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }

    async fn mark_notice_read(&self, id: NoticeId) -> Result<(), AppError> {
        let user = self.require_user()?;
        self.api
            .users()
            .mark_notice_read(user, id)
            .await
            .map_err(map_api_error)
    }

    async fn update_profile(
        &self,
        user: UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AppError> {
        let body = UpdateUser {
            display_name: update.display_name.clone(),
            bio: update.bio.clone(),
            sector_id: update.sector_id,
            photo_url: update.photo_url.clone(),
            website: update.website.clone(),
        };
        self.api
            .users()
            .update(user, &body)
            .await
            .map(Self::map_user)
            .map_err(map_api_error)
    }

    async fn upload_avatar(
        &self,
        user: UserId,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let extension = match content_type {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            other => {
                return Err(AppError::validation(
                    "photo",
                    format!("unsupported image type: {other}"),
                ));
            }
        };
        let path = format!("avatars/{}.{extension}", user.uuid());
        self.storage
            .upload(&path, bytes, content_type)
            .await
            .map(|url| url.to_string())
            .map_err(map_api_error)
    }

    async fn fetch_resource_pages(&self) -> Result<Vec<ResourcePage>, AppError> {
        let pages = self
            .api
            .system_attributes()
            .resource_pages()
            .await
            .map_err(map_api_error)?;
        Ok(pages
            .into_iter()
            .map(|page| ResourcePage {
                slug: page.slug,
                title: page.title,
                body: page.body,
                updated_at: page.updated_at,
            })
            .collect())
    }

    async fn save_resource_page(&self, page: &ResourcePage) -> Result<(), AppError> {
        let user = self.require_user()?;
        self.api
            .system_attributes()
            .save_resource_page(&resources::ApiResourcePage {
                slug: page.slug.clone(),
                title: page.title.clone(),
                body: page.body.clone(),
                updated_by: user,
                updated_at: page.updated_at,
            })
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let bundle = self
            .identity
            .sign_in(email, password)
            .await
            .map_err(map_api_error)?;
        let user_id: UserId = bundle
            .user_id
            .parse()
            .map_err(|_| AppError::internal("identity", "malformed user id in token bundle"))?;

        // The identity provider only mints tokens; the platform profile
        // comes from the backend, fetched with those tokens.
        self.sessions
            .set_session(bundle.id_token.clone(), bundle.refresh_token.clone(), user_id);
        let profile = match self.api.users().get(user_id).await {
            Ok(user) => Self::map_user(user),
            Err(error) => {
                self.sessions.clear();
                return Err(map_api_error(error));
            }
        };
        self.sessions.set_scope(profile.scope);
        self.start_token_refresh(&bundle);

        Ok(Session {
            user: profile,
            token: bundle.id_token,
            issued_at: TimeStamp::now(),
        })
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        self.stop_token_refresh();
        self.sessions.clear();
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AppError> {
        self.identity
            .send_password_reset(email)
            .await
            .map_err(map_api_error)
    }

    fn subscribe_auth(&self) -> broadcast::Receiver<AuthEvent> {
        self.sessions.subscribe()
    }
}
