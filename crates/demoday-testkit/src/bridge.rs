//! Scripted in-memory bridge
//!
//! [`StubBridge`] implements the full `DataBridge` over
//! [`MemoryCollection`]s. Mutations round-trip the way the real backend
//! does: they mutate the server-side collection, which emits the delta to
//! whatever is subscribed — so tests exercise the same
//! fetch → attach → delta path production takes.

use crate::memory::MemoryCollection;
use async_trait::async_trait;
use demoday_app::{
    bridge::DataBridge,
    core::{AuthEvent, Session},
    errors::AppError,
    store::CollectionSource,
    views::{
        AccessRequest, Activity, AdminInvite, ForumThread, GroupAdmin, InviteStatus, JoinRequest,
        Notice, Offer, Pledge, ProfileUpdate, RequestStatus, ResourcePage, Sector, UserProfile,
    },
};
use demoday_core::{CourseId, InviteId, NoticeId, RequestId, Scope, SectorId, TimeStamp, UserId};
use parking_lot::Mutex;
use tokio::sync::broadcast;

/// A complete in-memory platform for one test.
///
/// Single-tenant: scope arguments are accepted and ignored, every test
/// runs inside one group.
pub struct StubBridge {
    pub activities: MemoryCollection<Activity>,
    pub pledges: MemoryCollection<Pledge>,
    pub notices: MemoryCollection<Notice>,
    pub join_requests: MemoryCollection<JoinRequest>,
    pub access_requests: MemoryCollection<AccessRequest>,
    pub group_admins: MemoryCollection<GroupAdmin>,
    pub admin_invites: MemoryCollection<AdminInvite>,
    pub forum_threads: MemoryCollection<ForumThread>,
    pub offers: MemoryCollection<Offer>,
    pub sectors: MemoryCollection<Sector>,

    profile: Mutex<UserProfile>,
    resource_pages: Mutex<Vec<ResourcePage>>,
    created_courses: Mutex<Vec<String>>,
    fail_next_sign_in: Mutex<Option<AppError>>,
    auth_tx: broadcast::Sender<AuthEvent>,
}

impl StubBridge {
    /// A bridge whose sign-in yields a session for `profile`.
    pub fn new(profile: UserProfile) -> Self {
        let (auth_tx, _) = broadcast::channel(16);
        Self {
            activities: MemoryCollection::new("activities"),
            pledges: MemoryCollection::new("pledges"),
            notices: MemoryCollection::new("notices"),
            join_requests: MemoryCollection::new("join-requests"),
            access_requests: MemoryCollection::new("access-requests"),
            group_admins: MemoryCollection::new("group-admins"),
            admin_invites: MemoryCollection::new("admin-invites"),
            forum_threads: MemoryCollection::new("forum-threads"),
            offers: MemoryCollection::new("offers"),
            sectors: MemoryCollection::new("sectors"),
            profile: Mutex::new(profile),
            resource_pages: Mutex::new(Vec::new()),
            created_courses: Mutex::new(Vec::new()),
            fail_next_sign_in: Mutex::new(None),
            auth_tx,
        }
    }

    /// Make the next sign-in fail with `error`.
    pub fn fail_next_sign_in(&self, error: AppError) {
        *self.fail_next_sign_in.lock() = Some(error);
    }

    /// Simulate an identity-provider push (refresh, remote sign-out).
    pub fn emit_auth(&self, event: AuthEvent) {
        let _ = self.auth_tx.send(event);
    }

    /// Course names created through the bridge, for assertions.
    pub fn created_courses(&self) -> Vec<String> {
        self.created_courses.lock().clone()
    }

    /// Seed the resource pages.
    pub fn seed_resource_pages(&self, pages: Vec<ResourcePage>) {
        *self.resource_pages.lock() = pages;
    }
}

#[async_trait]
impl DataBridge for StubBridge {
    fn activities(&self, _scope: &Scope) -> Box<dyn CollectionSource<Activity>> {
        self.activities.source()
    }

    fn pledges(&self, _scope: &Scope) -> Box<dyn CollectionSource<Pledge>> {
        self.pledges.source()
    }

    fn notices(&self, _user: UserId) -> Box<dyn CollectionSource<Notice>> {
        self.notices.source()
    }

    fn join_requests(&self, _scope: &Scope) -> Box<dyn CollectionSource<JoinRequest>> {
        self.join_requests.source()
    }

    fn access_requests(&self, _scope: &Scope) -> Box<dyn CollectionSource<AccessRequest>> {
        self.access_requests.source()
    }

    fn group_admins(&self, _scope: &Scope) -> Box<dyn CollectionSource<GroupAdmin>> {
        self.group_admins.source()
    }

    fn admin_invites(&self, _scope: &Scope) -> Box<dyn CollectionSource<AdminInvite>> {
        self.admin_invites.source()
    }

    fn forum_threads(&self, _scope: &Scope) -> Box<dyn CollectionSource<ForumThread>> {
        self.forum_threads.source()
    }

    fn offers(&self, _scope: &Scope) -> Box<dyn CollectionSource<Offer>> {
        self.offers.source()
    }

    fn sectors(&self) -> Box<dyn CollectionSource<Sector>> {
        self.sectors.source()
    }

    async fn respond_access_request(&self, id: RequestId, approve: bool) -> Result<(), AppError> {
        let found = self
            .access_requests
            .snapshot()
            .into_iter()
            .find(|r| r.id == id);
        let Some(mut request) = found else {
            return Err(AppError::not_found("access request"));
        };
        request.status = if approve {
            RequestStatus::Approved
        } else {
            RequestStatus::Denied
        };
        self.access_requests.update(request);
        Ok(())
    }

    async fn respond_join_request(&self, id: RequestId, approve: bool) -> Result<(), AppError> {
        let found = self
            .join_requests
            .snapshot()
            .into_iter()
            .find(|r| r.id == id);
        let Some(mut request) = found else {
            return Err(AppError::not_found("join request"));
        };
        request.status = if approve {
            RequestStatus::Approved
        } else {
            RequestStatus::Denied
        };
        self.join_requests.update(request);
        Ok(())
    }

    async fn invite_course_admin(&self, email: &str, _course: CourseId) -> Result<(), AppError> {
        self.admin_invites
            .insert(crate::factories::make_admin_invite(email, "Course"));
        Ok(())
    }

    async fn revoke_admin_invite(&self, id: InviteId) -> Result<(), AppError> {
        let found = self
            .admin_invites
            .snapshot()
            .into_iter()
            .find(|i| i.id == id);
        let Some(mut invite) = found else {
            return Err(AppError::not_found("invite"));
        };
        invite.status = InviteStatus::Revoked;
        self.admin_invites.update(invite);
        Ok(())
    }

    async fn create_sector(&self, name: &str) -> Result<(), AppError> {
        let ordinal = self.sectors.snapshot().len() as u32;
        self.sectors
            .insert(crate::factories::make_sector(name, ordinal));
        Ok(())
    }

    async fn rename_sector(&self, id: SectorId, name: &str) -> Result<(), AppError> {
        let found = self.sectors.snapshot().into_iter().find(|s| s.id == id);
        let Some(mut sector) = found else {
            return Err(AppError::not_found("sector"));
        };
        sector.name = name.to_string();
        self.sectors.update(sector);
        Ok(())
    }

    async fn delete_sector(&self, id: SectorId) -> Result<(), AppError> {
        self.sectors.remove(&id.uuid().to_string());
        Ok(())
    }

    async fn create_course(&self, name: &str) -> Result<(), AppError> {
        self.created_courses.lock().push(name.to_string());
        Ok(())
    }

    async fn mark_notice_read(&self, id: NoticeId) -> Result<(), AppError> {
        let found = self.notices.snapshot().into_iter().find(|n| n.id == id);
        let Some(mut notice) = found else {
            return Err(AppError::not_found("notice"));
        };
        notice.read = true;
        self.notices.update(notice);
        Ok(())
    }

    async fn update_profile(
        &self,
        _user: UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AppError> {
        let mut profile = self.profile.lock();
        if let Some(name) = &update.display_name {
            profile.display_name = name.clone();
        }
        profile.bio = update.bio.clone();
        profile.website = update.website.clone();
        profile.sector_id = update.sector_id;
        if let Some(url) = &update.photo_url {
            profile.photo_url = Some(url.clone());
        }
        Ok(profile.clone())
    }

    async fn upload_avatar(
        &self,
        user: UserId,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, AppError> {
        Ok(format!("https://storage.test/avatars/{}.png", user.uuid()))
    }

    async fn fetch_resource_pages(&self) -> Result<Vec<ResourcePage>, AppError> {
        Ok(self.resource_pages.lock().clone())
    }

    async fn save_resource_page(&self, page: &ResourcePage) -> Result<(), AppError> {
        let mut pages = self.resource_pages.lock();
        match pages.iter_mut().find(|p| p.slug == page.slug) {
            Some(existing) => *existing = page.clone(),
            None => pages.push(page.clone()),
        }
        Ok(())
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Session, AppError> {
        if let Some(error) = self.fail_next_sign_in.lock().take() {
            return Err(error);
        }
        Ok(Session {
            user: self.profile.lock().clone(),
            token: "test-token".to_string(),
            issued_at: TimeStamp::from_millis(1_000),
        })
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn send_password_reset(&self, _email: &str) -> Result<(), AppError> {
        Ok(())
    }

    fn subscribe_auth(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_tx.subscribe()
    }
}
