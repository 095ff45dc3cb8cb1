//! # Core Application Module
//!
//! [`AppCore`] aggregates every piece of client state: session, screen,
//! toast queue, the profile form, and one [`ListContainer`] per
//! listener-synchronized collection. It is shared as
//! `Arc<RwLock<AppCore>>` ([`SharedApp`]); workflows lock it briefly
//! around state transitions and never across a collaborator round trip.

mod intent;
pub mod session;

pub use intent::{CollectionId, Intent, Screen};
pub use session::{AuthEvent, Session, SessionState};

use crate::{
    store::ListContainer,
    views::{
        AccessRequest, Activity, AdminInvite, ForumThread, GroupAdmin, JoinRequest, Notice, Offer,
        Pledge, ProfileForm, ResourcePage, Sector, ToastQueue,
    },
};
use async_lock::RwLock;
use demoday_core::Scope;
use std::sync::Arc;

/// Shared handle frontends and workflows hold on the core.
pub type SharedApp = Arc<RwLock<AppCore>>;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Rows per page a fresh list starts with
    pub default_page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_page_size: crate::store::DEFAULT_PAGE_SIZE,
        }
    }
}

/// The whole client state.
pub struct AppCore {
    pub config: AppConfig,
    pub session: SessionState,
    pub screen: Screen,
    pub toasts: ToastQueue,
    pub profile_form: ProfileForm,
    /// Resource pages are a handful of documents, fetched whole; no
    /// pagination or live updates needed.
    pub resource_pages: Vec<ResourcePage>,

    // One container per listener-synchronized collection.
    pub activities: ListContainer<Activity>,
    pub pledges: ListContainer<Pledge>,
    pub notices: ListContainer<Notice>,
    pub join_requests: ListContainer<JoinRequest>,
    pub access_requests: ListContainer<AccessRequest>,
    pub group_admins: ListContainer<GroupAdmin>,
    pub admin_invites: ListContainer<AdminInvite>,
    pub forum_threads: ListContainer<ForumThread>,
    pub offers: ListContainer<Offer>,
    pub sectors: ListContainer<Sector>,
}

impl AppCore {
    /// A signed-out core with empty containers.
    pub fn new(config: AppConfig) -> Self {
        let mut core = Self {
            config,
            session: SessionState::default(),
            screen: Screen::default(),
            toasts: ToastQueue::new(),
            profile_form: ProfileForm::default(),
            resource_pages: Vec::new(),
            activities: ListContainer::new(),
            pledges: ListContainer::new(),
            notices: ListContainer::new(),
            join_requests: ListContainer::new(),
            access_requests: ListContainer::new(),
            group_admins: ListContainer::new(),
            admin_invites: ListContainer::new(),
            forum_threads: ListContainer::new(),
            offers: ListContainer::new(),
            sectors: ListContainer::new(),
        };
        let size = core.config.default_page_size;
        core.activities.set_page_size(size);
        core.pledges.set_page_size(size);
        core.notices.set_page_size(size);
        core.join_requests.set_page_size(size);
        core.access_requests.set_page_size(size);
        core.group_admins.set_page_size(size);
        core.admin_invites.set_page_size(size);
        core.forum_threads.set_page_size(size);
        core.offers.set_page_size(size);
        core.sectors.set_page_size(size);
        core
    }

    /// The signed-in user's scope, if any.
    pub fn scope(&self) -> Option<Scope> {
        self.session.scope()
    }

    /// Move to another screen, releasing the lists owned by the one being
    /// left. Release is what detaches their push registrations; skipping
    /// it would leave live server connections feeding state nobody reads.
    pub fn navigate(&mut self, to: Screen) {
        if self.screen == to {
            return;
        }
        let from = std::mem::replace(&mut self.screen, to);
        self.release_screen(&from);
    }

    /// Release the containers a screen owns.
    ///
    /// The notification panel is global (it lives in the header), so
    /// `notices` survives navigation and is only released at sign-out.
    fn release_screen(&mut self, screen: &Screen) {
        match screen {
            Screen::Dashboard => {
                self.activities.release();
                self.pledges.release();
            }
            Screen::Offers | Screen::OfferDetail(_) => self.offers.release(),
            Screen::Forum => self.forum_threads.release(),
            Screen::AdminSectors => self.sectors.release(),
            Screen::AdminRequests => {
                self.join_requests.release();
                self.access_requests.release();
            }
            Screen::AdminInvites => {
                self.group_admins.release();
                self.admin_invites.release();
            }
            Screen::SignIn | Screen::Profile | Screen::Resources | Screen::NotFound => {}
        }
    }

    /// Drop everything tied to the session: all containers, the profile
    /// form, pending toasts, and the session itself.
    pub fn reset_for_sign_out(&mut self) {
        self.activities.release();
        self.pledges.release();
        self.notices.release();
        self.join_requests.release();
        self.access_requests.release();
        self.group_admins.release();
        self.admin_invites.release();
        self.forum_threads.release();
        self.offers.release();
        self.sectors.release();
        self.resource_pages.clear();
        self.profile_form = ProfileForm::default();
        self.toasts.clear();
        self.session = SessionState::SignedOut;
        self.screen = Screen::SignIn;
    }

    /// Drain pending deltas of every attached container into state.
    ///
    /// Frontends call this once per render tick; it is cheap when nothing
    /// arrived.
    pub fn pump_all_deltas(&mut self) -> usize {
        self.activities.pump_deltas()
            + self.pledges.pump_deltas()
            + self.notices.pump_deltas()
            + self.join_requests.pump_deltas()
            + self.access_requests.pump_deltas()
            + self.group_admins.pump_deltas()
            + self.admin_invites.pump_deltas()
            + self.forum_threads.pump_deltas()
            + self.offers.pump_deltas()
            + self.sectors.pump_deltas()
    }
}

/// Wrap a core for sharing between frontends and workflows.
pub fn shared(core: AppCore) -> SharedApp {
    Arc::new(RwLock::new(core))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_to_same_screen_is_noop() {
        let mut core = AppCore::new(AppConfig::default());
        core.screen = Screen::Dashboard;
        core.navigate(Screen::Dashboard);
        assert_eq!(core.screen, Screen::Dashboard);
    }

    #[test]
    fn test_sign_out_resets_everything() {
        let mut core = AppCore::new(AppConfig::default());
        core.screen = Screen::Dashboard;
        core.toasts.push(crate::views::Toast::success("hi"));
        core.reset_for_sign_out();
        assert_eq!(core.screen, Screen::SignIn);
        assert!(core.toasts.is_empty());
        assert!(!core.session.is_signed_in());
    }
}
