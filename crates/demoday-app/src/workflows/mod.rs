//! # Workflows (Action Creators)
//!
//! The imperative functions frontends call — directly, or through
//! [`dispatch`] with an [`Intent`]. Each workflow performs its
//! collaborator calls through the bridge, dispatches state transitions
//! into the shared core, and routes failures to list errors or toasts per
//! the error taxonomy. No workflow retries in the background.

pub mod admin;
pub mod collections;
pub mod profile;
pub mod resources;
pub mod session;

use crate::{
    bridge::SharedBridge,
    core::{CollectionId, Intent, Screen, SharedApp},
    errors::AppError,
    views::Toast,
};

/// Run one collection's sync (or forced refresh) against the bridge.
///
/// Signed-out cores skip silently: the sign-in screen has no lists.
pub async fn sync_collection(
    app: &SharedApp,
    bridge: &SharedBridge,
    collection: CollectionId,
    force: bool,
) -> Result<(), AppError> {
    let (scope, user) = {
        let core = app.read().await;
        (core.scope(), core.session.user().map(|u| u.id))
    };
    let (Some(scope), Some(user)) = (scope, user) else {
        return Ok(());
    };

    use collections::{refresh_list, sync_list};
    macro_rules! run {
        ($source:expr, $field:ident) => {{
            let source = $source;
            if force {
                refresh_list(app, source.as_ref(), |core| &mut core.$field).await
            } else {
                sync_list(app, source.as_ref(), |core| &mut core.$field).await
            }
        }};
    }

    match collection {
        CollectionId::Activities => run!(bridge.activities(&scope), activities),
        CollectionId::Pledges => run!(bridge.pledges(&scope), pledges),
        CollectionId::Notices => run!(bridge.notices(user), notices),
        CollectionId::JoinRequests => run!(bridge.join_requests(&scope), join_requests),
        CollectionId::AccessRequests => run!(bridge.access_requests(&scope), access_requests),
        CollectionId::GroupAdmins => run!(bridge.group_admins(&scope), group_admins),
        CollectionId::AdminInvites => run!(bridge.admin_invites(&scope), admin_invites),
        CollectionId::ForumThreads => run!(bridge.forum_threads(&scope), forum_threads),
        CollectionId::Offers => run!(bridge.offers(&scope), offers),
        CollectionId::Sectors => run!(bridge.sectors(), sectors),
    }
}

/// The collections a screen shows (the notification panel is global and
/// handled separately).
fn screen_collections(screen: &Screen) -> &'static [CollectionId] {
    match screen {
        Screen::Dashboard => &[
            CollectionId::Activities,
            CollectionId::Pledges,
            CollectionId::Notices,
        ],
        Screen::Offers | Screen::OfferDetail(_) => &[CollectionId::Offers],
        Screen::Forum => &[CollectionId::ForumThreads],
        Screen::AdminSectors => &[CollectionId::Sectors],
        Screen::AdminRequests => &[
            CollectionId::JoinRequests,
            CollectionId::AccessRequests,
        ],
        Screen::AdminInvites => &[
            CollectionId::GroupAdmins,
            CollectionId::AdminInvites,
        ],
        Screen::SignIn | Screen::Profile | Screen::Resources | Screen::NotFound => &[],
    }
}

/// Navigate to a screen and bring its collections up: the previous
/// screen's lists are released (their subscriptions detach), the new
/// screen's lists fetch and attach.
pub async fn open_screen(
    app: &SharedApp,
    bridge: &SharedBridge,
    to: Screen,
) -> Result<(), AppError> {
    {
        let mut core = app.write().await;
        core.navigate(to.clone());
    }
    if matches!(to, Screen::Resources) {
        resources::load_resource_pages(app, bridge).await?;
    }
    let mut first_error = None;
    for collection in screen_collections(&to) {
        if let Err(error) = sync_collection(app, bridge, *collection, false).await {
            tracing::warn!(?collection, %error, "collection sync failed");
            first_error.get_or_insert(error);
        }
    }
    match first_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Route one user action to its workflow.
pub async fn dispatch(
    app: &SharedApp,
    bridge: &SharedBridge,
    intent: Intent,
) -> Result<(), AppError> {
    // Collection-addressed, lock-only operations share one expansion.
    macro_rules! with_container {
        ($id:expr, $container:ident => $body:expr) => {{
            let mut core = app.write().await;
            match $id {
                CollectionId::Activities => {
                    let $container = &mut core.activities;
                    $body
                }
                CollectionId::Pledges => {
                    let $container = &mut core.pledges;
                    $body
                }
                CollectionId::Notices => {
                    let $container = &mut core.notices;
                    $body
                }
                CollectionId::JoinRequests => {
                    let $container = &mut core.join_requests;
                    $body
                }
                CollectionId::AccessRequests => {
                    let $container = &mut core.access_requests;
                    $body
                }
                CollectionId::GroupAdmins => {
                    let $container = &mut core.group_admins;
                    $body
                }
                CollectionId::AdminInvites => {
                    let $container = &mut core.admin_invites;
                    $body
                }
                CollectionId::ForumThreads => {
                    let $container = &mut core.forum_threads;
                    $body
                }
                CollectionId::Offers => {
                    let $container = &mut core.offers;
                    $body
                }
                CollectionId::Sectors => {
                    let $container = &mut core.sectors;
                    $body
                }
            }
            Ok(())
        }};
    }

    match intent {
        Intent::Navigate(screen) => open_screen(app, bridge, screen).await,
        Intent::Refresh(collection) => sync_collection(app, bridge, collection, true).await,
        Intent::SetPage { collection, page } => {
            with_container!(collection, c => c.set_page(page))
        }
        Intent::SetPageSize { collection, size } => {
            with_container!(collection, c => c.set_page_size(size))
        }
        Intent::SetSearch { collection, text } => {
            with_container!(collection, c => c.set_search_text(text.clone()))
        }
        Intent::ClearSearch(collection) => {
            with_container!(collection, c => c.clear_search())
        }

        Intent::SignIn { email, password } => {
            session::sign_in(app, bridge, &email, &password).await?;
            open_screen(app, bridge, Screen::Dashboard).await
        }
        Intent::SignOut => session::sign_out(app, bridge).await,
        Intent::SendPasswordReset { email } => {
            session::send_password_reset(app, bridge, &email).await
        }

        Intent::SaveProfile => profile::save_profile(app, bridge).await,
        Intent::UploadAvatar {
            bytes,
            content_type,
        } => profile::upload_avatar(app, bridge, bytes, &content_type).await,

        Intent::RespondAccessRequest { id, approve } => {
            admin::respond_access_request(app, bridge, id, approve).await
        }
        Intent::RespondJoinRequest { id, approve } => {
            admin::respond_join_request(app, bridge, id, approve).await
        }
        Intent::InviteCourseAdmin { email, course } => {
            admin::invite_course_admin(app, bridge, &email, course).await
        }
        Intent::RevokeAdminInvite(id) => admin::revoke_admin_invite(app, bridge, id).await,
        Intent::CreateSector { name } => admin::create_sector(app, bridge, &name).await,
        Intent::RenameSector { id, name } => admin::rename_sector(app, bridge, id, &name).await,
        Intent::DeleteSector(id) => admin::delete_sector(app, bridge, id).await,
        Intent::CreateCourse { name } => admin::create_course(app, bridge, &name).await,
        Intent::MarkNoticeRead(id) => {
            // The notices list updates through its subscription.
            let result = bridge.mark_notice_read(id).await;
            if let Err(error) = &result {
                let mut core = app.write().await;
                core.toasts.push(Toast::from_error(error));
            }
            result
        }

        Intent::TickToasts => {
            let mut core = app.write().await;
            core.toasts.tick();
            core.pump_all_deltas();
            Ok(())
        }
        Intent::DismissToast(index) => {
            let mut core = app.write().await;
            core.toasts.dismiss(index);
            Ok(())
        }
    }
}
