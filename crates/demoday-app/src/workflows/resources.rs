//! # Resource Page Workflows
//!
//! Resource pages are a handful of admin-curated documents; they are
//! fetched whole into `AppCore::resource_pages` rather than through a
//! list container (no pagination, no live updates).

use crate::{bridge::SharedBridge, core::SharedApp, errors::AppError, views::{ResourcePage, Toast}};

/// Load every resource page.
pub async fn load_resource_pages(app: &SharedApp, bridge: &SharedBridge) -> Result<(), AppError> {
    match bridge.fetch_resource_pages().await {
        Ok(pages) => {
            let mut core = app.write().await;
            core.resource_pages = pages;
            Ok(())
        }
        Err(error) => {
            let mut core = app.write().await;
            core.toasts.push(Toast::from_error(&error));
            Err(error)
        }
    }
}

/// Create or replace one resource page, then refresh the local copy.
pub async fn save_resource_page(
    app: &SharedApp,
    bridge: &SharedBridge,
    page: ResourcePage,
) -> Result<(), AppError> {
    if page.slug.trim().is_empty() || page.title.trim().is_empty() {
        return Err(AppError::validation("page", "slug and title are required"));
    }
    match bridge.save_resource_page(&page).await {
        Ok(()) => {
            let mut core = app.write().await;
            match core.resource_pages.iter_mut().find(|p| p.slug == page.slug) {
                Some(existing) => *existing = page,
                None => core.resource_pages.push(page),
            }
            core.toasts.push(Toast::success("Page saved"));
            Ok(())
        }
        Err(error) => {
            let mut core = app.write().await;
            core.toasts.push(Toast::from_error(&error));
            Err(error)
        }
    }
}
