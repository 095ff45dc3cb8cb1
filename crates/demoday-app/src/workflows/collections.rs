//! # Collection Sync Workflows
//!
//! The imperative half of the list pattern: run the fetch, dispatch the
//! begin/complete transitions, attach the subscription once the snapshot
//! landed. The shared lock is taken briefly around each transition and
//! released across every collaborator await; completions present the
//! liveness token they were issued, so a response that outlives its
//! container is dropped instead of applied.

use crate::{
    core::{AppCore, SharedApp},
    errors::{AppError, ErrorDetail},
    store::{CollectionSource, Keyed, ListContainer},
};

/// Accessor picking one container out of the core.
///
/// A plain fn pointer so call sites can pass `|core| &mut core.activities`
/// without lifetime gymnastics.
pub type Select<T> = fn(&mut AppCore) -> &mut ListContainer<T>;

/// Mount/update hook for one collection: conditional fetch, then attach.
///
/// Idempotent — callers invoke it on every mount and re-render; when the
/// list is already loaded and attached it does nothing.
pub async fn sync_list<T>(
    app: &SharedApp,
    source: &dyn CollectionSource<T>,
    select: Select<T>,
) -> Result<(), AppError>
where
    T: Keyed + Send + 'static,
{
    run_sync(app, source, select, false).await
}

/// Manual retry/refresh: re-run the fetch even if already loaded, then
/// make sure the subscription is attached.
pub async fn refresh_list<T>(
    app: &SharedApp,
    source: &dyn CollectionSource<T>,
    select: Select<T>,
) -> Result<(), AppError>
where
    T: Keyed + Send + 'static,
{
    run_sync(app, source, select, true).await
}

async fn run_sync<T>(
    app: &SharedApp,
    source: &dyn CollectionSource<T>,
    select: Select<T>,
    force_fetch: bool,
) -> Result<(), AppError>
where
    T: Keyed + Send + 'static,
{
    // Fetch stage.
    let token = {
        let mut core = app.write().await;
        let container = select(&mut core);
        if force_fetch || container.needs_fetch() {
            Some(container.begin_fetch())
        } else {
            None
        }
    };

    if let Some(token) = token {
        let outcome = source.fetch().await;
        let failure = outcome.as_ref().err().cloned();
        {
            let mut core = app.write().await;
            let container = select(&mut core);
            container.complete_fetch(&token, outcome.map_err(|e| ErrorDetail::from(&e)));
        }
        if let Some(error) = failure {
            // Recorded in the list state for the retry control; surfaced to
            // the caller for optional toasting. Not retried here.
            return Err(error);
        }
    }

    // Attach stage. Gated on the load having succeeded, so a delta can
    // never be applied before its base snapshot.
    let key = source.key();
    let should_subscribe = {
        let mut core = app.write().await;
        select(&mut core).try_begin_attach(&key)
    };

    if should_subscribe {
        match source.subscribe().await {
            Ok(subscription) => {
                let mut core = app.write().await;
                select(&mut core).complete_attach(&key, subscription);
            }
            Err(error) => {
                let mut core = app.write().await;
                select(&mut core).abort_attach(&key);
                return Err(error);
            }
        }
    }

    Ok(())
}
