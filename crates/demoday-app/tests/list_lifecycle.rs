//! End-to-end exercises of the list pattern against the in-memory
//! platform: mount, fetch, attach, push deltas, detach — the way a
//! frontend drives it through the workflow layer.

use demoday_app::{
    bridge::SharedBridge,
    core::{shared, AppConfig, AppCore, CollectionId, Intent, Screen, SessionState, SharedApp},
    errors::AppError,
    store::{pager, CollectionSource, CompleteOutcome, ListContainer},
    views::{Activity, RequestStatus},
    workflows,
};
use demoday_testkit::{
    factories::{make_access_request, make_activity, make_admin_profile, make_session},
    StubBridge,
};
use std::sync::Arc;

fn signed_in_app() -> SharedApp {
    let mut core = AppCore::new(AppConfig::default());
    core.session = SessionState::SignedIn(make_session(make_admin_profile()));
    shared(core)
}

fn setup() -> (SharedApp, Arc<StubBridge>, SharedBridge) {
    let bridge = Arc::new(StubBridge::new(make_admin_profile()));
    let app = signed_in_app();
    let shared_bridge: SharedBridge = bridge.clone();
    (app, bridge, shared_bridge)
}

#[tokio::test]
async fn test_mount_fetches_and_attaches() {
    let (app, bridge, shared_bridge) = setup();
    bridge.activities.seed(vec![
        make_activity(1, "Ada", "Solar Kiln"),
        make_activity(2, "Alan", "Enigma Decoder"),
    ]);

    workflows::sync_collection(&app, &shared_bridge, CollectionId::Activities, false)
        .await
        .unwrap();

    let core = app.read().await;
    let state = core.activities.state();
    assert!(state.is_loaded());
    assert!(state.error().is_none());
    assert_eq!(state.items().len(), 2);
    assert_eq!(bridge.activities.active_subscriptions(), 1);
}

#[tokio::test]
async fn test_empty_fetch_loads_cleanly() {
    let (app, _bridge, shared_bridge) = setup();

    workflows::sync_collection(&app, &shared_bridge, CollectionId::Activities, false)
        .await
        .unwrap();

    let core = app.read().await;
    let state = core.activities.state();
    assert!(state.is_loaded());
    assert!(state.error().is_none());
    assert!(state.items().is_empty());
    assert!(pager::visible_rows(state).is_empty());
}

#[tokio::test]
async fn test_fetch_failure_records_error_and_skips_attach() {
    let (app, bridge, shared_bridge) = setup();
    bridge.activities.seed(vec![make_activity(1, "Ada", "Kiln")]);
    bridge
        .activities
        .fail_next_fetch(AppError::network("connection refused"));

    let result =
        workflows::sync_collection(&app, &shared_bridge, CollectionId::Activities, false).await;
    assert!(result.is_err());

    {
        let core = app.read().await;
        let state = core.activities.state();
        assert!(state.is_loaded(), "spinner must stop on failure");
        assert!(state.error().is_some());
        assert!(state.items().is_empty(), "failed load leaves items alone");
        assert_eq!(
            bridge.activities.active_subscriptions(),
            0,
            "no subscription without a successful snapshot"
        );
    }

    // Manual retry succeeds and attaches.
    workflows::sync_collection(&app, &shared_bridge, CollectionId::Activities, true)
        .await
        .unwrap();
    let core = app.read().await;
    assert!(core.activities.state().error().is_none());
    assert_eq!(core.activities.state().items().len(), 1);
    assert_eq!(bridge.activities.active_subscriptions(), 1);
}

#[tokio::test]
async fn test_repeated_sync_registers_one_subscription() {
    let (app, bridge, shared_bridge) = setup();
    bridge.activities.seed(vec![make_activity(1, "Ada", "Kiln")]);

    // A container syncs on every re-render; all but the first are no-ops.
    for _ in 0..3 {
        workflows::sync_collection(&app, &shared_bridge, CollectionId::Activities, false)
            .await
            .unwrap();
    }
    assert_eq!(bridge.activities.active_subscriptions(), 1);

    // One external delta must produce exactly one state update.
    bridge.activities.insert(make_activity(2, "Alan", "Decoder"));
    let mut core = app.write().await;
    assert_eq!(core.pump_all_deltas(), 1);
    assert_eq!(core.activities.state().items().len(), 2);
}

#[tokio::test]
async fn test_delta_reaches_state_without_refetch() {
    let (app, bridge, shared_bridge) = setup();
    bridge.activities.seed(vec![
        make_activity(1, "Ada", "A"),
        make_activity(2, "Bob", "B"),
        make_activity(3, "Cyd", "C"),
    ]);
    workflows::sync_collection(&app, &shared_bridge, CollectionId::Activities, false)
        .await
        .unwrap();

    bridge.activities.insert(make_activity(4, "Dee", "D"));

    let mut core = app.write().await;
    core.pump_all_deltas();
    let state = core.activities.state();
    assert_eq!(state.items().len(), 4);
    let names: Vec<_> = pager::visible_rows(state)
        .iter()
        .map(|a| a.actor_name.clone())
        .collect();
    assert_eq!(names, ["Ada", "Bob", "Cyd", "Dee"]);
}

#[tokio::test]
async fn test_navigation_releases_subscriptions() {
    let (app, bridge, shared_bridge) = setup();
    bridge.activities.seed(vec![make_activity(1, "Ada", "Kiln")]);
    {
        let mut core = app.write().await;
        core.screen = Screen::Dashboard;
    }
    workflows::sync_collection(&app, &shared_bridge, CollectionId::Activities, false)
        .await
        .unwrap();
    assert_eq!(bridge.activities.active_subscriptions(), 1);

    workflows::open_screen(&app, &shared_bridge, Screen::Profile)
        .await
        .unwrap();
    assert_eq!(
        bridge.activities.active_subscriptions(),
        0,
        "leaving the dashboard must close its registrations"
    );

    // Deltas after detach change nothing.
    bridge.activities.insert(make_activity(2, "Alan", "Decoder"));
    let mut core = app.write().await;
    assert_eq!(core.pump_all_deltas(), 0);
    assert!(core.activities.state().items().is_empty());
}

#[tokio::test]
async fn test_mutation_round_trips_as_delta() {
    let (app, bridge, shared_bridge) = setup();
    let request = make_access_request("Lin Mei");
    let request_id = request.id;
    bridge.access_requests.seed(vec![request]);
    {
        let mut core = app.write().await;
        core.screen = Screen::Dashboard;
    }

    workflows::open_screen(&app, &shared_bridge, Screen::AdminRequests)
        .await
        .unwrap();
    workflows::admin::respond_access_request(&app, &shared_bridge, request_id, true)
        .await
        .unwrap();

    let mut core = app.write().await;
    core.pump_all_deltas();
    let state = core.access_requests.state();
    assert_eq!(state.items().len(), 1);
    assert_eq!(state.items()[0].status, RequestStatus::Approved);
}

#[tokio::test]
async fn test_stale_fetch_completion_is_noop() {
    let mut container: ListContainer<Activity> = ListContainer::new();
    let token = container.begin_fetch();

    // The view unmounts while the fetch is still in flight.
    container.release();

    let applied = container.complete_fetch(&token, Ok(vec![make_activity(1, "Ada", "Kiln")]));
    assert!(!applied);
    assert!(!container.state().is_loaded());
    assert!(container.state().items().is_empty());
}

#[tokio::test]
async fn test_release_while_attaching_closes_fresh_handle() {
    let collection = demoday_testkit::MemoryCollection::<Activity>::new("activities");
    let source = collection.source();

    let mut container: ListContainer<Activity> = ListContainer::new();
    let token = container.begin_fetch();
    container.complete_fetch(&token, Ok(vec![]));
    assert!(container.try_begin_attach("activities"));

    let subscription = source.subscribe().await.unwrap();
    assert_eq!(collection.active_subscriptions(), 1);

    // Detach lands while the subscribe round trip is outstanding.
    container.release();
    let outcome = container.complete_attach("activities", subscription);
    assert_eq!(outcome, CompleteOutcome::DetachedImmediately);
    assert_eq!(
        collection.active_subscriptions(),
        0,
        "queued detach must close the registration it raced with"
    );
}

#[tokio::test]
async fn test_dropping_container_closes_subscription() {
    let collection = demoday_testkit::MemoryCollection::<Activity>::new("activities");
    let source = collection.source();
    {
        let mut container: ListContainer<Activity> = ListContainer::new();
        let token = container.begin_fetch();
        container.complete_fetch(&token, Ok(vec![]));
        assert!(container.try_begin_attach("activities"));
        let subscription = source.subscribe().await.unwrap();
        container.complete_attach("activities", subscription);
        assert_eq!(collection.active_subscriptions(), 1);
    }
    assert_eq!(collection.active_subscriptions(), 0);
}

#[tokio::test]
async fn test_sign_in_failure_surfaces_toast_and_stays_signed_out() {
    let bridge = Arc::new(StubBridge::new(make_admin_profile()));
    let shared_bridge: SharedBridge = bridge.clone();
    let app = shared(AppCore::new(AppConfig::default()));
    bridge.fail_next_sign_in(AppError::api(401, "invalid credentials"));

    let result = workflows::dispatch(
        &app,
        &shared_bridge,
        Intent::SignIn {
            email: "ada@example.edu".to_string(),
            password: "hunter2".to_string(),
        },
    )
    .await;
    assert!(result.is_err());

    let core = app.read().await;
    assert!(!core.session.is_signed_in());
    assert_eq!(core.screen, Screen::SignIn);
    assert_eq!(core.toasts.len(), 1);
}

#[tokio::test]
async fn test_remote_sign_out_resets_the_app() {
    let (app, bridge, shared_bridge) = setup();
    bridge.activities.seed(vec![make_activity(1, "Ada", "Kiln")]);
    {
        let mut core = app.write().await;
        core.screen = Screen::Dashboard;
    }
    workflows::sync_collection(&app, &shared_bridge, CollectionId::Activities, false)
        .await
        .unwrap();
    assert_eq!(bridge.activities.active_subscriptions(), 1);

    let watcher = tokio::spawn(workflows::session::watch_auth(
        app.clone(),
        shared_bridge.clone(),
    ));
    // Let the watcher register its receiver before the event fires.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    bridge.emit_auth(demoday_app::core::AuthEvent::SignedOut);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    {
        let core = app.read().await;
        assert!(!core.session.is_signed_in());
        assert_eq!(core.screen, Screen::SignIn);
    }
    assert_eq!(bridge.activities.active_subscriptions(), 0);
    watcher.abort();
}
