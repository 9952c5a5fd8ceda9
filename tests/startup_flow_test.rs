//! Startup routing through a running app loop.

mod common;

use common::{test_profile, TestAppBuilder};
use waypoint::domain::{Permission, Screen, SecureProfile};
use waypoint::facts::{HAS_LAUNCHED_KEY, LOGGED_OUT_KEY};

#[tokio::test(start_paused = true)]
async fn test_fresh_install_without_token_shows_splash() {
    let app = TestAppBuilder::new().spawn().await;
    app.settle().await;

    assert_eq!(app.screen().await, Screen::Splash);
    assert_eq!(app.host.roots(), vec![Screen::Splash]);
    app.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_fresh_install_with_token_detects_old_login() {
    let app = TestAppBuilder::new().signed_in().spawn().await;
    app.settle().await;

    assert_eq!(app.rendered().await, Some(Screen::OldLoginDetection));
    assert_eq!(app.store.get_bool_sync(LOGGED_OUT_KEY), Some(true));
    app.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_returning_user_goes_home_without_permission_setup() {
    let app = TestAppBuilder::new()
        .launched()
        .signed_in()
        .with_pending(vec![Permission::Notifications])
        .spawn()
        .await;
    app.settle().await;

    assert_eq!(app.rendered().await, Some(Screen::Home));
    assert!(!app.store.contains(LOGGED_OUT_KEY));
    app.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_require_permissions_policy_routes_to_permissions() {
    let app = TestAppBuilder::new()
        .launched()
        .signed_in()
        .require_permissions()
        .spawn()
        .await;
    app.settle().await;
    assert_eq!(app.rendered().await, Some(Screen::Permissions));

    app.handle.permissions_completed().unwrap();
    app.settle().await;
    assert_eq!(app.rendered().await, Some(Screen::Home));
    assert_eq!(app.host.roots(), vec![Screen::Permissions, Screen::Home]);
    app.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_cold_start_transition_is_one_swap() {
    let app = TestAppBuilder::new().spawn().await;

    // First launch finishes before the splash root has settled.
    app.handle.app_launched().unwrap();
    app.settle().await;

    assert_eq!(app.host.roots(), vec![Screen::Login]);
    assert_eq!(app.store.get_bool_sync(HAS_LAUNCHED_KEY), Some(true));
    app.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_login_then_profile_completion() {
    let app = TestAppBuilder::new().launched().spawn().await;
    app.settle().await;
    assert_eq!(app.rendered().await, Some(Screen::Login));

    app.secure.set_profile(Some(SecureProfile {
        requires_profile_completion: true,
        ..test_profile()
    }));
    app.handle.login_succeeded().unwrap();
    app.settle().await;
    assert_eq!(app.rendered().await, Some(Screen::ProfileUpdate));

    app.secure.set_profile(Some(test_profile()));
    app.handle.profile_completed().unwrap();
    app.settle().await;
    assert_eq!(app.rendered().await, Some(Screen::Home));

    assert_eq!(
        app.host.roots(),
        vec![Screen::Login, Screen::ProfileUpdate, Screen::Home]
    );
    app.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_old_login_acknowledged_goes_home() {
    let app = TestAppBuilder::new().signed_in().spawn().await;
    app.settle().await;

    app.handle.acknowledge_previous_login().unwrap();
    app.settle().await;

    assert_eq!(app.rendered().await, Some(Screen::Home));
    assert_eq!(app.store.get_bool_sync(LOGGED_OUT_KEY), Some(false));
    app.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_token_restoration() {
    let app = TestAppBuilder::new().launched().spawn().await;
    app.settle().await;

    app.secure.set_profile(Some(test_profile()));
    app.handle.token_restored().unwrap();
    app.settle().await;

    assert_eq!(app.rendered().await, Some(Screen::Home));
    app.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_repeated_refresh_without_change_does_not_swap() {
    let app = TestAppBuilder::new().launched().signed_in().spawn().await;
    app.settle().await;

    app.handle.login_succeeded().unwrap();
    app.handle.token_restored().unwrap();
    app.settle().await;

    assert_eq!(app.host.roots(), vec![Screen::Home]);
    app.shutdown().await;
}
