//! End-to-end tests for the favourites flow against a mock backend.
//!
//! Each test starts its own wiremock server that serves both the catalog and
//! the account endpoints, then drives `App` the way the UI layer does: activate
//! a view, run the fetches it asks for, and feed the results back in.

use cook::api::{Api, ApiError};
use cook::app::{App, Slot, View};
use cook::command::{Command, NotificationKind};
use cook::config::Endpoints;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoints_for(server: &MockServer) -> Endpoints {
    let base = Url::parse(&server.uri()).unwrap();
    Endpoints {
        catalog: base.join("api/json/v1/1/categories.php").unwrap(),
        api_base: base,
    }
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/categories.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [
                {
                    "idCategory": "1",
                    "strCategory": "Beef",
                    "strCategoryDescription": "Beef is...",
                    "strCategoryThumb": "https://img.example.com/beef.png"
                },
                {"idCategory": "2", "strCategory": "Chicken"},
                {"idCategory": "3", "strCategory": "Dessert"},
                {"idCategory": "4", "strCategory": "Lamb"},
                {"idCategory": "5", "strCategory": "Beef Wellington"}
            ]
        })))
        .mount(server)
        .await;
}

/// Activate `view` and run the fetches it plans, in the given order.
async fn load_view(app: &mut App, view: View, favourites_first: bool) -> Option<View> {
    let plan = app.activate(view);
    let catalog = app.api.catalog.clone();
    let favourites = app.api.favourites.clone();

    let mut redirect = None;
    if favourites_first && plan.favourites {
        redirect = app.apply_favourites(plan.generation, favourites.list().await);
    }
    if plan.catalog {
        app.apply_catalog(plan.generation, catalog.fetch_categories().await);
    }
    if !favourites_first && plan.favourites {
        redirect = app.apply_favourites(plan.generation, favourites.list().await);
    }
    redirect
}

fn visible_names(app: &App) -> Vec<String> {
    app.visible_categories()
        .iter()
        .map(|c| c.name.clone())
        .collect()
}

#[tokio::test]
async fn test_favourites_follow_catalog_order_with_mixed_id_types() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/favourites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"item_id": 5, "user": "u1"},
                {"item_id": "1", "user": "u1"},
                {"item_id": 99, "user": "u1"},
                {"item_id": "1", "user": "u1"},
                {"user": "u1"}
            ]
        })))
        .mount(&server)
        .await;

    for favourites_first in [true, false] {
        let api = Api::new(&endpoints_for(&server), Duration::from_secs(5)).unwrap();
        let mut app = App::new(api, View::Favourites);

        let redirect = load_view(&mut app, View::Favourites, favourites_first).await;
        assert_eq!(redirect, None);
        assert!(!app.is_loading());
        // Catalog order, no duplicates, unknown id 99 dropped
        assert_eq!(visible_names(&app), vec!["Beef", "Beef Wellington"]);

        app.next_tab(); // Pork
        assert!(visible_names(&app).is_empty());
        app.next_tab(); // Beef
        assert_eq!(visible_names(&app), vec!["Beef", "Beef Wellington"]);
    }
}

#[tokio::test]
async fn test_expired_session_redirects_to_login_and_shows_nothing() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/favourites"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = Api::new(&endpoints_for(&server), Duration::from_secs(5)).unwrap();
    let mut app = App::new(api, View::Favourites);

    let redirect = load_view(&mut app, View::Favourites, false).await;
    assert_eq!(redirect, Some(View::Login));
    assert!(matches!(app.favourites, Slot::Failed(_)));
    assert!(app.favourited.is_empty());
    assert!(app.visible_categories().is_empty());
    assert_eq!(
        app.notification.as_ref().map(|n| n.kind),
        Some(NotificationKind::Info)
    );
}

#[tokio::test]
async fn test_home_view_does_not_need_a_session() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/favourites"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;

    let api = Api::new(&endpoints_for(&server), Duration::from_secs(5)).unwrap();
    let mut app = App::new(api, View::Home);

    assert_eq!(load_view(&mut app, View::Home, false).await, None);
    assert_eq!(app.visible_categories().len(), 5);
}

#[tokio::test]
async fn test_failed_favourite_add_is_retried_with_same_payload() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/favourites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/add-to-favourite"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/add-to-favourite"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let api = Api::new(&endpoints_for(&server), Duration::from_secs(5)).unwrap();
    let mut app = App::new(api, View::Favourites);
    load_view(&mut app, View::Favourites, false).await;
    assert!(app.visible_categories().is_empty());

    // Pick "Dessert" from the Home list
    load_view(&mut app, View::Home, false).await;
    app.nav_down();
    app.nav_down();
    let command = app.favourite_selected().unwrap();

    let result = command.execute(&app.api).await;
    assert!(matches!(result, Err(ApiError::HttpStatus(503))));
    assert_eq!(app.apply_command(command, result), None);
    assert_eq!(
        app.notification.as_ref().map(|n| n.kind),
        Some(NotificationKind::Failure)
    );

    let retry = app.take_retry().unwrap();
    assert!(matches!(retry, Command::AddFavourite { .. }));
    let result = retry.execute(&app.api).await;
    assert!(result.is_ok());
    app.apply_command(retry, result);
    assert!(app.is_favourited(cook::model::ItemId::new(3)));

    let bodies: Vec<serde_json::Value> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/add-to-favourite")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], json!({"id": 3, "name": "Dessert"}));
    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn test_catalog_outage_leaves_favourites_empty_but_usable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/categories.php"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/favourites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"item_id": 1}]})))
        .mount(&server)
        .await;

    let api = Api::new(&endpoints_for(&server), Duration::from_secs(5)).unwrap();
    let mut app = App::new(api, View::Favourites);

    assert_eq!(load_view(&mut app, View::Favourites, true).await, None);
    assert!(matches!(app.catalog, Slot::Failed(_)));
    assert_eq!(app.favourites.loaded().map(Vec::len), Some(1));
    assert!(app.visible_categories().is_empty());
    assert!(!app.is_loading());
}
