//! Admin panel flows driven through the router

mod helpers;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use helpers::*;
use serde_json::Value;
use TechClub::models::{Bucket, EventCategory};
use TechClub::services::ObjectStore;

async fn json_list(app: &TestApp, uri: &str) -> Vec<Value> {
    let response = app.get(uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_text(response).await).expect("Response is not a JSON list")
}

#[tokio::test]
async fn test_admin_requires_session() {
    let app = TestApp::new();

    let response = app.get("/admin", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login"));

    // A stale token is cleared on the way out
    let response = app.get("/admin", Some("techclub_session=not-a-session")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_mutations_require_session() {
    let app = TestApp::new();
    let event = app.seed_event("Robo Wars", EventCategory::Technova, "evt123.jpg").await;

    let response = app.post(&format!("/admin/events/{}/delete", event.id), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login"));

    assert_eq!(json_list(&app, "/api/events").await.len(), 1);
    assert_eq!(app.objects.object_count(Bucket::EventImages).await, 1);
}

#[tokio::test]
async fn test_sign_in_rejects_bad_password() {
    let app = TestApp::new();

    let response = app.post_login(ADMIN_EMAIL, "wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert!(body_text(response).await.contains("Invalid email or password"));
}

#[tokio::test]
async fn test_sign_in_and_out() {
    let app = TestApp::new();
    let cookie = app.sign_in().await;

    let response = app.get("/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(ADMIN_EMAIL));

    // The login page sends a signed-in admin straight to the panel
    let response = app.get("/login", Some(&cookie)).await;
    assert_eq!(location(&response).as_deref(), Some("/admin"));

    let response = app.post("/logout", Some(&cookie)).await;
    assert_eq!(location(&response).as_deref(), Some("/login"));

    let response = app.get("/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_create_team_member_listed_under_faculty() {
    let app = TestApp::new();
    let cookie = app.sign_in().await;

    let fields = team_fields("A. Rao", "Faculty Advisor", "faculty");
    let response = app
        .submit_form("team", &cookie, &fields, Some(&TestFile::png("rao.png")))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/admin?tab=team"));

    let page = body_text(app.get("/admin?tab=team", Some(&cookie)).await).await;
    assert!(page.contains(r#"notice success"#));
    assert!(page.contains("A. Rao"));

    // Shown once
    let page = body_text(app.get("/admin?tab=team", Some(&cookie)).await).await;
    assert!(!page.contains("notice success"));

    let faculty = json_list(&app, "/api/team?category=faculty").await;
    assert_eq!(faculty.len(), 1);
    assert_eq!(faculty[0]["name"], "A. Rao");
    let image_url = faculty[0]["image_url"].as_str().unwrap();
    assert!(image_url.starts_with("http://techclub.test/media/team-member-images/"));
    assert!(image_url.ends_with(".png"));

    assert!(json_list(&app, "/api/team?category=member").await.is_empty());
    assert_eq!(app.objects.object_count(Bucket::TeamMemberImages).await, 1);

    let public = body_text(app.get("/team?category=faculty", None).await).await;
    assert!(public.contains("A. Rao"));
}

#[tokio::test]
async fn test_team_list_is_name_ordered() {
    let app = TestApp::new();
    let cookie = app.sign_in().await;

    let mut names = Vec::new();
    for _ in 0..3 {
        let (name, fields) = random_team_fields("member");
        app.submit_form("team", &cookie, &fields, Some(&TestFile::png("m.jpg")))
            .await;
        names.push(name);
    }
    names.sort_by_key(|n| n.to_lowercase());

    let listed: Vec<String> = json_list(&app, "/api/team")
        .await
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed, names);
}

#[tokio::test]
async fn test_create_without_image_keeps_draft() {
    let app = TestApp::new();
    let cookie = app.sign_in().await;

    let fields = event_fields("Code Sprint", "TECHNOVA");
    app.submit_form("events", &cookie, &fields, None).await;

    let page = body_text(app.get("/admin?tab=events", Some(&cookie)).await).await;
    assert!(page.contains("notice error"));
    assert!(page.contains(r#"value="Code Sprint""#));
    assert!(json_list(&app, "/api/events").await.is_empty());
}

#[tokio::test]
async fn test_gallery_storage_failure_keeps_draft() {
    let app = TestApp::new();
    let cookie = app.sign_in().await;
    app.objects.set_fail_writes(true);

    let fields = gallery_fields("Closing ceremony", "BRAIN MASTERS");
    let response = app
        .submit_form("gallery", &cookie, &fields, Some(&TestFile::png("closing.png")))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let page = body_text(app.get("/admin?tab=gallery", Some(&cookie)).await).await;
    assert!(page.contains("notice error"));
    assert!(page.contains("Image upload failed"));
    assert!(page.contains(r#"value="Closing ceremony""#));
    assert!(json_list(&app, "/api/gallery").await.is_empty());

    // Storage is back, resubmitting succeeds
    app.objects.set_fail_writes(false);
    app.submit_form("gallery", &cookie, &fields, Some(&TestFile::png("closing.png")))
        .await;
    assert_eq!(json_list(&app, "/api/gallery").await.len(), 1);
    let page = body_text(app.get("/admin?tab=gallery", Some(&cookie)).await).await;
    assert!(!page.contains(r#"value="Closing ceremony""#));
}

#[tokio::test]
async fn test_delete_event_removes_image() {
    let app = TestApp::new();
    let cookie = app.sign_in().await;
    let event = app.seed_event("Robo Wars", EventCategory::Technova, "evt123.jpg").await;
    assert!(app.objects.exists(Bucket::EventImages, "evt123.jpg").await.unwrap());

    let response = app
        .post(&format!("/admin/events/{}/delete", event.id), Some(&cookie))
        .await;
    assert_eq!(location(&response).as_deref(), Some("/admin?tab=events"));

    assert!(json_list(&app, "/api/events").await.is_empty());
    assert_eq!(app.objects.object_count(Bucket::EventImages).await, 0);

    let page = body_text(app.get("/admin?tab=events", Some(&cookie)).await).await;
    assert!(page.contains(r#"Event &quot;Robo Wars&quot; deleted"#));
}

#[tokio::test]
async fn test_delete_survives_storage_outage() {
    let app = TestApp::new();
    let cookie = app.sign_in().await;
    let event = app.seed_event("Quiz Night", EventCategory::BrainMasters, "quiz.jpg").await;
    app.objects.set_fail_removes(true);

    app.post(&format!("/admin/events/{}/delete", event.id), Some(&cookie))
        .await;

    assert!(json_list(&app, "/api/events").await.is_empty());
    assert_eq!(app.objects.object_count(Bucket::EventImages).await, 1);
}

#[tokio::test]
async fn test_edit_replaces_fields_and_keeps_image() {
    let app = TestApp::new();
    let cookie = app.sign_in().await;
    let event = app.seed_event("Robo Wars", EventCategory::Technova, "evt123.jpg").await;

    let response = app
        .get(&format!("/admin/events/{}/edit", event.id), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let page = body_text(app.get("/admin?tab=events", Some(&cookie)).await).await;
    assert!(page.contains("Save changes"));
    assert!(page.contains(r#"value="Robo Wars""#));

    let fields = event_fields("Robo Wars 2", "PIXEL FUSION");
    app.submit_form("events", &cookie, &fields, None).await;

    let events = json_list(&app, "/api/events").await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Robo Wars 2");
    assert_eq!(events[0]["image_url"], event.image_url.as_str());
    assert_eq!(json_list(&app, "/api/events?category=TECHNOVA").await.len(), 0);
}

#[tokio::test]
async fn test_cancel_discards_edit() {
    let app = TestApp::new();
    let cookie = app.sign_in().await;
    let event = app.seed_event("Robo Wars", EventCategory::Technova, "evt123.jpg").await;

    app.get(&format!("/admin/events/{}/edit", event.id), Some(&cookie))
        .await;
    app.post("/admin/events/cancel", Some(&cookie)).await;

    let page = body_text(app.get("/admin?tab=events", Some(&cookie)).await).await;
    assert!(!page.contains("Save changes"));
    assert!(!page.contains(r#"value="Robo Wars""#));
}

#[tokio::test]
async fn test_edit_unknown_record_notifies() {
    let app = TestApp::new();
    let cookie = app.sign_in().await;

    app.get(&format!("/admin/team/{}/edit", uuid::Uuid::new_v4()), Some(&cookie))
        .await;
    let page = body_text(app.get("/admin?tab=team", Some(&cookie)).await).await;
    assert!(page.contains("Team member not found"));
}

#[tokio::test]
async fn test_uploaded_image_is_served() {
    let app = TestApp::new();
    app.seed_event("Robo Wars", EventCategory::Technova, "evt123.jpg").await;

    let response = app.get("/media/event-images/evt123.jpg", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/jpeg");

    let response = app.get("/media/event-images/missing.jpg", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = app.get("/media/avatars/evt123.jpg", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Objects can still be read through the store directly
    assert!(app
        .objects
        .fetch(Bucket::EventImages, "evt123.jpg")
        .await
        .unwrap()
        .is_some());
}
