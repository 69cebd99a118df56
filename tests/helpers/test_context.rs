//! Test context for unified test setup
//!
//! Builds the full router over memory-backed record, object and session
//! stores, and drives it with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;
use TechClub::config::{AdminAccount, Settings, StorageBackend};
use TechClub::database::DatabaseService;
use TechClub::models::{Bucket, Event, EventCategory, EventDraft};
use TechClub::services::{hash_password, MemoryObjectStore, ObjectStore, ServiceFactory};
use TechClub::state::{AppContext, MemorySessionStore};

use super::test_data::{multipart_body, multipart_content_type, TestFile};

pub const ADMIN_EMAIL: &str = "admin@ceta.example.edu";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const PUBLIC_BASE_URL: &str = "http://techclub.test";

/// In-process application with inspectable stores
pub struct TestApp {
    pub ctx: AppContext,
    pub objects: Arc<MemoryObjectStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt::try_init();

        let mut settings = Settings::default();
        settings.server.public_base_url = PUBLIC_BASE_URL.to_string();
        settings.storage.backend = StorageBackend::Memory;
        settings.auth.admins = vec![AdminAccount {
            email: ADMIN_EMAIL.to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).expect("Failed to hash password"),
        }];

        let objects = Arc::new(MemoryObjectStore::new(PUBLIC_BASE_URL));
        let services = ServiceFactory::with_object_store(
            &settings,
            objects.clone(),
            Arc::new(MemorySessionStore::new()),
        );
        let database = DatabaseService::in_memory(objects.clone());
        let ctx = AppContext::new(settings, database, services.media, services.auth);

        Self { ctx, objects }
    }

    pub fn router(&self) -> Router {
        TechClub::router(self.ctx.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router()
            .oneshot(request)
            .await
            .expect("Router failed to respond")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_login(&self, email: &str, password: &str) -> Response {
        let body = format!(
            "email={}&password={}",
            urlencoding::encode(email),
            urlencoding::encode(password)
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/login")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Sign in as the configured admin and return the `Cookie` header value
    pub async fn sign_in(&self) -> String {
        let response = self.post_login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie_pair(&response).expect("Sign-in did not set a session cookie")
    }

    pub async fn submit_form(
        &self,
        slug: &str,
        cookie: &str,
        fields: &[(String, String)],
        file: Option<&TestFile>,
    ) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/admin/{}", slug))
            .header(COOKIE, cookie)
            .header(CONTENT_TYPE, multipart_content_type())
            .body(Body::from(multipart_body(fields, file)))
            .unwrap();
        self.send(request).await
    }

    /// Store an image and an event pointing at it, bypassing the admin panel
    pub async fn seed_event(&self, title: &str, category: EventCategory, key: &str) -> Event {
        self.objects
            .put(Bucket::EventImages, key, Bytes::from_static(b"jpeg"), "image/jpeg")
            .await
            .expect("Failed to store seed image");
        let draft = EventDraft {
            title: title.to_string(),
            description: String::new(),
            form_link: None,
            chat_link: None,
            date: chrono::NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            time: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            venue: "Auditorium".to_string(),
            category,
        };
        let url = self.objects.public_url(Bucket::EventImages, key);
        self.ctx
            .database
            .events
            .create(&draft, &url)
            .await
            .expect("Failed to seed event")
    }
}

/// `name=value` part of the session `Set-Cookie` header
pub fn session_cookie_pair(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(str::to_string)
}

pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
