//! Server-rendered site
//!
//! Pages are plain HTML strings built from the content and the view models.
//! Routing is the static [`ROUTES`] table; every request builds fresh view
//! state, so nothing is shared between visitors.

pub mod admin;
pub mod layout;
pub mod sections;

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse},
    routing::{on, MethodFilter, MethodRouter},
    Form, Router,
};
use std::sync::Arc;

use crate::api::AppState;
use crate::content::{self, Portfolio};
use crate::store::ContactFormDraft;
use crate::views::{AdminViewer, ContactForm, FormState, FormStatus};

/// HTTP verbs used by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
        }
    }
}

/// What a route renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Public page with an idle contact form
    Home,
    /// Public page after a contact form submission
    SubmitContact,
    /// Admin dashboard
    Admin,
    /// Admin dashboard after marking one message read
    MarkRead,
}

#[derive(Debug)]
pub struct Route {
    pub verb: Verb,
    /// axum path pattern; `:name` segments capture
    pub path: &'static str,
    pub page: Page,
}

pub static ROUTES: [Route; 4] = [
    Route {
        verb: Verb::Get,
        path: "/",
        page: Page::Home,
    },
    Route {
        verb: Verb::Post,
        path: "/",
        page: Page::SubmitContact,
    },
    Route {
        verb: Verb::Get,
        path: "/admin",
        page: Page::Admin,
    },
    Route {
        verb: Verb::Post,
        path: "/admin/messages/:id/read",
        page: Page::MarkRead,
    },
];

/// Page routes, registered from [`ROUTES`]
///
/// Entries sharing a path end up in one method router.
pub fn routes() -> Router<Arc<AppState>> {
    ROUTES.iter().fold(Router::new(), |router, route| {
        let filter = route.verb.filter();
        let handler: MethodRouter<Arc<AppState>> = match route.page {
            Page::Home => on(filter, home),
            Page::SubmitContact => on(filter, submit_contact),
            Page::Admin => on(filter, admin_page),
            Page::MarkRead => on(filter, mark_read),
        };
        router.route(route.path, handler)
    })
}

fn public_page(content: &Portfolio, form: &FormState, head_extra: &str) -> Html<String> {
    let body = [
        sections::nav(content),
        sections::hero(content),
        sections::about(content),
        sections::projects(content),
        sections::skills(content),
        sections::education(content),
        sections::contact(content, form),
        sections::footer(content),
    ]
    .concat();

    let title = format!("{} - {}", content.profile.name, content.profile.title);
    layout::document(&title, head_extra, &body)
}

fn admin_document(content: &Portfolio, body: &str) -> Html<String> {
    let title = format!("Admin Dashboard - {}", content.profile.name);
    layout::document(&title, "", &[sections::nav(content), body.to_string()].concat())
}

/// GET /
async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    public_page(state.content, &FormState::default(), "")
}

/// POST /
///
/// Runs one contact form through its submit. The sent panel refreshes back
/// to the idle form after the reset delay.
async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Form(draft): Form<ContactFormDraft>,
) -> Html<String> {
    let form = ContactForm::new(Arc::clone(&state.backend))
        .with_reset_delay(state.config.contact_reset_delay);
    form.fill(draft);
    form.submit().await;

    let form_state = form.state();
    let head_extra = if form_state.status == FormStatus::Submitted {
        format!(
            r##"<meta http-equiv="refresh" content="{};url=/#contact">"##,
            state.config.contact_reset_delay.as_secs()
        )
    } else {
        String::new()
    };

    public_page(state.content, &form_state, &head_extra)
}

/// GET /admin
async fn admin_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let viewer = AdminViewer::mount(Arc::clone(&state.backend)).await;
    let snapshot = viewer.snapshot().await;
    admin_document(state.content, &admin::dashboard(&snapshot))
}

/// POST /admin/messages/:id/read
async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Html<String> {
    let viewer = AdminViewer::mount(Arc::clone(&state.backend)).await;
    viewer.mark_read(&id).await;
    let snapshot = viewer.snapshot().await;
    admin_document(state.content, &admin::dashboard(&snapshot))
}

/// HTML 404 for any path outside the route table
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No page for path");

    let content = content::get();
    let body = format!(
        r#"{nav}<section class="hero">
<h1 class="gradient">404</h1>
<p class="title">Page not found</p>
<p class="tagline">Nothing lives at <code>{path}</code>.</p>
<p><a class="btn btn-primary" href="/">Back to Home</a></p>
</section>"#,
        nav = sections::nav(content),
        path = layout::escape(uri.path()),
    );

    (
        StatusCode::NOT_FOUND,
        layout::document("Page not found", "", &body),
    )
}
