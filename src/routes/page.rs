use actix_web::{
    HttpRequest, HttpResponse, HttpResponseBuilder,
    cookie::{Cookie, SameSite},
    get,
    http::{StatusCode, header},
    post, web,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::errors::LookupError;
use crate::lookup::{AddressLookup, PendingLookup, Submission, render, run_lookup};
use crate::models::lookup::LookupResult;
use crate::sessions::SESSION_COOKIE;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupForm {
    #[serde(default)]
    pub address: String,
}

/// Session id from the request cookie, or a fresh one that still has to be set.
#[derive(Debug, Clone, Copy)]
struct SessionId {
    id: Uuid,
    fresh: bool,
}

impl SessionId {
    fn from_request(req: &HttpRequest) -> Self {
        match req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        {
            Some(id) => Self { id, fresh: false },
            None => Self {
                id: Uuid::new_v4(),
                fresh: true,
            },
        }
    }

    fn respond(self, status: StatusCode) -> HttpResponseBuilder {
        let mut builder = HttpResponse::build(status);

        if self.fresh {
            let cookie = Cookie::build(SESSION_COOKIE, self.id.to_string())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .finish();
            builder.cookie(cookie);
        }

        builder
    }

    fn redirect_home(self) -> HttpResponse {
        self.respond(StatusCode::SEE_OTHER)
            .insert_header((header::LOCATION, "/"))
            .finish()
    }
}

#[get("/")]
async fn index_get(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let session = SessionId::from_request(&req);
    // New visitors get a blank page; their session is created on first submit.
    let lookup = if session.fresh {
        AddressLookup::new()
    } else {
        state.sessions.snapshot(session.id)
    };
    let html = render::page(&lookup, &state.config).to_html();

    session
        .respond(StatusCode::OK)
        .content_type("text/html; charset=utf-8")
        .body(html)
}

#[post("/lookup")]
async fn lookup_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LookupForm>,
) -> HttpResponse {
    let session = SessionId::from_request(&req);
    let form = form.into_inner();

    let pending = match state.sessions.begin_submit(session.id, form.address) {
        Submission::Pending(pending) => pending,
        Submission::Rejected => {
            tracing::debug!("Lookup already in flight for session {}", session.id);
            return session.redirect_home();
        }
        Submission::Settled => return session.redirect_home(),
    };

    spawn_lookup(&state, session.id, pending);

    // The browser lands on the loading page and polls until the lookup settles.
    session.redirect_home()
}

/// Runs the lookup in the background and settles the session when it finishes.
///
/// The inner task does the work; the outer one only waits on it so a failed
/// task still clears the loading state.
fn spawn_lookup(state: &AppState, id: Uuid, pending: PendingLookup) {
    let sessions = state.sessions.clone();
    let source = state.source.clone();

    actix_web::rt::spawn(async move {
        let task = actix_web::rt::spawn({
            let sessions = sessions.clone();
            let pending = pending.clone();

            async move {
                let outcome = run_lookup(source.as_ref(), pending.address()).await;
                sessions.complete(id, pending, outcome);
            }
        });

        if let Err(e) = task.await {
            tracing::error!("Lookup task for session {id} failed: {e}");
            let outcome = LookupResult::failure(pending.address(), &LookupError::Unexpected);
            sessions.complete(id, pending, outcome);
        }
    });
}

#[post("/reset")]
async fn reset_post(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let session = SessionId::from_request(&req);
    state.sessions.reset(session.id);

    session.redirect_home()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(index_get)
        .service(lookup_post)
        .service(reset_post);
}
