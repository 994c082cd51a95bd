use std::io::Read;
use std::path::PathBuf;

use crate::auth::sessions::{load_user_from_session, revoke_session, session_token};
use crate::auth::CurrentUser;
use crate::cases::{fetch_open_cases, CaseErrorKind, CaseGateway, CaseServiceError, SessionCases};
use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::domain::CaseStatus;
use crate::errors::ServerError;
use crate::map::{AssetLoader, LeafletScript, MapView};
use crate::responses::{
    html_response, html_with_status, json_response, json_with_status, no_content,
    signed_out_redirect, static_file, ResultResp,
};
use crate::templates::pages::{dashboard_page, map_update, DashboardVm};
use astra::Request;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is in a case id path segment.
const CASE_ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Everything a request handler needs, built once at startup.
pub struct App {
    pub db: Database,
    pub config: AppConfig,
    pub assets: Box<dyn AssetLoader>,
}

impl App {
    pub fn new(config: AppConfig, assets: Box<dyn AssetLoader>) -> Self {
        Self {
            db: config.database(),
            config,
            assets,
        }
    }

    pub fn static_dir(&self) -> PathBuf {
        self.config.static_dir.clone()
    }
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    if let Some(rel) = path.strip_prefix("/static/") {
        return match method.as_str() {
            "GET" => static_file(&app.static_dir(), rel),
            _ => Err(ServerError::NotFound),
        };
    }

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => {
            let user = require_user(&req, app)?;
            dashboard(app, &user)
        }
        ("GET", "/dashboard/cases-layer") => {
            let user = require_user(&req, app)?;
            refresh_layer(app, &user)
        }
        ("GET", "/api/cases") => {
            let user = require_user(&req, app)?;
            match fetch_open_cases(&app.db, user.id) {
                Ok(cases) => json_response(&cases),
                Err(e) => service_error(&e),
            }
        }
        ("POST", "/logout") => logout(&req, app),
        ("POST", p) => {
            if let Some(id) = case_route(p, "/cases/", "/resolve") {
                let user = require_user(&req, app)?;
                return resolve(app, &user, &id);
            }
            if let Some(id) = case_route(p, "/api/cases/", "/status") {
                let user = require_user(&req, app)?;
                return update_status(req, app, &user, id);
            }
            Err(ServerError::NotFound)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn dashboard(app: &App, user: &CurrentUser) -> ResultResp {
    let gateway = SessionCases::new(&app.db, user.id);
    let mut view = MapView::new(LeafletScript::new(), app.config.map.clone());
    view.mount(app.assets.as_ref(), &gateway);

    let items = view.case_list();
    let vm = DashboardVm {
        email: &user.email,
        state: view.state(),
        has_map: view.has_map(),
        library: view.library(),
        container_id: &view.settings().container_id,
        map_script: view.backend().script(),
        items: &items,
        notices: view.notices(),
    };
    let page = dashboard_page(&vm);

    if view.has_map() {
        html_response(page)
    } else {
        html_with_status(503, page)
    }
}

fn refresh_layer(app: &App, user: &CurrentUser) -> ResultResp {
    let gateway = SessionCases::new(&app.db, user.id);
    let mut view = attached_view(app)?;
    view.refresh(&gateway);
    map_fragment(&view)
}

fn resolve(app: &App, user: &CurrentUser, case_id: &str) -> ResultResp {
    let gateway = SessionCases::new(&app.db, user.id);
    let mut view = attached_view(app)?;
    view.resolve(case_id, &gateway);
    map_fragment(&view)
}

fn attached_view(app: &App) -> Result<MapView<LeafletScript>, ServerError> {
    let map = app.config.map.clone();
    let backend = LeafletScript::attached(&map.container_id);
    MapView::resume(backend, map).map_err(|e| {
        log::error!("could not attach to the map: {e}");
        ServerError::InternalError
    })
}

fn map_fragment(view: &MapView<LeafletScript>) -> ResultResp {
    let items = view.case_list();
    let listed = view.state().is_ready().then_some(items.as_slice());
    html_response(map_update(&view.backend().script(), listed, view.notices()))
}

fn update_status(mut req: Request, app: &App, user: &CurrentUser, case_id: String) -> ResultResp {
    let mut body = String::new();
    req.body_mut()
        .reader()
        .read_to_string(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;

    let raw = url::form_urlencoded::parse(body.as_bytes())
        .find(|(k, _)| k == "status")
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| ServerError::BadRequest("missing status".into()))?;
    let status: CaseStatus = raw.parse().map_err(ServerError::BadRequest)?;

    let gateway = SessionCases::new(&app.db, user.id);
    match gateway.update_case_status(&case_id, status) {
        Ok(()) => no_content(),
        Err(e) => service_error(&e),
    }
}

fn logout(req: &Request, app: &App) -> ResultResp {
    if let Some(token) = session_token(req) {
        let now = chrono::Utc::now().timestamp();
        app.db.with_conn(|conn| revoke_session(conn, &token, now))?;
    }
    signed_out_redirect("/")
}

fn require_user(req: &Request, app: &App) -> Result<CurrentUser, ServerError> {
    let token = session_token(req)
        .ok_or_else(|| ServerError::Unauthorized("Sign in to see your cases.".into()))?;
    let now = chrono::Utc::now().timestamp();

    app.db
        .with_conn(|conn| load_user_from_session(conn, &token, now))?
        .ok_or_else(|| ServerError::Unauthorized("Your session has expired.".into()))
}

fn service_error(err: &CaseServiceError) -> ResultResp {
    let status = match err.kind {
        CaseErrorKind::NotFound => 404,
        CaseErrorKind::Rejected => 400,
        CaseErrorKind::Unavailable => 500,
    };
    json_with_status(status, &serde_json::json!({ "message": err.message }))
}

/// Path the popup's resolve button posts to.
pub fn resolve_path(case_id: &str) -> String {
    format!("/cases/{}/resolve", utf8_percent_encode(case_id, CASE_ID_SEGMENT))
}

/// `/cases/{id}/resolve` style paths; the id is one percent-encoded segment.
fn case_route(path: &str, prefix: &str, suffix: &str) -> Option<String> {
    let raw = path.strip_prefix(prefix)?.strip_suffix(suffix)?;
    if raw.is_empty() || raw.contains('/') {
        return None;
    }
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|id| id.into_owned())
}
