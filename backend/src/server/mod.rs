//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use state_builders::{build_backends, spawn_announcement_refresh};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use conference_backend::Trace;
#[cfg(debug_assertions)]
use conference_backend::doc::ApiDoc;
use conference_backend::inbound::http::announcements::{get_announcement, get_featured_speaker};
use conference_backend::inbound::http::conferences::{
    create_conference, get_conference, get_conferences_created, get_conferences_to_attend,
    query_conferences, register_for_conference, unregister_from_conference, update_conference,
};
use conference_backend::inbound::http::health::{HealthState, live, ready};
use conference_backend::inbound::http::profiles::{get_profile, save_profile};
use conference_backend::inbound::http::sessions::{
    create_session, get_conference_sessions, get_sessions_by_date, get_sessions_by_name,
    get_sessions_by_speaker, get_sessions_by_type,
};
use conference_backend::inbound::http::state::HttpState;
use conference_backend::inbound::http::users::{login, logout};
use conference_backend::inbound::http::wishlist::{
    add_session_to_wishlist, delete_session_in_wishlist, get_sessions_in_wishlist,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(logout)
        .service(get_announcement)
        .service(get_featured_speaker)
        .service(create_conference)
        .service(get_conference)
        .service(update_conference)
        .service(register_for_conference)
        .service(unregister_from_conference)
        .service(get_conferences_created)
        .service(query_conferences)
        .service(get_conferences_to_attend)
        .service(get_profile)
        .service(save_profile)
        .service(add_session_to_wishlist)
        .service(get_sessions_in_wishlist)
        .service(delete_session_in_wishlist)
        .service(create_session)
        .service(get_conference_sessions)
        .service(get_sessions_by_type)
        .service(get_sessions_by_name)
        .service(get_sessions_by_date)
        .service(get_sessions_by_speaker);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Wires the storage, cache and job adapters selected in `config`, starts the
/// periodic announcement refresh and binds the listener. Must be called from
/// within the Actix runtime.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or configuring
/// metrics fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let backends = build_backends(&config);
    let http_state = web::Data::new(backends.http_state);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        refresh_interval,
        db_pool: _,
        redis_cache: _,
    } = config;

    #[cfg(feature = "metrics")]
    let prometheus = metrics::build_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    spawn_announcement_refresh(backends.jobs, refresh_interval);
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use serde_json::{Value, json};

    use conference_backend::domain::TRACE_ID_HEADER;
    use conference_backend::outbound::cache::MemoryAnnouncementCache;
    use std::sync::Arc;

    fn deps() -> AppDependencies {
        let backends =
            state_builders::memory_backends(Arc::new(MemoryAnnouncementCache::new()));
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(backends.http_state),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[actix_web::test]
    async fn login_then_create_and_fetch_a_conference() {
        let app = test::init_service(build_app(deps())).await;

        let login_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({"email": "ada@example.com", "password": "password"}))
                .to_request(),
        )
        .await;
        assert!(login_res.status().is_success());
        assert!(login_res.headers().contains_key(TRACE_ID_HEADER));
        let cookie = login_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned();

        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/conference")
                .cookie(cookie.clone())
                .set_json(json!({"name": "RustConf", "maxAttendees": 10}))
                .to_request(),
        )
        .await;
        assert!(created.status().is_success());
        let body: Value = test::read_body_json(created).await;
        let key = body["websafeKey"].as_str().expect("websafe key").to_owned();
        assert_eq!(body["seatsAvailable"], 10);

        let fetched = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/conference/{key}"))
                .to_request(),
        )
        .await;
        assert!(fetched.status().is_success());
        let body: Value = test::read_body_json(fetched).await;
        assert_eq!(body["name"], "RustConf");
        assert_eq!(body["organizerDisplayName"], "ada");
    }

    #[actix_web::test]
    async fn literal_routes_are_not_captured_as_keys() {
        let app = test::init_service(build_app(deps())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/conference/announcement/get")
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["data"], "");
    }

    #[actix_web::test]
    async fn protected_routes_reject_anonymous_callers() {
        let app = test::init_service(build_app(deps())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/profile").to_request(),
        )
        .await;
        assert_eq!(res.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn health_checks_are_served_outside_the_api_scope() {
        let app = test::init_service(build_app(deps())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert!(res.status().is_success());
    }
}
