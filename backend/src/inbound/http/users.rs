//! Login and logout handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"ada@example.com","password":"password"}
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"ada@example.com","password":"password"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_argument("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => {
            Error::invalid_argument("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let identity = state.login.authenticate(&credentials).await?;
    session.persist_identity(&identity)?;
    info!(user_id = %identity.user_id(), "user logged in");
    Ok(HttpResponse::Ok().finish())
}

/// Forget the caller's session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use mockall::predicate::function;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::Identity;
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};

    fn request(email: &str, password: &str) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&LoginRequest {
                email: email.into(),
                password: password.into(),
            })
    }

    fn ports_accepting(password: &'static str) -> MockPorts {
        let mut ports = MockPorts::default();
        ports
            .login
            .expect_authenticate()
            .returning(move |creds| {
                if creds.password() == password {
                    Identity::from_email(creds.email())
                        .map_err(|_| Error::unauthorized("invalid credentials"))
                } else {
                    Err(Error::unauthorized("invalid credentials"))
                }
            });
        ports
    }

    macro_rules! app {
        ($ports:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new($ports.into_state()))
                    .wrap(test_session_middleware())
                    .service(web::scope("/api/v1").service(login).service(logout)),
            )
            .await
        };
    }

    #[rstest]
    #[case("   ", "password", "email must not be empty", "email", "empty_email")]
    #[case("ada@example.com", "", "password must not be empty", "password", "empty_password")]
    #[actix_web::test]
    async fn login_rejects_blank_fields(
        #[case] email: &str,
        #[case] password: &str,
        #[case] message: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mut ports = MockPorts::default();
        ports.login.expect_authenticate().never();
        let app = app!(ports);

        let response = actix_test::call_service(&app, request(email, password).to_request()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["message"], message);
        assert_eq!(value["code"], "invalid_argument");
        assert_eq!(value["details"]["field"], field);
        assert_eq!(value["details"]["code"], code);
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorised() {
        let app = app!(ports_accepting("password"));
        let response =
            actix_test::call_service(&app, request("ada@example.com", "nope").to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn successful_login_sets_a_session_cookie() {
        let mut ports = MockPorts::default();
        ports
            .login
            .expect_authenticate()
            .with(function(|creds: &LoginCredentials| {
                creds.email() == "ada@example.com"
            }))
            .times(1)
            .returning(|creds| {
                Identity::from_email(creds.email()).map_err(|_| Error::internal("fixture"))
            });
        let app = app!(ports);

        let response = actix_test::call_service(
            &app,
            request(" ada@example.com ", "password").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!session_cookie(&response).value().is_empty());
    }

    #[actix_web::test]
    async fn logout_returns_no_content() {
        let app = app!(MockPorts::default());
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/logout")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
