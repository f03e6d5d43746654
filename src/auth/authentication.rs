use rocket::Request;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use tracing::Instrument;

use crate::database::Store;
use crate::db::get_session_by_token;
use crate::error::AppError;
use crate::validation::ValidationResponse;

use super::User;

/// The raw `Authorization` header, for handlers that need the token itself.
pub struct Authorization(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Authorization {
    type Error = AppError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match request.headers().get_one("Authorization") {
            Some(value) => Outcome::Success(Authorization(value.to_string())),
            None => {
                let err = AppError::Authentication("Missing authorization header".to_string());
                err.log_and_record("Authorization header guard");
                Outcome::Error((Status::Unauthorized, err))
            }
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for User {
    type Error = AppError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        authenticate(request)
            .instrument(tracing::info_span!("user_auth_guard"))
            .await
    }
}

async fn authenticate(request: &Request<'_>) -> Outcome<User, AppError> {
    let authorization = match request.guard::<Authorization>().await {
        Outcome::Success(authorization) => authorization,
        Outcome::Error(failure) => return Outcome::Error(failure),
        Outcome::Forward(status) => return Outcome::Forward(status),
    };

    let store = match request.rocket().state::<Store>() {
        Some(store) => store,
        _ => {
            tracing::error!("Store not found in managed state");
            return Outcome::Error((
                Status::InternalServerError,
                AppError::Internal("Store not managed".to_string()),
            ));
        }
    };

    match get_session_by_token(store, &authorization.0).await {
        Ok(session) => {
            tracing::info!(username = %session.user.username, "User authenticated via session token");
            Outcome::Success(session.user)
        }
        Err(err) => {
            err.log_and_record("User session guard");
            Outcome::Error((Status::Unauthorized, err))
        }
    }
}

#[catch(401)]
pub fn unauthorized_api(_req: &Request) -> Custom<Json<ValidationResponse>> {
    Custom(
        Status::Unauthorized,
        Json(ValidationResponse::with_error(
            "authentication",
            "Authentication required",
        )),
    )
}

#[catch(404)]
pub fn not_found_api(req: &Request) -> Custom<Json<ValidationResponse>> {
    Custom(
        Status::NotFound,
        Json(ValidationResponse::with_error(
            "resource",
            &format!("No route for {} {}", req.method(), req.uri()),
        )),
    )
}

#[catch(422)]
pub fn unprocessable_api(_req: &Request) -> Custom<Json<ValidationResponse>> {
    Custom(
        Status::UnprocessableEntity,
        Json(ValidationResponse::with_error(
            "request",
            "Request could not be parsed",
        )),
    )
}
