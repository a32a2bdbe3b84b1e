//! Routes are registered through `scope::<R>()` rather than attribute macros
//! so the repository behind the service can be swapped in tests.

use crate::application::user_service::UserService;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::{
    ChangePasswordRequest, CreateUserRequest, CreatedUserResponse, PasswordChangedResponse,
    UpdateUserRequest, UserIdResponse,
};
use crate::presentation::error::ApiError;
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, Scope, web};
use tracing::{error, info, warn};

pub fn scope<R: UserRepository + 'static>() -> Scope {
    web::scope("/users")
        .route("", web::get().to(list_users::<R>))
        .route("", web::post().to(create_user::<R>))
        .route("/{id}", web::get().to(get_user::<R>))
        .route("/{id}", web::put().to(update_user::<R>))
        .route("/{id}", web::delete().to(delete_user::<R>))
        .route("/{id}/change-password", web::post().to(change_password::<R>))
}

/// Logs the underlying cause and collapses it into a generic 422.
fn reject(req: &HttpRequest, err: &DomainError, message: &str) -> ApiError {
    warn!(
        request_id = %request_id(req),
        error = %err,
        "{}",
        message
    );
    ApiError::unprocessable(message)
}

async fn list_users<R: UserRepository + 'static>(
    req: HttpRequest,
    service: web::Data<UserService<R>>,
) -> Result<HttpResponse, ApiError> {
    let users = service.get_users().await.map_err(|err| {
        error!(request_id = %request_id(&req), error = %err, "failed to list users");
        ApiError::internal("Failed to list users")
    })?;

    Ok(HttpResponse::Ok().json(users))
}

async fn get_user<R: UserRepository + 'static>(
    req: HttpRequest,
    service: web::Data<UserService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = service
        .get_user(&path)
        .await
        .map_err(|err| reject(&req, &err, "Unknown user"))?;

    Ok(HttpResponse::Ok().json(user))
}

async fn create_user<R: UserRepository + 'static>(
    req: HttpRequest,
    service: web::Data<UserService<R>>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let CreateUserRequest {
        name,
        email,
        password,
        confirm_password,
    } = payload.into_inner();

    if password != confirm_password {
        return Err(ApiError::invalid_password(
            "Password and Confirm Password is different",
        ));
    }

    match service.prevent_duplicate_email(&email).await {
        Ok(true) => return Err(ApiError::email_already_taken()),
        Ok(false) => {}
        Err(err) => return Err(reject(&req, &err, "Failed to create user")),
    }

    let id = service
        .create_user(name.clone(), email.clone(), &password)
        .await
        .map_err(|err| reject(&req, &err, "Failed to create user"))?;

    info!(
        request_id = %request_id(&req),
        user_id = %id,
        "user registered"
    );

    Ok(HttpResponse::Ok().json(CreatedUserResponse { name, email }))
}

async fn update_user<R: UserRepository + 'static>(
    req: HttpRequest,
    service: web::Data<UserService<R>>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    match service.email_taken_by_other(&id, &payload.email).await {
        Ok(true) => return Err(ApiError::email_already_taken()),
        Ok(false) => {}
        Err(err) => return Err(reject(&req, &err, "Failed to update user")),
    }

    service
        .update_user(&id, &payload.name, &payload.email)
        .await
        .map_err(|err| reject(&req, &err, "Failed to update user"))?;

    info!(request_id = %request_id(&req), user_id = %id, "user updated");

    Ok(HttpResponse::Ok().json(UserIdResponse { id }))
}

async fn delete_user<R: UserRepository + 'static>(
    req: HttpRequest,
    service: web::Data<UserService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    service
        .delete_user(&id)
        .await
        .map_err(|err| reject(&req, &err, "Failed to delete user"))?;

    info!(request_id = %request_id(&req), user_id = %id, "user deleted");

    Ok(HttpResponse::Ok().json(UserIdResponse { id }))
}

async fn change_password<R: UserRepository + 'static>(
    req: HttpRequest,
    service: web::Data<UserService<R>>,
    path: web::Path<String>,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let ChangePasswordRequest {
        old_password,
        new_password,
        confirm_new_password,
    } = payload.into_inner();

    if old_password == new_password {
        return Err(ApiError::invalid_password(
            "Old Password and New Password are the same",
        ));
    }
    if new_password != confirm_new_password {
        return Err(ApiError::invalid_password(
            "New Password and Confirm New Password is different",
        ));
    }

    service
        .check_old_password(&id, &old_password, &new_password)
        .await
        .map_err(|err| reject(&req, &err, "Failed to change password"))?;

    info!(request_id = %request_id(&req), user_id = %id, "password changed");

    Ok(HttpResponse::Ok().json(PasswordChangedResponse {
        id,
        old_password,
        new_password,
    }))
}
