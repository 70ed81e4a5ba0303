//! Guest endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{BookingRepository, UserRepository};
use shared::pagination::{clamp_limit, decode_cursor, split_page};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::{map_restricted_delete, ApiError};
use domain::models::booking::BookingResponse;
use domain::models::user::{
    CreateUserRequest, ListUsersQuery, ListUsersResponse, UpdateUserRequest, UserResponse,
};

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found".to_string())
}

/// Register a guest.
///
/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate()?;

    let user_repo = UserRepository::new(state.pool.clone());
    if user_repo.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let entity = user_repo
        .create(&request.email, request.full_name.trim())
        .await?;

    let user: domain::models::User = entity.into();
    let response: UserResponse = user.into();

    info!(user_id = %response.id, "User created");

    Ok((StatusCode::CREATED, Json(response)))
}

/// List guests, newest first.
///
/// GET /api/v1/users?cursor=&limit=
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    let after = query.cursor.as_deref().map(decode_cursor).transpose()?;
    let limit = clamp_limit(query.limit);

    let user_repo = UserRepository::new(state.pool.clone());
    let entities = user_repo.list(after, limit + 1).await?;
    let (entities, next_cursor) = split_page(entities, limit, |e| (e.created_at, e.id));
    let total = user_repo.count().await?;

    let users = entities
        .into_iter()
        .map(|e| {
            let u: domain::models::User = e.into();
            u.into()
        })
        .collect();

    Ok(Json(ListUsersResponse {
        users,
        total,
        next_cursor,
    }))
}

/// Get a single guest by ID.
///
/// GET /api/v1/users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_repo = UserRepository::new(state.pool.clone());
    let entity = user_repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(user_not_found)?;

    let user: domain::models::User = entity.into();
    Ok(Json(user.into()))
}

/// Update a guest (partial update).
///
/// PATCH /api/v1/users/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    request.validate()?;

    let user_repo = UserRepository::new(state.pool.clone());
    if let Some(ref email) = request.email {
        if let Some(existing) = user_repo.find_by_email(email).await? {
            if existing.id != user_id {
                return Err(ApiError::Conflict("Email already registered".to_string()));
            }
        }
    }

    let entity = user_repo
        .update(
            user_id,
            request.email.as_deref(),
            request.full_name.as_deref().map(str::trim),
        )
        .await?
        .ok_or_else(user_not_found)?;

    let user: domain::models::User = entity.into();
    let response: UserResponse = user.into();

    info!(user_id = %response.id, "User updated");

    Ok(Json(response))
}

/// Delete a guest.
///
/// DELETE /api/v1/users/:user_id
///
/// Refused with 409 while any booking still references the guest.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let user_repo = UserRepository::new(state.pool.clone());
    let rows_affected = user_repo
        .delete(user_id)
        .await
        .map_err(|e| map_restricted_delete(e, "User"))?;

    if rows_affected == 0 {
        return Err(user_not_found());
    }

    info!(user_id = %user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// List the bookings a guest owns, ordered by check-in.
///
/// GET /api/v1/users/:user_id/bookings
pub async fn list_user_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let user_repo = UserRepository::new(state.pool.clone());
    if user_repo.find_by_id(user_id).await?.is_none() {
        return Err(user_not_found());
    }

    let booking_repo = BookingRepository::new(state.pool.clone());
    let bookings = booking_repo
        .find_by_user_id(user_id)
        .await?
        .into_iter()
        .map(|e| {
            let b: domain::models::Booking = e.into();
            b.into()
        })
        .collect();

    Ok(Json(bookings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_deserialization() {
        let json = r#"{"email": "ana@example.com", "full_name": "Ana Torres"}"#;
        let request: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "ana@example.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_user_request_partial() {
        let json = r#"{"full_name": "Ana T."}"#;
        let request: UpdateUserRequest = serde_json::from_str(json).unwrap();
        assert!(request.email.is_none());
        assert_eq!(request.full_name.as_deref(), Some("Ana T."));
    }

    #[test]
    fn test_list_users_query_defaults() {
        let query: ListUsersQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(clamp_limit(query.limit), shared::pagination::DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_user_not_found_status() {
        use axum::response::IntoResponse;
        assert_eq!(user_not_found().into_response().status(), StatusCode::NOT_FOUND);
    }
}
