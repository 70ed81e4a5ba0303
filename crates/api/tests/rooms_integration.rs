//! Integration tests for room endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_booking, create_room, create_user, delete_request, get_request, json_request, send,
    setup, TestRoom,
};
use serde_json::json;

#[tokio::test]
async fn test_create_room_success() {
    let (_pool, app) = setup().await;
    let room = TestRoom::new();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/rooms", room.to_json()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["number"].as_str().unwrap(), room.number);
    assert_eq!(body["capacity"], 2);
    assert_eq!(body["price_per_night"], "120.00");
}

#[tokio::test]
async fn test_create_room_duplicate_number() {
    let (_pool, app) = setup().await;
    let room = TestRoom::new();

    send(
        &app,
        json_request(Method::POST, "/api/v1/rooms", room.to_json()),
    )
    .await;
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/rooms", room.to_json()),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains(&room.number));
}

#[tokio::test]
async fn test_create_room_validation() {
    let (_pool, app) = setup().await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/rooms",
            json!({
                "number": "bad number!",
                "room_type": "single",
                "capacity": 0,
                "price_per_night": "-1"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("number"));
    assert!(message.contains("capacity"));
}

#[tokio::test]
async fn test_get_and_update_room() {
    let (_pool, app) = setup().await;
    let room_id = create_room(&app).await;
    let uri = format!("/api/v1/rooms/{}", room_id);

    let (status, body) = send(&app, get_request(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["room_type"], "double");

    let (status, body) = send(
        &app,
        json_request(
            Method::PATCH,
            &uri,
            json!({ "room_type": "suite", "price_per_night": "310.25" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["room_type"], "suite");
    assert_eq!(body["price_per_night"], "310.25");
    assert_eq!(body["capacity"], 2);
}

#[tokio::test]
async fn test_update_unknown_room() {
    let (_pool, app) = setup().await;

    let (status, _) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/api/v1/rooms/{}", uuid::Uuid::new_v4()),
            json!({ "capacity": 3 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_rooms_contains_created() {
    let (_pool, app) = setup().await;
    let room_id = create_room(&app).await;

    let (status, body) = send(&app, get_request("/api/v1/rooms")).await;

    assert_eq!(status, StatusCode::OK);
    let rooms = body["rooms"].as_array().unwrap();
    assert!(rooms.iter().any(|r| r["id"] == room_id.as_str()));
}

#[tokio::test]
async fn test_delete_room_with_bookings_conflict() {
    let (_pool, app) = setup().await;
    let user_id = create_user(&app).await;
    let room_id = create_room(&app).await;
    let booking = create_booking(&app, &user_id, &room_id).await;
    let room_uri = format!("/api/v1/rooms/{}", room_id);

    let (status, body) = send(&app, delete_request(&room_uri)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Room still has bookings");

    // Once the booking is gone the room can be removed
    let booking_uri = format!("/api/v1/bookings/{}", booking["id"].as_str().unwrap());
    let (status, _) = send(&app, delete_request(&booking_uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, delete_request(&room_uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_list_room_bookings() {
    let (_pool, app) = setup().await;
    let user_id = create_user(&app).await;
    let room_id = create_room(&app).await;
    let booking = create_booking(&app, &user_id, &room_id).await;

    let (status, body) = send(
        &app,
        get_request(&format!("/api/v1/rooms/{}/bookings", room_id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let bookings = body.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["id"], booking["id"]);
    assert_eq!(bookings[0]["room_id"], room_id.as_str());
}
