use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use media_admin_backend::config::AppConfig;
use media_admin_backend::infrastructure::{database, storage};
use media_admin_backend::services::media_service::MediaService;
use media_admin_backend::{AppState, create_app};
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "---------------------------123456789012345678901234567";

async fn setup_app() -> (Router, DatabaseConnection, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = AppConfig::development(tmp.path().to_path_buf());

    let db = Database::connect("sqlite::memory:").await.unwrap();
    database::run_migrations(&db).await.unwrap();

    let store = storage::setup_storage(&config).await.unwrap();
    let media = Arc::new(MediaService::new(db.clone(), store));

    let state = AppState {
        db: db.clone(),
        media,
        config,
    };

    (create_app(state), db, tmp)
}

fn multipart_request(
    uri: &str,
    file: Option<(&str, &str, &[u8])>,
    disp: Option<&str>,
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    if let Some((field, filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(caption) = disp {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"disp\"\r\n\r\n\
                 {caption}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_json(app: &Router, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn delete_json(app: &Router, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_banner_lifecycle() {
    let (app, _db, tmp) = setup_app().await;

    // Upload
    let response = app
        .clone()
        .oneshot(multipart_request(
            "/addbanner",
            Some(("banner", "b.png", b"fake png bytes")),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let file_name = created["file_name"].as_str().unwrap().to_string();
    assert!(file_name.starts_with("banner_"));
    assert!(file_name.ends_with(".png"));
    assert!(tmp.path().join("images").join(&file_name).exists());

    // Listed
    let listed = get_json(&app, "/getbanner").await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["file_name"], file_name.as_str());

    // Adding another replaces the first
    let response = app
        .clone()
        .oneshot(multipart_request(
            "/addbanner",
            Some(("banner", "b2.jpg", b"other bytes")),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = get_json(&app, "/getbanner").await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_ne!(listed[0]["file_name"], file_name.as_str());
    assert!(!tmp.path().join("images").join(&file_name).exists());

    // Delete, then the list is empty
    let deleted = delete_json(&app, "/deletebanner").await;
    assert_eq!(deleted["message"], "Banner deleted");
    let listed = get_json(&app, "/getbanner").await;
    assert_eq!(listed.as_array().unwrap().len(), 0);

    // Deleting again still reports success
    let deleted = delete_json(&app, "/deletebanner").await;
    assert_eq!(deleted["message"], "Banner deleted");
}

#[tokio::test]
async fn test_image_upload_and_delete() {
    let (app, _db, tmp) = setup_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/addimage",
            Some(("image", "sofa.jpg", b"jpeg bytes")),
            Some("Our new sofa"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["caption"], "Our new sofa");
    let id = created["id"].as_str().unwrap().to_string();
    let file_name = created["file_name"].as_str().unwrap().to_string();
    assert!(file_name.starts_with("image_"));
    let on_disk = tmp.path().join("images").join(&file_name);
    assert!(on_disk.exists());

    let listed = get_json(&app, "/getimage").await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Delete by id returns the record and removes the file
    let deleted = delete_json(&app, &format!("/deleteimage/{id}")).await;
    assert_eq!(deleted["id"], id.as_str());
    assert!(!on_disk.exists());

    let listed = get_json(&app, "/getimage").await;
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_unknown_id_yields_null() {
    let (app, _db, _tmp) = setup_app().await;

    let deleted = delete_json(&app, "/deleteimage/does-not-exist").await;
    assert!(deleted.is_null());

    let deleted = delete_json(&app, "/deletevideo/does-not-exist").await;
    assert!(deleted.is_null());
}

#[tokio::test]
async fn test_upload_without_file_is_rejected() {
    let (app, _db, _tmp) = setup_app().await;

    // Caption only, no file part
    let response = app
        .clone()
        .oneshot(multipart_request("/addimage", None, Some("caption only")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let listed = get_json(&app, "/getimage").await;
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_video_goes_to_video_directory() {
    let (app, _db, tmp) = setup_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/addvideo",
            Some(("video", "tour.mp4", b"mp4 bytes")),
            Some("Showroom tour"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let file_name = created["file_name"].as_str().unwrap().to_string();
    assert!(file_name.starts_with("video_"));
    assert!(file_name.ends_with(".mp4"));
    assert!(tmp.path().join("videos").join(&file_name).exists());
    assert!(!tmp.path().join("images").join(&file_name).exists());

    let listed = get_json(&app, "/getvideo").await;
    assert_eq!(listed[0]["caption"], "Showroom tour");
}

#[tokio::test]
async fn test_static_serving_of_uploaded_files() {
    let (app, _db, _tmp) = setup_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/addimage",
            Some(("image", "table.png", b"png-ish content")),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let file_name = created["file_name"].as_str().unwrap().to_string();

    // Served publicly under /images
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/images/{file_name}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"png-ish content");

    // Unknown names are a 404
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/images/nope.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
