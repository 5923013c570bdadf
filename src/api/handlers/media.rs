use crate::api::error::AppError;
use crate::entities::{banners, gallery_images, videos};
use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde_json::{Value, json};

/// One file plus the optional `disp` caption field, pulled out of a multipart
/// request.
struct MediaUpload {
    original_name: String,
    data: Vec<u8>,
    caption: Option<String>,
}

/// Walk the multipart fields looking for the named file part. A request
/// without it is a client error and nothing gets persisted.
async fn read_upload(mut multipart: Multipart, file_field: &str) -> Result<MediaUpload, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut caption: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == file_field {
            let original_name = field.file_name().unwrap_or("unnamed").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?;
            file = Some((original_name, data.to_vec()));
        } else if name == "disp" {
            caption = Some(field.text().await.unwrap_or_default());
        }
    }

    let (original_name, data) =
        file.ok_or_else(|| AppError::Validation(format!("No '{file_field}' file attached")))?;

    Ok(MediaUpload {
        original_name,
        data,
        caption,
    })
}

#[utoipa::path(
    post,
    path = "/addbanner",
    request_body(content = String, content_type = "multipart/form-data", description = "File in field `banner`"),
    responses(
        (status = 200, description = "Banner stored, replacing any previous one"),
        (status = 400, description = "No file attached")
    )
)]
pub async fn add_banner(
    State(state): State<crate::AppState>,
    multipart: Multipart,
) -> Result<Json<banners::Model>, AppError> {
    let upload = read_upload(multipart, "banner").await?;
    let banner = state
        .media
        .replace_banner(&upload.original_name, &upload.data)
        .await?;
    Ok(Json(banner))
}

#[utoipa::path(
    get,
    path = "/getbanner",
    responses((status = 200, description = "All banner records"))
)]
pub async fn get_banner(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<banners::Model>>, AppError> {
    Ok(Json(state.media.list_banners().await?))
}

#[utoipa::path(
    delete,
    path = "/deletebanner",
    responses((status = 200, description = "First banner found removed, if any"))
)]
pub async fn delete_banner(State(state): State<crate::AppState>) -> Result<Json<Value>, AppError> {
    state.media.delete_first_banner().await?;
    Ok(Json(json!({ "message": "Banner deleted" })))
}

#[utoipa::path(
    post,
    path = "/addimage",
    request_body(content = String, content_type = "multipart/form-data", description = "File in field `image`, caption in field `disp`"),
    responses(
        (status = 200, description = "Gallery image stored"),
        (status = 400, description = "No file attached")
    )
)]
pub async fn add_image(
    State(state): State<crate::AppState>,
    multipart: Multipart,
) -> Result<Json<gallery_images::Model>, AppError> {
    let upload = read_upload(multipart, "image").await?;
    let image = state
        .media
        .add_image(&upload.original_name, &upload.data, upload.caption)
        .await?;
    Ok(Json(image))
}

#[utoipa::path(
    get,
    path = "/getimage",
    responses((status = 200, description = "All gallery image records"))
)]
pub async fn get_image(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<gallery_images::Model>>, AppError> {
    Ok(Json(state.media.list_images().await?))
}

#[utoipa::path(
    delete,
    path = "/deleteimage/{id}",
    params(("id" = String, Path, description = "Gallery image id")),
    responses((status = 200, description = "Deleted record, or null for an unknown id"))
)]
pub async fn delete_image(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<gallery_images::Model>>, AppError> {
    Ok(Json(state.media.delete_image(&id).await?))
}

#[utoipa::path(
    post,
    path = "/addvideo",
    request_body(content = String, content_type = "multipart/form-data", description = "File in field `video`, caption in field `disp`"),
    responses(
        (status = 200, description = "Video stored"),
        (status = 400, description = "No file attached")
    )
)]
pub async fn add_video(
    State(state): State<crate::AppState>,
    multipart: Multipart,
) -> Result<Json<videos::Model>, AppError> {
    let upload = read_upload(multipart, "video").await?;
    let video = state
        .media
        .add_video(&upload.original_name, &upload.data, upload.caption)
        .await?;
    Ok(Json(video))
}

#[utoipa::path(
    get,
    path = "/getvideo",
    responses((status = 200, description = "All video records"))
)]
pub async fn get_video(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<videos::Model>>, AppError> {
    Ok(Json(state.media.list_videos().await?))
}

#[utoipa::path(
    delete,
    path = "/deletevideo/{id}",
    params(("id" = String, Path, description = "Video id")),
    responses((status = 200, description = "Deleted record, or null for an unknown id"))
)]
pub async fn delete_video(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<videos::Model>>, AppError> {
    Ok(Json(state.media.delete_video(&id).await?))
}
