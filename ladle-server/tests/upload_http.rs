use anyhow::Result;
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use ladle_core::{RecipeError, api::routes::upload};
use ladle_model::UploadedMedia;
use ladle_server::handlers::upload::UPLOAD_BODY_LIMIT;
use serde_json::json;

mod common;
use common::{MockUploader, build_test_app, unused_uploader};

const JPEG: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10];

fn photo_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(JPEG.to_vec())
            .file_name("photo.jpg")
            .mime_type("image/jpeg"),
    )
}

#[tokio::test]
async fn upload_returns_provider_url() -> Result<()> {
    let mut uploader = MockUploader::new();
    uploader
        .expect_upload()
        .withf(|file| {
            file.bytes == JPEG
                && file.file_name.as_deref() == Some("photo.jpg")
                && file.content_type.as_deref() == Some("image/jpeg")
        })
        .times(1)
        .returning(|_| {
            Ok(UploadedMedia {
                url: "https://res.cloudinary.com/demo/image/upload/v1/photo.jpg"
                    .to_string(),
            })
        });
    let app = build_test_app(uploader)?;

    let response = app.server.post(upload::FILE).multipart(photo_form()).await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "file_url": "https://res.cloudinary.com/demo/image/upload/v1/photo.jpg"
    }));
    Ok(())
}

#[tokio::test]
async fn bare_upload_path_is_served() -> Result<()> {
    let mut uploader = MockUploader::new();
    uploader.expect_upload().times(1).returning(|_| {
        Ok(UploadedMedia {
            url: "https://img.example/x.jpg".to_string(),
        })
    });
    let app = build_test_app(uploader)?;

    app.server
        .post(upload::FILE_BARE)
        .multipart(photo_form())
        .await
        .assert_status_ok();
    Ok(())
}

#[tokio::test]
async fn provider_failure_is_a_generic_500() -> Result<()> {
    let mut uploader = MockUploader::new();
    uploader.expect_upload().times(1).returning(|_| {
        Err(RecipeError::Upstream(
            "Invalid Signature 8f2c... String to sign - 'timestamp=1'".into(),
        ))
    });
    let app = build_test_app(uploader)?;

    let response = app.server.post(upload::FILE).multipart(photo_form()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": { "message": "File upload failed", "status": 500 }
    }));
    assert!(!response.text().contains("Signature"));
    Ok(())
}

#[tokio::test]
async fn oversized_upload_is_rejected_before_the_provider() -> Result<()> {
    let app = build_test_app(unused_uploader())?;

    let oversized = vec![0u8; UPLOAD_BODY_LIMIT + 1024 * 1024];
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(oversized)
            .file_name("huge.jpg")
            .mime_type("image/jpeg"),
    );
    let response = app.server.post(upload::FILE).multipart(form).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    Ok(())
}

#[tokio::test]
async fn missing_file_field_is_a_400() -> Result<()> {
    let app = build_test_app(unused_uploader())?;

    let form = MultipartForm::new().add_text("caption", "no file here");
    let response = app.server.post(upload::FILE).multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn non_multipart_body_is_rejected() -> Result<()> {
    let app = build_test_app(unused_uploader())?;

    let response = app
        .server
        .post(upload::FILE)
        .json(&json!({ "file": "not a file" }))
        .await;

    assert!(response.status_code().is_client_error());
    Ok(())
}
