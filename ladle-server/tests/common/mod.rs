use std::{sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use axum_test::TestServer;
use ladle_config::{
    CloudinaryConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
    ServerConfig,
};
use ladle_core::{
    MediaUploader, RecipeRepository,
    database::infrastructure::memory::InMemoryRecipeStore,
};
use ladle_model::{MediaUpload, UploadedMedia};
use ladle_server::{AppState, create_app};
use mockall::mock;

mock! {
    pub Uploader {}

    #[async_trait]
    impl MediaUploader for Uploader {
        async fn upload(&self, file: MediaUpload) -> ladle_core::Result<UploadedMedia>;
    }
}

// Shared across test binaries; not every binary uses every helper.
#[allow(unused)]
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 8000,
        },
        database: DatabaseConfig {
            primary_url: None,
            max_connections: None,
        },
        cloudinary: CloudinaryConfig {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            api_base: "http://127.0.0.1:9".into(),
            upload_timeout: Duration::from_secs(1),
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".into()],
            allowed_methods: vec!["*".into()],
            allowed_headers: vec!["*".into()],
            allow_credentials: false,
        },
        dev_mode: true,
        metadata: ConfigMetadata::default(),
    }
}

#[allow(unused)]
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryRecipeStore>,
}

#[allow(unused)]
pub fn build_test_app(uploader: MockUploader) -> Result<TestApp> {
    build_test_app_with_store(InMemoryRecipeStore::new(), uploader)
}

#[allow(unused)]
pub fn build_test_app_with_store(
    store: InMemoryRecipeStore,
    uploader: MockUploader,
) -> Result<TestApp> {
    let store = Arc::new(store);
    let uploader: Arc<dyn MediaUploader> = Arc::new(uploader);
    let state = AppState::new(
        RecipeRepository::new(store.clone()),
        uploader,
        Arc::new(test_config()),
    );

    let server = TestServer::new(create_app(state))
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    Ok(TestApp { server, store })
}

/// An uploader that fails the test if it is ever called.
#[allow(unused)]
pub fn unused_uploader() -> MockUploader {
    let mut uploader = MockUploader::new();
    uploader.expect_upload().never();
    uploader
}
