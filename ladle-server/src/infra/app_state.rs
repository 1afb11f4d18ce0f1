use std::{fmt, sync::Arc};

use ladle_config::Config;
use ladle_core::{MediaUploader, RecipeRepository};

#[derive(Clone)]
pub struct AppState {
    pub repository: RecipeRepository,
    pub uploader: Arc<dyn MediaUploader>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        repository: RecipeRepository,
        uploader: Arc<dyn MediaUploader>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            repository,
            uploader,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
