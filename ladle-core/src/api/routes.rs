macro_rules! api_path {
    ($path:literal) => {
        concat!("/api", $path)
    };
}

/// Service greeting, outside the API prefix.
pub const ROOT: &str = "/";

pub mod recipes {
    pub const COLLECTION: &str = api_path!("/recipes/");
    /// Same handlers as [`COLLECTION`] for clients that drop the slash.
    pub const COLLECTION_BARE: &str = api_path!("/recipes");
    pub const ITEM: &str = api_path!("/recipes/{id}");

    /// Concrete path for a single recipe.
    pub fn item(id: impl std::fmt::Display) -> String {
        ITEM.replace("{id}", &id.to_string())
    }
}

pub mod upload {
    pub const FILE: &str = api_path!("/upload/");
    pub const FILE_BARE: &str = api_path!("/upload");
}
