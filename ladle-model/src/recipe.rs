use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::{ModelError, Result},
    ids::RecipeID,
};

/// A stored recipe as returned to API clients.
///
/// The id is serialized under `_id` as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: RecipeID,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Create payload. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewRecipe {
    /// A title must contain something other than whitespace. This is the only
    /// check on create; ingredients and instructions may be empty.
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }

    pub fn into_recipe(self, id: RecipeID) -> Recipe {
        Recipe {
            id,
            title: self.title,
            ingredients: self.ingredients,
            instructions: self.instructions,
            image_url: self.image_url,
        }
    }
}

/// Partial update payload.
///
/// `None` means the caller did not send the field and the stored value stays
/// as it is. For `title`, `ingredients` and `instructions` an explicit JSON
/// `null` is rejected during deserialization since those fields cannot be
/// empty. `image_url` is nullable: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeUpdate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub ingredients: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub instructions: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_nullable"
    )]
    pub image_url: Option<Option<String>>,
}

impl RecipeUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
            && self.image_url.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    /// Names of the fields this patch touches, in declaration order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::with_capacity(4);
        if self.title.is_some() {
            fields.push("title");
        }
        if self.ingredients.is_some() {
            fields.push("ingredients");
        }
        if self.instructions.is_some() {
            fields.push("instructions");
        }
        if self.image_url.is_some() {
            fields.push("image_url");
        }
        fields
    }

    /// Merge the present fields into `recipe`, leaving the rest untouched.
    pub fn apply_to(&self, recipe: &mut Recipe) {
        if let Some(title) = &self.title {
            recipe.title = title.clone();
        }
        if let Some(ingredients) = &self.ingredients {
            recipe.ingredients = ingredients.clone();
        }
        if let Some(instructions) = &self.instructions {
            recipe.instructions = instructions.clone();
        }
        if let Some(image_url) = &self.image_url {
            recipe.image_url = image_url.clone();
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ModelError::Validation(
            "title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

// Only invoked when the key is present, so wrapping in `Some` marks presence.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn present_nullable<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pasta() -> Recipe {
        Recipe {
            id: RecipeID::new(),
            title: "Pasta".into(),
            ingredients: vec!["pasta".into(), "sauce".into()],
            instructions: "Boil then mix".into(),
            image_url: Some("https://img.example/pasta.jpg".into()),
        }
    }

    #[test]
    fn omitted_fields_are_absent() {
        let update: RecipeUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(update.is_empty());
        assert!(update.changed_fields().is_empty());
    }

    #[test]
    fn explicit_null_clears_image_url_only() {
        let update: RecipeUpdate =
            serde_json::from_value(json!({ "image_url": null })).unwrap();
        assert_eq!(update.image_url, Some(None));
        assert_eq!(update.changed_fields(), vec!["image_url"]);

        let mut recipe = pasta();
        update.apply_to(&mut recipe);
        assert_eq!(recipe.image_url, None);
        assert_eq!(recipe.title, "Pasta");
    }

    #[test]
    fn explicit_null_is_rejected_for_required_fields() {
        for field in ["title", "ingredients", "instructions"] {
            let mut body = serde_json::Map::new();
            body.insert(field.to_string(), serde_json::Value::Null);
            assert!(
                serde_json::from_value::<RecipeUpdate>(body.into()).is_err(),
                "null {field} should not deserialize"
            );
        }
    }

    #[test]
    fn apply_to_merges_present_fields() {
        let mut recipe = pasta();
        let before = recipe.clone();
        let update: RecipeUpdate =
            serde_json::from_value(json!({ "title": "New Title" })).unwrap();

        update.apply_to(&mut recipe);

        assert_eq!(recipe.title, "New Title");
        assert_eq!(recipe.ingredients, before.ingredients);
        assert_eq!(recipe.instructions, before.instructions);
        assert_eq!(recipe.image_url, before.image_url);
        assert_eq!(recipe.id, before.id);
    }

    #[test]
    fn ingredient_order_is_kept() {
        let update: RecipeUpdate = serde_json::from_value(
            json!({ "ingredients": ["c", "a", "b"] }),
        )
        .unwrap();
        let mut recipe = pasta();
        update.apply_to(&mut recipe);
        assert_eq!(recipe.ingredients, vec!["c", "a", "b"]);
    }

    #[test]
    fn blank_titles_fail_validation() {
        let new = NewRecipe {
            title: "   ".into(),
            ingredients: vec![],
            instructions: String::new(),
            image_url: None,
        };
        assert!(matches!(new.validate(), Err(ModelError::Validation(_))));

        let titled = NewRecipe {
            title: "Toast".into(),
            ..new
        };
        assert!(titled.validate().is_ok());

        let update = RecipeUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        assert!(RecipeUpdate::default().validate().is_ok());
    }

    #[test]
    fn recipe_serializes_id_as_underscore_id_string() {
        let recipe = pasta();
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["_id"], json!(recipe.id.to_string()));
        assert!(value.get("id").is_none());
    }

    #[test]
    fn create_payload_defaults_image_url() {
        let new: NewRecipe = serde_json::from_value(json!({
            "title": "Pasta",
            "ingredients": ["pasta", "sauce"],
            "instructions": "Boil then mix"
        }))
        .unwrap();
        assert_eq!(new.image_url, None);
        let id = RecipeID::new();
        let recipe = new.clone().into_recipe(id);
        assert_eq!(recipe.id, id);
        assert_eq!(recipe.title, new.title);
    }
}
