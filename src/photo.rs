use crate::json_helper::JsonHelper;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_AUTHOR: &str = "Unsplash";
pub const DEFAULT_ALT_TEXT: &str = "Unsplash photo";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PhotoResult {
    pub id: String,
    pub thumbnail_url: String,
    pub full_url: String,
    pub author_name: String,
    pub like_count: u64,
    pub permalink: String,
    pub description: Option<String>,
    pub alt_description: Option<String>,
}

impl PhotoResult {
    /// Maps one element of an Unsplash `results` array. Only `id` is
    /// required; every other field degrades to empty.
    pub fn from(value: &Value) -> anyhow::Result<PhotoResult> {
        let id = JsonHelper::parse_string(value, &["id"])?;
        let thumbnail_url = JsonHelper::parse_string(value, &["urls", "small"]).unwrap_or_default();
        let full_url = JsonHelper::parse_string(value, &["urls", "regular"]).unwrap_or_default();
        let author_name = JsonHelper::parse_string(value, &["user", "name"]).unwrap_or_default();
        let like_count = JsonHelper::parse_u64(value, &["likes"]).unwrap_or(0);
        let permalink = JsonHelper::parse_string(value, &["links", "html"]).unwrap_or_default();
        let description = JsonHelper::parse_optional_string(value, &["description"]);
        let alt_description = JsonHelper::parse_optional_string(value, &["alt_description"]);

        let photo = PhotoResult {
            id,
            thumbnail_url,
            full_url,
            author_name,
            like_count,
            permalink,
            description,
            alt_description,
        };

        Ok(photo)
    }

    pub fn author_label(&self) -> &str {
        if self.author_name.is_empty() {
            DEFAULT_AUTHOR
        } else {
            &self.author_name
        }
    }

    pub fn alt_text(&self) -> &str {
        [&self.alt_description, &self.description]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|text| !text.is_empty())
            .unwrap_or(DEFAULT_ALT_TEXT)
    }
}
