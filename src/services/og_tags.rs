use std::collections::BTreeMap;

use serde::Serialize;

use crate::services::fan_page_modules::ModuleView;

/// Open Graph and Twitter card metadata for a page. Tags without a value are
/// kept so the payload shape is stable, but are not emitted as meta tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OgTags(BTreeMap<&'static str, Option<String>>);

impl OgTags {
    /// Description comes from the first bio module when the page has one,
    /// otherwise from the fan page message.
    pub fn for_page(
        title: &str,
        url: &str,
        image_url: Option<&str>,
        modules: &[ModuleView],
        message: Option<&str>,
    ) -> Self {
        let description = match modules.iter().find(|module| module.is_bio()) {
            Some(bio) => bio.data.get_str("description_text").map(str::to_string),
            None => message.map(str::to_string),
        };
        let image = image_url.map(str::to_string);

        let mut tags = BTreeMap::new();
        tags.insert("og:title", Some(title.to_string()));
        tags.insert("og:url", Some(url.to_string()));
        tags.insert("og:description", description.clone());
        tags.insert("og:image", image.clone());

        tags.insert("twitter:card", Some("summary".to_string()));
        tags.insert("twitter:title", Some(title.to_string()));
        tags.insert("twitter:url", Some(url.to_string()));
        tags.insert("twitter:description", description);
        tags.insert("twitter:image", image);

        Self(tags)
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.0
            .insert("og:description", Some(description.to_string()));
        self.0
            .insert("twitter:description", Some(description.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.as_deref())
    }

    /// Tags that carry a value, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (*key, value)))
    }
}
