use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{Platform, Product};

/// Listing fields produced by a provider (parsed or synthesized)
///
/// This is the JSON object shape models are asked to answer with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingContent {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet_points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_metadata: Option<SeoMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_price: Option<f64>,
}

/// Search-engine metadata suggested for a listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

/// A listing adapted to one marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedListing {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub platform: Platform,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet_points: Option<Vec<String>>,
    pub tags: Vec<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_metadata: Option<SeoMetadata>,
    #[serde(default)]
    pub images: Vec<String>,
    pub original_product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl OptimizedListing {
    /// Attach generated content to its source product and platform
    ///
    /// Images are carried over from the product unchanged. Bullet points
    /// are kept only for platforms that display them.
    pub fn assemble(content: ListingContent, product: &Product, platform: Platform) -> Self {
        let bullet_points = if platform.uses_bullet_points() {
            content.bullet_points
        } else {
            None
        };

        Self {
            id: String::new(),
            user_id: product.user_id.clone(),
            platform,
            title: content.title,
            description: content.description,
            bullet_points,
            tags: content.tags,
            category: content.category,
            recommended_price: content.recommended_price,
            seo_metadata: content.seo_metadata,
            images: product.images.clone(),
            original_product_id: product.id.clone(),
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> ListingContent {
        ListingContent {
            title: "Wallet".to_owned(),
            description: "A wallet".to_owned(),
            tags: vec!["leather".to_owned()],
            category: "Accessories".to_owned(),
            bullet_points: Some(vec!["Durable".to_owned()]),
            seo_metadata: None,
            recommended_price: None,
        }
    }

    #[test]
    fn assemble_carries_product_references() {
        let product = Product {
            id: "p-1".to_owned(),
            user_id: "u-1".to_owned(),
            title: "Wallet".to_owned(),
            images: vec!["wallet.jpg".to_owned()],
            ..Product::default()
        };

        let listing = OptimizedListing::assemble(content(), &product, Platform::Amazon);
        assert_eq!(listing.original_product_id, "p-1");
        assert_eq!(listing.user_id, "u-1");
        assert_eq!(listing.images, vec!["wallet.jpg"]);
        assert_eq!(listing.bullet_points.as_deref(), Some(&["Durable".to_owned()][..]));
    }

    #[test]
    fn assemble_drops_bullets_off_amazon() {
        let listing = OptimizedListing::assemble(content(), &Product::default(), Platform::Etsy);
        assert!(listing.bullet_points.is_none());
    }

    #[test]
    fn content_parses_camel_case_schema() {
        let parsed: ListingContent = serde_json::from_str(
            r#"{"title":"T","description":"D","tags":["a"],"category":"C",
                "seoMetadata":{"metaTitle":"MT","metaDescription":"MD"},
                "bulletPoints":["b1"]}"#,
        )
        .unwrap();

        assert_eq!(parsed.seo_metadata.unwrap().meta_title.as_deref(), Some("MT"));
        assert_eq!(parsed.bullet_points.unwrap(), vec!["b1"]);
    }
}
