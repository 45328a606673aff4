//! Wire types for the central catalog and warehouse services
//!
//! These mirror the JSON shapes the platform services speak (camelCase).

use serde::{Deserialize, Serialize};

/// Query parameters for a catalog product search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchQuery {
    pub is_active: bool,
    pub limit: usize,
    pub page: usize,
}

/// One page of catalog search results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default)]
    pub items: Vec<CatalogProduct>,
}

/// A product as the catalog service reports it
///
/// `title` is the channel-facing listing title; older catalog entries only
/// carry `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl CatalogProduct {
    /// Listing title: `title` when present, else `name`
    pub fn listing_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Pricing record for a product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricing {
    pub base_price: Option<f64>,
}

/// A media asset attached to a product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub url: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// Pick the primary image url: the asset flagged primary, else the first one
pub fn primary_image(media: &[MediaAsset]) -> Option<String> {
    media
        .iter()
        .find(|m| m.is_primary)
        .or_else(|| media.first())
        .map(|m| m.url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_title_prefers_title_over_name() {
        let mut product = CatalogProduct {
            id: "p-1".into(),
            name: "internal name".into(),
            title: Some("Channel Title".into()),
            description: None,
            is_active: true,
        };
        assert_eq!(product.listing_title(), "Channel Title");

        product.title = None;
        assert_eq!(product.listing_title(), "internal name");
    }

    #[test]
    fn primary_image_falls_back_to_first() {
        let media = vec![
            MediaAsset {
                url: "a.jpg".into(),
                is_primary: false,
            },
            MediaAsset {
                url: "b.jpg".into(),
                is_primary: true,
            },
        ];
        assert_eq!(primary_image(&media), Some("b.jpg".into()));

        let no_primary = vec![MediaAsset {
            url: "a.jpg".into(),
            is_primary: false,
        }];
        assert_eq!(primary_image(&no_primary), Some("a.jpg".into()));

        assert_eq!(primary_image(&[]), None);
    }
}
