use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Target marketplace for an optimized listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Shopify,
    Etsy,
    Amazon,
}

impl Platform {
    /// Every supported marketplace
    pub const ALL: [Self; 3] = [Self::Shopify, Self::Etsy, Self::Amazon];

    /// Lowercase identifier used on the wire and in prompts
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shopify => "shopify",
            Self::Etsy => "etsy",
            Self::Amazon => "amazon",
        }
    }

    /// Only Amazon listings carry bullet points
    pub const fn uses_bullet_points(self) -> bool {
        matches!(self, Self::Amazon)
    }

    /// Static listing constraints for this marketplace
    pub const fn requirements(self) -> &'static PlatformRequirements {
        match self {
            Self::Shopify => &SHOPIFY,
            Self::Etsy => &ETSY,
            Self::Amazon => &AMAZON,
        }
    }

    /// One-line style guidance embedded in prompts
    pub const fn best_practice(self) -> &'static str {
        match self {
            Self::Shopify => "Focus on clear, benefit-driven product descriptions",
            Self::Etsy => "Use specific, descriptive titles that include materials and intended use",
            Self::Amazon => "Include key specs in bullet points and follow Amazon's style guidelines",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownPlatform(s.to_owned()))
    }
}

/// Per-marketplace constraints used to parametrize prompts
///
/// Not enforced on provider output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRequirements {
    pub platform: Platform,
    pub title_max_length: usize,
    pub description_max_length: usize,
    pub max_tags: usize,
    pub required_attributes: &'static [&'static str],
    pub supported_categories: &'static [&'static str],
    pub image_requirements: ImageRequirements,
}

/// Image upload limits for a marketplace
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequirements {
    pub max_images: usize,
    pub formats: &'static [&'static str],
    #[serde(rename = "maxSizeKB")]
    pub max_size_kb: u32,
}

const IMAGE_FORMATS: &[&str] = &["jpg", "png", "gif"];

static SHOPIFY: PlatformRequirements = PlatformRequirements {
    platform: Platform::Shopify,
    title_max_length: 255,
    description_max_length: 5000,
    max_tags: 250,
    required_attributes: &["title", "price"],
    supported_categories: &["Apparel", "Home & Garden", "Electronics", "Beauty", "Toys"],
    image_requirements: ImageRequirements {
        max_images: 10,
        formats: IMAGE_FORMATS,
        max_size_kb: 20_000,
    },
};

static ETSY: PlatformRequirements = PlatformRequirements {
    platform: Platform::Etsy,
    title_max_length: 140,
    description_max_length: 5000,
    max_tags: 13,
    required_attributes: &["title", "description", "price", "who_made", "when_made"],
    supported_categories: &["Art", "Home & Living", "Jewelry", "Clothing", "Craft Supplies"],
    image_requirements: ImageRequirements {
        max_images: 10,
        formats: IMAGE_FORMATS,
        max_size_kb: 3000,
    },
};

static AMAZON: PlatformRequirements = PlatformRequirements {
    platform: Platform::Amazon,
    title_max_length: 200,
    description_max_length: 2000,
    max_tags: 5,
    required_attributes: &["title", "description", "price", "brand", "upc"],
    supported_categories: &["Home & Kitchen", "Clothing", "Electronics", "Beauty", "Toys & Games"],
    image_requirements: ImageRequirements {
        max_images: 9,
        formats: IMAGE_FORMATS,
        max_size_kb: 10_000,
    },
};
