//! Prompt construction for listing optimization

use std::fmt::Write;

use crate::OptimizationContext;

/// System message for chat-style APIs that accept one
pub const SYSTEM_PROMPT: &str = "You are an e-commerce listing optimization expert.";

/// Build the user prompt for one (product, platform) pair
///
/// The reply is requested as a single JSON object matching
/// [`ListingContent`](listsmith_core::ListingContent); `bulletPoints` is
/// only asked for on platforms that display them.
pub fn build_prompt(context: &OptimizationContext) -> String {
    let platform = context.platform;
    let requirements = context.requirements;
    let product = &context.product;

    let mut prompt = String::with_capacity(2048);

    // `write!` into a String cannot fail
    let _ = writeln!(
        prompt,
        "You are an expert e-commerce listing optimizer. Optimize the following product listing for {platform}."
    );

    let _ = write!(
        prompt,
        "\nPLATFORM REQUIREMENTS:\n\
         - Platform: {platform}\n\
         - Best practice: {}\n\
         - Title: at most {} characters\n\
         - Description: at most {} characters\n\
         - Tags: at most {}\n\
         - Required attributes: {}\n\
         - Supported categories: {}\n",
        platform.best_practice(),
        requirements.title_max_length,
        requirements.description_max_length,
        requirements.max_tags,
        requirements.required_attributes.join(", "),
        requirements.supported_categories.join(", "),
    );

    let _ = write!(
        prompt,
        "\nPRODUCT INFORMATION:\n\
         Title: {}\n\
         Description: {}\n\
         Price: ${:.2}\n\
         Category: {}\n\
         Tags: {}\n",
        product.title,
        product.description,
        product.price,
        product.category,
        product.tags.join(", "),
    );

    if !product.attributes.is_empty() {
        prompt.push_str("Attributes:\n");
        for (name, value) in &product.attributes {
            let _ = writeln!(prompt, "  {name}: {value}");
        }
    }

    if !product.variants.is_empty() {
        let _ = writeln!(prompt, "Variants: {}", product.variants.len());
    }

    if let Some(focus) = &context.focus {
        let _ = write!(prompt, "\nOPTIMIZATION FOCUS:\n{focus}\n");
    }

    if let Some(audience) = &context.audience {
        let _ = write!(prompt, "\nTARGET AUDIENCE:\n{audience}\n");
    }

    let _ = write!(
        prompt,
        "\nGenerate an optimized listing with:\n\
         1. Title (optimized for {platform})\n\
         2. Description (formatted appropriately for {platform})\n\
         3. Tags/keywords for SEO and discoverability\n\
         4. Category recommendation\n\
         5. SEO metadata (title and description)\n"
    );

    if platform.uses_bullet_points() {
        let _ = writeln!(prompt, "6. Bullet points for the {platform} listing");
    }

    prompt.push_str(
        "\nRespond with a single JSON object using exactly this structure:\n\
         {\n  \"title\": \"optimized title\",\n  \"description\": \"optimized description\",\n  \
         \"tags\": [\"tag1\", \"tag2\"],\n  \"category\": \"recommended category\",\n  \
         \"seoMetadata\": {\n    \"metaTitle\": \"SEO title\",\n    \"metaDescription\": \"SEO description\"\n  }",
    );

    if platform.uses_bullet_points() {
        prompt.push_str(",\n  \"bulletPoints\": [\"point1\", \"point2\"]");
    }

    prompt.push_str("\n}\n");
    prompt
}

#[cfg(test)]
mod tests {
    use listsmith_catalog::ApiConfig;
    use listsmith_core::{Platform, Product};

    use super::*;

    fn context(platform: Platform, focus: Option<&str>, audience: Option<&str>) -> OptimizationContext {
        let mut product = Product {
            id: "p-1".to_owned(),
            title: "Leather Wallet".to_owned(),
            description: "Slim bifold wallet".to_owned(),
            price: 39.99,
            category: "Accessories".to_owned(),
            tags: vec!["leather".to_owned(), "handmade".to_owned()],
            ..Product::default()
        };
        product.attributes.insert("material".to_owned(), "full-grain leather".to_owned());

        OptimizationContext::new(
            product,
            platform,
            focus.map(str::to_owned),
            audience.map(str::to_owned),
            ApiConfig {
                model_name: "gpt-4".to_owned(),
                max_tokens: 4000,
                temperature: 0.7,
            },
        )
    }

    #[test]
    fn embeds_product_and_platform_constraints() {
        let prompt = build_prompt(&context(Platform::Etsy, None, None));

        assert!(prompt.contains("for etsy"));
        assert!(prompt.contains("Title: Leather Wallet"));
        assert!(prompt.contains("Price: $39.99"));
        assert!(prompt.contains("Tags: leather, handmade"));
        assert!(prompt.contains("material: full-grain leather"));
        assert!(prompt.contains("at most 140 characters"));
        assert!(prompt.contains("Tags: at most 13"));
        assert!(prompt.contains("who_made"));
        assert!(prompt.contains(Platform::Etsy.best_practice()));
    }

    #[test]
    fn bullet_points_only_requested_for_amazon() {
        assert!(build_prompt(&context(Platform::Amazon, None, None)).contains("\"bulletPoints\""));
        assert!(!build_prompt(&context(Platform::Shopify, None, None)).contains("bulletPoints"));
        assert!(!build_prompt(&context(Platform::Etsy, None, None)).contains("bulletPoints"));
    }

    #[test]
    fn focus_and_audience_sections_are_optional() {
        let bare = build_prompt(&context(Platform::Shopify, None, None));
        assert!(!bare.contains("OPTIMIZATION FOCUS"));
        assert!(!bare.contains("TARGET AUDIENCE"));

        let full = build_prompt(&context(Platform::Shopify, Some("gifting"), Some("commuters")));
        assert!(full.contains("OPTIMIZATION FOCUS:\ngifting"));
        assert!(full.contains("TARGET AUDIENCE:\ncommuters"));
    }

    #[test]
    fn blank_focus_is_ignored() {
        let prompt = build_prompt(&context(Platform::Shopify, Some("   "), None));
        assert!(!prompt.contains("OPTIMIZATION FOCUS"));
    }
}
