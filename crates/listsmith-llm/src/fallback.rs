//! Deterministic listings used when no live provider answer is available

use listsmith_core::{ListingContent, Platform, SeoMetadata};

use crate::OptimizationContext;

const AMAZON_BULLETS: [&str; 5] = [
    "Premium Quality: Made with the finest materials for lasting durability",
    "Versatile Design: Perfect for multiple uses and occasions",
    "Satisfaction Guaranteed: 30-day money-back guarantee if you're not completely satisfied",
    "Thoughtful Gift: Makes an excellent present for friends and family",
    "Fast Shipping: Quick delivery with careful packaging",
];

/// Build a template listing from the product and platform alone
///
/// Pure function of its input: the same context always yields the same
/// content.
pub fn synthesize(context: &OptimizationContext) -> ListingContent {
    match context.platform {
        Platform::Shopify => shopify(context),
        Platform::Etsy => etsy(context),
        Platform::Amazon => amazon(context),
    }
}

fn shopify(context: &OptimizationContext) -> ListingContent {
    let product = &context.product;
    let focus = context.focus.as_deref();

    let mut title = format!("{} - Premium Quality", product.title);
    if let Some(focus) = focus {
        title.push_str(" | ");
        title.push_str(focus);
    }

    let mut description = format!(
        "{}\n\nOur premium quality {} is designed to exceed your expectations. Made with the finest materials \
         and exceptional craftsmanship, this product offers durability and performance that stands the test of time.",
        product.description, product.title
    );
    if let Some(focus) = focus {
        description.push_str("\n\n");
        description.push_str(focus);
    }

    let mut tags = product.tags.clone();
    tags.extend(["premium", "quality", "shopify-exclusive"].map(str::to_owned));

    ListingContent {
        title,
        description,
        tags,
        category: product.category.clone(),
        bullet_points: None,
        seo_metadata: Some(SeoMetadata {
            meta_title: Some(format!("Buy Premium {} | Free Shipping", product.title)),
            meta_description: Some(format!(
                "Shop our exclusive {} with premium features and free shipping. Perfect for {}.",
                product.title,
                focus.unwrap_or("everyday use")
            )),
        }),
        recommended_price: None,
    }
}

fn etsy(context: &OptimizationContext) -> ListingContent {
    let product = &context.product;

    let title = format!(
        "Handcrafted {} | {} | Perfect Gift",
        product.title,
        context.focus.as_deref().unwrap_or("Unique Design")
    );

    let description = format!(
        "{}\n\nThis handcrafted {} is lovingly made with attention to every detail. Each piece is unique and \
         makes a perfect gift for any occasion. Our customers love the exceptional quality and artistic design.",
        product.description, product.title
    );

    let mut tags: Vec<String> = product.tags.iter().take(8).cloned().collect();
    tags.extend(["handmade", "artisan", "gift idea", "unique"].map(str::to_owned));

    let category = match product.category.as_str() {
        "Home & Garden" => "Home & Living".to_owned(),
        "Apparel" => "Clothing".to_owned(),
        other => other.to_owned(),
    };

    ListingContent {
        title,
        description,
        tags,
        category,
        bullet_points: None,
        seo_metadata: Some(SeoMetadata {
            meta_title: Some(format!("Handmade {} | Artisan Crafted", product.title)),
            meta_description: Some(format!(
                "Unique handcrafted {} made with love. Perfect for gifts or treating yourself. Fast shipping \
                 and eco-friendly packaging.",
                product.title
            )),
        }),
        recommended_price: None,
    }
}

fn amazon(context: &OptimizationContext) -> ListingContent {
    let product = &context.product;

    let mut title = format!("{} - Professional Grade", product.title);
    if let Some(focus) = &context.focus {
        title.push_str(" | ");
        title.push_str(focus);
    }
    title.push_str(&format!(" ({} Options)", product.variants.len()));

    let description = format!(
        "Experience the premium quality of our {}. Designed for durability and performance, this product will \
         exceed your expectations.\n\nOur customers love:\n- The exceptional craftsmanship\n- Premium materials\n\
         - Outstanding customer service\n\nClick Add to Cart now before we sell out again!",
        product.title
    );

    let category = match product.category.as_str() {
        "Apparel" => "Clothing".to_owned(),
        "Home & Garden" => "Home & Kitchen".to_owned(),
        other => other.to_owned(),
    };

    ListingContent {
        title,
        description,
        tags: product.tags.iter().take(5).cloned().collect(),
        category,
        bullet_points: Some(AMAZON_BULLETS.map(str::to_owned).to_vec()),
        seo_metadata: Some(SeoMetadata {
            meta_title: Some(format!("{} - Professional Grade | Prime Shipping", product.title)),
            meta_description: Some(format!(
                "Shop our premium {} with fast Prime shipping. Professional grade quality with 30-day guarantee.",
                product.title
            )),
        }),
        recommended_price: None,
    }
}

#[cfg(test)]
mod tests {
    use listsmith_catalog::ApiConfig;
    use listsmith_core::{Product, ProductVariant};

    use super::*;

    fn wallet() -> Product {
        Product {
            id: "p-1".to_owned(),
            title: "Leather Wallet".to_owned(),
            description: "Slim bifold wallet.".to_owned(),
            price: 39.99,
            category: "Accessories".to_owned(),
            tags: vec!["leather".to_owned(), "handmade".to_owned()],
            ..Product::default()
        }
    }

    fn context(product: Product, platform: Platform, focus: Option<&str>) -> OptimizationContext {
        OptimizationContext::new(
            product,
            platform,
            focus.map(str::to_owned),
            None,
            ApiConfig {
                model_name: "gpt-3.5-turbo".to_owned(),
                max_tokens: 2000,
                temperature: 0.7,
            },
        )
    }

    #[test]
    fn shopify_template() {
        let content = synthesize(&context(wallet(), Platform::Shopify, None));

        assert_eq!(content.title, "Leather Wallet - Premium Quality");
        assert!(content.description.starts_with("Slim bifold wallet.\n\nOur premium quality Leather Wallet"));
        assert_eq!(content.tags, ["leather", "handmade", "premium", "quality", "shopify-exclusive"]);
        assert_eq!(content.category, "Accessories");
        assert!(content.bullet_points.is_none());

        let seo = content.seo_metadata.unwrap();
        assert_eq!(seo.meta_title.as_deref(), Some("Buy Premium Leather Wallet | Free Shipping"));
        assert!(seo.meta_description.unwrap().ends_with("Perfect for everyday use."));
    }

    #[test]
    fn shopify_template_with_focus() {
        let content = synthesize(&context(wallet(), Platform::Shopify, Some("Gift Ready")));

        assert_eq!(content.title, "Leather Wallet - Premium Quality | Gift Ready");
        assert!(content.description.ends_with("\n\nGift Ready"));
        assert!(content.seo_metadata.unwrap().meta_description.unwrap().ends_with("Perfect for Gift Ready."));
    }

    #[test]
    fn etsy_template_caps_tags_and_maps_category() {
        let mut product = wallet();
        product.tags = (1..=10).map(|n| format!("tag{n}")).collect();
        product.category = "Home & Garden".to_owned();

        let content = synthesize(&context(product, Platform::Etsy, None));

        assert_eq!(content.title, "Handcrafted Leather Wallet | Unique Design | Perfect Gift");
        assert_eq!(content.tags.len(), 12);
        assert_eq!(content.tags[7], "tag8");
        assert_eq!(&content.tags[8..], ["handmade", "artisan", "gift idea", "unique"]);
        assert_eq!(content.category, "Home & Living");
    }

    #[test]
    fn amazon_template_has_five_bullets() {
        let mut product = wallet();
        product.category = "Apparel".to_owned();
        product.variants = vec![ProductVariant::default(), ProductVariant::default()];

        let content = synthesize(&context(product, Platform::Amazon, Some("Travel")));

        assert_eq!(content.title, "Leather Wallet - Professional Grade | Travel (2 Options)");
        assert_eq!(content.category, "Clothing");
        assert_eq!(content.bullet_points.as_ref().map(Vec::len), Some(5));
        assert!(content.description.contains("Our customers love:\n- The exceptional craftsmanship"));
    }

    #[test]
    fn amazon_keeps_first_five_tags() {
        let mut product = wallet();
        product.tags = (1..=7).map(|n| format!("t{n}")).collect();

        let content = synthesize(&context(product, Platform::Amazon, None));

        assert_eq!(content.title, "Leather Wallet - Professional Grade (0 Options)");
        assert_eq!(content.tags, ["t1", "t2", "t3", "t4", "t5"]);
    }

    #[test]
    fn output_is_deterministic() {
        for platform in Platform::ALL {
            let ctx = context(wallet(), platform, Some("Minimalist"));
            assert_eq!(synthesize(&ctx), synthesize(&ctx));
        }
    }
}
