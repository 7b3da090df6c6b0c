use thiserror::Error;

/// Failures inside a provider client
///
/// These never reach callers of [`ProviderClient::generate`]; they are
/// logged and answered with a synthesized listing.
///
/// [`ProviderClient::generate`]: crate::ProviderClient::generate
#[derive(Debug, Error)]
pub enum LlmError {
    /// No usable API key is configured
    #[error("no credential configured")]
    MissingCredential,

    /// Transport failure or non-success status
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The vendor envelope had no text to parse
    #[error("provider response contained no text")]
    EmptyReply,

    /// The reply text had no balanced JSON object
    #[error("no JSON object found in provider reply")]
    NoJson,

    /// The JSON object did not match the listing schema
    #[error("malformed listing JSON: {0}")]
    MalformedListing(#[from] serde_json::Error),

    /// Amazon listings must carry bullet points
    #[error("listing for {platform} is missing bullet points")]
    MissingBulletPoints { platform: listsmith_core::Platform },
}
