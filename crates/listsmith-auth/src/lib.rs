mod error;
mod resolver;

pub use error::AuthError;
pub use resolver::{IdentityProvider, StaticTokenIdentity, bearer_token};
