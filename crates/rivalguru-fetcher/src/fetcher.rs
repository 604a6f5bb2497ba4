use async_trait::async_trait;
use rivalguru_core::Profile;

use crate::error::FetchError;

/// Produces a [`Profile`] for a website identifier.
///
/// Implementations may take arbitrarily long; callers impose their own
/// deadline and may drop the returned future at any await point.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch_profile(&self, target: &str) -> Result<Profile, FetchError>;
}
