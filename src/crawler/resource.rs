//! Resource downloads
//!
//! Resources are never parsed: whatever the server returns for a 2xx
//! response is what ends up on disk.

use crate::crawler::fetcher::{fetch_ok, Fetch};
use crate::FetchError;
use url::Url;

/// Fetches a resource body
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The body, byte for byte
/// * `Err(FetchError)` - Transport failure, or a non-2xx status carrying the URL and code
pub async fn fetch_resource<F: Fetch>(fetcher: &F, url: &Url) -> Result<Vec<u8>, FetchError> {
    let response = fetch_ok(fetcher, url).await?;
    Ok(response.body)
}
