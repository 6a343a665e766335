use rand::distr::{Alphanumeric, SampleString};
use url::Url;

use crate::{BatchRequest, CandidateImage, PreloadError};

/// The public cat image endpoint; width/height arrive as query parameters.
pub const DEFAULT_ENDPOINT: &str = "https://cataas.com/cat";

/// Length of the cache-busting token. Random alphanumeric at this length
/// is collision-resistant across every request a session makes.
const TOKEN_LEN: usize = 12;

/// Builds candidate image addresses for a batch.
#[derive(Debug, Clone)]
pub struct ImageSource {
    endpoint: Url,
}

impl ImageSource {
    pub fn new(endpoint: &str) -> Result<Self, PreloadError> {
        let endpoint =
            Url::parse(endpoint).map_err(|err| PreloadError::InvalidUrl(err.to_string()))?;
        Ok(Self { endpoint })
    }

    /// Generates `request.count` addresses in generation order, each with
    /// the requested geometry and a fresh cache-busting token.
    pub fn candidates(&self, request: &BatchRequest) -> Vec<CandidateImage> {
        (0..request.count)
            .map(|index| {
                let mut url = self.endpoint.clone();
                url.query_pairs_mut()
                    .append_pair("width", &request.width.to_string())
                    .append_pair("height", &request.height.to_string())
                    .append_pair("random", &cache_bust_token());
                CandidateImage {
                    index,
                    url: url.to_string(),
                }
            })
            .collect()
    }
}

impl Default for ImageSource {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint parses"),
        }
    }
}

fn cache_bust_token() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), TOKEN_LEN)
}
