use serde::Deserialize;

/// Request payload for the re-index endpoint.
#[derive(Debug, Deserialize)]
pub struct ReindexRequest {
    /// Page URL to re-index. A missing field behaves like an empty url and
    /// is rejected by validation.
    #[serde(default)]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_field_defaults_to_empty() {
        let req: ReindexRequest = serde_json::from_str("{}").unwrap();
        assert!(req.url.is_empty());
    }
}
