//! Query string URL builder for the aurora service

/// Builds `GET` request URLs of the form `{base}/{version}/?k1=v1&k2=v2`.
///
/// Keys and values are percent-encoded and emitted in insertion order. No
/// trailing separator is written.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    endpoint: String,
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new(base_url: &str, api_version: &str) -> Self {
        let endpoint = format!(
            "{}/{}/",
            base_url.trim_end_matches('/'),
            api_version.trim_matches('/')
        );
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    /// Append a key/value pair
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Append every pair from an iterator, in iteration order
    #[must_use]
    pub fn params<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        for (key, value) in pairs {
            self = self.param(key, value);
        }
        self
    }

    #[must_use]
    pub fn build(&self) -> String {
        if self.params.is_empty() {
            return self.endpoint.clone();
        }

        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.endpoint, query)
    }
}
