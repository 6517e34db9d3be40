use std::sync::RwLock;

/// Shared handle to the backend.
///
/// Holds the base URL and an HTTP client that is built on first use and then
/// reused by every request. Changing the base URL drops the cached client so
/// the next request starts from a fresh one. Create one per process and hand
/// it to gateways behind an `Arc`.
#[derive(Debug)]
pub struct ApiConnection {
    base_url: RwLock<String>,
    client: RwLock<Option<reqwest::Client>>,
}

impl ApiConnection {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: RwLock::new(normalize_base_url(base_url.as_ref())),
            client: RwLock::new(None),
        }
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> String {
        self.base_url
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Builds the full URL for an API path such as `/records`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Returns the shared client, building it on first use.
    pub fn client(&self) -> reqwest::Client {
        if let Some(client) = self
            .client
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            return client.clone();
        }

        let mut slot = self.client.write().unwrap_or_else(|e| e.into_inner());
        slot.get_or_insert_with(|| {
            tracing::debug!("Creating HTTP client for {}", self.base_url());
            reqwest::Client::new()
        })
        .clone()
    }

    /// Returns true once a client has been built and not invalidated since.
    pub fn is_connected(&self) -> bool {
        self.client
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Points the connection at a new backend and drops the cached client.
    pub fn reconfigure(&self, base_url: impl AsRef<str>) {
        *self.base_url.write().unwrap_or_else(|e| e.into_inner()) =
            normalize_base_url(base_url.as_ref());
        self.invalidate();
    }

    /// Drops the cached client.
    pub fn invalidate(&self) {
        *self.client.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    let base_url = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("http://{}", url)
    } else {
        url.to_string()
    };

    base_url.trim_end_matches('/').to_string()
}
