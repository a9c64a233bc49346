pub mod format;

use tracing::warn;

#[derive(Debug)]
pub enum FetchResult<T> {
    Success(T),
    Empty,
    Failed(String),
}

/// Single-attempt GET. Non-2xx statuses, transport errors and undecodable
/// bodies all end up as `Failed`; a blank 2xx body is `Empty`.
pub async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> FetchResult<T> {
    let resp = match client.get(url).header("Accept", "application/json").send().await {
        Ok(resp) => resp,
        Err(e) => {
            warn!("⚠️ Request error {} on {}", e, url);
            return FetchResult::Failed(format!("request error: {e}"));
        }
    };

    let resp_ok = match resp.error_for_status() {
        Ok(resp_ok) => resp_ok,
        Err(e) => {
            warn!("⚠️ HTTP error {} on {}", e, url);
            return FetchResult::Failed(format!("http error: {e}"));
        }
    };

    let text = match resp_ok.text().await {
        Ok(text) => text,
        Err(e) => {
            warn!("❌ Failed to read response body on {}: {}", url, e);
            return FetchResult::Failed(format!("body read error: {e}"));
        }
    };

    if text.trim().is_empty() {
        return FetchResult::Empty;
    }

    match serde_json::from_str::<T>(&text) {
        Ok(parsed) => FetchResult::Success(parsed),
        Err(e) => {
            warn!("❌ JSON parse error on {}: {}", url, e);
            FetchResult::Failed(format!("json parse error: {e}"))
        }
    }
}
