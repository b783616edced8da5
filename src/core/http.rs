use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::error::{DispenserError, DispenserResult};

pub const APP_USER_AGENT: &str = "Dispenser/0.1.0";

pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(user_agent)
        .default_headers(default_headers)
        .build()
}

/// GET `url` and decode the JSON body, rejecting non-success statuses.
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> DispenserResult<T> {
    debug!("GET {}", url);

    let resp = client.get(url).send().await?;

    if !resp.status().is_success() {
        return Err(DispenserError::UpstreamApi(format!(
            "{} returned {}",
            url,
            resp.status()
        )));
    }

    Ok(resp.json::<T>().await?)
}

/// GET `url` and return the body as text, rejecting non-success statuses.
pub async fn fetch_text(client: &Client, url: &str) -> DispenserResult<String> {
    debug!("GET {}", url);

    let resp = client.get(url).send().await?;

    if !resp.status().is_success() {
        return Err(DispenserError::UpstreamApi(format!(
            "{} returned {}",
            url,
            resp.status()
        )));
    }

    Ok(resp.text().await?)
}
