//! API Client

use textjoy_checkout::{CheckoutConfig, CheckoutError, Result};

/// Fetch the checkout configuration from the host server
pub async fn fetch_config() -> Result<CheckoutConfig> {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());

    let response = reqwest::Client::new()
        .get(format!("{origin}/api/config"))
        .send()
        .await?;

    let status = response.status();
    if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
        return Err(CheckoutError::Config("checkout disabled on the server".into()));
    }
    if !status.is_success() {
        return Err(CheckoutError::Endpoint(status.as_u16()));
    }

    Ok(response.json().await?)
}
