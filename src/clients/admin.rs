//! REST Management API helpers.
//!
//! These reuse the client's store hash and access token to read reference
//! data that the Storefront GraphQL API does not expose. Responses are
//! returned as parsed JSON; their shape is BigCommerce's, not ours.
//!
//! Requests go to `https://{admin_api_host}/stores/{store_hash}/v2/{path}`
//! with the access token in `X-Auth-Token`.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::clients::client::Client;
use crate::clients::errors::{AdminApiError, ClientError};

/// Header carrying the REST access token.
const AUTH_TOKEN_HEADER: &str = "x-auth-token";

const COUNTRIES_CONTEXT: &str = "Unable to get available Countries List";
const STATES_CONTEXT: &str = "Unable to get available States or Provinces";
const SHIPPING_ZONES_CONTEXT: &str = "Unable to get Shipping Zones";

impl Client {
    /// Lists up to 250 countries known to the store.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Admin`] with context
    /// `"Unable to get available Countries List"` on a non-2xx status.
    pub async fn fetch_available_countries(&self) -> Result<Value, ClientError> {
        self.admin_get(&self.admin_url("countries?limit=250"), COUNTRIES_CONTEXT)
            .await
    }

    /// Lists up to 60 states or provinces of a country.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Admin`] with context
    /// `"Unable to get available States or Provinces"` on a non-2xx status.
    pub async fn fetch_country_states(&self, country_id: u64) -> Result<Value, ClientError> {
        self.admin_get(
            &self.admin_url(&format!("countries/{country_id}/states?limit=60")),
            STATES_CONTEXT,
        )
        .await
    }

    /// Lists the store's shipping zones.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Admin`] with context
    /// `"Unable to get Shipping Zones"` on a non-2xx status.
    pub async fn fetch_shipping_zones(&self) -> Result<Value, ClientError> {
        self.admin_get(&self.admin_url("shipping/zones"), SHIPPING_ZONES_CONTEXT)
            .await
    }

    pub(crate) fn admin_url(&self, path: &str) -> String {
        format!(
            "https://{}/stores/{}/v2/{}",
            self.config.admin_api_host(),
            self.config.store_hash(),
            path
        )
    }

    fn admin_headers(&self) -> Result<HeaderMap, ClientError> {
        let mut token = HeaderValue::from_str(self.config.access_token().as_ref()).map_err(|_| {
            ClientError::InvalidHeader {
                name: AUTH_TOKEN_HEADER.to_string(),
            }
        })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(AUTH_TOKEN_HEADER), token);
        Ok(headers)
    }

    pub(crate) async fn admin_get(
        &self,
        url: &str,
        context: &'static str,
    ) -> Result<Value, ClientError> {
        let response = self
            .http
            .get(url)
            .headers(self.admin_headers()?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), context, "Admin API request failed");
            return Err(AdminApiError {
                context,
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            }
            .into());
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
