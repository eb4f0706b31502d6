// Larder backend HTTP client
//
// Wraps `reqwest::Client` with URL construction, error-envelope mapping,
// and JSON decoding. Endpoints are inherent methods grouped by domain
// (inventory, shopping, suggestions) to keep the transport mechanics in
// one place.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    AddInventoryItemBody, AddShoppingItemBody, ApiErrorBody, CompleteShoppingItemBody,
    CreatedResponse, InventoryItemDto, ShoppingItemDto, SuggestionDto,
    UpdateInventoryItemBody,
};

/// HTTP client for the Larder backend API.
///
/// All methods return decoded domain-shaped DTOs or a typed [`Error`];
/// callers never see raw status codes or response bodies.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the API root, e.g. `https://api.larder.app/v1/`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Used by tests that point at a mock server with no auth header.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a request with an optional JSON body and decode the response.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&impl Serialize>,
    ) -> Result<T, Error> {
        debug!("{method} {url}");

        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(map_api_error(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: text,
        })
    }

    /// Send a request and ignore the (possibly empty) response body.
    async fn request_no_content(
        &self,
        method: Method,
        url: Url,
        body: Option<&impl Serialize>,
    ) -> Result<(), Error> {
        debug!("{method} {url}");

        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(map_api_error(status, &text));
        }
        Ok(())
    }

    // ── Inventory ────────────────────────────────────────────────────

    /// Fetch the full inventory item list.
    pub async fn fetch_inventory_items(&self) -> Result<Vec<InventoryItemDto>, Error> {
        let url = self.api_url("inventory/items")?;
        self.request(Method::GET, url, None::<&()>).await
    }

    /// Create an inventory item; returns the new id.
    pub async fn add_inventory_item(
        &self,
        body: &AddInventoryItemBody,
    ) -> Result<CreatedResponse, Error> {
        let url = self.api_url("inventory/items")?;
        self.request(Method::POST, url, Some(body)).await
    }

    /// Partially update an inventory item.
    pub async fn update_inventory_item(
        &self,
        id: i64,
        body: &UpdateInventoryItemBody,
    ) -> Result<(), Error> {
        let url = self.api_url(&format!("inventory/items/{id}"))?;
        self.request_no_content(Method::PATCH, url, Some(body)).await
    }

    /// Delete an inventory item.
    pub async fn delete_inventory_item(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("inventory/items/{id}"))?;
        self.request_no_content(Method::DELETE, url, None::<&()>).await
    }

    // ── Shopping ─────────────────────────────────────────────────────

    /// Fetch the full shopping-list item list.
    pub async fn fetch_shopping_items(&self) -> Result<Vec<ShoppingItemDto>, Error> {
        let url = self.api_url("shopping/items")?;
        self.request(Method::GET, url, None::<&()>).await
    }

    /// Add shopping items; returns every created item.
    pub async fn add_shopping_item(
        &self,
        body: &AddShoppingItemBody,
    ) -> Result<Vec<ShoppingItemDto>, Error> {
        let url = self.api_url("shopping/items")?;
        self.request(Method::POST, url, Some(body)).await
    }

    /// Complete a shopping item into the inventory flow; returns the
    /// placed item.
    pub async fn complete_shopping_item(
        &self,
        id: i64,
        body: &CompleteShoppingItemBody,
    ) -> Result<ShoppingItemDto, Error> {
        let url = self.api_url(&format!("shopping/items/{id}/complete"))?;
        self.request(Method::POST, url, Some(body)).await
    }

    // ── Suggestions ──────────────────────────────────────────────────

    /// Fetch the advisory payload for a category.
    pub async fn fetch_inventory_suggestions(
        &self,
        category_id: i64,
    ) -> Result<SuggestionDto, Error> {
        let url = self.api_url(&format!("inventory/suggestions/{category_id}"))?;
        self.request(Method::GET, url, None::<&()>).await
    }
}

/// Map a non-2xx response to [`Error::Api`], preferring the backend's
/// JSON error envelope over the raw body text.
fn map_api_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_owned()
            } else {
                body.to_owned()
            }
        });
    Error::Api {
        message,
        status: status.as_u16(),
    }
}
