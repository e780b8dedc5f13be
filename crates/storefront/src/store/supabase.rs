//! Supabase PostgREST client.
//!
//! Speaks the store's REST interface directly: one `GET` per shop listing,
//! one `POST` per reservation insert. The anon key rides on every request in
//! both the `apikey` header and an `Authorization: Bearer` header, which is
//! how the hosted SDK authenticates public clients.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;

use crate::config::SupabaseConfig;

use super::{NewReservation, RESERVATIONS_TABLE, SHOPS_TABLE, Shop, ShopStore, StoreError};

/// Client for the hosted data store's REST interface.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    rest_base: Url,
}

impl SupabaseStore {
    /// Create a new store client.
    ///
    /// # Errors
    ///
    /// Returns an error if the access key cannot be used as a header value
    /// or the HTTP client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(config.anon_key())
            .map_err(|e| StoreError::Parse(format!("Invalid access key format: {e}")))?;
        headers.insert("apikey", key);

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key()))
            .map_err(|e| StoreError::Parse(format!("Invalid access key format: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        let rest_base = config
            .url
            .join("rest/v1/")
            .map_err(|e| StoreError::Parse(format!("Invalid store URL: {e}")))?;

        Ok(Self { client, rest_base })
    }

    /// Endpoint URL for a collection.
    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.rest_base
            .join(table)
            .map_err(|e| StoreError::Parse(format!("Invalid table name {table}: {e}")))
    }

    async fn fetch_shops(&self) -> Result<Vec<Shop>, StoreError> {
        let mut url = self.table_url(SHOPS_TABLE)?;
        url.set_query(Some("select=*"));

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<Shop>>()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    async fn insert_reservation(&self, reservation: &NewReservation) -> Result<(), StoreError> {
        let url = self.table_url(RESERVATIONS_TABLE)?;

        // The hosted SDK posts a one-element array; PostgREST accepts the
        // same shape here. No representation is needed back.
        let response = self
            .client
            .post(url)
            .header("Prefer", "return=minimal")
            .json(&[reservation])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

impl ShopStore for SupabaseStore {
    fn list_shops(&self) -> impl Future<Output = Result<Vec<Shop>, StoreError>> + Send {
        self.fetch_shops()
    }

    fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        self.insert_reservation(reservation)
    }
}
