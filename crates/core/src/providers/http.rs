use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::price::PriceInterval;
use crate::models::query::{PriceResponse, ProductPrices, Selection, VendorPrices};
use super::traits::{PriceSource, MAX_SUGGESTIONS};

const PROVIDER: &str = "PriceApi";

/// JSON-over-HTTP price backend.
///
/// - `POST {base}/api/prices` with `{skus, stores, start?, end?}`
/// - `POST {base}/api/autocomplete` with `{term, stores}`
///
/// No retries: a failed request surfaces as an error and the caller decides.
pub struct HttpPriceSource {
    client: Client,
    base_url: String,
}

impl HttpPriceSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, CoreError> {
        let url = format!("{}/api/{path}", self.base_url);
        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("{path} request failed with status {status}"),
            });
        }

        resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse {path} response: {e}"),
        })
    }
}

// ── Price API wire types ────────────────────────────────────────────

#[derive(Serialize)]
struct PricesRequest<'a> {
    skus: Vec<&'a str>,
    stores: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<i64>,
}

#[derive(Deserialize)]
struct PricesResponseBody {
    #[serde(default)]
    stores: Option<Vec<StoreBody>>,
}

#[derive(Deserialize)]
struct StoreBody {
    id: String,
    #[serde(default)]
    skus: Vec<SkuBody>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkuBody {
    sku: String,
    #[serde(default)]
    prices: Vec<PriceInterval>,
    #[serde(default)]
    sale_prices: Option<Vec<PriceInterval>>,
}

#[derive(Serialize)]
struct AutocompleteRequest<'a> {
    term: &'a str,
    stores: Vec<&'a str>,
}

#[derive(Deserialize)]
struct AutocompleteResponseBody {
    terms: Vec<String>,
}

impl From<PricesResponseBody> for PriceResponse {
    fn from(body: PricesResponseBody) -> Self {
        let vendors = body
            .stores
            .unwrap_or_default()
            .into_iter()
            .map(|store| VendorPrices {
                vendor_id: store.id,
                products: store
                    .skus
                    .into_iter()
                    .map(|sku| ProductPrices {
                        product_code: sku.sku,
                        regular: sku.prices,
                        sale: sku.sale_prices,
                    })
                    .collect(),
            })
            .collect();
        PriceResponse { vendors }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceSource for HttpPriceSource {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_prices(&self, selection: &Selection) -> Result<PriceResponse, CoreError> {
        let range = selection.date_range.unwrap_or_default();
        let body = PricesRequest {
            skus: selection.product_codes.iter().map(String::as_str).collect(),
            stores: selection.vendor_ids.iter().map(String::as_str).collect(),
            start: range.start,
            end: range.end,
        };
        let resp: PricesResponseBody = self.post("prices", &body).await?;
        Ok(resp.into())
    }

    async fn get_suggestions(
        &self,
        prefix: &str,
        vendor_ids: &BTreeSet<String>,
    ) -> Result<Vec<String>, CoreError> {
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let body = AutocompleteRequest {
            term: prefix,
            stores: vendor_ids.iter().map(String::as_str).collect(),
        };
        let resp: AutocompleteResponseBody = self.post("autocomplete", &body).await?;

        let mut terms = resp.terms;
        terms.truncate(MAX_SUGGESTIONS);
        Ok(terms)
    }
}
