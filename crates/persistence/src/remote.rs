// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP backend.
//!
//! Every request carries the shared credential as a bearer token. The
//! backend scopes data by that token, so the `user_id` arguments are
//! informational here.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use swadesi_domain::{BillRecord, Cart, CartItem, Order, User};
use swadesi_ledger::{LedgerEntry, PointsActivity};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::credential::{Credential, CredentialSlot, CredentialStatus};
use crate::error::PersistenceError;
use crate::store::{Store, StoreMode};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderCreated {
    order_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BillCreated {
    bill_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityCreated {
    activity_id: String,
}

/// Client for the remote backend.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: String,
    credentials: CredentialSlot,
}

impl RemoteStore {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Request` if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: CredentialSlot,
    ) -> Result<Self, PersistenceError> {
        let client: Client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PersistenceError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, PersistenceError> {
        let credential: Credential = self
            .credentials
            .get()
            .ok_or(PersistenceError::MissingCredential)?;
        let response: Response = request.bearer_auth(credential.as_str()).send().await?;
        let status: StatusCode = response.status();
        debug!(path, status = status.as_u16(), "Backend responded");
        if status.is_success() {
            return Ok(response);
        }

        let message: String = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        Err(self.classify(status, message, path))
    }

    fn classify(&self, status: StatusCode, message: String, path: &str) -> PersistenceError {
        match status {
            StatusCode::UNAUTHORIZED => {
                warn!(path, "Backend rejected the access token, clearing it");
                self.credentials.clear();
                PersistenceError::Unauthorized
            }
            StatusCode::FORBIDDEN => PersistenceError::Forbidden(path.to_string()),
            StatusCode::NOT_FOUND => PersistenceError::NotFound(path.to_string()),
            s if s.is_server_error() => PersistenceError::Server {
                status: s.as_u16(),
                message,
            },
            s => PersistenceError::Rejected {
                status: s.as_u16(),
                message,
            },
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PersistenceError> {
        let response: Response = self.send(self.client.get(self.url(path)), path).await?;
        Ok(response.json::<T>().await?)
    }

    /// Fetches a collection. A body that is not an array counts as empty.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, PersistenceError> {
        let body: Value = self.get_json(path).await?;
        if !body.is_array() {
            warn!(path, "Expected an array from the backend, treating as empty");
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(body)?)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, PersistenceError> {
        let response: Response = self
            .send(self.client.post(self.url(path)).json(body), path)
            .await?;
        Ok(response.json::<T>().await?)
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<(), PersistenceError> {
        self.send(self.client.put(self.url(path)).json(body), path)
            .await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), PersistenceError> {
        self.send(self.client.delete(self.url(path)), path).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for RemoteStore {
    fn mode(&self) -> StoreMode {
        StoreMode::Remote
    }

    async fn probe_credential(
        &self,
        credential: &Credential,
    ) -> Result<CredentialStatus, PersistenceError> {
        if credential.is_empty() {
            return Ok(CredentialStatus::Invalid);
        }
        match self.get_json::<Value>("/user/profile").await {
            Ok(_) => Ok(CredentialStatus::Valid),
            Err(PersistenceError::Unauthorized | PersistenceError::Forbidden(_)) => {
                Ok(CredentialStatus::Invalid)
            }
            Err(e) => Err(e),
        }
    }

    async fn get_user(&self, _user_id: &str) -> Result<Option<User>, PersistenceError> {
        match self.get_json::<User>("/user/profile").await {
            Ok(user) => Ok(Some(user)),
            Err(PersistenceError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn update_user(&self, user: &User) -> Result<(), PersistenceError> {
        self.put_json("/user/profile", &serde_json::to_value(user)?)
            .await
    }

    async fn get_cart(&self, _user_id: &str) -> Result<Cart, PersistenceError> {
        let items: Vec<CartItem> = self.get_list("/cart").await?;
        Ok(Cart::from_items(items))
    }

    async fn save_cart(&self, _user_id: &str, cart: &Cart) -> Result<(), PersistenceError> {
        let body: Value = json!({ "items": cart.items() });
        self.send(self.client.post(self.url("/cart")).json(&body), "/cart")
            .await?;
        Ok(())
    }

    async fn clear_cart(&self, _user_id: &str) -> Result<(), PersistenceError> {
        self.delete("/cart").await
    }

    async fn get_orders(&self, _user_id: &str) -> Result<Vec<Order>, PersistenceError> {
        self.get_list("/orders").await
    }

    async fn create_order(&self, _user_id: &str, order: &Order) -> Result<String, PersistenceError> {
        let created: OrderCreated = self
            .post_json("/orders", &serde_json::to_value(order)?)
            .await?;
        Ok(created.order_id)
    }

    async fn update_order(&self, _user_id: &str, order: &Order) -> Result<(), PersistenceError> {
        if !order.is_persisted() {
            return Err(PersistenceError::NotFound("order without id".to_string()));
        }
        let path: String = format!("/orders/{}", order.id());
        self.put_json(&path, &serde_json::to_value(order)?).await
    }

    async fn get_bills(&self, _user_id: &str) -> Result<Vec<BillRecord>, PersistenceError> {
        self.get_list("/bills").await
    }

    async fn create_bill(
        &self,
        _user_id: &str,
        bill: &BillRecord,
    ) -> Result<String, PersistenceError> {
        let created: BillCreated = self
            .post_json("/bills", &serde_json::to_value(bill)?)
            .await?;
        Ok(created.bill_id)
    }

    async fn update_bill(&self, _user_id: &str, bill: &BillRecord) -> Result<(), PersistenceError> {
        if bill.id.is_empty() {
            return Err(PersistenceError::NotFound("bill without id".to_string()));
        }
        let path: String = format!("/bills/{}", bill.id);
        self.put_json(&path, &serde_json::to_value(bill)?).await
    }

    async fn get_activity(&self, _user_id: &str) -> Result<Vec<PointsActivity>, PersistenceError> {
        self.get_list("/points/activity").await
    }

    async fn create_activity(
        &self,
        _user_id: &str,
        entry: &LedgerEntry,
        date: OffsetDateTime,
    ) -> Result<PointsActivity, PersistenceError> {
        let draft: PointsActivity = entry.clone().into_activity(String::new(), date);
        let created: ActivityCreated = self
            .post_json("/points/activity", &serde_json::to_value(&draft)?)
            .await?;
        Ok(entry.clone().into_activity(created.activity_id, date))
    }

    async fn clear_all(&self, _user_id: &str) -> Result<(), PersistenceError> {
        self.delete("/user/data").await
    }
}
