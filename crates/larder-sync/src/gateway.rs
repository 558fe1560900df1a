//! # Remote Data Gateway
//!
//! The four CRUD round trips against the remote food collection.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Remote Collection Contract                           │
//! │                                                                         │
//! │  get_items(term)    GET    /Food?name={term}  → [raw record, ...]      │
//! │  create_item(form)  POST   /Food              → raw record             │
//! │  update_item(id, f) PUT    /Food/{id}         → raw record             │
//! │  delete_item(id)    DELETE /Food/{id}         → (body ignored)         │
//! │                                                                         │
//! │  Request bodies:  to_payload(form)                                     │
//! │  Response bodies: RawRecord::from_value → to_item                      │
//! │                                                                         │
//! │  Non-2xx ──► FetchError / CreateError / UpdateError / DeleteError      │
//! │  No retries. No timeouts. Failures surface to the caller at once.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use larder_core::{to_item, to_payload, FormInput, Item, RawRecord};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Gateway Trait
// =============================================================================

/// Access to the remote food collection.
///
/// The Store only talks to this trait, so tests can swap the HTTP
/// implementation for an in-memory one.
#[async_trait]
pub trait FoodGateway: Send + Sync {
    /// Lists the collection, filtered by name when `search_term` is non-empty.
    async fn get_items(&self, search_term: Option<&str>) -> ClientResult<Vec<Item>>;

    /// Creates a record from `form` and returns it normalized.
    async fn create_item(&self, form: &FormInput) -> ClientResult<Item>;

    /// Replaces the record `id` with `form` and returns it normalized.
    async fn update_item(&self, id: &str, form: &FormInput) -> ClientResult<Item>;

    /// Deletes the record `id`.
    async fn delete_item(&self, id: &str) -> ClientResult<()>;
}

// =============================================================================
// HTTP Gateway
// =============================================================================

/// [`FoodGateway`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    collection: Url,
}

impl HttpGateway {
    /// Creates a gateway for the collection at `collection` (e.g. `https://host/Food`).
    pub fn new(collection: Url) -> Self {
        Self::with_client(Client::new(), collection)
    }

    /// Creates a gateway with a preconfigured reqwest client.
    pub fn with_client(client: Client, collection: Url) -> Self {
        HttpGateway { client, collection }
    }

    /// Creates a gateway for the collection named in `config`.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.collection_url()?))
    }

    /// The collection URL this gateway talks to.
    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    fn item_url(&self, id: &str) -> ClientResult<Url> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.collection.to_string()))?
            .push(id);
        Ok(url)
    }

    fn search_url(&self, search_term: Option<&str>) -> Url {
        let mut url = self.collection.clone();
        if let Some(term) = search_term.filter(|t| !t.is_empty()) {
            url.query_pairs_mut().append_pair("name", term);
        }
        url
    }
}

/// Decodes a single record body and normalizes it.
async fn read_item(response: Response) -> ClientResult<Item> {
    let value: Value = response.json().await?;
    Ok(to_item(&RawRecord::from_value(value)))
}

#[async_trait]
impl FoodGateway for HttpGateway {
    async fn get_items(&self, search_term: Option<&str>) -> ClientResult<Vec<Item>> {
        let url = self.search_url(search_term);
        debug!(%url, "Fetching food items");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Fetch rejected by remote collection");
            return Err(ClientError::FetchError {
                status: status.as_u16(),
            });
        }

        let records: Vec<Value> = response.json().await?;
        let items: Vec<Item> = records
            .into_iter()
            .map(|value| to_item(&RawRecord::from_value(value)))
            .collect();

        info!(count = items.len(), term = ?search_term, "Fetched food items");
        Ok(items)
    }

    async fn create_item(&self, form: &FormInput) -> ClientResult<Item> {
        let payload = to_payload(form);
        debug!(name = %payload.name, "Creating food item");

        let response = self
            .client
            .post(self.collection.clone())
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Create rejected by remote collection");
            return Err(ClientError::CreateError {
                status: status.as_u16(),
            });
        }

        let item = read_item(response).await?;
        info!(id = %item.id, name = %item.name, "Created food item");
        Ok(item)
    }

    async fn update_item(&self, id: &str, form: &FormInput) -> ClientResult<Item> {
        let payload = to_payload(form);
        debug!(id, name = %payload.name, "Updating food item");

        let response = self
            .client
            .put(self.item_url(id)?)
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!(id, status = status.as_u16(), "Update rejected by remote collection");
            return Err(ClientError::UpdateError {
                id: id.to_string(),
                status: status.as_u16(),
            });
        }

        let item = read_item(response).await?;
        info!(id = %item.id, "Updated food item");
        Ok(item)
    }

    async fn delete_item(&self, id: &str) -> ClientResult<()> {
        debug!(id, "Deleting food item");

        let response = self.client.delete(self.item_url(id)?).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(id, status = status.as_u16(), "Delete rejected by remote collection");
            return Err(ClientError::DeleteError {
                id: id.to_string(),
                status: status.as_u16(),
            });
        }

        info!(id, "Deleted food item");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use larder_core::RestaurantStatus;

    type Collection = Arc<Mutex<Vec<Value>>>;

    /// In-process stand-in for the remote collection.
    async fn spawn_collection(seed: Vec<Value>) -> (Url, Collection) {
        let records: Collection = Arc::new(Mutex::new(seed));

        async fn list(
            State(records): State<Collection>,
            Query(params): Query<HashMap<String, String>>,
        ) -> Json<Vec<Value>> {
            let records = records.lock().unwrap();
            let filtered = records
                .iter()
                .filter(|r| match params.get("name") {
                    Some(term) => r["name"]
                        .as_str()
                        .is_some_and(|n| n.to_lowercase().contains(&term.to_lowercase())),
                    None => true,
                })
                .cloned()
                .collect();
            Json(filtered)
        }

        async fn create(
            State(records): State<Collection>,
            Json(mut body): Json<Value>,
        ) -> (StatusCode, Json<Value>) {
            body["id"] = json!(uuid::Uuid::new_v4().to_string());
            body["createdAt"] = json!(chrono::Utc::now().to_rfc3339());
            records.lock().unwrap().push(body.clone());
            (StatusCode::CREATED, Json(body))
        }

        async fn update(
            State(records): State<Collection>,
            Path(id): Path<String>,
            Json(body): Json<Value>,
        ) -> Result<Json<Value>, StatusCode> {
            let mut records = records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|r| r["id"] == json!(id))
                .ok_or(StatusCode::NOT_FOUND)?;
            if let (Some(target), Some(fields)) = (record.as_object_mut(), body.as_object()) {
                for (k, v) in fields {
                    target.insert(k.clone(), v.clone());
                }
            }
            Ok(Json(record.clone()))
        }

        async fn remove(
            State(records): State<Collection>,
            Path(id): Path<String>,
        ) -> Result<Json<Value>, StatusCode> {
            let mut records = records.lock().unwrap();
            let index = records
                .iter()
                .position(|r| r["id"] == json!(id))
                .ok_or(StatusCode::NOT_FOUND)?;
            Ok(Json(records.remove(index)))
        }

        let app = Router::new()
            .route("/Food", get(list).post(create))
            .route("/Food/{id}", axum::routing::put(update).delete(remove))
            .with_state(records.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let url = Url::parse(&format!("http://{addr}/Food")).unwrap();
        (url, records)
    }

    /// A collection that rejects every request.
    /// Serves the same status and body for every request.
    async fn spawn_fixed(status: StatusCode, body: &'static str) -> Url {
        let app = Router::new().fallback(move || async move { (status, body) });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/Food")).unwrap()
    }

    fn gateway(url: Url) -> HttpGateway {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpGateway::with_client(client, url)
    }

    fn sample_form() -> FormInput {
        FormInput {
            food_name: "Margherita".into(),
            food_image: "https://img.example/margherita.png".into(),
            food_rating: "4.5".into(),
            price: "12.99".into(),
            restaurant_name: "Luigi's".into(),
            restaurant_logo: "https://img.example/luigi.png".into(),
            restaurant_status: "Open Now".into(),
        }
    }

    #[test]
    fn test_urls() {
        let gw = HttpGateway::new(Url::parse("https://api.example/Food").unwrap());
        assert_eq!(gw.search_url(None).as_str(), "https://api.example/Food");
        assert_eq!(gw.search_url(Some("")).as_str(), "https://api.example/Food");
        assert_eq!(
            gw.search_url(Some("mac & cheese")).as_str(),
            "https://api.example/Food?name=mac+%26+cheese"
        );
        assert_eq!(
            gw.item_url("a/b").unwrap().as_str(),
            "https://api.example/Food/a%2Fb"
        );
    }

    #[tokio::test]
    async fn test_get_items_normalizes_records() {
        let (url, _) = spawn_collection(vec![
            json!({"id": "1", "name": "Pizza", "rating": "4", "Price": "$9"}),
            json!({"id": "2", "name": "Sushi", "rating": 5, "price": "20",
                   "restaurant": {"name": "Umi", "logo": "https://img.example/umi.png", "status": "Open"}}),
        ])
        .await;

        let items = gateway(url).get_items(None).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].price, "9");
        assert_eq!(items[0].rating, 4.0);
        assert!(items[0].restaurant.is_none());
        assert_eq!(
            items[1].restaurant.as_ref().unwrap().status,
            RestaurantStatus::Open
        );
    }

    #[tokio::test]
    async fn test_get_items_sends_name_filter() {
        let (url, _) = spawn_collection(vec![
            json!({"id": "1", "name": "Pizza"}),
            json!({"id": "2", "name": "Pasta"}),
        ])
        .await;

        let items = gateway(url).get_items(Some("pizz")).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
    }

    #[tokio::test]
    async fn test_create_update_delete_round_trip() {
        let (url, records) = spawn_collection(Vec::new()).await;
        let gw = gateway(url);

        let created = gw.create_item(&sample_form()).await.unwrap();
        assert!(!created.id.is_empty());
        assert!(!created.created_at.is_empty());
        assert_eq!(created.name, "Margherita");
        assert_eq!(created.image, "https://img.example/margherita.png");
        assert_eq!(created.rating, 4.5);
        assert_eq!(created.price, "12.99");
        let restaurant = created.restaurant.clone().unwrap();
        assert_eq!(restaurant.name, "Luigi's");
        assert_eq!(restaurant.logo, "https://img.example/luigi.png");
        assert_eq!(restaurant.status, RestaurantStatus::Open);

        // The stored body uses the remote schema.
        {
            let stored = records.lock().unwrap();
            assert_eq!(stored[0]["Price"], json!("12.99"));
            assert_eq!(stored[0]["restaurant"]["status"], json!("Open Now"));
        }

        let mut form = sample_form();
        form.food_name = "Marinara".into();
        form.restaurant_status = "Closed".into();
        let updated = gw.update_item(&created.id, &form).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Marinara");
        assert_eq!(
            updated.restaurant.unwrap().status,
            RestaurantStatus::Closed
        );

        gw.delete_item(&created.id).await.unwrap();
        assert!(records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_record_maps_to_typed_errors() {
        let (url, _) = spawn_collection(Vec::new()).await;
        let gw = gateway(url);

        let err = gw.update_item("nope", &sample_form()).await.unwrap_err();
        assert_eq!(
            err,
            ClientError::UpdateError {
                id: "nope".into(),
                status: 404
            }
        );

        let err = gw.delete_item("nope").await.unwrap_err();
        assert_eq!(
            err,
            ClientError::DeleteError {
                id: "nope".into(),
                status: 404
            }
        );
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_typed_errors() {
        let gw = gateway(spawn_fixed(StatusCode::INTERNAL_SERVER_ERROR, "Not found").await);

        assert_eq!(
            gw.get_items(Some("pizza")).await.unwrap_err(),
            ClientError::FetchError { status: 500 }
        );
        assert_eq!(
            gw.create_item(&sample_form()).await.unwrap_err(),
            ClientError::CreateError { status: 500 }
        );
    }

    #[tokio::test]
    async fn test_undecodable_body_is_decode_error() {
        let gw = gateway(spawn_fixed(StatusCode::OK, "not json").await);

        assert!(matches!(
            gw.get_items(None).await.unwrap_err(),
            ClientError::Decode(_)
        ));
        assert!(matches!(
            gw.create_item(&sample_form()).await.unwrap_err(),
            ClientError::Decode(_)
        ));
        assert!(matches!(
            gw.update_item("7", &sample_form()).await.unwrap_err(),
            ClientError::Decode(_)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gw = gateway(Url::parse(&format!("http://{addr}/Food")).unwrap());
        let err = gw.get_items(None).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.is_gateway_error());
    }
}
