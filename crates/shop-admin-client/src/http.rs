//! reqwest-backed implementation of [`AdminApi`]

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use tracing::{debug, warn};

use crate::api::{AdminApi, ADMIN_PRODUCTS_PATH, PRODUCTS_PATH, USERS_PATH};
use crate::credential::Credential;
use crate::error::ClientError;
use crate::models::{ActiveUpdate, AvailabilityUpdate, CreateOutcome, NewProduct, Product, User};
use crate::response;

#[derive(Clone)]
pub struct HttpAdminClient {
    client: Client,
    base_url: Url,
}

impl HttpAdminClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded segments to the base URL's path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        credential: Option<&Credential>,
    ) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(segments)?;
        let builder = self.client.request(method, url);
        Ok(match credential {
            Some(credential) => builder.bearer_auth(credential.as_str()),
            None => builder,
        })
    }

    /// Sends the request and returns the raw body of a 2xx response.
    async fn execute(&self, builder: RequestBuilder) -> Result<String, ClientError> {
        let request = builder
            .build()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, %path, "Sending admin API request");

        let response = self.client.execute(request).await.map_err(|e| {
            warn!(%method, %path, error = %e, "Admin API unreachable");
            ClientError::transport(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(%method, %path, error = %e, "Admin API response body unreadable");
            ClientError::Decode(e.to_string())
        })?;

        if !status.is_success() {
            let message = response::error_message(&body);
            warn!(%method, %path, status = status.as_u16(), ?message, "Admin API rejected request");
            return Err(ClientError::Request {
                status: status.as_u16(),
                message,
            });
        }

        debug!(%method, %path, status = status.as_u16(), bytes = body.len(), "Admin API responded");
        Ok(body)
    }
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    async fn list_users(&self, credential: &Credential) -> Result<Vec<User>, ClientError> {
        let builder = self.request(Method::GET, USERS_PATH, Some(credential))?;
        let body = self.execute(builder).await?;
        response::collection(&body, "users")
    }

    async fn list_products(&self, credential: &Credential) -> Result<Vec<Product>, ClientError> {
        let builder = self.request(Method::GET, ADMIN_PRODUCTS_PATH, Some(credential))?;
        let body = self.execute(builder).await?;
        response::collection(&body, "products")
    }

    async fn set_user_active(
        &self,
        credential: &Credential,
        user_id: &str,
        active: bool,
    ) -> Result<(), ClientError> {
        let segments: Vec<&str> = USERS_PATH.iter().copied().chain([user_id]).collect();
        let builder = self
            .request(Method::PUT, &segments, Some(credential))?
            .json(&ActiveUpdate { active });
        self.execute(builder).await.map(|_| ())
    }

    async fn set_product_available(
        &self,
        credential: &Credential,
        product_id: &str,
        available: bool,
    ) -> Result<(), ClientError> {
        let segments: Vec<&str> = ADMIN_PRODUCTS_PATH.iter().copied().chain([product_id]).collect();
        let builder = self
            .request(Method::PUT, &segments, Some(credential))?
            .json(&AvailabilityUpdate { available });
        self.execute(builder).await.map(|_| ())
    }

    async fn create_product(
        &self,
        product: &NewProduct,
        credential: Option<Credential>,
    ) -> Result<CreateOutcome, ClientError> {
        let builder = self
            .request(Method::POST, PRODUCTS_PATH, credential.as_ref())?
            .json(product);
        let body = self.execute(builder).await?;
        response::create_outcome(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token() -> Credential {
        Credential::new("admin-token")
    }

    fn shoe() -> NewProduct {
        NewProduct {
            name: "Shoe".to_string(),
            price: 25.0,
            image: "https://x.test/i.png".to_string(),
            description: "d".to_string(),
            category: "c".to_string(),
            company: "co".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_users_sends_bearer_and_accepts_both_shapes() {
        let server = MockServer::start().await;
        let record = json!({"_id": "u1", "email": "a@x.test", "active": true});

        Mock::given(method("GET"))
            .and(path("/api/admin/users"))
            .and(header("authorization", "Bearer admin-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": [record.clone()]})))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/admin/users"))
            .and(header("authorization", "Bearer admin-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([record])))
            .mount(&server)
            .await;

        let client = HttpAdminClient::new(&server.uri()).unwrap();
        let wrapped = client.list_users(&token()).await.unwrap();
        let bare = client.list_users(&token()).await.unwrap();

        assert_eq!(wrapped, bare);
        assert_eq!(wrapped[0].id, "u1");
        assert!(wrapped[0].active);
    }

    #[tokio::test]
    async fn test_list_products_without_field_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
            .mount(&server)
            .await;

        let client = HttpAdminClient::new(&server.uri()).unwrap();
        assert!(client.list_products(&token()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_user_active_puts_flag() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/admin/users/u1"))
            .and(header("authorization", "Bearer admin-token"))
            .and(body_json(json!({"active": false})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpAdminClient::new(&server.uri()).unwrap();
        client.set_user_active(&token(), "u1", false).await.unwrap();
    }

    #[tokio::test]
    async fn test_set_product_available_encodes_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/admin/products/p%201"))
            .and(body_json(json!({"available": true})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpAdminClient::new(&server.uri()).unwrap();
        client
            .set_product_available(&token(), "p 1", true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_base_url_path_prefix_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shop/api/admin/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpAdminClient::new(&format!("{}/shop/", server.uri())).unwrap();
        assert!(client.list_users(&token()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_product_is_unauthenticated_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .and(body_json(json!({
                "name": "Shoe",
                "price": 25.0,
                "image": "https://x.test/i.png",
                "description": "d",
                "category": "c",
                "company": "co"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpAdminClient::new(&server.uri()).unwrap();
        let outcome = client.create_product(&shoe(), None).await.unwrap();
        assert_eq!(outcome, CreateOutcome::Created);

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_create_product_with_credential() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .and(header("authorization", "Bearer admin-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "message": "Name taken"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpAdminClient::new(&server.uri()).unwrap();
        let outcome = client.create_product(&shoe(), Some(token())).await.unwrap();
        assert_eq!(
            outcome,
            CreateOutcome::Refused {
                message: Some("Name taken".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_non_success_status_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "Price required"})),
            )
            .mount(&server)
            .await;

        let client = HttpAdminClient::new(&server.uri()).unwrap();
        let err = client.create_product(&shoe(), None).await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Request {
                status: 400,
                message: Some("Price required".to_string())
            }
        );
        assert_eq!(err.server_message(), Some("Price required"));
    }

    #[tokio::test]
    async fn test_unauthorized_list_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/users"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = HttpAdminClient::new(&server.uri()).unwrap();
        let err = client.list_users(&token()).await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Request {
                status: 401,
                message: None
            }
        );
    }

    #[tokio::test]
    async fn test_unsendable_token_is_not_a_network_error() {
        let server = MockServer::start().await;
        let client = HttpAdminClient::new(&server.uri()).unwrap();

        let err = client
            .list_users(&Credential::new("bad\ntoken"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::InvalidRequest(_)));
        assert!(!err.is_network());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpAdminClient::new(&format!("http://{}", address)).unwrap();
        let err = client.list_products(&token()).await.unwrap_err();
        assert!(err.is_network());
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(matches!(
            HttpAdminClient::new("not a url"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            HttpAdminClient::new("mailto:admin@x.test"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }
}
