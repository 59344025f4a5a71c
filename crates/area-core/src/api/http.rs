use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::BackendConfig;
use crate::playground::{
    ActionLink, PlaygroundAction, PlaygroundReaction, ReactionLink, Settings,
};

use super::{ApiError, PlaygroundApi};

/// HTTP client for the playground backend.
///
/// Every request carries the session's bearer token.
pub struct HttpPlaygroundClient {
    base_url: String,
    token: String,
    client: Client,
}

impl HttpPlaygroundClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `base_url` - The backend address (e.g., "http://localhost:8080")
    /// * `token` - The bearer token of the logged-in user
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Creates a client from backend configuration.
    ///
    /// The token comes from `backend.token`, which `AREA_TOKEN` overrides
    /// when the configuration is loaded.
    pub fn from_config(config: &BackendConfig) -> Result<Self, ApiError> {
        let token = config.token.clone().ok_or(ApiError::MissingToken)?;

        Ok(Self::new(&config.base_url, token))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("authorization", format!("Bearer {}", self.token))
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn post_json<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut req = self
            .authorized(self.client.post(self.url(path)))
            .header("content-type", "application/json");

        if let Some(body) = body {
            req = req.json(body);
        }

        let response = Self::check(req.send().await?).await?;

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let req = self.authorized(self.client.delete(self.url(path)));
        Self::check(req.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl PlaygroundApi for HttpPlaygroundClient {
    async fn add_action_to_playground(
        &self,
        playground_id: i64,
        definition_id: i64,
        settings: &Settings,
        x: f64,
        y: f64,
    ) -> Result<PlaygroundAction, ApiError> {
        let body = PlacementRequest { settings, x, y };
        self.post_json(
            &format!("/playground/{playground_id}/action/{definition_id}"),
            Some(&body),
        )
        .await
    }

    async fn add_reaction_to_playground(
        &self,
        playground_id: i64,
        definition_id: i64,
        settings: &Settings,
        x: f64,
        y: f64,
    ) -> Result<PlaygroundReaction, ApiError> {
        let body = PlacementRequest { settings, x, y };
        self.post_json(
            &format!("/playground/{playground_id}/reaction/{definition_id}"),
            Some(&body),
        )
        .await
    }

    async fn delete_action_from_playground(
        &self,
        playground_id: i64,
        instance_id: i64,
    ) -> Result<(), ApiError> {
        self.delete(&format!("/playground/{playground_id}/action/{instance_id}"))
            .await
    }

    async fn delete_reaction_from_playground(
        &self,
        playground_id: i64,
        instance_id: i64,
    ) -> Result<(), ApiError> {
        self.delete(&format!("/playground/{playground_id}/reaction/{instance_id}"))
            .await
    }

    async fn add_action_to_reaction_link(
        &self,
        source_instance_id: i64,
        target_instance_id: i64,
    ) -> Result<ActionLink, ApiError> {
        self.post_json::<(), _>(
            &format!("/playground/link/action/{source_instance_id}/reaction/{target_instance_id}"),
            None,
        )
        .await
    }

    async fn add_reaction_to_reaction_link(
        &self,
        source_instance_id: i64,
        target_instance_id: i64,
    ) -> Result<ReactionLink, ApiError> {
        self.post_json::<(), _>(
            &format!("/playground/link/reaction/{source_instance_id}/reaction/{target_instance_id}"),
            None,
        )
        .await
    }
}

#[derive(Debug, Serialize)]
struct PlacementRequest<'a> {
    settings: &'a Settings,
    x: f64,
    y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpPlaygroundClient::new("https://api.example.com", "token");
        assert_eq!(client.base_url, "https://api.example.com");
        assert_eq!(client.token, "token");
    }

    #[test]
    fn test_url_trailing_slash_removed() {
        let client = HttpPlaygroundClient::new("https://api.example.com/", "token");
        assert_eq!(client.url("/playground/1/action/2"), "https://api.example.com/playground/1/action/2");
    }

    #[test]
    fn test_from_config_uses_configured_token() {
        let config = BackendConfig {
            base_url: "http://localhost:9000".to_string(),
            token: Some("secret".to_string()),
        };
        let client = HttpPlaygroundClient::from_config(&config).unwrap();
        assert_eq!(client.token, "secret");
        assert_eq!(client.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_from_config_requires_token() {
        let config = BackendConfig {
            base_url: "http://localhost:9000".to_string(),
            token: None,
        };
        assert!(matches!(
            HttpPlaygroundClient::from_config(&config),
            Err(ApiError::MissingToken)
        ));
    }
}
