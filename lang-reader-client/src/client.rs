use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::ClientConfig,
    error::ClientError,
    types::{MessageBody, Project, ProjectInput},
};

#[derive(Debug, Clone)]
pub struct ProjectClient {
    client: Client,
    base_url: Url,
}

impl ProjectClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        // Trailing slash so relative joins extend the path instead of
        // replacing its last segment.
        let raw = format!("{}/", config.api_url.trim_end_matches('/'));
        let base_url = Url::parse(&raw)
            .map_err(|err| ClientError::InvalidUrl(format!("{}: {}", config.api_url, err)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.api_url.clone()));
        }

        let client = Client::builder().build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(&ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The API root without its trailing slash, where the status route lives.
    fn status_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
        }
        url
    }

    fn projects_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("projects");
        }
        url
    }

    fn project_url(&self, id: &str) -> Url {
        let mut url = self.projects_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<MessageBody>().await {
                Ok(body) => body.message,
                Err(_) => fallback_message(status),
            };
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json::<T>().await?)
    }

    /// Server status message from the API root.
    pub async fn status(&self) -> Result<String, ClientError> {
        let body: MessageBody = self.send(self.client.get(self.status_url())).await?;
        Ok(body.message)
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.send(self.client.get(self.projects_url())).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, ClientError> {
        self.send(self.client.get(self.project_url(id))).await
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project, ClientError> {
        self.send(self.client.post(self.projects_url()).json(input))
            .await
    }

    pub async fn update_project(
        &self,
        id: &str,
        input: &ProjectInput,
    ) -> Result<Project, ClientError> {
        self.send(self.client.put(self.project_url(id)).json(input))
            .await
    }

    pub async fn delete_project(&self, id: &str) -> Result<String, ClientError> {
        let body: MessageBody = self.send(self.client.delete(self.project_url(id))).await?;
        Ok(body.message)
    }
}

fn fallback_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}
