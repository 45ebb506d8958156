use reqwest::{multipart, Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    UnexpectedStatusCode,
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub status_code: Option<StatusCode>,
    pub message: String,
}

pub type APIResponse<T> = Result<T, APIError>;

pub(crate) struct BaseClient {
    client: Client,
    address: String,
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            client: Client::new(),
            address,
        }
    }

    fn get_client_url(&self, path: String) -> String {
        format!("{}/api/v1/{}", self.address, path)
    }

    fn network_error(e: reqwest::Error) -> APIError {
        APIError {
            variant: APIErrorVariant::Network,
            status_code: None,
            message: e.to_string(),
        }
    }

    async fn handle_api_response<T: DeserializeOwned>(
        res: reqwest::Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let status = res.status();
        if status != expected_status_code {
            return Err(APIError {
                variant: APIErrorVariant::UnexpectedStatusCode,
                status_code: Some(status),
                message: res.text().await.unwrap_or_default(),
            });
        }
        res.json().await.map_err(|e| APIError {
            variant: APIErrorVariant::MalformedResponse,
            status_code: Some(status),
            message: e.to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .client
            .get(self.get_client_url(path))
            .send()
            .await
            .map_err(Self::network_error)?;
        Self::handle_api_response(res, expected_status_code).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .client
            .delete(self.get_client_url(path))
            .send()
            .await
            .map_err(Self::network_error)?;
        Self::handle_api_response(res, expected_status_code).await
    }

    pub async fn put<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .client
            .put(self.get_client_url(path))
            .json(&body)
            .send()
            .await
            .map_err(Self::network_error)?;
        Self::handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .client
            .post(self.get_client_url(path))
            .json(&body)
            .send()
            .await
            .map_err(Self::network_error)?;
        Self::handle_api_response(res, expected_status_code).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        form: multipart::Form,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .client
            .post(self.get_client_url(path))
            .multipart(form)
            .send()
            .await
            .map_err(Self::network_error)?;
        Self::handle_api_response(res, expected_status_code).await
    }
}
