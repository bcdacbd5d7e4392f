//! HTTP transport to the AIEmail API.

use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    client::{config::Config, error::ClientError, session::SessionManager},
    model::api::ErrorDto,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Whether a request carries the session's bearer token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Auth {
    Bearer,
    Skip,
}

/// Turns a response into the expected body or a [`ClientError`]
pub fn decode_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    auth: Auth,
) -> Result<T, ClientError> {
    match status {
        200..=299 => {
            let body = if body.trim().is_empty() { "null" } else { body };
            serde_json::from_str(body)
                .map_err(|e| ClientError::Parse(format!("Failed to parse response body: {}", e)))
        }
        401 if auth == Auth::Bearer => Err(ClientError::Unauthorized),
        _ => {
            let message = match serde_json::from_str::<ErrorDto>(body) {
                Ok(error_dto) => error_dto.error,
                Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
                Err(_) => body.trim().to_string(),
            };

            Err(ClientError::Request { status, message })
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    session: Rc<SessionManager>,
}

impl ApiClient {
    pub fn new(session: Rc<SessionManager>) -> Self {
        Self { session }
    }

    pub fn config(&self) -> &Config {
        self.session.config()
    }

    pub fn session(&self) -> &Rc<SessionManager> {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> Result<T, ClientError> {
        self.send::<(), T>(Method::Get, path, None, auth).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<T, ClientError> {
        self.send(Method::Post, path, Some(body), auth).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Auth,
    ) -> Result<T, ClientError> {
        self.send::<(), T>(Method::Delete, path, None, auth).await
    }

    pub async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> Result<T, ClientError> {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        let token = match auth {
            Auth::Bearer => self.session.access_token(),
            Auth::Skip => None,
        };

        let (status, text) = self
            .fetch(method, &self.config().api_url(path), body, token)
            .await?;

        decode_response(status, &text, auth)
    }

    #[cfg(feature = "web")]
    async fn fetch(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
        token: Option<String>,
    ) -> Result<(u16, String), ClientError> {
        use reqwasm::http::{Request, RequestCredentials};

        let mut request = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Delete => Request::delete(url),
        }
        .credentials(RequestCredentials::Include);

        if let Some(token) = token {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.header("Content-Type", "application/json").body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok((status, text))
    }

    #[cfg(not(feature = "web"))]
    async fn fetch(
        &self,
        _method: Method,
        _url: &str,
        _body: Option<String>,
        _token: Option<String>,
    ) -> Result<(u16, String), ClientError> {
        Err(ClientError::Unavailable("fetch"))
    }
}
