//! Authentication service.
//!
//! [`HttpAuthApi`] is a thin wrapper over the `/auth` endpoints. [`AuthService`] combines it
//! with the [`SessionManager`] so a successful exchange always ends with tokens persisted and
//! the session signed in.

use std::rc::Rc;

use dioxus_logger::tracing;
use serde::de::IgnoredAny;

use crate::{
    client::{
        config::Config,
        error::ClientError,
        service::api::{ApiClient, Auth},
        session::SessionManager,
    },
    model::auth::{
        AuthResponse, GoogleCallbackRequest, LoginCredentials, RefreshTokenRequest,
        RefreshTokenResponse, RegisterCredentials, User,
    },
};

/// Remote authentication endpoints
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ClientError>;
    async fn register(
        &self,
        credentials: &RegisterCredentials,
    ) -> Result<AuthResponse, ClientError>;
    async fn google_callback(
        &self,
        code: &str,
        state: Option<&str>,
    ) -> Result<AuthResponse, ClientError>;
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshTokenResponse, ClientError>;
    async fn logout(&self, refresh_token: &str) -> Result<(), ClientError>;
}

/// URL that starts the Google sign-in redirect chain
pub fn google_auth_url(config: &Config, state: Option<&str>) -> String {
    let mut url = config.api_url("/auth/google/authorize");
    if let Some(state) = state {
        url.push('?');
        url.push_str(
            &url::form_urlencoded::Serializer::new(String::new())
                .append_pair("state", state)
                .finish(),
        );
    }
    url
}

#[derive(Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ClientError> {
        self.client.post("/auth/login", credentials, Auth::Skip).await
    }

    async fn register(
        &self,
        credentials: &RegisterCredentials,
    ) -> Result<AuthResponse, ClientError> {
        self.client
            .post("/auth/register", credentials, Auth::Skip)
            .await
    }

    async fn google_callback(
        &self,
        code: &str,
        state: Option<&str>,
    ) -> Result<AuthResponse, ClientError> {
        self.client
            .post(
                "/auth/google/callback",
                &GoogleCallbackRequest { code, state },
                Auth::Skip,
            )
            .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshTokenResponse, ClientError> {
        self.client
            .post("/auth/refresh", &RefreshTokenRequest { refresh_token }, Auth::Skip)
            .await
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), ClientError> {
        self.client
            .post::<_, IgnoredAny>(
                "/auth/logout",
                &RefreshTokenRequest { refresh_token },
                Auth::Skip,
            )
            .await
            .map(drop)
    }
}

pub struct AuthService<A: AuthApi> {
    api: A,
    session: Rc<SessionManager>,
}

impl<A: AuthApi> AuthService<A> {
    pub fn new(api: A, session: Rc<SessionManager>) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Rc<SessionManager> {
        &self.session
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, ClientError> {
        let response = self.api.login(credentials).await?;
        self.accept(response)
    }

    pub async fn register(&self, credentials: &RegisterCredentials) -> Result<User, ClientError> {
        let response = self.api.register(credentials).await?;
        self.accept(response)
    }

    /// Exchanges an authorization code for tokens
    pub async fn google_sign_in(
        &self,
        code: &str,
        state: Option<&str>,
    ) -> Result<User, ClientError> {
        let response = self.api.google_callback(code, state).await?;
        self.accept(response)
    }

    /// Signs in with tokens handed over directly by the OAuth redirect
    pub fn accept_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
        email: &str,
    ) -> Result<User, ClientError> {
        self.session
            .establish(access_token, refresh_token, Some(email), None)
    }

    /// Swaps the refresh token for a new access token
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let refresh_token = self
            .session
            .refresh_token()
            .ok_or(ClientError::Unauthorized)?;

        let response = self.api.refresh(&refresh_token).await?;
        self.session
            .update_tokens(&response.access_token, response.refresh_token.as_deref())
    }

    /// Ends the session locally and in every other tab
    ///
    /// The server-side revocation is best effort, a failure there never keeps the user
    /// signed in.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.session.refresh_token() {
            if let Err(e) = self.api.logout(&refresh_token).await {
                tracing::error!("Failed to revoke refresh token: {}", e);
            }
        }

        self.session.logout();
    }

    fn accept(&self, response: AuthResponse) -> Result<User, ClientError> {
        self.session.establish(
            &response.access_token,
            &response.refresh_token,
            None,
            response.user,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use aiemail_test_utils::prelude::*;
    use futures::executor::block_on;

    use super::*;
    use crate::client::session::{channel::MemoryBus, cookie::MemoryCookies};

    /// Records calls and answers with canned responses
    #[derive(Default)]
    struct FakeAuthApi {
        login: Option<Result<AuthResponse, ClientError>>,
        logout: Option<Result<(), ClientError>>,
        calls: RefCell<Vec<String>>,
    }

    impl AuthApi for FakeAuthApi {
        async fn login(&self, c: &LoginCredentials) -> Result<AuthResponse, ClientError> {
            self.calls.borrow_mut().push(format!("login {}", c.email));
            self.login.clone().unwrap()
        }

        async fn register(&self, c: &RegisterCredentials) -> Result<AuthResponse, ClientError> {
            self.calls.borrow_mut().push(format!("register {}", c.email));
            self.login.clone().unwrap()
        }

        async fn google_callback(
            &self,
            code: &str,
            _state: Option<&str>,
        ) -> Result<AuthResponse, ClientError> {
            self.calls.borrow_mut().push(format!("google {}", code));
            self.login.clone().unwrap()
        }

        async fn refresh(&self, token: &str) -> Result<RefreshTokenResponse, ClientError> {
            self.calls.borrow_mut().push(format!("refresh {}", token));
            Ok(RefreshTokenResponse {
                access_token: "renewed".to_string(),
                refresh_token: None,
            })
        }

        async fn logout(&self, token: &str) -> Result<(), ClientError> {
            self.calls.borrow_mut().push(format!("logout {}", token));
            self.logout.clone().unwrap_or(Ok(()))
        }
    }

    fn session() -> Rc<SessionManager> {
        SessionManager::new(MemoryCookies::new(), MemoryBus::new().tab(), Config::default())
    }

    fn credentials() -> LoginCredentials {
        LoginCredentials {
            email: TEST_EMAIL.to_string(),
            password: TEST_PASSWORD.to_string(),
        }
    }

    fn issued() -> AuthResponse {
        AuthResponse {
            access_token: factory::access_token(TEST_USER_ID, TEST_EMAIL),
            refresh_token: TEST_REFRESH_TOKEN.to_string(),
            user: None,
        }
    }

    mod login {
        use super::*;

        #[test]
        fn success_persists_tokens() {
            let api = FakeAuthApi {
                login: Some(Ok(issued())),
                ..Default::default()
            };
            let service = AuthService::new(api, session());

            let user = block_on(service.login(&credentials())).unwrap();

            assert_eq!(user.email, TEST_EMAIL);
            assert!(service.session().is_authenticated());
            assert_eq!(
                service.session().refresh_token(),
                Some(TEST_REFRESH_TOKEN.to_string())
            );
        }

        #[test]
        fn user_from_response_is_preferred() {
            let mut response = issued();
            response.user = Some(User {
                id: "server-id".to_string(),
                email: "server@example.com".to_string(),
                name: "Server Name".to_string(),
                provider: Default::default(),
            });
            let api = FakeAuthApi {
                login: Some(Ok(response)),
                ..Default::default()
            };
            let service = AuthService::new(api, session());

            let user = block_on(service.login(&credentials())).unwrap();

            assert_eq!(user.name, "Server Name");
        }

        #[test]
        fn failure_leaves_session_signed_out() {
            let api = FakeAuthApi {
                login: Some(Err(ClientError::Request {
                    status: 401,
                    message: "Invalid email or password".to_string(),
                })),
                ..Default::default()
            };
            let service = AuthService::new(api, session());

            let err = block_on(service.login(&credentials())).unwrap_err();

            assert_eq!(err.user_message(), "Invalid email or password");
            assert!(!service.session().is_authenticated());
            assert_eq!(service.session().access_token(), None);
        }
    }

    mod logout {
        use super::*;

        #[test]
        fn revokes_then_clears() {
            let api = FakeAuthApi {
                login: Some(Ok(issued())),
                ..Default::default()
            };
            let service = AuthService::new(api, session());
            block_on(service.login(&credentials())).unwrap();

            block_on(service.logout());

            assert!(!service.session().is_authenticated());
            assert_eq!(service.session().refresh_token(), None);
            assert_eq!(
                service.api.calls.borrow().last().unwrap(),
                &format!("logout {}", TEST_REFRESH_TOKEN)
            );
        }

        #[test]
        fn server_failure_still_signs_out() {
            let api = FakeAuthApi {
                login: Some(Ok(issued())),
                logout: Some(Err(ClientError::Network("offline".to_string()))),
                ..Default::default()
            };
            let service = AuthService::new(api, session());
            block_on(service.login(&credentials())).unwrap();

            block_on(service.logout());

            assert!(!service.session().is_authenticated());
        }
    }

    mod refresh {
        use super::*;

        #[test]
        fn stores_new_access_token() {
            let api = FakeAuthApi {
                login: Some(Ok(issued())),
                ..Default::default()
            };
            let service = AuthService::new(api, session());
            block_on(service.login(&credentials())).unwrap();

            block_on(service.refresh()).unwrap();

            assert_eq!(service.session().access_token(), Some("renewed".to_string()));
            assert_eq!(
                service.session().refresh_token(),
                Some(TEST_REFRESH_TOKEN.to_string())
            );
        }

        #[test]
        fn without_refresh_token_is_unauthorized() {
            let service = AuthService::new(FakeAuthApi::default(), session());

            assert_eq!(
                block_on(service.refresh()).unwrap_err(),
                ClientError::Unauthorized
            );
        }
    }

    #[test]
    fn google_code_exchange_signs_in() {
        let api = FakeAuthApi {
            login: Some(Ok(issued())),
            ..Default::default()
        };
        let service = AuthService::new(api, session());

        block_on(service.google_sign_in("auth-code", Some("xyz"))).unwrap();

        assert!(service.session().is_authenticated());
        assert_eq!(service.api.calls.borrow()[0], "google auth-code");
    }

    #[test]
    fn google_auth_url_appends_state() {
        let config = Config::default();

        assert_eq!(
            google_auth_url(&config, None),
            "http://localhost:8080/auth/google/authorize"
        );
        assert_eq!(
            google_auth_url(&config, Some("a b")),
            "http://localhost:8080/auth/google/authorize?state=a+b"
        );
    }
}
