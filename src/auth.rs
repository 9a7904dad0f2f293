//! Sign-in for saving recipes and planning meals.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::SupabaseConfig;
use crate::error::RecipeError;
use crate::providers::http_client;

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub access_token: String,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Check credentials and remember the user as signed in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, RecipeError>;

    /// Register a new account. The user still has to sign in afterwards.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), RecipeError>;

    async fn sign_out(&self) -> Result<(), RecipeError>;

    fn current_user(&self) -> Option<AuthUser>;
}

fn check_credentials(email: &str, password: &str) -> Result<(), RecipeError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(RecipeError::InvalidInput(
            "Please enter both email and password".to_string(),
        ));
    }
    Ok(())
}

fn poisoned<T>(_: T) -> RecipeError {
    RecipeError::AuthError("auth state lock poisoned".to_string())
}

/// Supabase (GoTrue) email and password auth
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: String,
    user: RwLock<Option<AuthUser>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: GoTrueUser,
}

#[derive(Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl SupabaseAuth {
    pub fn new(config: &SupabaseConfig, timeout_secs: u64) -> Result<Self, RecipeError> {
        let anon_key = config
            .anon_key
            .clone()
            .or_else(|| std::env::var("SUPABASE_ANON_KEY").ok())
            .ok_or_else(|| {
                RecipeError::AuthError("Supabase anon key not found in config or environment".into())
            })?;

        Ok(SupabaseAuth {
            client: http_client(timeout_secs)?,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key,
            user: RwLock::new(None),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(anon_key: String, base_url: String) -> Self {
        SupabaseAuth {
            client: Client::new(),
            base_url,
            anon_key,
            user: RwLock::new(None),
        }
    }

    async fn post(&self, path: &str, email: &str, password: &str) -> Result<reqwest::Response, RecipeError> {
        let response = self
            .client
            .post(format!("{}/auth/v1/{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .json(&json!({"email": email, "password": password}))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = ["error_description", "msg", "message"]
            .iter()
            .find_map(|key| body[*key].as_str())
            .unwrap_or("request rejected");
        Err(RecipeError::AuthError(format!("{} ({})", message, status)))
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, RecipeError> {
        check_credentials(email, password)?;
        let token: TokenResponse = self
            .post("token?grant_type=password", email, password)
            .await?
            .json()
            .await?;

        let user = AuthUser {
            id: token.user.id,
            email: token.user.email.unwrap_or_else(|| email.to_string()),
            access_token: token.access_token,
        };
        info!("Signed in as {}", user.email);
        *self.user.write().map_err(poisoned)? = Some(user.clone());
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), RecipeError> {
        check_credentials(email, password)?;
        self.post("signup", email, password).await?;
        info!("Created account for {}", email);
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), RecipeError> {
        *self.user.write().map_err(poisoned)? = None;
        debug!("Signed out");
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.user.read().ok().and_then(|user| user.clone())
    }
}

/// In-process accounts for tests and offline use
#[derive(Debug, Default)]
pub struct MemoryAuth {
    // email -> (id, password)
    accounts: RwLock<HashMap<String, (String, String)>>,
    user: RwLock<Option<AuthUser>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account up front.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        if let Ok(mut accounts) = self.accounts.write() {
            let id = format!("user-{}", accounts.len() + 1);
            accounts.insert(email.to_string(), (id, password.to_string()));
        }
        self
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, RecipeError> {
        check_credentials(email, password)?;
        let id = {
            let accounts = self.accounts.read().map_err(poisoned)?;
            match accounts.get(email) {
                Some((id, stored)) if stored == password => id.clone(),
                _ => {
                    return Err(RecipeError::AuthError(
                        "Invalid login credentials".to_string(),
                    ))
                }
            }
        };

        let user = AuthUser {
            access_token: format!("token-{}", id),
            id,
            email: email.to_string(),
        };
        *self.user.write().map_err(poisoned)? = Some(user.clone());
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), RecipeError> {
        check_credentials(email, password)?;
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if accounts.contains_key(email) {
            return Err(RecipeError::AuthError("User already registered".to_string()));
        }
        let id = format!("user-{}", accounts.len() + 1);
        accounts.insert(email.to_string(), (id, password.to_string()));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), RecipeError> {
        *self.user.write().map_err(poisoned)? = None;
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.user.read().ok().and_then(|user| user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_memory_auth_flow() {
        let auth = MemoryAuth::new();
        assert!(auth.current_user().is_none());

        auth.sign_up("cook@example.com", "secret").await.unwrap();
        assert!(auth.sign_up("cook@example.com", "other").await.is_err());
        assert!(auth.sign_in("cook@example.com", "wrong").await.is_err());

        let user = auth.sign_in("cook@example.com", "secret").await.unwrap();
        assert_eq!(auth.current_user(), Some(user));

        auth.sign_out().await.unwrap();
        assert!(auth.current_user().is_none());
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected() {
        let auth = MemoryAuth::new().with_account("a@b.c", "pw");
        assert!(matches!(
            auth.sign_in("", "pw").await,
            Err(RecipeError::InvalidInput(_))
        ));
        assert!(matches!(
            auth.sign_in("a@b.c", "").await,
            Err(RecipeError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_supabase_sign_in() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
            .match_header("apikey", "anon")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token": "jwt", "user": {"id": "abc", "email": "cook@example.com"}}"#,
            )
            .create_async()
            .await;

        let auth = SupabaseAuth::with_base_url("anon".to_string(), server.url());
        let user = auth.sign_in("cook@example.com", "secret").await.unwrap();

        assert_eq!(user.id, "abc");
        assert_eq!(user.access_token, "jwt");
        assert_eq!(auth.current_user().map(|u| u.id), Some("abc".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_supabase_sign_in_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "invalid_grant", "error_description": "Invalid login credentials"}"#)
            .create_async()
            .await;

        let auth = SupabaseAuth::with_base_url("anon".to_string(), server.url());
        match auth.sign_in("cook@example.com", "bad").await {
            Err(RecipeError::AuthError(msg)) => assert!(msg.contains("Invalid login credentials")),
            other => panic!("expected auth error, got {:?}", other),
        }
        assert!(auth.current_user().is_none());
    }
}
