use std::sync::Arc;

use auth::Algorithm;
use auth::PasswordHasher;
use auth::RevocationList;
use auth::TokenService;
use session_service::domain::credential::models::AccountStatus;
use session_service::domain::credential::models::Credential;
use session_service::domain::credential::service::CredentialVerifier;
use session_service::inbound::http::router::create_router;
use session_service::outbound::store::InMemoryUserStore;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub tokens: Arc<TokenService>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryUserStore::new());
        seed_users(&store);

        let revocations = Arc::new(RevocationList::new());
        let tokens = Arc::new(TokenService::new(
            TEST_SECRET,
            "session-service",
            chrono::Duration::minutes(30),
            revocations,
        ));
        let verifier = Arc::new(CredentialVerifier::new(store, Arc::clone(&tokens)));

        let router = create_router(verifier, Arc::clone(&tokens));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            tokens,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Log in and return the issued bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute login request");
        assert!(
            response.status().is_success(),
            "login failed with {}",
            response.status()
        );

        let body: serde_json::Value = response.json().await.expect("Failed to parse login body");
        body["data"]["token"]
            .as_str()
            .expect("login body missing token")
            .to_string()
    }
}

/// Seed one bcrypt user, one legacy SHA256 user, and one suspended user.
fn seed_users(store: &InMemoryUserStore) {
    let hasher = PasswordHasher::new();

    let pair = hasher
        .generate(Algorithm::Bcrypt, "Al1ce-pass!")
        .expect("Failed to hash seed password");
    store.insert(Credential {
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password_hash: pair.hash,
        password_salt: pair.salt,
        algorithm: Algorithm::Bcrypt,
        status: AccountStatus::Active,
        // One bare role and one already-prefixed role, to exercise the
        // exactly-once authority prefixing.
        roles: vec!["admin".to_string(), "ROLE_AUDIT".to_string()],
        clients: vec![1, 2],
    });

    let pair = hasher
        .generate(Algorithm::Sha256, "B0b-pass!!")
        .expect("Failed to hash seed password");
    store.insert(Credential {
        username: "bob".to_string(),
        email: "bob@example.com".to_string(),
        password_hash: pair.hash,
        password_salt: pair.salt,
        algorithm: Algorithm::Sha256,
        status: AccountStatus::Active,
        roles: vec!["user".to_string()],
        clients: vec![],
    });

    let pair = hasher
        .generate(Algorithm::Bcrypt, "C4rol-pass!")
        .expect("Failed to hash seed password");
    store.insert(Credential {
        username: "carol".to_string(),
        email: "carol@example.com".to_string(),
        password_hash: pair.hash,
        password_salt: pair.salt,
        algorithm: Algorithm::Bcrypt,
        status: AccountStatus::Suspended,
        roles: vec!["user".to_string()],
        clients: vec![],
    });
}
