//! Remote vault sync over a generic JSON blob store
//!
//! The remote side is any host that accepts POST-to-create (returning the
//! assigned id in the Location header), PUT-to-replace, and GET-to-fetch
//! with 404 for missing blobs. Sync is whole-snapshot in both directions
//! with last-writer-wins semantics; there is no merge, retry, or backoff.

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::models::Snapshot;
use crate::storage::{self, FileVault};

const DEFAULT_BASE_URL: &str = "https://jsonblob.com/api/jsonBlob";

/// Derive the deterministic vault key for a user email
///
/// Case- and whitespace-insensitive: "A@B.com" and " a@b.com " map to the
/// same key. The key is the first 8 bytes of the SHA-256 of the normalized
/// email, hex encoded.
pub fn vault_key(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!("kharch-user-{}", hex::encode(&digest[..8]))
}

/// HTTP client for the remote blob store
#[derive(Debug, Clone)]
pub struct SyncClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SyncClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment
    ///
    /// Optional: `KHARCH_SYNC_URL` (default: the public jsonblob API)
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("KHARCH_SYNC_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a snapshot; a missing blob is Ok(None), not an error
    pub async fn pull(&self, remote_id: &str) -> Result<Option<Snapshot>> {
        let response = self
            .http_client
            .get(format!("{}/{}", self.base_url, remote_id))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::Sync(format!(
                "Blob store error {} while pulling {}",
                response.status(),
                remote_id
            )));
        }

        Ok(Some(response.json().await?))
    }

    /// Replace the remote blob with a full snapshot
    pub async fn push(&self, remote_id: &str, snapshot: &Snapshot) -> Result<()> {
        let response = self
            .http_client
            .put(format!("{}/{}", self.base_url, remote_id))
            .json(snapshot)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Sync(format!(
                "Blob store error {} while pushing {}",
                response.status(),
                remote_id
            )));
        }
        Ok(())
    }

    /// Create a fresh remote blob, returning the store-assigned id
    ///
    /// The id comes from the last path segment of the Location header.
    pub async fn create(&self, snapshot: &Snapshot) -> Result<String> {
        let response = self
            .http_client
            .post(&self.base_url)
            .json(snapshot)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Sync(format!(
                "Blob store error {} while creating vault",
                response.status()
            )));
        }

        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Sync("Blob store did not return a Location header".into()))?;

        location
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string())
            .ok_or_else(|| Error::Sync(format!("Unparseable Location header: {}", location)))
    }
}

/// Sync adapter binding the blob client to the local vault identity
///
/// The vault stores the user email, the derived sync key, and a per-key
/// mapping to the store-assigned blob id. The deterministic key is only a
/// lookup key; the blob id always comes from the store.
#[derive(Debug, Clone)]
pub struct Syncer {
    client: SyncClient,
    vault: FileVault,
}

impl Syncer {
    pub fn new(client: SyncClient, vault: FileVault) -> Self {
        Self { client, vault }
    }

    fn mapping_key(sync_id: &str) -> String {
        format!("vault_mapping_{}", sync_id)
    }

    /// The stored user email, if logged in
    pub fn email(&self) -> Result<Option<String>> {
        self.vault.get(storage::KEY_USER_EMAIL)
    }

    /// The derived sync key, if logged in
    pub fn sync_id(&self) -> Result<Option<String>> {
        self.vault.get(storage::KEY_SYNC_ID)
    }

    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self.sync_id()?.is_some())
    }

    /// Resolve the remote blob id for the current sync identity
    ///
    /// None when not logged in or when no remote vault has been created yet.
    pub fn remote_id(&self) -> Result<Option<String>> {
        match self.sync_id()? {
            Some(sync_id) => self.vault.get(&Self::mapping_key(&sync_id)),
            None => Ok(None),
        }
    }

    /// Log in with an email and connect to its vault
    ///
    /// Derives the sync key, stores the identity, and pulls the remote
    /// snapshot. When no remote vault exists the given snapshot seeds a new
    /// one and the store-assigned id is cached; Ok(None) then tells the
    /// caller local state remains authoritative.
    pub async fn login(&self, email: &str, seed: &Snapshot) -> Result<Option<Snapshot>> {
        let sync_id = vault_key(email);
        self.vault.put(storage::KEY_USER_EMAIL, email.trim())?;
        self.vault.put(storage::KEY_SYNC_ID, &sync_id)?;

        match self.pull_snapshot().await? {
            Some(snapshot) => Ok(Some(snapshot)),
            None => {
                let remote_id = self.client.create(seed).await?;
                self.vault.put(&Self::mapping_key(&sync_id), &remote_id)?;
                tracing::info!(sync_id = %sync_id, remote_id = %remote_id, "Initialized remote vault");
                Ok(None)
            }
        }
    }

    /// Forget the sync identity
    ///
    /// The blob id mapping is kept so logging back in reconnects to the
    /// same vault without creating a new blob.
    pub fn logout(&self) -> Result<()> {
        self.vault.remove(storage::KEY_USER_EMAIL)?;
        self.vault.remove(storage::KEY_SYNC_ID)?;
        Ok(())
    }

    /// Push a full snapshot, creating the remote vault on first push
    pub async fn push_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let sync_id = self
            .sync_id()?
            .ok_or_else(|| Error::Sync("Not logged in".into()))?;

        match self.vault.get(&Self::mapping_key(&sync_id))? {
            Some(remote_id) => self.client.push(&remote_id, snapshot).await,
            None => {
                let remote_id = self.client.create(snapshot).await?;
                self.vault.put(&Self::mapping_key(&sync_id), &remote_id)?;
                Ok(())
            }
        }
    }

    /// Pull the remote snapshot; Ok(None) when no remote vault exists
    pub async fn pull_snapshot(&self) -> Result<Option<Snapshot>> {
        match self.remote_id()? {
            Some(remote_id) => self.client.pull(&remote_id).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_vault_key_deterministic() {
        assert_eq!(vault_key("me@example.com"), vault_key("me@example.com"));
    }

    #[test]
    fn test_vault_key_case_and_whitespace_insensitive() {
        let base = vault_key("me@example.com");
        assert_eq!(vault_key("ME@Example.COM"), base);
        assert_eq!(vault_key("  me@example.com  "), base);
    }

    #[test]
    fn test_vault_key_format() {
        let key = vault_key("me@example.com");
        let suffix = key.strip_prefix("kharch-user-").unwrap();
        assert_eq!(suffix.len(), 16);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_vault_key_distinct_emails_differ() {
        assert_ne!(vault_key("a@example.com"), vault_key("b@example.com"));
    }

    #[test]
    fn test_remote_id_requires_login() {
        let tmp = TempDir::new().unwrap();
        let vault = FileVault::open(tmp.path()).unwrap();
        let syncer = Syncer::new(SyncClient::new("http://localhost:1"), vault);

        assert_eq!(syncer.remote_id().unwrap(), None);
        assert!(!syncer.is_logged_in().unwrap());
    }

    #[test]
    fn test_remote_id_reads_mapping() {
        let tmp = TempDir::new().unwrap();
        let vault = FileVault::open(tmp.path()).unwrap();

        let sync_id = vault_key("me@example.com");
        vault.put(storage::KEY_SYNC_ID, &sync_id).unwrap();
        vault
            .put(&Syncer::mapping_key(&sync_id), "blob-123")
            .unwrap();

        let syncer = Syncer::new(SyncClient::new("http://localhost:1"), vault);
        assert_eq!(syncer.remote_id().unwrap(), Some("blob-123".to_string()));
    }

    #[test]
    fn test_logout_keeps_mapping() {
        let tmp = TempDir::new().unwrap();
        let vault = FileVault::open(tmp.path()).unwrap();

        let sync_id = vault_key("me@example.com");
        vault.put(storage::KEY_USER_EMAIL, "me@example.com").unwrap();
        vault.put(storage::KEY_SYNC_ID, &sync_id).unwrap();
        vault
            .put(&Syncer::mapping_key(&sync_id), "blob-123")
            .unwrap();

        let syncer = Syncer::new(SyncClient::new("http://localhost:1"), vault.clone());
        syncer.logout().unwrap();

        assert!(!syncer.is_logged_in().unwrap());
        assert_eq!(
            vault.get(&Syncer::mapping_key(&sync_id)).unwrap(),
            Some("blob-123".to_string())
        );
    }
}
