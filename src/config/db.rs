// src/config/db.rs
// DOCUMENTATION: Database target selection and process-wide connection pool
// PURPOSE: Resolve managed-proxy vs local credentials and memoize one MySQL pool

use crate::db::rows::{bind_json, row_to_map};
use serde_json::{Map, Value};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlSslMode};
use std::env;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use thiserror::Error;

/// Host used when MYSQL_HOST is not set
pub const DEFAULT_HOST: &str = "localhost";

/// MySQL port used when no port is configured
pub const DEFAULT_PORT: u16 = 3306;

/// Pool size for both managed and local connections
pub const MAX_CONNECTIONS: u32 = 10;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const NO_WAIT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(1);

// Managed proxy binding, injected by the hosting platform
const PROXY_HOST: &str = "DB_PROXY_HOST";
const PROXY_PORT: &str = "DB_PROXY_PORT";
const PROXY_USER: &str = "DB_PROXY_USER";
const PROXY_PASSWORD: &str = "DB_PROXY_PASSWORD";
const PROXY_DATABASE: &str = "DB_PROXY_DATABASE";

/// Reading the managed binding failed; the provider falls back to local credentials
#[derive(Error, Debug, Clone)]
pub enum ProbeError {
    #[error("binding variable {0} is not valid unicode")]
    Unreadable(&'static str),
}

/// Failures that stop the provider from producing a pool
#[derive(Error, Debug)]
pub enum DbConfigError {
    #[error("managed database binding is malformed: {field} {reason}")]
    MalformedBinding { field: &'static str, reason: String },
}

/// TLS requirement for the database connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Driver default: use TLS when the server offers it
    Preferred,
    /// TLS required, certificate not verified (managed proxy requirement)
    RequiredUnverified,
}

impl TlsMode {
    fn ssl_mode(self) -> MySqlSslMode {
        match self {
            TlsMode::Preferred => MySqlSslMode::Preferred,
            // sqlx `Required` encrypts without verifying the CA
            TlsMode::RequiredUnverified => MySqlSslMode::Required,
        }
    }
}

/// Normalized pool configuration, shared by both resolution modes
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub tls_mode: TlsMode,
    pub max_connections: u32,
    /// Waiters allowed in the checkout queue; 0 means unbounded
    pub queue_limit: u32,
    pub wait_for_connections: bool,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("tls_mode", &self.tls_mode)
            .field("max_connections", &self.max_connections)
            .field("queue_limit", &self.queue_limit)
            .field("wait_for_connections", &self.wait_for_connections)
            .finish()
    }
}

impl ConnectionConfig {
    fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .ssl_mode(self.tls_mode.ssl_mode());

        if self.database.is_empty() {
            options
        } else {
            options.database(&self.database)
        }
    }

    fn acquire_timeout(&self) -> Duration {
        if self.wait_for_connections {
            ACQUIRE_TIMEOUT
        } else {
            NO_WAIT_ACQUIRE_TIMEOUT
        }
    }
}

/// Raw managed-proxy binding as exposed by the platform
/// Every field is optional here; validation happens in `into_config`
#[derive(Debug, Clone, Default)]
pub struct ManagedBinding {
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl ManagedBinding {
    fn is_empty(&self) -> bool {
        self.host.is_none()
            && self.port.is_none()
            && self.user.is_none()
            && self.password.is_none()
            && self.database.is_none()
    }

    /// Build the managed-proxy configuration
    /// A binding that is present but incomplete is rejected instead of silently ignored
    pub fn into_config(self) -> Result<ConnectionConfig, DbConfigError> {
        let port = match self.port {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| DbConfigError::MalformedBinding {
                    field: "port",
                    reason: format!("'{}' is not a valid port", raw),
                })?,
        };

        Ok(ConnectionConfig {
            host: required(self.host, "host")?,
            port,
            user: required(self.user, "user")?,
            password: required(self.password, "password")?,
            database: required(self.database, "database")?,
            tls_mode: TlsMode::RequiredUnverified,
            max_connections: MAX_CONNECTIONS,
            queue_limit: 0,
            wait_for_connections: true,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, DbConfigError> {
    value.ok_or(DbConfigError::MalformedBinding {
        field,
        reason: "is missing".to_string(),
    })
}

/// Source of ambient connection settings
pub trait EnvironmentSource: Send + Sync {
    /// Probe for a managed-proxy binding
    fn managed_binding(&self) -> Result<Option<ManagedBinding>, ProbeError>;

    /// Read a local configuration variable
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the managed binding and local credentials from process environment variables
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    fn binding_var(key: &'static str) -> Result<Option<String>, ProbeError> {
        match env::var(key) {
            Ok(value) if !value.is_empty() => Ok(Some(value)),
            Ok(_) | Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ProbeError::Unreadable(key)),
        }
    }
}

impl EnvironmentSource for ProcessEnvironment {
    fn managed_binding(&self) -> Result<Option<ManagedBinding>, ProbeError> {
        let binding = ManagedBinding {
            host: Self::binding_var(PROXY_HOST)?,
            port: Self::binding_var(PROXY_PORT)?,
            user: Self::binding_var(PROXY_USER)?,
            password: Self::binding_var(PROXY_PASSWORD)?,
            database: Self::binding_var(PROXY_DATABASE)?,
        };

        Ok((!binding.is_empty()).then_some(binding))
    }

    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// Outcome of environment resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedConfig {
    Managed(ConnectionConfig),
    Local(ConnectionConfig),
}

impl ResolvedConfig {
    pub fn mode(&self) -> &'static str {
        match self {
            ResolvedConfig::Managed(_) => "managed proxy",
            ResolvedConfig::Local(_) => "local",
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        match self {
            ResolvedConfig::Managed(config) | ResolvedConfig::Local(config) => config,
        }
    }

    pub fn into_config(self) -> ConnectionConfig {
        match self {
            ResolvedConfig::Managed(config) | ResolvedConfig::Local(config) => config,
        }
    }
}

/// Shared MySQL pool handle
/// DOCUMENTATION: Clones share the same underlying pool; nothing outside the
/// provider creates one. The driver pool is only reachable inside the crate
/// through `inner`, and callers must never close it.
#[derive(Debug, Clone)]
pub struct ConnectionPool {
    config: Arc<ConnectionConfig>,
    pool: MySqlPool,
}

impl ConnectionPool {
    /// Build the pool without opening a connection
    /// Connections are established on first use, so construction cannot fail
    fn connect_lazy(config: ConnectionConfig) -> Self {
        if config.queue_limit != 0 {
            log::warn!(
                "queue_limit {} ignored: checkout waiters are bounded by the acquire timeout",
                config.queue_limit
            );
        }

        let pool = MySqlPoolOptions::new()
            // Maximum concurrent connections
            .max_connections(config.max_connections)
            // Timeout waiting for connection from pool
            .acquire_timeout(config.acquire_timeout())
            // Connection idle timeout (5 minutes)
            .idle_timeout(Duration::from_secs(300))
            // Connection lifetime (30 minutes before recycle)
            .max_lifetime(Duration::from_secs(1800))
            .connect_lazy_with(config.connect_options());

        log::info!(
            "Database pool created for {}:{} (max {} connections)",
            config.host,
            config.port,
            config.max_connections
        );

        ConnectionPool {
            config: Arc::new(config),
            pool,
        }
    }

    /// Configuration the pool was built from
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Driver pool for typed repository queries
    pub(crate) fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    /// Execute a parameterized statement
    /// DOCUMENTATION: Returns each row as a column-name -> JSON value map, in
    /// column order. Statements without a result set return an empty vec.
    pub async fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<Map<String, Value>>, sqlx::Error> {
        let query = params
            .iter()
            .fold(sqlx::query(sql), |query, param| bind_json(query, param));

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_map).collect())
    }
}

/// Resolves connection settings and owns the single pool built from them
pub struct ConnectionProvider<E> {
    env: E,
    slot: OnceLock<ConnectionPool>,
}

impl<E: EnvironmentSource> ConnectionProvider<E> {
    pub fn new(env: E) -> Self {
        ConnectionProvider {
            env,
            slot: OnceLock::new(),
        }
    }

    /// Decide between managed-proxy and local credentials
    /// DOCUMENTATION: A failed probe means "not managed" and is never surfaced.
    /// A binding that exists but is incomplete is an error.
    pub fn resolve(&self) -> Result<ResolvedConfig, DbConfigError> {
        match self.env.managed_binding() {
            Ok(Some(binding)) => return binding.into_config().map(ResolvedConfig::Managed),
            Ok(None) => {}
            Err(e) => log::debug!("Managed database binding unavailable: {}", e),
        }

        Ok(ResolvedConfig::Local(self.direct_config()))
    }

    fn direct_config(&self) -> ConnectionConfig {
        let var = |key: &str| self.env.var(key).filter(|value| !value.is_empty());

        ConnectionConfig {
            host: var("MYSQL_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: var("MYSQL_PORT")
                .and_then(|port| port.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            user: var("MYSQL_USER").unwrap_or_default(),
            password: var("MYSQL_PASSWORD").unwrap_or_default(),
            database: var("MYSQL_DATABASE").unwrap_or_default(),
            tls_mode: TlsMode::Preferred,
            max_connections: MAX_CONNECTIONS,
            queue_limit: 0,
            wait_for_connections: true,
        }
    }

    /// Return the shared pool, creating it on first call
    /// DOCUMENTATION: Resolution runs on every call; once a pool exists the fresh
    /// result is discarded, so later environment changes are not picked up.
    /// A malformed binding only fails the call that would build the pool.
    pub fn acquire(&self) -> Result<&ConnectionPool, DbConfigError> {
        let resolved = self.resolve();
        if let Ok(resolved) = &resolved {
            log::info!(
                "Using {} database connection ({}:{})",
                resolved.mode(),
                resolved.config().host,
                resolved.config().port
            );
        }

        match (self.slot.get(), resolved) {
            (Some(pool), Ok(_)) => Ok(pool),
            (Some(pool), Err(e)) => {
                log::warn!("Ignoring database environment change, keeping existing pool: {}", e);
                Ok(pool)
            }
            (None, Ok(resolved)) => Ok(self
                .slot
                .get_or_init(|| ConnectionPool::connect_lazy(resolved.into_config()))),
            (None, Err(e)) => Err(e),
        }
    }
}

static PROVIDER: OnceLock<ConnectionProvider<ProcessEnvironment>> = OnceLock::new();

/// Process-wide pool backed by the process environment
/// Called by main at startup; every handler shares the returned pool
pub fn acquire_pool() -> Result<&'static ConnectionPool, DbConfigError> {
    PROVIDER
        .get_or_init(|| ConnectionProvider::new(ProcessEnvironment))
        .acquire()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    /// In-memory environment with a switchable managed binding
    #[derive(Default)]
    struct FixedEnvironment {
        vars: HashMap<String, String>,
        binding: Mutex<Option<Result<ManagedBinding, ProbeError>>>,
        probes: AtomicUsize,
    }

    impl FixedEnvironment {
        fn with_vars(vars: &[(&str, &str)]) -> Self {
            FixedEnvironment {
                vars: vars
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                ..Default::default()
            }
        }

        fn set_binding(&self, binding: Result<ManagedBinding, ProbeError>) {
            *self.binding.lock().unwrap() = Some(binding);
        }

        fn probe_count(&self) -> usize {
            self.probes.load(Ordering::SeqCst)
        }
    }

    impl EnvironmentSource for FixedEnvironment {
        fn managed_binding(&self) -> Result<Option<ManagedBinding>, ProbeError> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            self.binding.lock().unwrap().clone().transpose()
        }

        fn var(&self, key: &str) -> Option<String> {
            self.vars.get(key).cloned()
        }
    }

    fn proxy_binding() -> ManagedBinding {
        ManagedBinding {
            host: Some("proxy.internal".to_string()),
            port: Some("5432".to_string()),
            user: Some("u".to_string()),
            password: Some("p".to_string()),
            database: Some("school".to_string()),
        }
    }

    #[test]
    fn test_defaults_without_any_environment() {
        let provider = ConnectionProvider::new(FixedEnvironment::default());
        let resolved = assert_ok!(provider.resolve());

        assert_eq!(resolved.mode(), "local");
        let config = resolved.config();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 3306);
        assert_eq!(config.user, "");
        assert_eq!(config.password, "");
        assert_eq!(config.database, "");
        assert_eq!(config.tls_mode, TlsMode::Preferred);
    }

    #[test]
    fn test_missing_variables_default_individually() {
        let env = FixedEnvironment::with_vars(&[
            ("MYSQL_USER", "reader"),
            ("MYSQL_PORT", "not-a-port"),
            ("MYSQL_HOST", ""),
        ]);
        let provider = ConnectionProvider::new(env);
        let resolved = assert_ok!(provider.resolve());
        let config = resolved.config();

        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.user, "reader");
        assert_eq!(config.database, "");
    }

    #[test]
    fn test_managed_binding_takes_precedence() {
        let env = FixedEnvironment::with_vars(&[
            ("MYSQL_HOST", "db.example.com"),
            ("MYSQL_USER", "admin"),
        ]);
        env.set_binding(Ok(proxy_binding()));
        let provider = ConnectionProvider::new(env);

        let resolved = assert_ok!(provider.resolve());
        assert_eq!(resolved.mode(), "managed proxy");
        assert_eq!(resolved.config().host, "proxy.internal");
        assert_eq!(resolved.config().tls_mode, TlsMode::RequiredUnverified);
    }

    #[test]
    fn test_managed_binding_without_port_uses_default() {
        let binding = ManagedBinding {
            port: None,
            ..proxy_binding()
        };
        let config = assert_ok!(binding.into_config());
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_malformed_binding_is_an_error() {
        let env = FixedEnvironment::default();
        env.set_binding(Ok(ManagedBinding {
            password: None,
            ..proxy_binding()
        }));
        let provider = ConnectionProvider::new(env);

        match assert_err!(provider.acquire()) {
            DbConfigError::MalformedBinding { field, .. } => assert_eq!(field, "password"),
        }
        assert!(provider.slot.get().is_none());
    }

    #[test]
    fn test_unparseable_binding_port_is_an_error() {
        let binding = ManagedBinding {
            port: Some("54x".to_string()),
            ..proxy_binding()
        };
        let err = assert_err!(binding.into_config());
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_password_is_redacted_in_debug_output() {
        let config = assert_ok!(proxy_binding().into_config());
        let printed = format!("{:?}", config);
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("password: \"p\""));
    }

    #[tokio::test]
    async fn test_local_credentials_pool() {
        let env = FixedEnvironment::with_vars(&[
            ("MYSQL_HOST", "db.example.com"),
            ("MYSQL_USER", "admin"),
            ("MYSQL_PASSWORD", "secret"),
            ("MYSQL_DATABASE", "school"),
        ]);
        let provider = ConnectionProvider::new(env);
        let pool = assert_ok!(provider.acquire());
        let config = pool.config();

        assert_eq!(config.host, "db.example.com");
        assert_eq!(config.user, "admin");
        assert_eq!(config.password, "secret");
        assert_eq!(config.database, "school");
        assert_eq!(config.port, 3306);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.queue_limit, 0);
        assert!(config.wait_for_connections);
    }

    #[tokio::test]
    async fn test_managed_proxy_pool() {
        let env = FixedEnvironment::default();
        env.set_binding(Ok(proxy_binding()));
        let provider = ConnectionProvider::new(env);
        let pool = assert_ok!(provider.acquire());

        assert_eq!(pool.config().port, 5432);
        assert_eq!(pool.config().tls_mode, TlsMode::RequiredUnverified);
        assert_eq!(pool.config().database, "school");
    }

    #[tokio::test]
    async fn test_probe_failure_falls_back_to_local() {
        let env = FixedEnvironment::with_vars(&[("MYSQL_HOST", "db.example.com")]);
        env.set_binding(Err(ProbeError::Unreadable("DB_PROXY_HOST")));
        let provider = ConnectionProvider::new(env);

        let pool = assert_ok!(provider.acquire());
        assert_eq!(pool.config().host, "db.example.com");
        assert_eq!(pool.config().tls_mode, TlsMode::Preferred);
    }

    #[tokio::test]
    async fn test_repeated_acquire_returns_same_pool() {
        let provider = ConnectionProvider::new(FixedEnvironment::default());
        let first = assert_ok!(provider.acquire());

        for _ in 0..5 {
            let next = assert_ok!(provider.acquire());
            assert!(std::ptr::eq(first, next));
        }
    }

    #[tokio::test]
    async fn test_resolution_reruns_but_pool_is_kept() {
        let provider = ConnectionProvider::new(FixedEnvironment::default());
        assert_ok!(provider.acquire());
        assert_eq!(provider.env.probe_count(), 1);

        // Binding shows up after the first local resolution
        provider.env.set_binding(Ok(proxy_binding()));
        let pool = assert_ok!(provider.acquire());

        assert_eq!(provider.env.probe_count(), 2);
        assert_eq!(pool.config().host, DEFAULT_HOST);
        assert_eq!(pool.config().tls_mode, TlsMode::Preferred);
    }

    #[tokio::test]
    async fn test_malformed_binding_after_pool_exists_keeps_pool() {
        let provider = ConnectionProvider::new(FixedEnvironment::default());
        let first = assert_ok!(provider.acquire());

        provider.env.set_binding(Ok(ManagedBinding {
            password: None,
            ..proxy_binding()
        }));
        let next = assert_ok!(provider.acquire());

        assert!(std::ptr::eq(first, next));
        assert_eq!(next.config().host, DEFAULT_HOST);
        assert_eq!(provider.env.probe_count(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_config_and_stay_open() {
        let provider = ConnectionProvider::new(FixedEnvironment::default());
        let pool = assert_ok!(provider.acquire());
        let handle = pool.clone();

        assert!(Arc::ptr_eq(&pool.config, &handle.config));
        assert!(!handle.inner().is_closed());
        assert!(!assert_ok!(provider.acquire()).inner().is_closed());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_calls_share_one_pool() {
        let provider = Arc::new(ConnectionProvider::new(FixedEnvironment::default()));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let provider = provider.clone();
                tokio::spawn(async move {
                    let pool = provider.acquire().expect("pool");
                    pool as *const ConnectionPool as usize
                })
            })
            .collect();

        let mut addresses = Vec::new();
        for handle in handles {
            addresses.push(handle.await.unwrap());
        }

        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(provider.env.probe_count(), 16);
    }
}
