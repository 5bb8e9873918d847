use anyhow::{Context, Result};
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Database connection settings.
///
/// `url` wins when present; otherwise the URL is composed from
/// `protocol`, `host`, optional credentials and `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            protocol: default_protocol(),
            host: String::new(),
            username: None,
            password: None,
            name: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: true,
        }
    }
}

/// Which route groups get mounted on the router.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_true")]
    pub health: bool,
    #[serde(default = "default_true")]
    pub items: bool,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self { health: true, items: true }
    }
}

fn default_protocol() -> String { "postgres".into() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Read and parse `path`; an absent file yields `None`, read and parse
/// errors are returned with the path attached.
pub fn load_optional_file(path: &str) -> Result<Option<AppConfig>> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).map(Some).with_context(|| format!("解析配置文件失败: {path}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("读取配置文件失败: {path}")),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to environment
    /// variables only when the file does not exist; then normalize and validate.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&config_path())
    }

    pub fn load_from_path(path: &str) -> Result<Self> {
        let mut cfg = match load_optional_file(path)? {
            Some(cfg) => cfg,
            None => Self::from_env(),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut server = ServerConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            server.worker_threads = Some(w);
        }
        let mut routes = RoutesConfig::default();
        if let Some(b) = env_flag("ROUTES_HEALTH") { routes.health = b; }
        if let Some(b) = env_flag("ROUTES_ITEMS") { routes.items = b; }
        Self { server, database: DatabaseConfig::default(), routes }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        // 归一化 database（支持从环境变量填充 URL）
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

fn env_flag(key: &str) -> Option<bool> {
    match std::env::var(key).ok()?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// A config pointing at an in-memory store, mostly for tests and local runs.
    pub fn memory() -> Self {
        Self { url: "memory://".into(), ..Self::default() }
    }

    pub fn normalize_from_env(&mut self) {
        if !self.url.trim().is_empty() {
            return;
        }
        // 若 TOML 中未提供 URL，则尝试从环境变量填充
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.url = url;
            return;
        }
        self.fill_parts_from_env();
        if let Some(url) = self.compose_url() {
            self.url = url;
        }
    }

    fn fill_parts_from_env(&mut self) {
        if let Ok(v) = std::env::var("DB_PROTOCOL") { self.protocol = v; }
        if let Ok(v) = std::env::var("DB_HOST") { self.host = v; }
        if let Ok(v) = std::env::var("DB_USERNAME") { self.username = Some(v); }
        if let Ok(v) = std::env::var("DB_PASSWORD") { self.password = Some(v); }
        if let Ok(v) = std::env::var("DB_NAME") { self.name = v; }
    }

    /// Build `protocol://[user:pass@]host/name` from the individual parts.
    /// Credentials are only included when both are non-empty.
    pub fn compose_url(&self) -> Option<String> {
        if self.host.trim().is_empty() {
            return None;
        }
        let credentials = match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => format!("{u}:{p}@"),
            _ => String::new(),
        };
        Some(format!("{}://{}{}/{}", self.protocol, credentials, self.host, self.name))
    }

    pub fn is_memory(&self) -> bool {
        self.url.trim().to_lowercase().starts_with("memory://")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url 为空；请在 config.toml 或环境变量 DATABASE_URL 中提供"));
        }
        let lower = self.url.to_lowercase();
        let supported = lower.starts_with("postgresql://")
            || lower.starts_with("postgres://")
            || lower.starts_with("sqlite:")
            || lower.starts_with("memory://");
        if !supported {
            return Err(anyhow!("database.url 必须以 postgres://、sqlite: 或 memory:// 开头"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections 必须 >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections 必须 >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database 超时配置必须为正整数秒"));
        }
        Ok(())
    }
}
