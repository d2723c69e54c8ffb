use clap::Parser;
use std::env;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Undefined storage class '{0}' (expected local or remote)")]
    UnknownBackend(String),

    #[error("Remote storage requires a target bucket (S3_BUCKET or --bucket)")]
    MissingBucket,

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_payload_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Local,
    Remote,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Local => write!(f, "local"),
            StorageKind::Remote => write!(f, "remote"),
        }
    }
}

impl std::str::FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(StorageKind::Local),
            "remote" | "s3" => Ok(StorageKind::Remote),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub kind: StorageKind,
    pub data_dir: PathBuf,
    pub s3: S3Config,
}

#[derive(Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub path_style: bool,
    /// Redirect to the plain object URL instead of a presigned one
    pub public_urls: bool,
    pub presign_expiry_secs: u32,
}

// Keeps credentials out of startup logs
impl std::fmt::Debug for S3Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Config")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "<redacted>"))
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "<redacted>"))
            .field("path_style", &self.path_style)
            .field("public_urls", &self.public_urls)
            .field("presign_expiry_secs", &self.presign_expiry_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Directory holding `index.html` and the static assets under `/c/`
    pub dir: PathBuf,
}

/// Command-line flags. Each one overrides its environment variable.
#[derive(Debug, Default, Parser)]
#[command(name = "blobgate", version, about = "Object storage gateway")]
pub struct Cli {
    /// Server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Data storage backend (local, remote)
    #[arg(long)]
    pub storage: Option<String>,

    /// Target S3 bucket
    #[arg(long)]
    pub bucket: Option<String>,

    /// Root directory for the local backend
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory with the user interface files
    #[arg(long)]
    pub ui_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env(cli: &Cli) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok(), cli)
    }

    /// Build configuration from any variable source. A command-line flag
    /// replaces its variable before anything is parsed or validated.
    pub fn from_lookup<F>(lookup: F, cli: &Cli) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let port = match cli.port {
            Some(port) => port,
            None => parse_var("PORT", &var("PORT", "8080"))?,
        };
        let backend = match &cli.storage {
            Some(storage) => storage.clone(),
            None => var("STORAGE_BACKEND", "local"),
        };

        let config = Self {
            server: ServerConfig {
                host: cli.host.clone().unwrap_or_else(|| var("HOST", "0.0.0.0")),
                port,
                max_payload_bytes: parse_var("MAX_PAYLOAD_BYTES", &var("MAX_PAYLOAD_BYTES", "10485760"))?,
            },
            storage: StorageConfig {
                kind: backend.parse()?,
                data_dir: cli
                    .data_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(var("DATA_DIR", "data"))),
                s3: S3Config {
                    bucket: cli.bucket.clone().unwrap_or_else(|| var("S3_BUCKET", "")),
                    region: var("S3_REGION", "us-east-1"),
                    endpoint: lookup("S3_ENDPOINT").filter(|s| !s.is_empty()),
                    access_key_id: lookup("AWS_ACCESS_KEY_ID").filter(|s| !s.is_empty()),
                    secret_access_key: lookup("AWS_SECRET_ACCESS_KEY").filter(|s| !s.is_empty()),
                    path_style: parse_var("S3_PATH_STYLE", &var("S3_PATH_STYLE", "false"))?,
                    public_urls: parse_var("S3_PUBLIC_URLS", &var("S3_PUBLIC_URLS", "false"))?,
                    presign_expiry_secs: parse_var(
                        "S3_PRESIGN_EXPIRY_SECS",
                        &var("S3_PRESIGN_EXPIRY_SECS", "3600"),
                    )?,
                },
            },
            ui: UiConfig {
                dir: cli
                    .ui_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(var("UI_DIR", "client"))),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.kind == StorageKind::Remote && self.storage.s3.bucket.is_empty() {
            return Err(ConfigError::MissingBucket);
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}
