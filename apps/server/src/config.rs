/// Runtime configuration, read once at startup.
///
/// Every knob is an environment variable with a `KF_` prefix; a `.env` file
/// in the working directory is honored for local development.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub listen_addr: String,
    /// Path of the SQLite database file.
    pub db_path: String,
    /// Origins allowed by CORS. Empty means no CORS headers are sent.
    pub cors_allow_origins: Vec<String>,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let listen_addr =
            std::env::var("KF_LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:8425".to_string());
        let db_path = std::env::var("KF_DB_PATH").unwrap_or_else(|_| "kasfolio.db".to_string());
        let cors_allow_origins = std::env::var("KF_CORS_ALLOW_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let request_timeout_ms = std::env::var("KF_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(30_000);

        Self {
            listen_addr,
            db_path,
            cors_allow_origins,
            request_timeout_ms,
        }
    }
}
