use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;

/// Server configuration, read once at startup from `BF_*` environment
/// variables (a `.env` file is honored when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub jwt_secret: String,
    pub token_lifetime_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let listen_addr =
            std::env::var("BF_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let db_path =
            std::env::var("BF_DB_PATH").unwrap_or_else(|_| "data/bullionfolio.db".to_string());

        let jwt_secret = std::env::var("BF_JWT_SECRET").unwrap_or_else(|_| {
            // Sessions will not survive a restart without a configured secret.
            tracing::warn!("BF_JWT_SECRET not set; generating an ephemeral signing key");
            let mut secret_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut secret_bytes);
            BASE64.encode(secret_bytes)
        });

        let token_lifetime_hours = std::env::var("BF_TOKEN_LIFETIME_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(24);

        Config {
            listen_addr,
            db_path,
            jwt_secret,
            token_lifetime_hours,
        }
    }
}
