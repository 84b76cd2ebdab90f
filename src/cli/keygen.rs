//! Keygen command - provision the persisted signing key pair
//!
//! Key generation is a one-time cost. Running this ahead of `serve` lets a
//! shared volume be populated before the first instance takes traffic, so
//! no instance pays the generation cost (or races a sibling) at startup.

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::auth::KeyPair;
use crate::infrastructure::logging;

/// Generate or load the key pair at the configured paths
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let keys = KeyPair::obtain(&config.auth.private_key_file, &config.auth.public_key_file)?;

    info!(
        private_key_file = %config.auth.private_key_file.display(),
        public_key_file = %config.auth.public_key_file.display(),
        "Key pair ready"
    );

    // the public half is shareable with services that verify our tokens
    println!("{}", keys.public_pem());

    Ok(())
}
