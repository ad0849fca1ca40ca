/// Factory: build `AuthGate` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthGate;

pub fn build_auth_gate(config: &Config) -> Arc<AuthGate> {
    Arc::new(AuthGate::from_secret(
        &config.jwt_secret,
        config.jwt_leeway_seconds,
    ))
}
