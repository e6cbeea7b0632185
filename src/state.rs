use anyhow::Context;
use lessons_auth::IntrospectionClient;
use lessons_config::{CorsConfig, DatabaseConfig, OAuthConfig};
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub introspection: IntrospectionClient,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let db = lessons_db::init_db_pool(&database)
        .await
        .context("Failed to connect to database")?;

    let introspection = IntrospectionClient::new(&OAuthConfig::from_env())
        .context("Failed to build introspection client")?;

    Ok(AppState {
        db,
        introspection,
        cors_config: CorsConfig::from_env(),
    })
}
