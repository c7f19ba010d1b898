use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
}

impl Config {
    /// Reads `.env` if present, then the process environment. The database
    /// defaults to a local file next to the app data.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://edustore.db".to_string());

        Self { database_url }
    }
}
