use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Role assigned to new users when the payload names none.
    pub default_role_id: i32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let default_role_id = std::env::var("DEFAULT_ROLE_ID")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(3); // seeded "Paciente" role
        Ok(Self {
            database_url,
            default_role_id,
        })
    }
}
