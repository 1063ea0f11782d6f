#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    pub calendar_utc_offset_hours: i32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("PORT must be a number"))?;

        let allowed_origins = parse_origins(
            &std::env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5500,http://127.0.0.1:5500".to_string()),
        );

        let environment = std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "production".to_string());

        let calendar_utc_offset_hours = std::env::var("CALENDAR_UTC_OFFSET_HOURS")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<i32>()
            .map_err(|_| anyhow::anyhow!("CALENDAR_UTC_OFFSET_HOURS must be an integer"))?;

        Ok(Self {
            database_url,
            port,
            allowed_origins,
            environment,
            calendar_utc_offset_hours,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// True when internal error details may be echoed back to API clients.
/// Requires an explicit `ENVIRONMENT=development`; an unset variable means
/// details stay hidden.
pub fn is_development() -> bool {
    is_development_env(std::env::var("ENVIRONMENT").ok().as_deref())
}

fn is_development_env(environment: Option<&str>) -> bool {
    environment == Some("development")
}
