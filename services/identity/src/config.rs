/// Identity service configuration loaded from environment variables.
#[derive(Debug)]
pub struct IdentityConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Base URL of the external clinical-data server (e.g. "http://fhir:8080/fhir").
    pub fhir_base_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3120). Env var: `IDENTITY_PORT`.
    pub identity_port: u16,
    /// Default access-code TTL in seconds (default 86400). Env var: `CODE_TTL_SECS`.
    pub code_ttl_secs: i64,
    /// Maximum access-code TTL in seconds (default 604800). Env var: `CODE_TTL_MAX_SECS`.
    pub code_ttl_max_secs: i64,
    /// Password length floor (default 8). Env var: `PASSWORD_MIN_LEN`.
    pub password_min_len: usize,
    /// Per-call timeout for clinical-data server requests in seconds (default 10).
    pub fhir_timeout_secs: u64,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            fhir_base_url: std::env::var("FHIR_BASE_URL").expect("FHIR_BASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            identity_port: env_or("IDENTITY_PORT", 3120),
            code_ttl_secs: env_or("CODE_TTL_SECS", 86_400),
            code_ttl_max_secs: env_or("CODE_TTL_MAX_SECS", 604_800),
            password_min_len: env_or("PASSWORD_MIN_LEN", 8),
            fhir_timeout_secs: env_or("FHIR_TIMEOUT_SECS", 10),
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
