use fcm_shared::DEFAULT_FCM_BASE_URL;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub store: StoreConfig,
    pub firebase: FirebaseConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
}

/// PostgREST endpoint holding registered device tokens
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub service_role_key: String,
    pub table: String,
}

#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Raw service account JSON; `None` when unset or blank
    pub service_account: Option<String>,
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Ok(Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                port: env::var("APP_PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
            },
            store: StoreConfig {
                url: env::var("SUPABASE_URL").unwrap_or_default(),
                service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default(),
                table: env::var("FCM_TOKENS_TABLE").unwrap_or_else(|_| "fcm_tokens".to_string()),
            },
            firebase: FirebaseConfig {
                service_account: non_blank(env::var("FIREBASE_SERVICE_ACCOUNT").ok()),
                api_base_url: env::var("FCM_API_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_FCM_BASE_URL.to_string()),
            },
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_service_account_counts_as_missing() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some("{}".to_string())), Some("{}".to_string()));
    }
}
