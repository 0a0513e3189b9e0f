//! Shop credential resolution from multiple sources

use log::debug;
use serde::Deserialize;
use std::fs;

use crate::config::credentials;
use crate::error::{Result, ShopError};

/// Resolved shop API credentials
#[derive(Debug, Clone)]
pub struct ShopCredentials {
    /// API key
    pub key: String,
    /// API password
    pub password: String,
    /// Shop name (the subdomain part of the shop host)
    pub shop: String,
}

/// Credentials file structure
#[derive(Deserialize, Debug, Default)]
struct CredentialsFile {
    key: Option<String>,
    password: Option<String>,
    shop: Option<String>,
}

/// Credential resolution with fallback logic
pub struct CredentialResolver;

impl CredentialResolver {
    /// Resolve credentials with per-field fallback:
    /// 1. CLI argument (if provided)
    /// 2. Environment variables (SHOPIFY_KEY, SHOPIFY_PASSWORD, SHOPIFY_STORE)
    /// 3. Credentials file ({config_dir}/shopsnap/credentials.json)
    pub fn resolve(
        cli_key: Option<&str>,
        cli_password: Option<&str>,
        cli_shop: Option<&str>,
    ) -> Result<ShopCredentials> {
        let mut key = Self::from_cli_or_env(cli_key, credentials::KEY_ENV_VAR);
        let mut password = Self::from_cli_or_env(cli_password, credentials::PASSWORD_ENV_VAR);
        let mut shop = Self::from_cli_or_env(cli_shop, credentials::SHOP_ENV_VAR);

        if key.is_none() || password.is_none() || shop.is_none() {
            debug!("Credentials incomplete after CLI and environment, trying credentials file");
            if let Some(file) = Self::read_credentials_file()? {
                key = key.or(file.key);
                password = password.or(file.password);
                shop = shop.or(file.shop);
            }
        }

        match (key, password, shop) {
            (Some(key), Some(password), Some(shop)) => Ok(ShopCredentials {
                key,
                password,
                shop,
            }),
            (key, password, shop) => {
                let mut missing = Vec::new();
                if key.is_none() {
                    missing.push("key");
                }
                if password.is_none() {
                    missing.push("password");
                }
                if shop.is_none() {
                    missing.push("shop");
                }
                Err(ShopError::CredentialsNotFound(Self::not_found_message(
                    &missing,
                )))
            }
        }
    }

    /// Take the CLI value when present, else a non-empty environment variable
    fn from_cli_or_env(cli: Option<&str>, env_var: &str) -> Option<String> {
        if let Some(value) = cli {
            debug!("Using {} from CLI argument", env_var);
            return Some(value.to_string());
        }
        match std::env::var(env_var) {
            Ok(value) if !value.is_empty() => {
                debug!("Using {} environment variable", env_var);
                Some(value)
            }
            _ => None,
        }
    }

    /// Read the credentials file, if one exists
    ///
    /// A missing file is not an error (other sources may cover everything);
    /// a present but unparseable file is.
    fn read_credentials_file() -> Result<Option<CredentialsFile>> {
        let Some(path) = Self::credentials_path() else {
            return Ok(None);
        };

        debug!("Looking for credentials file at: {}", path.display());

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Ok(None),
        };

        let parsed: CredentialsFile = serde_json::from_str(&content).map_err(|e| {
            ShopError::Credentials(format!(
                "Could not parse credentials file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Using credentials file {}", path.display());
        Ok(Some(parsed))
    }

    /// Generate a helpful error message when credential values are missing
    fn not_found_message(missing: &[&str]) -> String {
        format!(
            "Missing credential value(s): {}. Provide each using one of:\n\
             \n\
             1. CLI arguments:     shopsnap --key <KEY> --password <PASSWORD> --shop <SHOP>\n\
             2. Environment vars:  export {}=<KEY> {}=<PASSWORD> {}=<SHOP>\n\
             3. Credentials file:  {} under your config directory",
            missing.join(", "),
            credentials::KEY_ENV_VAR,
            credentials::PASSWORD_ENV_VAR,
            credentials::SHOP_ENV_VAR,
            credentials::FILE_NAME
        )
    }

    /// Get the path to the credentials file (platform-specific config dir)
    fn credentials_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|p| p.join(credentials::FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_cli_values_take_precedence() {
        let result =
            CredentialResolver::resolve(Some("cli-key"), Some("cli-password"), Some("cli-shop"));
        assert!(result.is_ok());
        let creds = result.unwrap();
        assert_eq!(creds.key, "cli-key");
        assert_eq!(creds.password, "cli-password");
        assert_eq!(creds.shop, "cli-shop");
    }

    #[test]
    fn test_not_found_message_lists_missing_fields() {
        let msg = CredentialResolver::not_found_message(&["key", "shop"]);
        assert!(msg.contains("key, shop"));
        assert!(msg.contains("shopsnap --key"));
        assert!(msg.contains("SHOPIFY_KEY"));
        assert!(msg.contains("shopsnap/credentials.json"));
    }

    #[test]
    fn test_credentials_file_parsing() {
        let json = r#"{
            "key": "file-key",
            "password": "file-password",
            "shop": "file-shop"
        }"#;

        let file: CredentialsFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.key.as_deref(), Some("file-key"));
        assert_eq!(file.password.as_deref(), Some("file-password"));
        assert_eq!(file.shop.as_deref(), Some("file-shop"));
    }

    #[test]
    fn test_credentials_file_parsing_partial() {
        let json = r#"{"shop": "file-shop"}"#;
        let file: CredentialsFile = serde_json::from_str(json).unwrap();
        assert!(file.key.is_none());
        assert!(file.password.is_none());
        assert_eq!(file.shop.as_deref(), Some("file-shop"));
    }

    #[test]
    fn test_credentials_file_parsing_empty() {
        let file: CredentialsFile = serde_json::from_str("{}").unwrap();
        assert!(file.key.is_none());
        assert!(file.password.is_none());
        assert!(file.shop.is_none());
    }

    #[test]
    fn test_credentials_path_ends_with_file_name() {
        if let Some(path) = CredentialResolver::credentials_path() {
            assert!(path
                .to_string_lossy()
                .ends_with("shopsnap/credentials.json"));
        }
    }
}
