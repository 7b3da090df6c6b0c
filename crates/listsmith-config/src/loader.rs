use std::collections::HashSet;
use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

const KNOWN_PROVIDERS: &[&str] = &["openai", "anthropic", "deepseek"];

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate catalog ids or tokens, unknown
    /// provider names, or malformed durations
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_catalog()?;
        self.validate_providers()?;
        self.validate_identity()?;
        Ok(())
    }

    fn validate_catalog(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();

        for entry in &self.catalog.models {
            if entry.id.trim().is_empty() {
                anyhow::bail!("catalog model ids must not be empty");
            }

            if !seen.insert(entry.id.as_str()) {
                anyhow::bail!("duplicate catalog model id '{}'", entry.id);
            }

            if !KNOWN_PROVIDERS.iter().any(|known| known.eq_ignore_ascii_case(&entry.provider)) {
                tracing::warn!(
                    model_id = %entry.id,
                    provider = %entry.provider,
                    "unknown provider name, requests will be routed to openai"
                );
            }

            if entry.max_tokens == 0 {
                anyhow::bail!("catalog model '{}' must allow at least one token", entry.id);
            }

            if !(0.0..=2.0).contains(&entry.temperature) {
                anyhow::bail!("catalog model '{}' temperature must be between 0 and 2", entry.id);
            }
        }

        Ok(())
    }

    fn validate_providers(&self) -> anyhow::Result<()> {
        let providers = [
            ("openai", &self.providers.openai),
            ("anthropic", &self.providers.anthropic),
            ("deepseek", &self.providers.deepseek),
        ];

        let mut any_credential = false;

        for (name, provider) in providers {
            let Some(provider) = provider else {
                continue;
            };

            provider
                .timeout()
                .map_err(|e| anyhow::anyhow!("providers.{name}: {e}"))?;

            any_credential |= provider.credential().is_some();
        }

        if !any_credential {
            tracing::warn!("no LLM provider credentials configured, every listing will use fallback content");
        }

        Ok(())
    }

    fn validate_identity(&self) -> anyhow::Result<()> {
        let mut ids = HashSet::new();
        let mut tokens = HashSet::new();

        for user in &self.identity.users {
            if !ids.insert(user.id.as_str()) {
                anyhow::bail!("duplicate identity user id '{}'", user.id);
            }

            let token = user.token.expose_secret();

            if token.is_empty() {
                anyhow::bail!("identity user '{}' has an empty token", user.id);
            }

            if !tokens.insert(token) {
                anyhow::bail!("identity user '{}' reuses another user's token", user.id);
            }
        }

        for path in &self.identity.public_paths {
            if !path.starts_with('/') {
                anyhow::bail!("identity public path '{path}' must start with '/'");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use listsmith_core::SubscriptionTier;

    use crate::{Config, LogFormat, StorageConfig};

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();

        assert!(config.catalog.models.is_empty());
        assert!(config.server.health.enabled);
        assert_eq!(config.identity.public_paths, vec!["/health".to_owned()]);
        assert_eq!(config.telemetry.format, LogFormat::Text);
        assert!(matches!(config.storage, StorageConfig::Json { .. }));
    }

    #[test]
    fn loads_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [server]
            listen_address = "127.0.0.1:8080"

            [providers.openai]
            api_key = "sk-test"
            base_url = "http://localhost:9000/v1"
            timeout = "30s"

            [[catalog.models]]
            id = "house-model"
            name = "House Model"
            provider = "openai"
            tier = "basic"
            model_name = "gpt-4o-mini"
            max_tokens = 1500

            [[identity.users]]
            id = "user-1"
            email = "ada@example.com"
            subscription = "pro"
            token = "token-1"

            [storage]
            type = "memory"

            [telemetry]
            filter = "debug"
            format = "json"
            "#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.catalog.models.len(), 1);
        assert!((config.catalog.models[0].temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.identity.users[0].subscription, SubscriptionTier::Pro);
        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(config.telemetry.format, LogFormat::Json);

        let openai = config.providers.openai.unwrap();
        assert_eq!(openai.base_url.unwrap().as_str(), "http://localhost:9000/v1");
    }

    #[test]
    fn expands_environment_placeholders() {
        temp_env::with_var("LISTSMITH_TEST_OPENAI_KEY", Some("sk-from-env"), || {
            let config = Config::from_toml(
                r#"
                [providers.openai]
                api_key = "{{ env.LISTSMITH_TEST_OPENAI_KEY }}"
                "#,
            )
            .unwrap();

            assert!(config.providers.openai.unwrap().credential().is_some());
        });
    }

    #[test]
    fn rejects_duplicate_catalog_ids() {
        let err = Config::from_toml(
            r#"
            [[catalog.models]]
            id = "dup"
            name = "One"
            provider = "openai"
            tier = "free"
            model_name = "a"
            max_tokens = 10

            [[catalog.models]]
            id = "dup"
            name = "Two"
            provider = "openai"
            tier = "free"
            model_name = "b"
            max_tokens = 10
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("duplicate catalog model id"));
    }

    #[test]
    fn rejects_shared_tokens() {
        let err = Config::from_toml(
            r#"
            [[identity.users]]
            id = "a"
            token = "same"

            [[identity.users]]
            id = "b"
            token = "same"
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("reuses another user's token"));
    }

    #[test]
    fn rejects_bad_provider_timeout() {
        let err = Config::from_toml(
            r#"
            [providers.anthropic]
            timeout = "whenever"
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("providers.anthropic"));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Config::from_toml("[server]\nport = 80\n").is_err());
    }

    #[test]
    fn bundled_sample_config_is_valid() {
        let vars = [
            ("OPENAI_API_KEY", None::<&str>),
            ("ANTHROPIC_API_KEY", None),
            ("DEEPSEEK_API_KEY", None),
            ("LISTSMITH_DEMO_TOKEN", None),
        ];

        temp_env::with_vars(vars, || {
            let config = Config::from_toml(include_str!("../../../listsmith.toml")).unwrap();

            assert!(config.providers.openai.as_ref().unwrap().credential().is_none());
            assert_eq!(config.identity.users[0].subscription, SubscriptionTier::Basic);
            assert_eq!(config.telemetry.format, LogFormat::Text);
        });
    }
}
