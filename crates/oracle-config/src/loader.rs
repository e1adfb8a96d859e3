use std::path::Path;

use crate::Config;

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

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Missing credentials are not an error here: keys are resolved per
    /// request and the endpoint answers 500 while none is present.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_oracle_config()?;
        self.validate_server_config()?;
        Ok(())
    }

    fn validate_oracle_config(&self) -> anyhow::Result<()> {
        let oracle = &self.oracle;

        if !oracle.path.starts_with('/') {
            anyhow::bail!("oracle.path must start with '/': `{}`", oracle.path);
        }

        if !(0.0..=1.0).contains(&oracle.primary_weight) {
            anyhow::bail!(
                "oracle.primary_weight must be between 0.0 and 1.0, got {}",
                oracle.primary_weight
            );
        }

        if oracle.timeout_seconds == 0 {
            anyhow::bail!("oracle.timeout_seconds must be greater than 0");
        }

        if oracle.max_tokens == 0 {
            anyhow::bail!("oracle.max_tokens must be greater than 0");
        }

        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && health.path == self.oracle.path {
            anyhow::bail!("server.health.path collides with oracle.path `{}`", health.path);
        }

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': `{}`", health.path);
        }

        Ok(())
    }
}
