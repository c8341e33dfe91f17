use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

const DEFAULT_AWS_REGION: &str = "us-east-2";

/// Upper bound on a single RetrieveAndGenerate call, in seconds.
const DEFAULT_BEDROCK_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct RagConfig {
    pub common: core_config::Config,
    pub aws: AwsConfig,
    pub knowledge_base: KnowledgeBaseConfig,
}

#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub region: String,
    pub timeout_secs: u64,
}

impl AwsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct KnowledgeBaseConfig {
    /// Bedrock knowledge base identifier (e.g., `ABCDEFGHIJ`)
    pub id: String,
    /// ARN of the foundation model that writes the answer
    pub model_arn: String,
}

impl RagConfig {
    /// Resolve the service settings from the process environment.
    pub fn from_env(common: core_config::Config) -> Result<Self, AppError> {
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Resolve the service settings against an arbitrary key lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = get_env(
            &lookup,
            "BEDROCK_TIMEOUT_SECS",
            Some(&DEFAULT_BEDROCK_TIMEOUT_SECS.to_string()),
        )?
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!(
                "BEDROCK_TIMEOUT_SECS must be a positive number of seconds"
            ))
        })?;

        Ok(RagConfig {
            common,
            aws: AwsConfig {
                region: get_env(&lookup, "AWS_REGION", Some(DEFAULT_AWS_REGION))?,
                timeout_secs,
            },
            knowledge_base: KnowledgeBaseConfig {
                id: get_env(&lookup, "KNOWLEDGE_BASE_ID", None)?,
                model_arn: get_env(&lookup, "MODEL_ARN", None)?,
            },
        })
    }
}

/// Blank values count as unset so an empty identifier never reaches Bedrock.
fn get_env<F>(lookup: &F, key: &str, default: Option<&str>) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_string()) {
        Some(val) if !val.is_empty() => Ok(val),
        _ => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<RagConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RagConfig::from_lookup(core_config::Config::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn region_defaults_to_us_east_2() {
        let config = load(&[("KNOWLEDGE_BASE_ID", "KB123"), ("MODEL_ARN", "arn:model")]).unwrap();

        assert_eq!(config.aws.region, "us-east-2");
        assert_eq!(config.aws.timeout(), Duration::from_secs(120));
        assert_eq!(config.knowledge_base.id, "KB123");
        assert_eq!(config.knowledge_base.model_arn, "arn:model");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = load(&[
            ("AWS_REGION", "eu-west-1"),
            ("BEDROCK_TIMEOUT_SECS", "15"),
            ("KNOWLEDGE_BASE_ID", "KB123"),
            ("MODEL_ARN", "arn:model"),
        ])
        .unwrap();

        assert_eq!(config.aws.region, "eu-west-1");
        assert_eq!(config.aws.timeout_secs, 15);
    }

    #[test]
    fn missing_knowledge_base_id_is_a_config_error() {
        let err = load(&[("MODEL_ARN", "arn:model")]).unwrap_err();

        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("KNOWLEDGE_BASE_ID"));
    }

    #[test]
    fn blank_model_arn_is_treated_as_missing() {
        let err = load(&[("KNOWLEDGE_BASE_ID", "KB123"), ("MODEL_ARN", "   ")]).unwrap_err();

        assert!(err.to_string().contains("MODEL_ARN"));
    }

    #[test]
    fn zero_or_garbage_timeout_is_rejected() {
        for bad in ["0", "soon"] {
            let err = load(&[
                ("KNOWLEDGE_BASE_ID", "KB123"),
                ("MODEL_ARN", "arn:model"),
                ("BEDROCK_TIMEOUT_SECS", bad),
            ])
            .unwrap_err();
            assert!(err.to_string().contains("BEDROCK_TIMEOUT_SECS"));
        }
    }
}
