#[cfg(feature = "deepseek")]
use crate::clients::deepseek::{DeepSeekClient, DeepSeekConfig, DeepSeekModel};
use crate::clients::gemini::{GeminiClient, GeminiConfig, GeminiModel};
use crate::config::{KeyFromEnv, ServiceConfig};
use crate::core::LowLevelClient;
use crate::error::AIError;
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;

/// Model provider selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientType {
    #[default]
    Gemini,
    #[cfg(feature = "deepseek")]
    DeepSeek,
}

impl ClientType {
    /// Environment variable holding this provider's credential
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::Gemini => GeminiClient::KEY_NAME,
            #[cfg(feature = "deepseek")]
            Self::DeepSeek => DeepSeekClient::KEY_NAME,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-1.5-flash",
            #[cfg(feature = "deepseek")]
            Self::DeepSeek => "deepseek-chat",
        }
    }
}

impl FromStr for ClientType {
    type Err = String;

    /// Parse client type from string (case insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            #[cfg(feature = "deepseek")]
            "deepseek" => Ok(Self::DeepSeek),
            _ => Err(format!("Unknown client type: '{}'. Supported: gemini, deepseek", s)),
        }
    }
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientType::Gemini => write!(f, "gemini"),
            #[cfg(feature = "deepseek")]
            ClientType::DeepSeek => write!(f, "deepseek"),
        }
    }
}

/// Client handle that wraps whichever provider the configuration selects
#[derive(Debug, Clone)]
pub struct FlexibleClient {
    inner: Arc<dyn LowLevelClient>,
}

impl FlexibleClient {
    /// Create a new FlexibleClient wrapping the given client
    pub fn new(client: Box<dyn LowLevelClient>) -> Self {
        Self {
            inner: Arc::from(client),
        }
    }

    /// Build the provider client described by the service configuration
    pub fn from_config(config: &ServiceConfig) -> Self {
        match config.client_type {
            ClientType::Gemini => {
                let model = config
                    .model
                    .as_deref()
                    .map(GeminiModel::from_id)
                    .unwrap_or_default();
                let mut gemini = GeminiConfig::new(config.api_key.clone(), model);
                if let Some(base_url) = &config.base_url {
                    gemini = gemini.with_base_url(base_url.clone());
                }
                Self::new(Box::new(GeminiClient::new(gemini)))
            }
            #[cfg(feature = "deepseek")]
            ClientType::DeepSeek => {
                let model = config
                    .model
                    .as_deref()
                    .map(DeepSeekModel::from_id)
                    .unwrap_or_default();
                let mut deepseek = DeepSeekConfig::new(config.api_key.clone(), model);
                if let Some(base_url) = &config.base_url {
                    deepseek = deepseek.with_base_url(base_url.clone());
                }
                Self::new(Box::new(DeepSeekClient::new(deepseek)))
            }
        }
    }
}

#[async_trait]
impl LowLevelClient for FlexibleClient {
    async fn ask_raw(&self, prompt: String) -> Result<String, AIError> {
        self.inner.ask_raw(prompt).await
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
