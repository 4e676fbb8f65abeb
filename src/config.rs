//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{ChainData, WalletProvider};

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub chains: ChainsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 钱包连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// 允许发起连接的提供方
    pub enabled_providers: Vec<WalletProvider>,
    /// 启用 ERC-4337 智能钱包：选中的提供方作为签名方
    pub use_smart_wallets: bool,
    /// 发出 SDK connect 调用前的宽限延迟，可为 0
    pub connect_grace_ms: u64,
    /// 事件通道容量
    pub event_capacity: usize,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            enabled_providers: vec![
                WalletProvider::LocalWallet,
                WalletProvider::EmbeddedWallet,
                WalletProvider::SmartWallet,
            ],
            use_smart_wallets: false,
            connect_grace_ms: 500,
            event_capacity: 64,
        }
    }
}

/// 链集合配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainsConfig {
    /// 活动链标识符，必须存在于 supported 中
    pub active: String,
    pub supported: Vec<ChainEntry>,
}

impl Default for ChainsConfig {
    fn default() -> Self {
        Self {
            active: "ethereum".to_string(),
            supported: vec![ChainEntry {
                identifier: "ethereum".to_string(),
                chain_id: "1".to_string(),
                rpc_override: None,
            }],
        }
    }
}

/// 单条链配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainEntry {
    pub identifier: String,
    /// 十进制链 ID
    pub chain_id: String,
    #[serde(default)]
    pub rpc_override: Option<String>,
}

impl From<&ChainEntry> for ChainData {
    fn from(entry: &ChainEntry) -> Self {
        ChainData::new(
            entry.identifier.clone(),
            entry.chain_id.clone(),
            entry.rpc_override.clone(),
        )
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
    pub enable_file_logging: bool,
    pub log_file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            enable_file_logging: false,
            log_file_path: None,
        }
    }
}

impl Config {
    /// 从 TOML 文件加载配置
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// 从环境变量加载配置
    ///
    /// `WALLETCORE_CONFIG` 指定配置文件路径；未设置时使用默认值，
    /// 再应用逐项环境变量覆盖
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match std::env::var("WALLETCORE_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Config::default(),
        };

        if let Ok(level) = std::env::var("WALLETCORE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("WALLETCORE_LOG_FORMAT") {
            config.logging.format = format;
        }
        if let Ok(active) = std::env::var("WALLETCORE_ACTIVE_CHAIN") {
            config.chains.active = active;
        }
        if let Ok(value) = std::env::var("WALLETCORE_USE_SMART_WALLETS") {
            config.wallet.use_smart_wallets = value == "1" || value.eq_ignore_ascii_case("true");
        }
        if let Ok(value) = std::env::var("WALLETCORE_CONNECT_GRACE_MS") {
            config.wallet.connect_grace_ms = value
                .parse()
                .context("WALLETCORE_CONNECT_GRACE_MS must be an integer")?;
        }

        config.validate()?;
        Ok(config)
    }

    /// 校验配置不变量
    pub fn validate(&self) -> Result<()> {
        if self.wallet.enabled_providers.is_empty() {
            bail!("wallet.enabled_providers must not be empty");
        }
        if self.wallet.event_capacity == 0 {
            bail!("wallet.event_capacity must be at least 1");
        }
        if self.chains.supported.is_empty() {
            bail!("chains.supported must not be empty");
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &self.chains.supported {
            if !seen.insert(entry.identifier.as_str()) {
                bail!("duplicate chain identifier '{}'", entry.identifier);
            }
            ChainData::from(entry)
                .numeric_chain_id()
                .with_context(|| format!("chain '{}'", entry.identifier))?;
        }

        if !self
            .chains
            .supported
            .iter()
            .any(|c| c.identifier == self.chains.active)
        {
            bail!("active chain '{}' is not in chains.supported", self.chains.active);
        }
        Ok(())
    }

    /// 链集合转领域模型
    pub fn chain_data(&self) -> Vec<ChainData> {
        self.chains.supported.iter().map(ChainData::from).collect()
    }
}
