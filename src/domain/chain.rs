//! 链数据与链注册表
//!
//! 链集合在配置加载时构建，之后只读；仅活动链指针可变

use std::collections::HashSet;
use std::sync::RwLock;

use ethers::types::U256;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// 单条链的静态描述，配置加载后不再变更
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainData {
    /// 人类可读标识符，注册表内唯一（如 "ethereum", "arbitrum-nova"）
    pub identifier: String,
    /// 十进制链 ID，任意精度
    pub chain_id: String,
    /// 可选的 RPC 端点覆盖
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_override: Option<String>,
}

impl ChainData {
    pub fn new(
        identifier: impl Into<String>,
        chain_id: impl Into<String>,
        rpc_override: Option<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            chain_id: chain_id.into(),
            rpc_override,
        }
    }

    /// 解析为数值链 ID（EIP-155）
    pub fn numeric_chain_id(&self) -> Result<U256, Error> {
        U256::from_dec_str(self.chain_id.trim())
            .map_err(|_| Error::InvalidChainId(self.chain_id.clone()))
    }
}

/// 链注册表接口：受支持链的有序集合加活动链指针
pub trait ChainRegistry: Send + Sync {
    /// 受支持的链，顺序与配置一致
    fn supported_chains(&self) -> Vec<ChainData>;

    /// 按标识符查找链
    fn chain_by_identifier(&self, identifier: &str) -> Result<ChainData, Error>;

    fn active_chain_identifier(&self) -> String;

    /// 切换活动链指针；目标必须已注册
    fn set_active_chain_identifier(&self, identifier: &str) -> Result<(), Error>;
}

/// 内存实现：由配置构建，链集合不可变
#[derive(Debug)]
pub struct InMemoryChainRegistry {
    chains: Vec<ChainData>,
    active: RwLock<String>,
}

impl InMemoryChainRegistry {
    /// 构建注册表并校验不变量：
    /// 非空、标识符唯一、链 ID 可解析、活动链存在
    pub fn new(chains: Vec<ChainData>, active: impl Into<String>) -> Result<Self, Error> {
        if chains.is_empty() {
            return Err(Error::Config("chain registry must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for chain in &chains {
            if !seen.insert(chain.identifier.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate chain identifier '{}'",
                    chain.identifier
                )));
            }
            chain.numeric_chain_id()?;
        }

        let active = active.into();
        if !chains.iter().any(|c| c.identifier == active) {
            return Err(Error::ChainNotFound(active));
        }

        Ok(Self {
            chains,
            active: RwLock::new(active),
        })
    }
}

impl ChainRegistry for InMemoryChainRegistry {
    fn supported_chains(&self) -> Vec<ChainData> {
        self.chains.clone()
    }

    fn chain_by_identifier(&self, identifier: &str) -> Result<ChainData, Error> {
        self.chains
            .iter()
            .find(|c| c.identifier == identifier)
            .cloned()
            .ok_or_else(|| Error::ChainNotFound(identifier.to_string()))
    }

    fn active_chain_identifier(&self) -> String {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_active_chain_identifier(&self, identifier: &str) -> Result<(), Error> {
        // 先校验存在性，失败时指针保持不变
        let chain = self.chain_by_identifier(identifier)?;
        let mut active = self
            .active
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *active = chain.identifier;
        Ok(())
    }
}
