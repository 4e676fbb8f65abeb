//! 钱包 SDK 边界
//!
//! 签名、RPC、账户抽象与 OTP 认证全部在 SDK 内部实现，
//! 编排层只通过本接口消费；所有实现必须注入，不使用全局单例

use async_trait::async_trait;
use ethers::types::U256;
use ethers::utils::format_units;
use serde::{Deserialize, Serialize};

use crate::domain::WalletConnection;
use crate::error::SdkError;

/// 余额查询结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyValue {
    /// 最小单位的整数余额（wei 等价物）
    pub value: U256,
    pub symbol: String,
    pub decimals: u8,
}

impl CurrencyValue {
    pub fn new(value: U256, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            value,
            symbol: symbol.into(),
            decimals,
        }
    }

    /// "1.5 ETH" 形式的展示字符串
    pub fn display(&self) -> String {
        match format_units(self.value, u32::from(self.decimals)) {
            Ok(amount) => format!("{} {}", amount, self.symbol),
            // decimals 超出 format_units 支持范围时退回原始整数
            Err(_) => format!("{} {}", self.value, self.symbol),
        }
    }
}

/// 外部钱包 SDK 接口
///
/// 每个调用都是协作式挂起点；本层不做超时与取消，
/// 以 SDK 自身的限制为准
#[async_trait]
pub trait WalletSdk: Send + Sync {
    /// 发起连接，成功返回钱包地址
    async fn connect(&self, request: &WalletConnection) -> Result<String, SdkError>;

    /// 断开当前连接
    async fn disconnect(&self) -> Result<(), SdkError>;

    /// 切换到目标链
    async fn switch_network(&self, chain_id: U256) -> Result<(), SdkError>;

    /// 查询当前连接账户在活动链上的余额
    async fn get_balance(&self) -> Result<CurrencyValue, SdkError>;

    /// 导出序列化钱包 JSON（仅本地钱包）
    async fn export(&self, password: &str) -> Result<String, SdkError>;
}
