//! 连接请求与连接状态
//!
//! `WalletConnection` 按次构造、一次性消费；四种请求风味
//! （guest / oauth / email / external）仅在可选字段上有差异，
//! 智能钱包策略统一应用于全部风味

use ethers::types::U256;
use serde::{Deserialize, Serialize};

use super::provider::{AuthOptions, AuthProvider, WalletProvider};

/// 连接状态机的状态
///
/// `SwitchingNetwork` 是仅从 `Connected` 可达的子状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    SwitchingNetwork,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::SwitchingNetwork => "switching_network",
        }
    }

    /// 验证状态转换是否合法
    pub fn can_transition(from: ConnectionStatus, to: ConnectionStatus) -> bool {
        use ConnectionStatus::*;

        matches!(
            (from, to),
            // 连接流程
            (Disconnected, Connecting)
                | (Connecting, Connected)
                | (Connecting, Disconnected)
                // 断开
                | (Connected, Disconnected)
                // 切链子状态（失败时同样回到 Connected）
                | (Connected, SwitchingNetwork)
                | (SwitchingNetwork, Connected)
        )
    }
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::Disconnected
    }
}

/// 编排器持有的本地连接状态
///
/// 仅在编排器自身的工作流内变更，不跨调用方共享可变引用
#[derive(Debug, Clone, Default)]
pub struct ConnectionState {
    pub status: ConnectionStatus,
    pub address: Option<String>,
    /// guest/local 钱包连接时缓存的密码，供导出使用
    pub password: Option<String>,
    pub provider: Option<WalletProvider>,
    pub last_error: Option<String>,
}

impl ConnectionState {
    /// 断开时无条件清空：地址、密码、提供方
    pub fn clear(&mut self) {
        self.status = ConnectionStatus::Disconnected;
        self.address = None;
        self.password = None;
        self.provider = None;
    }
}

/// 单次连接请求的值对象
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConnection {
    /// 主提供方；启用智能钱包时恒为 SmartWallet
    pub provider: WalletProvider,
    pub chain_id: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_options: Option<AuthOptions>,
    /// 智能钱包背后的签名方
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_wallet: Option<WalletProvider>,
}

impl WalletConnection {
    pub fn new(provider: WalletProvider, chain_id: U256) -> Self {
        Self {
            provider,
            chain_id,
            password: None,
            email: None,
            auth_options: None,
            personal_wallet: None,
        }
    }

    /// 智能钱包决策表：启用时主提供方变为 SmartWallet，
    /// 原本选中的提供方移入 personal_wallet；禁用时原样直连
    fn apply_smart_wallet(mut self, use_smart_wallets: bool) -> Self {
        if use_smart_wallets {
            self.personal_wallet = Some(self.provider);
            self.provider = WalletProvider::SmartWallet;
        }
        self
    }

    /// 密码风味：guest / 本地钱包
    pub fn guest(chain_id: U256, password: impl Into<String>, use_smart_wallets: bool) -> Self {
        let mut request = Self::new(WalletProvider::LocalWallet, chain_id);
        request.password = Some(password.into());
        request.apply_smart_wallet(use_smart_wallets)
    }

    /// OAuth 风味：嵌入式钱包 + 指定认证方式
    pub fn oauth(chain_id: U256, auth_provider: AuthProvider, use_smart_wallets: bool) -> Self {
        let mut request = Self::new(WalletProvider::EmbeddedWallet, chain_id);
        request.auth_options = Some(AuthOptions::new(auth_provider));
        request.apply_smart_wallet(use_smart_wallets)
    }

    /// 邮箱 OTP 风味：嵌入式钱包 + EmailOtp
    pub fn email(chain_id: U256, email: impl Into<String>, use_smart_wallets: bool) -> Self {
        let mut request = Self::new(WalletProvider::EmbeddedWallet, chain_id);
        request.email = Some(email.into());
        request.auth_options = Some(AuthOptions::new(AuthProvider::EmailOtp));
        request.apply_smart_wallet(use_smart_wallets)
    }

    /// 外部钱包风味：直连 Metamask / Coinbase / WalletConnect 等
    pub fn external(
        chain_id: U256,
        provider: WalletProvider,
        use_smart_wallets: bool,
    ) -> Self {
        Self::new(provider, chain_id).apply_smart_wallet(use_smart_wallets)
    }

    /// 用户实际选择的提供方：智能钱包模式下为 personal_wallet
    pub fn selected_provider(&self) -> WalletProvider {
        self.personal_wallet.unwrap_or(self.provider)
    }
}
