//! 统一错误类型
//!
//! 三类可恢复失败（连接/切链/断开）加上配置与校验错误。
//! SDK 侧失败以不透明的 [`SdkError`] 形式进入本层，不做自动重试

use thiserror::Error;

use crate::domain::WalletProvider;

/// 钱包 SDK 返回的不透明错误
///
/// 编排层不区分网络失败、用户拒绝或服务商错误，统一包装上抛
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SdkError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SdkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// 编排层错误码
#[derive(Debug, Error)]
pub enum Error {
    /// 连接失败：本地状态已回滚到 Disconnected
    #[error("wallet connect failed: {0}")]
    Connection(#[source] SdkError),

    /// 切链失败：状态保持 Connected，活动链不变
    #[error("network switch failed: {0}")]
    SwitchNetwork(#[source] SdkError),

    /// 断开失败：仅记录日志，本地状态已无条件清空
    #[error("wallet disconnect failed: {0}")]
    Disconnection(#[source] SdkError),

    /// 余额查询失败（post-connect 刷新阶段）
    #[error("balance query failed: {0}")]
    Balance(#[source] SdkError),

    /// 钱包导出失败
    #[error("wallet export failed: {0}")]
    Export(#[source] SdkError),

    #[error("chain not found: {0}")]
    ChainNotFound(String),

    #[error("invalid chain id '{0}': expected a decimal integer")]
    InvalidChainId(String),

    #[error("wallet provider '{0}' is not enabled")]
    ProviderDisabled(WalletProvider),

    #[error("unknown wallet provider '{0}'")]
    UnknownProvider(String),

    #[error("unknown auth provider '{0}'")]
    UnknownAuthProvider(String),

    #[error("no wallet connected")]
    NotConnected,

    /// 已连接状态下不接受新的连接请求，需先断开
    #[error("a wallet is already connected")]
    AlreadyConnected,

    /// 导出仅对 LocalWallet 开放
    #[error("wallet export is only available for local wallets")]
    ExportUnavailable,

    /// 同一编排器上已有 connect/disconnect/switch 工作流在执行
    #[error("another wallet workflow is already in flight")]
    OperationInFlight,

    #[error("configuration error: {0}")]
    Config(String),
}
