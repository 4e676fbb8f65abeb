//! 钱包提供方与认证方式定义

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// 钱包提供方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletProvider {
    /// 本地钱包（密码加密的设备内私钥，可导出）
    LocalWallet,
    /// 托管嵌入式钱包（邮箱 OTP / OAuth 登录）
    EmbeddedWallet,
    /// ERC-4337 智能合约钱包，由 personal wallet 作为签名方
    SmartWallet,
    Metamask,
    Coinbase,
    WalletConnect,
    Injected,
    Hyperplay,
}

impl WalletProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocalWallet => "local_wallet",
            Self::EmbeddedWallet => "embedded_wallet",
            Self::SmartWallet => "smart_wallet",
            Self::Metamask => "metamask",
            Self::Coinbase => "coinbase",
            Self::WalletConnect => "wallet_connect",
            Self::Injected => "injected",
            Self::Hyperplay => "hyperplay",
        }
    }

    /// 仅 LocalWallet 支持本地私钥导出
    pub fn supports_export(&self) -> bool {
        matches!(self, Self::LocalWallet)
    }
}

impl fmt::Display for WalletProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local_wallet" => Ok(Self::LocalWallet),
            "embedded_wallet" => Ok(Self::EmbeddedWallet),
            "smart_wallet" => Ok(Self::SmartWallet),
            "metamask" => Ok(Self::Metamask),
            "coinbase" => Ok(Self::Coinbase),
            "wallet_connect" => Ok(Self::WalletConnect),
            "injected" => Ok(Self::Injected),
            "hyperplay" => Ok(Self::Hyperplay),
            other => Err(Error::UnknownProvider(other.to_string())),
        }
    }
}

/// OAuth / OTP 认证方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    EmailOtp,
    Google,
    Apple,
    Facebook,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailOtp => "email_otp",
            Self::Google => "google",
            Self::Apple => "apple",
            Self::Facebook => "facebook",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email_otp" => Ok(Self::EmailOtp),
            "google" => Ok(Self::Google),
            "apple" => Ok(Self::Apple),
            "facebook" => Ok(Self::Facebook),
            other => Err(Error::UnknownAuthProvider(other.to_string())),
        }
    }
}

/// 认证选项：认证方式加可选的 JWT/payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOptions {
    pub provider: AuthProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt_or_payload: Option<String>,
}

impl AuthOptions {
    pub fn new(provider: AuthProvider) -> Self {
        Self {
            provider,
            jwt_or_payload: None,
        }
    }

    pub fn with_jwt_or_payload(mut self, value: impl Into<String>) -> Self {
        self.jwt_or_payload = Some(value.into());
        self
    }
}
