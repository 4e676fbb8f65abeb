//! walletcore - 钱包连接编排核心
//!
//! 将连接/断开/切换网络的生命周期从 UI 层剥离：
//! SDK 与链注册表通过依赖注入传入，生命周期事件通过类型化事件通道发布

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use error::{Error, SdkError};

// 企业级标准：统一模块导出
pub mod prelude {
    pub use crate::{
        config::Config,
        domain::{
            AuthOptions, AuthProvider, ChainData, ChainRegistry, ConnectionStatus,
            InMemoryChainRegistry, WalletConnection, WalletProvider,
        },
        error::{Error, SdkError},
        infrastructure::event_bus::{EventBus, EventEnvelope, WalletEvent},
        service::{AccountSnapshot, ConnectionOrchestrator, CurrencyValue, WalletSdk},
    };
}
