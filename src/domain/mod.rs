//! Domain 模块
//!
//! 链数据、钱包提供方与连接请求的领域模型

pub mod chain;
pub mod connection;
pub mod provider;

// 重新导出常用类型
pub use chain::{ChainData, ChainRegistry, InMemoryChainRegistry};
pub use connection::{ConnectionState, ConnectionStatus, WalletConnection};
pub use provider::{AuthOptions, AuthProvider, WalletProvider};
