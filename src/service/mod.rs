//! Service 模块
//!
//! 连接编排器与钱包 SDK 边界

pub mod orchestrator;
pub mod wallet_sdk;

// 重新导出常用类型
pub use orchestrator::{AccountSnapshot, ConnectionOrchestrator, OrchestratorOptions};
pub use wallet_sdk::{CurrencyValue, WalletSdk};
