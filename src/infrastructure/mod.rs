//! Infrastructure 模块
//!
//! 事件通道与日志系统

pub mod event_bus;
pub mod logging;

pub use event_bus::{EventBus, EventEnvelope, WalletEvent};
