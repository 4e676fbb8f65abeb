// 生命周期事件通道
// 类型化 payload 的发布/订阅，替代 UI 层的松散事件回调

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

// ============ 事件类型定义 ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WalletEvent {
    /// 连接请求已受理，异步 SDK 调用尚未发出
    ConnectionRequested {
        provider: crate::domain::WalletProvider,
        chain_id: String,
    },
    /// 连接成功，post-connect 刷新已执行
    Connected { address: String },
    /// 连接失败，本地状态已回滚
    ConnectionFailed { reason: String },
    Disconnected,
    /// 活动链已切换
    NetworkSwitched { identifier: String },
}

impl WalletEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionRequested { .. } => "connection_requested",
            Self::Connected { .. } => "connected",
            Self::ConnectionFailed { .. } => "connection_failed",
            Self::Disconnected => "disconnected",
            Self::NetworkSwitched { .. } => "network_switched",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: Uuid,
    pub event: WalletEvent,
    pub published_at: DateTime<Utc>,
}

// ============ 事件通道 ============

/// 基于 broadcast 的事件通道
///
/// 发布不阻塞工作流；没有订阅者时事件被静默丢弃
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        // broadcast::channel 对容量 0 直接 panic
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// 发布事件
    pub fn publish(&self, event: WalletEvent) {
        let envelope = EventEnvelope {
            event_id: Uuid::new_v4(),
            event,
            published_at: Utc::now(),
        };
        tracing::debug!(kind = envelope.event.kind(), event_id = %envelope.event_id, "publishing wallet event");
        // 无订阅者时 send 返回 Err，不是故障
        let _ = self.sender.send(envelope);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
