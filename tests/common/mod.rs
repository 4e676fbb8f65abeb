//! 测试辅助模块
//! 提供脚本化的 Mock SDK 与注册表/编排器构造工具

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ethers::types::U256;
use walletcore::domain::{ChainData, InMemoryChainRegistry, WalletConnection, WalletProvider};
use walletcore::error::SdkError;
use walletcore::service::{
    ConnectionOrchestrator, CurrencyValue, OrchestratorOptions, WalletSdk,
};
use async_trait::async_trait;

/// 脚本化 Mock SDK：可配置各调用失败，并记录调用顺序
pub struct MockWalletSdk {
    pub fail_connect: AtomicBool,
    pub fail_switch: AtomicBool,
    pub fail_disconnect: AtomicBool,
    pub fail_balance: AtomicBool,
    /// connect 调用前的人工延迟，用于并发测试
    pub connect_delay: Mutex<Duration>,
    pub address: String,
    pub balance: Mutex<CurrencyValue>,
    /// 形如 "connect", "switch:137", "balance", "disconnect", "export" 的调用日志
    pub calls: Mutex<Vec<String>>,
    pub connect_requests: Mutex<Vec<WalletConnection>>,
}

impl MockWalletSdk {
    pub fn new() -> Self {
        Self {
            fail_connect: AtomicBool::new(false),
            fail_switch: AtomicBool::new(false),
            fail_disconnect: AtomicBool::new(false),
            fail_balance: AtomicBool::new(false),
            connect_delay: Mutex::new(Duration::ZERO),
            address: "0x9858EfFD232B4033E47d90003D23EC58E053e11f".to_string(),
            balance: Mutex::new(CurrencyValue::new(
                U256::from(1_000_000_000_000_000_000u64),
                "ETH",
                18,
            )),
            calls: Mutex::new(Vec::new()),
            connect_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_connect(self) -> Self {
        self.fail_connect.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_switch(self) -> Self {
        self.fail_switch.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_disconnect(self) -> Self {
        self.fail_disconnect.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_connect_delay(self, delay: Duration) -> Self {
        *self.connect_delay.lock().unwrap() = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl WalletSdk for MockWalletSdk {
    async fn connect(&self, request: &WalletConnection) -> Result<String, SdkError> {
        let delay = *self.connect_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.record("connect");
        self.connect_requests.lock().unwrap().push(request.clone());
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(SdkError::new("user rejected the connection"));
        }
        Ok(self.address.clone())
    }

    async fn disconnect(&self) -> Result<(), SdkError> {
        self.record("disconnect");
        if self.fail_disconnect.load(Ordering::SeqCst) {
            return Err(SdkError::new("session already closed"));
        }
        Ok(())
    }

    async fn switch_network(&self, chain_id: U256) -> Result<(), SdkError> {
        self.record(format!("switch:{chain_id}"));
        if self.fail_switch.load(Ordering::SeqCst) {
            return Err(SdkError::new("chain not supported by wallet"));
        }
        Ok(())
    }

    async fn get_balance(&self) -> Result<CurrencyValue, SdkError> {
        self.record("balance");
        if self.fail_balance.load(Ordering::SeqCst) {
            return Err(SdkError::new("rpc unreachable"));
        }
        Ok(self.balance.lock().unwrap().clone())
    }

    async fn export(&self, password: &str) -> Result<String, SdkError> {
        self.record("export");
        Ok(format!("{{\"encrypted\":\"{password}\"}}"))
    }
}

/// ethereum + polygon 双链注册表，活动链 ethereum
pub fn test_registry() -> Arc<InMemoryChainRegistry> {
    Arc::new(
        InMemoryChainRegistry::new(
            vec![
                ChainData::new("ethereum", "1", None),
                ChainData::new("polygon", "137", None),
            ],
            "ethereum",
        )
        .unwrap(),
    )
}

/// 宽限延迟为 0 的测试选项，全部提供方可用
pub fn test_options(use_smart_wallets: bool) -> OrchestratorOptions {
    OrchestratorOptions {
        enabled_providers: vec![
            WalletProvider::LocalWallet,
            WalletProvider::EmbeddedWallet,
            WalletProvider::SmartWallet,
            WalletProvider::Metamask,
        ],
        use_smart_wallets,
        connect_grace: Duration::ZERO,
        event_capacity: 16,
    }
}

pub fn orchestrator(
    sdk: Arc<MockWalletSdk>,
    registry: Arc<InMemoryChainRegistry>,
    use_smart_wallets: bool,
) -> ConnectionOrchestrator {
    ConnectionOrchestrator::new(sdk, registry, test_options(use_smart_wallets))
}
