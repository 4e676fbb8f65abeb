//! 钱包连接编排器
//!
//! 状态机：`Disconnected → Connecting → Connected`，
//! `SwitchingNetwork` 为仅从 `Connected` 可达的子状态。
//! 每个编排器实例同一时刻至多一个 connect/disconnect/switch 工作流，
//! 并发调用直接拒绝（OperationInFlight）

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::domain::{
    AuthProvider, ChainData, ChainRegistry, ConnectionState, ConnectionStatus, WalletConnection,
    WalletProvider,
};
use crate::error::Error;
use crate::infrastructure::event_bus::{EventBus, EventEnvelope, WalletEvent};
use crate::service::wallet_sdk::{CurrencyValue, WalletSdk};
use crate::utils::{prettify_network, shorten_address};

/// post-connect 刷新产物：UI 绑定所需的全部账户数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub address: String,
    /// "0x1234...abcd" 形式
    pub address_short: String,
    pub balance: CurrencyValue,
    /// "1.5 ETH" 形式
    pub balance_display: String,
    /// 连接请求的主提供方
    pub provider: WalletProvider,
    pub chain: ChainData,
    /// 展示用网络标签，如 "Arbitrum nova"
    pub network_label: String,
}

/// 编排器行为配置
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    pub enabled_providers: Vec<WalletProvider>,
    pub use_smart_wallets: bool,
    /// 发出 SDK connect 调用前的宽限延迟；非 UI 场景可为 0
    pub connect_grace: Duration,
    pub event_capacity: usize,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            enabled_providers: vec![
                WalletProvider::LocalWallet,
                WalletProvider::EmbeddedWallet,
                WalletProvider::SmartWallet,
            ],
            use_smart_wallets: false,
            connect_grace: Duration::from_millis(500),
            event_capacity: 64,
        }
    }
}

impl OrchestratorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enabled_providers: config.wallet.enabled_providers.clone(),
            use_smart_wallets: config.wallet.use_smart_wallets,
            connect_grace: Duration::from_millis(config.wallet.connect_grace_ms),
            event_capacity: config.wallet.event_capacity,
        }
    }
}

/// 连接编排器
///
/// SDK 与链注册表在构造时注入；本地状态只在自身工作流内变更
pub struct ConnectionOrchestrator {
    sdk: Arc<dyn WalletSdk>,
    registry: Arc<dyn ChainRegistry>,
    events: EventBus,
    state: RwLock<ConnectionState>,
    // 工作流互斥：try_lock 失败即有工作流在执行
    workflow: Mutex<()>,
    options: OrchestratorOptions,
}

impl ConnectionOrchestrator {
    pub fn new(
        sdk: Arc<dyn WalletSdk>,
        registry: Arc<dyn ChainRegistry>,
        options: OrchestratorOptions,
    ) -> Self {
        let events = EventBus::new(options.event_capacity);
        Self {
            sdk,
            registry,
            events,
            state: RwLock::new(ConnectionState::default()),
            workflow: Mutex::new(()),
            options,
        }
    }

    /// 订阅生命周期事件
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    pub async fn status(&self) -> ConnectionStatus {
        self.state.read().await.status
    }

    pub async fn address(&self) -> Option<String> {
        self.state.read().await.address.clone()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// 当前活动链数据
    pub fn active_chain(&self) -> Result<ChainData, Error> {
        self.registry
            .chain_by_identifier(&self.registry.active_chain_identifier())
    }

    /// 是否存在可切换的目标链
    pub fn can_switch_network(&self) -> bool {
        self.registry.supported_chains().len() > 1
    }

    /// 除活动链外的受支持链，顺序与注册表一致
    pub fn switch_targets(&self) -> Vec<ChainData> {
        let active = self.registry.active_chain_identifier();
        self.registry
            .supported_chains()
            .into_iter()
            .filter(|c| c.identifier != active)
            .collect()
    }

    // ============ 连接请求风味 ============

    /// guest / 本地钱包连接（密码风味）
    pub async fn connect_guest(&self, password: &str) -> Result<String, Error> {
        let chain_id = self.active_chain()?.numeric_chain_id()?;
        let request = WalletConnection::guest(chain_id, password, self.options.use_smart_wallets);
        self.connect(request).await
    }

    /// OAuth 连接
    pub async fn connect_oauth(&self, auth_provider: AuthProvider) -> Result<String, Error> {
        let chain_id = self.active_chain()?.numeric_chain_id()?;
        let request =
            WalletConnection::oauth(chain_id, auth_provider, self.options.use_smart_wallets);
        self.connect(request).await
    }

    /// 邮箱 OTP 连接
    pub async fn connect_email(&self, email: &str) -> Result<String, Error> {
        let chain_id = self.active_chain()?.numeric_chain_id()?;
        let request = WalletConnection::email(chain_id, email, self.options.use_smart_wallets);
        self.connect(request).await
    }

    /// 外部钱包直连
    pub async fn connect_external(&self, provider: WalletProvider) -> Result<String, Error> {
        let chain_id = self.active_chain()?.numeric_chain_id()?;
        let request =
            WalletConnection::external(chain_id, provider, self.options.use_smart_wallets);
        self.connect(request).await
    }

    // ============ 工作流 ============

    /// 连接工作流
    ///
    /// 成功返回钱包地址并发布 `Connected`，失败回滚到 Disconnected
    /// 并发布 `ConnectionFailed`。post-connect 刷新失败不影响连接结果，
    /// 仅记录警告
    pub async fn connect(&self, request: WalletConnection) -> Result<String, Error> {
        let _guard = self
            .workflow
            .try_lock()
            .map_err(|_| Error::OperationInFlight)?;

        let selected = request.selected_provider();
        if !self.options.enabled_providers.contains(&selected) {
            return Err(Error::ProviderDisabled(selected));
        }

        {
            let mut state = self.state.write().await;
            if state.status != ConnectionStatus::Disconnected {
                return Err(Error::AlreadyConnected);
            }
            state.status = ConnectionStatus::Connecting;
            state.password = request.password.clone();
            state.last_error = None;
        }

        info!(provider = %request.provider, chain_id = %request.chain_id, "connecting wallet");
        self.events.publish(WalletEvent::ConnectionRequested {
            provider: request.provider,
            chain_id: request.chain_id.to_string(),
        });

        // UI 过渡宽限：让订阅者有机会在 SDK 可能立即返回前响应请求事件
        if !self.options.connect_grace.is_zero() {
            tokio::time::sleep(self.options.connect_grace).await;
        }

        match self.sdk.connect(&request).await {
            Ok(address) => {
                {
                    let mut state = self.state.write().await;
                    state.status = ConnectionStatus::Connected;
                    state.address = Some(address.clone());
                    state.provider = Some(request.provider);
                }

                match self.refresh().await {
                    Ok(snapshot) => {
                        info!(
                            address = %snapshot.address_short,
                            balance = %snapshot.balance_display,
                            network = %snapshot.network_label,
                            "wallet connected"
                        );
                    }
                    Err(err) => {
                        warn!(error = %err, "post-connect refresh failed");
                    }
                }

                self.events.publish(WalletEvent::Connected {
                    address: address.clone(),
                });
                Ok(address)
            }
            Err(sdk_err) => {
                {
                    let mut state = self.state.write().await;
                    state.status = ConnectionStatus::Disconnected;
                    state.address = None;
                    // 连接未建立，缓存的密码一并清除
                    state.password = None;
                    state.last_error = Some(sdk_err.to_string());
                }
                error!(error = %sdk_err, "wallet connect failed");
                self.events.publish(WalletEvent::ConnectionFailed {
                    reason: sdk_err.to_string(),
                });
                Err(Error::Connection(sdk_err))
            }
        }
    }

    /// 断开工作流
    ///
    /// 本地状态（地址、缓存密码）无条件先清空，SDK 断开尽力而为：
    /// 失败只记录日志，不回滚已清空的状态
    pub async fn disconnect(&self) -> Result<(), Error> {
        let _guard = self
            .workflow
            .try_lock()
            .map_err(|_| Error::OperationInFlight)?;

        {
            let mut state = self.state.write().await;
            if state.status != ConnectionStatus::Connected {
                return Err(Error::NotConnected);
            }
            state.clear();
        }

        debug!("disconnecting wallet");
        match self.sdk.disconnect().await {
            Ok(()) => {
                info!("wallet disconnected");
                self.events.publish(WalletEvent::Disconnected);
            }
            Err(err) => {
                error!(error = %err, "wallet disconnect failed, local state already cleared");
            }
        }
        Ok(())
    }

    /// 切链工作流
    ///
    /// 目标等于活动链时为 no-op（不调用 SDK，不发事件）。
    /// 失败时活动链指针与状态保持不变，切换被放弃，不重试
    pub async fn switch_network(&self, identifier: &str) -> Result<(), Error> {
        let _guard = self
            .workflow
            .try_lock()
            .map_err(|_| Error::OperationInFlight)?;

        // 切链仅在 Connected 状态下有定义，no-op 分支也不例外
        {
            let state = self.state.read().await;
            if state.status != ConnectionStatus::Connected {
                return Err(Error::NotConnected);
            }
        }

        let target = self.registry.chain_by_identifier(identifier)?;
        if target.identifier == self.registry.active_chain_identifier() {
            debug!(network = %target.identifier, "already on requested network");
            return Ok(());
        }
        let chain_id = target.numeric_chain_id()?;

        {
            let mut state = self.state.write().await;
            state.status = ConnectionStatus::SwitchingNetwork;
        }

        info!(network = %target.identifier, chain_id = %chain_id, "switching network");
        let result = self.sdk.switch_network(chain_id).await;

        // 无论成败都回到 Connected
        {
            let mut state = self.state.write().await;
            state.status = ConnectionStatus::Connected;
        }

        match result {
            Ok(()) => {
                self.registry
                    .set_active_chain_identifier(&target.identifier)?;
                info!(network = %target.identifier, "switched network");
                self.events.publish(WalletEvent::NetworkSwitched {
                    identifier: target.identifier.clone(),
                });

                // 余额与网络标签依赖活动链，切换后重新刷新
                if let Err(err) = self.refresh().await {
                    warn!(error = %err, "post-switch refresh failed");
                }
                Ok(())
            }
            Err(sdk_err) => {
                warn!(error = %sdk_err, network = %target.identifier, "could not switch network");
                Err(Error::SwitchNetwork(sdk_err))
            }
        }
    }

    /// 导出序列化钱包 JSON
    ///
    /// 仅在以 LocalWallet 作为主提供方连接时可用，使用连接时缓存的密码
    pub async fn export_wallet(&self) -> Result<String, Error> {
        let password = {
            let state = self.state.read().await;
            if state.status != ConnectionStatus::Connected {
                return Err(Error::NotConnected);
            }
            match state.provider {
                Some(provider) if provider.supports_export() => {}
                _ => return Err(Error::ExportUnavailable),
            }
            state.password.clone().ok_or(Error::ExportUnavailable)?
        };

        debug!("exporting wallet");
        let json = self.sdk.export(&password).await.map_err(Error::Export)?;
        info!("wallet exported");
        Ok(json)
    }

    /// post-connect 刷新：余额、缩写地址、网络标签
    ///
    /// 连接成功或切链成功后自动执行，也可由调用方主动触发
    pub async fn refresh(&self) -> Result<AccountSnapshot, Error> {
        let (address, provider) = {
            let state = self.state.read().await;
            let address = state.address.clone().ok_or(Error::NotConnected)?;
            let provider = state.provider.ok_or(Error::NotConnected)?;
            (address, provider)
        };

        let chain = self.active_chain()?;
        let balance = self.sdk.get_balance().await.map_err(Error::Balance)?;
        let balance_display = balance.display();

        Ok(AccountSnapshot {
            address_short: shorten_address(&address),
            address,
            balance,
            balance_display,
            provider,
            network_label: prettify_network(&chain.identifier),
            chain,
        })
    }
}
