//! Swappable reference to the host HTTP client

use crate::bridge::CallbackBridge;
use crate::exports::hostfetch_fetch_callback;
use crate::native::NativeAbi;
use crate::registry::BridgeRegistry;
use hostfetch_core::{BridgeConfig, BridgeError, BridgeResult, HttpClient};
use once_cell::sync::Lazy;
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Deferred construction of a host client
pub type ClientSupplier = Box<dyn FnOnce() -> Arc<dyn HttpClient> + Send>;

type LazyClient = Lazy<Arc<dyn HttpClient>, ClientSupplier>;

/// Slot contents, guarded by the slot's read/write lock
pub(crate) struct SlotState {
    client: Option<LazyClient>,
    registration: Option<u64>,
}

impl SlotState {
    /// The installed client, built on first use
    ///
    /// A supplier that panicked leaves the client poisoned; later calls panic
    /// again and are reported as failures by the bridge.
    pub(crate) fn client(&self) -> BridgeResult<&Arc<dyn HttpClient>> {
        self.client
            .as_ref()
            .map(Lazy::force)
            .ok_or(BridgeError::NotInstalled)
    }
}

/// Holder of the active host client and of the bridge registration
///
/// Fetches hold the read lock for their whole duration; [`set_client`]
/// takes the write lock, so a swap waits for in-flight fetches and a fetch
/// never sees a half-installed client.
///
/// The first `set_client` call registers a [`CallbackBridge`] in the
/// [`BridgeRegistry`] and installs it with the native runtime. Later calls
/// only replace the client. Create one slot per native runtime.
///
/// [`set_client`]: HttpClientSlot::set_client
pub struct HttpClientSlot {
    native: Arc<dyn NativeAbi>,
    config: BridgeConfig,
    state: RwLock<SlotState>,
}

impl HttpClientSlot {
    pub fn new(native: Arc<dyn NativeAbi>, config: BridgeConfig) -> Arc<Self> {
        Arc::new(Self {
            native,
            config,
            state: RwLock::new(SlotState {
                client: None,
                registration: None,
            }),
        })
    }

    /// Install a client built lazily by `supplier` on the first fetch
    pub fn set_client<F>(self: &Arc<Self>, supplier: F)
    where
        F: FnOnce() -> Arc<dyn HttpClient> + Send + 'static,
    {
        let supplier: ClientSupplier = Box::new(supplier);
        let mut state = self.state.write();
        state.client = Some(Lazy::new(supplier));

        if state.registration.is_none() {
            let handle = BridgeRegistry::global().register(CallbackBridge::new(Arc::clone(self)));
            self.native.install(handle, hostfetch_fetch_callback);
            state.registration = Some(handle);
            tracing::info!(handle, "fetch bridge installed with native runtime");
        } else {
            tracing::debug!("host client replaced");
        }
    }

    /// Install an already constructed client
    pub fn set_client_instance<C>(self: &Arc<Self>, client: C)
    where
        C: HttpClient + 'static,
    {
        let client: Arc<dyn HttpClient> = Arc::new(client);
        self.set_client(move || client);
    }

    /// The active client, building it if needed
    pub fn current_client(&self) -> BridgeResult<Arc<dyn HttpClient>> {
        self.state.read().client().map(Arc::clone)
    }

    /// Handle under which the bridge was registered, once installed
    pub fn registration_handle(&self) -> Option<u64> {
        self.state.read().registration
    }

    pub fn is_registered(&self) -> bool {
        self.registration_handle().is_some()
    }

    pub fn native(&self) -> &Arc<dyn NativeAbi> {
        &self.native
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub(crate) fn read_state(&self) -> RwLockReadGuard<'_, SlotState> {
        self.state.read()
    }
}
