//! Process-lifetime registry of installed bridges

use crate::bridge::CallbackBridge;
use dashmap::DashMap;
use hostfetch_core::{BridgeError, BridgeResult};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static BRIDGE_REGISTRY: OnceCell<BridgeRegistry> = OnceCell::new();

/// Maps the handles given to native runtimes onto their bridges
///
/// A native runtime keeps only the numeric handle and may call back with it
/// at any time, so there is no removal: a registered bridge lives until the
/// process exits.
pub struct BridgeRegistry {
    bridges: DashMap<u64, Arc<CallbackBridge>>,
    next_id: AtomicU64,
}

impl BridgeRegistry {
    pub fn new() -> Self {
        Self {
            bridges: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Registry consulted by [`crate::hostfetch_fetch_callback`]
    pub fn global() -> &'static BridgeRegistry {
        BRIDGE_REGISTRY.get_or_init(BridgeRegistry::new)
    }

    /// Register a bridge, returning its handle (never 0)
    pub fn register(&self, bridge: CallbackBridge) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.bridges.insert(id, Arc::new(bridge));
        id
    }

    /// Look up a bridge by handle
    pub fn get(&self, id: u64) -> BridgeResult<Arc<CallbackBridge>> {
        self.bridges
            .get(&id)
            .map(|r| Arc::clone(r.value()))
            .ok_or(BridgeError::UnknownHandle(id))
    }

    pub fn contains(&self, id: u64) -> bool {
        self.bridges.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.bridges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bridges.is_empty()
    }
}

impl Default for BridgeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
