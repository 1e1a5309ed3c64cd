//! # Cart State
//!
//! Owns the in-memory cart, keeps it in sync with durable storage, and
//! hands out [`CartHandle`]s to views.
//!
//! ## Thread Safety
//! The cart lives in a `tokio::sync::watch` channel:
//! 1. Every mutation runs the reducer under the channel's lock, against the
//!    current state, so two quick taps can never compute from the same stale
//!    snapshot
//! 2. Readers borrow the latest value without waiting on I/O
//! 3. Subscribers are woken whenever the cart actually changes
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  View                CartHandle             Persistence worker          │
//! │  ────                ──────────             ──────────────────          │
//! │                                                                         │
//! │  add_to_cart() ────► apply(Add) ──┐                                     │
//! │  increment()   ────► apply(Inc) ──┼─► mpsc ──► coalesce ──► kv.set()   │
//! │  decrement()   ────► apply(Dec) ──┘   (in mutation order)               │
//! │                         │                                               │
//! │                         └──► watch ──► subscribers re-render            │
//! │                                                                         │
//! │  Mount ──► initialize(): kv.get(products key) ──► apply(Hydrate)        │
//! │                                                                         │
//! │  NOTE: Callers never wait on storage. Write failures are logged.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use market_core::validation::validate_product;
use market_core::{codec, CartAction, CartItem, CartProduct, CartState, CoreResult};
use market_db::KeyValueStore;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::{CartError, CartResult};
use crate::state::config::CartConfig;

// =============================================================================
// Store State
// =============================================================================

/// Value held by the watch channel.
///
/// `revision` counts user mutations. The initial load only applies while it
/// is still zero, so a slow read can't overwrite changes made meanwhile.
#[derive(Debug, Clone, Default)]
struct StoreState {
    cart: CartState,
    revision: u64,
}

/// Messages for the persistence worker.
#[derive(Debug)]
enum PersistMessage {
    /// A post-mutation snapshot to write.
    Snapshot(CartState),

    /// Acknowledge once everything queued before this has been written.
    Flush(oneshot::Sender<()>),

    /// Write whatever is pending, then stop.
    Shutdown,
}

// =============================================================================
// Cart Handle
// =============================================================================

/// The value injected into views: read access plus the three mutations.
///
/// Cloning is cheap; clones share one store.
#[derive(Debug, Clone)]
pub struct CartHandle {
    state: Arc<watch::Sender<StoreState>>,
    persist_tx: mpsc::UnboundedSender<PersistMessage>,
}

impl CartHandle {
    /// Returns the current cart lines in display order.
    pub fn products(&self) -> Vec<CartItem> {
        self.state.borrow().cart.items().to_vec()
    }

    /// Returns a copy of the whole cart.
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().cart.clone()
    }

    /// Adds one unit of `product`, refreshing its title, image and price if
    /// it is already in the cart.
    ///
    /// ## Errors
    /// [`market_core::CoreError::Validation`] for a blank id or title, or a
    /// negative or non-finite price. The cart is left unchanged.
    pub fn add_to_cart(&self, product: CartProduct) -> CoreResult<()> {
        debug!(id = %product.id, "add_to_cart");
        if let Err(e) = validate_product(&product) {
            warn!(id = %product.id, error = %e, "Rejected invalid product");
            return Err(e.into());
        }
        self.dispatch(CartAction::Add(product));
        Ok(())
    }

    /// Adds one unit to the line with `id`. Unknown ids are ignored.
    pub fn increment(&self, id: &str) {
        debug!(id = %id, "increment");
        self.dispatch(CartAction::Increment(id.to_string()));
    }

    /// Removes one unit from the line with `id`, never below one.
    /// Unknown ids are ignored.
    pub fn decrement(&self, id: &str) {
        debug!(id = %id, "decrement");
        self.dispatch(CartAction::Decrement(id.to_string()));
    }

    /// Subscribes to cart changes.
    pub fn subscribe(&self) -> CartSubscription {
        CartSubscription {
            rx: self.state.subscribe(),
        }
    }

    /// Waits until every change made before this call has been written
    /// (or has failed and been logged).
    ///
    /// ## Errors
    /// [`CartError::Unmounted`] once the provider has been unmounted.
    pub async fn flush(&self) -> CartResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.persist_tx
            .send(PersistMessage::Flush(ack_tx))
            .map_err(|_| CartError::Unmounted)?;
        ack_rx.await.map_err(|_| CartError::Unmounted)
    }

    /// Checks whether two handles point at the same store.
    pub fn same_store(&self, other: &CartHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Runs a user action through the reducer and queues the result.
    ///
    /// The snapshot is queued while the watch lock is held, so the worker
    /// sees snapshots in the same order the mutations happened.
    fn dispatch(&self, action: CartAction) -> bool {
        let persist_tx = &self.persist_tx;

        self.state.send_if_modified(|store| {
            if !store.cart.apply(action) {
                debug!("Cart unchanged, nothing to persist");
                return false;
            }
            store.revision += 1;
            enqueue(persist_tx, &store.cart);
            true
        })
    }

    /// Replaces the cart with the value loaded from `key`, unless a user
    /// mutation got there first.
    fn hydrate(&self, key: &str, cart: CartState, persist: bool) -> bool {
        let persist_tx = &self.persist_tx;
        let discarded = cart.item_count();
        let mut superseded = false;

        let changed = self.state.send_if_modified(|store| {
            if store.revision > 0 {
                superseded = true;
                return false;
            }
            if !store.cart.apply(CartAction::Hydrate(cart)) {
                return false;
            }
            if persist {
                enqueue(persist_tx, &store.cart);
            }
            true
        });

        if superseded {
            // The next write replaces the stored value for good.
            warn!(
                key = %key,
                discarded_items = discarded,
                "Cart changed before the stored cart finished loading; keeping in-memory cart"
            );
        }

        changed
    }
}

fn enqueue(persist_tx: &mpsc::UnboundedSender<PersistMessage>, cart: &CartState) {
    if persist_tx
        .send(PersistMessage::Snapshot(cart.clone()))
        .is_err()
    {
        warn!("Cart store unmounted; change kept in memory only");
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Receives a signal whenever the cart changes.
#[derive(Debug)]
pub struct CartSubscription {
    rx: watch::Receiver<StoreState>,
}

impl CartSubscription {
    /// Waits for the next change.
    ///
    /// ## Errors
    /// [`CartError::Unmounted`] once every handle to the store is gone.
    pub async fn changed(&mut self) -> CartResult<()> {
        self.rx.changed().await.map_err(|_| CartError::Unmounted)
    }

    /// Checks for an unseen change without waiting.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Returns the latest cart lines and marks them as seen.
    pub fn products(&mut self) -> Vec<CartItem> {
        self.rx.borrow_and_update().cart.items().to_vec()
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// A running cart store: the shared handle plus its background tasks.
#[derive(Debug)]
pub struct CartStore {
    handle: CartHandle,
    loader: Option<JoinHandle<()>>,
    worker: Option<JoinHandle<()>>,
}

impl CartStore {
    /// Starts a store backed by `kv`.
    ///
    /// Spawns the persistence worker and the initial load, so it must be
    /// called inside a Tokio runtime. The cart reads as empty until the load
    /// completes.
    pub fn start<S>(kv: Arc<S>, config: CartConfig) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let (state_tx, _) = watch::channel(StoreState::default());
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();

        let handle = CartHandle {
            state: Arc::new(state_tx),
            persist_tx,
        };

        let worker = PersistWorker {
            kv: Arc::clone(&kv),
            key: config.storage_key.clone(),
            rx: persist_rx,
        };

        info!(key = %config.storage_key, "Starting cart store");

        CartStore {
            loader: Some(tokio::spawn(initialize(kv, config, handle.clone()))),
            worker: Some(tokio::spawn(worker.run())),
            handle,
        }
    }

    /// Returns a handle to the store.
    pub fn handle(&self) -> CartHandle {
        self.handle.clone()
    }

    /// Waits for the initial load to finish. Returns immediately afterwards.
    pub async fn ready(&mut self) {
        if let Some(loader) = self.loader.take() {
            if let Err(e) = loader.await {
                error!(error = %e, "Cart load task failed");
            }
        }
    }

    /// Finishes the load, writes pending changes and stops the worker.
    ///
    /// Handles that outlive the store keep working in memory only.
    pub async fn shutdown(mut self) {
        self.ready().await;

        if self.handle.persist_tx.send(PersistMessage::Shutdown).is_err() {
            debug!("Persistence worker already stopped");
        }

        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.await {
                error!(error = %e, "Persistence worker task failed");
            }
        }

        info!("Cart store stopped");
    }
}

// =============================================================================
// Initial Load
// =============================================================================

/// Outcome of reading one storage key.
enum StoredCart {
    Found(CartState),
    Missing,
    Unusable,
}

/// Loads the persisted cart once, on mount.
///
/// ## Fallbacks
/// - products key missing → try the legacy key (if configured), and
///   re-persist what it holds under the products key
/// - unreadable or malformed → stay empty, log
async fn initialize<S>(kv: Arc<S>, config: CartConfig, handle: CartHandle)
where
    S: KeyValueStore,
{
    match read_cart(kv.as_ref(), &config.storage_key).await {
        StoredCart::Found(cart) => {
            let count = cart.item_count();
            if handle.hydrate(&config.storage_key, cart, false) {
                info!(items = count, "Loaded stored cart");
            }
        }
        StoredCart::Unusable => {}
        StoredCart::Missing => {
            let Some(legacy_key) = config.legacy_key.as_deref() else {
                debug!("No stored cart");
                return;
            };
            match read_cart(kv.as_ref(), legacy_key).await {
                StoredCart::Found(cart) => {
                    let count = cart.item_count();
                    if handle.hydrate(legacy_key, cart, true) {
                        info!(
                            items = count,
                            legacy_key = %legacy_key,
                            "Recovered cart from legacy key"
                        );
                    }
                }
                StoredCart::Missing => debug!("No stored cart"),
                StoredCart::Unusable => {}
            }
        }
    }
}

async fn read_cart<S>(kv: &S, key: &str) -> StoredCart
where
    S: KeyValueStore,
{
    let raw = match kv.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return StoredCart::Missing,
        Err(e) => {
            error!(key = %key, error = %e, "Failed to read stored cart");
            return StoredCart::Unusable;
        }
    };

    match codec::decode(&raw) {
        Ok(cart) => StoredCart::Found(cart),
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding malformed stored cart");
            StoredCart::Unusable
        }
    }
}

// =============================================================================
// Persistence Worker
// =============================================================================

/// Writes cart snapshots to storage, one at a time, in mutation order.
///
/// A burst of snapshots is coalesced into a single write of the newest one,
/// so the stored value always ends up equal to the last in-memory value.
struct PersistWorker<S> {
    kv: Arc<S>,
    key: String,
    rx: mpsc::UnboundedReceiver<PersistMessage>,
}

impl<S> PersistWorker<S>
where
    S: KeyValueStore,
{
    async fn run(mut self) {
        debug!(key = %self.key, "Persistence worker starting");

        while let Some(first) = self.rx.recv().await {
            let mut latest = None;
            let mut acks = Vec::new();
            let mut shutdown = false;

            let mut next = Some(first);
            while let Some(message) = next {
                match message {
                    PersistMessage::Snapshot(cart) => latest = Some(cart),
                    PersistMessage::Flush(ack) => acks.push(ack),
                    PersistMessage::Shutdown => shutdown = true,
                }
                next = self.rx.try_recv().ok();
            }

            if let Some(cart) = latest {
                self.write(&cart).await;
            }

            for ack in acks {
                // Caller may have stopped waiting.
                let _ = ack.send(());
            }

            if shutdown {
                break;
            }
        }

        debug!(key = %self.key, "Persistence worker stopped");
    }

    async fn write(&self, cart: &CartState) {
        let raw = match codec::encode(cart) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Failed to encode cart");
                return;
            }
        };

        match self.kv.set(&self.key, &raw).await {
            Ok(()) => debug!(key = %self.key, items = cart.item_count(), "Cart persisted"),
            Err(e) => error!(key = %self.key, error = %e, "Failed to persist cart"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
