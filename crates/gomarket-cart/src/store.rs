//! Cart state manager mirrored to a key-value store.
//!
//! The in-memory [`Cart`] is the source of truth. Every mutation updates it
//! under one lock and, in the same critical section, queues a full JSON
//! snapshot for a single background writer. The writer drains the queue in
//! order, so an older snapshot can never land after a newer one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gomarket_storage::{JsonStore, KeyValueStore, SharedStore, StorageError};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use crate::cart::{Cart, LineItem, ProductDescriptor};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::ProductId;

/// Work items for the background writer.
enum WriterCommand {
    /// Persist a full snapshot.
    Persist { revision: u64, snapshot: String },
    /// Acknowledge once everything queued before it has been attempted.
    Flush(oneshot::Sender<()>),
}

/// Whether the initial load has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Created; mutations stay in memory until the load completes.
    Loading,
    /// Loaded; every mutation queues a write.
    Ready,
}

struct State {
    cart: Cart,
    phase: Phase,
    /// Set by any mutation applied while still loading.
    dirty: bool,
    revision: u64,
}

struct Inner {
    state: Mutex<State>,
    store: SharedStore,
    key: String,
    writes: mpsc::UnboundedSender<WriterCommand>,
    changes: watch::Sender<Vec<LineItem>>,
}

/// Shopping cart state manager.
///
/// Cheap to clone; clones share the same cart. Mutations never fail and
/// never block on storage.
///
/// # Example
///
/// ```rust,ignore
/// use gomarket_cart::prelude::*;
/// use gomarket_storage::MemoryStore;
///
/// let cart = CartStore::open(MemoryStore::new(), &CartConfig::default()).await?;
/// cart.add_to_cart(ProductDescriptor::new("A", "Tee", "https://img/a", 10.0));
/// cart.increment(&ProductId::new("A"));
/// cart.flush().await;
/// ```
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

impl CartStore {
    /// Create an empty store and start its background writer.
    ///
    /// Nothing is written until [`initialize`](Self::initialize) completes;
    /// until then mutations only touch memory. Prefer [`open`](Self::open)
    /// unless the load has to run separately. Must be called from within a
    /// Tokio runtime.
    pub fn new<S>(store: S, config: &CartConfig) -> Result<Self, CartError>
    where
        S: KeyValueStore + 'static,
    {
        config.validate()?;
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| CartError::NoRuntime)?;

        let store: SharedStore = Arc::new(store);
        let key = config.storage_key();
        let (writes, queue) = mpsc::unbounded_channel();
        let (changes, _) = watch::channel(Vec::new());

        runtime.spawn(run_writer(store.clone(), key.clone(), queue));

        Ok(Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    cart: Cart::new(),
                    phase: Phase::Loading,
                    dirty: false,
                    revision: 0,
                }),
                store,
                key,
                writes,
                changes,
            }),
        })
    }

    /// Create a store and load its persisted state.
    pub async fn open<S>(store: S, config: &CartConfig) -> Result<Self, CartError>
    where
        S: KeyValueStore + 'static,
    {
        let cart = Self::new(store, config)?;
        cart.initialize().await;
        Ok(cart)
    }

    /// Load the persisted cart.
    ///
    /// A stored snapshot replaces the empty cart. A missing key, a failed
    /// read, or malformed data leaves the cart as it is. If mutations were
    /// applied while loading, the loaded items become the base and the
    /// early items are merged on top, then the result is persisted once.
    ///
    /// Calling this again after a completed load does nothing.
    pub async fn initialize(&self) {
        if self.lock().phase == Phase::Ready {
            debug!(key = %self.inner.key, "cart already initialized");
            return;
        }

        let key = &self.inner.key;
        let loaded = match self.load().await {
            Ok(Some(cart)) => Some(cart),
            Ok(None) => {
                debug!(%key, "no persisted cart");
                None
            }
            Err(CartError::Storage(StorageError::SerializeError(e))) => {
                warn!(%key, error = %e, "ignoring malformed persisted cart");
                None
            }
            Err(e) => {
                warn!(%key, error = %e, "failed to read persisted cart");
                None
            }
        };

        let mut state = self.lock();
        if state.phase == Phase::Ready {
            return;
        }
        state.phase = Phase::Ready;

        let early = std::mem::take(&mut state.cart);
        let had_early = state.dirty;
        state.cart = loaded.unwrap_or_default();
        if had_early {
            state.cart.merge(early);
            self.enqueue_write(&mut state);
        }
        state.dirty = false;

        info!(
            key = %self.inner.key,
            items = state.cart.len(),
            merged_early_mutations = had_early,
            "cart initialized"
        );
        self.notify(&state);
    }

    /// Add one unit of a product.
    ///
    /// An item already in the cart keeps its original title, image and price.
    pub fn add_to_cart(&self, product: ProductDescriptor) {
        let mut state = self.lock();
        let product_id = product.id.clone();
        let quantity = state.cart.add(product);
        debug!(%product_id, quantity, "added to cart");
        self.after_mutation(&mut state);
    }

    /// Add one unit to an item already in the cart. Unknown ids are ignored.
    pub fn increment(&self, id: &ProductId) {
        let mut state = self.lock();
        match state.cart.increment(id) {
            Some(quantity) => debug!(product_id = %id, quantity, "incremented"),
            None => debug!(product_id = %id, "increment ignored, not in cart"),
        }
        self.after_mutation(&mut state);
    }

    /// Remove one unit from an item, dropping it when it reaches zero.
    /// Unknown ids are ignored.
    pub fn decrement(&self, id: &ProductId) {
        let mut state = self.lock();
        match state.cart.decrement(id) {
            Some(0) => debug!(product_id = %id, "removed from cart"),
            Some(quantity) => debug!(product_id = %id, quantity, "decremented"),
            None => debug!(product_id = %id, "decrement ignored, not in cart"),
        }
        self.after_mutation(&mut state);
    }

    /// Whether the initial load has completed and mutations are persisted.
    pub fn is_initialized(&self) -> bool {
        self.lock().phase == Phase::Ready
    }

    /// Snapshot of the line items in cart order.
    pub fn products(&self) -> Vec<LineItem> {
        self.lock().cart.items().to_vec()
    }

    /// Get a copy of one line item.
    pub fn get(&self, id: &ProductId) -> Option<LineItem> {
        self.lock().cart.get(id).cloned()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.lock().cart.item_count()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.lock().cart.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().cart.is_empty()
    }

    /// Storage key this cart persists under.
    pub fn storage_key(&self) -> &str {
        &self.inner.key
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver is notified with a fresh snapshot after the initial load
    /// and after every mutation call, including ones that matched nothing.
    /// Release a `borrow()` of the receiver before calling back into the store.
    pub fn subscribe(&self) -> watch::Receiver<Vec<LineItem>> {
        self.inner.changes.subscribe()
    }

    /// Wait until every write queued before this call has been attempted.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.inner.writes.send(WriterCommand::Flush(done)).is_err() {
            return;
        }
        let _ = wait.await;
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn after_mutation(&self, state: &mut State) {
        match state.phase {
            Phase::Loading => {
                if !state.dirty {
                    warn!(
                        key = %self.inner.key,
                        "cart not initialized, mutations stay in memory until initialize"
                    );
                }
                state.dirty = true;
            }
            Phase::Ready => self.enqueue_write(state),
        }
        self.notify(state);
    }

    fn enqueue_write(&self, state: &mut State) {
        let snapshot = match serde_json::to_string(&state.cart) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(key = %self.inner.key, error = %e, "failed to serialize cart");
                return;
            }
        };

        state.revision += 1;
        let command = WriterCommand::Persist {
            revision: state.revision,
            snapshot,
        };
        if self.inner.writes.send(command).is_err() {
            warn!(key = %self.inner.key, "cart writer stopped, snapshot dropped");
        }
    }

    fn notify(&self, state: &State) {
        self.inner.changes.send_replace(state.cart.items().to_vec());
    }

    async fn load(&self) -> Result<Option<Cart>, CartError> {
        let items: Option<Vec<LineItem>> = self.inner.store.get_json(&self.inner.key).await?;
        Ok(items.map(Cart::from_items))
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("phase", &state.phase)
            .field("items", &state.cart.len())
            .finish()
    }
}

/// Drain the write queue in order until every sender is gone.
async fn run_writer(
    store: SharedStore,
    key: String,
    mut queue: mpsc::UnboundedReceiver<WriterCommand>,
) {
    while let Some(command) = queue.recv().await {
        match command {
            WriterCommand::Persist { revision, snapshot } => {
                match store.set(&key, snapshot).await {
                    Ok(()) => debug!(%key, revision, "cart persisted"),
                    Err(e) => error!(%key, revision, error = %e, "failed to persist cart"),
                }
            }
            WriterCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!(%key, "cart writer stopped");
}
