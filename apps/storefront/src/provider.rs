//! # Provider
//!
//! Makes one cart store available to a subtree of views.
//!
//! A [`ViewScope`] is a node in the view tree holding typed values, the way
//! an app container holds managed state. A [`CartProvider`] starts a
//! [`CartStore`] and manages its handle on a scope; any descendant scope can
//! then reach it through [`use_cart`].
//!
//! ```text
//! root ViewScope ── CartProvider::mount ── manage(CartHandle)
//!    ├── child (product list)   use_cart → Ok(handle)
//!    └── child (cart screen)    use_cart → Ok(same handle)
//!
//! detached ViewScope            use_cart → Err(OutsideProvider)
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use market_db::KeyValueStore;
use tracing::{debug, info, warn};

use crate::error::{CartError, CartResult};
use crate::state::{CartConfig, CartHandle, CartStore};

// =============================================================================
// View Scope
// =============================================================================

type Values = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// A node in the view tree that can hold one value per type.
///
/// Cloning yields another reference to the same node.
#[derive(Clone, Default)]
pub struct ViewScope {
    inner: Arc<ScopeNode>,
}

#[derive(Default)]
struct ScopeNode {
    parent: Option<ViewScope>,
    values: RwLock<Values>,
}

impl ViewScope {
    /// Creates a root scope.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a child scope that can see this scope's values.
    pub fn child(&self) -> Self {
        ViewScope {
            inner: Arc::new(ScopeNode {
                parent: Some(self.clone()),
                values: RwLock::default(),
            }),
        }
    }

    /// Stores `value` on this scope. Returns `false` if it replaced an
    /// existing value of the same type.
    pub fn manage<T>(&self, value: T) -> bool
    where
        T: Any + Send + Sync,
    {
        self.inner
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), Arc::new(value))
            .is_none()
    }

    /// Removes the value of type `T` from this scope.
    pub fn unmanage<T>(&self) -> bool
    where
        T: Any + Send + Sync,
    {
        self.inner
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&TypeId::of::<T>())
            .is_some()
    }

    /// Finds the nearest value of type `T`, starting here and walking up.
    pub fn try_state<T>(&self) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let mut scope = Some(self);
        while let Some(current) = scope {
            let found = current
                .inner
                .values
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&TypeId::of::<T>())
                .cloned();
            if let Some(value) = found {
                return value.downcast::<T>().ok();
            }
            scope = current.inner.parent.as_ref();
        }
        None
    }
}

impl fmt::Debug for ViewScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self
            .inner
            .values
            .read()
            .map(|v| v.len())
            .unwrap_or_default();
        f.debug_struct("ViewScope")
            .field("values", &values)
            .field("has_parent", &self.inner.parent.is_some())
            .finish()
    }
}

// =============================================================================
// Cart Provider
// =============================================================================

/// Owns a running cart store and exposes it on a scope.
#[derive(Debug)]
pub struct CartProvider {
    scope: ViewScope,
    store: CartStore,
}

impl CartProvider {
    /// Starts a cart store and makes it visible to `scope` and its
    /// descendants. Loading the stored cart begins immediately.
    ///
    /// Mounting a second provider on the same scope replaces the first one's
    /// handle; nested providers on child scopes shadow outer ones.
    pub fn mount<S>(scope: &ViewScope, kv: Arc<S>, config: CartConfig) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let store = CartStore::start(kv, config);

        if !scope.manage(store.handle()) {
            warn!("Replaced an existing CartProvider on this scope");
        }
        info!("CartProvider mounted");

        CartProvider {
            scope: scope.clone(),
            store,
        }
    }

    /// Returns a handle to the provided store.
    pub fn handle(&self) -> CartHandle {
        self.store.handle()
    }

    /// Returns the scope this provider is mounted on.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Waits for the stored cart to finish loading.
    pub async fn ready(&mut self) {
        self.store.ready().await;
    }

    /// Removes the store from its scope and stops it after writing any
    /// pending changes.
    pub async fn unmount(self) {
        let ours = self.store.handle();
        let still_ours = self
            .scope
            .try_state::<CartHandle>()
            .is_some_and(|current| current.same_store(&ours));

        if still_ours {
            self.scope.unmanage::<CartHandle>();
        } else {
            debug!("Scope already holds another provider's cart; leaving it");
        }

        self.store.shutdown().await;
        info!("CartProvider unmounted");
    }
}

/// Returns the cart provided to `scope` or one of its ancestors.
///
/// ## Errors
/// [`CartError::OutsideProvider`] if no provider is mounted above `scope`.
pub fn use_cart(scope: &ViewScope) -> CartResult<CartHandle> {
    scope
        .try_state::<CartHandle>()
        .map(|handle| handle.as_ref().clone())
        .ok_or(CartError::OutsideProvider)
}
