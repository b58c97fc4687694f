use std::sync::Arc;
use log::{debug, error};
use tokio::sync::{Mutex, RwLock};
use crate::server::lifecycle::menu::Menu;
use crate::server::lifecycle::OrderLifecycle;
use crate::server::store::Store;

/// Shared handles to the registry, the menu and the optional data file.
///
/// Handlers that need both take the menu lock first.
#[derive(Clone)]
pub(crate) struct AppState {
    lifecycle: Arc<Mutex<OrderLifecycle>>,
    menu: Arc<RwLock<Menu>>,
    store: Option<Arc<Mutex<Store>>>,
}

impl AppState {
    pub fn new(lifecycle: OrderLifecycle, menu: Menu) -> Self {
        Self {
            lifecycle: Arc::new(Mutex::new(lifecycle)),
            menu: Arc::new(RwLock::new(menu)),
            store: None,
        }
    }

    pub fn with_store(mut self, store: Store) -> Self {
        self.store = Some(Arc::new(Mutex::new(store)));
        self
    }

    pub fn lifecycle(&self) -> &Mutex<OrderLifecycle> {
        &self.lifecycle
    }

    pub fn menu(&self) -> &RwLock<Menu> {
        &self.menu
    }

    /// Writes the current registry and menu to the data file, if one is configured.
    ///
    /// Callers must not hold the menu or registry lock. A failed write is logged and
    /// the in-memory state stays authoritative.
    pub async fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        let store = store.lock().await;
        let menu = self.menu.read().await;
        let lifecycle = self.lifecycle.lock().await;
        match store.save(&lifecycle, &menu) {
            Ok(()) => debug!("snapshot written to {}", store.path().display()),
            Err(e) => error!("failed to write snapshot to {}, {:#}", store.path().display(), e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::server::lifecycle::menu::PriceList;
    use crate::server::lifecycle::status::WrapPolicy;

    #[actix_web::test]
    async fn clones_share_the_registry() {
        let state = AppState::new(OrderLifecycle::with_tables(WrapPolicy::Cycle, 2), Menu::sample());
        let other = state.clone();
        other.lifecycle().lock().await.seat(1, 2).unwrap();
        assert!(state.lifecycle().lock().await.table(1).unwrap().occupied);
        assert_eq!(state.menu().read().await.unit_price("naan"), Some(50));
    }

    #[actix_web::test]
    async fn persist_writes_the_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order_desk_data.json");
        let state = AppState::new(OrderLifecycle::with_tables(WrapPolicy::Cycle, 2), Menu::sample())
            .with_store(Store::new(&path));
        state.lifecycle().lock().await.seat(2, 5).unwrap();
        state.persist().await;

        let snapshot = Store::new(&path).load().unwrap().unwrap();
        assert_eq!(snapshot.lifecycle.table(2).unwrap().guests, Some(5));
        assert_eq!(snapshot.menu.unit_price("naan"), Some(50));
    }

    #[actix_web::test]
    async fn persist_without_a_store_does_nothing() {
        let state = AppState::new(OrderLifecycle::with_tables(WrapPolicy::Cycle, 2), Menu::sample());
        state.persist().await;
        assert_eq!(state.lifecycle().lock().await.tables().len(), 2);
    }
}
