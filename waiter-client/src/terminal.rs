//! Waiter terminal
//!
//! The object the rendering layer drives. It owns the session, menu
//! cache, cart and current screen, receives user intents as method calls
//! and hands back derived view data. Every failing intent leaves state as
//! it was.

use std::sync::Arc;

use serde::Serialize;
use shared::{CategoryFilter, ErrorCode, MenuItem, OrderAck};

use crate::activation::{self, ActivationResult};
use crate::cart::Cart;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{HttpClient, NetworkHttpClient};
use crate::menu::{MenuCache, MenuFilter};
use crate::screen::{Screen, ScreenEvent};
use crate::session::{DEFAULT_TABLE, Session, SessionStore, parse_table_number};
use crate::store::KeyValueStore;
use crate::submission;

/// One row of the menu list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuRow {
    pub item: MenuItem,
    /// Units of this code in the cart, across all notes
    pub in_cart: u32,
}

/// Derived data for the browse screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView {
    pub rows: Vec<MenuRow>,
    pub total_quantity: u32,
    /// "Proceed to order" button state
    pub can_proceed: bool,
}

/// Terminal backed by the real network client
pub type NetworkTerminal = WaiterTerminal<NetworkHttpClient, Box<dyn KeyValueStore>>;

pub struct WaiterTerminal<H, S> {
    http: H,
    store: S,
    session: Session,
    menu: MenuCache,
    menu_filter: MenuFilter,
    cart: Cart,
    customer_name: String,
    screen: Screen,
}

impl NetworkTerminal {
    /// Open a terminal from configuration
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let http = config.build_http_client()?;
        let store = config.open_store()?;
        Self::open(http, store)
    }
}

impl<H: HttpClient, S: KeyValueStore> WaiterTerminal<H, S> {
    /// Load session and cached menu from storage
    pub fn open(http: H, mut store: S) -> ClientResult<Self> {
        let session = SessionStore::load(&mut store)?;
        let menu = MenuCache::open(&store);
        let screen = Screen::initial(&session);

        tracing::info!(
            device_id = %session.device_id(),
            ?screen,
            cached_items = menu.len(),
            "Waiter terminal opened"
        );

        Ok(Self {
            http,
            store,
            session,
            menu,
            menu_filter: MenuFilter::default(),
            cart: Cart::new(),
            customer_name: String::new(),
            screen,
        })
    }

    // ========== Accessors ==========

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn device_id(&self) -> &str {
        self.session.device_id()
    }

    /// Current cart snapshot
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn menu_items(&self) -> Arc<[MenuItem]> {
        self.menu.items()
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn fire(&mut self, event: ScreenEvent) -> ClientResult<()> {
        let next = self.screen.next(event, &self.session)?;
        if next != self.screen {
            tracing::debug!(from = ?self.screen, to = ?next, ?event, "Screen changed");
        }
        self.screen = next;
        Ok(())
    }

    fn require_screen(&self, screen: Screen) -> ClientResult<()> {
        if self.screen != screen {
            return Err(ClientError::Validation(ErrorCode::InvalidTransition));
        }
        Ok(())
    }

    // ========== Activation & session ==========

    pub async fn activate(&mut self) -> ActivationResult {
        let result = activation::activate(&self.http, &mut self.store, &mut self.session).await;
        if result.is_activated() && self.screen == Screen::AwaitingActivation {
            if let Err(e) = self.fire(ScreenEvent::Activated) {
                tracing::warn!(error = %e, "Activation did not advance the screen");
            }
        }
        result
    }

    /// Save waiter code and server host entered on the home screen
    pub fn configure(&mut self, waiter_code: &str, server_host: &str) -> ClientResult<()> {
        SessionStore::configure(&mut self.store, &mut self.session, waiter_code, server_host)?;
        self.fire(ScreenEvent::SessionConfigured)
    }

    /// "Change user": forget the waiter code
    pub fn change_waiter(&mut self) -> ClientResult<()> {
        SessionStore::clear_waiter(&mut self.store, &mut self.session)?;
        self.fire(ScreenEvent::SessionCleared)
    }

    /// "Change server": forget the backend host
    pub fn change_server(&mut self) -> ClientResult<()> {
        SessionStore::clear_endpoint(&mut self.store, &mut self.session)?;
        self.fire(ScreenEvent::SessionCleared)
    }

    // ========== Table ==========

    pub fn enter_table(&mut self, table_number: &str) -> ClientResult<()> {
        self.require_screen(Screen::AwaitingTable)?;
        self.session.require_configured()?;
        parse_table_number(table_number)?;

        self.session.table_number = table_number.trim().to_string();
        self.fire(ScreenEvent::TableEntered)?;
        tracing::info!(table = %self.session.table_number, "Table selected");
        Ok(())
    }

    /// Go back to table entry; the cart belongs to the old table and is dropped
    pub fn change_table(&mut self) -> ClientResult<()> {
        self.fire(ScreenEvent::ChangeTable)?;
        self.cart = self.cart.clear();
        self.customer_name.clear();
        self.session.table_number = DEFAULT_TABLE.to_string();
        Ok(())
    }

    // ========== Menu ==========

    /// Refresh the menu automatically if nothing is cached yet
    ///
    /// Call on entering the browse screen. `Ok(false)` means the cached
    /// menu is shown as-is.
    pub async fn load_menu(&mut self) -> ClientResult<bool> {
        self.require_activated()?;
        let endpoint = self.session.require_configured()?;
        self.menu
            .ensure_loaded(&self.http, &mut self.store, &endpoint)
            .await
    }

    /// Explicit refresh; on error the stale menu stays on screen
    pub async fn refresh_menu(&mut self) -> ClientResult<usize> {
        self.require_activated()?;
        let endpoint = self.session.require_configured()?;
        let items = self
            .menu
            .refresh(&self.http, &mut self.store, &endpoint)
            .await?;
        Ok(items.len())
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.menu_filter.category = category;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.menu_filter.search = text.into();
    }

    /// Filtered menu with cart badges, recomputed from the current snapshots
    pub fn menu_view(&self) -> MenuView {
        let items = self.menu.items();
        let rows = self
            .menu_filter
            .apply(&items)
            .map(|item| MenuRow {
                in_cart: self.cart.quantity_for_code(&item.code),
                item: item.clone(),
            })
            .collect();
        let total_quantity = self.cart.total_quantity();

        MenuView {
            rows,
            total_quantity,
            can_proceed: total_quantity > 0,
        }
    }

    // ========== Cart ==========

    fn require_activated(&self) -> ClientResult<()> {
        if !self.session.activated {
            return Err(ClientError::Activation(ErrorCode::NotActivated));
        }
        Ok(())
    }

    fn require_ordering(&self) -> ClientResult<()> {
        self.require_activated()?;
        self.session.require_configured()?;
        if !self.screen.is_ordering() {
            return Err(ClientError::Validation(ErrorCode::InvalidTransition));
        }
        Ok(())
    }

    /// Confirm the entry dialog for `code`
    pub fn add_item(&mut self, code: &str, note: &str, quantity: u32) -> ClientResult<()> {
        self.require_screen(Screen::Browsing)?;
        self.require_ordering()?;
        let item = self
            .menu
            .find(code)
            .ok_or(ClientError::Validation(ErrorCode::ItemNotFound))?;

        self.cart = self.cart.add_or_merge(item, note, quantity)?;
        tracing::debug!(code = %code, note = %note, quantity, total = self.cart.total_quantity(), "Item added");
        Ok(())
    }

    /// The "−" button on a menu row
    pub fn decrement_item(&mut self, code: &str) -> ClientResult<()> {
        self.require_screen(Screen::Browsing)?;
        self.require_ordering()?;
        self.cart = self.cart.decrement(code);
        Ok(())
    }

    pub fn clear_cart(&mut self) -> ClientResult<()> {
        self.require_ordering()?;
        self.cart = self.cart.clear();
        Ok(())
    }

    // ========== Review & submission ==========

    pub fn proceed_to_review(&mut self) -> ClientResult<()> {
        self.require_ordering()?;
        if self.cart.total_quantity() == 0 {
            return Err(ClientError::Validation(ErrorCode::CartEmpty));
        }
        self.fire(ScreenEvent::ProceedToReview)
    }

    pub fn back_to_menu(&mut self) -> ClientResult<()> {
        self.fire(ScreenEvent::BackToMenu)
    }

    /// Review-screen +/- on the line at `index` (never below 1)
    pub fn adjust_line(&mut self, index: usize, delta: i64) -> ClientResult<()> {
        self.require_screen(Screen::ReviewingOrder)?;
        self.cart = self.cart.adjust_line(index, delta)?;
        Ok(())
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    /// Build and send the order
    ///
    /// On success the cart and customer name are cleared and the flow
    /// returns to table entry. On any failure nothing changes, so the
    /// waiter can retry as-is.
    pub async fn submit_order(&mut self) -> ClientResult<OrderAck> {
        self.require_screen(Screen::ReviewingOrder)?;
        let endpoint = self.session.require_configured()?;
        let order = submission::build_order(&self.cart, &self.session, &self.customer_name)?;

        let ack = submission::submit_order(&self.http, &endpoint, &order).await?;

        self.fire(ScreenEvent::OrderSubmitted)?;
        self.cart = self.cart.clear();
        self.customer_name.clear();
        self.session.table_number = DEFAULT_TABLE.to_string();
        Ok(ack)
    }
}
