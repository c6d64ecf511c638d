//! Session store
//!
//! Holds device activation state, waiter identity, backend endpoint and
//! device identifier. The [`Session`] value is loaded once at startup and
//! passed explicitly to whatever needs it; every change goes back to
//! durable storage through [`SessionStore`].

use shared::ErrorCode;
use shared::util::is_blank;

use crate::error::{ClientError, ClientResult};
use crate::http::Endpoint;
use crate::store::{KeyValueStore, get_json, keys, set_json};

/// Table number used before staff enters one
pub const DEFAULT_TABLE: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub activated: bool,
    pub waiter_id: Option<String>,
    pub table_number: String,
    /// Backend host as entered (see [`Endpoint::parse`])
    pub endpoint: String,
    device_id: String,
}

impl Session {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            activated: false,
            waiter_id: None,
            table_number: DEFAULT_TABLE.to_string(),
            endpoint: String::new(),
            device_id: device_id.into(),
        }
    }

    /// Install-wide device identifier, fixed at first launch
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Endpoint and waiter are both present
    pub fn is_configured(&self) -> bool {
        !is_blank(&self.endpoint) && self.waiter_id.as_deref().is_some_and(|w| !is_blank(w))
    }

    pub fn endpoint(&self) -> ClientResult<Endpoint> {
        Endpoint::parse(&self.endpoint)
    }

    pub fn waiter_id(&self) -> ClientResult<&str> {
        self.waiter_id
            .as_deref()
            .filter(|w| !is_blank(w))
            .ok_or(ClientError::Config(ErrorCode::WaiterMissing))
    }

    /// Endpoint to use for menu and cart operations
    ///
    /// Fails with a configuration error unless both endpoint and waiter
    /// are set.
    pub fn require_configured(&self) -> ClientResult<Endpoint> {
        let endpoint = self.endpoint()?;
        self.waiter_id()?;
        Ok(endpoint)
    }

    /// Table number as sent to the backend
    pub fn table_number(&self) -> ClientResult<i64> {
        parse_table_number(&self.table_number)
    }
}

/// Parse a table number as typed on the table screen
pub fn parse_table_number(value: &str) -> ClientResult<i64> {
    let table = value.trim();
    if table.is_empty() {
        return Err(ClientError::Config(ErrorCode::TableMissing));
    }
    table
        .parse()
        .map_err(|_| ClientError::Validation(ErrorCode::InvalidTableNumber))
}

/// Load/save boundary between [`Session`] and durable storage
pub struct SessionStore;

impl SessionStore {
    /// Load the session, generating and persisting the device id on first run
    pub fn load<S: KeyValueStore + ?Sized>(store: &mut S) -> ClientResult<Session> {
        let device_id = match read_string(&*store, keys::DEVICE_ID)? {
            Some(id) if !is_blank(&id) => id,
            _ => {
                let id = uuid::Uuid::new_v4().to_string();
                set_json(store, keys::DEVICE_ID, &id)?;
                tracing::info!(device_id = %id, "Generated new device id");
                id
            }
        };

        let mut session = Session::new(device_id);
        session.waiter_id = read_string(&*store, keys::WAITER_CODE)?.filter(|w| !is_blank(w));
        session.endpoint = read_string(&*store, keys::SERVER_HOST)?.unwrap_or_default();
        session.activated = match get_json::<bool, _>(&*store, keys::PERMISSION_MENU) {
            Ok(flag) => flag.unwrap_or(false),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable activation flag");
                false
            }
        };

        tracing::debug!(
            activated = session.activated,
            configured = session.is_configured(),
            "Session loaded"
        );
        Ok(session)
    }

    /// Save waiter code and server host
    ///
    /// Each non-blank value is trimmed and persisted independently; blank
    /// values leave the current setting untouched.
    pub fn configure<S: KeyValueStore + ?Sized>(
        store: &mut S,
        session: &mut Session,
        waiter_code: &str,
        server_host: &str,
    ) -> ClientResult<()> {
        let waiter_code = waiter_code.trim();
        if !waiter_code.is_empty() {
            set_json(store, keys::WAITER_CODE, waiter_code)?;
            session.waiter_id = Some(waiter_code.to_string());
        }

        let server_host = server_host.trim();
        if !server_host.is_empty() {
            // reject values we could never build a URL from
            Endpoint::parse(server_host)?;
            set_json(store, keys::SERVER_HOST, server_host)?;
            session.endpoint = server_host.to_string();
        }

        tracing::info!(configured = session.is_configured(), "Session configuration saved");
        Ok(())
    }

    /// Forget the waiter code ("change user")
    pub fn clear_waiter<S: KeyValueStore + ?Sized>(
        store: &mut S,
        session: &mut Session,
    ) -> ClientResult<()> {
        store.remove(keys::WAITER_CODE)?;
        session.waiter_id = None;
        Ok(())
    }

    /// Forget the server host ("change server")
    pub fn clear_endpoint<S: KeyValueStore + ?Sized>(
        store: &mut S,
        session: &mut Session,
    ) -> ClientResult<()> {
        store.remove(keys::SERVER_HOST)?;
        session.endpoint.clear();
        Ok(())
    }

    /// Persist the activation flag
    pub fn save_activation<S: KeyValueStore + ?Sized>(
        store: &mut S,
        session: &Session,
    ) -> ClientResult<()> {
        set_json(store, keys::PERMISSION_MENU, &session.activated)
    }
}

/// Read a string value, accepting legacy unquoted values
fn read_string<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> ClientResult<Option<String>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str::<String>(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(_) => Ok(Some(raw)),
    }
}
