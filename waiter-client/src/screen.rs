//! Screen flow
//!
//! Which part of the ordering flow is active, and the events that move
//! between them. Business guards (non-empty cart, valid table) are checked
//! by the caller before an event is fired; this only knows which moves are
//! legal and where the session forces the flow back to.

use serde::Serialize;
use shared::ErrorCode;

use crate::error::{ClientError, ClientResult};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Device not activated yet
    AwaitingActivation,
    /// Waiter code or server missing
    AwaitingSession,
    AwaitingTable,
    Browsing,
    ReviewingOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Activated,
    SessionConfigured,
    /// Waiter or server was removed
    SessionCleared,
    TableEntered,
    ChangeTable,
    ProceedToReview,
    BackToMenu,
    OrderSubmitted,
}

impl Screen {
    /// Where the flow starts (or falls back to) for a given session
    pub fn initial(session: &Session) -> Self {
        if !session.activated {
            Self::AwaitingActivation
        } else if !session.is_configured() {
            Self::AwaitingSession
        } else {
            Self::AwaitingTable
        }
    }

    /// Whether menu and cart operations are allowed
    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::Browsing | Self::ReviewingOrder)
    }

    /// Apply an event
    ///
    /// Illegal moves return a validation error and leave the caller's
    /// state alone.
    pub fn next(self, event: ScreenEvent, session: &Session) -> ClientResult<Screen> {
        use Screen::*;
        use ScreenEvent::*;

        let next = match (self, event) {
            (AwaitingActivation, Activated) => Self::initial(session),
            // the home tab can be edited from anywhere
            (AwaitingActivation, SessionConfigured) => AwaitingActivation,
            (AwaitingSession, SessionConfigured) if session.is_configured() => AwaitingTable,
            (AwaitingSession, SessionConfigured) => AwaitingSession,
            (_, SessionCleared) => Self::initial(session),
            (AwaitingTable | Browsing | ReviewingOrder, SessionConfigured) => self,
            (AwaitingTable, TableEntered) => Browsing,
            (Browsing, ChangeTable) => AwaitingTable,
            (Browsing, ProceedToReview) => ReviewingOrder,
            (ReviewingOrder, BackToMenu) => Browsing,
            (ReviewingOrder, OrderSubmitted) => AwaitingTable,
            (from, event) => {
                tracing::debug!(?from, ?event, "Rejected screen transition");
                return Err(ClientError::Validation(ErrorCode::InvalidTransition));
            }
        };
        Ok(next)
    }
}
