//! Order submission builder
//!
//! Projects the cart and session into the `POST /order/save` payload.
//! Submission is at-most-once with manual retry: nothing is retried
//! automatically and no idempotency key is sent, so retrying after an
//! ambiguous failure (e.g. a timeout the backend did process) can create a
//! duplicate order.

use shared::util::is_blank;
use shared::{ErrorCode, Order, OrderAck, OrderLine};

use crate::cart::Cart;
use crate::error::{ClientError, ClientResult};
use crate::http::{Endpoint, HttpClient};
use crate::session::Session;

/// Build the order payload
///
/// Validation happens here, before any network traffic. Each line keeps
/// the category the item had when it was added to the cart.
pub fn build_order(cart: &Cart, session: &Session, customer_name: &str) -> ClientResult<Order> {
    if is_blank(customer_name) {
        return Err(ClientError::Validation(ErrorCode::CustomerNameRequired));
    }
    if cart.total_quantity() == 0 {
        return Err(ClientError::Validation(ErrorCode::CartEmpty));
    }

    Ok(Order {
        waiter_id: session.waiter_id()?.to_string(),
        table_number: session.table_number()?,
        customer_name: customer_name.trim().to_string(),
        lines: cart.entries().iter().map(OrderLine::from).collect(),
    })
}

/// Send the order
///
/// Any failure (transport or non-success status) is returned untouched;
/// the caller keeps its cart for a manual retry.
pub async fn submit_order<H: HttpClient + ?Sized>(
    http: &H,
    endpoint: &Endpoint,
    order: &Order,
) -> ClientResult<OrderAck> {
    tracing::debug!(
        table = order.table_number,
        lines = order.lines.len(),
        units = order.total_quantity(),
        "Submitting order"
    );

    match http.post(&endpoint.order_url(), order).await {
        Ok(body) => {
            tracing::info!(table = order.table_number, units = order.total_quantity(), "Order submitted");
            Ok(OrderAck::new(body))
        }
        Err(e) => {
            tracing::warn!(table = order.table_number, error = %e, "Order submission failed");
            Err(e)
        }
    }
}
