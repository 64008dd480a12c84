//! Turns whatever a placement call produced into one [`OrderOutcome`].
//!
//! | input                                   | outcome                 |
//! |-----------------------------------------|-------------------------|
//! | `{ result: { txid: [id, ..] } }`        | `Confirmed(id)`         |
//! | `{ catched: true, id }`                 | `Uncertain(id)`         |
//! | `"<id>"`                                | `Uncertain(id)`         |
//! | transport error with a recovered id     | `Uncertain(id)`         |
//! | any other body                          | `Err(MalformedResponse)`|
//! | any other error                         | `Err(error)`            |

use serde_json::Value;

use super::wire::PlacementResponse;
use super::OrderOutcome;
use crate::error::{TraderError, TraderResult};
use crate::shared::OrderId;

/// Reconcile the final result of a placement.
///
/// Runs once, after the retry layer has finished; it never triggers another
/// attempt.
pub fn reconcile(raw: TraderResult<Value>) -> TraderResult<OrderOutcome> {
    let body = match raw {
        Ok(body) => body,
        Err(err) => {
            return match err.recovered_order_id() {
                Some(id) if !id.is_empty() => {
                    tracing::warn!(order_id = id, "Placement failed but order id was recovered: {}", err);
                    Ok(OrderOutcome::Uncertain(OrderId::new(id)))
                }
                _ => Err(err),
            };
        }
    };

    let response: PlacementResponse = serde_json::from_value(body)
        .map_err(|e| TraderError::MalformedResponse(format!("trade: {}", e)))?;

    match response {
        PlacementResponse::Object {
            catched: true,
            id: Some(id),
            ..
        } => {
            let id = OrderId::from(id);
            tracing::warn!(order_id = %id, "Placement timed out after the order was created");
            Ok(OrderOutcome::Uncertain(id))
        }
        PlacementResponse::Object {
            result: Some(result),
            ..
        } => result
            .txid
            .into_iter()
            .next()
            .map(|id| OrderOutcome::Confirmed(id.into()))
            .ok_or_else(|| TraderError::MalformedResponse("trade: empty txid list".into())),
        PlacementResponse::Bare(id) if !id.trim().is_empty() => {
            Ok(OrderOutcome::Uncertain(OrderId::new(id.trim())))
        }
        PlacementResponse::Bare(_) => {
            Err(TraderError::MalformedResponse("trade: empty order id".into()))
        }
        PlacementResponse::Object { .. } => Err(TraderError::MalformedResponse(
            "trade: no txid, caught id or order id in response".into(),
        )),
    }
}
