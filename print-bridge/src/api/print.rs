//! Print command endpoint

use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use shared::models::{BridgeMessage, PrintQuery};
use tracing::{info, warn};

use crate::error::{BridgeError, BridgeResult};

pub const PRINT_RECEIVED: &str = "Print command received";

/// `GET /?command=print&company=..&productName=..&price=..`
///
/// Nothing is sent to a device; the label fields are only logged.
pub async fn print(
    query: Result<Query<PrintQuery>, QueryRejection>,
) -> BridgeResult<Json<BridgeMessage>> {
    let Query(query) = query.map_err(|e| {
        warn!(error = %e, "Unreadable bridge query");
        BridgeError::InvalidCommand
    })?;
    if !query.is_print() {
        warn!(command = ?query.command, "Rejected bridge command");
        return Err(BridgeError::InvalidCommand);
    }

    info!(
        company = query.company.as_deref().unwrap_or(""),
        product_name = query.product_name.as_deref().unwrap_or(""),
        price = query.price.as_deref().unwrap_or(""),
        "Print command received"
    );
    Ok(Json(BridgeMessage::new(PRINT_RECEIVED)))
}
