//! Order executor trait definition.

use crate::error::ExecutionError;
use crate::types::{OrderAck, OrderRequest};
use async_trait::async_trait;

/// Trait for order execution.
///
/// The signal engine only supplies decisions; whoever implements this seam
/// owns submission. Execution failures never feed back into signal
/// computation and are never retried by the caller within a cycle.
#[async_trait]
pub trait OrderExecutor: Send + Sync {
    /// Submit a market order.
    async fn submit_market_order(&self, request: &OrderRequest)
        -> Result<OrderAck, ExecutionError>;

    /// Get the executor name.
    fn name(&self) -> &str;
}
