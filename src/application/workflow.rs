use crate::config::WorkflowConfig;
use crate::domain::collection::{ActionOutcome, CollectionRequest};
use crate::domain::ports::{ReceivableStore, ReceivableStoreBox};
use crate::domain::receivable::{PartnerId, Receivable};
use crate::error::{ReceivableError, Result};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Applies payment collections to partner receivables.
///
/// Each collection is a single read-check-write transaction against the store.
/// When the store reports a conflict the whole transaction is run again on
/// freshly read data, up to `max_retries` extra attempts.
pub struct CollectionWorkflow {
    store: ReceivableStoreBox,
    config: WorkflowConfig,
}

impl CollectionWorkflow {
    /// Creates a workflow with the default retry budget.
    pub fn new(store: ReceivableStoreBox) -> Self {
        Self::with_config(store, WorkflowConfig::default())
    }

    pub fn with_config(store: ReceivableStoreBox, config: WorkflowConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &dyn ReceivableStore {
        self.store.as_ref()
    }

    /// Collects `amount_collected` against the referenced receivable.
    ///
    /// Fails with `ValidationError` before touching the store when the request
    /// is malformed, and with `NotFound`, `InvalidState` or `InvalidAmount`
    /// when the current document does not allow the collection. Nothing is
    /// written on failure.
    #[tracing::instrument(
        skip(self, request),
        fields(receivable = %request.receivable_id, amount = %request.amount_collected)
    )]
    pub async fn collect_payment(&self, request: CollectionRequest) -> Result<()> {
        let (id, amount) = request.validate().inspect_err(|e| {
            warn!(error = %e, "rejected collection request");
        })?;

        let apply = |current: Option<Receivable>| -> Result<Receivable> {
            let mut receivable = current.ok_or_else(|| ReceivableError::NotFound(id.clone()))?;
            receivable.collect(amount)?;
            Ok(receivable)
        };

        let mut retries = 0;
        loop {
            match self.store.try_update(&id, &apply).await {
                Ok(updated) => {
                    info!(
                        pending = %updated.pending_amount(),
                        status = %updated.status(),
                        "payment collected"
                    );
                    return Ok(());
                }
                Err(ReceivableError::Conflict) if retries < self.config.max_retries => {
                    retries += 1;
                    debug!(retries, "transaction conflict, retrying");
                }
                Err(ReceivableError::Conflict) => {
                    warn!(retries, "giving up after repeated transaction conflicts");
                    return Err(ReceivableError::RetriesExhausted(retries));
                }
                Err(e) => {
                    warn!(error = %e, "collection failed");
                    return Err(e);
                }
            }
        }
    }

    /// [`collect_payment`](Self::collect_payment) folded into a success flag
    /// and an optional message.
    pub async fn collect_payment_outcome(&self, request: CollectionRequest) -> ActionOutcome {
        self.collect_payment(request).await.into()
    }

    /// Pending receivables owed by `partner_id`, in no particular order.
    ///
    /// Store failures are logged and reported as an empty list. Use
    /// [`try_list_pending_receivables`](Self::try_list_pending_receivables)
    /// to tell the two apart.
    pub async fn list_pending_receivables(&self, partner_id: &str) -> Vec<Receivable> {
        match self.try_list_pending_receivables(partner_id).await {
            Ok(receivables) => receivables,
            Err(e) => {
                warn!(partner = partner_id, error = %e, "failed to list pending receivables");
                Vec::new()
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn try_list_pending_receivables(&self, partner_id: &str) -> Result<Vec<Receivable>> {
        let partner_id = PartnerId::new(partner_id)?;
        let receivables = self.store.find_pending_by_partner(&partner_id).await?;
        debug!(count = receivables.len(), "listed pending receivables");
        Ok(receivables)
    }

    /// Sum of the balances still owed by `partner_id`.
    ///
    /// Fails with `ValidationError` when the sum leaves the `Decimal` range.
    pub async fn pending_total(&self, partner_id: &str) -> Result<Decimal> {
        self.try_list_pending_receivables(partner_id)
            .await?
            .iter()
            .try_fold(Decimal::ZERO, |total, r| total.checked_add(r.pending_amount()))
            .ok_or_else(|| {
                ReceivableError::ValidationError(format!(
                    "Pending total of partner {partner_id} is out of range"
                ))
            })
    }
}
