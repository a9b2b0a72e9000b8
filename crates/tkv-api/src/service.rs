//! # Record Service
//!
//! Binds the gate, the store, and the create policy into one dispatcher.
//! Each method is one gated operation: `(token, raw body) -> result`.
//! The HTTP routes are thin wrappers around these methods.
//!
//! Every call records `tkv_requests_total{operation, status}`. Store
//! failures are logged here with their detail; the caller only ever sees
//! the fixed public message.

use std::sync::Arc;

use tkv_auth::TokenValidator;
use tkv_core::{
    DeleteRecordResponse, GetRecordResponse, ListRecordsResponse, OperationError, Record, Status,
    UpdateRecordResponse,
};
use tkv_store::RecordStore;

use crate::gate::AuthorizedOperation;
use crate::operations::{self, CreatePolicy, Operation};

/// Gated entry point for the five record operations.
#[derive(Clone)]
pub struct RecordService {
    gate: AuthorizedOperation,
    store: Arc<dyn RecordStore>,
    policy: CreatePolicy,
}

impl std::fmt::Debug for RecordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RecordService {
    pub fn new(
        validator: Arc<dyn TokenValidator>,
        store: Arc<dyn RecordStore>,
        policy: CreatePolicy,
    ) -> Self {
        Self {
            gate: AuthorizedOperation::new(validator),
            store,
            policy,
        }
    }

    pub async fn create(&self, token: Option<&str>, body: &[u8]) -> Result<Record, OperationError> {
        let result = self
            .gate
            .run(token, || operations::create::create(self.store.as_ref(), self.policy, body))
            .await;
        observe(Operation::Create, result_status(&result), &result);
        result
    }

    pub async fn list(
        &self,
        token: Option<&str>,
        body: &[u8],
    ) -> Result<ListRecordsResponse, OperationError> {
        let result = self
            .gate
            .run(token, || operations::list::list(self.store.as_ref(), body))
            .await;
        observe(Operation::List, result_status(&result), &result);
        result
    }

    /// A miss is `Ok` with an empty response classified as `NotFound`.
    pub async fn get(
        &self,
        token: Option<&str>,
        body: &[u8],
    ) -> Result<GetRecordResponse, OperationError> {
        let result = self
            .gate
            .run(token, || async {
                operations::get::get(self.store.as_ref(), body)
                    .await
                    .map(GetRecordResponse::from)
            })
            .await;
        let status = match &result {
            Ok(resp) => resp.status(),
            Err(e) => e.status(),
        };
        observe(Operation::Get, status, &result);
        result
    }

    pub async fn update(
        &self,
        token: Option<&str>,
        body: &[u8],
    ) -> Result<UpdateRecordResponse, OperationError> {
        let result = self
            .gate
            .run(token, || operations::update::update(self.store.as_ref(), body))
            .await;
        observe(Operation::Update, result_status(&result), &result);
        result
    }

    pub async fn delete(
        &self,
        token: Option<&str>,
        body: &[u8],
    ) -> Result<DeleteRecordResponse, OperationError> {
        let result = self
            .gate
            .run(token, || operations::delete::delete(self.store.as_ref(), body))
            .await;
        observe(Operation::Delete, result_status(&result), &result);
        result
    }
}

fn result_status<T>(result: &Result<T, OperationError>) -> Status {
    match result {
        Ok(_) => Status::Ok,
        Err(e) => e.status(),
    }
}

fn observe<T>(operation: Operation, status: Status, result: &Result<T, OperationError>) {
    metrics::counter!(
        "tkv_requests_total",
        "operation" => operation.as_str(),
        "status" => status.as_str()
    )
    .increment(1);

    match result {
        Err(OperationError::StoreUnavailable(detail)) => {
            tracing::error!(%operation, error = %detail, "record store failure");
        }
        Err(e @ (OperationError::MissingField(_) | OperationError::InvalidBody(_))) => {
            tracing::debug!(%operation, error = %e, "request rejected");
        }
        _ => {}
    }
}
