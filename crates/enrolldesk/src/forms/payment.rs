//! Payment schedules and installment payments.

use std::sync::Arc;

use chrono::Utc;
use serde_json::to_value;
use tracing::info;

use super::SaveError;
use crate::api::{decode, ApiClient, ApiError};
use crate::domain::{CatalogEntry, Payment, PaymentPayload, ScheduleItem};

/// What the board offers for one installment, decided by its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleAction {
    RegisterPayment,
    ViewDetails,
}

impl ScheduleAction {
    /// Paid installments are read-only; everything else can take a
    /// payment.
    pub fn for_status(status: &str) -> Self {
        if status.eq_ignore_ascii_case("pagado") {
            ScheduleAction::ViewDetails
        } else {
            ScheduleAction::RegisterPayment
        }
    }
}

/// The installment schedule of one enrollment.
///
/// The API only exposes the full schedule list, so the board fetches all
/// of it and keeps the rows for its enrollment.
pub struct ScheduleBoard<C: ?Sized> {
    client: Arc<C>,
    enrollment_id: i64,
    items: Vec<ScheduleItem>,
}

impl<C> ScheduleBoard<C>
where
    C: ApiClient + ?Sized,
{
    pub fn new(client: Arc<C>, enrollment_id: i64) -> Self {
        Self {
            client,
            enrollment_id,
            items: Vec::new(),
        }
    }

    pub fn enrollment_id(&self) -> i64 {
        self.enrollment_id
    }

    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub async fn reload(&mut self) -> Result<(), ApiError> {
        let all: Vec<ScheduleItem> = decode(self.client.fetch("/payments-schedules").await?)?;
        self.items = all
            .into_iter()
            .filter(|item| item.enrollment_id == self.enrollment_id)
            .collect();
        Ok(())
    }

    pub fn action_for(&self, item: &ScheduleItem) -> ScheduleAction {
        ScheduleAction::for_status(&item.installment_status.status)
    }

    /// The payment behind a paid installment. Payments, like schedules,
    /// are only exposed as a full list.
    pub async fn payment_details(
        &self,
        schedule_item_id: i64,
    ) -> Result<Option<Payment>, ApiError> {
        let payments: Vec<Payment> = decode(self.client.fetch("/payments").await?)?;
        Ok(payments
            .into_iter()
            .find(|payment| payment.id_payment_schedule == schedule_item_id))
    }
}

/// Form state for registering a payment against one installment.
pub struct PaymentForm<C: ?Sized> {
    client: Arc<C>,
    pub payment_types: Vec<CatalogEntry>,
    schedule_item_id: i64,
    payment_type: Option<i64>,
    saving: bool,
}

impl<C> PaymentForm<C>
where
    C: ApiClient + ?Sized,
{
    pub fn new(client: Arc<C>, payment_types: Vec<CatalogEntry>, schedule_item_id: i64) -> Self {
        Self {
            client,
            payment_types,
            schedule_item_id,
            payment_type: None,
            saving: false,
        }
    }

    pub fn payment_type(&self) -> Option<i64> {
        self.payment_type
    }

    pub fn set_payment_type(&mut self, id: Option<i64>) {
        self.payment_type = id;
    }

    pub async fn register(&mut self) -> Result<(), SaveError> {
        if self.saving {
            return Err(SaveError::InProgress);
        }
        let id_payment_type = self
            .payment_type
            .ok_or_else(|| SaveError::Validation("Select a payment type.".to_string()))?;
        let payload = PaymentPayload {
            payment_date: Utc::now(),
            id_payment_type,
            id_payment_schedule: self.schedule_item_id,
        };

        self.saving = true;
        let result = self
            .client
            .create("/payments", to_value(payload)?)
            .await
            .map(|_| ());
        self.saving = false;
        info!(
            schedule_item = self.schedule_item_id,
            "payment registration settled"
        );
        result.map_err(SaveError::from)
    }
}
