//! Service entry form logic.
//!
//! This module owns everything about the entry form that is not drawing:
//! field edits, tender parsing, time stamping, validation, building the insert
//! payload and resetting after a successful save. The UI only forwards input
//! events and renders what it reads back.
//!
//! ## Submission
//!
//! Validation runs locally and stops before any store call. The `submitting`
//! flag refuses a second submit while one is in flight; it is the only guard,
//! so callers that bypass it can still race two inserts. A failed insert
//! leaves every field as the user typed it.
//!
//! Event-driven callers use [`ServiceEntryForm::begin_submit`] and
//! [`ServiceEntryForm::finish_submit`] around their own async call;
//! [`ServiceEntryForm::submit`] does both in one await.

use log::{error, info, warn};
use shared::{format_inr, NewServiceEntry, PaymentBreakdown, PaymentMethod, ServiceEntry};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::errors::{EntryError, ValidationError};
use crate::domain::payment::{parse_tender_amount, validate_payment};
use crate::domain::time_field::{TimeField, TimeSlot};
use crate::storage::{ServiceStore, StoreError};

/// Scalar (non-payment) fields of the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    BillNo,
    CustomerName,
    PhoneNo,
    StaffName,
    InTime,
    OutTime,
    Remarks,
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryField::BillNo => "bill number",
            EntryField::CustomerName => "customer name",
            EntryField::PhoneNo => "phone number",
            EntryField::StaffName => "staff",
            EntryField::InTime => "in time",
            EntryField::OutTime => "out time",
            EntryField::Remarks => "remarks",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for EntryField {
    type Err = String;

    /// Accepts both the form's input names (`billNo`) and column names (`bill_no`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "billNo" | "bill_no" => Ok(EntryField::BillNo),
            "customerName" | "customer_name" => Ok(EntryField::CustomerName),
            "phoneNo" | "phone_no" => Ok(EntryField::PhoneNo),
            "staffName" | "staff_name" => Ok(EntryField::StaffName),
            "inTime" | "in_time" => Ok(EntryField::InTime),
            "outTime" | "out_time" => Ok(EntryField::OutTime),
            "remarks" => Ok(EntryField::Remarks),
            other => Err(format!("Unknown entry field: {}", other)),
        }
    }
}

impl From<TimeSlot> for EntryField {
    fn from(slot: TimeSlot) -> Self {
        match slot {
            TimeSlot::In => EntryField::InTime,
            TimeSlot::Out => EntryField::OutTime,
        }
    }
}

/// Per-deployment form rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormPolicy {
    /// Whether a phone number must be entered
    pub phone_required: bool,
}

impl Default for FormPolicy {
    fn default() -> Self {
        Self { phone_required: true }
    }
}

/// State of the service entry form
pub struct ServiceEntryForm {
    store: Arc<dyn ServiceStore>,
    clock: Arc<dyn Clock>,
    policy: FormPolicy,

    bill_no: String,
    customer_name: String,
    phone_no: String,
    staff_name: String,
    in_time: TimeField,
    out_time: TimeField,
    payment: PaymentBreakdown,
    /// Tender text exactly as typed, so partial input like "12." survives redraws
    payment_inputs: HashMap<PaymentMethod, String>,
    remarks: String,

    submitting: bool,
}

impl ServiceEntryForm {
    pub fn new(store: Arc<dyn ServiceStore>, clock: Arc<dyn Clock>, policy: FormPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
            bill_no: String::new(),
            customer_name: String::new(),
            phone_no: String::new(),
            staff_name: String::new(),
            in_time: TimeField::new(),
            out_time: TimeField::new(),
            payment: PaymentBreakdown::default(),
            payment_inputs: HashMap::new(),
            remarks: String::new(),
            submitting: false,
        }
    }

    pub fn policy(&self) -> FormPolicy {
        self.policy
    }

    /// Snapshot of the form's current contents
    pub fn entry(&self) -> ServiceEntry {
        ServiceEntry {
            bill_no: self.bill_no.clone(),
            customer_name: self.customer_name.clone(),
            phone_no: self.phone_no.clone(),
            staff_name: self.staff_name.clone(),
            in_time: self.in_time.value().to_string(),
            out_time: self.out_time.value().to_string(),
            payment: self.payment,
            remarks: self.remarks.clone(),
        }
    }

    /// Current text of a scalar field
    pub fn field(&self, field: EntryField) -> &str {
        match field {
            EntryField::BillNo => &self.bill_no,
            EntryField::CustomerName => &self.customer_name,
            EntryField::PhoneNo => &self.phone_no,
            EntryField::StaffName => &self.staff_name,
            EntryField::InTime => self.in_time.value(),
            EntryField::OutTime => self.out_time.value(),
            EntryField::Remarks => &self.remarks,
        }
    }

    /// Set one scalar field; validation waits for submit
    pub fn update_field(&mut self, field: EntryField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EntryField::BillNo => self.bill_no = value,
            EntryField::CustomerName => self.customer_name = value,
            EntryField::PhoneNo => self.phone_no = value,
            EntryField::StaffName => self.staff_name = value,
            EntryField::InTime => self.in_time.set(value),
            EntryField::OutTime => self.out_time.set(value),
            EntryField::Remarks => self.remarks = value,
        }
    }

    /// Set one tender from typed text; unparseable text counts as 0
    pub fn update_payment(&mut self, method: PaymentMethod, raw: &str) {
        let amount = parse_tender_amount(raw);
        self.payment.set(method, amount);
        self.payment_inputs.insert(method, raw.to_string());
    }

    /// Tender text as typed (blank until edited)
    pub fn payment_input(&self, method: PaymentMethod) -> &str {
        self.payment_inputs.get(&method).map(String::as_str).unwrap_or("")
    }

    pub fn payment(&self) -> &PaymentBreakdown {
        &self.payment
    }

    /// Sum of the four tenders, derived on every call
    pub fn total_received(&self) -> f64 {
        self.payment.total()
    }

    /// Total rendered in rupees with a fixed number of decimals
    pub fn formatted_total(&self, decimals: usize) -> String {
        format_inr(self.total_received(), decimals)
    }

    pub fn time_field_mut(&mut self, slot: TimeSlot) -> &mut TimeField {
        match slot {
            TimeSlot::In => &mut self.in_time,
            TimeSlot::Out => &mut self.out_time,
        }
    }

    /// Stamp a time field with the current local time
    pub fn set_time_now(&mut self, slot: TimeSlot) {
        let clock = Arc::clone(&self.clock);
        self.time_field_mut(slot).set_now(clock.as_ref());
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the form still holds its initial defaults
    pub fn is_pristine(&self) -> bool {
        self.entry() == ServiceEntry::default() && self.payment_inputs.is_empty()
    }

    /// Check every rule against the current roster
    pub fn validate(&self, roster: &[String]) -> Result<(), ValidationError> {
        if self.staff_name.trim().is_empty() {
            return Err(ValidationError::Required(EntryField::StaffName));
        }
        if self.bill_no.trim().is_empty() {
            return Err(ValidationError::Required(EntryField::BillNo));
        }
        if self.customer_name.trim().is_empty() {
            return Err(ValidationError::Required(EntryField::CustomerName));
        }
        self.in_time.validate(TimeSlot::In, true)?;
        if self.policy.phone_required && self.phone_no.trim().is_empty() {
            return Err(ValidationError::Required(EntryField::PhoneNo));
        }
        if !roster.contains(&self.staff_name) {
            return Err(ValidationError::UnknownStaff(self.staff_name.clone()));
        }
        self.out_time.validate(TimeSlot::Out, false)?;
        validate_payment(&self.payment)?;
        Ok(())
    }

    /// Validate and mark the form as submitting; returns the insert payload
    pub fn begin_submit(&mut self, roster: &[String]) -> Result<NewServiceEntry, EntryError> {
        if self.submitting {
            warn!("Submit ignored: a submission is already in flight");
            return Err(EntryError::SubmissionInFlight);
        }

        if let Err(err) = self.validate(roster) {
            warn!("Entry rejected before saving: {}", err);
            return Err(err.into());
        }

        let mut payload = NewServiceEntry::from(&self.entry());
        payload.in_time = self.in_time.to_payload();
        payload.out_time = self.out_time.to_payload();

        self.submitting = true;
        info!("Submitting entry for bill {} ({})", payload.bill_no, payload.staff_name);
        Ok(payload)
    }

    /// Apply the store's answer; success resets the form, failure keeps it
    pub fn finish_submit(&mut self, outcome: Result<(), StoreError>) -> Result<(), EntryError> {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                info!("Entry saved for bill {}", self.bill_no.trim());
                self.reset();
                Ok(())
            }
            Err(err) => {
                error!("Submission error: {}", err);
                Err(EntryError::Submission(err))
            }
        }
    }

    /// Validate, insert and reset in one call
    pub async fn submit(&mut self, roster: &[String]) -> Result<(), EntryError> {
        let payload = self.begin_submit(roster)?;
        let store = Arc::clone(&self.store);
        let outcome = store.insert_entry(&payload).await;
        self.finish_submit(outcome)
    }

    /// Restore every field to its blank default
    pub fn reset(&mut self) {
        self.bill_no.clear();
        self.customer_name.clear();
        self.phone_no.clear();
        self.staff_name.clear();
        self.in_time.clear();
        self.out_time.clear();
        self.payment = PaymentBreakdown::default();
        self.payment_inputs.clear();
        self.remarks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::storage::InMemoryStore;

    fn roster() -> Vec<String> {
        vec!["Anita".to_string(), "Meera".to_string()]
    }

    fn setup_test(policy: FormPolicy) -> (InMemoryStore, ServiceEntryForm) {
        let store = InMemoryStore::with_therapists(["Anita", "Meera"]);
        let clock = FixedClock::at("2026-10-19T14:05:00+05:30").unwrap();
        let form = ServiceEntryForm::new(Arc::new(store.clone()), Arc::new(clock), policy);
        (store, form)
    }

    fn fill_valid(form: &mut ServiceEntryForm) {
        form.update_field(EntryField::BillNo, "B-101");
        form.update_field(EntryField::CustomerName, "Ravi Kumar");
        form.update_field(EntryField::PhoneNo, "9876543210");
        form.update_field(EntryField::StaffName, "Meera");
        form.update_field(EntryField::InTime, "13:30");
        form.update_payment(PaymentMethod::Cash, "500");
        form.update_payment(PaymentMethod::Upi, "250.50");
    }

    #[test]
    fn test_total_recomputed_after_each_change() {
        let (_store, mut form) = setup_test(FormPolicy::default());
        assert_eq!(form.total_received(), 0.0);

        form.update_payment(PaymentMethod::Cash, "100");
        assert_eq!(form.total_received(), 100.0);
        form.update_payment(PaymentMethod::Card, "50");
        assert_eq!(form.total_received(), 150.0);
        form.update_payment(PaymentMethod::Gpay, "25.25");
        assert_eq!(form.total_received(), 175.25);
        form.update_payment(PaymentMethod::Upi, "24.75");
        assert_eq!(form.total_received(), 200.0);

        // Overwriting one tender replaces it rather than adding to it
        form.update_payment(PaymentMethod::Cash, "not a number");
        assert_eq!(form.payment().cash, 0.0);
        assert_eq!(form.total_received(), 100.0);
        assert_eq!(form.payment_input(PaymentMethod::Cash), "not a number");
        assert_eq!(form.formatted_total(2), "₹100.00");
    }

    #[test]
    fn test_total_matches_sum_for_each_tender_set() {
        let cases: [[&str; 4]; 6] = [
            ["0", "0", "0", "0"],
            ["100", "", "", ""],
            ["", "", "", "99.99"],
            ["0.5", "0.25", "0.125", "0.125"],
            ["1200", "350.75", "", "49.25"],
            ["abc", "12.5kg", " ", "1e2"],
        ];

        for tenders in cases {
            let (_store, mut form) = setup_test(FormPolicy::default());
            let mut expected = PaymentBreakdown::default();

            for (method, raw) in PaymentMethod::ALL.into_iter().zip(tenders) {
                form.update_payment(method, raw);
                expected.set(method, parse_tender_amount(raw));

                let sum = expected.cash + expected.card + expected.gpay + expected.upi;
                assert_eq!(form.total_received(), sum, "tenders {:?} after {:?}", tenders, method);
                assert_eq!(form.payment(), &expected);
            }
        }
    }

    #[test]
    fn test_set_time_now_uses_clock() {
        let (_store, mut form) = setup_test(FormPolicy::default());
        form.set_time_now(TimeSlot::In);
        assert_eq!(form.field(EntryField::InTime), "14:05");
        assert_eq!(form.field(EntryField::OutTime), "");

        form.set_time_now(TimeSlot::Out);
        assert_eq!(form.field(EntryField::OutTime), "14:05");
    }

    #[tokio::test]
    async fn test_empty_staff_never_reaches_store() {
        let (store, mut form) = setup_test(FormPolicy::default());
        fill_valid(&mut form);
        form.update_field(EntryField::StaffName, "");

        let err = form.submit(&roster()).await.unwrap_err();

        assert_eq!(
            err,
            EntryError::Validation(ValidationError::Required(EntryField::StaffName))
        );
        assert_eq!(err.to_string(), "staff required");
        assert_eq!(store.write_calls(), 0);
        assert!(!form.is_submitting());
        assert_eq!(form.field(EntryField::BillNo), "B-101");
    }

    #[tokio::test]
    async fn test_required_fields_checked_in_order() {
        let (store, mut form) = setup_test(FormPolicy::default());
        form.update_field(EntryField::StaffName, "Meera");

        let err = form.submit(&roster()).await.unwrap_err();
        assert_eq!(err, EntryError::from(ValidationError::Required(EntryField::BillNo)));

        form.update_field(EntryField::BillNo, "B-1");
        let err = form.submit(&roster()).await.unwrap_err();
        assert_eq!(err, EntryError::from(ValidationError::Required(EntryField::CustomerName)));

        form.update_field(EntryField::CustomerName, "Ravi");
        let err = form.submit(&roster()).await.unwrap_err();
        assert_eq!(err, EntryError::from(ValidationError::Required(EntryField::InTime)));

        form.update_field(EntryField::InTime, "10:00");
        let err = form.submit(&roster()).await.unwrap_err();
        assert_eq!(err, EntryError::from(ValidationError::Required(EntryField::PhoneNo)));

        assert_eq!(store.write_calls(), 0);
    }

    #[tokio::test]
    async fn test_phone_optional_policy() {
        let (store, mut form) = setup_test(FormPolicy { phone_required: false });
        fill_valid(&mut form);
        form.update_field(EntryField::PhoneNo, "");

        form.submit(&roster()).await.unwrap();
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].entry.phone_no, "");
    }

    #[tokio::test]
    async fn test_staff_must_be_on_roster() {
        let (store, mut form) = setup_test(FormPolicy::default());
        fill_valid(&mut form);
        form.update_field(EntryField::StaffName, "Priya");

        let err = form.submit(&roster()).await.unwrap_err();
        assert_eq!(
            err,
            EntryError::from(ValidationError::UnknownStaff("Priya".to_string()))
        );

        // Membership is an exact name match
        form.update_field(EntryField::StaffName, "meera");
        let err = form.submit(&roster()).await.unwrap_err();
        assert_eq!(
            err,
            EntryError::from(ValidationError::UnknownStaff("meera".to_string()))
        );
        assert_eq!(store.write_calls(), 0);
    }

    #[tokio::test]
    async fn test_negative_tender_rejected_at_submit() {
        let (store, mut form) = setup_test(FormPolicy::default());
        fill_valid(&mut form);
        form.update_payment(PaymentMethod::Card, "-20");

        let err = form.submit(&roster()).await.unwrap_err();
        assert_eq!(
            err,
            EntryError::from(ValidationError::NegativeTender(PaymentMethod::Card))
        );
        assert_eq!(store.write_calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_submit_persists_and_resets() {
        let (store, mut form) = setup_test(FormPolicy::default());
        fill_valid(&mut form);
        form.update_field(EntryField::OutTime, "9:45");

        form.submit(&roster()).await.unwrap();

        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        let saved = &entries[0].entry;
        assert_eq!(saved.bill_no, "B-101");
        assert_eq!(saved.staff_name, "Meera");
        assert_eq!(saved.out_time, "09:45");
        assert_eq!(saved.payment.total(), 750.5);

        assert!(form.is_pristine());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_failed_submit_preserves_input() {
        let (store, mut form) = setup_test(FormPolicy::default());
        fill_valid(&mut form);
        let before = form.entry();
        store.set_fail_writes(true);

        let err = form.submit(&roster()).await.unwrap_err();

        assert!(matches!(err, EntryError::Submission(StoreError::Other(_))));
        assert_eq!(form.entry(), before);
        assert!(!form.is_submitting());

        // A retry goes through once the store recovers
        store.set_fail_writes(false);
        form.submit(&roster()).await.unwrap();
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn test_second_submit_refused_while_in_flight() {
        let (_store, mut form) = setup_test(FormPolicy::default());
        fill_valid(&mut form);

        let payload = form.begin_submit(&roster()).unwrap();
        assert_eq!(payload.in_time, "13:30");
        assert!(form.is_submitting());
        assert_eq!(
            form.begin_submit(&roster()).unwrap_err(),
            EntryError::SubmissionInFlight
        );

        form.finish_submit(Ok(())).unwrap();
        assert!(!form.is_submitting());
        assert!(form.is_pristine());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let (_store, mut form) = setup_test(FormPolicy::default());
        fill_valid(&mut form);
        form.update_field(EntryField::Remarks, "Regular customer");
        form.set_time_now(TimeSlot::Out);

        form.reset();

        assert_eq!(form.entry(), ServiceEntry::default());
        assert!(form.is_pristine());
        assert_eq!(form.payment_input(PaymentMethod::Upi), "");
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!("billNo".parse::<EntryField>(), Ok(EntryField::BillNo));
        assert_eq!("staff_name".parse::<EntryField>(), Ok(EntryField::StaffName));
        assert_eq!("remarks".parse::<EntryField>(), Ok(EntryField::Remarks));
        assert!("payment".parse::<EntryField>().is_err());
    }
}
