use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One tender a customer can pay with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Gpay,
    Upi,
}

impl PaymentMethod {
    /// All tenders in display order
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Gpay,
        PaymentMethod::Upi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Gpay => "gpay",
            PaymentMethod::Upi => "upi",
        }
    }

    /// Label shown next to the amount input
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Gpay => "GPay",
            PaymentMethod::Upi => "UPI",
        }
    }

    /// Whether the tender counts towards the digital total
    pub fn is_digital(&self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "gpay" => Ok(PaymentMethod::Gpay),
            "upi" => Ok(PaymentMethod::Upi),
            other => Err(format!("Unknown payment method: {}", other)),
        }
    }
}

/// Split of a single bill across the four tenders.
///
/// The total is always derived from the four amounts and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    #[serde(default)]
    pub cash: f64,
    #[serde(default)]
    pub card: f64,
    #[serde(default)]
    pub gpay: f64,
    #[serde(default)]
    pub upi: f64,
}

impl PaymentBreakdown {
    pub fn get(&self, method: PaymentMethod) -> f64 {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::Card => self.card,
            PaymentMethod::Gpay => self.gpay,
            PaymentMethod::Upi => self.upi,
        }
    }

    pub fn set(&mut self, method: PaymentMethod, amount: f64) {
        match method {
            PaymentMethod::Cash => self.cash = amount,
            PaymentMethod::Card => self.card = amount,
            PaymentMethod::Gpay => self.gpay = amount,
            PaymentMethod::Upi => self.upi = amount,
        }
    }

    /// Sum of all four tenders
    pub fn total(&self) -> f64 {
        self.cash + self.card + self.gpay + self.upi
    }

    /// Sum of card, gpay and upi
    pub fn digital_total(&self) -> f64 {
        self.card + self.gpay + self.upi
    }
}

/// The entry form's contents as the user sees them
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub bill_no: String,
    pub customer_name: String,
    pub phone_no: String,
    pub staff_name: String,
    /// HH:MM, 24 hour
    pub in_time: String,
    /// HH:MM, 24 hour; may be blank
    pub out_time: String,
    pub payment: PaymentBreakdown,
    pub remarks: String,
}

/// Insert payload for the `service_entries` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewServiceEntry {
    pub bill_no: String,
    pub customer_name: String,
    pub phone_no: String,
    pub staff_name: String,
    pub in_time: String,
    pub out_time: String,
    pub payment: PaymentBreakdown,
    pub remarks: String,
}

impl From<&ServiceEntry> for NewServiceEntry {
    fn from(entry: &ServiceEntry) -> Self {
        Self {
            bill_no: entry.bill_no.trim().to_string(),
            customer_name: entry.customer_name.trim().to_string(),
            phone_no: entry.phone_no.trim().to_string(),
            staff_name: entry.staff_name.clone(),
            in_time: entry.in_time.trim().to_string(),
            out_time: entry.out_time.trim().to_string(),
            payment: entry.payment,
            remarks: entry.remarks.trim().to_string(),
        }
    }
}

/// A persisted entry as read back from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: String,
    #[serde(flatten)]
    pub entry: NewServiceEntry,
    /// Creation time assigned by the store
    pub created_at: DateTime<Utc>,
}

/// A roster member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Therapist {
    pub name: String,
}

impl Therapist {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Today's totals shown on the dashboard cards
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub today_entries: usize,
    pub cash_total: f64,
    pub digital_total: f64,
    pub active_staff: usize,
}

/// Format an amount in rupees with Indian digit grouping (`₹1,23,456.00`)
pub fn format_inr(amount: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
    let grouped = group_indian(int_part);

    match frac_part {
        Some(frac) => format!("{}₹{}.{}", sign, grouped, frac),
        None => format!("{}₹{}", sign, grouped),
    }
}

/// Group digits as thousands, then lakhs and crores (pairs)
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
