use serde::{Deserialize, Serialize};

/// Header printed at the top of every receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueDetails {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub file_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillTo {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub from: String,
    pub to: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Totals {
    pub total_amount: String,
    pub advance_paid: String,
    pub balance_due: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub invoice_no: String,
    pub issued_on: String,
    pub file_name: String,
    pub venue: VenueDetails,
    pub bill_to: BillTo,
    pub line_item: LineItem,
    pub totals: Totals,
    pub closing_note: String,
}
