//! Sales: a bill to a customer with one or more product line items.
//!
//! DESIGN
//! ======
//! The sale total is never typed in. [`LineItems`] owns the rows and keeps
//! the running total (Σ quantity × rate, two decimals) in step with every
//! add, remove and edit, so the draft's `total_sale_price` is always derived.
//! A row whose quantity or rate does not parse, or whose product does not
//! fit in a `Decimal`, contributes zero until fixed; validation names it.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{Draft, Entity, EntityId, UNITS, Unsortable, lenient_text, text};
use crate::lookup::{LookupKind, Lookups};
use crate::validation::{self, FieldError, ValidationErrors};

pub const DEFAULT_ITEM_UNIT: &str = "Pieces";
pub const PAYMENT_STATUSES: &[&str] = &["pending", "partial", "done"];
pub const PAYMENT_TYPES: &[&str] = &["cash", "credit", "bank_transfer", "cheque", "upi"];

/// Payment status that counts as settled.
pub const SETTLED: &str = "done";

// =============================================================================
// RECORD
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(default)]
    pub product_id: EntityId,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub sale_id: EntityId,
    #[serde(default)]
    pub customer_id: EntityId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bill_no: String,
    #[serde(default)]
    pub total_sale_price: Decimal,
    #[serde(default)]
    pub sale_date: String,
    #[serde(default)]
    pub delivery_date: String,
    #[serde(default)]
    pub delivery_by: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub payment_type: String,
    #[serde(default)]
    pub payment_details: Option<String>,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

impl Sale {
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.payment_status == SETTLED
    }
}

impl Entity for Sale {
    type Draft = SaleDraft;
    type SortKey = Unsortable;

    const RESOURCE: &'static str = "sales";
    const NOUN: &'static str = "sale";
    const PLURAL: &'static str = "sales";
    const COLUMNS: &'static [&'static str] =
        &["ID", "Bill No", "Customer", "Sale Date", "Delivery", "Items", "Total", "Payment"];
    const LOOKUPS: &'static [LookupKind] = &[LookupKind::Customers, LookupKind::Products];

    fn id(&self) -> EntityId {
        self.sale_id
    }

    fn label(&self) -> &str {
        &self.bill_no
    }

    fn search_fields<'a>(&'a self, lookups: &'a Lookups) -> Vec<Option<&'a str>> {
        vec![
            lookups.find(LookupKind::Customers, self.customer_id),
            Some(self.bill_no.as_str()),
            Some(self.payment_status.as_str()),
        ]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<String> {
        let items = self
            .items
            .iter()
            .map(|item| format!("{} × {}", item.quantity, lookups.label(LookupKind::Products, item.product_id)))
            .collect::<Vec<_>>()
            .join("; ");
        vec![
            self.sale_id.to_string(),
            self.bill_no.clone(),
            lookups.label(LookupKind::Customers, self.customer_id).to_string(),
            self.sale_date.clone(),
            format!("{} ({})", self.delivery_date, self.delivery_by),
            items,
            format!("{:.2}", self.total_sale_price),
            format!("{} / {}", self.payment_status, self.payment_type),
        ]
    }

    fn to_draft(&self) -> SaleDraft {
        let rows = self
            .items
            .iter()
            .map(|item| LineItemDraft {
                product_id: item.product_id.to_string(),
                quantity: item.quantity.to_string(),
                unit: if item.unit.is_empty() { DEFAULT_ITEM_UNIT.to_string() } else { item.unit.clone() },
                rate: item.rate.to_string(),
            })
            .collect();
        SaleDraft {
            customer_id: self.customer_id.to_string(),
            bill_no: self.bill_no.clone(),
            sale_date: self.sale_date.clone(),
            delivery_date: self.delivery_date.clone(),
            delivery_by: self.delivery_by.clone(),
            payment_status: self.payment_status.clone(),
            payment_type: self.payment_type.clone(),
            payment_details: self.payment_details.clone().unwrap_or_default(),
            items: LineItems::from_rows(rows),
        }
    }
}

// =============================================================================
// LINE ITEMS
// =============================================================================

/// One editable line item row, as form text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemDraft {
    pub product_id: String,
    pub quantity: String,
    pub unit: String,
    pub rate: String,
}

impl Default for LineItemDraft {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            quantity: String::new(),
            unit: DEFAULT_ITEM_UNIT.to_string(),
            rate: String::new(),
        }
    }
}

impl LineItemDraft {
    /// quantity × rate, or zero while either does not parse or the product
    /// overflows.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.checked_amount().flatten().unwrap_or(Decimal::ZERO)
    }

    /// True when quantity and rate both parse but their product overflows.
    #[must_use]
    pub fn overflows(&self) -> bool {
        matches!(self.checked_amount(), Some(None))
    }

    /// Outer `None`: not parseable yet. Inner `None`: overflow.
    fn checked_amount(&self) -> Option<Option<Decimal>> {
        let quantity = validation::parse_int(&self.quantity)?;
        let rate = validation::parse_decimal(&self.rate)?;
        Some(Decimal::from(quantity).checked_mul(rate))
    }
}

/// Non-empty list of line items with a derived total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItems {
    rows: Vec<LineItemDraft>,
    total: Decimal,
    overflowed: bool,
}

impl Default for LineItems {
    fn default() -> Self {
        Self::from_rows(Vec::new())
    }
}

impl LineItems {
    pub const FIELDS: &'static [&'static str] = &["product_id", "quantity", "unit", "rate"];

    /// Wrap `rows`, adding a blank row if there are none.
    #[must_use]
    pub fn from_rows(mut rows: Vec<LineItemDraft>) -> Self {
        if rows.is_empty() {
            rows.push(LineItemDraft::default());
        }
        let mut items = Self { rows, total: Decimal::ZERO, overflowed: false };
        items.recompute();
        items
    }

    #[must_use]
    pub fn rows(&self) -> &[LineItemDraft] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Never true: removing the last row is refused.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of row amounts rounded to two decimals; zero when the sum
    /// overflows.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// True when the row amounts do not sum within `Decimal` range.
    #[must_use]
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Append a blank row; returns its index.
    pub fn add(&mut self) -> usize {
        self.rows.push(LineItemDraft::default());
        self.rows.len() - 1
    }

    /// Remove row `index`.
    ///
    /// # Errors
    ///
    /// [`FieldError::LastItem`] when only one row remains,
    /// [`FieldError::NoSuchItem`] when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<(), FieldError> {
        if index >= self.rows.len() {
            return Err(FieldError::NoSuchItem(index));
        }
        if self.rows.len() == 1 {
            return Err(FieldError::LastItem);
        }
        self.rows.remove(index);
        self.recompute();
        Ok(())
    }

    /// Assign one field of row `index`.
    ///
    /// # Errors
    ///
    /// [`FieldError::NoSuchItem`] or [`FieldError::Unknown`].
    pub fn set(&mut self, index: usize, field: &str, value: &str) -> Result<(), FieldError> {
        let row = self.rows.get_mut(index).ok_or(FieldError::NoSuchItem(index))?;
        let slot = match field {
            "product_id" => &mut row.product_id,
            "quantity" => &mut row.quantity,
            "unit" => &mut row.unit,
            "rate" => &mut row.rate,
            _ => return Err(FieldError::Unknown(field.to_string())),
        };
        *slot = value.to_string();
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        let sum = self
            .rows
            .iter()
            .map(LineItemDraft::amount)
            .try_fold(Decimal::ZERO, Decimal::checked_add);
        self.overflowed = sum.is_none();
        self.total = sum
            .unwrap_or(Decimal::ZERO)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    }
}

// =============================================================================
// DRAFT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    pub customer_id: String,
    pub bill_no: String,
    pub sale_date: String,
    pub delivery_date: String,
    pub delivery_by: String,
    pub payment_status: String,
    pub payment_type: String,
    pub payment_details: String,
    pub items: LineItems,
}

impl Default for SaleDraft {
    fn default() -> Self {
        Self::dated(&validation::today())
    }
}

impl SaleDraft {
    /// Blank sale form with the sale date preset to `sale_date`.
    #[must_use]
    pub fn dated(sale_date: &str) -> Self {
        Self {
            customer_id: String::new(),
            bill_no: String::new(),
            sale_date: sale_date.to_string(),
            delivery_date: String::new(),
            delivery_by: String::new(),
            payment_status: "pending".to_string(),
            payment_type: "cash".to_string(),
            payment_details: String::new(),
            items: LineItems::default(),
        }
    }

    #[must_use]
    pub fn total_sale_price(&self) -> Decimal {
        self.items.total()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleItemPayload {
    pub product_id: EntityId,
    pub quantity: i64,
    pub unit: String,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalePayload {
    pub customer_id: EntityId,
    pub bill_no: String,
    pub total_sale_price: Decimal,
    pub sale_date: String,
    pub delivery_date: String,
    pub delivery_by: String,
    pub payment_status: String,
    pub payment_type: String,
    pub payment_details: String,
    pub items: Vec<SaleItemPayload>,
}

impl Draft for SaleDraft {
    type Payload = SalePayload;

    const FIELDS: &'static [&'static str] = &[
        "customer_id",
        "bill_no",
        "sale_date",
        "delivery_date",
        "delivery_by",
        "payment_status",
        "payment_type",
        "payment_details",
        "total_sale_price",
    ];

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        let slot = match field {
            "customer_id" => &mut self.customer_id,
            "bill_no" => &mut self.bill_no,
            "sale_date" => &mut self.sale_date,
            "delivery_date" => &mut self.delivery_date,
            "delivery_by" => &mut self.delivery_by,
            "payment_status" => &mut self.payment_status,
            "payment_type" => &mut self.payment_type,
            "payment_details" => &mut self.payment_details,
            "total_sale_price" => return Err(FieldError::ReadOnly("total_sale_price")),
            _ => return Err(FieldError::Unknown(field.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn field(&self, field: &str) -> Option<String> {
        match field {
            "customer_id" => text(&self.customer_id),
            "bill_no" => text(&self.bill_no),
            "sale_date" => text(&self.sale_date),
            "delivery_date" => text(&self.delivery_date),
            "delivery_by" => text(&self.delivery_by),
            "payment_status" => text(&self.payment_status),
            "payment_type" => text(&self.payment_type),
            "payment_details" => text(&self.payment_details),
            "total_sale_price" => Some(format!("{:.2}", self.total_sale_price())),
            _ => None,
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if validation::parse_id(&self.customer_id).is_none() {
            errors.push("Customer is required");
        }
        errors.require(&self.bill_no, "Bill number is required");
        errors.require(&self.sale_date, "Sale date is required");
        errors.date(&self.sale_date, "Sale date must be YYYY-MM-DD");
        errors.require(&self.delivery_date, "Delivery date is required");
        errors.date(&self.delivery_date, "Delivery date must be YYYY-MM-DD");
        errors.require(&self.delivery_by, "Delivery person is required");
        if validation::is_blank(&self.payment_status) {
            errors.push("Payment status is required");
        } else {
            errors.one_of(&self.payment_status, PAYMENT_STATUSES, "Payment status must be one of pending, partial, done");
        }
        if validation::is_blank(&self.payment_type) {
            errors.push("Payment type is required");
        } else {
            errors.one_of(
                &self.payment_type,
                PAYMENT_TYPES,
                "Payment type must be one of cash, credit, bank_transfer, cheque, upi",
            );
        }
        for (index, row) in self.items.rows().iter().enumerate() {
            let n = index + 1;
            if validation::parse_id(&row.product_id).is_none() {
                errors.push(format!("Product is required for item {n}"));
            }
            if validation::parse_int(&row.quantity).is_none_or(|q| q <= 0) {
                errors.push(format!("Valid quantity is required for item {n}"));
            }
            if !validation::is_blank(&row.unit) && !UNITS.contains(&row.unit.trim()) {
                errors.push(format!("Unit must be one of Kg, Litre, Pack, Pieces for item {n}"));
            }
            if validation::parse_decimal(&row.rate).is_none_or(|r| r.is_sign_negative() || r.is_zero()) {
                errors.push(format!("Valid rate is required for item {n}"));
            }
            if row.overflows() {
                errors.push(format!("Amount is too large for item {n}"));
            }
        }
        if self.items.is_overflowed() {
            errors.push("Total sale price is too large");
        }
        errors
    }

    fn payload(&self) -> Result<SalePayload, ValidationErrors> {
        self.validate().into_result()?;
        let items = self
            .items
            .rows()
            .iter()
            .map(|row| SaleItemPayload {
                product_id: validation::parse_id(&row.product_id).unwrap_or_default(),
                quantity: validation::parse_int(&row.quantity).unwrap_or_default(),
                unit: validation::optional(&row.unit).unwrap_or_else(|| DEFAULT_ITEM_UNIT.to_string()),
                rate: validation::parse_decimal(&row.rate).unwrap_or_default(),
            })
            .collect();
        Ok(SalePayload {
            customer_id: validation::parse_id(&self.customer_id).unwrap_or_default(),
            bill_no: self.bill_no.trim().to_string(),
            total_sale_price: self.total_sale_price(),
            sale_date: self.sale_date.trim().to_string(),
            delivery_date: self.delivery_date.trim().to_string(),
            delivery_by: self.delivery_by.trim().to_string(),
            payment_status: self.payment_status.trim().to_string(),
            payment_type: self.payment_type.trim().to_string(),
            payment_details: self.payment_details.trim().to_string(),
            items,
        })
    }

    fn line_items(&self) -> Option<&LineItems> {
        Some(&self.items)
    }

    fn line_items_mut(&mut self) -> Option<&mut LineItems> {
        Some(&mut self.items)
    }
}

#[cfg(test)]
#[path = "sale_test.rs"]
mod tests;
