//! Purchases: stock bought from a vendor against an invoice.
//!
//! Rows reference a product and a vendor by id; both resolve through the
//! sibling lookups for display and search. The invoice attachment is kept on
//! the draft only. The purchases endpoint does not accept it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Draft, Entity, EntityId, UNITS, Unsortable, cell, lenient_text, text};
use crate::lookup::{LookupKind, Lookups};
use crate::validation::{self, FieldError, ValidationErrors};

pub const DEFAULT_UNIT: &str = "Kg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub purchase_id: EntityId,
    #[serde(default)]
    pub product_id: EntityId,
    #[serde(default)]
    pub vendor_id: EntityId,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub unit_price: Decimal,
    #[serde(default)]
    pub purchase_date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub invoice_number: String,
    #[serde(default)]
    pub invoice_upload: Option<String>,
}

impl Purchase {
    /// Spend on this purchase: quantity × unit price. `None` when the
    /// product does not fit in a `Decimal`.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_price)
    }
}

impl Entity for Purchase {
    type Draft = PurchaseDraft;
    type SortKey = Unsortable;

    const RESOURCE: &'static str = "purchases";
    const NOUN: &'static str = "purchase";
    const PLURAL: &'static str = "purchases";
    const COLUMNS: &'static [&'static str] =
        &["ID", "Product", "Vendor", "Quantity", "Unit Price", "Total", "Date", "Invoice"];
    const LOOKUPS: &'static [LookupKind] = &[LookupKind::Products, LookupKind::Vendors];

    fn id(&self) -> EntityId {
        self.purchase_id
    }

    fn label(&self) -> &str {
        &self.invoice_number
    }

    fn search_fields<'a>(&'a self, lookups: &'a Lookups) -> Vec<Option<&'a str>> {
        vec![
            lookups.find(LookupKind::Products, self.product_id),
            lookups.find(LookupKind::Vendors, self.vendor_id),
            Some(self.invoice_number.as_str()),
        ]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<String> {
        vec![
            self.purchase_id.to_string(),
            lookups.label(LookupKind::Products, self.product_id).to_string(),
            lookups.label(LookupKind::Vendors, self.vendor_id).to_string(),
            format!("{} {}", self.quantity, self.unit).trim().to_string(),
            self.unit_price.to_string(),
            self.total().map_or_else(|| cell(None), |total| format!("{total:.2}")),
            cell(Some(self.purchase_date.as_str()).filter(|d| !d.is_empty())),
            self.invoice_number.clone(),
        ]
    }

    fn to_draft(&self) -> PurchaseDraft {
        PurchaseDraft {
            product_id: self.product_id.to_string(),
            quantity: self.quantity.to_string(),
            unit: if self.unit.is_empty() { DEFAULT_UNIT.to_string() } else { self.unit.clone() },
            vendor_id: self.vendor_id.to_string(),
            purchase_date: self.purchase_date.clone(),
            unit_price: self.unit_price.to_string(),
            invoice_number: self.invoice_number.clone(),
            invoice_upload: self.invoice_upload.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseDraft {
    pub product_id: String,
    pub quantity: String,
    pub unit: String,
    pub vendor_id: String,
    pub purchase_date: String,
    pub unit_price: String,
    pub invoice_number: String,
    /// Local file name of the invoice scan. Not sent.
    pub invoice_upload: String,
}

impl Default for PurchaseDraft {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            quantity: String::new(),
            unit: DEFAULT_UNIT.to_string(),
            vendor_id: String::new(),
            purchase_date: String::new(),
            unit_price: String::new(),
            invoice_number: String::new(),
            invoice_upload: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchasePayload {
    pub product_id: EntityId,
    pub quantity: Decimal,
    pub unit: String,
    pub vendor_id: EntityId,
    pub purchase_date: String,
    pub unit_price: Decimal,
    pub invoice_number: String,
}

fn positive(value: &str) -> Option<Decimal> {
    validation::parse_decimal(value).filter(|d| d.is_sign_positive() && !d.is_zero())
}

impl Draft for PurchaseDraft {
    type Payload = PurchasePayload;

    const FIELDS: &'static [&'static str] = &[
        "product_id",
        "quantity",
        "unit",
        "vendor_id",
        "purchase_date",
        "unit_price",
        "invoice_number",
        "invoice_upload",
    ];

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        let slot = match field {
            "product_id" => &mut self.product_id,
            "quantity" => &mut self.quantity,
            "unit" => &mut self.unit,
            "vendor_id" => &mut self.vendor_id,
            "purchase_date" => &mut self.purchase_date,
            "unit_price" => &mut self.unit_price,
            "invoice_number" => &mut self.invoice_number,
            "invoice_upload" => &mut self.invoice_upload,
            _ => return Err(FieldError::Unknown(field.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn field(&self, field: &str) -> Option<String> {
        match field {
            "product_id" => text(&self.product_id),
            "quantity" => text(&self.quantity),
            "unit" => text(&self.unit),
            "vendor_id" => text(&self.vendor_id),
            "purchase_date" => text(&self.purchase_date),
            "unit_price" => text(&self.unit_price),
            "invoice_number" => text(&self.invoice_number),
            "invoice_upload" => text(&self.invoice_upload),
            _ => None,
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if validation::parse_id(&self.product_id).is_none() {
            errors.push("Product is required");
        }
        if positive(&self.quantity).is_none() {
            errors.push("Valid quantity is required");
        }
        if validation::is_blank(&self.unit) {
            errors.push("Unit is required");
        } else {
            errors.one_of(&self.unit, UNITS, "Unit must be one of Kg, Litre, Pack, Pieces");
        }
        if positive(&self.unit_price).is_none() {
            errors.push("Valid unit price is required");
        }
        errors.require(&self.purchase_date, "Purchase date is required");
        errors.date(&self.purchase_date, "Purchase date must be YYYY-MM-DD");
        if validation::parse_id(&self.vendor_id).is_none() {
            errors.push("Vendor is required");
        }
        errors.require(&self.invoice_number, "Invoice number is required");
        errors
    }

    fn payload(&self) -> Result<PurchasePayload, ValidationErrors> {
        self.validate().into_result()?;
        Ok(PurchasePayload {
            product_id: validation::parse_id(&self.product_id).unwrap_or_default(),
            quantity: positive(&self.quantity).unwrap_or_default(),
            unit: self.unit.trim().to_string(),
            vendor_id: validation::parse_id(&self.vendor_id).unwrap_or_default(),
            purchase_date: self.purchase_date.trim().to_string(),
            unit_price: positive(&self.unit_price).unwrap_or_default(),
            invoice_number: self.invoice_number.trim().to_string(),
        })
    }
}

#[cfg(test)]
#[path = "purchase_test.rs"]
mod tests;
