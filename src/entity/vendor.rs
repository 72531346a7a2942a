//! Vendors supply purchases.

use serde::{Deserialize, Serialize};

use super::{Draft, Entity, EntityId, Unsortable, cell, lenient_opt_text, text};
use crate::lookup::Lookups;
use crate::validation::{self, FieldError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub vendor_id: EntityId,
    #[serde(default)]
    pub vendor_name: String,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub primary_contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
}

impl Entity for Vendor {
    type Draft = VendorDraft;
    type SortKey = Unsortable;

    const RESOURCE: &'static str = "vendors";
    const NOUN: &'static str = "vendor";
    const PLURAL: &'static str = "vendors";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "GST", "License", "Contact", "Phone", "Email"];

    fn id(&self) -> EntityId {
        self.vendor_id
    }

    fn label(&self) -> &str {
        &self.vendor_name
    }

    fn search_fields<'a>(&'a self, _lookups: &'a Lookups) -> Vec<Option<&'a str>> {
        vec![Some(self.vendor_name.as_str())]
    }

    fn cells(&self, _lookups: &Lookups) -> Vec<String> {
        vec![
            self.vendor_id.to_string(),
            self.vendor_name.clone(),
            cell(self.gst_number.as_deref()),
            cell(self.license_number.as_deref()),
            cell(self.primary_contact.as_deref()),
            cell(self.contact_number.as_deref()),
            cell(self.email_id.as_deref()),
        ]
    }

    fn to_draft(&self) -> VendorDraft {
        let own = |v: &Option<String>| v.clone().unwrap_or_default();
        VendorDraft {
            vendor_name: self.vendor_name.clone(),
            gst_number: own(&self.gst_number),
            license_number: own(&self.license_number),
            address: own(&self.address),
            primary_contact: own(&self.primary_contact),
            contact_number: own(&self.contact_number),
            email_id: own(&self.email_id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VendorDraft {
    pub vendor_name: String,
    pub gst_number: String,
    pub license_number: String,
    pub address: String,
    pub primary_contact: String,
    pub contact_number: String,
    pub email_id: String,
}

impl Draft for VendorDraft {
    /// Vendor forms post every field as text.
    type Payload = VendorDraft;

    const FIELDS: &'static [&'static str] = &[
        "vendor_name",
        "gst_number",
        "license_number",
        "address",
        "primary_contact",
        "contact_number",
        "email_id",
    ];

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        let slot = match field {
            "vendor_name" => &mut self.vendor_name,
            "gst_number" => &mut self.gst_number,
            "license_number" => &mut self.license_number,
            "address" => &mut self.address,
            "primary_contact" => &mut self.primary_contact,
            "contact_number" => &mut self.contact_number,
            "email_id" => &mut self.email_id,
            _ => return Err(FieldError::Unknown(field.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn field(&self, field: &str) -> Option<String> {
        match field {
            "vendor_name" => text(&self.vendor_name),
            "gst_number" => text(&self.gst_number),
            "license_number" => text(&self.license_number),
            "address" => text(&self.address),
            "primary_contact" => text(&self.primary_contact),
            "contact_number" => text(&self.contact_number),
            "email_id" => text(&self.email_id),
            _ => None,
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require(&self.vendor_name, "Vendor name is required");
        if !validation::is_blank(&self.email_id) && !validation::looks_like_email(&self.email_id) {
            errors.push("Email must be a valid address");
        }
        errors
    }

    fn payload(&self) -> Result<VendorDraft, ValidationErrors> {
        self.validate().into_result()?;
        let trim = |v: &str| v.trim().to_string();
        Ok(VendorDraft {
            vendor_name: trim(&self.vendor_name),
            gst_number: trim(&self.gst_number),
            license_number: trim(&self.license_number),
            address: trim(&self.address),
            primary_contact: trim(&self.primary_contact),
            contact_number: trim(&self.contact_number),
            email_id: trim(&self.email_id),
        })
    }
}

#[cfg(test)]
#[path = "vendor_test.rs"]
mod tests;
