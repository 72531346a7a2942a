//! Customers buy through sales.

use serde::{Deserialize, Serialize};

use super::{Draft, Entity, EntityId, Unsortable, cell, lenient_opt_text, text};
use crate::lookup::Lookups;
use crate::validation::{self, FieldError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: EntityId,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub primary_contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub contact_number: Option<String>,
}

impl Entity for Customer {
    type Draft = CustomerDraft;
    type SortKey = Unsortable;

    const RESOURCE: &'static str = "customers";
    const NOUN: &'static str = "customer";
    const PLURAL: &'static str = "customers";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Contact", "Phone", "Email", "GST", "Address"];

    fn id(&self) -> EntityId {
        self.customer_id
    }

    fn label(&self) -> &str {
        &self.customer_name
    }

    fn search_fields<'a>(&'a self, _lookups: &'a Lookups) -> Vec<Option<&'a str>> {
        vec![Some(self.customer_name.as_str())]
    }

    fn cells(&self, _lookups: &Lookups) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.customer_name.clone(),
            cell(self.primary_contact.as_deref()),
            cell(self.contact_number.as_deref()),
            cell(self.email_id.as_deref()),
            cell(self.gst_number.as_deref()),
            cell(self.address.as_deref()),
        ]
    }

    fn to_draft(&self) -> CustomerDraft {
        let own = |v: &Option<String>| v.clone().unwrap_or_default();
        CustomerDraft {
            customer_name: self.customer_name.clone(),
            address: own(&self.address),
            email_id: own(&self.email_id),
            gst_number: own(&self.gst_number),
            primary_contact: own(&self.primary_contact),
            contact_number: own(&self.contact_number),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomerDraft {
    pub customer_name: String,
    pub address: String,
    pub email_id: String,
    pub gst_number: String,
    pub primary_contact: String,
    pub contact_number: String,
}

impl Draft for CustomerDraft {
    type Payload = CustomerDraft;

    const FIELDS: &'static [&'static str] = &[
        "customer_name",
        "primary_contact",
        "contact_number",
        "email_id",
        "gst_number",
        "address",
    ];

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        let slot = match field {
            "customer_name" => &mut self.customer_name,
            "address" => &mut self.address,
            "email_id" => &mut self.email_id,
            "gst_number" => &mut self.gst_number,
            "primary_contact" => &mut self.primary_contact,
            "contact_number" => &mut self.contact_number,
            _ => return Err(FieldError::Unknown(field.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn field(&self, field: &str) -> Option<String> {
        match field {
            "customer_name" => text(&self.customer_name),
            "address" => text(&self.address),
            "email_id" => text(&self.email_id),
            "gst_number" => text(&self.gst_number),
            "primary_contact" => text(&self.primary_contact),
            "contact_number" => text(&self.contact_number),
            _ => None,
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require(&self.customer_name, "Customer name is required");
        errors.require(&self.primary_contact, "Primary contact is required");
        errors.require(&self.contact_number, "Contact number is required");
        errors.require(&self.email_id, "Email is required");
        if !validation::is_blank(&self.email_id) && !validation::looks_like_email(&self.email_id) {
            errors.push("Email must be a valid address");
        }
        errors
    }

    fn payload(&self) -> Result<CustomerDraft, ValidationErrors> {
        self.validate().into_result()?;
        let trim = |v: &str| v.trim().to_string();
        Ok(CustomerDraft {
            customer_name: trim(&self.customer_name),
            address: trim(&self.address),
            email_id: trim(&self.email_id),
            gst_number: trim(&self.gst_number),
            primary_contact: trim(&self.primary_contact),
            contact_number: trim(&self.contact_number),
        })
    }
}

#[cfg(test)]
#[path = "customer_test.rs"]
mod tests;
