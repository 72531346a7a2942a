//! Products. Each belongs to a category; the list endpoint usually joins the
//! category name in, and the category lookup covers rows where it does not.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Draft, Entity, EntityId, Unsortable, cell, text};
use crate::lookup::{LookupKind, Lookups};
use crate::validation::{self, FieldError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: EntityId,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub sku_number: Option<String>,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub product_specification: Option<String>,
    #[serde(default)]
    pub product_weight: Option<Decimal>,
}

impl Product {
    /// Category label: the joined name, else the lookup.
    #[must_use]
    pub fn category_label<'a>(&'a self, lookups: &'a Lookups) -> Option<&'a str> {
        self.category_name
            .as_deref()
            .or_else(|| self.category_id.and_then(|id| lookups.find(LookupKind::Categories, id)))
    }
}

impl Entity for Product {
    type Draft = ProductDraft;
    type SortKey = Unsortable;

    const RESOURCE: &'static str = "products";
    const NOUN: &'static str = "product";
    const PLURAL: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Category", "SKU", "Weight", "Description"];
    const LOOKUPS: &'static [LookupKind] = &[LookupKind::Categories];

    fn id(&self) -> EntityId {
        self.product_id
    }

    fn label(&self) -> &str {
        &self.product_name
    }

    fn search_fields<'a>(&'a self, lookups: &'a Lookups) -> Vec<Option<&'a str>> {
        vec![Some(self.product_name.as_str()), self.category_label(lookups)]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<String> {
        let category = match (self.category_label(lookups), self.category_id) {
            (Some(label), _) => label.to_string(),
            (None, Some(id)) => lookups.label(LookupKind::Categories, id).to_string(),
            (None, None) => cell(None),
        };
        vec![
            self.product_id.to_string(),
            self.product_name.clone(),
            category,
            cell(self.sku_number.as_deref()),
            self.product_weight.map_or_else(|| cell(None), |w| w.to_string()),
            cell(self.product_description.as_deref()),
        ]
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            product_name: self.product_name.clone(),
            category_id: self.category_id.map(|id| id.to_string()).unwrap_or_default(),
            sku_number: self.sku_number.clone().unwrap_or_default(),
            product_description: self.product_description.clone().unwrap_or_default(),
            product_specification: self.product_specification.clone().unwrap_or_default(),
            product_weight: self.product_weight.map(|w| w.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub product_name: String,
    pub category_id: String,
    pub sku_number: String,
    pub product_description: String,
    pub product_specification: String,
    pub product_weight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub product_name: String,
    pub category_id: EntityId,
    pub sku_number: String,
    pub product_description: String,
    pub product_specification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_weight: Option<Decimal>,
}

impl Draft for ProductDraft {
    type Payload = ProductPayload;

    const FIELDS: &'static [&'static str] = &[
        "product_name",
        "category_id",
        "sku_number",
        "product_description",
        "product_specification",
        "product_weight",
    ];

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        let slot = match field {
            "product_name" => &mut self.product_name,
            "category_id" => &mut self.category_id,
            "sku_number" => &mut self.sku_number,
            "product_description" => &mut self.product_description,
            "product_specification" => &mut self.product_specification,
            "product_weight" => &mut self.product_weight,
            _ => return Err(FieldError::Unknown(field.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn field(&self, field: &str) -> Option<String> {
        match field {
            "product_name" => text(&self.product_name),
            "category_id" => text(&self.category_id),
            "sku_number" => text(&self.sku_number),
            "product_description" => text(&self.product_description),
            "product_specification" => text(&self.product_specification),
            "product_weight" => text(&self.product_weight),
            _ => None,
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require(&self.product_name, "Product name is required");
        if validation::parse_id(&self.category_id).is_none() {
            errors.push("Category is required");
        }
        if !validation::is_blank(&self.product_weight)
            && validation::parse_decimal(&self.product_weight).is_none_or(|w| w.is_sign_negative())
        {
            errors.push("Product weight must be a non-negative number");
        }
        errors
    }

    fn payload(&self) -> Result<ProductPayload, ValidationErrors> {
        self.validate().into_result()?;
        let category_id = validation::parse_id(&self.category_id).unwrap_or_default();
        Ok(ProductPayload {
            product_name: self.product_name.trim().to_string(),
            category_id,
            sku_number: self.sku_number.trim().to_string(),
            product_description: self.product_description.trim().to_string(),
            product_specification: self.product_specification.trim().to_string(),
            product_weight: validation::parse_decimal(&self.product_weight),
        })
    }
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
