//! Product categories. The only table with column sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{Draft, Entity, EntityId, cell, text};
use crate::lookup::Lookups;
use crate::validation::{FieldError, ValidationErrors};

pub const NAME_MAX: usize = 15;
pub const IMAGE_URL_MAX: usize = 255;
pub const DESCRIPTION_MAX: usize = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: EntityId,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub category_image: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Sortable category columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySortKey {
    Id,
    Name,
    Description,
}

impl CategorySortKey {
    /// Parse a column name as typed on the command line.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" | "category_id" => Some(Self::Id),
            "name" | "category_name" => Some(Self::Name),
            "description" => Some(Self::Description),
            _ => None,
        }
    }
}

impl Entity for Category {
    type Draft = CategoryDraft;
    type SortKey = CategorySortKey;

    const RESOURCE: &'static str = "product-categories";
    const NOUN: &'static str = "product category";
    const PLURAL: &'static str = "product categories";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Description", "Image"];

    fn id(&self) -> EntityId {
        self.category_id
    }

    fn label(&self) -> &str {
        &self.category_name
    }

    fn search_fields<'a>(&'a self, _lookups: &'a Lookups) -> Vec<Option<&'a str>> {
        vec![Some(self.category_name.as_str()), self.description.as_deref()]
    }

    fn cells(&self, _lookups: &Lookups) -> Vec<String> {
        vec![
            self.category_id.to_string(),
            self.category_name.clone(),
            cell(self.description.as_deref()),
            self.category_image.clone(),
        ]
    }

    fn to_draft(&self) -> CategoryDraft {
        CategoryDraft {
            category_name: self.category_name.clone(),
            category_image: self.category_image.clone(),
            description: self.description.clone().unwrap_or_default(),
        }
    }

    fn parse_sort_key(column: &str) -> Option<CategorySortKey> {
        CategorySortKey::parse(column)
    }

    fn compare(&self, other: &Self, key: CategorySortKey) -> Ordering {
        match key {
            CategorySortKey::Id => self.category_id.cmp(&other.category_id),
            CategorySortKey::Name => self.category_name.cmp(&other.category_name),
            CategorySortKey::Description => {
                let left = self.description.as_deref().unwrap_or_default();
                let right = other.description.as_deref().unwrap_or_default();
                left.cmp(right)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub category_name: String,
    pub category_image: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    pub category_name: String,
    pub category_image: String,
    pub description: String,
}

impl Draft for CategoryDraft {
    type Payload = CategoryPayload;

    const FIELDS: &'static [&'static str] = &["category_name", "category_image", "description"];

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        let slot = match field {
            "category_name" => &mut self.category_name,
            "category_image" => &mut self.category_image,
            "description" => &mut self.description,
            _ => return Err(FieldError::Unknown(field.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn field(&self, field: &str) -> Option<String> {
        match field {
            "category_name" => text(&self.category_name),
            "category_image" => text(&self.category_image),
            "description" => text(&self.description),
            _ => None,
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require(&self.category_name, "Category Name is required");
        errors.max_len(&self.category_name, NAME_MAX, "Category Name");
        errors.require(&self.category_image, "Image URL is required");
        errors.max_len(&self.category_image, IMAGE_URL_MAX, "Image URL");
        errors.max_len(&self.description, DESCRIPTION_MAX, "Description");
        errors
    }

    fn payload(&self) -> Result<CategoryPayload, ValidationErrors> {
        self.validate().into_result()?;
        Ok(CategoryPayload {
            category_name: self.category_name.trim().to_string(),
            category_image: self.category_image.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
#[path = "category_test.rs"]
mod tests;
