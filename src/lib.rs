//! # stockroom
//!
//! Client library for the inventory-management admin backend: product
//! categories, products, vendors, customers, purchases, sales and users.
//!
//! DESIGN
//! ======
//! Every admin page has the same shape: fetch a list, search it, paginate
//! it, and create/update/delete records through the REST backend. That shape
//! lives once in [`workflow::ListManager`], parameterised by an
//! [`entity::Entity`] implementation per record type. The HTTP layer sits
//! behind the [`api::ResourceApi`] trait so workflows run against a scripted
//! backend in tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod entity;
pub mod listing;
pub mod lookup;
pub mod navigation;
pub mod validation;
pub mod workflow;

pub use api::{ApiClient, ApiError, ErrorCode, ResourceApi};
pub use config::ApiConfig;
pub use entity::{Entity, EntityId};
pub use workflow::{ListManager, Notice, NoticeLevel, WorkflowError};
