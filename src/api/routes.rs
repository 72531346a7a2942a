//! Route conventions.
//!
//! The backend grew two path conventions: plain REST (`/vendors/{id}`) and
//! action suffixes (`/sales/update/{id}`). One style is chosen per client
//! instead of per resource.

use reqwest::Method;

use super::types::ApiCall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteStyle {
    /// `GET /res`, `POST /res`, `PUT /res/{id}`, `DELETE /res/{id}`.
    #[default]
    Rest,
    /// `GET /res/list`, `POST /res/add`, `PUT /res/update/{id}`, `DELETE /res/delete/{id}`.
    Action,
}

/// Resolve a call into an HTTP method and a path relative to the base URL
/// (no leading slash).
#[must_use]
pub fn endpoint(call: &ApiCall, style: RouteStyle) -> (Method, String) {
    match (call, style) {
        (ApiCall::List { resource }, RouteStyle::Rest) => (Method::GET, (*resource).to_string()),
        (ApiCall::List { resource }, RouteStyle::Action) => (Method::GET, format!("{resource}/list")),
        (ApiCall::Create { resource, .. }, RouteStyle::Rest) => (Method::POST, (*resource).to_string()),
        (ApiCall::Create { resource, .. }, RouteStyle::Action) => (Method::POST, format!("{resource}/add")),
        (ApiCall::Update { resource, id, .. }, RouteStyle::Rest) => (Method::PUT, format!("{resource}/{id}")),
        (ApiCall::Update { resource, id, .. }, RouteStyle::Action) => {
            (Method::PUT, format!("{resource}/update/{id}"))
        }
        (ApiCall::Delete { resource, id }, RouteStyle::Rest) => (Method::DELETE, format!("{resource}/{id}")),
        (ApiCall::Delete { resource, id }, RouteStyle::Action) => {
            (Method::DELETE, format!("{resource}/delete/{id}"))
        }
        (ApiCall::Post { path, .. }, _) => (Method::POST, path.trim_start_matches('/').to_string()),
    }
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
