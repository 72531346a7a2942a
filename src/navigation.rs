//! Admin pages and their routes.

/// One entry of the admin sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    ProductCategories,
    ProductManagement,
    VendorManagement,
    CustomerManagement,
    PurchaseManagement,
    SalesManagement,
    LoginReset,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 8] = [
        Self::Dashboard,
        Self::ProductCategories,
        Self::ProductManagement,
        Self::VendorManagement,
        Self::CustomerManagement,
        Self::PurchaseManagement,
        Self::SalesManagement,
        Self::LoginReset,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::ProductCategories => "Product Categories",
            Self::ProductManagement => "Product Management",
            Self::VendorManagement => "Vendor Management",
            Self::CustomerManagement => "Customer Management",
            Self::PurchaseManagement => "Purchase Management",
            Self::SalesManagement => "Sales Management",
            Self::LoginReset => "Login & Password Reset",
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::ProductCategories => "/product-categories",
            Self::ProductManagement => "/product-management",
            Self::VendorManagement => "/vendor-management",
            Self::CustomerManagement => "/customer-management",
            Self::PurchaseManagement => "/purchase-management",
            Self::SalesManagement => "/sales-management",
            Self::LoginReset => "/login-reset",
        }
    }

    /// Short name used on the command line.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::ProductCategories => "categories",
            Self::ProductManagement => "products",
            Self::VendorManagement => "vendors",
            Self::CustomerManagement => "customers",
            Self::PurchaseManagement => "purchases",
            Self::SalesManagement => "sales",
            Self::LoginReset => "users",
        }
    }

    /// Exact route match.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|page| page.path() == path)
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|page| page.slug() == slug)
    }

    /// Whether this sidebar entry is highlighted for `current`. The root only
    /// matches itself; every other entry also matches nested routes.
    #[must_use]
    pub fn is_active(self, current: &str) -> bool {
        match self {
            Self::Dashboard => current == "/",
            _ => current.starts_with(self.path()),
        }
    }
}

#[cfg(test)]
#[path = "navigation_test.rs"]
mod tests;
