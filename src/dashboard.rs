//! Dashboard summary cards, computed from the live collections.

use rust_decimal::Decimal;
use tracing::info;

use crate::api::{self, ApiError, ResourceApi};
use crate::entity::customer::Customer;
use crate::entity::product::Product;
use crate::entity::purchase::Purchase;
use crate::entity::sale::Sale;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_customers: usize,
    pub total_orders: usize,
    /// Σ sale totals; `None` when the sum overflows.
    pub revenue: Option<Decimal>,
    /// Σ purchase quantity × unit price; `None` on overflow.
    pub purchase_spend: Option<Decimal>,
    /// Sales whose payment is not settled.
    pub outstanding_orders: usize,
}

/// One labelled figure on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub value: String,
}

impl DashboardSummary {
    #[must_use]
    pub fn from_lists(products: &[Product], customers: &[Customer], sales: &[Sale], purchases: &[Purchase]) -> Self {
        Self {
            total_products: products.len(),
            total_customers: customers.len(),
            total_orders: sales.len(),
            revenue: sales.iter().try_fold(Decimal::ZERO, |sum, s| sum.checked_add(s.total_sale_price)),
            purchase_spend: purchases
                .iter()
                .try_fold(Decimal::ZERO, |sum, p| sum.checked_add(p.total()?)),
            outstanding_orders: sales.iter().filter(|s| !s.is_settled()).count(),
        }
    }

    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        vec![
            Card { title: "Total Products", value: self.total_products.to_string() },
            Card { title: "Total Customers", value: self.total_customers.to_string() },
            Card { title: "Total Orders", value: self.total_orders.to_string() },
            Card { title: "Revenue", value: money(self.revenue) },
            Card { title: "Purchase Spend", value: money(self.purchase_spend) },
            Card { title: "Outstanding Orders", value: self.outstanding_orders.to_string() },
        ]
    }
}

fn money(amount: Option<Decimal>) -> String {
    amount.map_or_else(|| "-".to_string(), |amount| format!("{amount:.2}"))
}

/// Fetch the four collections and summarise them.
///
/// # Errors
///
/// The first failed list call.
pub async fn fetch<A: ResourceApi + ?Sized>(api: &A) -> Result<DashboardSummary, ApiError> {
    let products = api::list::<Product, A>(api).await?;
    let customers = api::list::<Customer, A>(api).await?;
    let sales = api::list::<Sale, A>(api).await?;
    let purchases = api::list::<Purchase, A>(api).await?;
    let summary = DashboardSummary::from_lists(&products, &customers, &sales, &purchases);
    info!(
        products = summary.total_products,
        customers = summary.total_customers,
        orders = summary.total_orders,
        "dashboard: summary computed"
    );
    Ok(summary)
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
