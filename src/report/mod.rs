//! Report catalogue: the named reports, their pipelines, and chart hints.

pub mod catalogue;
pub mod correlation;
pub mod step;

pub use catalogue::{definition, PanelDefinition, ReportDefinition};
pub use step::{AggregationStep, GroupingPolicy};

use crate::error::DashboardError;
use std::fmt;
use std::str::FromStr;

/// The reports offered in the dashboard navigation, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportId {
    Overview,
    SalesByProductCategory,
    SalesByProductCategoryInEachCity,
    TopProductsByDemandInEachCategory,
    CategoryDemandByGender,
    SalesByCustomerGender,
    SalesTrendOverTime,
    TopSalesDays,
    CorrelationAnalysis,
    SalesByCustomerType,
    SalesPerOrderByCustomerType,
    SalesByInvoiceType,
    SalesAcrossStores,
    SalesByProductAvailability,
    SalesByCustomerCountry,
    SalesByCustomerCity,
}

impl ReportId {
    pub const ALL: [ReportId; 16] = [
        ReportId::Overview,
        ReportId::SalesByProductCategory,
        ReportId::SalesByProductCategoryInEachCity,
        ReportId::TopProductsByDemandInEachCategory,
        ReportId::CategoryDemandByGender,
        ReportId::SalesByCustomerGender,
        ReportId::SalesTrendOverTime,
        ReportId::TopSalesDays,
        ReportId::CorrelationAnalysis,
        ReportId::SalesByCustomerType,
        ReportId::SalesPerOrderByCustomerType,
        ReportId::SalesByInvoiceType,
        ReportId::SalesAcrossStores,
        ReportId::SalesByProductAvailability,
        ReportId::SalesByCustomerCountry,
        ReportId::SalesByCustomerCity,
    ];

    /// Navigation label, also the identifier callers pass to the resolver
    pub fn name(&self) -> &'static str {
        match self {
            ReportId::Overview => "Overview",
            ReportId::SalesByProductCategory => "Sales by Product Category",
            ReportId::SalesByProductCategoryInEachCity => "Sales by Product Category in Each City",
            ReportId::TopProductsByDemandInEachCategory => {
                "Top Products by Demand in Each Category"
            }
            ReportId::CategoryDemandByGender => "Category Demand by Gender",
            ReportId::SalesByCustomerGender => "Sales by Customer Gender",
            ReportId::SalesTrendOverTime => "Sales Trend Over Time",
            ReportId::TopSalesDays => "Top Sales Days",
            ReportId::CorrelationAnalysis => "Correlation Analysis",
            ReportId::SalesByCustomerType => "Sales by Customer Type",
            ReportId::SalesPerOrderByCustomerType => "Sales Per Order by Customer Type",
            ReportId::SalesByInvoiceType => "Sales by Invoice Type",
            ReportId::SalesAcrossStores => "Sales Across Stores",
            ReportId::SalesByProductAvailability => "Sales by Product Availability",
            ReportId::SalesByCustomerCountry => "Sales by Customer Country",
            ReportId::SalesByCustomerCity => "Sales by Customer City",
        }
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportId {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Short label used by some callers for the city breakdown
        if s == "Sales by Category in Each City" {
            return Ok(ReportId::SalesByProductCategoryInEachCity);
        }

        ReportId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| DashboardError::UnknownReport(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for id in ReportId::ALL {
            assert_eq!(id.name().parse::<ReportId>().unwrap(), id);
        }
    }

    #[test]
    fn test_short_city_alias() {
        assert_eq!(
            "Sales by Category in Each City".parse::<ReportId>().unwrap(),
            ReportId::SalesByProductCategoryInEachCity
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(matches!(
            "sales by customer gender".parse::<ReportId>(),
            Err(DashboardError::UnknownReport(_))
        ));
    }
}
