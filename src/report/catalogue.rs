//! Report Definitions
//!
//! Lookup table from report id to its panels. Every panel starts from the
//! source table and runs its own steps; panels come back in display order.

use crate::chart::ChartMetadata;
use crate::dataset::*;
use crate::report::step::AggregationStep;
use crate::report::ReportId;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// One chart of a report: how to derive its table and how to draw it
#[derive(Debug, Clone)]
pub struct PanelDefinition {
    pub steps: Vec<AggregationStep>,
    pub chart: ChartMetadata,
}

#[derive(Debug, Clone)]
pub struct ReportDefinition {
    pub id: ReportId,
    pub panels: Vec<PanelDefinition>,
}

impl ReportDefinition {
    /// Source columns any panel reads, first use first
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for panel in &self.panels {
            // Only the first step reads the source table directly
            if let Some(step) = panel.steps.first() {
                for column in step.input_columns() {
                    if !columns.contains(&column) {
                        columns.push(column);
                    }
                }
            }
        }
        columns
    }
}

lazy_static! {
    static ref CATALOGUE: HashMap<ReportId, ReportDefinition> = build_catalogue()
        .into_iter()
        .map(|definition| (definition.id, definition))
        .collect();
}

pub fn definition(id: ReportId) -> Option<&'static ReportDefinition> {
    CATALOGUE.get(&id)
}

fn panel(steps: Vec<AggregationStep>, chart: ChartMetadata) -> PanelDefinition {
    PanelDefinition { steps, chart }
}

fn report(id: ReportId, panels: Vec<PanelDefinition>) -> ReportDefinition {
    ReportDefinition { id, panels }
}

fn build_catalogue() -> Vec<ReportDefinition> {
    let sales_by_invoice_type = vec![
        AggregationStep::group_sum(&[INVOICE_TYPE], TOTAL_SALES),
        AggregationStep::sort_desc(TOTAL_SALES),
    ];

    vec![
        report(
            ReportId::Overview,
            vec![panel(vec![AggregationStep::head(10)], ChartMetadata::table("Overview"))],
        ),
        report(
            ReportId::SalesByProductCategory,
            vec![
                panel(
                    vec![AggregationStep::group_sum(&[PRODUCT_CATEGORY], TOTAL_SALES)],
                    ChartMetadata::bar(
                        "Total Sales by Product Category",
                        PRODUCT_CATEGORY,
                        TOTAL_SALES,
                    ),
                ),
                panel(
                    vec![AggregationStep::group_sum(
                        &[INVOICE_DATE, PRODUCT_CATEGORY],
                        TOTAL_SALES,
                    )],
                    ChartMetadata::line(
                        "Sales Trend Over Time by Product Category",
                        INVOICE_DATE,
                        TOTAL_SALES,
                    )
                    .with_color(PRODUCT_CATEGORY),
                ),
            ],
        ),
        report(
            ReportId::SalesByProductCategoryInEachCity,
            vec![panel(
                vec![AggregationStep::group_sum(
                    &[CUSTOMER_CITY, PRODUCT_CATEGORY],
                    TOTAL_SALES,
                )],
                ChartMetadata::bar(
                    "Total Sales by Product Category in Each City",
                    CUSTOMER_CITY,
                    TOTAL_SALES,
                )
                .with_color(PRODUCT_CATEGORY)
                .grouped(),
            )],
        ),
        report(
            ReportId::TopProductsByDemandInEachCategory,
            vec![panel(
                vec![
                    AggregationStep::group_sum(&[PRODUCT_CATEGORY, PRODUCT_NAME], ITEM_QTY),
                    AggregationStep::top_n_within(5, ITEM_QTY, PRODUCT_CATEGORY),
                ],
                ChartMetadata::bar(
                    "Top 5 Products by Demand in Each Category",
                    PRODUCT_NAME,
                    ITEM_QTY,
                )
                .with_color(PRODUCT_CATEGORY),
            )],
        ),
        report(
            ReportId::CategoryDemandByGender,
            vec![panel(
                vec![AggregationStep::group_sum(&[PRODUCT_CATEGORY, CUSTOMER_GENDER], ITEM_QTY)],
                ChartMetadata::bar("Category Demand by Gender", PRODUCT_CATEGORY, ITEM_QTY)
                    .with_color(CUSTOMER_GENDER)
                    .grouped(),
            )],
        ),
        report(
            ReportId::SalesByCustomerGender,
            vec![panel(
                vec![AggregationStep::group_sum(&[CUSTOMER_GENDER], TOTAL_SALES)],
                ChartMetadata::bar("Sales by Customer Gender", CUSTOMER_GENDER, TOTAL_SALES),
            )],
        ),
        report(
            ReportId::SalesTrendOverTime,
            vec![panel(
                vec![AggregationStep::group_sum(&[INVOICE_DATE], TOTAL_SALES)],
                ChartMetadata::line("Sales Trend Over Time", INVOICE_DATE, TOTAL_SALES),
            )],
        ),
        report(
            ReportId::TopSalesDays,
            vec![panel(
                vec![
                    AggregationStep::group_sum(&[INVOICE_DATE], TOTAL_SALES),
                    AggregationStep::top_n(5, TOTAL_SALES),
                ],
                ChartMetadata::bar("Top 5 Days with the Highest Sales", INVOICE_DATE, TOTAL_SALES),
            )],
        ),
        report(
            ReportId::CorrelationAnalysis,
            vec![panel(
                vec![AggregationStep::Correlation],
                ChartMetadata::heatmap("Correlation Heatmap"),
            )],
        ),
        report(
            ReportId::SalesByCustomerType,
            vec![
                panel(
                    vec![AggregationStep::group_sum(&[CUSTOMER_TYPE], TOTAL_SALES)],
                    ChartMetadata::bar("Total Sales by Customer Type", CUSTOMER_TYPE, TOTAL_SALES),
                ),
                panel(
                    vec![AggregationStep::group_sum(
                        &[CUSTOMER_COUNTRY, CUSTOMER_TYPE],
                        TOTAL_SALES,
                    )],
                    ChartMetadata::bar(
                        "Total Sales by Customer Type and Country",
                        CUSTOMER_COUNTRY,
                        TOTAL_SALES,
                    )
                    .with_color(CUSTOMER_TYPE)
                    .grouped(),
                ),
            ],
        ),
        report(
            ReportId::SalesPerOrderByCustomerType,
            vec![panel(
                vec![AggregationStep::group_mean(&[CUSTOMER_TYPE], TOTAL_SALES)],
                ChartMetadata::bar(
                    "Average Sales Per Order by Customer Type",
                    CUSTOMER_TYPE,
                    TOTAL_SALES,
                ),
            )],
        ),
        report(
            ReportId::SalesByInvoiceType,
            vec![
                panel(
                    vec![
                        AggregationStep::group_sum(&[INVOICE_TYPE], INVOICE_ITEMS_COUNT),
                        AggregationStep::sort_desc(INVOICE_ITEMS_COUNT),
                    ],
                    ChartMetadata::bar(
                        "Number of Items Sold by Invoice Type",
                        INVOICE_TYPE,
                        INVOICE_ITEMS_COUNT,
                    )
                    .with_color(INVOICE_TYPE)
                    .with_text(INVOICE_ITEMS_COUNT)
                    .with_label(INVOICE_ITEMS_COUNT, "Number of Items")
                    .with_label(INVOICE_TYPE, "Invoice Type"),
                ),
                panel(
                    sales_by_invoice_type.clone(),
                    ChartMetadata::bar("Total Sales by Invoice Type", INVOICE_TYPE, TOTAL_SALES)
                        .with_color(INVOICE_TYPE)
                        .with_text(TOTAL_SALES)
                        .with_label(TOTAL_SALES, "Total Sales (SAR)")
                        .with_label(INVOICE_TYPE, "Invoice Type"),
                ),
                panel(
                    sales_by_invoice_type,
                    ChartMetadata::pie(
                        "Sales Distribution by Invoice Type",
                        INVOICE_TYPE,
                        TOTAL_SALES,
                    )
                    .with_hole(0.4),
                ),
            ],
        ),
        report(
            ReportId::SalesAcrossStores,
            vec![panel(
                vec![AggregationStep::group_sum(&[STORE_ID], TOTAL_SALES)],
                ChartMetadata::bar("Sales Across Stores", STORE_ID, TOTAL_SALES),
            )],
        ),
        report(
            ReportId::SalesByProductAvailability,
            vec![panel(
                vec![AggregationStep::group_sum(&[PRODUCT_AVAILABILITY], TOTAL_SALES)],
                ChartMetadata::bar(
                    "Sales by Product Availability",
                    PRODUCT_AVAILABILITY,
                    TOTAL_SALES,
                ),
            )],
        ),
        report(
            ReportId::SalesByCustomerCountry,
            vec![
                panel(
                    vec![AggregationStep::group_sum(&[CUSTOMER_COUNTRY], INVOICE_ITEMS_COUNT)],
                    ChartMetadata::bar(
                        "Sales by Customer Country",
                        CUSTOMER_COUNTRY,
                        INVOICE_ITEMS_COUNT,
                    ),
                ),
                panel(
                    vec![
                        AggregationStep::group_sum(&[CUSTOMER_COUNTRY], TOTAL_SALES),
                        AggregationStep::top_n(5, TOTAL_SALES),
                    ],
                    ChartMetadata::bar(
                        "Top 5 Countries by Total Sales",
                        CUSTOMER_COUNTRY,
                        TOTAL_SALES,
                    ),
                ),
            ],
        ),
        report(
            ReportId::SalesByCustomerCity,
            vec![
                panel(
                    vec![AggregationStep::group_sum(&[CUSTOMER_CITY], TOTAL_SALES)],
                    ChartMetadata::bar("Total Sales by City", CUSTOMER_CITY, TOTAL_SALES),
                ),
                panel(
                    vec![AggregationStep::group_count(CUSTOMER_CITY, "City", "Count")],
                    ChartMetadata::pie("Customer Distribution by City", "City", "Count"),
                ),
            ],
        ),
    ]
}
