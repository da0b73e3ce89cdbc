mod page;
pub mod refresh;
pub mod server;
pub mod views;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::TestRunDocument;
use views::{Panel, PieChart, PivotTable, Series};

/// All four dashboard views, derived together from one read of the collection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub refreshed_at: DateTime<Utc>,
    pub documents: usize,
    pub time_series: Panel<Vec<Series>>,
    pub success_rate: Panel<PieChart>,
    pub suite_failures: Panel<Vec<Series>>,
    pub table: Panel<PivotTable>,
}

impl DashboardSnapshot {
    pub fn from_documents(documents: &[TestRunDocument]) -> Self {
        Self {
            refreshed_at: Utc::now(),
            documents: documents.len(),
            time_series: views::time_series(documents),
            success_rate: views::success_pie(documents),
            suite_failures: views::suite_failures(documents),
            table: views::pivot_table(documents),
        }
    }
}
