use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;

use crate::models::{MetricKind, TestRunDocument};

pub const NO_DATA_TITLE: &str = "No data";

const TIME_SERIES_TITLE: &str = "History of Daily Scenario Tests";
const PIE_TITLE: &str = "Latest Success Rate";
const SUITE_FAILURES_TITLE: &str = "History of NG Scenario Suite";
const TABLE_TITLE: &str = "Daily Scenario Results";

/// A dashboard region: either a figure or the "no data" placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Panel<T> {
    NoData { title: String },
    Ready { title: String, data: T },
}

impl<T> Panel<T> {
    fn no_data() -> Self {
        Self::NoData {
            title: NO_DATA_TITLE.to_string(),
        }
    }

    fn ready(title: &str, data: T) -> Self {
        Self::Ready {
            title: title.to_string(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub slices: Vec<Slice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub columns: Vec<String>,
    pub rows: Vec<IndexMap<String, Value>>,
}

/// Union of suite names across all documents, in first-seen order.
pub fn suite_names(documents: &[TestRunDocument]) -> IndexSet<String> {
    documents
        .iter()
        .flat_map(|doc| doc.suites.iter().map(|s| s.name.clone()))
        .collect()
}

/// Overall OK / NG / Total per day, in store order.
pub fn time_series(documents: &[TestRunDocument]) -> Panel<Vec<Series>> {
    if documents.is_empty() {
        return Panel::no_data();
    }

    let dates: Vec<String> = documents.iter().map(|d| d.date.clone()).collect();
    let series = |name: &str, value: fn(&TestRunDocument) -> i64| Series {
        name: name.to_string(),
        x: dates.clone(),
        y: documents.iter().map(value).collect(),
    };

    Panel::ready(
        TIME_SERIES_TITLE,
        vec![
            series("Success", |d| d.ok),
            series("Failure", |d| d.ng),
            series("Total", |d| d.total),
        ],
    )
}

/// Success rate of the last document against its complement.
pub fn success_pie(documents: &[TestRunDocument]) -> Panel<PieChart> {
    let Some(latest) = documents.last() else {
        return Panel::no_data();
    };

    Panel::ready(
        PIE_TITLE,
        PieChart {
            slices: vec![
                Slice {
                    label: "Success Rate".to_string(),
                    value: latest.success_rate,
                },
                Slice {
                    label: "Failure Rate".to_string(),
                    value: 100.0 - latest.success_rate,
                },
            ],
        },
    )
}

/// NG count per suite over time. Days where a suite is missing, or has no NG
/// value, are skipped rather than zero-filled.
pub fn suite_failures(documents: &[TestRunDocument]) -> Panel<Vec<Series>> {
    if documents.is_empty() {
        return Panel::no_data();
    }

    let series = suite_names(documents)
        .into_iter()
        .map(|name| {
            let (x, y): (Vec<String>, Vec<i64>) = documents
                .iter()
                .filter_map(|doc| {
                    let ng = doc.suite(&name)?.ng?;
                    Some((doc.date.clone(), ng))
                })
                .unzip();
            Series { name, x, y }
        })
        .collect();

    Panel::ready(SUITE_FAILURES_TITLE, series)
}

/// One flat row per document with a `{suite}_{metric}` column for every known suite.
pub fn pivot_table(documents: &[TestRunDocument]) -> Panel<PivotTable> {
    if documents.is_empty() {
        return Panel::no_data();
    }

    let suites = suite_names(documents);

    let mut columns: Vec<String> = ["Date", "OK", "NG", "Total", "Success Rate (%)"]
        .iter()
        .map(ToString::to_string)
        .collect();
    for suite in &suites {
        for kind in MetricKind::ALL {
            columns.push(pivot_column(suite, kind));
        }
    }

    let rows = documents
        .iter()
        .map(|doc| {
            let mut row = IndexMap::with_capacity(columns.len());
            row.insert("Date".to_string(), Value::from(doc.date.as_str()));
            row.insert("OK".to_string(), Value::from(doc.ok));
            row.insert("NG".to_string(), Value::from(doc.ng));
            row.insert("Total".to_string(), Value::from(doc.total));
            row.insert("Success Rate (%)".to_string(), Value::from(doc.success_rate));

            for suite in &suites {
                let result = doc.suite(suite);
                for kind in MetricKind::ALL {
                    let value = result
                        .and_then(|r| r.metric(kind))
                        .map_or(Value::Null, Value::from);
                    row.insert(pivot_column(suite, kind), value);
                }
            }
            row
        })
        .collect();

    Panel::ready(TABLE_TITLE, PivotTable { columns, rows })
}

fn pivot_column(suite: &str, kind: MetricKind) -> String {
    format!("{suite}_{}", kind.label())
}
