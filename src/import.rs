use csv::StringRecord;
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::models::{MetricKind, SuiteResult, TestRunDocument};
use crate::store::RunStore;

/// Separates the suite name from the metric in headers such as `ログイン：OK`.
pub const DEFAULT_DELIMITER: char = '：';
/// Suite whose columns carry the overall totals of the run.
pub const DEFAULT_AGGREGATE_SUITE: &str = "シナリオテスト総計";

const DATE_COLUMN: &str = "Date";
const SUCCESS_RATE_COLUMN: &str = "Success Rate (%)";

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub delimiter: char,
    pub aggregate_suite: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            aggregate_suite: DEFAULT_AGGREGATE_SUITE.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub documents_inserted: usize,
    pub suites: Vec<String>,
}

/// Documents parsed from one export, plus the suites its header declared.
#[derive(Debug)]
pub struct ParsedExport {
    pub suites: Vec<String>,
    pub documents: Vec<TestRunDocument>,
}

#[derive(Debug)]
struct SuiteColumns {
    name: String,
    columns: Vec<(MetricKind, usize)>,
}

/// Column positions resolved once from the CSV header.
#[derive(Debug)]
pub struct HeaderLayout {
    names: Vec<String>,
    date: usize,
    success_rate: usize,
    ok: usize,
    ng: usize,
    total: usize,
    suites: Vec<SuiteColumns>,
}

impl HeaderLayout {
    pub fn from_headers(headers: &StringRecord, options: &ImportOptions) -> Result<Self> {
        let names: Vec<String> = headers
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut date = None;
        let mut success_rate = None;
        let mut aggregate: HashMap<MetricKind, usize> = HashMap::new();
        let mut suites: IndexMap<String, Vec<(MetricKind, usize)>> = IndexMap::new();

        for (idx, name) in names.iter().enumerate() {
            let Some((suite, token)) = name.split_once(options.delimiter) else {
                match name.as_str() {
                    DATE_COLUMN => {
                        date.get_or_insert(idx);
                    }
                    SUCCESS_RATE_COLUMN => {
                        success_rate.get_or_insert(idx);
                    }
                    _ => debug!("Column '{name}' is not a suite column, skipping"),
                }
                continue;
            };

            let (suite, token) = (suite.trim(), token.trim());
            let kind = MetricKind::from_token(token);

            if suite == options.aggregate_suite {
                match kind {
                    Some(kind) => {
                        aggregate.entry(kind).or_insert(idx);
                    }
                    None => debug!("Unknown aggregate metric '{token}' in column '{name}'"),
                }
                continue;
            }

            // Variants such as `シナリオテスト総計(前日)` are totals too, never suites
            if suite.contains(options.aggregate_suite.as_str()) {
                debug!("Column '{name}' is a variant of the aggregate suite, skipping");
                continue;
            }

            // Register the suite even when the metric is unknown so every
            // document lists the same suites.
            let columns = suites.entry(suite.to_string()).or_default();
            match kind {
                Some(kind) => columns.push((kind, idx)),
                None => debug!("Unknown metric '{token}' for suite '{suite}', ignoring column"),
            }
        }

        let aggregate_column = |kind: MetricKind| {
            aggregate.get(&kind).copied().ok_or_else(|| {
                ReportError::MissingColumn(format!(
                    "{}{}{}",
                    options.aggregate_suite,
                    options.delimiter,
                    kind.label()
                ))
            })
        };

        Ok(Self {
            date: date.ok_or_else(|| ReportError::MissingColumn(DATE_COLUMN.to_string()))?,
            success_rate: success_rate
                .ok_or_else(|| ReportError::MissingColumn(SUCCESS_RATE_COLUMN.to_string()))?,
            ok: aggregate_column(MetricKind::Ok)?,
            ng: aggregate_column(MetricKind::Ng)?,
            total: aggregate_column(MetricKind::Total)?,
            suites: suites
                .into_iter()
                .map(|(name, columns)| SuiteColumns { name, columns })
                .collect(),
            names,
        })
    }

    pub fn suite_names(&self) -> Vec<String> {
        self.suites.iter().map(|s| s.name.clone()).collect()
    }

    /// Reshapes one CSV row. `line` is only used in error messages.
    pub fn document(&self, record: &StringRecord, line: usize) -> Result<TestRunDocument> {
        let suites = self
            .suites
            .iter()
            .map(|suite| {
                let mut result = SuiteResult::new(suite.name.as_str());
                for &(kind, idx) in &suite.columns {
                    result.set_metric(kind, self.optional_int(record, idx, line)?);
                }
                Ok(result)
            })
            .collect::<Result<Vec<_>>>()?;

        let success_rate = cell(record, self.success_rate);

        Ok(TestRunDocument {
            date: cell(record, self.date).to_string(),
            ok: self.required_int(record, self.ok, line)?,
            ng: self.required_int(record, self.ng, line)?,
            total: self.required_int(record, self.total, line)?,
            suites,
            success_rate: success_rate
                .parse::<f64>()
                .map_err(|_| self.invalid(self.success_rate, line, success_rate))?,
        })
    }

    fn required_int(&self, record: &StringRecord, idx: usize, line: usize) -> Result<i64> {
        let raw = cell(record, idx);
        parse_int(raw).ok_or_else(|| self.invalid(idx, line, raw))
    }

    fn optional_int(&self, record: &StringRecord, idx: usize, line: usize) -> Result<Option<i64>> {
        let raw = cell(record, idx);
        if raw.is_empty() {
            return Ok(None);
        }
        parse_int(raw)
            .map(Some)
            .ok_or_else(|| self.invalid(idx, line, raw))
    }

    fn invalid(&self, idx: usize, line: usize, raw: &str) -> ReportError {
        ReportError::InvalidValue {
            column: self.names[idx].clone(),
            line,
            value: raw.to_string(),
        }
    }
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or_default()
}

/// Spreadsheet exports sometimes write counts as `8.0`; integral floats are accepted.
fn parse_int(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().or_else(|| {
        let value = raw.parse::<f64>().ok()?;
        #[allow(clippy::cast_possible_truncation)]
        let int = value as i64;
        (value.is_finite() && value.fract() == 0.0).then_some(int)
    })
}

pub fn read_documents<R: Read>(reader: R, options: &ImportOptions) -> Result<ParsedExport> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let layout = HeaderLayout::from_headers(&headers, options)?;

    let documents = reader
        .records()
        .enumerate()
        .map(|(idx, record)| {
            let record = record?;
            // Quoted cells may span lines, so prefer the reader's position
            #[allow(clippy::cast_possible_truncation)]
            let line = record.position().map_or(idx + 2, |p| p.line() as usize);
            layout.document(&record, line)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ParsedExport {
        suites: layout.suite_names(),
        documents,
    })
}

/// Inserts one document per CSV row. Re-importing the same file inserts the
/// rows again.
pub async fn import_csv(
    path: &Path,
    store: &dyn RunStore,
    options: &ImportOptions,
) -> Result<ImportSummary> {
    info!("Reading scenario results from {}", path.display());

    let file = File::open(path)?;
    let parsed = read_documents(file, options)?;

    if parsed.documents.is_empty() {
        warn!("No rows found in {}", path.display());
    }

    info!(
        "Parsed {} rows with {} suites",
        parsed.documents.len(),
        parsed.suites.len()
    );

    let mut documents_inserted = 0;
    for document in &parsed.documents {
        store.insert(document).await?;
        documents_inserted += 1;
        debug!("Inserted results for {}", document.date);
    }

    info!("Inserted {documents_inserted} documents");

    Ok(ImportSummary {
        rows_read: parsed.documents.len(),
        documents_inserted,
        suites: parsed.suites,
    })
}
