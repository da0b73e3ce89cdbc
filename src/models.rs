use serde::{Deserialize, Serialize};

/// One day of scenario-test results, as stored in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRunDocument {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "OK")]
    pub ok: i64,
    #[serde(rename = "NG")]
    pub ng: i64,
    #[serde(rename = "Total")]
    pub total: i64,
    #[serde(rename = "Suite")]
    pub suites: Vec<SuiteResult>,
    #[serde(rename = "SuccessRate")]
    pub success_rate: f64,
}

impl TestRunDocument {
    pub fn suite(&self, name: &str) -> Option<&SuiteResult> {
        self.suites.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteResult {
    pub name: String,
    #[serde(rename = "OK")]
    pub ok: Option<i64>,
    #[serde(rename = "NG")]
    pub ng: Option<i64>,
    #[serde(rename = "Total")]
    pub total: Option<i64>,
}

impl SuiteResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ok: None,
            ng: None,
            total: None,
        }
    }

    pub fn metric(&self, kind: MetricKind) -> Option<i64> {
        match kind {
            MetricKind::Ok => self.ok,
            MetricKind::Ng => self.ng,
            MetricKind::Total => self.total,
        }
    }

    pub fn set_metric(&mut self, kind: MetricKind, value: Option<i64>) {
        match kind {
            MetricKind::Ok => self.ok = value,
            MetricKind::Ng => self.ng = value,
            MetricKind::Total => self.total = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Ok,
    Ng,
    Total,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Ok, MetricKind::Ng, MetricKind::Total];

    /// Maps the metric part of a suite header. The export labels totals as
    /// "シナリオ総数" (scenario count).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "OK" => Some(Self::Ok),
            "NG" => Some(Self::Ng),
            "Total" | "シナリオ総数" => Some(Self::Total),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Ng => "NG",
            Self::Total => "Total",
        }
    }
}
