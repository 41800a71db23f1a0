use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Label reported as the top category when no category ranking exists.
pub const NOT_AVAILABLE: &str = "N/A";

/// Metrics message shown before any region has been selected.
pub const NO_SELECTION_MESSAGE: &str = "Please select a region.";

/// Metrics message shown when the selected region matches no records.
pub const NO_DATA_MESSAGE: &str = "No data for selected region.";

// ── Period ────────────────────────────────────────────────────────────────────

/// Calendar year-month bucket used to group the revenue trend.
///
/// Orders chronologically and renders as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// The month bucket containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── SaleRecord ────────────────────────────────────────────────────────────────

/// One transaction line from the sales dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    /// Shipping destination; compared case-insensitively when filtering.
    pub region: String,
    /// Product category.
    pub category: String,
    /// Units ordered.
    pub quantity: u64,
    /// Order amount.
    pub revenue: f64,
    /// Fulfilment status, e.g. `"Shipped"`.
    pub status: String,
    /// Business-to-business order flag.
    pub is_b2b: bool,
    date: NaiveDate,
    period: Period,
}

impl SaleRecord {
    /// Build a record, deriving its [`Period`] from `date`.
    pub fn new(
        region: impl Into<String>,
        category: impl Into<String>,
        quantity: u64,
        revenue: f64,
        status: impl Into<String>,
        is_b2b: bool,
        date: NaiveDate,
    ) -> Self {
        Self {
            region: region.into(),
            category: category.into(),
            quantity,
            revenue,
            status: status.into(),
            is_b2b,
            date,
            period: Period::from_date(date),
        }
    }

    /// Calendar date of the order.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Month bucket of [`Self::date`], computed once at construction.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Whether this record belongs to `region`, ignoring case.
    ///
    /// Both sides are uppercased, so `"ß"` matches `"SS"`.
    pub fn matches_region(&self, region: &str) -> bool {
        self.region.to_uppercase() == region.to_uppercase()
    }
}

// ── RecordSet ─────────────────────────────────────────────────────────────────

/// Ordered, read-only collection of prepared sales records.
///
/// There is no mutable access once built, so a `RecordSet` can be shared
/// across threads behind an `Arc` without locking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<SaleRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SaleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a SaleRecord;
    type IntoIter = std::slice::Iter<'a, SaleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ── Views ─────────────────────────────────────────────────────────────────────

/// A category and its summed quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryQuantity {
    pub category: String,
    pub quantity: u64,
}

/// A month and the revenue booked in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRevenue {
    pub period: Period,
    pub revenue: f64,
}

/// An order status and how many records carry it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Scalar metrics for the current selection.
///
/// Placeholder views carry a `message` and zeroed numbers; populated views
/// have `message == None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub count: usize,
    pub total_revenue: f64,
    pub average_revenue: f64,
    pub b2b_share_percent: f64,
    pub top_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SummaryMetrics {
    /// Zeroed metrics carrying an explanatory `message`.
    pub fn placeholder(message: impl Into<String>) -> Self {
        Self {
            count: 0,
            total_revenue: 0.0,
            average_revenue: 0.0,
            b2b_share_percent: 0.0,
            top_category: NOT_AVAILABLE.to_string(),
            message: Some(message.into()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.message.is_some()
    }
}

/// The four derived views recomputed on every selection change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    /// Up to six categories, highest quantity first.
    pub top_categories: Vec<CategoryQuantity>,
    /// Revenue per month, oldest first.
    pub revenue_trend: Vec<PeriodRevenue>,
    /// Up to five statuses, most frequent first.
    pub status_distribution: Vec<StatusCount>,
    pub metrics: SummaryMetrics,
}

impl DashboardViews {
    /// Empty ranking, trend and distribution plus placeholder metrics.
    pub fn placeholder(message: impl Into<String>) -> Self {
        Self {
            top_categories: Vec::new(),
            revenue_trend: Vec::new(),
            status_distribution: Vec::new(),
            metrics: SummaryMetrics::placeholder(message),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
