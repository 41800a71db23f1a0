//! Region filtering and aggregation into the four dashboard views.

use std::collections::{BTreeMap, HashMap};

use sales_core::formatting::percentage;
use sales_core::models::{
    CategoryQuantity, DashboardViews, Period, PeriodRevenue, RecordSet, SaleRecord, StatusCount,
    SummaryMetrics, NOT_AVAILABLE, NO_DATA_MESSAGE, NO_SELECTION_MESSAGE,
};
use tracing::debug;

/// Maximum number of categories in the ranking.
pub const TOP_CATEGORY_LIMIT: usize = 6;

/// Maximum number of statuses in the distribution.
pub const TOP_STATUS_LIMIT: usize = 5;

/// Recompute all views for `selection`. See [`ViewAggregator::update`].
pub fn update(records: &RecordSet, selection: Option<&str>) -> DashboardViews {
    ViewAggregator::update(records, selection)
}

// ── ViewAggregator ────────────────────────────────────────────────────────────

/// Stateless helper that filters records by region and builds the views.
///
/// Every function is pure: the same inputs always produce the same output,
/// and nothing is carried over between calls.
pub struct ViewAggregator;

impl ViewAggregator {
    /// Filter `records` to `selection` and build the four views.
    ///
    /// A missing or blank selection and a selection that matches nothing both
    /// return empty views; only the metrics message tells them apart.
    pub fn update(records: &RecordSet, selection: Option<&str>) -> DashboardViews {
        let Some(selection) = selection.filter(|s| !s.trim().is_empty()) else {
            debug!("no region selected");
            return DashboardViews::placeholder(NO_SELECTION_MESSAGE);
        };

        let subset = Self::filter_region(records, selection);
        debug!(region = selection, matched = subset.len(), "aggregating views");

        if subset.is_empty() {
            return DashboardViews::placeholder(NO_DATA_MESSAGE);
        }

        let top_categories = Self::top_categories(&subset, TOP_CATEGORY_LIMIT);
        let revenue_trend = Self::revenue_trend(&subset);
        let status_distribution = Self::status_distribution(&subset, TOP_STATUS_LIMIT);
        let metrics = Self::summary_metrics(&subset, &top_categories);

        DashboardViews {
            top_categories,
            revenue_trend,
            status_distribution,
            metrics,
        }
    }

    /// Records whose region equals `region`, ignoring case, in dataset order.
    pub fn filter_region<'a>(records: &'a RecordSet, region: &str) -> Vec<&'a SaleRecord> {
        records.iter().filter(|r| r.matches_region(region)).collect()
    }

    /// Categories by summed quantity, highest first, at most `limit`.
    ///
    /// Equal totals keep the order in which the categories first appear.
    /// Records with a blank category are left out.
    pub fn top_categories(records: &[&SaleRecord], limit: usize) -> Vec<CategoryQuantity> {
        rank_groups(records, |r| r.category.as_str(), |r| r.quantity, limit)
            .into_iter()
            .map(|(category, quantity)| CategoryQuantity {
                category: category.to_string(),
                quantity,
            })
            .collect()
    }

    /// Revenue summed per month, oldest month first.
    pub fn revenue_trend(records: &[&SaleRecord]) -> Vec<PeriodRevenue> {
        let mut map: BTreeMap<Period, f64> = BTreeMap::new();
        for record in records {
            *map.entry(record.period()).or_insert(0.0) += record.revenue;
        }

        map.into_iter()
            .map(|(period, revenue)| PeriodRevenue { period, revenue })
            .collect()
    }

    /// Record counts per status, most frequent first, at most `limit`.
    ///
    /// Same tie-break and blank handling as [`Self::top_categories`].
    pub fn status_distribution(records: &[&SaleRecord], limit: usize) -> Vec<StatusCount> {
        rank_groups(records, |r| r.status.as_str(), |_| 1, limit)
            .into_iter()
            .map(|(status, count)| StatusCount {
                status: status.to_string(),
                count,
            })
            .collect()
    }

    /// Scalar metrics over `records`; `top_categories` supplies the label.
    ///
    /// Callers pass a non-empty slice; an empty one yields zero averages
    /// rather than NaN.
    pub fn summary_metrics(
        records: &[&SaleRecord],
        top_categories: &[CategoryQuantity],
    ) -> SummaryMetrics {
        let count = records.len();
        let total_revenue: f64 = records.iter().map(|r| r.revenue).sum();
        let b2b_count = records.iter().filter(|r| r.is_b2b).count();

        let average_revenue = if count == 0 {
            0.0
        } else {
            total_revenue / count as f64
        };

        let top_category = top_categories
            .first()
            .map(|c| c.category.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        SummaryMetrics {
            count,
            total_revenue,
            average_revenue,
            b2b_share_percent: percentage(b2b_count as f64, count as f64),
            top_category,
            message: None,
        }
    }
}

// ── Private ───────────────────────────────────────────────────────────────────

/// Group `records` by `key_fn`, sum `value_fn` per group, and keep the
/// `limit` largest groups.
///
/// Groups are collected in first-appearance order and then stable-sorted
/// descending, so ties never reorder between runs. Blank keys are missing
/// values and form no group.
fn rank_groups<'a>(
    records: &[&'a SaleRecord],
    key_fn: impl Fn(&'a SaleRecord) -> &'a str,
    value_fn: impl Fn(&SaleRecord) -> u64,
    limit: usize,
) -> Vec<(&'a str, u64)> {
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, u64)> = Vec::new();

    for &record in records {
        let key = key_fn(record);
        if key.trim().is_empty() {
            continue;
        }
        let value = value_fn(record);
        match positions.get(key) {
            Some(&pos) => groups[pos].1 += value,
            None => {
                positions.insert(key, groups.len());
                groups.push((key, value));
            }
        }
    }

    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups.truncate(limit);
    groups
}

// ── Tests ─────────────────────────────────────────────────────────────────────
