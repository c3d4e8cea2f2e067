//! KPI aggregation over the visible record subset.
//!
//! Every ratio here divides by spend; zero spend yields exactly `0.0` rather
//! than NaN or infinity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::record::CampaignRecord;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiSet {
    pub total_spend: f64,
    pub total_revenue: f64,
    pub total_leads: f64,
    pub total_sales: f64,
    /// Return on investment, in percent.
    pub roi: f64,
    /// Return on ad spend, revenue per unit of spend.
    pub roas: f64,
}

impl KpiSet {
    pub fn summarize<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CampaignRecord>,
    {
        let mut kpis = Self::default();
        for record in records {
            kpis.total_spend += record.spend;
            kpis.total_revenue += record.revenue;
            kpis.total_leads += record.leads;
            kpis.total_sales += record.sales;
        }
        kpis.roi = roi_percent(kpis.total_revenue, kpis.total_spend);
        kpis.roas = roas(kpis.total_revenue, kpis.total_spend);
        kpis
    }
}

/// One point of the per-period ROI / CTR series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPoint {
    pub period: Option<String>,
    pub roi: f64,
    pub avg_ctr: f64,
}

/// Spend and revenue attributed to one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSlice {
    pub platform: Option<String>,
    pub spend: f64,
    pub revenue: f64,
    /// Fraction (0..=1) of total spend across all slices.
    pub share: f64,
}

pub fn summarize<'a, I>(records: I) -> KpiSet
where
    I: IntoIterator<Item = &'a CampaignRecord>,
{
    KpiSet::summarize(records)
}

pub fn roi_percent(revenue: f64, spend: f64) -> f64 {
    if spend == 0.0 {
        0.0
    } else {
        (revenue - spend) / spend * 100.0
    }
}

pub fn roas(revenue: f64, spend: f64) -> f64 {
    if spend == 0.0 {
        0.0
    } else {
        revenue / spend
    }
}

#[derive(Default)]
struct PeriodAccumulator {
    spend: f64,
    revenue: f64,
    ctr_sum: f64,
    count: usize,
}

/// Per-period ROI and mean CTR, ordered by each period's first appearance.
pub fn monthly_series<'a, I>(records: I) -> Vec<PeriodPoint>
where
    I: IntoIterator<Item = &'a CampaignRecord>,
{
    let groups = group_by(records, CampaignRecord::period, |acc: &mut PeriodAccumulator, record| {
        acc.spend += record.spend;
        acc.revenue += record.revenue;
        acc.ctr_sum += record.click_through_rate;
        acc.count += 1;
    });

    groups
        .into_iter()
        .map(|(period, acc)| PeriodPoint {
            period,
            roi: roi_percent(acc.revenue, acc.spend),
            avg_ctr: if acc.count == 0 {
                0.0
            } else {
                acc.ctr_sum / acc.count as f64
            },
        })
        .collect()
}

/// Spend / revenue per platform, ordered by first appearance.
pub fn platform_breakdown<'a, I>(records: I) -> Vec<PlatformSlice>
where
    I: IntoIterator<Item = &'a CampaignRecord>,
{
    let groups = group_by(
        records,
        CampaignRecord::platform,
        |acc: &mut (f64, f64), record| {
            acc.0 += record.spend;
            acc.1 += record.revenue;
        },
    );

    let total_spend: f64 = groups.iter().map(|(_, (spend, _))| spend).sum();

    groups
        .into_iter()
        .map(|(platform, (spend, revenue))| PlatformSlice {
            platform,
            spend,
            revenue,
            share: if total_spend == 0.0 {
                0.0
            } else {
                spend / total_spend
            },
        })
        .collect()
}

fn group_by<'a, I, A, K, F>(records: I, key: K, mut fold: F) -> Vec<(Option<String>, A)>
where
    I: IntoIterator<Item = &'a CampaignRecord>,
    A: Default,
    K: Fn(&'a CampaignRecord) -> Option<&'a str>,
    F: FnMut(&mut A, &'a CampaignRecord),
{
    let mut index: HashMap<Option<&'a str>, usize> = HashMap::new();
    let mut groups: Vec<(Option<String>, A)> = Vec::new();

    for record in records {
        let label = key(record);
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push((label.map(str::to_string), A::default()));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, record);
    }

    groups
}
