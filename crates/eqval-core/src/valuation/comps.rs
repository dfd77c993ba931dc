//! Trading comparables: per-peer multiples and a min / median / max summary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{with_metadata, ComputationOutput, Money, Multiple};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One comparable company as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeerInput {
    pub name: String,
    pub ev: Option<Money>,
    pub market_cap: Option<Money>,
    pub revenue: Option<Money>,
    pub ebitda: Option<Money>,
    pub net_income: Option<Money>,
}

/// A peer with its computed multiples attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerMultiples {
    pub name: String,
    pub ev_revenue: Option<Multiple>,
    pub ev_ebitda: Option<Multiple>,
    pub pe: Option<Multiple>,
}

/// Min / median / max over the defined values of one metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    pub min: Option<Multiple>,
    pub max: Option<Multiple>,
    pub median: Option<Multiple>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompsSummary {
    pub ev_revenue: MetricSummary,
    pub ev_ebitda: MetricSummary,
    pub pe: MetricSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompsOutput {
    pub peers: Vec<PeerMultiples>,
    pub summary: CompsSummary,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute EV/Revenue, EV/EBITDA and P/E for each peer. A multiple is
/// defined only when both sides are present and non-zero.
pub fn build_comps(peers: &[PeerInput]) -> Vec<PeerMultiples> {
    peers
        .iter()
        .map(|peer| PeerMultiples {
            name: peer.name.clone(),
            ev_revenue: multiple(peer.ev, peer.revenue),
            ev_ebitda: multiple(peer.ev, peer.ebitda),
            pe: multiple(peer.market_cap, peer.net_income),
        })
        .collect()
}

/// Summarize each metric over its defined values.
///
/// The median is the element at index `floor(n/2)` of the ascending sort,
/// never an average of the middle pair. With an even count this picks the
/// upper-middle value.
pub fn summarize_comps(multiples: &[PeerMultiples]) -> CompsSummary {
    CompsSummary {
        ev_revenue: summarize(multiples.iter().map(|m| m.ev_revenue)),
        ev_ebitda: summarize(multiples.iter().map(|m| m.ev_ebitda)),
        pe: summarize(multiples.iter().map(|m| m.pe)),
    }
}

/// Full comparables run with the standard output envelope.
pub fn compute_comps(peers: &[PeerInput]) -> ComputationOutput<CompsOutput> {
    let mut warnings = Vec::new();
    if peers.is_empty() {
        warnings.push("No peers supplied; comparables summary is empty".to_string());
    }

    let multiples = build_comps(peers);
    let summary = summarize_comps(&multiples);

    with_metadata(
        "Trading comparables: EV/Revenue, EV/EBITDA, P/E with floor-index median",
        &serde_json::json!({ "peerCount": peers.len() }),
        warnings,
        CompsOutput {
            peers: multiples,
            summary,
        },
    )
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn multiple(numerator: Option<Money>, denominator: Option<Money>) -> Option<Multiple> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if !n.is_zero() && !d.is_zero() => Some(n / d),
        _ => None,
    }
}

fn summarize(values: impl Iterator<Item = Option<Multiple>>) -> MetricSummary {
    let mut defined: Vec<Decimal> = values.flatten().collect();
    if defined.is_empty() {
        return MetricSummary::default();
    }
    defined.sort();

    MetricSummary {
        min: defined.first().copied(),
        max: defined.last().copied(),
        median: Some(defined[defined.len() / 2]),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
