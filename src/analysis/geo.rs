//! Cross-entity geographic and hosting aggregation
//!
//! Joins channel records to their two endpoint nodes and produces four views:
//! countries, cities, individual nodes and hosting providers.
//!
//! ## Key Design Decisions
//!
//! - **Half-split for partitions**: country, city and ISP buckets receive half
//!   of a channel's capacity per endpoint, so bucket totals add up to the
//!   network total
//! - **Full exposure for nodes**: a node's ranking counts the whole capacity of
//!   every channel it is an endpoint of
//! - **Per-call state**: the node lookup and decoded capacities live inside one
//!   [`GeoAggregator`] and are dropped with it
//! - **Unknown sentinel**: entries resolving to `Unknown` are excluded from
//!   every returned view

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use super::isp::{infer_isp, ISP_RANKING_LIMIT, UNKNOWN_ISP};
use crate::codec::capacity_or_zero;
use crate::types::analysis_results::{CityAggregate, GeoAggregate, IspRanking, NodeLocation};
use crate::types::{Channel, Node};
use crate::utils::math::safe_percentage;

/// Country or city that could not be resolved
pub const UNKNOWN: &str = "Unknown";

/// Options applied to one aggregation run
#[derive(Debug, Clone, Default)]
pub struct AggregationOptions {
    /// Restrict channels to one asset (case-insensitive)
    pub asset: Option<String>,
}

/// Parse a `"lat,lon"` string into coordinates
///
/// Returns `None` for anything that is not exactly two finite numbers in
/// range, and for the `(0, 0)` placeholder.
pub fn parse_loc(loc: &str) -> Option<(f64, f64)> {
    let mut parts = loc.split(',');
    let lat = parts.next()?.trim().parse::<f64>().ok()?;
    let lon = parts.next()?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }
    if lat == 0.0 && lon == 0.0 {
        return None;
    }
    Some((lat, lon))
}

fn resolve_name(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(name) if !name.is_empty() && !name.eq_ignore_ascii_case(UNKNOWN) => {
            name.to_string()
        }
        _ => UNKNOWN.to_string(),
    }
}

fn lookup_key(node_id: &str) -> String {
    node_id.trim().to_ascii_lowercase()
}

/// Resolved attributes of one node
#[derive(Debug, Clone)]
struct NodeGeo<'a> {
    node: &'a Node,
    country: String,
    city: String,
    coords: Option<(f64, f64)>,
    isp: &'static str,
}

/// Joins one node snapshot to one channel snapshot
pub struct GeoAggregator<'a> {
    nodes: Vec<NodeGeo<'a>>,
    lookup: HashMap<String, usize>,
    channels: Vec<(&'a Channel, Decimal)>,
}

impl<'a> GeoAggregator<'a> {
    /// Build the node lookup and decode every channel capacity once
    pub fn new(nodes: &'a [Node], channels: &'a [Channel], options: &AggregationOptions) -> Self {
        let mut resolved = Vec::with_capacity(nodes.len());
        let mut lookup = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let key = lookup_key(&node.node_id);
            if lookup.contains_key(&key) {
                continue;
            }
            lookup.insert(key, resolved.len());
            resolved.push(NodeGeo {
                node,
                country: resolve_name(node.country_or_region.as_deref()),
                city: resolve_name(node.city.as_deref()),
                coords: node.loc.as_deref().and_then(parse_loc),
                isp: infer_isp(node),
            });
        }

        let decoded: Vec<(&Channel, Decimal)> = channels
            .iter()
            .filter(|c| match &options.asset {
                Some(asset) => c.is_asset(asset),
                None => true,
            })
            .map(|c| {
                let capacity = capacity_or_zero(&c.capacity, c.asset_name(), &c.channel_outpoint);
                (c, capacity)
            })
            .collect();

        debug!(
            "Aggregating {} nodes and {} channels (asset filter: {:?})",
            resolved.len(),
            decoded.len(),
            options.asset
        );

        Self {
            nodes: resolved,
            lookup,
            channels: decoded,
        }
    }

    fn endpoint(&self, node_id: &str) -> Option<&NodeGeo<'a>> {
        self.lookup
            .get(&lookup_key(node_id))
            .map(|&idx| &self.nodes[idx])
    }

    /// Number of unique nodes in the lookup
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of channels after the asset filter
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Sum of all decoded channel capacities
    pub fn total_capacity(&self) -> Decimal {
        self.channels.iter().map(|(_, capacity)| *capacity).sum()
    }

    /// Distinct asset names of the aggregated channels, uppercased and sorted
    pub fn assets(&self) -> Vec<String> {
        self.channels
            .iter()
            .map(|(channel, _)| channel.asset_name().trim().to_ascii_uppercase())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Country view: node count and half-split channel capacity
    pub fn by_country(&self) -> Vec<GeoAggregate> {
        let mut buckets: HashMap<String, GeoAggregate> = HashMap::new();

        for geo in &self.nodes {
            let entry = buckets
                .entry(geo.country.clone())
                .or_insert_with(|| GeoAggregate {
                    country: geo.country.clone(),
                    ..Default::default()
                });
            entry.node_count += 1;
        }

        for (channel, capacity) in &self.channels {
            let half = *capacity / Decimal::TWO;
            let c1 = self.country_of(&channel.node1);
            let c2 = self.country_of(&channel.node2);

            for country in [&c1, &c2] {
                let entry = buckets
                    .entry(country.clone())
                    .or_insert_with(|| GeoAggregate {
                        country: country.clone(),
                        ..Default::default()
                    });
                entry.total_capacity += half;
            }

            buckets.entry(c1.clone()).and_modify(|e| e.channel_count += 1);
            if c2 != c1 {
                buckets.entry(c2).and_modify(|e| e.channel_count += 1);
            }
        }

        let total_nodes = self.nodes.len();
        let mut countries: Vec<GeoAggregate> = buckets
            .into_values()
            .filter(|g| g.country != UNKNOWN)
            .map(|mut g| {
                g.percentage = safe_percentage(g.node_count, total_nodes);
                g
            })
            .collect();

        countries.sort_by(|a, b| {
            b.node_count
                .cmp(&a.node_count)
                .then_with(|| b.total_capacity.cmp(&a.total_capacity))
                .then_with(|| a.country.cmp(&b.country))
        });
        countries
    }

    fn country_of(&self, node_id: &str) -> String {
        self.endpoint(node_id)
            .map(|geo| geo.country.clone())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// City view: node count, half-split capacity and the first valid
    /// coordinates seen for the city
    pub fn by_city(&self) -> Vec<CityAggregate> {
        let mut buckets: HashMap<(String, String), CityAggregate> = HashMap::new();
        let mut coords: HashMap<(String, String), (f64, f64)> = HashMap::new();

        for geo in &self.nodes {
            let key = (geo.city.clone(), geo.country.clone());
            let entry = buckets.entry(key.clone()).or_insert_with(|| CityAggregate {
                city: geo.city.clone(),
                country: geo.country.clone(),
                ..Default::default()
            });
            entry.node_count += 1;
            if let Some(c) = geo.coords {
                coords.entry(key).or_insert(c);
            }
        }

        for (channel, capacity) in &self.channels {
            let half = *capacity / Decimal::TWO;
            let k1 = self.city_key(&channel.node1);
            let k2 = self.city_key(&channel.node2);

            for key in [&k1, &k2] {
                let entry = buckets.entry(key.clone()).or_insert_with(|| CityAggregate {
                    city: key.0.clone(),
                    country: key.1.clone(),
                    ..Default::default()
                });
                entry.total_capacity += half;
            }

            buckets.entry(k1.clone()).and_modify(|e| e.channel_count += 1);
            if k2 != k1 {
                buckets.entry(k2).and_modify(|e| e.channel_count += 1);
            }
        }

        let mut cities: Vec<CityAggregate> = buckets
            .into_iter()
            .filter(|(key, _)| key.0 != UNKNOWN)
            .filter_map(|(key, mut city)| {
                let (lat, lon) = coords.get(&key).copied().unwrap_or((0.0, 0.0));
                city.latitude = lat;
                city.longitude = lon;
                (lat != 0.0 || lon != 0.0).then_some(city)
            })
            .collect();

        cities.sort_by(|a, b| {
            b.node_count
                .cmp(&a.node_count)
                .then_with(|| b.total_capacity.cmp(&a.total_capacity))
                .then_with(|| a.city.cmp(&b.city))
        });
        cities
    }

    fn city_key(&self, node_id: &str) -> (String, String) {
        self.endpoint(node_id)
            .map(|geo| (geo.city.clone(), geo.country.clone()))
            .unwrap_or_else(|| (UNKNOWN.to_string(), UNKNOWN.to_string()))
    }

    /// Node view: every located node with the full capacity of its channels
    pub fn node_locations(&self) -> Vec<NodeLocation> {
        let mut exposure: HashMap<usize, (usize, Decimal)> = HashMap::new();

        for (channel, capacity) in &self.channels {
            let i1 = self.lookup.get(&lookup_key(&channel.node1)).copied();
            let i2 = self.lookup.get(&lookup_key(&channel.node2)).copied();

            if let Some(idx) = i1 {
                let entry = exposure.entry(idx).or_insert((0, Decimal::ZERO));
                entry.0 += 1;
                entry.1 += *capacity;
            }
            if let Some(idx) = i2 {
                if i2 != i1 {
                    let entry = exposure.entry(idx).or_insert((0, Decimal::ZERO));
                    entry.0 += 1;
                    entry.1 += *capacity;
                }
            }
        }

        let mut located: Vec<NodeLocation> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, geo)| geo.country != UNKNOWN)
            .filter_map(|(idx, geo)| {
                let (latitude, longitude) = geo.coords?;
                let (channel_count, total_capacity) =
                    exposure.get(&idx).copied().unwrap_or((0, Decimal::ZERO));
                Some(NodeLocation {
                    node_id: geo.node.node_id.clone(),
                    node_name: geo.node.node_name.clone(),
                    country: geo.country.clone(),
                    city: geo.city.clone(),
                    latitude,
                    longitude,
                    channel_count,
                    total_capacity,
                })
            })
            .collect();

        located.sort_by(|a, b| {
            b.total_capacity
                .cmp(&a.total_capacity)
                .then_with(|| b.channel_count.cmp(&a.channel_count))
                .then_with(|| a.node_id.cmp(&b.node_id))
        });
        located
    }

    /// Hosting-provider view, top entries by node count
    pub fn isp_ranking(&self) -> Vec<IspRanking> {
        let mut buckets: HashMap<&'static str, IspRanking> = HashMap::new();

        for geo in &self.nodes {
            let entry = buckets.entry(geo.isp).or_insert_with(|| IspRanking {
                isp: geo.isp.to_string(),
                ..Default::default()
            });
            entry.node_count += 1;
        }

        for (channel, capacity) in &self.channels {
            let half = *capacity / Decimal::TWO;
            for node_id in [&channel.node1, &channel.node2] {
                let isp = self.endpoint(node_id).map(|g| g.isp).unwrap_or(UNKNOWN_ISP);
                let entry = buckets.entry(isp).or_insert_with(|| IspRanking {
                    isp: isp.to_string(),
                    ..Default::default()
                });
                entry.total_capacity += half;
            }
        }

        let total_nodes = self.nodes.len();
        let mut ranking: Vec<IspRanking> = buckets
            .into_values()
            .filter(|r| r.isp != UNKNOWN_ISP)
            .map(|mut r| {
                r.percentage = safe_percentage(r.node_count, total_nodes);
                r
            })
            .collect();

        ranking.sort_by(|a, b| match b.node_count.cmp(&a.node_count) {
            Ordering::Equal => b
                .total_capacity
                .cmp(&a.total_capacity)
                .then_with(|| a.isp.cmp(&b.isp)),
            other => other,
        });
        ranking.truncate(ISP_RANKING_LIMIT);
        ranking
    }
}
