//! Hosting-provider inference from node addresses
//!
//! Only the first advertised address is inspected. Signatures are checked in
//! a fixed priority order and the first match wins.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Node;

/// Node advertises no address at all
pub const UNKNOWN_ISP: &str = "Unknown ISP";

/// Node advertises an address that matches no known provider
pub const OTHER_ISP: &str = "Other ISP";

/// Number of entries kept in an ISP ranking
pub const ISP_RANKING_LIMIT: usize = 10;

lazy_static! {
    static ref ISP_SIGNATURES: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)cloudflare").unwrap(), "Cloudflare"),
        (Regex::new(r"(?i)digitalocean").unwrap(), "DigitalOcean"),
        (Regex::new(r"(?i)amazon|aws").unwrap(), "Amazon AWS"),
        (Regex::new(r"(?i)ovh").unwrap(), "OVH"),
        (Regex::new(r"(?i)hetzner").unwrap(), "Hetzner"),
        (Regex::new(r"(?i)linode").unwrap(), "Linode"),
        (Regex::new(r"(?i)vultr").unwrap(), "Vultr"),
        (Regex::new(r"(?i)google").unwrap(), "Google Cloud"),
        (Regex::new(r"(?i)azure|microsoft").unwrap(), "Microsoft Azure"),
    ];
}

/// Provider name for a single address string
pub fn match_isp(address: &str) -> &'static str {
    ISP_SIGNATURES
        .iter()
        .find(|(pattern, _)| pattern.is_match(address))
        .map(|(_, name)| *name)
        .unwrap_or(OTHER_ISP)
}

/// Provider name inferred from a node's first address
pub fn infer_isp(node: &Node) -> &'static str {
    match node.first_address() {
        Some(address) if !address.trim().is_empty() => match_isp(address),
        _ => UNKNOWN_ISP,
    }
}
