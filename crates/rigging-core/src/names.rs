//! DNS-safe name generation from scope paths

use sha2::{Digest, Sha256};

/// Max length of a DNS-1123 label
pub const MAX_DNS_LABEL_LEN: usize = 63;

const HASH_LEN: usize = 8;

/// Derive a DNS-1123 label from a scope path such as `["homelab", "echo"]`.
///
/// Components are lower-cased, anything outside `[a-z0-9]` becomes `-`, and
/// consecutive duplicate components are folded. An 8 character hash of the
/// full path is appended so different paths never collide after
/// sanitizing or truncation.
pub fn to_dns_label(path: &[&str]) -> String {
    let mut components: Vec<String> = Vec::with_capacity(path.len());
    for raw in path {
        let sanitized = sanitize(raw);
        if sanitized.is_empty() {
            continue;
        }
        if components.last() == Some(&sanitized) {
            continue;
        }
        components.push(sanitized);
    }

    let hash = path_hash(path);
    let human = components.join("-");
    if human.is_empty() {
        return hash;
    }

    let max_human = MAX_DNS_LABEL_LEN - HASH_LEN - 1;
    let human = if human.len() > max_human {
        human[..max_human].trim_end_matches('-')
    } else {
        human.as_str()
    };

    format!("{}-{}", human, hash)
}

fn sanitize(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for c in component.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

fn path_hash(path: &[&str]) -> String {
    let digest = Sha256::digest(path.join("/").as_bytes());
    digest
        .iter()
        .take(HASH_LEN / 2)
        .map(|b| format!("{:02x}", b))
        .collect()
}
