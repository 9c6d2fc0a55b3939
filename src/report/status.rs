use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

/// Fallback for codes missing from the description table.
pub const UNKNOWN_STATUS_DESCRIPTION: &str = "HTTP Status";

static STATUS_DESCRIPTIONS: Lazy<BTreeMap<u16, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        (200, "OK - Request succeeded"),
        (201, "Created - Resource created"),
        (204, "No Content - Request processed, nothing to return"),
        (301, "Moved Permanently - Resource moved permanently"),
        (302, "Found - Temporary redirect"),
        (400, "Bad Request - Malformed request"),
        (401, "Unauthorized - Authentication required"),
        (403, "Forbidden - Access denied"),
        (404, "Not Found - Resource not found"),
        (408, "Request Timeout - Server timed out waiting for the request"),
        (429, "Too Many Requests - Rate limited"),
        (500, "Internal Server Error - Server failed to handle the request"),
        (502, "Bad Gateway - Invalid upstream response"),
        (503, "Service Unavailable - Server cannot handle the request"),
        (504, "Gateway Timeout - Upstream timed out"),
    ])
});

#[must_use]
pub fn status_description(code: u16) -> &'static str {
    STATUS_DESCRIPTIONS
        .get(&code)
        .copied()
        .unwrap_or(UNKNOWN_STATUS_DESCRIPTION)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
    Unknown,
}

impl StatusCategory {
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            100..=199 => StatusCategory::Informational,
            200..=299 => StatusCategory::Success,
            300..=399 => StatusCategory::Redirection,
            400..=499 => StatusCategory::ClientError,
            500..=599 => StatusCategory::ServerError,
            _ => StatusCategory::Unknown,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            StatusCategory::Informational => "Informational (1xx)",
            StatusCategory::Success => "Success (2xx)",
            StatusCategory::Redirection => "Redirection (3xx)",
            StatusCategory::ClientError => "Client Error (4xx)",
            StatusCategory::ServerError => "Server Error (5xx)",
            StatusCategory::Unknown => "Unknown Status",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusCategory::Informational => "informational",
            StatusCategory::Success => "success",
            StatusCategory::Redirection => "redirection",
            StatusCategory::ClientError => "client_error",
            StatusCategory::ServerError => "server_error",
            StatusCategory::Unknown => "unknown",
        }
    }
}

/// Codes of one category, ascending, with their counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: StatusCategory,
    pub codes: Vec<(u16, usize)>,
}

/// Groups codes by category. Categories come out ordered alphabetically by
/// label, codes ascending within each.
#[must_use]
pub fn group_by_category(status_codes: &HashMap<u16, usize>) -> Vec<CategoryGroup> {
    let mut by_label: BTreeMap<&'static str, CategoryGroup> = BTreeMap::new();
    for (&code, &count) in status_codes {
        let category = StatusCategory::from_code(code);
        by_label
            .entry(category.label())
            .or_insert_with(|| CategoryGroup {
                category,
                codes: Vec::new(),
            })
            .codes
            .push((code, count));
    }

    by_label
        .into_values()
        .map(|mut group| {
            group.codes.sort_unstable_by_key(|&(code, _)| code);
            group
        })
        .collect()
}
