//! Pincode → city/state lookup.
//!
//! A fixed prefix table stands in for a geocoding service.

/// A resolved city and state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub city: &'static str,
    pub state: &'static str,
}

/// Pincodes are only looked up once they reach this length.
pub const PINCODE_LEN: usize = 6;

const PREFIXES: &[(&str, Location)] = &[
    ("560", Location { city: "Bengaluru", state: "Karnataka" }),
    ("110", Location { city: "New Delhi", state: "Delhi" }),
    ("400", Location { city: "Mumbai", state: "Maharashtra" }),
    ("600", Location { city: "Chennai", state: "Tamil Nadu" }),
    ("700", Location { city: "Kolkata", state: "West Bengal" }),
];

/// Resolve a complete pincode by its first three digits.
///
/// Returns `None` for pincodes that are not exactly six characters long or
/// whose prefix is not in the table.
pub fn resolve_location(pincode: &str) -> Option<Location> {
    if pincode.chars().count() != PINCODE_LEN {
        return None;
    }
    PREFIXES
        .iter()
        .find(|(prefix, _)| pincode.starts_with(prefix))
        .map(|(_, location)| *location)
}
