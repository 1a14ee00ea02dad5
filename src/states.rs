//! Fixed region reference data for the state selector.
//!
//! The form shows the full name; only the two-letter code is stored.

/// One selectable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsState {
    pub name: &'static str,
    pub abbreviation: &'static str,
}

const fn st(name: &'static str, abbreviation: &'static str) -> UsState {
    UsState { name, abbreviation }
}

/// All regions, in selector order.
pub const STATES: &[UsState] = &[
    st("Alabama", "AL"),
    st("Alaska", "AK"),
    st("American Samoa", "AS"),
    st("Arizona", "AZ"),
    st("Arkansas", "AR"),
    st("California", "CA"),
    st("Colorado", "CO"),
    st("Connecticut", "CT"),
    st("Delaware", "DE"),
    st("District Of Columbia", "DC"),
    st("Federated States Of Micronesia", "FM"),
    st("Florida", "FL"),
    st("Georgia", "GA"),
    st("Guam", "GU"),
    st("Hawaii", "HI"),
    st("Idaho", "ID"),
    st("Illinois", "IL"),
    st("Indiana", "IN"),
    st("Iowa", "IA"),
    st("Kansas", "KS"),
    st("Kentucky", "KY"),
    st("Louisiana", "LA"),
    st("Maine", "ME"),
    st("Marshall Islands", "MH"),
    st("Maryland", "MD"),
    st("Massachusetts", "MA"),
    st("Michigan", "MI"),
    st("Minnesota", "MN"),
    st("Mississippi", "MS"),
    st("Missouri", "MO"),
    st("Montana", "MT"),
    st("Nebraska", "NE"),
    st("Nevada", "NV"),
    st("New Hampshire", "NH"),
    st("New Jersey", "NJ"),
    st("New Mexico", "NM"),
    st("New York", "NY"),
    st("North Carolina", "NC"),
    st("North Dakota", "ND"),
    st("Northern Mariana Islands", "MP"),
    st("Ohio", "OH"),
    st("Oklahoma", "OK"),
    st("Oregon", "OR"),
    st("Palau", "PW"),
    st("Pennsylvania", "PA"),
    st("Puerto Rico", "PR"),
    st("Rhode Island", "RI"),
    st("South Carolina", "SC"),
    st("South Dakota", "SD"),
    st("Tennessee", "TN"),
    st("Texas", "TX"),
    st("Utah", "UT"),
    st("Vermont", "VT"),
    st("Virgin Islands", "VI"),
    st("Virginia", "VA"),
    st("Washington", "WA"),
    st("West Virginia", "WV"),
    st("Wisconsin", "WI"),
    st("Wyoming", "WY"),
];

/// Look up a region by its two-letter code (case-sensitive, as stored).
pub fn by_code(code: &str) -> Option<&'static UsState> {
    STATES.iter().find(|s| s.abbreviation == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_two_letters() {
        let mut seen = HashSet::new();
        for s in STATES {
            assert_eq!(s.abbreviation.len(), 2, "{}", s.name);
            assert!(s.abbreviation.chars().all(|c| c.is_ascii_uppercase()));
            assert!(seen.insert(s.abbreviation), "duplicate {}", s.abbreviation);
        }
    }

    #[test]
    fn test_by_code() {
        assert_eq!(by_code("CA").map(|s| s.name), Some("California"));
        assert_eq!(by_code("DC").map(|s| s.name), Some("District Of Columbia"));
        assert!(by_code("ca").is_none());
        assert!(by_code("").is_none());
    }

    #[test]
    fn test_selector_order_starts_alphabetical() {
        assert_eq!(STATES[0].abbreviation, "AL");
        assert_eq!(STATES.last().map(|s| s.abbreviation), Some("WY"));
    }
}
