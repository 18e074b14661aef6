//! Fixed API paths consumed by the dashboard.

pub const CALLS_PER_HOUR: &str = "/api/metrics/calls-per-hour";
pub const GROUP_RESPONSE_TIME: &str = "/api/metrics/group-response-time";
/// GET for the overall distribution, POST with `battalion` for one battalion.
pub const BATTALION_DIST: &str = "/api/metrics/battalion-dist";
/// GET for incidents per day, POST with `neighborhood` for one neighborhood.
pub const NEIGHBORHOOD_TRENDS: &str = "/api/metrics/neighborhood-trends";

pub const BATTALIONS: &str = "/api/calls/battalions";
pub const NEIGHBORHOODS: &str = "/api/calls/neighborhoods";
pub const NEARBY: &str = "/api/calls/nearby";
pub const LONGEST_DISPATCH: &str = "/api/calls/longest-dispatch";
pub const ADDRESS_FREQUENCY: &str = "/api/calls/address-frequency";
pub const SAFEST_NEIGHBORHOODS: &str = "/api/calls/safest-neighborhoods";

/// Join an API base (scheme + host, no trailing slash required) with a path.
pub fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_plain_origin() {
        assert_eq!(
            join("http://localhost:8000", CALLS_PER_HOUR),
            "http://localhost:8000/api/metrics/calls-per-hour"
        );
    }

    #[test]
    fn test_join_strips_trailing_slash() {
        assert_eq!(
            join("https://dispatch.example.com/", NEARBY),
            "https://dispatch.example.com/api/calls/nearby"
        );
    }
}
