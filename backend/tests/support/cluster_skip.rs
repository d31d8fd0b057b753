//! Skip policy for suites that need the embedded PostgreSQL cluster.
//!
//! Machines that cannot start the cluster skip these suites with a
//! `SKIP-TEST-CLUSTER` marker on stderr. CI sets `REQUIRE_TEST_CLUSTER` so a
//! broken cluster fails loudly instead.

/// Returns true when `REQUIRE_TEST_CLUSTER` is set to a truthy value.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn test_cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles embedded cluster setup failures consistently across suites.
///
/// Prints a skip marker and returns `None`, unless the cluster is required,
/// in which case it panics with the failure reason.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if test_cluster_required() {
        panic!("Test cluster setup failed: {reason}. Unset REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use env_lock::lock_env;
    use rstest::rstest;

    #[rstest]
    #[case(None, false)]
    #[case(Some("1"), true)]
    #[case(Some("YES"), true)]
    #[case(Some("0"), false)]
    fn required_flag_is_truthy_only(#[case] value: Option<&str>, #[case] expected: bool) {
        let _guard = lock_env([("REQUIRE_TEST_CLUSTER", value.map(str::to_owned))]);
        assert_eq!(test_cluster_required(), expected);
    }

    #[rstest]
    fn failures_skip_when_not_required() {
        let _guard = lock_env([("REQUIRE_TEST_CLUSTER", None::<String>)]);
        assert!(handle_cluster_setup_failure::<()>("no cluster").is_none());
    }
}
