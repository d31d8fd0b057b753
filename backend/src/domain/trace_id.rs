//! Per-request correlation id.
//!
//! The trace middleware assigns one id per HTTP request and runs the handler
//! inside [`TraceId::scope`]. Error bodies and log lines read it back with
//! [`TraceId::current`]. Task-locals do not cross `tokio::spawn`.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

/// Header echoing the request's trace id on every response.
pub const TRACE_ID_HEADER: &str = "trace-id";

tokio::task_local! {
    static CURRENT: TraceId;
}

/// UUID v4 correlating one request's response, error body and logs.
///
/// # Examples
/// ```
/// use users_backend::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "6f1c2b9e-8d4f-4a8e-9f3a-0c7d5e2b1a40".parse().expect("uuid");
/// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the request being served, if any.
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `id` as the current trace id.
    pub async fn scope<F: Future>(id: Self, fut: F) -> F::Output {
        CURRENT.scope(id, fut).await
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn random_ids_are_v4_and_distinct() {
        let first = TraceId::random();
        assert_eq!(first.0.get_version_num(), 4);
        assert_ne!(first, TraceId::random());
    }

    #[rstest]
    fn display_round_trips_through_parse() {
        let id = TraceId::random();
        let parsed: TraceId = id.to_string().parse().expect("display output parses");
        assert_eq!(parsed, id);
    }

    #[rstest]
    #[tokio::test]
    async fn nested_scopes_shadow_the_outer_id() {
        let outer = TraceId::random();
        let inner = TraceId::random();
        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;
        assert_eq!(seen, (Some(inner), Some(outer)));
    }

    #[rstest]
    #[tokio::test]
    async fn spawned_tasks_start_without_an_id() {
        let observed = TraceId::scope(TraceId::random(), async {
            tokio::spawn(async { TraceId::current() })
                .await
                .expect("task joins")
        })
        .await;
        assert_eq!(observed, None);
    }
}
