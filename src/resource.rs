//! The contract an orchestrator uses to gate publishing on a remote cluster.

use crate::client::RestClient;

/// A precondition that must hold on a remote cluster before data is
/// published to it.
///
/// Checks are read-only and report only a verdict: `true` when the
/// precondition holds, `false` when it does not or could not be determined.
/// Causes are reported through logs. An orchestrator decides when to call
/// [`check`](HttpResource::check) again.
pub trait HttpResource {
    /// User-recognizable name of the cluster this resource belongs to.
    fn resource_owner_name(&self) -> &str;

    /// Run the check against the cluster behind `client`.
    fn check(&self, client: &dyn RestClient) -> bool;
}

/// Run every resource against `client`, stopping at the first one that
/// does not hold.
pub fn check_all(resources: &[Box<dyn HttpResource + Send + Sync>], client: &dyn RestClient) -> bool {
    resources.iter().all(|resource| resource.check(client))
}
