//! Capability port implemented by every registered observer.

use crate::observer_set::domain::MessageName;

/// Capability contract for observers held by an
/// [`ObserverRegistry`](crate::observer_set::services::ObserverRegistry).
///
/// Observer interfaces extend this trait (`trait ModelObserver: Observer`)
/// and the registry stores `Weak<dyn ModelObserver>` handles. When an
/// observer is added, the registry asks it once about every message of the
/// registry's descriptor and keeps the answers for the lifetime of that
/// membership.
#[cfg_attr(test, mockall::automock)]
pub trait Observer {
    /// Reports whether this observer implements `message`.
    ///
    /// Observers must answer `true` for every required message of the
    /// registry they join. Answering `false` for a required message makes
    /// every broadcast of that message fail with a contract violation.
    fn responds_to(&self, message: &MessageName) -> bool;
}
