//! Broadcast entry point.
//!
//! Provides [`BroadcastProxy`], which drives a dispatch frame across an
//! [`ObserverRegistry`] and invokes a caller-supplied closure on every
//! eligible observer.

use std::fmt;

use thiserror::Error;
use tracing::{debug, debug_span, error, trace};

use super::ObserverRegistry;
use crate::observer_set::{
    domain::{DispatchMode, DispatchSummary, MessageName, MessageSlot},
    ports::Observer,
};

/// Errors returned by broadcast operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The message is not declared by the registry's capability descriptor.
    #[error("message '{0}' is not declared by the capability descriptor")]
    UnknownMessage(String),

    /// An explicit-mode entry point was used for a message of the other
    /// partition.
    #[error("message '{message}' is {declared}, it cannot be sent as {requested}")]
    ModeMismatch {
        /// The message that was sent.
        message: MessageName,
        /// Mode the message is declared with.
        declared: DispatchMode,
        /// Mode the caller asked for.
        requested: DispatchMode,
    },

    /// A required message reached observers that do not implement it.
    ///
    /// Every conforming observer still received the message; the
    /// non-conforming ones were not invoked.
    #[error(
        "required message '{message}' reached {violators} observer(s) that do not implement it ({delivered} delivered)"
    )]
    ContractViolation {
        /// The required message.
        message: MessageName,
        /// Number of registered observers lacking the message.
        violators: usize,
        /// Number of observers that did receive the message.
        delivered: usize,
    },
}

/// Result type for broadcast operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Sends messages to every eligible observer of a registry.
///
/// The message closure carries the arguments and performs the statically
/// typed call on each observer:
///
/// ```
/// use std::sync::Arc;
/// use observer_set::observer_set::{
///     domain::{CapabilityDescriptor, MessageName},
///     ports::Observer,
///     services::ObserverRegistry,
/// };
///
/// trait ModelObserver: Observer {
///     fn model_did_change(&self, revision: u32);
/// }
///
/// struct Printer;
///
/// impl Observer for Printer {
///     fn responds_to(&self, message: &MessageName) -> bool {
///         message == "model_did_change"
///     }
/// }
///
/// impl ModelObserver for Printer {
///     fn model_did_change(&self, _revision: u32) {}
/// }
///
/// let descriptor = CapabilityDescriptor::builder()
///     .required("model_did_change")
///     .build()?;
/// let registry: ObserverRegistry<dyn ModelObserver> = ObserverRegistry::new(descriptor);
/// let printer: Arc<dyn ModelObserver> = Arc::new(Printer);
/// registry.add(&printer);
///
/// let summary = registry
///     .proxy()
///     .send("model_did_change", |observer| observer.model_did_change(7))?;
/// assert_eq!(summary.delivered(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// Within one broadcast observers are visited in registration order.
/// Observers added during the broadcast are not visited by it; observers
/// removed before being reached are skipped. Handlers may start nested
/// broadcasts, which run their own frame.
pub struct BroadcastProxy<'r, O: ?Sized> {
    registry: &'r ObserverRegistry<O>,
}

impl<O: ?Sized> Clone for BroadcastProxy<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ?Sized> Copy for BroadcastProxy<'_, O> {}

impl<O> fmt::Debug for BroadcastProxy<'_, O>
where
    O: Observer + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadcastProxy")
            .field("registry", self.registry)
            .finish()
    }
}

impl<'r, O> BroadcastProxy<'r, O>
where
    O: Observer + ?Sized,
{
    /// Creates a proxy over `registry`.
    #[must_use]
    pub const fn new(registry: &'r ObserverRegistry<O>) -> Self {
        Self { registry }
    }

    /// Sends `message`, choosing required or optional dispatch from the
    /// registry's descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownMessage`] when the descriptor does not
    /// declare `message`, or [`DispatchError::ContractViolation`] when a
    /// required message reached observers that do not implement it.
    pub fn send<F>(&self, message: &str, invoke: F) -> DispatchResult<DispatchSummary>
    where
        F: FnMut(&O),
    {
        let (name, slot) = self.resolve(message)?;
        self.dispatch(name, slot, invoke)
    }

    /// Sends a required message to every observer.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownMessage`] for an undeclared message,
    /// [`DispatchError::ModeMismatch`] when `message` is optional, or
    /// [`DispatchError::ContractViolation`] when it reached observers that
    /// do not implement it.
    pub fn send_required<F>(&self, message: &str, invoke: F) -> DispatchResult<DispatchSummary>
    where
        F: FnMut(&O),
    {
        let (name, slot) = self.resolve_as(message, DispatchMode::Required)?;
        self.dispatch(name, slot, invoke)
    }

    /// Sends an optional message to the observers that implement it.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownMessage`] for an undeclared message or
    /// [`DispatchError::ModeMismatch`] when `message` is required.
    pub fn send_optional<F>(&self, message: &str, invoke: F) -> DispatchResult<DispatchSummary>
    where
        F: FnMut(&O),
    {
        let (name, slot) = self.resolve_as(message, DispatchMode::Optional)?;
        self.dispatch(name, slot, invoke)
    }

    /// Invokes `visit` on every observer the broadcast rules make eligible,
    /// without consulting the capability descriptor.
    pub fn for_each<F>(&self, mut visit: F) -> DispatchSummary
    where
        F: FnMut(&O),
    {
        let mut frame = self.registry.open_frame(None);
        let span = debug_span!("broadcast", frame = %frame.id());
        let _entered = span.enter();

        while let Some(member) = self.registry.next_visit(&mut frame) {
            visit(&*member.observer);
            frame.record_delivery();
        }
        frame.finish(None)
    }

    fn resolve(&self, message: &str) -> DispatchResult<(MessageName, MessageSlot)> {
        let descriptor = self.registry.descriptor();
        descriptor
            .slot(message)
            .and_then(|slot| descriptor.name(slot).map(|name| (name.clone(), slot)))
            .ok_or_else(|| DispatchError::UnknownMessage(message.to_owned()))
    }

    fn resolve_as(
        &self,
        message: &str,
        requested: DispatchMode,
    ) -> DispatchResult<(MessageName, MessageSlot)> {
        let (name, slot) = self.resolve(message)?;
        if slot.mode() != requested {
            return Err(DispatchError::ModeMismatch {
                message: name,
                declared: slot.mode(),
                requested,
            });
        }
        Ok((name, slot))
    }

    fn dispatch<F>(
        &self,
        message: MessageName,
        slot: MessageSlot,
        mut invoke: F,
    ) -> DispatchResult<DispatchSummary>
    where
        F: FnMut(&O),
    {
        let mut frame = self.registry.open_frame(Some(slot));
        let span = debug_span!(
            "broadcast",
            frame = %frame.id(),
            message = %message,
            mode = %slot.mode()
        );
        let _entered = span.enter();

        let mut violators = 0_usize;
        while let Some(member) = self.registry.next_visit(&mut frame) {
            if member.responds {
                invoke(&*member.observer);
                frame.record_delivery();
                continue;
            }
            match slot.mode() {
                DispatchMode::Optional => {
                    trace!("observer does not implement optional message");
                    frame.record_skip();
                }
                DispatchMode::Required => {
                    error!("observer does not implement required message");
                    violators += 1;
                }
            }
        }

        if violators > 0 {
            return Err(DispatchError::ContractViolation {
                message,
                violators,
                delivered: frame.delivered(),
            });
        }

        let summary = frame.finish(Some(message));
        debug!(
            delivered = summary.delivered(),
            skipped = summary.skipped(),
            "broadcast complete"
        );
        Ok(summary)
    }
}
