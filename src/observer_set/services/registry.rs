//! Ordered, deduplicated, non-owning observer membership.
//!
//! Provides [`ObserverRegistry`], which stores observers as `Weak` handles in
//! registration order and hands dispatch frames their next member while
//! handlers add and remove observers underneath them.

use std::fmt;
use std::ptr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, trace};

use super::{BroadcastProxy, frame::DispatchFrame};
use crate::observer_set::{
    domain::{CapabilityDescriptor, MessageSlot},
    ports::Observer,
};

/// One registered observer.
struct Member<O: ?Sized> {
    /// Registration stamp; strictly increasing along the arena.
    stamp: u64,
    observer: Weak<O>,
    /// Answers to `responds_to`, indexed by descriptor slot.
    responds: Box<[bool]>,
}

impl<O: ?Sized> Member<O> {
    fn is(&self, observer: *const O) -> bool {
        ptr::addr_eq(self.observer.as_ptr(), observer)
    }

    fn is_live(&self) -> bool {
        self.observer.strong_count() > 0
    }

    fn responds_to(&self, slot: Option<MessageSlot>) -> bool {
        slot.is_none_or(|wanted| self.responds.get(wanted.index()).copied().unwrap_or(false))
    }
}

struct Membership<O: ?Sized> {
    members: Vec<Member<O>>,
    next_stamp: u64,
}

impl<O: ?Sized> Membership<O> {
    const fn new() -> Self {
        Self {
            members: Vec::new(),
            // Stamp 0 is the cursor of a frame that has not visited anyone.
            next_stamp: 1,
        }
    }

    fn position_of(&self, observer: *const O) -> Option<usize> {
        self.members.iter().position(|member| member.is(observer))
    }

    fn prune_stale(&mut self) {
        let before = self.members.len();
        self.members.retain(Member::is_live);
        let pruned = before.saturating_sub(self.members.len());
        if pruned > 0 {
            trace!(pruned, "pruned dropped observers");
        }
    }
}

/// A registry member resolved for delivery by a dispatch frame.
pub(crate) struct Visit<O: ?Sized> {
    pub(crate) observer: Arc<O>,
    pub(crate) responds: bool,
}

/// Ordered set of observers that receive broadcasts.
///
/// The registry never owns its observers: it keeps `Weak` handles and
/// identifies observers by the address of their shared allocation. Owners
/// should remove an observer before dropping it; entries whose observer was
/// dropped anyway are skipped by broadcasts and pruned on the next mutation.
///
/// All methods take `&self`, so observers may call [`add`](Self::add) and
/// [`remove`](Self::remove) from inside their own handlers. The internal lock
/// is never held while a handler runs.
pub struct ObserverRegistry<O: ?Sized> {
    descriptor: CapabilityDescriptor,
    membership: Mutex<Membership<O>>,
}

impl<O> ObserverRegistry<O>
where
    O: Observer + ?Sized,
{
    /// Creates an empty registry broadcasting the messages of `descriptor`.
    #[must_use]
    pub const fn new(descriptor: CapabilityDescriptor) -> Self {
        Self {
            descriptor,
            membership: Mutex::new(Membership::new()),
        }
    }

    /// Returns the capability descriptor the registry was configured with.
    #[must_use]
    pub const fn descriptor(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    /// Returns the broadcast entry point for this registry.
    #[must_use]
    pub const fn proxy(&self) -> BroadcastProxy<'_, O> {
        BroadcastProxy::new(self)
    }

    /// Adds `observer` at the end of the set unless it is already a member.
    ///
    /// The observer's answers to [`Observer::responds_to`] are recorded now,
    /// once per descriptor message. When called while a broadcast is in
    /// flight, the new member is first reached by the next broadcast.
    pub fn add(&self, observer: &Arc<O>) {
        if self.contains(observer) {
            trace!("observer already registered");
            return;
        }

        // Probing runs observer code, so it happens outside the lock.
        let responds = self.probe(observer);
        let mut membership = self.lock();
        membership.prune_stale();

        if membership.position_of(Arc::as_ptr(observer)).is_some() {
            trace!("observer registered while probing");
            return;
        }

        let stamp = membership.next_stamp;
        membership.next_stamp += 1;
        membership.members.push(Member {
            stamp,
            observer: Arc::downgrade(observer),
            responds,
        });
        debug!(stamp, members = membership.members.len(), "observer added");
    }

    /// Removes `observer` from the set if it is a member.
    ///
    /// When called while a broadcast is in flight and the observer has not
    /// been reached yet, it is skipped by that broadcast as well.
    pub fn remove(&self, observer: &O) {
        let mut membership = self.lock();
        if let Some(position) = membership.position_of(ptr::from_ref(observer)) {
            let removed = membership.members.remove(position);
            debug!(
                stamp = removed.stamp,
                members = membership.members.len(),
                "observer removed"
            );
        }
        membership.prune_stale();
    }

    /// Returns `true` when `observer` is a live member.
    #[must_use]
    pub fn contains(&self, observer: &O) -> bool {
        let membership = self.lock();
        membership
            .position_of(ptr::from_ref(observer))
            .and_then(|position| membership.members.get(position))
            .is_some_and(Member::is_live)
    }

    /// Returns the number of live members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock()
            .members
            .iter()
            .filter(|member| member.is_live())
            .count()
    }

    /// Returns `true` when no live observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the live members in the order a new broadcast would visit them.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<O>> {
        self.lock()
            .members
            .iter()
            .filter_map(|member| member.observer.upgrade())
            .collect()
    }

    /// Opens a frame bounded by the membership committed so far.
    pub(crate) fn open_frame(&self, slot: Option<MessageSlot>) -> DispatchFrame {
        DispatchFrame::open(self.lock().next_stamp, slot)
    }

    /// Resolves the next member `frame` should visit and moves its cursor.
    ///
    /// Returns `None` once no member committed before the frame opened
    /// remains after the cursor.
    pub(crate) fn next_visit(&self, frame: &mut DispatchFrame) -> Option<Visit<O>> {
        let mut membership = self.lock();
        let cursor = frame.cursor();
        let mut position = membership
            .members
            .partition_point(|member| member.stamp <= cursor);

        loop {
            let member = membership.members.get(position)?;
            if !frame.admits(member.stamp) {
                return None;
            }

            if let Some(observer) = member.observer.upgrade() {
                let responds = member.responds_to(frame.slot());
                frame.advance_to(member.stamp);
                return Some(Visit {
                    observer,
                    responds,
                });
            }

            let stale = membership.members.remove(position);
            trace!(
                frame = %frame.id(),
                stamp = stale.stamp,
                bound = frame.bound(),
                "skipped dropped observer"
            );
        }
    }

    fn probe(&self, observer: &O) -> Box<[bool]> {
        self.descriptor
            .messages()
            .map(|(message, _)| observer.responds_to(message))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Membership<O>> {
        self.membership
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<O> fmt::Debug for ObserverRegistry<O>
where
    O: Observer + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("descriptor", &self.descriptor)
            .field("members", &self.len())
            .finish()
    }
}
