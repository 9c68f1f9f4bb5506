//! Pending ownership transfers awaiting confirmation.
//!
//! An owner starts a transfer of one of their entities to another actor. The
//! transfer stays pending for a fixed number of ticks; if the owner confirms
//! within that window the entity changes hands, otherwise the request lapses
//! and both parties are told it was ignored.
//!
//! The tracker is mutated only from the simulation tick. Confirmations that
//! arrive from the network go through [`TransferTracker::queue_confirm`] and
//! are applied at the start of the next [`TransferTracker::tick`], before the
//! countdown.

mod message;

pub use message::MessageTemplate;

use crate::config::TransferSettings;
use crate::host::{ActorId, EntityId, Notifier};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, info};

/// Ticks an initiator has to confirm when nothing else is configured.
pub const DEFAULT_CONFIRM_TICKS: u32 = 100;

/// Host services the tracker needs beyond chat.
pub trait TransferHost: Notifier {
    /// Whether the actor is still connected and alive.
    fn is_actor_present(&self, actor: ActorId) -> bool;
    fn is_entity_alive(&self, entity: EntityId) -> bool;
    fn actor_name(&self, actor: ActorId) -> String;
    fn entity_name(&self, entity: EntityId) -> String;
    fn set_owner(&mut self, entity: EntityId, owner: ActorId);
}

/// A transfer waiting for the initiator's confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransfer {
    pub initiator: ActorId,
    pub recipient: ActorId,
    pub subject: EntityId,
    pub ticks_remaining: u32,
}

impl PendingTransfer {
    fn parties_valid<H: TransferHost + ?Sized>(&self, host: &H) -> bool {
        host.is_entity_alive(self.subject)
            && host.is_actor_present(self.initiator)
            && host.is_actor_present(self.recipient)
    }
}

/// Result of a confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The subject now belongs to the recipient
    Transferred {
        subject: EntityId,
        recipient: ActorId,
    },

    /// There was nothing to confirm
    NonePending,
}

/// What one tick resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Queued confirmations in arrival order
    pub confirmed: Vec<(ActorId, ConfirmOutcome)>,

    /// Transfers that lapsed or lost a party
    pub expired: Vec<PendingTransfer>,
}

/// Table of pending transfers, at most one per initiator.
///
/// # Example
///
/// ```rust
/// # use bending::host::{ActorId, EntityId, Notifier};
/// # use bending::transfer::{MessageTemplate, TransferHost};
/// # struct Host;
/// # impl Notifier for Host {
/// #     fn notify(&mut self, _: ActorId, _: MessageTemplate, _: &[String]) {}
/// # }
/// # impl TransferHost for Host {
/// #     fn is_actor_present(&self, _: ActorId) -> bool { true }
/// #     fn is_entity_alive(&self, _: EntityId) -> bool { true }
/// #     fn actor_name(&self, a: ActorId) -> String { a.to_string() }
/// #     fn entity_name(&self, e: EntityId) -> String { e.to_string() }
/// #     fn set_owner(&mut self, _: EntityId, _: ActorId) {}
/// # }
/// use bending::transfer::{ConfirmOutcome, TransferTracker};
///
/// let mut host = Host;
/// let mut tracker = TransferTracker::default();
/// let (owner, friend, bison) = (ActorId::random(), ActorId::random(), EntityId::random());
///
/// tracker.start(&mut host, owner, friend, bison);
/// assert_eq!(
///     tracker.confirm(&mut host, owner),
///     ConfirmOutcome::Transferred { subject: bison, recipient: friend }
/// );
/// assert_eq!(tracker.confirm(&mut host, owner), ConfirmOutcome::NonePending);
/// ```
#[derive(Clone, Debug)]
pub struct TransferTracker {
    pending: BTreeMap<ActorId, PendingTransfer>,
    queued: VecDeque<ActorId>,
    confirm_ticks: u32,
}

impl Default for TransferTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_TICKS)
    }
}

impl TransferTracker {
    pub fn new(confirm_ticks: u32) -> Self {
        Self {
            pending: BTreeMap::new(),
            queued: VecDeque::new(),
            confirm_ticks,
        }
    }

    pub fn from_settings(settings: &TransferSettings) -> Self {
        Self::new(settings.confirm_ticks)
    }

    /// Begin a transfer, replacing any transfer the initiator already started.
    ///
    /// Returns the replaced transfer.
    pub fn start<H: TransferHost + ?Sized>(
        &mut self,
        host: &mut H,
        initiator: ActorId,
        recipient: ActorId,
        subject: EntityId,
    ) -> Option<PendingTransfer> {
        let transfer = PendingTransfer {
            initiator,
            recipient,
            subject,
            ticks_remaining: self.confirm_ticks,
        };
        let replaced = self.pending.insert(initiator, transfer);
        info!(
            %initiator,
            %recipient,
            %subject,
            replaced = replaced.is_some(),
            "transfer started"
        );

        let subject_name = host.entity_name(subject);
        let initiator_name = host.actor_name(initiator);
        let recipient_name = host.actor_name(recipient);
        host.notify(
            initiator,
            MessageTemplate::TransferOldStart,
            &[subject_name.clone(), recipient_name],
        );
        host.notify(
            recipient,
            MessageTemplate::TransferNewStart,
            &[subject_name, initiator_name],
        );

        replaced
    }

    /// Complete the initiator's pending transfer.
    ///
    /// Confirming with nothing pending is not an error; the initiator is told
    /// there was nothing to confirm. Party validity is not rechecked here;
    /// invalidated parties are resolved by the next [`tick`](Self::tick).
    pub fn confirm<H: TransferHost + ?Sized>(
        &mut self,
        host: &mut H,
        initiator: ActorId,
    ) -> ConfirmOutcome {
        let Some(transfer) = self.pending.remove(&initiator) else {
            debug!(%initiator, "nothing to confirm");
            host.notify(initiator, MessageTemplate::TransferNone, &[]);
            return ConfirmOutcome::NonePending;
        };

        host.set_owner(transfer.subject, transfer.recipient);
        info!(
            %initiator,
            recipient = %transfer.recipient,
            subject = %transfer.subject,
            "transfer confirmed"
        );

        let subject_name = host.entity_name(transfer.subject);
        let initiator_name = host.actor_name(initiator);
        let recipient_name = host.actor_name(transfer.recipient);
        host.notify(
            initiator,
            MessageTemplate::TransferOld,
            &[subject_name.clone(), recipient_name],
        );
        host.notify(
            transfer.recipient,
            MessageTemplate::TransferNew,
            &[subject_name, initiator_name],
        );

        ConfirmOutcome::Transferred {
            subject: transfer.subject,
            recipient: transfer.recipient,
        }
    }

    /// Defer a confirmation to the next tick.
    pub fn queue_confirm(&mut self, initiator: ActorId) {
        self.queued.push_back(initiator);
    }

    /// Advance one simulation step.
    ///
    /// Applies queued confirmations, then counts every pending transfer down
    /// and drops those that reach zero or lost a party.
    pub fn tick<H: TransferHost + ?Sized>(&mut self, host: &mut H) -> TickReport {
        let mut report = TickReport::default();

        while let Some(initiator) = self.queued.pop_front() {
            let outcome = self.confirm(&mut *host, initiator);
            report.confirmed.push((initiator, outcome));
        }

        self.pending.retain(|_, transfer| {
            transfer.ticks_remaining = transfer.ticks_remaining.saturating_sub(1);
            if transfer.ticks_remaining > 0 && transfer.parties_valid(&*host) {
                return true;
            }
            info!(
                initiator = %transfer.initiator,
                subject = %transfer.subject,
                ticks_remaining = transfer.ticks_remaining,
                "transfer ignored"
            );
            notify_ignored(&mut *host, transfer);
            report.expired.push(*transfer);
            false
        });

        report
    }

    /// Pending transfer started by `initiator`.
    pub fn pending(&self, initiator: ActorId) -> Option<&PendingTransfer> {
        self.pending.get(&initiator)
    }

    /// Pending transfers ordered by initiator.
    pub fn iter(&self) -> impl Iterator<Item = &PendingTransfer> {
        self.pending.values()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Confirmations waiting for the next tick.
    pub fn queued(&self) -> usize {
        self.queued.len()
    }
}

fn notify_ignored<H: TransferHost + ?Sized>(host: &mut H, transfer: &PendingTransfer) {
    let initiator_name = host.actor_name(transfer.initiator);
    let recipient_name = host.actor_name(transfer.recipient);
    host.notify(
        transfer.initiator,
        MessageTemplate::TransferOldIgnore,
        &[recipient_name],
    );
    host.notify(
        transfer.recipient,
        MessageTemplate::TransferNewIgnore,
        &[initiator_name],
    );
}
