//! Chat message templates sent during a transfer.

use serde::{Deserialize, Serialize};

/// Translatable chat message.
///
/// Arguments are positional and listed per template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageTemplate {
    /// To the initiator: (subject, recipient)
    TransferOldStart,
    /// To the recipient: (subject, initiator)
    TransferNewStart,
    /// To the initiator: (subject, recipient)
    TransferOld,
    /// To the recipient: (subject, initiator)
    TransferNew,
    /// To the initiator, no arguments
    TransferNone,
    /// To the initiator: (recipient)
    TransferOldIgnore,
    /// To the recipient: (initiator)
    TransferNewIgnore,
}

impl MessageTemplate {
    /// Translation key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::TransferOldStart => "bison.transfer.old.start",
            Self::TransferNewStart => "bison.transfer.new.start",
            Self::TransferOld => "bison.transfer.old",
            Self::TransferNew => "bison.transfer.new",
            Self::TransferNone => "bison.transfer.none",
            Self::TransferOldIgnore => "bison.transfer.old.ignore",
            Self::TransferNewIgnore => "bison.transfer.new.ignore",
        }
    }

    /// Number of arguments the translation expects.
    pub fn arity(&self) -> usize {
        match self {
            Self::TransferNone => 0,
            Self::TransferOldIgnore | Self::TransferNewIgnore => 1,
            _ => 2,
        }
    }
}
