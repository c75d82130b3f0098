use serde::Serialize;

use crate::taxonomy::ErrorKind;

/// A recognized message that arrives on the error channel but is not a failure.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum_macros::Display,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BenignCondition {
    /// The node accepted the transaction locally but has not confirmed it yet.
    ExecutedLocally,
    /// Importing a key the wallet already holds.
    KeyAlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Raise(ErrorKind),
    Benign(BenignCondition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub trigger: &'static str,
    pub outcome: Outcome,
}

/// Known triggers in priority order. The first whose text is contained in the
/// message decides the outcome; matching is case-sensitive and untrimmed.
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        trigger: "unknown key",
        outcome: Outcome::Raise(ErrorKind::AccountNotExist),
    },
    Pattern {
        trigger: "Error 3080001: Account using more than allotted RAM",
        outcome: Outcome::Raise(ErrorKind::LowRam),
    },
    Pattern {
        trigger: "transaction executed locally, but may not be",
        outcome: Outcome::Benign(BenignCondition::ExecutedLocally),
    },
    Pattern {
        trigger: "Wallet already exists",
        outcome: Outcome::Raise(ErrorKind::WalletExists),
    },
    Pattern {
        trigger: "Error 3120002: Nonexistent wallet",
        outcome: Outcome::Raise(ErrorKind::WalletNotExist),
    },
    Pattern {
        trigger: "Invalid wallet password",
        outcome: Outcome::Raise(ErrorKind::InvalidPassword),
    },
    Pattern {
        trigger: "Contract is already running this version of code",
        outcome: Outcome::Raise(ErrorKind::ContractRunning),
    },
    Pattern {
        trigger: "Error 3120008: Key already exists",
        outcome: Outcome::Benign(BenignCondition::KeyAlreadyExists),
    },
];

pub fn match_pattern(err_msg: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| err_msg.contains(p.trigger))
}
