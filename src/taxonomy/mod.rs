pub mod templates;

use serde::Serialize;

use crate::render::{MessageRenderer, SubjectFormatter};
use crate::types::SubjectRef;

const BYTES_PER_KB: i64 = 1024;

/// Every kind asks the renderer to translate its message.
const TRANSLATE: bool = true;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    AccountNotExist,
    LowRam,
    WalletExists,
    WalletNotExist,
    InvalidPassword,
    ContractRunning,
    Generic,
}

/// Structured data of a recognized failure, one variant per [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    AccountNotExist { account: SubjectRef },
    LowRam { needs_kb: i64, deficiency_kb: i64 },
    WalletExists { wallet: SubjectRef },
    WalletNotExist { wallet: SubjectRef },
    InvalidPassword { wallet: SubjectRef },
    ContractRunning,
    Generic { raw_message: String },
}

impl Condition {
    /// Builds a [`Condition::LowRam`] from the byte counts reported by the tool.
    pub fn low_ram(needs_bytes: i64, deficiency_bytes: i64) -> Self {
        Self::LowRam {
            needs_kb: bytes_to_kb(needs_bytes),
            deficiency_kb: bytes_to_kb(deficiency_bytes),
        }
    }

    pub fn generic(raw_message: impl Into<String>) -> Self {
        Self::Generic {
            raw_message: raw_message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AccountNotExist { .. } => ErrorKind::AccountNotExist,
            Self::LowRam { .. } => ErrorKind::LowRam,
            Self::WalletExists { .. } => ErrorKind::WalletExists,
            Self::WalletNotExist { .. } => ErrorKind::WalletNotExist,
            Self::InvalidPassword { .. } => ErrorKind::InvalidPassword,
            Self::ContractRunning => ErrorKind::ContractRunning,
            Self::Generic { .. } => ErrorKind::Generic,
        }
    }

    pub fn subject(&self) -> Option<&SubjectRef> {
        match self {
            Self::AccountNotExist { account } => Some(account),
            Self::WalletExists { wallet }
            | Self::WalletNotExist { wallet }
            | Self::InvalidPassword { wallet } => Some(wallet),
            Self::LowRam { .. } | Self::ContractRunning | Self::Generic { .. } => None,
        }
    }
}

/// Converts a byte count to whole kilobytes, always reporting one more than the
/// floored quotient.
///
/// Operators read these as "at least this much", so a 1-byte deficit reports 1kB
/// and an exact 1024 reports 2kB. Non-positive counts floor toward negative
/// infinity: `-5` bytes is `0`kB.
pub fn bytes_to_kb(bytes: i64) -> i64 {
    bytes.div_euclid(BYTES_PER_KB) + 1
}

/// A classified failure of the external tool, with its rendered display message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct TypedError {
    condition: Condition,
    message: String,
}

impl TypedError {
    /// Renders `condition` through its template and the renderer, once.
    ///
    /// If the renderer returns an empty string the untranslated template is kept,
    /// so `message` is never empty.
    pub fn new(
        condition: Condition,
        renderer: &dyn MessageRenderer,
        formatter: &dyn SubjectFormatter,
    ) -> Self {
        let raw = templates::raw_message(&condition, formatter);
        let rendered = renderer.render(&raw, TRANSLATE);
        let message = if rendered.is_empty() { raw } else { rendered };
        Self { condition, message }
    }

    pub fn kind(&self) -> ErrorKind {
        self.condition.kind()
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn subject(&self) -> Option<&SubjectRef> {
        self.condition.subject()
    }

    pub fn into_condition(self) -> Condition {
        self.condition
    }
}
