use serde::{Deserialize, Serialize};

/// Error channel of one external tool invocation, as captured by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToolOutput {
    /// Raw error text. `None` and `""` both mean the tool reported nothing.
    #[serde(default)]
    pub err_msg: Option<String>,
}

impl ToolOutput {
    pub fn new(err_msg: impl Into<String>) -> Self {
        Self {
            err_msg: Some(err_msg.into()),
        }
    }

    pub fn err_msg(&self) -> Option<&str> {
        self.err_msg.as_deref()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubjectKind {
    Account,
    Wallet,
}

/// The account or wallet the failed command was about.
///
/// Never parsed out of the error text: the caller already knows which subject it
/// invoked the tool for and hands it to the classifier alongside the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRef {
    pub kind: SubjectKind,
    pub name: String,
}

impl SubjectRef {
    pub fn account(name: impl Into<String>) -> Self {
        Self {
            kind: SubjectKind::Account,
            name: name.into(),
        }
    }

    pub fn wallet(name: impl Into<String>) -> Self {
        Self {
            kind: SubjectKind::Wallet,
            name: name.into(),
        }
    }
}
