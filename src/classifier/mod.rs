pub mod patterns;
pub mod ram;

use serde::Serialize;

use crate::render::{LogRenderer, MessageRenderer, NameFormatter, SubjectFormatter};
use crate::taxonomy::{Condition, ErrorKind, TypedError};
use crate::types::{SubjectRef, ToolOutput};
use patterns::{BenignCondition, Outcome, match_pattern};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Classification {
    /// The tool reported no error text.
    Clean,
    /// The text matched a trigger that is not a failure.
    Benign { condition: BenignCondition },
    Failed { error: TypedError },
}

impl Classification {
    /// `true` for both [`Classification::Clean`] and [`Classification::Benign`].
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    pub fn error(&self) -> Option<&TypedError> {
        match self {
            Self::Failed { error } => Some(error),
            Self::Clean | Self::Benign { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<(), TypedError> {
        match self {
            Self::Failed { error } => Err(error),
            Self::Clean | Self::Benign { .. } => Ok(()),
        }
    }
}

/// Turns tool error text into a [`Classification`], rendering failures through
/// the supplied collaborators.
#[derive(Clone, Copy)]
pub struct Classifier<'a> {
    renderer: &'a dyn MessageRenderer,
    formatter: &'a dyn SubjectFormatter,
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self {
            renderer: &LogRenderer,
            formatter: &NameFormatter,
        }
    }
}

impl<'a> Classifier<'a> {
    pub fn new(renderer: &'a dyn MessageRenderer, formatter: &'a dyn SubjectFormatter) -> Self {
        Self {
            renderer,
            formatter,
        }
    }

    pub fn classify(&self, err_msg: Option<&str>, subject: &SubjectRef) -> Classification {
        let Some(err_msg) = err_msg.filter(|m| !m.is_empty()) else {
            return Classification::Clean;
        };

        let condition = match match_pattern(err_msg).map(|p| p.outcome) {
            Some(Outcome::Benign(condition)) => {
                tracing::debug!(%condition, "swallowed benign tool message");
                return Classification::Benign { condition };
            }
            Some(Outcome::Raise(kind)) => condition_for(kind, err_msg, subject),
            None => Condition::generic(err_msg),
        };

        Classification::Failed {
            error: TypedError::new(condition, self.renderer, self.formatter),
        }
    }

    pub fn classify_output(&self, output: &ToolOutput, subject: &SubjectRef) -> Classification {
        self.classify(output.err_msg(), subject)
    }

    pub fn validate(&self, err_msg: Option<&str>, subject: &SubjectRef) -> Result<(), TypedError> {
        self.classify(err_msg, subject).into_result()
    }
}

fn condition_for(kind: ErrorKind, err_msg: &str, subject: &SubjectRef) -> Condition {
    match kind {
        ErrorKind::AccountNotExist => Condition::AccountNotExist {
            account: subject.clone(),
        },
        ErrorKind::LowRam => low_ram_condition(err_msg),
        ErrorKind::WalletExists => Condition::WalletExists {
            wallet: subject.clone(),
        },
        ErrorKind::WalletNotExist => Condition::WalletNotExist {
            wallet: subject.clone(),
        },
        ErrorKind::InvalidPassword => Condition::InvalidPassword {
            wallet: subject.clone(),
        },
        ErrorKind::ContractRunning => Condition::ContractRunning,
        ErrorKind::Generic => Condition::generic(err_msg),
    }
}

fn low_ram_condition(err_msg: &str) -> Condition {
    let parsed = ram::parse_ram_usage(err_msg)
        .and_then(|usage| Ok((usage.needs_bytes, usage.deficiency_bytes()?)));
    match parsed {
        Ok((needs_bytes, deficiency_bytes)) => Condition::low_ram(needs_bytes, deficiency_bytes),
        Err(e) => {
            tracing::warn!(error = %e, "unparsable RAM failure, reporting raw message");
            Condition::generic(err_msg)
        }
    }
}

/// Classifies with the default collaborators ([`LogRenderer`], [`NameFormatter`]).
pub fn classify(err_msg: Option<&str>, subject: &SubjectRef) -> Classification {
    Classifier::default().classify(err_msg, subject)
}

/// Returns `Ok(())` for empty and benign messages, the typed failure otherwise.
pub fn validate(err_msg: Option<&str>, subject: &SubjectRef) -> Result<(), TypedError> {
    Classifier::default().validate(err_msg, subject)
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{Classification, Classifier, classify, validate};
    use crate::classifier::patterns::{BenignCondition, PATTERNS};
    use crate::render::{MessageRenderer, NameFormatter};
    use crate::taxonomy::{Condition, ErrorKind};
    use crate::types::SubjectRef;

    const RAM_MSG: &str =
        "Error 3080001: Account using more than allotted RAM: needs 2048 bytes has 1000 bytes";

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl MessageRenderer for Counting {
        fn render(&self, raw: &str, translate: bool) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(translate);
            raw.to_string()
        }
    }

    fn alice() -> SubjectRef {
        SubjectRef::account("alice")
    }

    fn failed(c: Classification) -> Condition {
        match c {
            Classification::Failed { error } => error.into_condition(),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn empty_or_absent_message_is_clean() {
        assert_eq!(classify(None, &alice()), Classification::Clean);
        assert_eq!(classify(Some(""), &alice()), Classification::Clean);
        assert!(validate(None, &alice()).is_ok());
    }

    #[test]
    fn whitespace_is_not_empty() {
        assert_eq!(
            failed(classify(Some(" "), &alice())),
            Condition::generic(" ")
        );
    }

    #[test]
    fn benign_messages_are_ok() {
        assert_eq!(
            classify(
                Some("transaction executed locally, but may not be confirmed"),
                &alice()
            ),
            Classification::Benign {
                condition: BenignCondition::ExecutedLocally
            }
        );
        let c = classify(Some("Error 3120008: Key already exists"), &alice());
        assert!(c.is_ok());
        assert!(c.error().is_none());
    }

    #[test]
    fn unknown_key_carries_subject() {
        assert_eq!(
            failed(classify(Some("unknown key alice"), &alice())),
            Condition::AccountNotExist { account: alice() }
        );
    }

    #[test]
    fn low_ram_extracts_kilobytes() {
        assert_eq!(
            failed(classify(Some(RAM_MSG), &alice())),
            Condition::LowRam {
                needs_kb: 3,
                deficiency_kb: 2
            }
        );
    }

    #[test]
    fn low_ram_with_unparsable_counts_is_generic() {
        let msg = "Error 3080001: Account using more than allotted RAM: needs ? bytes has ? bytes";
        assert_eq!(failed(classify(Some(msg), &alice())), Condition::generic(msg));

        let msg = "Error 3080001: Account using more than allotted RAM";
        assert_eq!(failed(classify(Some(msg), &alice())), Condition::generic(msg));
    }

    #[test]
    fn wallet_conditions_carry_subject() {
        let wallet = SubjectRef::wallet("default");
        let cases = [
            (
                "Wallet already exists",
                Condition::WalletExists {
                    wallet: wallet.clone(),
                },
            ),
            (
                "Error 3120002: Nonexistent wallet",
                Condition::WalletNotExist {
                    wallet: wallet.clone(),
                },
            ),
            (
                "Invalid wallet password",
                Condition::InvalidPassword {
                    wallet: wallet.clone(),
                },
            ),
        ];
        for (msg, expected) in cases {
            assert_eq!(failed(classify(Some(msg), &wallet)), expected, "{msg}");
        }
    }

    #[test]
    fn contract_running_has_no_subject() {
        let err = validate(
            Some("Contract is already running this version of code"),
            &alice(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContractRunning);
        assert!(err.subject().is_none());
    }

    #[test]
    fn unrecognized_message_is_generic_verbatim() {
        let err = validate(Some("disk full"), &alice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.condition(), &Condition::generic("disk full"));
        assert_eq!(err.message(), "disk full");
    }

    #[test]
    fn priority_one_beats_priority_four() {
        assert_eq!(
            failed(classify(Some("unknown key / Wallet already exists"), &alice())),
            Condition::AccountNotExist { account: alice() }
        );
    }

    #[test]
    fn benign_trigger_shadows_later_errors() {
        let msg = "transaction executed locally, but may not be confirmed; Invalid wallet password";
        assert!(classify(Some(msg), &alice()).is_ok());
    }

    #[test]
    fn classification_is_idempotent() {
        let inputs = [
            None,
            Some(""),
            Some(RAM_MSG),
            Some("unknown key alice"),
            Some("Error 3120008: Key already exists"),
            Some("disk full"),
        ];
        for input in inputs {
            assert_eq!(classify(input, &alice()), classify(input, &alice()));
        }
    }

    #[test]
    fn renderer_runs_once_per_failure_and_never_for_ok() {
        let renderer = Counting::default();
        let classifier = Classifier::new(&renderer, &NameFormatter);

        for pattern in PATTERNS {
            let _ = classifier.classify(Some(pattern.trigger), &alice());
        }
        let _ = classifier.classify(Some("disk full"), &alice());
        let _ = classifier.classify(None, &alice());

        // eight table entries, two benign, plus the generic message
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn into_result_maps_outcomes() {
        assert!(Classification::Clean.into_result().is_ok());
        let err = classify(Some("Invalid wallet password"), &alice())
            .into_result()
            .unwrap_err();
        assert_eq!(err.message(), "Invalid password for wallet alice");
    }
}
