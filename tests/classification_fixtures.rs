#![expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use teos_errors::{
    BenignCondition, Classification, Classifier, Condition, ErrorKind, MessageRenderer,
    NameFormatter, SubjectFormatter, SubjectRef, ToolOutput, TypedError, classify, validate,
};

fn load_outputs() -> BTreeMap<String, ToolOutput> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = format!("{manifest_dir}/tests/fixtures/tool_outputs.json");
    let data =
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("failed to parse {path}: {e}"))
}

fn fixture(name: &str) -> ToolOutput {
    load_outputs()
        .remove(name)
        .unwrap_or_else(|| panic!("missing fixture for {name}"))
}

fn classify_fixture(name: &str, subject: &SubjectRef) -> Classification {
    Classifier::default().classify_output(&fixture(name), subject)
}

fn expect_failure(name: &str, subject: &SubjectRef) -> TypedError {
    match classify_fixture(name, subject) {
        Classification::Failed { error } => error,
        other => panic!("expected {name} to fail, got {other:?}"),
    }
}

fn carol() -> SubjectRef {
    SubjectRef::account("carol")
}

fn default_wallet() -> SubjectRef {
    SubjectRef::wallet("default")
}

/// Records every call, translating by wrapping the text in brackets.
#[derive(Default)]
struct Recording {
    calls: Mutex<Vec<(String, bool)>>,
}

impl MessageRenderer for Recording {
    fn render(&self, raw: &str, translate: bool) -> String {
        self.calls.lock().unwrap().push((raw.to_string(), translate));
        format!("[{raw}]")
    }
}

struct Quoted;

impl SubjectFormatter for Quoted {
    fn format_subject(&self, subject: &SubjectRef) -> String {
        format!("{} '{}'", subject.kind, subject.name)
    }
}

// ──────────────────── ok outcomes ────────────────────

#[test]
fn empty_outputs_are_clean() {
    for name in ["clean", "null_err_msg", "empty_err_msg"] {
        assert_eq!(
            classify_fixture(name, &carol()),
            Classification::Clean,
            "{name}"
        );
    }
}

#[test]
fn benign_outputs_are_swallowed() {
    let expected = [
        ("executed_locally", BenignCondition::ExecutedLocally),
        ("key_exists", BenignCondition::KeyAlreadyExists),
    ];
    for (name, condition) in expected {
        let c = classify_fixture(name, &default_wallet());
        assert!(c.is_ok(), "{name}");
        assert_eq!(c, Classification::Benign { condition }, "{name}");
    }
}

// ──────────────────── failures ────────────────────

#[test]
fn every_failure_fixture_maps_to_its_kind() {
    let expected: &[(&str, ErrorKind)] = &[
        ("unknown_account", ErrorKind::AccountNotExist),
        ("low_ram", ErrorKind::LowRam),
        ("low_ram_large", ErrorKind::LowRam),
        ("low_ram_garbled", ErrorKind::Generic),
        ("wallet_exists", ErrorKind::WalletExists),
        ("wallet_missing", ErrorKind::WalletNotExist),
        ("wrong_password", ErrorKind::InvalidPassword),
        ("contract_running", ErrorKind::ContractRunning),
        ("connection_refused", ErrorKind::Generic),
    ];
    for (name, kind) in expected {
        assert_eq!(
            expect_failure(name, &carol()).kind(),
            *kind,
            "wrong classification for {name}"
        );
    }
}

#[test]
fn unknown_account_names_the_subject() {
    let err = expect_failure("unknown_account", &carol());
    assert_eq!(err.subject(), Some(&carol()));
    assert_eq!(
        err.message(),
        "Account ``carol`` does not exist in the blockchain. It may be created."
    );
}

#[test]
fn low_ram_reports_kilobytes() {
    let err = expect_failure("low_ram", &carol());
    assert_eq!(
        err.condition(),
        &Condition::LowRam {
            needs_kb: 3,
            deficiency_kb: 2
        }
    );
    assert_eq!(err.message(), "RAM needed is 3kB, deficiency is 2kB.");

    // 185743 / 1024 = 181; (185743 - 2996) / 1024 = 178
    let err = expect_failure("low_ram_large", &carol());
    assert_eq!(
        err.condition(),
        &Condition::LowRam {
            needs_kb: 182,
            deficiency_kb: 179
        }
    );
}

#[test]
fn garbled_low_ram_keeps_raw_text() {
    let output = fixture("low_ram_garbled");
    let err = expect_failure("low_ram_garbled", &carol());
    assert_eq!(Some(err.message()), output.err_msg());
    assert!(err.subject().is_none());
}

#[test]
fn wallet_failures_carry_the_wallet() {
    let wallet = default_wallet();
    assert_eq!(
        expect_failure("wallet_exists", &wallet).message(),
        "Wallet ``default`` already exists."
    );
    assert_eq!(
        expect_failure("wallet_missing", &wallet).message(),
        "Wallet ``default`` does not exist."
    );
    let err = expect_failure("wrong_password", &wallet);
    assert_eq!(err.message(), "Invalid password for wallet default");
    assert_eq!(err.into_condition(), Condition::InvalidPassword { wallet });
}

#[test]
fn unrecognized_output_is_reported_verbatim() {
    let output = fixture("connection_refused");
    let err = validate(output.err_msg(), &carol()).unwrap_err();
    assert_eq!(
        err.condition(),
        &Condition::Generic {
            raw_message: output.err_msg().unwrap().to_string()
        }
    );
    assert_eq!(err.to_string(), output.err_msg().unwrap());
}

// ──────────────────── collaborators ────────────────────

#[test]
fn custom_collaborators_shape_the_message() {
    let renderer = Recording::default();
    let classifier = Classifier::new(&renderer, &Quoted);

    let err = classifier
        .validate(fixture("wallet_missing").err_msg(), &default_wallet())
        .unwrap_err();
    assert_eq!(err.message(), "[Wallet ``wallet 'default'`` does not exist.]");

    assert!(
        classifier
            .validate(fixture("key_exists").err_msg(), &default_wallet())
            .is_ok()
    );

    let calls = renderer.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![(
            "Wallet ``wallet 'default'`` does not exist.".to_string(),
            true
        )]
    );
}

#[test]
fn shared_classifier_across_threads() {
    let classifier = Classifier::new(&Passthrough, &NameFormatter);
    let outputs = load_outputs();

    std::thread::scope(|s| {
        let handles: Vec<_> = outputs
            .values()
            .map(|output| {
                s.spawn(move || {
                    (
                        classifier.classify_output(output, &carol()),
                        classify(output.err_msg(), &carol()),
                    )
                })
            })
            .collect();
        for handle in handles {
            let (custom, default) = handle.join().unwrap();
            assert_eq!(custom, default);
        }
    });
}

/// Passes text through untouched without logging.
struct Passthrough;

impl MessageRenderer for Passthrough {
    fn render(&self, raw: &str, _translate: bool) -> String {
        raw.to_string()
    }
}
