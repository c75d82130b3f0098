#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod classifier;
pub mod error;
pub mod render;
pub mod taxonomy;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use classifier::patterns::{BenignCondition, Outcome, PATTERNS, Pattern, match_pattern};
pub use classifier::{Classification, Classifier, classify, validate};
pub use error::Error;
pub use render::{LogRenderer, MessageRenderer, NameFormatter, SubjectFormatter};
pub use taxonomy::{Condition, ErrorKind, TypedError, bytes_to_kb};
pub use types::{SubjectKind, SubjectRef, ToolOutput};
