use wasm_bindgen::prelude::*;

use crate::classifier::patterns::{Outcome, PATTERNS};
use crate::classifier::{Classification, classify};
use crate::types::{SubjectKind, SubjectRef};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;
}

fn to_js(value: &serde_json::Value) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    to_js(&obj)
}

fn classification_json(
    classification: &Classification,
) -> Result<serde_json::Value, crate::Error> {
    let value = match classification {
        Classification::Clean => serde_json::json!({ "ok": true }),
        Classification::Benign { condition } => serde_json::json!({
            "ok": true,
            "benign": condition.as_ref(),
        }),
        Classification::Failed { error } => serde_json::json!({
            "ok": false,
            "kind": error.kind().as_ref(),
            "message": error.message(),
            "condition": serde_json::to_value(error.condition())?,
        }),
    };
    Ok(value)
}

/// Classify tool error text for the given subject (`"account"` or `"wallet"`).
#[wasm_bindgen]
pub fn classify_message(
    err_msg: Option<String>,
    subject_kind: &str,
    subject_name: &str,
) -> JsValue {
    let Ok(kind) = subject_kind.parse::<SubjectKind>() else {
        return error_result("Unknown subject kind");
    };
    let subject = SubjectRef {
        kind,
        name: subject_name.to_string(),
    };

    match classification_json(&classify(err_msg.as_deref(), &subject)) {
        Ok(value) => to_js(&value),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Returns the trigger table in priority order.
#[wasm_bindgen]
pub fn known_patterns() -> JsValue {
    let rows: Vec<serde_json::Value> = PATTERNS
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let (outcome, tag) = match &p.outcome {
                Outcome::Raise(kind) => ("error", kind.as_ref()),
                Outcome::Benign(condition) => ("benign", condition.as_ref()),
            };
            serde_json::json!({
                "priority": i + 1,
                "trigger": p.trigger,
                "outcome": outcome,
                "tag": tag,
            })
        })
        .collect();
    to_js(&serde_json::Value::Array(rows))
}
