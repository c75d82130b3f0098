use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

static NEEDS_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"needs\s(\S+)\sbytes\shas"));
static HAS_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"bytes\shas\s(\S+)\sbytes"));

/// Byte counts reported by an "allotted RAM" failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamUsage {
    pub needs_bytes: i64,
    pub has_bytes: i64,
}

impl RamUsage {
    pub fn deficiency_bytes(&self) -> Result<i64, Error> {
        self.needs_bytes
            .checked_sub(self.has_bytes)
            .ok_or_else(|| Error::Extraction {
                reason: format!(
                    "RAM deficiency overflows: needs {} has {}",
                    self.needs_bytes, self.has_bytes
                ),
            })
    }
}

fn capture_bytes(
    re: &LazyLock<Result<Regex, regex::Error>>,
    err_msg: &str,
    field: &str,
) -> Result<i64, Error> {
    let re = re.as_ref().map_err(|e| Error::Pattern(e.clone()))?;
    let token = re
        .captures(err_msg)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::Extraction {
            reason: format!("no `{field}` byte count in RAM message"),
        })?;
    token.parse::<i64>().map_err(|e| Error::Extraction {
        reason: format!("`{field}` byte count {token:?} is not an integer: {e}"),
    })
}

/// Extracts `needs` and `has` from text like
/// `... needs 2048 bytes has 1000 bytes`.
pub fn parse_ram_usage(err_msg: &str) -> Result<RamUsage, Error> {
    Ok(RamUsage {
        needs_bytes: capture_bytes(&NEEDS_RE, err_msg, "needs")?,
        has_bytes: capture_bytes(&HAS_RE, err_msg, "has")?,
    })
}
