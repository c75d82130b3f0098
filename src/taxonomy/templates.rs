use crate::render::SubjectFormatter;
use crate::taxonomy::Condition;

/// Untranslated display text for a condition, before it reaches the renderer.
pub fn raw_message(condition: &Condition, formatter: &dyn SubjectFormatter) -> String {
    match condition {
        Condition::AccountNotExist { account } => format!(
            "Account ``{}`` does not exist in the blockchain. It may be created.",
            formatter.format_subject(account)
        ),
        Condition::LowRam {
            needs_kb,
            deficiency_kb,
        } => format!("RAM needed is {needs_kb}kB, deficiency is {deficiency_kb}kB."),
        Condition::WalletExists { wallet } => {
            format!("Wallet ``{}`` already exists.", formatter.format_subject(wallet))
        }
        Condition::WalletNotExist { wallet } => {
            format!("Wallet ``{}`` does not exist.", formatter.format_subject(wallet))
        }
        Condition::InvalidPassword { wallet } => format!(
            "Invalid password for wallet {}",
            formatter.format_subject(wallet)
        ),
        Condition::ContractRunning => {
            "Contract is already running this version of code".to_string()
        }
        Condition::Generic { raw_message } => raw_message.clone(),
    }
}
