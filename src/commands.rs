use anyhow::Result;

use crate::validator::WalletValidator;

pub const VALIDATE: &str = "validate";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Validate { address: Option<String> },
}

/// Parses `{prefix}validate <address>`. Anything after the first argument
/// is ignored. Returns `None` for messages that are not a known command.
pub fn parse_command(prefix: &str, content: &str) -> Option<Command> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let mut parts = rest.split_whitespace();

    if parts.next()? != VALIDATE {
        return None;
    }
    // no whitespace allowed between prefix and command name
    if !rest.starts_with(VALIDATE) {
        return None;
    }

    Some(Command::Validate {
        address: parts.next().map(str::to_string),
    })
}

pub fn usage(prefix: &str) -> String {
    format!("Usage: {prefix}{VALIDATE} <address>")
}

pub async fn dispatch(
    validator: &WalletValidator,
    prefix: &str,
    identifier: &str,
    command: Command,
) -> Result<String> {
    match command {
        Command::Validate { address: None } => Ok(usage(prefix)),
        Command::Validate {
            address: Some(address),
        } => {
            let outcome = validator.handle_validation_request(identifier, &address).await?;
            Ok(outcome.reply())
        }
    }
}
