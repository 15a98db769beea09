//! Operator identity passed explicitly to anything that mutates data

use anyhow::Result;
use std::fmt;

use crate::config::Config;

/// Environment variable naming the signed-in operator
pub const OPERATOR_ENV: &str = "SHOPDESK_OPERATOR";

/// The operator on whose behalf a write is made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorContext {
    email: String,
    display_name: Option<String>,
}

impl OperatorContext {
    pub fn new(email: impl Into<String>, display_name: Option<String>) -> Result<Self> {
        let email = email.into().trim().to_string();
        if email.is_empty() || !email.contains('@') {
            anyhow::bail!("Invalid operator email: '{}'", email);
        }
        Ok(Self {
            email,
            display_name: display_name.filter(|n| !n.trim().is_empty()),
        })
    }

    /// Resolve the operator from, in order: the `--operator` flag, the
    /// `SHOPDESK_OPERATOR` variable, the config file
    pub fn resolve(flag: Option<&str>, env_value: Option<&str>, config: &Config) -> Result<Option<Self>> {
        let display_name = config.operator.display_name.clone();

        let email = flag
            .or(env_value)
            .map(str::to_string)
            .or_else(|| config.operator.email.clone());

        match email {
            Some(email) if !email.trim().is_empty() => Ok(Some(Self::new(email, display_name)?)),
            _ => Ok(None),
        }
    }
}

impl fmt::Display for OperatorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => f.write_str(&self.email),
        }
    }
}

/// Unwrap a resolved operator for commands that write
pub fn require(operator: Option<&OperatorContext>) -> Result<&OperatorContext> {
    operator.ok_or_else(|| {
        anyhow::anyhow!(
            "No operator signed in. Pass --operator, set {} or add [operator] email to the config file.",
            OPERATOR_ENV
        )
    })
}
