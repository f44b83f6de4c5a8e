//! Runtime executable invocation

use serde::{Deserialize, Serialize};
use sifctl_core::CommandLine;
use std::fmt;

/// Command prefix used to invoke a runtime, e.g. `["sudo", "apptainer"]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Executable {
    tokens: Vec<String>,
}

impl Executable {
    /// Split an invocation string on whitespace (`"sudo singularity"`)
    pub fn parse(invocation: &str) -> Self {
        Self::from_tokens(invocation.split_whitespace())
    }

    /// Build from explicit tokens; blank tokens are dropped
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Command line invoking this executable, ready for further arguments
    pub fn command(&self) -> Option<CommandLine> {
        CommandLine::from_tokens(self.tokens.iter().cloned())
    }
}

impl fmt::Display for Executable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

impl From<&str> for Executable {
    fn from(invocation: &str) -> Self {
        Self::parse(invocation)
    }
}
