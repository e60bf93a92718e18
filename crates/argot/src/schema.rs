//! Serializable snapshot of a parser's option table.
//!
//! Help text is rendered from this snapshot, so `--help` output and an
//! exported schema always describe the same options.

use serde::{Deserialize, Serialize};

use crate::descriptor::Descriptor;
use crate::registry::Registry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OptionSchema {
    pub aliases: Vec<String>,
    #[serde(default)]
    pub takes_value: bool,
    #[serde(default)]
    pub required: bool,
    /// Only set for options that take a value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metavar: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
}

impl OptionSchema {
    pub(crate) fn from_descriptor(descriptor: &Descriptor) -> Self {
        let takes_value = descriptor.takes_value();
        Self {
            aliases: descriptor.aliases.clone(),
            takes_value,
            required: descriptor.required,
            metavar: takes_value.then(|| descriptor.metavar.clone()),
            help: descriptor.help.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ParserSchema {
    pub program: String,
    /// Options in registration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSchema>,
}

impl ParserSchema {
    pub(crate) fn from_registry(program: &str, registry: &Registry) -> Self {
        Self {
            program: program.to_string(),
            options: registry
                .iter()
                .map(|d| OptionSchema::from_descriptor(&d.borrow()))
                .collect(),
        }
    }
}
