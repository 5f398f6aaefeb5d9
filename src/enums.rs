use serde::{Deserialize, Serialize};
use std::fmt;

/// Base schema type a foreign-key rule is attached to.
///
/// The rule itself does not coerce or check the type of the value; the base
/// type only selects the error-code prefix the host uses for messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseType {
    #[default]
    String,
    Number,
}

impl BaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::String => "string",
            BaseType::Number => "number",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
