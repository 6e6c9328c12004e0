//! Custom component discovery for include files.
//!
//! Documents may list source files under `includes` that define custom
//! parameter, recorder and node classes. This module reads those files
//! without executing them:
//!
//! ```text
//! source text ──lexer──▶ tokens ──scanner──▶ class headers ──classify──▶ ImportRecord
//! ```
//!
//! Classification intersects each class's declared bases with the known
//! base classes of every [`ComponentCategory`], taking the first match in
//! the fixed order parameter → recorder → node.

mod builtins;
mod lexer;
mod scanner;

#[cfg(test)]
mod tests;

pub use builtins::{is_builtin_key, is_known_base};
pub use scanner::{ImportRecord, is_identifier, scan_source, scan_source_file};

use std::fmt;

/// Kind of component a class implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentCategory {
    Parameter,
    Recorder,
    Node,
}

impl ComponentCategory {
    /// Classification order when a class matches several categories.
    pub const PRIORITY: [ComponentCategory; 3] = [Self::Parameter, Self::Recorder, Self::Node];

    /// The class-name suffix stripped to form a type key.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Parameter => Some("parameter"),
            Self::Recorder => Some("recorder"),
            Self::Node => None,
        }
    }

    /// Normalised key under which a class or `type` string registers.
    ///
    /// The key is lower-cased and loses a trailing `parameter` / `recorder`
    /// suffix, unless that would leave it empty.
    ///
    /// ```
    /// use hydronet::imports::ComponentCategory;
    ///
    /// assert_eq!(ComponentCategory::Parameter.key_of("MonthlyProfileParameter"), "monthlyprofile");
    /// assert_eq!(ComponentCategory::Parameter.key_of("monthlyprofile"), "monthlyprofile");
    /// assert_eq!(ComponentCategory::Node.key_of("Storage"), "storage");
    /// ```
    pub fn key_of(self, type_name: &str) -> String {
        let lower = type_name.to_lowercase();
        match self.suffix() {
            Some(suffix) if lower.len() > suffix.len() && lower.ends_with(suffix) => {
                lower[..lower.len() - suffix.len()].to_string()
            }
            _ => lower,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Parameter => "parameter",
            Self::Recorder => "recorder",
            Self::Node => "node",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
