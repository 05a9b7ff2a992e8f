use std::fmt;

use crate::Category;

/// What to do with a warning whose category a [`Filter`] matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Show every occurrence, never consult or update the dedup registry.
    Always,
    /// Show the first occurrence per module, message, category and line.
    Default,
    /// Never show.
    Ignore,
    /// Show the first occurrence per module, message and category, regardless of line.
    Module,
    /// Show the first occurrence per message and category in the whole process.
    Once,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Always => "always",
            Action::Default => "default",
            Action::Ignore => "ignore",
            Action::Module => "module",
            Action::Once => "once",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Filter {
    pub action: Action,
    pub category: Category,
}

impl Filter {
    pub fn new(action: Action, category: Category) -> Self {
        Self { action, category }
    }

    pub fn matches(&self, category: &Category) -> bool {
        category.is_subcategory_of(&self.category)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.action, self.category)
    }
}
