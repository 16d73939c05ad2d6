//! The closed set of personal-finance chapters questions can be generated for.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chapter {
    /// URL-safe slug used in request paths
    pub id: &'static str,
    /// Human-readable title used in prompts and response keys
    pub title: &'static str,
}

pub const CHAPTERS: &[Chapter] = &[
    Chapter {
        id: "introduction_to_personal_finance",
        title: "Introduction to Personal Finance",
    },
    Chapter {
        id: "setting_financial_goals",
        title: "Setting Financial Goals",
    },
    Chapter {
        id: "budgeting_and_expense_tracking",
        title: "Budgeting and Expense Tracking",
    },
    Chapter {
        id: "online_and_mobile_banking",
        title: "Online and Mobile Banking",
    },
];

/// Find a chapter by its slug.
pub fn lookup(id: &str) -> Option<&'static Chapter> {
    CHAPTERS.iter().find(|chapter| chapter.id == id)
}

/// Chapter slugs in registry order.
pub fn ids() -> Vec<&'static str> {
    CHAPTERS.iter().map(|chapter| chapter.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lookup_finds_registered_chapter() {
        let chapter = lookup("setting_financial_goals").unwrap();
        assert_eq!(chapter.title, "Setting Financial Goals");
        assert!(lookup("Setting Financial Goals").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn ids_are_unique_and_url_safe() {
        let ids = ids();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
        for id in ids {
            assert!(id.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "{id}");
        }
    }
}
