//! Company search criteria and their translation into a typed predicate.
//!
//! [`SearchCriteria`] is what a caller asks for; [`CompanyPredicate`] is what
//! a store executes. The translation is a pure function so every store
//! (PostgreSQL, in-memory) sees exactly the same clauses:
//!
//! | criterion  | clause                                      |
//! |------------|---------------------------------------------|
//! | `industry` | industry contains value, case-insensitive   |
//! | `size`     | size equals value exactly                   |
//! | `location` | address contains value, case-insensitive    |
//!
//! Absent or blank criteria produce no clause. Clauses are ANDed and the
//! result is ordered by company name, byte-wise ascending.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::model::Company;

/// Optional filter triple used to narrow a company listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Substring of the industry label.
    #[serde(default)]
    pub industry: Option<String>,
    /// Exact size category.
    #[serde(default)]
    pub size: Option<String>,
    /// Substring of the address.
    #[serde(default)]
    pub location: Option<String>,
}

impl SearchCriteria {
    /// Whether no criterion constrains the result.
    pub fn is_empty(&self) -> bool {
        present(&self.industry).is_none()
            && present(&self.size).is_none()
            && present(&self.location).is_none()
    }

    /// Translate the criteria into the predicate a store executes.
    pub fn to_predicate(&self) -> CompanyPredicate {
        let clauses = [
            present(&self.industry).map(|v| CompanyClause::IndustryContains(v.to_string())),
            present(&self.size).map(|v| CompanyClause::SizeEquals(v.to_string())),
            present(&self.location).map(|v| CompanyClause::AddressContains(v.to_string())),
        ]
        .into_iter()
        .flatten()
        .collect();

        CompanyPredicate {
            clauses,
            order: CompanyOrder::NameAsc,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for SearchCriteria
where
    K: AsRef<str>,
    V: Into<String>,
{
    /// Build criteria from raw query pairs. The first value of each known
    /// key wins; repeated and unknown keys are ignored.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut criteria = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "industry" => &mut criteria.industry,
                "size" => &mut criteria.size,
                "location" => &mut criteria.location,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        criteria
    }
}

/// A criterion counts only when it has non-whitespace content.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// One constraint over a company row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyClause {
    /// `industry` contains the value, ignoring case.
    IndustryContains(String),
    /// `size` equals the value byte for byte.
    SizeEquals(String),
    /// `address` contains the value, ignoring case.
    AddressContains(String),
}

impl CompanyClause {
    /// Evaluate the clause against a company.
    pub fn matches(&self, company: &Company) -> bool {
        match self {
            Self::IndustryContains(needle) => contains_ignore_case(&company.industry, needle),
            Self::SizeEquals(value) => company.size == *value,
            Self::AddressContains(needle) => contains_ignore_case(&company.address, needle),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Result ordering. Only one order exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompanyOrder {
    /// Ascending by name, compared as raw UTF-8 bytes (`COLLATE "C"`).
    #[default]
    NameAsc,
}

impl CompanyOrder {
    /// Compare two companies under this order.
    pub fn compare(&self, a: &Company, b: &Company) -> Ordering {
        match self {
            Self::NameAsc => a.name.as_bytes().cmp(b.name.as_bytes()),
        }
    }
}

/// A conjunction of clauses plus an ordering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompanyPredicate {
    /// Clauses that must all hold.
    pub clauses: Vec<CompanyClause>,
    /// Ordering applied after filtering.
    pub order: CompanyOrder,
}

impl CompanyPredicate {
    /// The predicate matching every company.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether every clause holds for the company.
    pub fn matches(&self, company: &Company) -> bool {
        self.clauses.iter().all(|clause| clause.matches(company))
    }

    /// Filter and order a collection. The sort is stable, so ties keep
    /// their input order.
    pub fn apply<T, F>(&self, items: impl IntoIterator<Item = T>, company_of: F) -> Vec<T>
    where
        F: Fn(&T) -> &Company,
    {
        let mut selected: Vec<T> = items
            .into_iter()
            .filter(|item| self.matches(company_of(item)))
            .collect();
        selected.sort_by(|a, b| self.order.compare(company_of(a), company_of(b)));
        selected
    }
}
