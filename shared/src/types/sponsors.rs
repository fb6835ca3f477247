//! Partner companies and the problem statements they own

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Collection, Entity, ListQuery, require_optional_text, require_text};
use crate::errors::SharedResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub company_name: String,
    pub industry: String,
    pub contact_person: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub company_name: String,
    pub industry: String,
    pub contact_person: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
}

impl Entity for Company {
    type New = NewCompany;
    type Patch = CompanyPatch;

    const COLLECTION: Collection = Collection::Companies;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.company_name
    }

    fn validate_new(new: &NewCompany) -> SharedResult<()> {
        require_text("companyName", &new.company_name)?;
        require_text("industry", &new.industry)?;
        require_text("contactPerson", &new.contact_person)
    }

    fn validate_patch(patch: &CompanyPatch) -> SharedResult<()> {
        require_optional_text("companyName", patch.company_name.as_ref())?;
        require_optional_text("industry", patch.industry.as_ref())?;
        require_optional_text("contactPerson", patch.contact_person.as_ref())
    }
}

/// Problem difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(alias = "easy", alias = "EASY")]
    Easy,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "hard", alias = "HARD")]
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// A problem statement posted by a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub problem_title: String,
    pub company_id: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProblem {
    pub problem_title: String,
    pub company_id: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub description: String,
}

/// Problems never move between companies, so `companyId` is not patchable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProblemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entity for Problem {
    type New = NewProblem;
    type Patch = ProblemPatch;

    const COLLECTION: Collection = Collection::Problems;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.problem_title
    }

    fn validate_new(new: &NewProblem) -> SharedResult<()> {
        require_text("problemTitle", &new.problem_title)?;
        require_text("companyId", &new.company_id)?;
        require_text("category", &new.category)?;
        require_text("description", &new.description)
    }

    fn validate_patch(patch: &ProblemPatch) -> SharedResult<()> {
        require_optional_text("problemTitle", patch.problem_title.as_ref())?;
        require_optional_text("category", patch.category.as_ref())?;
        require_optional_text("description", patch.description.as_ref())
    }

    fn matches(&self, query: &ListQuery) -> bool {
        let category_matches = match query.category.as_deref() {
            Some(category) if !category.eq_ignore_ascii_case("all") => self.category.eq_ignore_ascii_case(category),
            _ => true,
        };
        category_matches && query.matches_search(&self.problem_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_payload;

    fn problem(category: &str) -> Problem {
        Problem {
            id: "p1".to_string(),
            problem_title: "Smart Waste Collection Optimization".to_string(),
            company_id: "c1".to_string(),
            category: category.to_string(),
            difficulty: Difficulty::Medium,
            description: "Route garbage trucks".to_string(),
        }
    }

    #[test]
    fn test_difficulty_accepts_lowercase() {
        let new: NewProblem = parse_payload(
            Collection::Problems,
            br#"{"problemTitle":"T","companyId":"c","category":"Energy","difficulty":"hard","description":"d"}"#,
        )
        .unwrap();
        assert_eq!(new.difficulty, Difficulty::Hard);
        assert_eq!(serde_json::to_value(new.difficulty).unwrap(), "Hard");
    }

    #[test]
    fn test_difficulty_rejects_unknown() {
        let result: SharedResult<NewProblem> = parse_payload(
            Collection::Problems,
            br#"{"problemTitle":"T","companyId":"c","category":"Energy","difficulty":"Extreme","description":"d"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_problem_category_filter() {
        let p = problem("Waste Management");
        let query = ListQuery {
            category: Some("waste management".to_string()),
            ..Default::default()
        };
        assert!(p.matches(&query));

        let other = ListQuery {
            category: Some("Energy".to_string()),
            ..Default::default()
        };
        assert!(!p.matches(&other));

        let all = ListQuery {
            category: Some("all".to_string()),
            search: Some("waste".to_string()),
            ..Default::default()
        };
        assert!(p.matches(&all));
    }

    #[test]
    fn test_problem_patch_cannot_move_company() {
        let result: SharedResult<ProblemPatch> = parse_payload(Collection::Problems, br#"{"companyId":"c2"}"#);
        assert!(result.is_err());
    }
}
