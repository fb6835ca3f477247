//! Record types and the collection catalogue
//!
//! Records travel through the stores as JSON documents (`Document`) so that
//! every backend can merge partial updates the same way. The typed structs
//! here are what the rest of the system works with; field names on the wire
//! are camelCase and must stay stable for existing clients.

pub mod participants;
pub mod sponsors;
pub mod submissions;

pub use participants::{Judge, JudgePatch, NewJudge, NewTeam, Team, TeamPatch};
pub use sponsors::{Company, CompanyPatch, Difficulty, NewCompany, NewProblem, Problem, ProblemPatch};
pub use submissions::{
    Evaluation, EvaluationPatch, NewEvaluation, NewSubmission, Submission, SubmissionPatch, SubmissionStatus,
};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{SharedError, SharedResult};

/// A stored record in its wire form
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Key under which every backend stores the record identifier
pub const ID_FIELD: &str = "id";

/// The six record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Teams,
    Companies,
    Problems,
    Judges,
    Submissions,
    Evaluations,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Teams,
        Collection::Companies,
        Collection::Problems,
        Collection::Judges,
        Collection::Submissions,
        Collection::Evaluations,
    ];

    /// Plural, lowercase name used for routes and file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Teams => "teams",
            Collection::Companies => "companies",
            Collection::Problems => "problems",
            Collection::Judges => "judges",
            Collection::Submissions => "submissions",
            Collection::Evaluations => "evaluations",
        }
    }

    /// Singular label for human-readable messages
    pub fn singular(&self) -> &'static str {
        match self {
            Collection::Teams => "Team",
            Collection::Companies => "Company",
            Collection::Problems => "Problem",
            Collection::Judges => "Judge",
            Collection::Submissions => "Submission",
            Collection::Evaluations => "Evaluation",
        }
    }

    /// Foreign-key fields and the collection each one points into
    pub fn references(&self) -> &'static [(&'static str, Collection)] {
        match self {
            Collection::Problems => &[("companyId", Collection::Companies)],
            Collection::Submissions => &[("teamId", Collection::Teams), ("problemId", Collection::Problems)],
            Collection::Evaluations => &[
                ("submissionId", Collection::Submissions),
                ("judgeId", Collection::Judges),
            ],
            _ => &[],
        }
    }

    /// Field sets whose combined values must be unique within the collection
    pub fn unique_keys(&self) -> &'static [&'static [&'static str]] {
        match self {
            Collection::Companies => &[&["companyName"]],
            Collection::Evaluations => &[&["submissionId", "judgeId"]],
            _ => &[],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional filters accepted by collection listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring on the record's display name
    pub search: Option<String>,
    /// Problem category, case-insensitive exact match
    pub category: Option<String>,
    /// Submission status, case-insensitive exact match
    pub status: Option<String>,
}

impl ListQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Default::default()
        }
    }

    pub fn matches_search(&self, text: &str) -> bool {
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => text.to_lowercase().contains(&term.to_lowercase()),
            _ => true,
        }
    }
}

/// Behaviour every stored record type provides
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Creation payload (everything except server-assigned fields)
    type New: Serialize + DeserializeOwned + Send + Sync;
    /// Partial update payload; absent fields are left untouched
    type Patch: Serialize + DeserializeOwned + Default + Send + Sync;

    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// Name shown in lists and matched by `ListQuery::search`
    fn display_name(&self) -> &str;

    fn validate_new(new: &Self::New) -> SharedResult<()>;

    fn validate_patch(_patch: &Self::Patch) -> SharedResult<()> {
        Ok(())
    }

    /// Add server-assigned fields (timestamps, defaults) to a creation payload
    fn stamp_new(_fields: &mut Document, _now: DateTime<Utc>) {}

    fn matches(&self, query: &ListQuery) -> bool {
        query.matches_search(self.display_name())
    }
}

/// Serialize a payload into a document
pub fn to_document<T: Serialize>(value: &T) -> SharedResult<Document> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(SharedError::SerializationError {
            message: format!("expected a JSON object, got {other}"),
        }),
        Err(e) => Err(SharedError::SerializationError { message: e.to_string() }),
    }
}

/// Deserialize a stored document into a typed record
pub fn from_document<E: Entity>(document: Document) -> SharedResult<E> {
    serde_json::from_value(serde_json::Value::Object(document)).map_err(|e| SharedError::DeserializationError {
        collection: E::COLLECTION.to_string(),
        message: e.to_string(),
    })
}

/// Parse a raw request payload for a collection
pub fn parse_payload<T: DeserializeOwned>(collection: Collection, bytes: &[u8]) -> SharedResult<T> {
    serde_json::from_slice(bytes).map_err(|e| SharedError::DeserializationError {
        collection: collection.to_string(),
        message: e.to_string(),
    })
}

/// Deserializer for nullable patch fields
///
/// An absent key stays `None` through `#[serde(default)]`; an explicit `null`
/// becomes `Some(None)` and clears the stored value.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub(crate) fn require_text(field: &str, value: &str) -> SharedResult<()> {
    if value.trim().is_empty() {
        return Err(SharedError::MissingField { field: field.to_string() });
    }
    Ok(())
}

pub(crate) fn require_optional_text(field: &str, value: Option<&String>) -> SharedResult<()> {
    match value {
        Some(value) => require_text(field, value),
        None => Ok(()),
    }
}

/// Text check for a nullable patch field; clearing it is always allowed
pub(crate) fn require_nullable_text(field: &str, value: &Option<Option<String>>) -> SharedResult<()> {
    require_optional_text(field, value.as_ref().and_then(Option::as_ref))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Teams.as_str(), "teams");
        assert_eq!(Collection::Evaluations.to_string(), "evaluations");
        assert_eq!(Collection::Companies.singular(), "Company");
        assert_eq!(Collection::ALL.len(), 6);
    }

    #[test]
    fn test_references_point_at_parents() {
        assert!(Collection::Teams.references().is_empty());
        assert_eq!(Collection::Problems.references(), &[("companyId", Collection::Companies)]);
        let submission_refs: Vec<_> = Collection::Submissions.references().iter().map(|(f, _)| *f).collect();
        assert_eq!(submission_refs, vec!["teamId", "problemId"]);
    }

    #[test]
    fn test_unique_keys() {
        assert_eq!(Collection::Companies.unique_keys(), &[&["companyName"][..]]);
        assert_eq!(Collection::Evaluations.unique_keys(), &[&["submissionId", "judgeId"][..]]);
        assert!(Collection::Teams.unique_keys().is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let query = ListQuery::search("TRANSIT");
        assert!(query.matches_search("Smart Transit Innovators"));
        assert!(!query.matches_search("EcoCity Solutions"));

        let blank = ListQuery::search("   ");
        assert!(blank.matches_search("anything"));
        assert!(ListQuery::default().matches_search("anything"));
    }

    #[test]
    fn test_to_document_rejects_non_objects() {
        assert!(to_document(&42).is_err());
        let doc = to_document(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(doc.get("a"), Some(&serde_json::json!(1)));
    }
}
