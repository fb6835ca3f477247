//! Submissions and the evaluations judges write for them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Collection, Document, Entity, ListQuery, nullable, require_nullable_text, require_optional_text, require_text};
use crate::errors::SharedResult;

/// Review state of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubmissionStatus {
    #[default]
    #[serde(rename = "submitted", alias = "Submitted")]
    Submitted,
    #[serde(rename = "under review", alias = "Under Review", alias = "under_review")]
    UnderReview,
    #[serde(rename = "evaluated", alias = "Evaluated")]
    Evaluated,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::UnderReview => "under review",
            SubmissionStatus::Evaluated => "evaluated",
        }
    }

    /// Case-insensitive lookup; underscores are accepted in place of spaces
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('_', " ").as_str() {
            "submitted" => Some(SubmissionStatus::Submitted),
            "under review" => Some(SubmissionStatus::UnderReview),
            "evaluated" => Some(SubmissionStatus::Evaluated),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A team's solution to one problem
///
/// The score fields are a cache of the evaluation rollup once any evaluation
/// exists; before that they may be set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub team_id: String,
    pub problem_id: String,
    pub solution_title: String,
    pub solution_description: String,
    pub innovation_score: Option<u32>,
    pub feasibility_score: Option<u32>,
    pub total_score: Option<u32>,
    pub award_type: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub team_id: String,
    pub problem_id: String,
    pub solution_title: String,
    pub solution_description: String,
    #[serde(default)]
    pub innovation_score: Option<u32>,
    #[serde(default)]
    pub feasibility_score: Option<u32>,
    #[serde(default)]
    pub total_score: Option<u32>,
    #[serde(default)]
    pub award_type: Option<String>,
    #[serde(default)]
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmissionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_description: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub innovation_score: Option<Option<u32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub feasibility_score: Option<Option<u32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub total_score: Option<Option<u32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub award_type: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubmissionStatus>,
}

impl Entity for Submission {
    type New = NewSubmission;
    type Patch = SubmissionPatch;

    const COLLECTION: Collection = Collection::Submissions;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.solution_title
    }

    fn validate_new(new: &NewSubmission) -> SharedResult<()> {
        require_text("teamId", &new.team_id)?;
        require_text("problemId", &new.problem_id)?;
        require_text("solutionTitle", &new.solution_title)?;
        require_text("solutionDescription", &new.solution_description)?;
        require_optional_text("awardType", new.award_type.as_ref())
    }

    fn validate_patch(patch: &SubmissionPatch) -> SharedResult<()> {
        require_optional_text("solutionTitle", patch.solution_title.as_ref())?;
        require_optional_text("solutionDescription", patch.solution_description.as_ref())?;
        require_nullable_text("awardType", &patch.award_type)
    }

    fn stamp_new(fields: &mut Document, now: DateTime<Utc>) {
        fields.insert("submittedAt".to_string(), serde_json::json!(now));
    }

    fn matches(&self, query: &ListQuery) -> bool {
        let status_matches = match query.status.as_deref() {
            Some(status) if !status.eq_ignore_ascii_case("all") => SubmissionStatus::parse(status) == Some(self.status),
            _ => true,
        };
        status_matches && query.matches_search(&self.solution_title)
    }
}

/// One judge's scored review of one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: String,
    pub submission_id: String,
    pub judge_id: String,
    pub innovation_score: u32,
    pub feasibility_score: u32,
    pub comments: Option<String>,
    /// Award the judge recommends, if any
    #[serde(default)]
    pub award_type: Option<String>,
    pub evaluated_at: DateTime<Utc>,
}

impl Evaluation {
    /// Unrounded total for this single review
    pub fn total_score(&self) -> f64 {
        (self.innovation_score as f64 + self.feasibility_score as f64) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvaluation {
    pub submission_id: String,
    pub judge_id: String,
    pub innovation_score: u32,
    pub feasibility_score: u32,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub award_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EvaluationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innovation_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feasibility_score: Option<u32>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub comments: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub award_type: Option<Option<String>>,
}

impl Entity for Evaluation {
    type New = NewEvaluation;
    type Patch = EvaluationPatch;

    const COLLECTION: Collection = Collection::Evaluations;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        self.comments.as_deref().unwrap_or_default()
    }

    fn validate_new(new: &NewEvaluation) -> SharedResult<()> {
        require_text("submissionId", &new.submission_id)?;
        require_text("judgeId", &new.judge_id)?;
        require_optional_text("awardType", new.award_type.as_ref())
    }

    fn validate_patch(patch: &EvaluationPatch) -> SharedResult<()> {
        require_nullable_text("awardType", &patch.award_type)
    }

    fn stamp_new(fields: &mut Document, now: DateTime<Utc>) {
        fields.insert("evaluatedAt".to_string(), serde_json::json!(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{parse_payload, to_document};

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_value(SubmissionStatus::UnderReview).unwrap(), "under review");
        let parsed: SubmissionStatus = serde_json::from_str("\"Under Review\"").unwrap();
        assert_eq!(parsed, SubmissionStatus::UnderReview);
        let parsed: SubmissionStatus = serde_json::from_str("\"Evaluated\"").unwrap();
        assert_eq!(parsed, SubmissionStatus::Evaluated);
        assert!(serde_json::from_str::<SubmissionStatus>("\"done\"").is_err());
    }

    #[test]
    fn test_status_parse_is_loose() {
        assert_eq!(SubmissionStatus::parse("EVALUATED"), Some(SubmissionStatus::Evaluated));
        assert_eq!(SubmissionStatus::parse("under_review"), Some(SubmissionStatus::UnderReview));
        assert_eq!(SubmissionStatus::parse("nope"), None);
    }

    #[test]
    fn test_new_submission_defaults() {
        let new: NewSubmission = parse_payload(
            Collection::Submissions,
            br#"{"teamId":"t","problemId":"p","solutionTitle":"S","solutionDescription":"D"}"#,
        )
        .unwrap();
        assert_eq!(new.status, SubmissionStatus::Submitted);
        assert_eq!(new.total_score, None);

        let mut doc = to_document(&new).unwrap();
        assert_eq!(doc["totalScore"], serde_json::Value::Null);
        assert_eq!(doc["status"], "submitted");

        Submission::stamp_new(&mut doc, Utc::now());
        assert!(doc.contains_key("submittedAt"));
    }

    #[test]
    fn test_patch_cannot_reparent() {
        let result: SharedResult<SubmissionPatch> = parse_payload(Collection::Submissions, br#"{"teamId":"t2"}"#);
        assert!(result.is_err());
        let result: SharedResult<SubmissionPatch> =
            parse_payload(Collection::Submissions, br#"{"submittedAt":"2024-01-01T00:00:00Z"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_null_clears_nullable_fields() {
        let patch: SubmissionPatch = parse_payload(Collection::Submissions, br#"{"awardType":null}"#).unwrap();
        assert_eq!(patch.award_type, Some(None));
        let doc = to_document(&patch).unwrap();
        assert_eq!(doc.get("awardType"), Some(&serde_json::Value::Null));
        assert_eq!(doc.len(), 1);

        let absent: SubmissionPatch = parse_payload(Collection::Submissions, br#"{"solutionTitle":"T"}"#).unwrap();
        assert_eq!(absent.award_type, None);
        assert!(!to_document(&absent).unwrap().contains_key("awardType"));

        let patch: EvaluationPatch = parse_payload(Collection::Evaluations, br#"{"comments":null}"#).unwrap();
        assert_eq!(patch.comments, Some(None));
        assert!(Evaluation::validate_patch(&patch).is_ok());

        let blank: EvaluationPatch = parse_payload(Collection::Evaluations, br#"{"awardType":"  "}"#).unwrap();
        assert!(Evaluation::validate_patch(&blank).is_err());
    }

    #[test]
    fn test_submission_status_filter() {
        let submission = Submission {
            id: "s1".to_string(),
            team_id: "t1".to_string(),
            problem_id: "p1".to_string(),
            solution_title: "AI-Powered Route Optimizer".to_string(),
            solution_description: "d".to_string(),
            innovation_score: None,
            feasibility_score: None,
            total_score: None,
            award_type: None,
            status: SubmissionStatus::UnderReview,
            submitted_at: Utc::now(),
        };
        let query = ListQuery {
            status: Some("Under Review".to_string()),
            search: Some("route".to_string()),
            ..Default::default()
        };
        assert!(submission.matches(&query));

        let query = ListQuery {
            status: Some("evaluated".to_string()),
            ..Default::default()
        };
        assert!(!submission.matches(&query));
    }

    #[test]
    fn test_evaluation_total_is_mean_of_components() {
        let evaluation = Evaluation {
            id: "e1".to_string(),
            submission_id: "s1".to_string(),
            judge_id: "j1".to_string(),
            innovation_score: 85,
            feasibility_score: 78,
            comments: None,
            award_type: None,
            evaluated_at: Utc::now(),
        };
        assert_eq!(evaluation.total_score(), 81.5);
    }
}
