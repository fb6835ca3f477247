//! Typed repository over the entity store
//!
//! Every write from the HTTP layer goes through here. The repository owns
//! the rules the raw store does not know about: payload validation, foreign
//! key existence on create, unique keys, and keeping the submission score
//! cache in step with its evaluations.

use chrono::Utc;
use serde_json::{Value, json};
use shared::{
    Collection, Company, Document, Entity, Evaluation, Judge, ListQuery, Problem, Submission, SubmissionStatus, Team,
    component_debug, component_info, from_document, to_document,
};
use std::sync::Arc;

use super::documents::record_id;
use crate::core::{EvaluationRollup, Snapshot};
use crate::error::{WebServerError, WebServerResult};
use crate::traits::EntityStore;

/// Submission fields owned by the evaluation rollup once evaluations exist
const SCORE_FIELDS: [&str; 3] = ["innovationScore", "feasibilityScore", "totalScore"];

/// Stored-only submission flag: the current `awardType` was written by the rollup
const AWARD_FROM_EVALUATIONS: &str = "awardFromEvaluations";

#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn EntityStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub async fn create<E: Entity>(&self, new: E::New) -> WebServerResult<E> {
        E::validate_new(&new)?;
        let mut fields = to_document(&new)?;

        self.check_references(E::COLLECTION, &fields).await?;
        self.check_unique(E::COLLECTION, &fields, None).await?;
        E::stamp_new(&mut fields, Utc::now());

        let record = self.store.create(E::COLLECTION, fields).await?;
        let evaluated = evaluated_submission::<E>(&record);
        let created: E = decode(record)?;
        component_info!(
            shared::Component::Repository,
            collection = %E::COLLECTION,
            id = created.id(),
            "➕ Created {}",
            E::COLLECTION.singular()
        );

        if let Some(submission_id) = evaluated {
            self.refresh_submission_scores(&submission_id).await?;
        }
        Ok(created)
    }

    pub async fn get<E: Entity>(&self, id: &str) -> WebServerResult<E> {
        match self.store.get(E::COLLECTION, id).await? {
            Some(record) => decode(record),
            None => Err(WebServerError::not_found(E::COLLECTION, id)),
        }
    }

    pub async fn list<E: Entity>(&self, query: &ListQuery) -> WebServerResult<Vec<E>> {
        let records = self.all::<E>().await?;
        Ok(records.into_iter().filter(|record| record.matches(query)).collect())
    }

    /// Records whose foreign key `field` points at `value`
    pub async fn list_by<E: Entity>(&self, field: &str, value: &str) -> WebServerResult<Vec<E>> {
        self.store
            .list_by(E::COLLECTION, field, value)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn update<E: Entity>(&self, id: &str, patch: E::Patch) -> WebServerResult<E> {
        E::validate_patch(&patch)?;
        let mut partial = to_document(&patch)?;

        if E::COLLECTION == Collection::Submissions {
            if touches_scores(&partial) {
                self.ensure_scores_writable(id).await?;
            }
            if partial.contains_key("awardType") {
                partial.insert(AWARD_FROM_EVALUATIONS.to_string(), Value::Bool(false));
            }
        }
        self.check_unique(E::COLLECTION, &partial, Some(id)).await?;

        let record = self
            .store
            .update(E::COLLECTION, id, partial)
            .await?
            .ok_or_else(|| WebServerError::not_found(E::COLLECTION, id))?;
        let evaluated = evaluated_submission::<E>(&record);
        let updated: E = decode(record)?;

        if let Some(submission_id) = evaluated {
            self.refresh_submission_scores(&submission_id).await?;
        }
        Ok(updated)
    }

    /// Delete one record; dependents are left in place
    pub async fn delete<E: Entity>(&self, id: &str) -> WebServerResult<()> {
        let existing = self
            .store
            .get(E::COLLECTION, id)
            .await?
            .ok_or_else(|| WebServerError::not_found(E::COLLECTION, id))?;

        if !self.store.delete(E::COLLECTION, id).await? {
            return Err(WebServerError::not_found(E::COLLECTION, id));
        }
        component_info!(
            shared::Component::Repository,
            collection = %E::COLLECTION,
            id,
            "🗑️ Deleted {}",
            E::COLLECTION.singular()
        );

        if let Some(submission_id) = evaluated_submission::<E>(&existing) {
            self.refresh_submission_scores(&submission_id).await?;
        }
        Ok(())
    }

    /// Read all six collections for one report
    pub async fn snapshot(&self) -> WebServerResult<Snapshot> {
        Ok(Snapshot {
            teams: self.all::<Team>().await?,
            companies: self.all::<Company>().await?,
            problems: self.all::<Problem>().await?,
            judges: self.all::<Judge>().await?,
            submissions: self.all::<Submission>().await?,
            evaluations: self.all::<Evaluation>().await?,
        })
    }

    /// Rollup for one existing submission
    pub async fn rollup(&self, submission_id: &str) -> WebServerResult<EvaluationRollup> {
        self.get::<Submission>(submission_id).await?;
        let evaluations: Vec<Evaluation> = self.list_by("submissionId", submission_id).await?;
        Ok(EvaluationRollup::compute(submission_id, &evaluations))
    }

    /// Recompute a submission's cached scores from its evaluations
    ///
    /// With no evaluations left the cache is cleared and the submission goes
    /// back to `submitted`. An award the rollup wrote earlier is cleared once
    /// no evaluation carries one; an award set directly is kept. A missing
    /// submission is skipped.
    pub async fn refresh_submission_scores(&self, submission_id: &str) -> WebServerResult<()> {
        let evaluations: Vec<Evaluation> = self.list_by("submissionId", submission_id).await?;
        let rollup = EvaluationRollup::compute(submission_id, &evaluations);

        let mut partial = Document::new();
        partial.insert("innovationScore".to_string(), json!(rollup.innovation_score));
        partial.insert("feasibilityScore".to_string(), json!(rollup.feasibility_score));
        partial.insert("totalScore".to_string(), json!(rollup.total_score));
        let status = if rollup.judge_count > 0 {
            SubmissionStatus::Evaluated
        } else {
            SubmissionStatus::Submitted
        };
        partial.insert("status".to_string(), json!(status));
        if let Some(award) = &rollup.award_type {
            partial.insert("awardType".to_string(), json!(award));
            partial.insert(AWARD_FROM_EVALUATIONS.to_string(), Value::Bool(true));
        } else if self.award_from_evaluations(submission_id).await? {
            partial.insert("awardType".to_string(), Value::Null);
            partial.insert(AWARD_FROM_EVALUATIONS.to_string(), Value::Bool(false));
        }

        match self.store.update(Collection::Submissions, submission_id, partial).await? {
            Some(_) => component_debug!(
                shared::Component::Repository,
                submission_id,
                judges = rollup.judge_count,
                total = ?rollup.total_score,
                "🔄 Refreshed submission scores"
            ),
            None => component_debug!(
                shared::Component::Repository,
                submission_id,
                "Skipped score refresh for missing submission"
            ),
        }
        Ok(())
    }

    async fn all<E: Entity>(&self) -> WebServerResult<Vec<E>> {
        self.store
            .list(E::COLLECTION)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    async fn award_from_evaluations(&self, submission_id: &str) -> WebServerResult<bool> {
        let submission = self.store.get(Collection::Submissions, submission_id).await?;
        Ok(submission
            .and_then(|document| document.get(AWARD_FROM_EVALUATIONS).and_then(Value::as_bool))
            .unwrap_or(false))
    }

    async fn check_references(&self, collection: Collection, fields: &Document) -> WebServerResult<()> {
        for (field, target) in collection.references() {
            let Some(id) = fields.get(*field).and_then(Value::as_str) else {
                continue;
            };
            if self.store.get(*target, id).await?.is_none() {
                return Err(WebServerError::DanglingReference {
                    field: field.to_string(),
                    collection: *target,
                    id: id.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Reject `fields` when another record already holds the same unique key
    ///
    /// Key sets the payload does not fully cover are skipped, so partial
    /// updates only check the keys they write.
    async fn check_unique(&self, collection: Collection, fields: &Document, exclude_id: Option<&str>) -> WebServerResult<()> {
        for key in collection.unique_keys() {
            let values: Option<Vec<&Value>> = key.iter().map(|field| fields.get(*field)).collect();
            let Some(values) = values else {
                continue;
            };
            let Some(first) = values[0].as_str() else {
                continue;
            };

            let candidates = self.store.list_by(collection, key[0], first).await?;
            let clash = candidates.iter().any(|record| {
                record_id(record) != exclude_id
                    && key
                        .iter()
                        .zip(&values)
                        .all(|(field, value)| record.get(*field) == Some(*value))
            });

            if clash {
                return Err(WebServerError::Duplicate {
                    collection,
                    fields: key.join(", "),
                    value: values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "),
                });
            }
        }
        Ok(())
    }

    async fn ensure_scores_writable(&self, submission_id: &str) -> WebServerResult<()> {
        let evaluations = self
            .store
            .list_by(Collection::Evaluations, "submissionId", submission_id)
            .await?;
        if !evaluations.is_empty() {
            return Err(WebServerError::invalid(
                "Scores of an evaluated submission are derived from its evaluations",
            ));
        }
        Ok(())
    }
}

fn decode<E: Entity>(document: Document) -> WebServerResult<E> {
    from_document(document).map_err(|e| WebServerError::store(e.to_string()))
}

/// Submission whose score cache depends on this evaluation record
fn evaluated_submission<E: Entity>(record: &Document) -> Option<String> {
    if E::COLLECTION != Collection::Evaluations {
        return None;
    }
    record.get("submissionId").and_then(Value::as_str).map(str::to_string)
}

fn touches_scores(partial: &Document) -> bool {
    SCORE_FIELDS.iter().any(|field| partial.contains_key(*field))
}
