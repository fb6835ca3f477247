//! Test helpers for webserver service tests

use shared::{Company, Judge, Problem, Submission, Team};
use std::sync::Arc;

use super::fixtures::{new_company, new_judge, new_problem, new_submission, new_team};
use crate::services::{MemoryStore, Repository};

/// Repository over a fresh in-memory store
pub fn memory_repository() -> Repository {
    Repository::new(Arc::new(MemoryStore::new()))
}

/// One team, company, problem, judge and submission wired together
pub struct World {
    pub team: Team,
    pub company: Company,
    pub problem: Problem,
    pub judge: Judge,
    pub submission: Submission,
}

pub async fn build_world(repository: &Repository) -> World {
    let team: Team = repository.create::<Team>(new_team("Smart Transit Innovators")).await.unwrap();
    let company: Company = repository.create::<Company>(new_company("City Transit Authority")).await.unwrap();
    let problem: Problem = repository.create::<Problem>(new_problem(&company.id)).await.unwrap();
    let judge: Judge = repository.create::<Judge>(new_judge("Dr. Emily Carter")).await.unwrap();
    let submission: Submission = repository
        .create::<Submission>(new_submission(&team.id, &problem.id))
        .await
        .unwrap();

    World {
        team,
        company,
        problem,
        judge,
        submission,
    }
}

/// Behaviour every `EntityStore` backend must share
pub async fn exercise_store_contract(store: &dyn crate::traits::EntityStore) {
    use super::fixtures::{doc, team_fields};
    use serde_json::json;
    use shared::Collection;

    let created = store.create(Collection::Teams, team_fields("Alpha")).await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["teamName"], "Alpha");

    let fetched = store.get(Collection::Teams, &id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert!(store.get(Collection::Judges, &id).await.unwrap().is_none());

    store.create(Collection::Teams, team_fields("Beta")).await.unwrap();
    let names: Vec<_> = store
        .list(Collection::Teams)
        .await
        .unwrap()
        .iter()
        .map(|record| record["teamName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);

    let merged = store
        .update(Collection::Teams, &id, doc(json!({"memberCount": 6, "id": "hijack"})))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(merged["id"], id.as_str());
    assert_eq!(merged["memberCount"], 6);
    assert_eq!(merged["teamName"], "Alpha");
    assert!(store.update(Collection::Teams, "missing", doc(json!({}))).await.unwrap().is_none());

    store
        .create(Collection::Submissions, doc(json!({"teamId": id, "solutionTitle": "S1"})))
        .await
        .unwrap();
    store
        .create(Collection::Submissions, doc(json!({"teamId": "other", "solutionTitle": "S2"})))
        .await
        .unwrap();
    let by_team = store.list_by(Collection::Submissions, "teamId", &id).await.unwrap();
    assert_eq!(by_team.len(), 1);
    assert_eq!(by_team[0]["solutionTitle"], "S1");

    assert!(store.delete(Collection::Teams, &id).await.unwrap());
    assert!(!store.delete(Collection::Teams, &id).await.unwrap());
    assert!(store.get(Collection::Teams, &id).await.unwrap().is_none());
    assert_eq!(store.list(Collection::Teams).await.unwrap().len(), 1);
}
