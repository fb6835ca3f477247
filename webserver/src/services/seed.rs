//! Demo dataset for a fresh store

use shared::{
    Company, Difficulty, Evaluation, Judge, ListQuery, NewCompany, NewEvaluation, NewJudge, NewProblem,
    NewSubmission, NewTeam, Problem, Submission, SubmissionStatus, Team, component_info,
};

use super::Repository;
use crate::error::WebServerResult;

/// Load the demo dataset unless the store already holds teams
///
/// Returns whether anything was written.
pub async fn seed_demo_data(repository: &Repository) -> WebServerResult<bool> {
    if !repository.list::<Team>(&ListQuery::default()).await?.is_empty() {
        component_info!(shared::Component::Repository, "🌱 Store already has data, skipping seed");
        return Ok(false);
    }

    let mut teams = Vec::new();
    for (name, members, email) in [
        ("Smart Transit Innovators", 5, "team@smarttransit.com"),
        ("EcoCity Solutions", 4, "contact@ecocity.io"),
        ("Urban Safety Network", 6, "team@urbansafety.net"),
        ("Traffic Flow Optimizers", 4, "hello@trafficflow.dev"),
    ] {
        let team: Team = repository
            .create::<Team>(NewTeam {
                team_name: name.to_string(),
                member_count: members,
                contact_email: email.to_string(),
            })
            .await?;
        teams.push(team);
    }

    let mut companies = Vec::new();
    for (name, industry, contact) in [
        ("City Transit Authority", "Transportation", "Sarah Johnson"),
        ("Urban Waste Management", "Environmental", "Mike Chen"),
        ("Metro Police Department", "Public Safety", "David Rodriguez"),
        ("Smart Energy Grid Co", "Energy", "Lisa Park"),
    ] {
        let company: Company = repository
            .create::<Company>(NewCompany {
                company_name: name.to_string(),
                industry: industry.to_string(),
                contact_person: contact.to_string(),
            })
            .await?;
        companies.push(company);
    }

    let mut problems = Vec::new();
    for (title, company, category, difficulty, description) in [
        (
            "Real-time Traffic Flow Analysis",
            0,
            "Traffic Control",
            Difficulty::Hard,
            "Predict congestion from live sensor feeds and adjust signal timing",
        ),
        (
            "Smart Waste Collection Optimization",
            1,
            "Waste Management",
            Difficulty::Medium,
            "Plan collection routes from bin fill-level telemetry",
        ),
        (
            "Emergency Response Coordination",
            2,
            "Public Safety",
            Difficulty::Hard,
            "Route the nearest available unit across agencies",
        ),
        (
            "Energy Grid Load Balancing",
            3,
            "Energy",
            Difficulty::Medium,
            "Shift flexible demand away from peak hours",
        ),
    ] {
        let problem: Problem = repository
            .create::<Problem>(NewProblem {
                problem_title: title.to_string(),
                company_id: companies[company].id.clone(),
                category: category.to_string(),
                difficulty,
                description: description.to_string(),
            })
            .await?;
        problems.push(problem);
    }

    let mut judges = Vec::new();
    for (name, expertise, organization) in [
        ("Dr. Emily Carter", "AI & Machine Learning", "Tech University"),
        ("Prof. James Liu", "Urban Planning", "City Planning Institute"),
        ("Maria Santos", "Environmental Engineering", "Green Solutions Corp"),
    ] {
        let judge: Judge = repository
            .create::<Judge>(NewJudge {
                judge_name: name.to_string(),
                expertise: expertise.to_string(),
                organization: organization.to_string(),
            })
            .await?;
        judges.push(judge);
    }

    let mut submissions = Vec::new();
    for (team, problem, title, description) in [
        (
            0,
            1,
            "AI-Powered Route Optimizer",
            "Machine learning route planner for collection trucks",
        ),
        (
            1,
            0,
            "Traffic Signal Intelligence",
            "Adaptive signal timing from camera counts",
        ),
        (
            2,
            2,
            "Unified Emergency Platform",
            "Shared dispatch board for police, fire and ambulance",
        ),
        (
            0,
            0,
            "Transit Pulse",
            "Crowd-sourced congestion map for bus drivers",
        ),
    ] {
        let submission: Submission = repository
            .create::<Submission>(NewSubmission {
                team_id: teams[team].id.clone(),
                problem_id: problems[problem].id.clone(),
                solution_title: title.to_string(),
                solution_description: description.to_string(),
                innovation_score: None,
                feasibility_score: None,
                total_score: None,
                award_type: None,
                status: SubmissionStatus::Submitted,
            })
            .await?;
        submissions.push(submission);
    }

    for (submission, judge, innovation, feasibility, comments, award) in [
        (0, 0, 85, 78, "Strong model, needs field data", Some("Gold")),
        (0, 1, 88, 80, "Clear rollout plan", None),
        (1, 2, 80, 76, "Solid engineering", Some("Collaboration Offer")),
        (2, 0, 72, 84, "Very practical", Some("Silver")),
    ] {
        repository
            .create::<Evaluation>(NewEvaluation {
                submission_id: submissions[submission].id.clone(),
                judge_id: judges[judge].id.clone(),
                innovation_score: innovation,
                feasibility_score: feasibility,
                comments: Some(comments.to_string()),
                award_type: award.map(str::to_string),
            })
            .await?;
    }

    component_info!(
        shared::Component::Repository,
        teams = teams.len(),
        companies = companies.len(),
        problems = problems.len(),
        submissions = submissions.len(),
        "🌱 Seeded demo data"
    );
    Ok(true)
}
