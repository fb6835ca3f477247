//! Analytics engine for hackathon reporting
//!
//! Pure business logic: every operation reduces an already-fetched
//! `Snapshot` with no I/O. A submission that points at a deleted team,
//! problem or company is still reported, with `UNKNOWN` in place of the
//! missing name.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{Difficulty, Evaluation, SubmissionStatus};
use std::collections::{HashMap, HashSet};

use super::snapshot::Snapshot;

/// Placeholder label for a reference whose target no longer exists
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSubmissionCount {
    pub team_id: String,
    pub team_name: String,
    pub submission_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPopularity {
    pub company_id: String,
    pub company_name: String,
    /// Distinct teams that submitted to any of the company's problems
    pub team_count: usize,
    pub problem_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeActivity {
    pub judge_id: String,
    pub judge_name: String,
    pub evaluation_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationWinner {
    pub submission_id: String,
    pub team_name: String,
    pub solution_title: String,
    pub award_type: String,
    pub total_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInnovation {
    pub company_id: String,
    pub company_name: String,
    pub avg_innovation: u32,
    pub scored_submissions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub team_id: String,
    pub team_name: String,
    pub average_score: u32,
    pub submission_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnattemptedProblem {
    pub problem_id: String,
    pub problem_title: String,
    pub company_name: String,
    pub category: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardDistribution {
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
    pub collaboration: usize,
}

/// Averaged view of every evaluation written for one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRollup {
    pub submission_id: String,
    pub innovation_score: Option<u32>,
    pub feasibility_score: Option<u32>,
    pub total_score: Option<u32>,
    pub award_type: Option<String>,
    pub judge_count: usize,
}

impl EvaluationRollup {
    /// Roll up the evaluations belonging to `submission_id`; others are skipped
    pub fn compute<'a>(submission_id: &str, evaluations: impl IntoIterator<Item = &'a Evaluation>) -> Self {
        let mine: Vec<&Evaluation> = evaluations
            .into_iter()
            .filter(|evaluation| evaluation.submission_id == submission_id)
            .collect();

        if mine.is_empty() {
            return Self {
                submission_id: submission_id.to_string(),
                innovation_score: None,
                feasibility_score: None,
                total_score: None,
                award_type: None,
                judge_count: 0,
            };
        }

        let count = mine.len();
        let innovation: f64 = mine.iter().map(|e| e.innovation_score as f64).sum();
        let feasibility: f64 = mine.iter().map(|e| e.feasibility_score as f64).sum();
        let total: f64 = mine.iter().map(|e| e.total_score()).sum();

        Self {
            submission_id: submission_id.to_string(),
            innovation_score: Some(rounded_mean(innovation, count)),
            feasibility_score: Some(rounded_mean(feasibility, count)),
            total_score: Some(rounded_mean(total, count)),
            award_type: mine.iter().find_map(|e| e.award_type.clone()),
            judge_count: count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_teams: usize,
    pub total_companies: usize,
    pub total_problems: usize,
    pub total_submissions: usize,
    pub total_judges: usize,
    pub evaluated_submissions: usize,
    pub pending_submissions: usize,
    pub average_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubmission {
    pub id: String,
    pub solution_title: String,
    pub team_name: String,
    pub problem_title: String,
    pub innovation_score: Option<u32>,
    pub feasibility_score: Option<u32>,
    pub total_score: Option<u32>,
    pub award_type: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    pub judge_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: String,
    pub team_name: String,
    pub member_count: u32,
    pub contact_email: String,
    pub submission_count: usize,
    pub average_score: Option<u32>,
    pub award_type: Option<String>,
}

/// Every view in one response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub stats: DashboardStats,
    pub team_submission_counts: Vec<TeamSubmissionCount>,
    pub company_popularity: Vec<CompanyPopularity>,
    pub judge_activity: Vec<JudgeActivity>,
    pub collaboration_winners: Vec<CollaborationWinner>,
    pub company_innovation: Vec<CompanyInnovation>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub unattempted_problems: Vec<UnattemptedProblem>,
    pub award_distribution: AwardDistribution,
    pub recent_submissions: Vec<RecentSubmission>,
    pub team_summaries: Vec<TeamSummary>,
    pub generated_at: DateTime<Utc>,
}

/// Analytics engine over hackathon snapshots
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    /// Length of the leaderboard, judge and innovation rankings
    top_n: usize,

    /// Teams below this many submissions are left out of the count view
    min_team_submissions: usize,

    /// Number of submissions in the recent feed
    recent_limit: usize,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self {
            top_n: 3,
            min_team_submissions: 2,
            recent_limit: 5,
        }
    }

    /// Create with custom configuration
    pub fn with_config(top_n: usize, min_team_submissions: usize, recent_limit: usize) -> Self {
        Self {
            top_n,
            min_team_submissions,
            recent_limit,
        }
    }

    /// Teams with at least `min_team_submissions` submissions, busiest first
    pub fn team_submission_counts(&self, snapshot: &Snapshot) -> Vec<TeamSubmissionCount> {
        let counts = count_by(snapshot.submissions.iter().map(|s| s.team_id.as_str()));

        let mut rows: Vec<TeamSubmissionCount> = snapshot
            .teams
            .iter()
            .map(|team| TeamSubmissionCount {
                team_id: team.id.clone(),
                team_name: team.team_name.clone(),
                submission_count: counts.get(team.id.as_str()).copied().unwrap_or(0),
            })
            .filter(|row| row.submission_count >= self.min_team_submissions)
            .collect();

        rows.sort_by(|a, b| b.submission_count.cmp(&a.submission_count));
        rows
    }

    /// Companies ranked by how many distinct teams took on their problems
    pub fn company_popularity(&self, snapshot: &Snapshot) -> Vec<CompanyPopularity> {
        let owners = problem_owners(snapshot);
        let problem_counts = count_by(snapshot.problems.iter().map(|p| p.company_id.as_str()));

        let mut teams_by_company: HashMap<&str, HashSet<&str>> = HashMap::new();
        for submission in &snapshot.submissions {
            if let Some(company_id) = owners.get(submission.problem_id.as_str()) {
                teams_by_company
                    .entry(*company_id)
                    .or_default()
                    .insert(submission.team_id.as_str());
            }
        }

        let mut rows: Vec<CompanyPopularity> = snapshot
            .companies
            .iter()
            .map(|company| CompanyPopularity {
                company_id: company.id.clone(),
                company_name: company.company_name.clone(),
                team_count: teams_by_company.get(company.id.as_str()).map_or(0, HashSet::len),
                problem_count: problem_counts.get(company.id.as_str()).copied().unwrap_or(0),
            })
            .collect();

        rows.sort_by(|a, b| b.team_count.cmp(&a.team_count));
        rows
    }

    /// Most active judges; judges with no evaluations are left out
    pub fn judge_activity(&self, snapshot: &Snapshot) -> Vec<JudgeActivity> {
        let counts = count_by(snapshot.evaluations.iter().map(|e| e.judge_id.as_str()));

        let mut rows: Vec<JudgeActivity> = snapshot
            .judges
            .iter()
            .filter_map(|judge| {
                let evaluation_count = counts.get(judge.id.as_str()).copied().unwrap_or(0);
                (evaluation_count > 0).then(|| JudgeActivity {
                    judge_id: judge.id.clone(),
                    judge_name: judge.judge_name.clone(),
                    evaluation_count,
                })
            })
            .collect();

        rows.sort_by(|a, b| b.evaluation_count.cmp(&a.evaluation_count));
        rows.truncate(self.top_n);
        rows
    }

    /// Submissions holding any collaboration award, highest score first
    pub fn collaboration_winners(&self, snapshot: &Snapshot) -> Vec<CollaborationWinner> {
        let team_names = team_names(snapshot);

        let mut rows: Vec<CollaborationWinner> = snapshot
            .submissions
            .iter()
            .filter_map(|submission| {
                let award = submission.award_type.as_deref()?;
                is_collaboration(award).then(|| CollaborationWinner {
                    submission_id: submission.id.clone(),
                    team_name: lookup(&team_names, &submission.team_id),
                    solution_title: submission.solution_title.clone(),
                    award_type: award.to_string(),
                    total_score: submission.total_score.unwrap_or(0),
                })
            })
            .collect();

        rows.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        rows
    }

    /// Mean innovation score per company over its scored submissions
    pub fn company_innovation(&self, snapshot: &Snapshot) -> Vec<CompanyInnovation> {
        let owners = problem_owners(snapshot);

        let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
        for submission in &snapshot.submissions {
            let Some(score) = submission.innovation_score.filter(|score| *score > 0) else {
                continue;
            };
            if let Some(company_id) = owners.get(submission.problem_id.as_str()) {
                let entry = sums.entry(*company_id).or_insert((0.0, 0));
                entry.0 += score as f64;
                entry.1 += 1;
            }
        }

        let mut rows: Vec<CompanyInnovation> = snapshot
            .companies
            .iter()
            .filter_map(|company| {
                let (sum, count) = sums.get(company.id.as_str()).copied()?;
                Some(CompanyInnovation {
                    company_id: company.id.clone(),
                    company_name: company.company_name.clone(),
                    avg_innovation: rounded_mean(sum, count),
                    scored_submissions: count,
                })
            })
            .collect();

        rows.sort_by(|a, b| b.avg_innovation.cmp(&a.avg_innovation));
        rows.truncate(self.top_n);
        rows
    }

    /// Top teams by mean total score
    ///
    /// Unscored submissions count as zero but still count toward the mean.
    /// Ties keep team insertion order and ranks follow position.
    pub fn team_leaderboard(&self, snapshot: &Snapshot) -> Vec<LeaderboardEntry> {
        let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
        for submission in &snapshot.submissions {
            let entry = totals.entry(submission.team_id.as_str()).or_insert((0.0, 0));
            entry.0 += submission.total_score.unwrap_or(0) as f64;
            entry.1 += 1;
        }

        // Zero is judged on the rounded average the board reports
        let mut ranked: Vec<(&shared::Team, f64, usize)> = snapshot
            .teams
            .iter()
            .filter_map(|team| {
                let (sum, count) = totals.get(team.id.as_str()).copied()?;
                let mean = sum / count as f64;
                (mean.round() > 0.0).then_some((team, mean, count))
            })
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(self.top_n);

        ranked
            .into_iter()
            .enumerate()
            .map(|(position, (team, mean, count))| LeaderboardEntry {
                rank: position + 1,
                team_id: team.id.clone(),
                team_name: team.team_name.clone(),
                average_score: mean.round() as u32,
                submission_count: count,
            })
            .collect()
    }

    /// Problems nobody has submitted to yet
    pub fn unattempted_problems(&self, snapshot: &Snapshot) -> Vec<UnattemptedProblem> {
        let attempted: HashSet<&str> = snapshot.submissions.iter().map(|s| s.problem_id.as_str()).collect();
        let company_names: HashMap<&str, &str> = snapshot
            .companies
            .iter()
            .map(|c| (c.id.as_str(), c.company_name.as_str()))
            .collect();

        snapshot
            .problems
            .iter()
            .filter(|problem| !attempted.contains(problem.id.as_str()))
            .map(|problem| UnattemptedProblem {
                problem_id: problem.id.clone(),
                problem_title: problem.problem_title.clone(),
                company_name: lookup(&company_names, &problem.company_id),
                category: problem.category.clone(),
                difficulty: problem.difficulty,
            })
            .collect()
    }

    /// Award counts; gold/silver/bronze match exactly, collaboration by substring
    pub fn award_distribution(&self, snapshot: &Snapshot) -> AwardDistribution {
        let mut distribution = AwardDistribution::default();
        for award in snapshot.submissions.iter().filter_map(|s| s.award_type.as_deref()) {
            match award.trim().to_lowercase().as_str() {
                "gold" => distribution.gold += 1,
                "silver" => distribution.silver += 1,
                "bronze" => distribution.bronze += 1,
                other if other.contains("collaboration") => distribution.collaboration += 1,
                _ => {}
            }
        }
        distribution
    }

    pub fn evaluation_rollup(&self, submission_id: &str, evaluations: &[Evaluation]) -> EvaluationRollup {
        EvaluationRollup::compute(submission_id, evaluations)
    }

    pub fn dashboard_stats(&self, snapshot: &Snapshot) -> DashboardStats {
        let scored: Vec<u32> = snapshot.submissions.iter().filter_map(|s| s.total_score).collect();
        let sum: f64 = scored.iter().map(|score| *score as f64).sum();

        DashboardStats {
            total_teams: snapshot.teams.len(),
            total_companies: snapshot.companies.len(),
            total_problems: snapshot.problems.len(),
            total_submissions: snapshot.submissions.len(),
            total_judges: snapshot.judges.len(),
            evaluated_submissions: scored.len(),
            pending_submissions: snapshot.submissions.len() - scored.len(),
            average_score: rounded_mean(sum, scored.len()),
        }
    }

    /// Newest submissions first, joined with team and problem names
    pub fn recent_submissions(&self, snapshot: &Snapshot) -> Vec<RecentSubmission> {
        let team_names = team_names(snapshot);
        let problem_titles: HashMap<&str, &str> = snapshot
            .problems
            .iter()
            .map(|p| (p.id.as_str(), p.problem_title.as_str()))
            .collect();

        let mut newest: Vec<&shared::Submission> = snapshot.submissions.iter().collect();
        newest.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        newest.truncate(self.recent_limit);

        newest
            .into_iter()
            .map(|submission| {
                let rollup = EvaluationRollup::compute(&submission.id, &snapshot.evaluations);
                let (innovation_score, feasibility_score, total_score, award_type) = if rollup.judge_count > 0 {
                    (
                        rollup.innovation_score,
                        rollup.feasibility_score,
                        rollup.total_score,
                        rollup.award_type.or_else(|| submission.award_type.clone()),
                    )
                } else {
                    (
                        submission.innovation_score,
                        submission.feasibility_score,
                        submission.total_score,
                        submission.award_type.clone(),
                    )
                };

                RecentSubmission {
                    id: submission.id.clone(),
                    solution_title: submission.solution_title.clone(),
                    team_name: lookup(&team_names, &submission.team_id),
                    problem_title: lookup(&problem_titles, &submission.problem_id),
                    innovation_score,
                    feasibility_score,
                    total_score,
                    award_type,
                    status: submission.status,
                    submitted_at: submission.submitted_at,
                    judge_count: rollup.judge_count,
                }
            })
            .collect()
    }

    /// Per-team cards in team insertion order
    pub fn team_summaries(&self, snapshot: &Snapshot) -> Vec<TeamSummary> {
        snapshot
            .teams
            .iter()
            .map(|team| {
                let submissions: Vec<&shared::Submission> = snapshot
                    .submissions
                    .iter()
                    .filter(|s| s.team_id == team.id)
                    .collect();
                let scored: Vec<u32> = submissions.iter().filter_map(|s| s.total_score).collect();
                let sum: f64 = scored.iter().map(|score| *score as f64).sum();
                let best_award = submissions
                    .iter()
                    .filter_map(|s| s.award_type.as_deref())
                    .min_by_key(|award| award_rank(award))
                    .map(str::to_string);

                TeamSummary {
                    id: team.id.clone(),
                    team_name: team.team_name.clone(),
                    member_count: team.member_count,
                    contact_email: team.contact_email.clone(),
                    submission_count: submissions.len(),
                    average_score: (!scored.is_empty()).then(|| rounded_mean(sum, scored.len())),
                    award_type: best_award,
                }
            })
            .collect()
    }

    pub fn report(&self, snapshot: &Snapshot) -> AnalyticsReport {
        AnalyticsReport {
            stats: self.dashboard_stats(snapshot),
            team_submission_counts: self.team_submission_counts(snapshot),
            company_popularity: self.company_popularity(snapshot),
            judge_activity: self.judge_activity(snapshot),
            collaboration_winners: self.collaboration_winners(snapshot),
            company_innovation: self.company_innovation(snapshot),
            leaderboard: self.team_leaderboard(snapshot),
            unattempted_problems: self.unattempted_problems(snapshot),
            award_distribution: self.award_distribution(snapshot),
            recent_submissions: self.recent_submissions(snapshot),
            team_summaries: self.team_summaries(snapshot),
            generated_at: Utc::now(),
        }
    }
}

/// Arithmetic mean rounded half away from zero; 0 for an empty set
fn rounded_mean(sum: f64, count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    (sum / count as f64).round() as u32
}

fn count_by<'a>(keys: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

fn problem_owners(snapshot: &Snapshot) -> HashMap<&str, &str> {
    snapshot
        .problems
        .iter()
        .map(|p| (p.id.as_str(), p.company_id.as_str()))
        .collect()
}

fn team_names(snapshot: &Snapshot) -> HashMap<&str, &str> {
    snapshot
        .teams
        .iter()
        .map(|t| (t.id.as_str(), t.team_name.as_str()))
        .collect()
}

fn lookup(names: &HashMap<&str, &str>, id: &str) -> String {
    names.get(id).copied().unwrap_or(UNKNOWN).to_string()
}

fn is_collaboration(award: &str) -> bool {
    award.to_lowercase().contains("collaboration")
}

/// Lower is better: gold, silver, bronze, collaboration, then anything else
fn award_rank(award: &str) -> u8 {
    match award.trim().to_lowercase().as_str() {
        "gold" => 0,
        "silver" => 1,
        "bronze" => 2,
        other if other.contains("collaboration") => 3,
        _ => 4,
    }
}
