//! Display-ready shapes for the dashboard and analytics pages
//!
//! Turns analytics output into data a client can render directly: score
//! tiers, bar widths, chart slices and pluralised labels. No markup is
//! produced here.

use serde::{Deserialize, Serialize};

use super::analytics::{
    AnalyticsReport, AwardDistribution, CompanyPopularity, DashboardStats, LeaderboardEntry, RecentSubmission,
};

/// Score cut-offs for the tier colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreThresholds {
    /// Scores at or above this are `good`
    pub good: u32,
    /// Scores at or above this (and below `good`) are `warning`
    pub warning: u32,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self { good: 80, warning: 60 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Good,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardSlice {
    pub name: &'static str,
    pub value: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    pub tier: ScoreTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionCard {
    #[serde(flatten)]
    pub submission: RecentSubmission,
    /// Absent until the submission has a total score
    pub tier: Option<ScoreTier>,
    pub judge_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityBar {
    #[serde(flatten)]
    pub company: CompanyPopularity,
    /// Percentage of the most popular company's team count
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub stat_cards: Vec<StatCard>,
    pub leaderboard: Vec<LeaderboardRow>,
    pub recent_submissions: Vec<SubmissionCard>,
    pub award_chart: Vec<AwardSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    #[serde(flatten)]
    pub report: AnalyticsReport,
    pub award_chart: Vec<AwardSlice>,
    pub popularity_bars: Vec<PopularityBar>,
}

/// Maps analytics output onto display shapes
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    thresholds: ScoreThresholds,
}

impl Presenter {
    pub fn new(thresholds: ScoreThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> ScoreThresholds {
        self.thresholds
    }

    pub fn score_tier(&self, score: u32) -> ScoreTier {
        if score >= self.thresholds.good {
            ScoreTier::Good
        } else if score >= self.thresholds.warning {
            ScoreTier::Warning
        } else {
            ScoreTier::Critical
        }
    }

    /// `value` as a percentage of `max`, clamped to 0..=100 with one decimal
    pub fn bar_width(value: usize, max: usize) -> f64 {
        if max == 0 {
            return 0.0;
        }
        let percent = (value as f64 / max as f64 * 100.0).clamp(0.0, 100.0);
        (percent * 10.0).round() / 10.0
    }

    pub fn pluralize(count: usize, noun: &str) -> String {
        if count == 1 {
            format!("{count} {noun}")
        } else {
            format!("{count} {noun}s")
        }
    }

    /// Chart slices in fixed order; empty buckets are omitted
    pub fn award_slices(distribution: &AwardDistribution) -> Vec<AwardSlice> {
        [
            ("Gold", distribution.gold, "#f59e0b"),
            ("Silver", distribution.silver, "#94a3b8"),
            ("Bronze", distribution.bronze, "#cd7f32"),
            ("Collaboration", distribution.collaboration, "#3b82f6"),
        ]
        .into_iter()
        .filter(|(_, value, _)| *value > 0)
        .map(|(name, value, color)| AwardSlice { name, value, color })
        .collect()
    }

    pub fn stat_cards(stats: &DashboardStats) -> Vec<StatCard> {
        vec![
            StatCard {
                title: "Total Teams",
                value: stats.total_teams.to_string(),
            },
            StatCard {
                title: "Partner Companies",
                value: stats.total_companies.to_string(),
            },
            StatCard {
                title: "Active Problems",
                value: stats.total_problems.to_string(),
            },
            StatCard {
                title: "Submissions",
                value: stats.total_submissions.to_string(),
            },
            StatCard {
                title: "Judges",
                value: stats.total_judges.to_string(),
            },
            StatCard {
                title: "Pending Reviews",
                value: stats.pending_submissions.to_string(),
            },
            StatCard {
                title: "Avg Score",
                value: stats.average_score.to_string(),
            },
        ]
    }

    pub fn submission_card(&self, submission: RecentSubmission) -> SubmissionCard {
        SubmissionCard {
            tier: submission.total_score.map(|score| self.score_tier(score)),
            judge_label: Self::pluralize(submission.judge_count, "judge"),
            submission,
        }
    }

    pub fn dashboard(
        &self,
        stats: DashboardStats,
        leaderboard: Vec<LeaderboardEntry>,
        recent: Vec<RecentSubmission>,
        awards: &AwardDistribution,
    ) -> DashboardView {
        DashboardView {
            stat_cards: Self::stat_cards(&stats),
            stats,
            leaderboard: leaderboard
                .into_iter()
                .map(|entry| LeaderboardRow {
                    tier: self.score_tier(entry.average_score),
                    entry,
                })
                .collect(),
            recent_submissions: recent.into_iter().map(|s| self.submission_card(s)).collect(),
            award_chart: Self::award_slices(awards),
        }
    }

    pub fn analytics(&self, report: AnalyticsReport) -> AnalyticsView {
        let max_teams = report
            .company_popularity
            .iter()
            .map(|c| c.team_count)
            .max()
            .unwrap_or(0);

        AnalyticsView {
            award_chart: Self::award_slices(&report.award_distribution),
            popularity_bars: report
                .company_popularity
                .iter()
                .cloned()
                .map(|company| PopularityBar {
                    width: Self::bar_width(company.team_count, max_teams),
                    company,
                })
                .collect(),
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::SubmissionStatus;

    #[test]
    fn test_score_tiers_use_thresholds() {
        let presenter = Presenter::default();
        assert_eq!(presenter.score_tier(80), ScoreTier::Good);
        assert_eq!(presenter.score_tier(79), ScoreTier::Warning);
        assert_eq!(presenter.score_tier(60), ScoreTier::Warning);
        assert_eq!(presenter.score_tier(59), ScoreTier::Critical);

        let strict = Presenter::new(ScoreThresholds { good: 90, warning: 75 });
        assert_eq!(strict.score_tier(85), ScoreTier::Warning);
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(Presenter::bar_width(5, 0), 0.0);
        assert_eq!(Presenter::bar_width(18, 18), 100.0);
        assert_eq!(Presenter::bar_width(12, 18), 66.7);
        assert_eq!(Presenter::bar_width(30, 18), 100.0);
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(Presenter::pluralize(1, "member"), "1 member");
        assert_eq!(Presenter::pluralize(3, "member"), "3 members");
        assert_eq!(Presenter::pluralize(0, "judge"), "0 judges");
    }

    #[test]
    fn test_award_slices_skip_empty_buckets() {
        let distribution = AwardDistribution {
            gold: 2,
            silver: 0,
            bronze: 1,
            collaboration: 3,
        };
        let slices = Presenter::award_slices(&distribution);
        let names: Vec<_> = slices.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Gold", "Bronze", "Collaboration"]);
        assert_eq!(slices[0].color, "#f59e0b");
        assert!(Presenter::award_slices(&AwardDistribution::default()).is_empty());
    }

    #[test]
    fn test_submission_card_labels() {
        let presenter = Presenter::default();
        let card = presenter.submission_card(RecentSubmission {
            id: "s1".to_string(),
            solution_title: "AI-Powered Route Optimizer".to_string(),
            team_name: "Smart Transit Innovators".to_string(),
            problem_title: "Smart Waste Collection Optimization".to_string(),
            innovation_score: Some(85),
            feasibility_score: Some(78),
            total_score: Some(82),
            award_type: Some("Gold".to_string()),
            status: SubmissionStatus::Evaluated,
            submitted_at: Utc::now(),
            judge_count: 1,
        });
        assert_eq!(card.tier, Some(ScoreTier::Good));
        assert_eq!(card.judge_label, "1 judge");

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["solutionTitle"], "AI-Powered Route Optimizer");
        assert_eq!(json["tier"], "good");
        assert_eq!(json["judgeLabel"], "1 judge");
    }
}
