//! One consistent read of every collection, handed to the analytics engine

use shared::{Company, Evaluation, Judge, Problem, Submission, Team};

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub teams: Vec<Team>,
    pub companies: Vec<Company>,
    pub problems: Vec<Problem>,
    pub judges: Vec<Judge>,
    pub submissions: Vec<Submission>,
    pub evaluations: Vec<Evaluation>,
}
