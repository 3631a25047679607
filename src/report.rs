//! Human-readable evaluation reports
//!
//! Turns [`EvaluationStatistics`] into a text report with a qualitative
//! label for the learned policy and threshold-based tuning advice. The
//! statistics themselves carry no judgement; all thresholds live here.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::{evaluation::EvaluationStatistics, opponent::Strategy};

const REPORT_WIDTH: usize = 50;

/// Qualitative description of a policy, by average score per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyLabel {
    /// Average score ≥ 4.5
    RuthlessExploiter,
    /// Average score ≥ 3.0
    Balanced,
    /// Average score ≥ 2.0
    CooperativeTendency,
    Passive,
}

impl StrategyLabel {
    pub fn from_average_score(average: f64) -> Self {
        if average >= 4.5 {
            StrategyLabel::RuthlessExploiter
        } else if average >= 3.0 {
            StrategyLabel::Balanced
        } else if average >= 2.0 {
            StrategyLabel::CooperativeTendency
        } else {
            StrategyLabel::Passive
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategyLabel::RuthlessExploiter => {
                "Ruthless exploiter (always defects when possible)"
            }
            StrategyLabel::Balanced => "Balanced approach (mix of cooperation/defection)",
            StrategyLabel::CooperativeTendency => "Cooperative tendency",
            StrategyLabel::Passive => "Overly passive (needs improvement)",
        }
    }
}

impl fmt::Display for StrategyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Tuning advice tier, by average score per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Average score < 2.5
    NeedsTraining,
    /// Average score < 3.5
    Moderate,
    Excellent,
}

impl Recommendation {
    pub fn from_average_score(average: f64) -> Self {
        if average < 2.5 {
            Recommendation::NeedsTraining
        } else if average < 3.5 {
            Recommendation::Moderate
        } else {
            Recommendation::Excellent
        }
    }

    /// Report lines, already indented for nesting.
    pub fn lines(&self) -> &'static [&'static str] {
        match self {
            Recommendation::NeedsTraining => &[
                "▪ Increase training episodes",
                "▪ Reduce exploration rate (epsilon)",
                "▪ Adjust learning rate parameters",
            ],
            Recommendation::Moderate => &[
                "▪ Moderate performance - try:",
                "  ▪ Increase discount factor (gamma)",
                "  ▪ Add reward shaping",
            ],
            Recommendation::Excellent => &[
                "▪ Excellent performance - consider:",
                "  ▪ Testing against more complex strategies",
                "  ▪ Implementing probabilistic strategies",
            ],
        }
    }
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{:-^width$}", format!(" {title} "), width = REPORT_WIDTH)
}

/// Render the full text report for one evaluation run.
pub fn render_report(stats: &EvaluationStatistics, strategy: &Strategy) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, stats, strategy);
    out
}

fn write_report(out: &mut String, stats: &EvaluationStatistics, strategy: &Strategy) -> fmt::Result {
    let average = stats.average_score();

    writeln!(out)?;
    writeln!(
        out,
        "{:=^width$}",
        " Evaluation Report ",
        width = REPORT_WIDTH
    )?;
    writeln!(out, "▪ Against strategy: {}", capitalize(strategy.tag()))?;
    if let Some(p) = strategy.cooperate_prob() {
        writeln!(out, "▪ User cooperation probability: {}", percent(p))?;
    }
    writeln!(out, "▪ Rounds played: {}", stats.rounds)?;

    section(out, "Performance Metrics")?;
    writeln!(out, "▪ Average score per round: {average:.2}")?;
    writeln!(
        out,
        "▪ AI cooperation rate: {}",
        percent(stats.agent_cooperation_rate())
    )?;
    writeln!(
        out,
        "▪ User cooperation rate: {}",
        percent(stats.opponent_cooperation_rate())
    )?;

    section(out, "Outcome Distribution")?;
    let distribution: Vec<String> = stats
        .outcome_distribution()
        .into_iter()
        .map(|(outcome, rate)| format!("{outcome}: {}", percent(rate)))
        .collect();
    writeln!(out, "{}", distribution.join(" "))?;

    section(out, "Strategy Analysis")?;
    writeln!(
        out,
        "▪ AI strategy: {}",
        StrategyLabel::from_average_score(average)
    )?;

    section(out, "Theoretical Benchmarks")?;
    writeln!(out, "▪ Mutual cooperation: 3.00")?;
    writeln!(out, "▪ Optimal exploitation: 5.00")?;
    writeln!(out, "▪ Mutual defection: 1.00")?;
    writeln!(out, "▪ Random baseline (~0.5): ~2.50")?;

    section(out, "Recommendations")?;
    let lines = Recommendation::from_average_score(average).lines();
    write!(out, "{}", lines.join("\n"))
}
