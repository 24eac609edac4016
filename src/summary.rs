use std::cmp::Ordering;

use crate::board::Match;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    Kickoff,
    Stable,
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::Kickoff
    }
}

/// Rank a board snapshot for display: most goals first, then the configured
/// tie-break. The input slice is left untouched.
pub fn rank(matches: &[Match], tie_break: TieBreak) -> Vec<Match> {
    let mut ranked = matches.to_vec();
    // sort_by is stable: matches equal under every active key keep their
    // board order.
    ranked.sort_by(|a, b| {
        b.total_goals()
            .cmp(&a.total_goals())
            .then_with(|| match tie_break {
                TieBreak::Kickoff => b.kicked_off.cmp(&a.kicked_off),
                TieBreak::Stable => Ordering::Equal,
            })
    });
    ranked
}

pub fn summary_lines(ranked: &[Match]) -> Vec<String> {
    ranked
        .iter()
        .enumerate()
        // the [mN] marker keeps a summary traceable across re-renders
        .map(|(idx, m)| format!("{:>2}. {}  [{}]", idx + 1, m.score_line(), m.id))
        .collect()
}
