use std::cmp::Ordering;

use tracing::warn;

use crate::engine::project;
use crate::model::{InputBag, OperationalModel, SolutionKind, SolutionStrategy};
use crate::report::StrategyRanking;

/// Runs each strategy against the same operational model and orders them by
/// cumulative savings over the horizon. A failing strategy is kept, unranked,
/// at the end with its error.
pub fn rank_strategies(
    model: &OperationalModel,
    strategies: &[SolutionStrategy],
) -> Vec<StrategyRanking> {
    let mut rankings = strategies
        .iter()
        .map(|strategy| match project(model, strategy) {
            Ok(result) => StrategyRanking {
                rank: None,
                solution: strategy.kind(),
                monthly_savings: Some(result.monthly),
                total_savings: Some(result.total_savings()),
                breakeven: result.breakeven,
                is_viable: result.solution.is_viable,
                error: None,
            },
            Err(err) => {
                warn!("strategy {} failed: {err}", strategy.kind());
                failed(strategy.kind(), err.to_string())
            }
        })
        .collect::<Vec<_>>();
    finish_ranking(&mut rankings);
    rankings
}

/// Ranks every solution type the bag has inputs for.
pub fn rank_from_inputs(model: &OperationalModel, inputs: &InputBag) -> Vec<StrategyRanking> {
    let mut strategies = Vec::new();
    let mut unbuildable = Vec::new();
    for kind in SolutionKind::ALL {
        match SolutionStrategy::from_inputs(kind, inputs) {
            Ok(strategy) => strategies.push(strategy),
            Err(err) => unbuildable.push(failed(kind, err.to_string())),
        }
    }
    let mut rankings = rank_strategies(model, &strategies);
    rankings.extend(unbuildable);
    rankings
}

fn failed(solution: SolutionKind, error: String) -> StrategyRanking {
    StrategyRanking {
        rank: None,
        solution,
        monthly_savings: None,
        total_savings: None,
        breakeven: None,
        is_viable: false,
        error: Some(error),
    }
}

fn finish_ranking(rankings: &mut [StrategyRanking]) {
    rankings.sort_by(|a, b| match (a.total_savings, b.total_savings) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    let mut rank = 1usize;
    for ranking in rankings.iter_mut() {
        if ranking.error.is_none() {
            ranking.rank = Some(rank);
            rank += 1;
        }
    }
}
