//! Property-based tests for allocation invariants.
//!
//! Fuzz-verifies, over synthetic graphs:
//!   - the budget ceiling holds whenever the baseline fits
//!   - allocation is deterministic for identical inputs
//!   - each candidate list is admitted in non-decreasing size order
//!   - raising the budget only grows single-list bundles
//!   - no path is ever included twice, cycles included

use codescout_analysis::graph::{FileNode, ImportGraph};
use codescout_context::allocation::{BudgetAllocator, EntryRole};
use codescout_core::config::CandidatePolicy;
use proptest::prelude::*;

const TARGET: &str = "target.py";

fn node(path: &str, token_count: usize) -> FileNode {
    FileNode {
        token_count,
        ..FileNode::new(path, "")
    }
}

/// Build a graph where the target imports `import_costs` files and is
/// imported by `importer_costs` files.
fn graph(target_cost: usize, import_costs: &[usize], importer_costs: &[usize]) -> ImportGraph {
    let mut g = ImportGraph::new();
    g.insert(node(TARGET, target_cost));
    for (i, cost) in import_costs.iter().enumerate() {
        let path = format!("imports/i{i}.py");
        g.insert(node(&path, *cost));
        g.add_edge(TARGET, &path);
    }
    for (i, cost) in importer_costs.iter().enumerate() {
        let path = format!("importers/u{i}.py");
        g.insert(node(&path, *cost));
        g.add_edge(&path, TARGET);
    }
    g
}

fn allocator() -> BudgetAllocator {
    BudgetAllocator::new(CandidatePolicy::ImportsFirst)
}

proptest! {
    /// For any budget that covers the baseline, the ceiling holds.
    #[test]
    fn prop_budget_ceiling_holds(
        target_cost in 0usize..500,
        imports in prop::collection::vec(0usize..400, 0..12),
        importers in prop::collection::vec(0usize..400, 0..12),
        slack in 0usize..2000,
    ) {
        let g = graph(target_cost, &imports, &importers);
        let budget = target_cost + slack;
        let bundle = allocator().allocate(TARGET, &g, budget, None).unwrap();
        prop_assert!(bundle.used_tokens <= budget,
            "used {} exceeds budget {}", bundle.used_tokens, budget);
    }

    /// Identical inputs produce identical bundles.
    #[test]
    fn prop_allocation_is_deterministic(
        target_cost in 0usize..200,
        imports in prop::collection::vec(0usize..300, 0..10),
        importers in prop::collection::vec(0usize..300, 0..10),
        budget in 0usize..3000,
    ) {
        let g = graph(target_cost, &imports, &importers);
        let first = allocator().allocate(TARGET, &g, budget, None).unwrap();
        let second = allocator().allocate(TARGET, &g, budget, None).unwrap();
        prop_assert_eq!(first.paths(), second.paths());
        prop_assert_eq!(first.used_tokens, second.used_tokens);
    }

    /// Within each candidate list, included files appear in non-decreasing
    /// token-count order.
    #[test]
    fn prop_within_list_ordering(
        imports in prop::collection::vec(0usize..300, 0..15),
        importers in prop::collection::vec(0usize..300, 0..15),
        budget in 0usize..3000,
    ) {
        let g = graph(10, &imports, &importers);
        let bundle = allocator().allocate(TARGET, &g, 10 + budget, None).unwrap();

        for role in [EntryRole::Import, EntryRole::Importer] {
            let costs: Vec<usize> = bundle
                .entries
                .iter()
                .filter(|e| e.role == role)
                .map(|e| e.token_count)
                .collect();
            prop_assert!(costs.windows(2).all(|w| w[0] <= w[1]),
                "{:?} entries out of order: {:?}", role, costs);
        }
    }

    /// On a single candidate list, a larger budget never evicts anything.
    #[test]
    fn prop_budget_increase_is_monotone_for_imports(
        imports in prop::collection::vec(0usize..300, 0..15),
        budget_low in 0usize..1500,
        extra in 0usize..1500,
    ) {
        let g = graph(10, &imports, &[]);
        let low = allocator().allocate(TARGET, &g, 10 + budget_low, None).unwrap();
        let high = allocator().allocate(TARGET, &g, 10 + budget_low + extra, None).unwrap();

        for path in low.paths() {
            prop_assert!(high.paths().contains(&path),
                "budget increase dropped {}", path);
        }
    }

    /// No path is ever included twice, even with mutual imports.
    #[test]
    fn prop_no_duplicates_with_cycles(
        costs in prop::collection::vec(1usize..100, 1..8),
        budget in 0usize..2000,
    ) {
        let mut g = ImportGraph::new();
        g.insert(node(TARGET, 10));
        // Every file both imports and is imported by the target.
        for (i, cost) in costs.iter().enumerate() {
            let path = format!("cycle/c{i}.py");
            g.insert(node(&path, *cost));
            g.add_edge(TARGET, &path);
            g.add_edge(&path, TARGET);
        }

        let bundle = allocator().allocate(TARGET, &g, 10 + budget, None).unwrap();
        let mut paths = bundle.paths();
        paths.sort_unstable();
        let before = paths.len();
        paths.dedup();
        prop_assert_eq!(before, paths.len(), "duplicate entries in bundle");
    }
}
