use proptest::prelude::*;
use routeplanner::{Cost, Graph, QueueKind, RoutePlanner, VertexId};

fn build(n: usize, roads: &[(usize, usize, u32)]) -> Graph<()> {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_vertex(&format!("v{}", i), ()).unwrap();
    }
    for &(a, b, cost) in roads {
        // Repeated pairs are rejected; the first one wins.
        let _ = g.add_edge(&format!("v{}", a), &format!("v{}", b), cost as Cost);
    }
    g
}

// Cheapest simple path by exhaustive search.
fn cheapest(g: &Graph<()>, at: VertexId, goal: VertexId, seen: &mut Vec<bool>, acc: Cost, best: &mut Option<Cost>) {
    if at == goal {
        if best.map_or(true, |b| acc < b) {
            *best = Some(acc);
        }
        return;
    }
    seen[at] = true;
    for edge in g.get(at).outgoing_edges() {
        if !seen[edge.to] {
            cheapest(g, edge.to, goal, seen, acc + edge.cost, best);
        }
    }
    seen[at] = false;
}

fn graphs() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (2usize..7).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n, 0u32..20), 0..15)))
}

fn check(kind: QueueKind, n: usize, roads: &[(usize, usize, u32)]) -> Result<(), TestCaseError> {
    let g = build(n, roads);
    let mut planner = RoutePlanner::with_queue(&g, kind);
    for source in 0..n {
        for goal in 0..n {
            let mut best = None;
            cheapest(&g, source, goal, &mut vec![false; n], 0.0, &mut best);
            let route = planner.compute_route_between(Some(source), Some(goal));

            prop_assert_eq!(route.total_cost(), best);
            if route.is_empty() {
                continue;
            }
            let stops = route.stops();
            prop_assert_eq!(stops[0].vertex, source);
            prop_assert_eq!(stops[0].cost, 0.0);
            prop_assert_eq!(stops[stops.len() - 1].vertex, goal);
            for pair in stops.windows(2) {
                let edge = g
                    .get(pair[0].vertex)
                    .outgoing_edges()
                    .iter()
                    .find(|e| e.to == pair[1].vertex);
                prop_assert!(edge.is_some());
                prop_assert_eq!(edge.unwrap().cost, pair[1].cost - pair[0].cost);
            }
        }
    }
    prop_assert_eq!(planner.runs(), n);
    Ok(())
}

proptest! {
    #[test]
    fn lazy_queue_finds_cheapest_routes((n, roads) in graphs()) {
        check(QueueKind::Lazy, n, &roads)?;
    }

    #[test]
    fn indexed_queue_finds_cheapest_routes((n, roads) in graphs()) {
        check(QueueKind::Indexed, n, &roads)?;
    }
}
