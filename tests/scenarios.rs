//! End-to-end scenarios: the reference cases for each strategy, and a
//! minimal backtracking driver exercising the undo discipline.

use u_propagate::csp::{Csp, Value, VarId, Variable};
use u_propagate::propagation::{
    ForwardChecking, GacPropagator, PlainPropagator, Propagator, PropagatorConfig, Prune, Strategy,
};

fn not_equal(domain: &[Value]) -> (Csp, VarId, VarId) {
    let mut csp = Csp::new("x != y");
    let x = csp.add_variable(Variable::new("x", domain.iter().copied()));
    let y = csp.add_variable(Variable::new("y", domain.iter().copied()));
    csp.add_all_different("x != y", vec![x, y]).unwrap();
    (csp, x, y)
}

fn all_different(n: usize, domain: &[Value]) -> Csp {
    let mut csp = Csp::new("alldiff");
    let vars: Vec<_> = (0..n)
        .map(|i| csp.add_variable(Variable::new(format!("v{i}"), domain.iter().copied())))
        .collect();
    csp.add_all_different("alldiff", vars).unwrap();
    csp
}

fn queens(n: usize) -> (Csp, Vec<VarId>) {
    let mut csp = Csp::new(format!("{n}-queens"));
    let rows: Vec<_> = (0..n)
        .map(|i| csp.add_variable(Variable::range(format!("q{i}"), 0, n as Value - 1)))
        .collect();
    for i in 0..n {
        for j in (i + 1)..n {
            let gap = (j - i) as Value;
            csp.add_predicate(format!("q{i}/q{j}"), vec![rows[i], rows[j]], move |t| {
                t[0] != t[1] && (t[0] - t[1]).abs() != gap
            })
            .unwrap();
        }
    }
    (csp, rows)
}

/// Counts solutions by chronological backtracking in variable order.
fn count_solutions(csp: &mut Csp, propagator: &mut dyn Propagator) -> usize {
    let initial = propagator.propagate(csp, None);
    let count = if initial.consistent {
        let vars: Vec<_> = csp.variable_ids().collect();
        search(csp, propagator, &vars)
    } else {
        0
    };
    initial.pruned.undo(csp);
    count
}

fn search(csp: &mut Csp, propagator: &mut dyn Propagator, vars: &[VarId]) -> usize {
    let Some((&var, rest)) = vars.split_first() else {
        return 1;
    };

    let mut count = 0;
    for value in csp.variable(var).current_domain() {
        csp.assign(var, value).unwrap();
        let result = propagator.propagate(csp, Some(var));
        if result.consistent {
            count += search(csp, propagator, rest);
        }
        result.pruned.undo(csp);
        csp.unassign(var);
    }
    count
}

#[test]
fn test_not_equal_assignment() {
    // FC: y is the last unassigned variable, so y = 1 goes
    let (mut csp, x, y) = not_equal(&[1, 2, 3]);
    csp.assign(x, 1).unwrap();
    let fc = ForwardChecking::new().propagate(&mut csp, Some(x));
    assert!(fc.consistent);
    assert_eq!(fc.pruned.as_slice(), &[Prune { variable: y, value: 1 }]);
    fc.pruned.undo(&mut csp);

    // GAC sees x's domain {1} through the arc (y, x != y)
    let gac = GacPropagator::new().propagate(&mut csp, Some(x));
    assert!(gac.consistent);
    assert_eq!(gac.pruned.as_slice(), &[Prune { variable: y, value: 1 }]);
    gac.pruned.undo(&mut csp);

    let plain = PlainPropagator::new().propagate(&mut csp, Some(x));
    assert!(plain.consistent);
    assert!(plain.pruned.is_empty());
}

#[test]
fn test_not_equal_singleton_wipeout() {
    let (mut csp, x, y) = not_equal(&[1]);
    csp.assign(x, 1).unwrap();

    for mut propagator in [
        Box::new(ForwardChecking::new()) as Box<dyn Propagator>,
        Box::new(GacPropagator::new()),
    ] {
        let result = propagator.propagate(&mut csp, Some(x));
        assert!(!result.consistent, "{} should fail", propagator.name());
        assert!(result.pruned.is_empty());
        assert_eq!(csp.variable(y).current_domain(), vec![1]);
    }

    assert!(PlainPropagator::new().propagate(&mut csp, Some(x)).consistent);
}

#[test]
fn test_pigeonhole_initial_gac() {
    let mut csp = all_different(3, &[1, 2]);
    let before = csp.current_domains();
    let result = GacPropagator::new().propagate(&mut csp, None);
    assert!(!result.consistent);
    result.pruned.undo(&mut csp);
    assert_eq!(csp.current_domains(), before);
}

#[test]
fn test_satisfiable_all_different_unchanged() {
    let mut csp = all_different(3, &[1, 2, 3]);
    let before = csp.current_domains();
    let result = GacPropagator::new().propagate(&mut csp, None);
    assert!(result.consistent);
    assert!(result.pruned.is_empty());
    assert_eq!(csp.current_domains(), before);
}

#[test]
fn test_queens_solution_counts_agree() {
    // 6-queens has 4 solutions
    for strategy in [
        Strategy::Plain,
        Strategy::ForwardChecking,
        Strategy::GeneralizedArcConsistency,
    ] {
        let (mut csp, _) = queens(6);
        let before = csp.current_domains();
        let mut propagator = PropagatorConfig::default().with_strategy(strategy).build();

        assert_eq!(count_solutions(&mut csp, propagator.as_mut()), 4, "{strategy:?}");
        assert_eq!(csp.current_domains(), before, "{strategy:?} left prunes behind");
        assert!(csp.variables().iter().all(|v| !v.is_assigned()));
    }
}

#[test]
fn test_stronger_propagation_does_less_work() {
    let mut calls = Vec::new();
    for strategy in [
        Strategy::Plain,
        Strategy::ForwardChecking,
        Strategy::GeneralizedArcConsistency,
    ] {
        let (mut csp, _) = queens(6);
        let mut propagator = PropagatorConfig::default().with_strategy(strategy).build();
        count_solutions(&mut csp, propagator.as_mut());
        calls.push(propagator.stats().calls);
    }
    assert!(calls[0] >= calls[1], "fc visits no more nodes than plain");
    assert!(calls[1] >= calls[2], "gac visits no more nodes than fc");
}

#[test]
fn test_unary_constraints_before_search() {
    let (mut csp, rows) = queens(4);
    csp.add_predicate("q0 = 1", vec![rows[0]], |t| t[0] == 1).unwrap();

    let mut fc = ForwardChecking::new();
    let result = fc.propagate(&mut csp, None);
    assert!(result.consistent);
    assert_eq!(csp.variable(rows[0]).current_domain(), vec![1]);
    assert_eq!(result.pruned.values_of(rows[0]), vec![0, 2, 3]);
    result.pruned.undo(&mut csp);

    // 4-queens with the first queen on row 1 has exactly one solution
    let mut gac = GacPropagator::new();
    assert_eq!(count_solutions(&mut csp, &mut gac), 1);
}
