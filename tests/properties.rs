//! Property tests over random binary CSPs.
//!
//! Every instance is small enough to enumerate, so propagation results are
//! compared against the exact solution set.

use proptest::prelude::*;
use u_propagate::csp::{Csp, RandomCspConfig, Value, VarId};
use u_propagate::propagation::{PropagationResult, PropagatorConfig, Strategy as Kind};

const KINDS: [Kind; 3] = [
    Kind::Plain,
    Kind::ForwardChecking,
    Kind::GeneralizedArcConsistency,
];

#[derive(Debug, Clone)]
struct Instance {
    config: RandomCspConfig,
    /// Value index forbidden for the first variable by a unary constraint.
    unary: Option<usize>,
    var: usize,
    value: usize,
}

impl Instance {
    fn build(&self) -> Csp {
        let mut csp = self.config.generate().unwrap();
        if let Some(i) = self.unary {
            let first = csp.variable_ids().next().unwrap();
            let forbidden = csp.variable(first).domain()[i % self.config.domain_size];
            csp.add_predicate("unary", vec![first], move |t| t[0] != forbidden)
                .unwrap();
        }
        csp
    }

    fn assigned(&self, csp: &Csp) -> (VarId, Value) {
        let var = csp
            .variable_ids()
            .nth(self.var % csp.variable_count())
            .unwrap();
        let domain = csp.variable(var).domain();
        (var, domain[self.value % domain.len()])
    }
}

fn instance() -> impl Strategy<Value = Instance> {
    (
        2usize..=6,
        1usize..=4,
        0.0f64..=1.0,
        0.0f64..=0.9,
        any::<u64>(),
        proptest::option::of(any::<usize>()),
        any::<usize>(),
        any::<usize>(),
    )
        .prop_map(
            |(variables, domain_size, density, tightness, seed, unary, var, value)| Instance {
                config: RandomCspConfig::default()
                    .with_variables(variables)
                    .with_domain_size(domain_size)
                    .with_density(density)
                    .with_tightness(tightness)
                    .with_seed(seed),
                unary,
                var,
                value,
            },
        )
}

/// All full tuples over the current domains satisfying every constraint.
fn solutions(csp: &Csp) -> Vec<Vec<Value>> {
    fn extend(
        csp: &Csp,
        domains: &[Vec<Value>],
        tuple: &mut Vec<Value>,
        out: &mut Vec<Vec<Value>>,
    ) {
        if tuple.len() == domains.len() {
            let satisfied = csp.all_constraints().all(|c| {
                let t: Vec<Value> = csp.scope(c).iter().map(|v| tuple[v.index()]).collect();
                csp.satisfies(c, &t)
            });
            if satisfied {
                out.push(tuple.clone());
            }
            return;
        }
        for &value in &domains[tuple.len()] {
            tuple.push(value);
            extend(csp, domains, tuple, out);
            tuple.pop();
        }
    }

    let domains = csp.current_domains();
    let mut out = Vec::new();
    extend(csp, &domains, &mut Vec::new(), &mut out);
    out
}

fn is_subset(inner: &[Vec<Value>], outer: &[Vec<Value>]) -> bool {
    inner
        .iter()
        .zip(outer)
        .all(|(a, b)| a.iter().all(|v| b.contains(v)))
}

fn solutions_survive(csp: &Csp, solutions: &[Vec<Value>]) -> bool {
    let domains = csp.current_domains();
    solutions
        .iter()
        .all(|s| s.iter().zip(&domains).all(|(v, d)| d.contains(v)))
}

/// Runs `kind` once, checks soundness and log completeness, and returns the
/// outcome with the domains it produced. Domains are restored on return.
fn run(
    csp: &mut Csp,
    kind: Kind,
    new_var: Option<VarId>,
    expected: &[Vec<Value>],
) -> Result<(PropagationResult, Vec<Vec<Value>>), TestCaseError> {
    let before = csp.current_domains();
    let mut propagator = PropagatorConfig::default().with_strategy(kind).build();
    let result = propagator.propagate(csp, new_var);
    let after = csp.current_domains();

    prop_assert!(is_subset(&after, &before), "{kind:?} grew a domain");
    prop_assert_eq!(
        result.pruned.len(),
        before.iter().map(Vec::len).sum::<usize>() - after.iter().map(Vec::len).sum::<usize>(),
        "{:?} log does not match domain changes",
        kind
    );
    if result.consistent {
        prop_assert!(solutions_survive(csp, expected), "{kind:?} pruned a solution");
    } else {
        prop_assert!(expected.is_empty(), "{kind:?} failed on a satisfiable state");
    }

    result.pruned.clone().undo(csp);
    prop_assert_eq!(csp.current_domains(), before);
    Ok((result, after))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn prop_assignment_propagation(inst in instance()) {
        let mut csp = inst.build();
        let (var, value) = inst.assigned(&csp);
        csp.assign(var, value).unwrap();
        let expected = solutions(&csp);

        let mut outcomes = Vec::new();
        for kind in KINDS {
            outcomes.push(run(&mut csp, kind, Some(var), &expected)?);
        }

        // plain <= fc <= gac in pruning strength
        for pair in outcomes.windows(2) {
            let (weak, weak_domains) = &pair[0];
            let (strong, strong_domains) = &pair[1];
            if !weak.consistent {
                prop_assert!(!strong.consistent);
            } else if strong.consistent {
                prop_assert!(is_subset(strong_domains, weak_domains));
            }
        }
        prop_assert!(outcomes[0].0.pruned.is_empty(), "plain never prunes");
    }

    #[test]
    fn prop_initial_propagation(inst in instance()) {
        let mut csp = inst.build();
        let expected = solutions(&csp);

        let (plain, _) = run(&mut csp, Kind::Plain, None, &expected)?;
        prop_assert!(plain.consistent && plain.pruned.is_empty());

        let (fc, fc_domains) = run(&mut csp, Kind::ForwardChecking, None, &expected)?;
        let (gac, gac_domains) =
            run(&mut csp, Kind::GeneralizedArcConsistency, None, &expected)?;
        if !fc.consistent {
            prop_assert!(!gac.consistent);
        } else if gac.consistent {
            prop_assert!(is_subset(&gac_domains, &fc_domains));
        }
    }

    #[test]
    fn prop_gac_idempotent(inst in instance()) {
        let mut csp = inst.build();
        let mut gac = PropagatorConfig::default().build();

        let first = gac.propagate(&mut csp, None);
        if first.consistent {
            let second = gac.propagate(&mut csp, None);
            prop_assert!(second.consistent);
            prop_assert!(second.pruned.is_empty());
        }
    }

    #[test]
    fn prop_fc_prune_records_are_unique(inst in instance()) {
        let mut csp = inst.build();
        let (var, value) = inst.assigned(&csp);
        csp.assign(var, value).unwrap();

        let mut fc = PropagatorConfig::default()
            .with_strategy(Kind::ForwardChecking)
            .build();
        let result = fc.propagate(&mut csp, Some(var));
        let mut seen = std::collections::HashSet::new();
        for p in &result.pruned {
            prop_assert!(seen.insert(*p), "{} recorded twice", p);
        }
    }
}
