// Feature inheritance across the `inherits` graph
//
// The graph may contain cycles of any length. Resolution walks each chain with
// a visited set; a plan seen twice in one chain contributes only its declared
// features. Results that never hit such a short-circuit do not depend on where
// the chain started, so they are memoized for the whole pass. Results that did
// are recomputed per starting plan, which keeps the outcome independent of the
// order plans are resolved in.

use planb_types::PlanRecord;
use std::collections::{HashMap, HashSet};

use crate::normalize::dedup_preserving_order;

/// Replace every plan's features with its effective feature set:
/// the base plan's resolved features followed by its own, without duplicates.
///
/// Plans naming a missing base keep their declared features.
pub fn resolve_inheritance(plans: &mut [PlanRecord]) {
    let resolved: Vec<Vec<String>> = {
        let mut resolver = InheritanceResolver::new(plans);
        (0..plans.len()).map(|i| resolver.resolve_from(i)).collect()
    };

    for (plan, features) in plans.iter_mut().zip(resolved) {
        plan.features = features;
    }
}

struct Resolution {
    features: Vec<String>,
    short_circuited: bool,
}

struct InheritanceResolver<'a> {
    plans: &'a [PlanRecord],
    /// First plan index for each name
    by_name: HashMap<&'a str, usize>,
    settled: Vec<Option<Vec<String>>>,
}

impl<'a> InheritanceResolver<'a> {
    fn new(plans: &'a [PlanRecord]) -> Self {
        let mut by_name = HashMap::with_capacity(plans.len());
        for (index, plan) in plans.iter().enumerate() {
            by_name.entry(plan.name.as_str()).or_insert(index);
        }

        Self {
            plans,
            by_name,
            settled: vec![None; plans.len()],
        }
    }

    fn resolve_from(&mut self, start: usize) -> Vec<String> {
        let mut chain = HashSet::new();
        self.resolve(start, &mut chain).features
    }

    fn resolve(&mut self, index: usize, chain: &mut HashSet<usize>) -> Resolution {
        if let Some(features) = &self.settled[index] {
            return Resolution {
                features: features.clone(),
                short_circuited: false,
            };
        }

        let plans = self.plans;
        let plan = &plans[index];

        if !chain.insert(index) {
            return Resolution {
                features: plan.features.clone(),
                short_circuited: true,
            };
        }

        let base = plan
            .inherits
            .as_deref()
            .and_then(|name| self.by_name.get(name).copied());

        let resolution = match base {
            Some(base) => {
                let inherited = self.resolve(base, chain);
                Resolution {
                    features: merge(&inherited.features, &plan.features),
                    short_circuited: inherited.short_circuited,
                }
            }
            None => Resolution {
                features: plan.features.clone(),
                short_circuited: false,
            },
        };

        chain.remove(&index);

        if !resolution.short_circuited {
            self.settled[index] = Some(resolution.features.clone());
        }
        resolution
    }
}

fn merge(inherited: &[String], own: &[String]) -> Vec<String> {
    dedup_preserving_order(inherited.iter().chain(own).map(String::as_str))
}
