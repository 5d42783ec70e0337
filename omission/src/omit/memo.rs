//! Identity memo for one traversal.
//!
//! The engine walks the graph twice. The first walk records a plan for each
//! container it visits, keyed by identity, and marks the containers that drop
//! an entry. [`Memo::propagate`] then marks every container that visits a
//! marked one, following cycles until nothing new is marked. The second walk
//! rebuilds marked containers only; it reserves a placeholder before
//! descending, so a cycle that leads back to a container resolves to its
//! placeholder. Unmarked containers are returned by original reference.

use std::collections::{hash_map::Entry, HashMap};

use crate::value::{Identity, Key, Value};

/// What the first visit of a container decided for one of its entries.
#[derive(Debug)]
pub(crate) enum Step {
    /// A target entry, left out of the output.
    Drop,
    /// Kept by original reference without descending.
    Keep(Key, Value),
    /// Kept, with the value itself transformed.
    Visit(Key, Value),
}

#[derive(Debug, Default)]
struct Plan {
    steps: Vec<Step>,
    changed: bool,
}

#[derive(Default)]
pub(crate) struct Memo {
    plans: HashMap<Identity, Plan>,
    /// Containers whose plan visits the keyed container.
    parents: HashMap<Identity, Vec<Identity>>,
    slots: HashMap<Identity, Value>,
}

impl Memo {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Opens an empty plan for `identity`.
    ///
    /// Returns `false` if the container was already visited, including when its
    /// plan is still being recorded further up the stack.
    pub(crate) fn begin(&mut self, identity: Identity) -> bool {
        match self.plans.entry(identity) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Plan::default());
                true
            }
        }
    }

    /// Stores the decisions made for `identity`.
    pub(crate) fn record(&mut self, identity: Identity, steps: Vec<Step>) {
        for step in &steps {
            if let Step::Visit(_, child) = step {
                if let Some(child) = child.identity() {
                    self.parents.entry(child).or_default().push(identity);
                }
            }
        }
        if let Some(plan) = self.plans.get_mut(&identity) {
            plan.changed = steps.iter().any(|step| matches!(step, Step::Drop));
            plan.steps = steps;
        }
    }

    /// Marks every container that visits a changed container as changed.
    pub(crate) fn propagate(&mut self) {
        let mut pending: Vec<Identity> = self
            .plans
            .iter()
            .filter(|(_, plan)| plan.changed)
            .map(|(identity, _)| *identity)
            .collect();

        while let Some(identity) = pending.pop() {
            for parent in self.parents.get(&identity).into_iter().flatten() {
                if let Some(plan) = self.plans.get_mut(parent) {
                    if !plan.changed {
                        plan.changed = true;
                        pending.push(*parent);
                    }
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn is_changed(&self, identity: Identity) -> bool {
        self.plans.get(&identity).is_some_and(|plan| plan.changed)
    }

    /// Hands out the steps of a changed container, once.
    pub(crate) fn take_steps(&mut self, identity: Identity) -> Option<Vec<Step>> {
        let plan = self.plans.get_mut(&identity).filter(|plan| plan.changed)?;
        Some(std::mem::take(&mut plan.steps))
    }

    /// Returns the output already recorded for `identity`, finished or not.
    pub(crate) fn lookup(&self, identity: Identity) -> Option<Value> {
        self.slots.get(&identity).cloned()
    }

    /// Records `placeholder` as the output for `identity` before it is filled.
    pub(crate) fn reserve(&mut self, identity: Identity, placeholder: Value) {
        self.slots.insert(identity, placeholder);
    }

    #[cfg(test)]
    pub(crate) fn planned(&self) -> usize {
        self.plans.len()
    }

    #[cfg(test)]
    pub(crate) fn rebuilt(&self) -> usize {
        self.slots.len()
    }
}
