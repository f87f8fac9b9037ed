// crates/slotframe-runtime/src/handler.rs
use std::collections::BTreeSet;

use glam::Vec2;
use slotframe_core::{ElementId, EventArgs, Result};
use slotframe_layout::{pointer_args, Element, ElementTree};
use tracing::debug;

/// Configuration for an [`ElementHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Forget ids whose elements were deleted while dispatching.
    pub prune_on_dispatch: bool,
    /// Log every activated event at DEBUG.
    pub debug_logging: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            prune_on_dispatch: true,
            debug_logging: false,
        }
    }
}

/// Flat registry of elements that take part in event dispatch.
///
/// The registry holds ids only; elements stay owned by their tree. Dispatch
/// visits elements in ascending id order over a snapshot taken up front, so
/// effects may add, remove or delete elements freely. Ids that no longer
/// resolve are skipped.
#[derive(Debug, Clone, Default)]
pub struct ElementHandler {
    ids: BTreeSet<ElementId>,
    config: HandlerConfig,
}

impl ElementHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HandlerConfig) -> Self {
        Self {
            ids: BTreeSet::new(),
            config,
        }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }

    /// Registers one element. Returns false if it was already registered.
    pub fn register(&mut self, tree: &ElementTree, id: ElementId) -> Result<bool> {
        tree.get(id)?;
        Ok(self.ids.insert(id))
    }

    /// Registers `id` and everything below it. Returns how many ids were new.
    pub fn recursive_register(&mut self, tree: &ElementTree, id: ElementId) -> Result<usize> {
        let subtree = tree.subtree(id)?;
        let added = subtree.into_iter().filter(|&id| self.ids.insert(id)).count();
        debug!("Registered {} elements below {}", added, id);
        Ok(added)
    }

    pub fn deregister(&mut self, id: ElementId) -> bool {
        self.ids.remove(&id)
    }

    pub fn recursive_deregister(&mut self, tree: &ElementTree, id: ElementId) -> Result<usize> {
        let subtree = tree.subtree(id)?;
        Ok(subtree.into_iter().filter(|id| self.ids.remove(id)).count())
    }

    /// The registered element with this id, if it still exists.
    pub fn find_element<'t>(&self, tree: &'t ElementTree, id: ElementId) -> Option<&'t Element> {
        if !self.ids.contains(&id) {
            return None;
        }
        tree.get(id).ok()
    }

    /// First registered element carrying `name`, by ascending id.
    pub fn find_by_name(&self, tree: &ElementTree, name: &str) -> Option<ElementId> {
        self.ids
            .iter()
            .copied()
            .find(|&id| tree.get(id).map(|element| element.name() == name).unwrap_or(false))
    }

    /// Forgets ids that no longer resolve in `tree`. Returns how many went.
    pub fn prune(&mut self, tree: &ElementTree) -> usize {
        let before = self.ids.len();
        self.ids.retain(|&id| tree.contains(id));
        before - self.ids.len()
    }

    /// Activates the event called `event_name` on every registered element
    /// that has one. Returns how many effects ran.
    pub fn dispatch(
        &mut self,
        tree: &mut ElementTree,
        event_name: &str,
        condition_args: &EventArgs,
        effect_args: &EventArgs,
    ) -> usize {
        self.dispatch_with(tree, event_name, |_| (condition_args.clone(), effect_args.clone()))
    }

    /// Dispatches a pointer event. Each element gets `element`, `posX` and
    /// `posY` for both its condition and its effect.
    pub fn dispatch_pointer(&mut self, tree: &mut ElementTree, event_name: &str, position: Vec2) -> usize {
        self.dispatch_with(tree, event_name, |id| {
            let args = pointer_args(id, position);
            (args.clone(), args)
        })
    }

    fn dispatch_with<F>(&mut self, tree: &mut ElementTree, event_name: &str, mut args_for: F) -> usize
    where
        F: FnMut(ElementId) -> (EventArgs, EventArgs),
    {
        let snapshot: Vec<ElementId> = self.ids.iter().copied().collect();
        let mut fired = 0;
        for id in snapshot {
            let Some(event) = tree
                .get(id)
                .ok()
                .and_then(|element| element.event(event_name).cloned())
            else {
                continue;
            };
            let (condition_args, effect_args) = args_for(id);
            if event.activate(tree, &condition_args, &effect_args) {
                fired += 1;
                if self.config.debug_logging {
                    debug!("Event '{}' fired on element {}", event_name, id);
                }
            }
        }

        if self.config.prune_on_dispatch {
            let pruned = self.prune(tree);
            if pruned > 0 {
                debug!("Pruned {} deleted elements from the registry", pruned);
            }
        }
        debug!("Dispatched '{}': {} effects ran", event_name, fired);
        fired
    }
}
