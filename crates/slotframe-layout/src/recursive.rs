// crates/slotframe-layout/src/recursive.rs
//! Whole-subtree operations: recursive layout passes, copying and deletion.

use std::cmp::Reverse;

use slotframe_core::{Alignment, DrawTarget, ElementId, LayoutError, Result};
use tracing::debug;

use crate::{ElementKind, ElementTree};

impl ElementTree {
    /// Children of `id` in slot order; empty for leaves.
    pub fn children(&self, id: ElementId) -> Result<Vec<ElementId>> {
        Ok(self
            .get(id)?
            .as_container()
            .map(|container| container.child_ids())
            .unwrap_or_default())
    }

    /// `id` and everything below it, pre-order in slot order.
    pub fn subtree(&self, id: ElementId) -> Result<Vec<ElementId>> {
        let mut ids = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let children = self.children(current)?;
            ids.push(current);
            stack.extend(children.into_iter().rev());
        }
        Ok(ids)
    }

    pub fn descendants(&self, id: ElementId) -> Result<Vec<ElementId>> {
        let mut ids = self.subtree(id)?;
        ids.remove(0);
        Ok(ids)
    }

    /// Applies `operation` to `id`, then to each child in slot order, depth
    /// first. Children are read after the parent has been processed.
    fn walk<F>(&mut self, id: ElementId, operation: &mut F) -> Result<()>
    where
        F: FnMut(&mut ElementTree, ElementId) -> Result<()>,
    {
        operation(self, id)?;
        for child in self.children(id)? {
            self.walk(child, operation)?;
        }
        Ok(())
    }

    pub fn recursive_align(&mut self, id: ElementId) -> Result<()> {
        self.walk(id, &mut |tree: &mut ElementTree, current| tree.align(current))
    }

    /// Sets the same alignment on a whole subtree and aligns it.
    pub fn recursive_align_to(&mut self, id: ElementId, align_x: Alignment, align_y: Alignment) -> Result<()> {
        self.walk(id, &mut |tree: &mut ElementTree, current| tree.align_to(current, align_x, align_y))
    }

    pub fn recursive_match_content_to_slot(&mut self, id: ElementId) -> Result<()> {
        self.walk(id, &mut |tree: &mut ElementTree, current| tree.match_content_to_slot(current))
    }

    pub fn recursive_match_slot_to_content(&mut self, id: ElementId) -> Result<()> {
        self.walk(id, &mut |tree: &mut ElementTree, current| tree.match_slot_to_content(current))
    }

    pub fn recursive_set_draw_target(&mut self, id: ElementId, target: Option<DrawTarget>) -> Result<()> {
        self.walk(id, &mut |tree: &mut ElementTree, current| tree.set_draw_target(current, target))
    }

    /// Copies attributes of `source` onto `target`, leaving ids, parent links
    /// and children alone. Containers also take over slot count, elasticity,
    /// default alignment and arrangement; children that no longer fit are
    /// unlinked and returned.
    pub fn copy_into(&mut self, source: ElementId, target: ElementId) -> Result<Vec<ElementId>> {
        if source == target {
            return Ok(Vec::new());
        }
        let origin = self.get(source)?;
        let destination = self.get(target)?;
        if origin.is_container() != destination.is_container() {
            return Err(LayoutError::KindMismatch {
                source_id: source,
                target_id: target,
            });
        }

        let copied = origin.shallow_clone(target);
        let destination = self.get_mut(target)?;
        copied.copy_attributes_to(destination);

        let ElementKind::Container(layout) = copied.kind else {
            return Ok(Vec::new());
        };
        let evicted = {
            let container = self.container_mut(target)?;
            container.elastic = layout.elastic;
            container.default_align_x = layout.default_align_x;
            container.default_align_y = layout.default_align_y;
            container.arrangement = layout.arrangement;
            container.resize(layout.size())
        };
        for &id in &evicted {
            self.unlink(id)?;
        }
        self.relayout_children(target)?;
        self.check_container(target);
        Ok(evicted)
    }

    /// Detached copy of `source` with a fresh id. A container copy has the
    /// same slot count but no children.
    pub fn clone_element(&mut self, source: ElementId) -> Result<ElementId> {
        let id = self.next_id();
        let clone = self.get(source)?.shallow_clone(id);
        Ok(self.insert(clone))
    }

    /// Detached deep copy of the subtree rooted at `source`. Every descendant
    /// is a new element; geometry is copied as is.
    pub fn recursive_copy(&mut self, source: ElementId) -> Result<ElementId> {
        let root = self.clone_element(source)?;
        let children: Vec<(usize, ElementId)> = self.container(source).map_or_else(
            |_| Vec::new(),
            |container| container.children().collect(),
        );
        for (index, child) in children {
            let copy = self.recursive_copy(child)?;
            self.link(root, index, copy)?;
        }
        debug!("Copied subtree {} into {}", source, root);
        Ok(root)
    }

    /// Turns `target` into a deep copy of `source`. Its previous children are
    /// unlinked and returned; they stay in the tree as roots.
    pub fn recursive_copy_into(&mut self, source: ElementId, target: ElementId) -> Result<Vec<ElementId>> {
        if source == target || self.is_ancestor(source, target) {
            return Err(LayoutError::CyclicInsertion(target));
        }
        if self.get(source)?.is_container() != self.get(target)?.is_container() {
            return Err(LayoutError::KindMismatch {
                source_id: source,
                target_id: target,
            });
        }

        let mut evicted = Vec::new();
        for child in self.children(target)? {
            if let Some(index) = self.get(child)?.slot_index {
                self.container_mut(target)?.take(index);
                self.unlink(child)?;
                evicted.push(child);
            }
        }
        evicted.extend(self.copy_into(source, target)?);

        let children: Vec<(usize, ElementId)> = self.container(source).map_or_else(
            |_| Vec::new(),
            |container| container.children().collect(),
        );
        for (index, child) in children {
            let copy = self.recursive_copy(child)?;
            self.link(target, index, copy)?;
        }
        if self.get(target)?.is_container() {
            self.check_container(target);
        }
        Ok(evicted)
    }

    /// Deletes one element. It is removed from its parent first; its children
    /// become roots.
    pub fn delete(&mut self, id: ElementId) -> Result<()> {
        self.detach(id)?;
        for child in self.children(id)? {
            self.unlink(child)?;
        }
        self.remove_from_arena(id);
        debug!("Deleted element {}", id);
        Ok(())
    }

    /// Deletes `id` and its whole subtree. Returns how many elements went.
    pub fn recursive_delete(&mut self, id: ElementId) -> Result<usize> {
        self.detach(id)?;
        let doomed = self.subtree(id)?;
        for &element in &doomed {
            self.remove_from_arena(element);
        }
        debug!("Deleted subtree {} ({} elements)", id, doomed.len());
        Ok(doomed.len())
    }

    /// Removes `id` from its parent, if it has one.
    fn detach(&mut self, id: ElementId) -> Result<()> {
        let element = self.get(id)?;
        if let (Some(parent), Some(index)) = (element.parent, element.slot_index) {
            self.remove_element_at(parent, index)?;
        }
        Ok(())
    }

    /// Visible children of a container in painting order: highest depth first,
    /// ties broken by slot order.
    pub fn paint_order(&self, container: ElementId) -> Result<Vec<ElementId>> {
        let mut visible = Vec::new();
        for (index, child) in self.container(container)?.children() {
            let element = self.get(child)?;
            if element.visible {
                visible.push((Reverse(element.depth), index, child));
            }
        }
        visible.sort_unstable();
        Ok(visible.into_iter().map(|(_, _, child)| child).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use slotframe_core::{EngineConfig, Rect};

    fn strict_tree() -> ElementTree {
        ElementTree::new().with_config(EngineConfig::strict())
    }

    /// root(horizontal 200x100) -> [leaf a, vertical col -> [leaf b, leaf c]]
    fn sample(tree: &mut ElementTree) -> (ElementId, ElementId, ElementId, ElementId, ElementId) {
        let root = tree.create_horizontal("root");
        tree.set_content_size(root, 200.0, 100.0).unwrap();
        let a = tree.create_leaf("a");
        let col = tree.create_vertical("col");
        let b = tree.create_leaf("b");
        let c = tree.create_leaf("c");
        tree.add_element(root, a).unwrap();
        tree.add_element(root, col).unwrap();
        tree.add_element(col, b).unwrap();
        tree.add_element(col, c).unwrap();
        (root, a, col, b, c)
    }

    #[test]
    fn test_subtree_preorder() {
        let mut tree = strict_tree();
        let (root, a, col, b, c) = sample(&mut tree);
        assert_eq!(tree.subtree(root).unwrap(), vec![root, a, col, b, c]);
        assert_eq!(tree.descendants(col).unwrap(), vec![b, c]);
        assert_eq!(tree.children(a).unwrap(), Vec::<ElementId>::new());
    }

    #[test]
    fn test_recursive_match_content_to_slot_fills_tree() {
        let mut tree = strict_tree();
        let (root, _, col, b, c) = sample(&mut tree);
        tree.recursive_match_content_to_slot(col).unwrap();
        assert_eq!(tree.get(col).unwrap().content(), Rect::new(100.0, 0.0, 100.0, 100.0));
        assert_eq!(tree.get(b).unwrap().content(), Rect::new(100.0, 0.0, 100.0, 50.0));
        assert_eq!(tree.get(c).unwrap().content(), Rect::new(100.0, 50.0, 100.0, 50.0));

        // moving the root content drags the whole tree along
        tree.set_content_position(root, 0.0, 10.0).unwrap();
        assert_eq!(tree.get(col).unwrap().content().position, Vec2::new(100.0, 10.0));
        assert_eq!(tree.get(c).unwrap().content().position, Vec2::new(100.0, 60.0));
    }

    #[test]
    fn test_recursive_align_to() {
        let mut tree = strict_tree();
        let (root, a, _, b, _) = sample(&mut tree);
        tree.set_slot_size(root, 200.0, 100.0).unwrap();
        tree.set_content_size(a, 10.0, 10.0).unwrap();
        tree.recursive_align_to(root, Alignment::Center, Alignment::Bottom).unwrap();
        assert_eq!(tree.get(a).unwrap().content().position, Vec2::new(45.0, 90.0));
        assert_eq!(tree.get(b).unwrap().alignment_x(), Alignment::Center);
    }

    #[test]
    fn test_recursive_set_draw_target() {
        let mut tree = strict_tree();
        let (root, a, _, _, c) = sample(&mut tree);
        tree.recursive_set_draw_target(root, Some(DrawTarget(3))).unwrap();
        assert_eq!(tree.get(a).unwrap().draw_target(), Some(DrawTarget(3)));
        assert_eq!(tree.get(c).unwrap().draw_target(), Some(DrawTarget(3)));
    }

    #[test]
    fn test_recursive_copy_allocates_fresh_children() {
        let mut tree = strict_tree();
        let (root, _, col, b, _) = sample(&mut tree);
        let before = tree.len();
        let copy = tree.recursive_copy(root).unwrap();
        assert_eq!(tree.len(), before * 2);
        assert_eq!(tree.get(copy).unwrap().parent(), None);

        let copied_col = tree.container(copy).unwrap().element_at(1).unwrap();
        assert_ne!(copied_col, col);
        assert_eq!(tree.get(copied_col).unwrap().parent(), Some(copy));
        assert_eq!(tree.get(copied_col).unwrap().slot_index(), Some(1));

        let copied_b = tree.container(copied_col).unwrap().element_at(0).unwrap();
        assert_ne!(copied_b, b);
        assert_eq!(tree.get(copied_b).unwrap().slot(), tree.get(b).unwrap().slot());
        assert_eq!(tree.get(copied_b).unwrap().name(), "b");
        assert!(tree.verify_container(copy).unwrap());
        assert!(tree.verify_container(copied_col).unwrap());
        // the source is untouched
        assert_eq!(tree.container(col).unwrap().element_at(0), Some(b));
    }

    #[test]
    fn test_copy_into_kind_mismatch() {
        let mut tree = strict_tree();
        let leaf = tree.create_leaf("leaf");
        let free = tree.create_free("free");
        assert_eq!(
            tree.copy_into(leaf, free),
            Err(LayoutError::KindMismatch {
                source_id: leaf,
                target_id: free
            })
        );
    }

    #[test]
    fn test_copy_into_keeps_links() {
        let mut tree = strict_tree();
        let (root, a, _, _, _) = sample(&mut tree);
        let other = tree.create_leaf("other");
        tree.set_depth(other, 4).unwrap();
        tree.set_content_size(other, 7.0, 7.0).unwrap();
        tree.copy_into(other, a).unwrap();

        let copied = tree.get(a).unwrap();
        assert_eq!(copied.name(), "other");
        assert_eq!(copied.depth(), 4);
        assert_eq!(copied.parent(), Some(root));
        assert_eq!(copied.slot_index(), Some(0));
    }

    #[test]
    fn test_recursive_copy_into_replaces_children() {
        let mut tree = strict_tree();
        let (_, _, col, b, c) = sample(&mut tree);
        let target = tree.create_vertical("target");
        let stale = tree.create_leaf("stale");
        tree.add_element(target, stale).unwrap();

        let evicted = tree.recursive_copy_into(col, target).unwrap();
        assert_eq!(evicted, vec![stale]);
        assert_eq!(tree.get(stale).unwrap().parent(), None);

        let layout = tree.container(target).unwrap();
        assert_eq!(layout.element_count(), 2);
        let first = layout.element_at(0).unwrap();
        assert_ne!(first, b);
        assert_ne!(first, c);
        assert_eq!(tree.get(target).unwrap().name(), "col");
        assert!(tree.verify_container(target).unwrap());

        assert_eq!(
            tree.recursive_copy_into(col, b),
            Err(LayoutError::CyclicInsertion(b))
        );
    }

    #[test]
    fn test_delete_orphans_children() {
        let mut tree = strict_tree();
        let (root, _, col, b, c) = sample(&mut tree);
        tree.delete(col).unwrap();
        assert!(!tree.contains(col));
        assert_eq!(tree.get(b).unwrap().parent(), None);
        assert_eq!(tree.get(c).unwrap().slot_index(), None);
        assert_eq!(tree.container(root).unwrap().element_count(), 1);
        assert!(tree.verify_container(root).unwrap());
    }

    #[test]
    fn test_recursive_delete_total() {
        let mut tree = strict_tree();
        let (root, a, col, _, _) = sample(&mut tree);
        assert_eq!(tree.recursive_delete(col).unwrap(), 3);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.container(root).unwrap().child_ids(), vec![a]);
        assert_eq!(tree.recursive_delete(root).unwrap(), 2);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_paint_order_depth_then_slot() {
        let mut tree = strict_tree();
        let free = tree.create_free("free");
        let leaves: Vec<ElementId> = [3, 1, 2]
            .iter()
            .map(|&depth| {
                let leaf = tree.create_leaf("leaf");
                tree.set_depth(leaf, depth).unwrap();
                tree.add_element(free, leaf).unwrap();
                leaf
            })
            .collect();
        assert_eq!(
            tree.paint_order(free).unwrap(),
            vec![leaves[0], leaves[2], leaves[1]]
        );

        let tie = tree.create_leaf("tie");
        tree.set_depth(tie, 2).unwrap();
        tree.add_element(free, tie).unwrap();
        tree.set_visibility(leaves[1], false).unwrap();
        assert_eq!(
            tree.paint_order(free).unwrap(),
            vec![leaves[0], leaves[2], tie]
        );
    }
}
