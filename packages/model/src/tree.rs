//! # Persistent Tree Operations
//!
//! Every operation takes a root and returns a new root. Only the nodes on the
//! path from the root to the touched node are rebuilt; every other subtree is
//! shared with the input (`Arc::ptr_eq` holds for it), so an edit costs
//! O(depth) allocations plus the fan-out of each node on the path.

use crate::element::Element;
use crate::error::TreeError;
use std::sync::Arc;

/// Find an element by id anywhere under `root` (inclusive)
pub fn find<'a>(root: &'a Arc<Element>, id: &str) -> Option<&'a Arc<Element>> {
    if root.id == id {
        return Some(root);
    }

    root.children()?
        .iter()
        .find_map(|child| find(child, id))
}

/// Find the parent of the element with `id`
pub fn find_parent<'a>(root: &'a Arc<Element>, id: &str) -> Option<&'a Arc<Element>> {
    let children = root.children()?;
    if children.iter().any(|child| child.id == id) {
        return Some(root);
    }

    children.iter().find_map(|child| find_parent(child, id))
}

pub fn contains(root: &Arc<Element>, id: &str) -> bool {
    find(root, id).is_some()
}

/// Ids from the root down to the element with `id`, inclusive
pub fn path_to(root: &Arc<Element>, id: &str) -> Option<Vec<String>> {
    if root.id == id {
        return Some(vec![root.id.clone()]);
    }

    for child in root.children()? {
        if let Some(mut path) = path_to(child, id) {
            path.insert(0, root.id.clone());
            return Some(path);
        }
    }

    None
}

/// Append `child` to the children of the container with `container_id`
pub fn insert_child(
    root: &Arc<Element>,
    container_id: &str,
    child: Arc<Element>,
) -> Result<Arc<Element>, TreeError> {
    rebuild(root, container_id, &mut |target| match target.children() {
        Some(children) => {
            let mut next = children.to_vec();
            next.push(child.clone());
            Ok(Some(Arc::new(target.with_children_replaced(next))))
        }
        None => Err(TreeError::NotAContainer(target.id.clone())),
    })
    .and_then(|updated| updated.ok_or_else(|| TreeError::NotFound(container_id.to_string())))
}

/// Replace the element that has the same id as `replacement`, keeping its position
pub fn replace(root: &Arc<Element>, replacement: Arc<Element>) -> Result<Arc<Element>, TreeError> {
    let id = replacement.id.clone();
    rebuild(root, &id, &mut |_| Ok(Some(replacement.clone())))
        .and_then(|updated| updated.ok_or(TreeError::NotFound(id.clone())))
}

/// Detach the element with `id` (and its subtree) from its parent
///
/// Returns the new root and the removed subtree.
pub fn remove(root: &Arc<Element>, id: &str) -> Result<(Arc<Element>, Arc<Element>), TreeError> {
    if root.id == id {
        return Err(TreeError::RootImmutable);
    }

    let parent = find_parent(root, id).ok_or_else(|| TreeError::NotFound(id.to_string()))?;
    let parent_id = parent.id.clone();
    let mut removed = None;

    let updated = rebuild(root, &parent_id, &mut |target| {
        let children = target.children().unwrap_or_default();
        let mut next = Vec::with_capacity(children.len().saturating_sub(1));
        for child in children {
            if child.id == id && removed.is_none() {
                removed = Some(child.clone());
            } else {
                next.push(child.clone());
            }
        }
        Ok(Some(Arc::new(target.with_children_replaced(next))))
    })?;

    match (updated, removed) {
        (Some(new_root), Some(removed)) => Ok((new_root, removed)),
        _ => Err(TreeError::NotFound(id.to_string())),
    }
}

/// Rebuild the path from `node` to `target_id`, swapping the target for what
/// `edit` returns. `Ok(None)` means the target is not under `node`.
fn rebuild<F>(
    node: &Arc<Element>,
    target_id: &str,
    edit: &mut F,
) -> Result<Option<Arc<Element>>, TreeError>
where
    F: FnMut(&Arc<Element>) -> Result<Option<Arc<Element>>, TreeError>,
{
    if node.id == target_id {
        return edit(node);
    }

    let Some(children) = node.children() else {
        return Ok(None);
    };

    for (index, child) in children.iter().enumerate() {
        if let Some(updated) = rebuild(child, target_id, edit)? {
            let mut next = children.to_vec();
            next[index] = updated;
            return Ok(Some(Arc::new(node.with_children_replaced(next))));
        }
    }

    Ok(None)
}
