//! Menu tree
//!
//! Built once per editor session from the `GetMenus` payload and never
//! mutated afterwards. Parents may appear after their children in the
//! input; every ordering method preserves input order.

use std::collections::{HashMap, HashSet};

use shared::models::{MenuId, MenuNode};

use crate::error::{EditorError, EditorResult};

/// A menu left out of the tree because its ancestry is broken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedMenu {
    pub menu_id: MenuId,
    pub reason: String,
}

/// Validated menu forest
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    nodes: Vec<MenuNode>,
    index: HashMap<MenuId, usize>,
    children: HashMap<MenuId, Vec<usize>>,
    dropped: Vec<DroppedMenu>,
}

impl MenuTree {
    /// Tree with no menus (used when the menu fetch fails)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a tree from the menu list
    ///
    /// Duplicate ids reject the whole list. A menu whose parent chain hits a
    /// missing parent, itself or a cycle is dropped along with everything
    /// below it; the rest of the forest is kept.
    pub fn new(nodes: Vec<MenuNode>) -> EditorResult<Self> {
        let mut by_id: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if by_id.insert(node.id.as_str(), i).is_some() {
                return Err(EditorError::InvalidMenuTree(format!(
                    "duplicate menu id {}",
                    node.id
                )));
            }
        }

        let mut verdicts: Vec<Option<Result<(), String>>> = vec![None; nodes.len()];
        for start in 0..nodes.len() {
            let mut path = Vec::new();
            let mut on_path = HashSet::new();
            let mut current = start;
            let verdict = loop {
                if let Some(settled) = &verdicts[current] {
                    break settled.clone();
                }
                if !on_path.insert(current) {
                    break Err(format!("cycle through menu {}", nodes[current].id));
                }
                path.push(current);
                let node = &nodes[current];
                match &node.parent_id {
                    None => break Ok(()),
                    Some(parent) if parent == &node.id => {
                        break Err(format!("menu {} is its own parent", node.id));
                    }
                    Some(parent) => match by_id.get(parent.as_str()) {
                        Some(&i) => current = i,
                        None => {
                            break Err(format!(
                                "menu {} references missing parent {}",
                                node.id, parent
                            ));
                        }
                    },
                }
            };
            for i in path {
                verdicts[i] = Some(verdict.clone());
            }
        }

        let mut tree = Self::default();
        for (node, verdict) in nodes.into_iter().zip(verdicts) {
            match verdict {
                Some(Err(reason)) => {
                    tracing::warn!(menu_id = %node.id, %reason, "Dropping menu from tree");
                    tree.dropped.push(DroppedMenu {
                        menu_id: node.id,
                        reason,
                    });
                }
                _ => {
                    tree.index.insert(node.id.clone(), tree.nodes.len());
                    tree.nodes.push(node);
                }
            }
        }
        for (i, node) in tree.nodes.iter().enumerate() {
            if let Some(parent) = &node.parent_id {
                tree.children.entry(parent.clone()).or_default().push(i);
            }
        }
        Ok(tree)
    }

    /// Menus left out by [`MenuTree::new`], in input order
    pub fn dropped(&self) -> &[DroppedMenu] {
        &self.dropped
    }

    /// Menus without a parent, in input order
    pub fn top_level(&self) -> Vec<&MenuNode> {
        self.nodes.iter().filter(|n| n.is_top_level()).collect()
    }

    /// Direct children of `parent_id`, in input order
    ///
    /// `filter` is a case-insensitive substring match on the child's name;
    /// an empty filter matches everything.
    pub fn children_of(&self, parent_id: &str, filter: Option<&str>) -> Vec<&MenuNode> {
        let needle = filter.filter(|f| !f.is_empty()).map(str::to_lowercase);

        self.children
            .get(parent_id)
            .map(|idx| {
                idx.iter()
                    .map(|&i| &self.nodes[i])
                    .filter(|n| match &needle {
                        Some(needle) => n.name.to_lowercase().contains(needle.as_str()),
                        None => true,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ids of the direct children of `parent_id`
    pub fn child_ids(&self, parent_id: &str) -> Vec<MenuId> {
        self.children_of(parent_id, None)
            .into_iter()
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&MenuNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn has_children(&self, id: &str) -> bool {
        self.children.get(id).is_some_and(|c| !c.is_empty())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuNode> {
        self.nodes.iter()
    }
}
