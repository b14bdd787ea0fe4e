//! Copy-on-write edits over the nested subtask tree.
//!
//! Every edit returns a new tree, or `None` when the target id is not in the
//! tree. Only the nodes on the path from the root to the target are rebuilt;
//! every other node is cloned unchanged.

use shared::Subtask;

/// Appends `child` under the subtask `parent_id`, at any depth.
pub fn append_child(nodes: &[Subtask], parent_id: &str, child: Subtask) -> Option<Vec<Subtask>> {
    let mut child = Some(child);
    rewrite(nodes, parent_id, &mut |node| {
        let mut node = node.clone();
        node.subtasks.extend(child.take());
        Some(node)
    })
}

/// Flips `completed` on the subtask `id`, at any depth.
pub fn toggle(nodes: &[Subtask], id: &str) -> Option<Vec<Subtask>> {
    rewrite(nodes, id, &mut |node| {
        Some(Subtask {
            completed: !node.completed,
            ..node.clone()
        })
    })
}

/// Drops the subtask `id` together with everything below it.
pub fn remove(nodes: &[Subtask], id: &str) -> Option<Vec<Subtask>> {
    rewrite(nodes, id, &mut |_| None)
}

pub fn find<'a>(nodes: &'a [Subtask], id: &str) -> Option<&'a Subtask> {
    nodes.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find(&node.subtasks, id)
        }
    })
}

/// Total number of subtasks at every depth.
pub fn count(nodes: &[Subtask]) -> usize {
    nodes.iter().map(|node| 1 + count(&node.subtasks)).sum()
}

/// Replaces the node `target` with whatever `edit` returns (`None` removes
/// it), rebuilding each ancestor on the way back up.
fn rewrite<F>(nodes: &[Subtask], target: &str, edit: &mut F) -> Option<Vec<Subtask>>
where
    F: FnMut(&Subtask) -> Option<Subtask>,
{
    for (index, node) in nodes.iter().enumerate() {
        if node.id == target {
            let mut rebuilt = Vec::with_capacity(nodes.len());
            rebuilt.extend_from_slice(&nodes[..index]);
            rebuilt.extend(edit(node));
            rebuilt.extend_from_slice(&nodes[index + 1..]);
            return Some(rebuilt);
        }
        if let Some(children) = rewrite(&node.subtasks, target, edit) {
            let mut rebuilt = nodes.to_vec();
            rebuilt[index] = Subtask {
                id: node.id.clone(),
                text: node.text.clone(),
                completed: node.completed,
                subtasks: children,
            };
            return Some(rebuilt);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> Subtask {
        Subtask {
            id: id.to_string(),
            text: format!("text {id}"),
            completed: false,
            subtasks: Vec::new(),
        }
    }

    fn node(id: &str, children: Vec<Subtask>) -> Subtask {
        Subtask {
            subtasks: children,
            ..leaf(id)
        }
    }

    /// a -> (b -> (c -> d), e), f
    fn tree() -> Vec<Subtask> {
        vec![
            node(
                "a",
                vec![node("b", vec![node("c", vec![leaf("d")])]), leaf("e")],
            ),
            leaf("f"),
        ]
    }

    #[test]
    fn append_at_depth() {
        let updated = append_child(&tree(), "c", leaf("new")).unwrap();
        let c = find(&updated, "c").unwrap();
        assert_eq!(
            c.subtasks.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            vec!["d", "new"]
        );
        assert_eq!(count(&updated), count(&tree()) + 1);
    }

    #[test]
    fn append_to_missing_parent_is_none() {
        assert!(append_child(&tree(), "zzz", leaf("new")).is_none());
    }

    #[test]
    fn toggle_flips_only_the_target() {
        let original = tree();
        let updated = toggle(&original, "d").unwrap();
        assert!(find(&updated, "d").unwrap().completed);
        for id in ["a", "b", "c", "e", "f"] {
            assert!(!find(&updated, id).unwrap().completed, "{id} changed");
            assert_eq!(find(&updated, id).unwrap().text, find(&original, id).unwrap().text);
        }
        // the input is untouched
        assert!(!find(&original, "d").unwrap().completed);

        let back = toggle(&updated, "d").unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn toggle_top_level() {
        let updated = toggle(&tree(), "f").unwrap();
        assert!(updated[1].completed);
        assert_eq!(updated[0], tree()[0]);
    }

    #[test]
    fn remove_drops_whole_subtree() {
        let updated = remove(&tree(), "b").unwrap();
        for id in ["b", "c", "d"] {
            assert!(find(&updated, id).is_none(), "{id} still present");
        }
        assert!(find(&updated, "e").is_some());
        assert_eq!(count(&updated), 3);
    }

    #[test]
    fn remove_missing_is_none() {
        assert!(remove(&tree(), "nope").is_none());
        assert!(toggle(&[], "nope").is_none());
    }
}
