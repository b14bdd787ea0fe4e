mod common;

use board::subtree;
use board::{BoardError, RemoteOp, Severity};
use common::{harness, harness_with, row};
use shared::{Subtask, TaskStatus};

/// Adds a chain of `depth` subtasks, each nested in the previous one, and
/// returns their ids from the top down.
async fn nest(h: &mut common::Harness, task_id: &str, depth: usize) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for level in 0..depth {
        let parent = ids.last().map(String::as_str);
        let subtask = h
            .store
            .add_subtask(task_id, &format!("level {level}"), parent)
            .await
            .unwrap();
        ids.push(subtask.id);
    }
    ids
}

#[tokio::test]
async fn nested_subtasks_are_written_through() {
    let mut h = harness();
    let task = h
        .store
        .create("A", "", TaskStatus::Pending)
        .await
        .unwrap();

    let ids = nest(&mut h, &task.id, 3).await;

    let local = h.store.get(&task.id).unwrap().subtasks.clone();
    assert_eq!(subtree::count(&local), 3);
    assert_eq!(local[0].id, ids[0]);
    assert_eq!(local[0].subtasks[0].subtasks[0].id, ids[2]);
    assert_eq!(h.remote.row(&task.id).unwrap().subtasks, local);
    assert_eq!(h.remote.calls(RemoteOp::Update), 3);
}

#[tokio::test]
async fn toggle_at_depth_flips_only_that_node() {
    let mut h = harness();
    let task = h
        .store
        .create("A", "", TaskStatus::Pending)
        .await
        .unwrap();
    let ids = nest(&mut h, &task.id, 4).await;
    let sibling = h
        .store
        .add_subtask(&task.id, "sibling", Some(ids[2].as_str()))
        .await
        .unwrap();
    let before = h.store.get(&task.id).unwrap().subtasks.clone();

    let completed = h.store.toggle_subtask(&task.id, &ids[3]).await.unwrap();

    assert!(completed);
    let after = h.store.get(&task.id).unwrap().subtasks.clone();
    assert!(subtree::find(&after, &ids[3]).unwrap().completed);
    assert_eq!(
        subtree::find(&after, &sibling.id),
        subtree::find(&before, &sibling.id)
    );
    for id in &ids[..3] {
        let (old, new) = (
            subtree::find(&before, id).unwrap(),
            subtree::find(&after, id).unwrap(),
        );
        assert_eq!((&old.text, old.completed), (&new.text, new.completed));
    }
    assert_eq!(h.remote.row(&task.id).unwrap().subtasks, after);

    assert!(!h.store.toggle_subtask(&task.id, &ids[3]).await.unwrap());
}

#[tokio::test]
async fn removing_a_subtask_drops_its_descendants() {
    let mut h = harness();
    let task = h
        .store
        .create("A", "", TaskStatus::Pending)
        .await
        .unwrap();
    let ids = nest(&mut h, &task.id, 3).await;
    let keep = h.store.add_subtask(&task.id, "keep", None).await.unwrap();

    h.store.remove_subtask(&task.id, &ids[0]).await.unwrap();

    let subtasks = h.store.get(&task.id).unwrap().subtasks.clone();
    assert_eq!(subtasks, vec![keep]);
    for id in &ids {
        assert!(subtree::find(&subtasks, id).is_none());
    }
    assert_eq!(h.remote.row(&task.id).unwrap().subtasks, subtasks);
}

/// Creates and undoes a throwaway task so the redo stack holds one entry.
async fn park_redo(h: &mut common::Harness) {
    h.store
        .create("scratch", "", TaskStatus::Pending)
        .await
        .unwrap();
    h.store.undo().await.unwrap();
    assert_eq!(h.store.history().redo_len(), 1);
}

#[tokio::test]
async fn subtask_edits_clear_redo_but_are_not_recorded() {
    let mut h = harness();
    let task = h
        .store
        .create("A", "", TaskStatus::Pending)
        .await
        .unwrap();

    park_redo(&mut h).await;
    let subtask = h.store.add_subtask(&task.id, "one", None).await.unwrap();
    assert_eq!(h.store.history().redo_len(), 0);

    park_redo(&mut h).await;
    h.store.toggle_subtask(&task.id, &subtask.id).await.unwrap();
    assert_eq!(h.store.history().redo_len(), 0);

    park_redo(&mut h).await;
    h.store.remove_subtask(&task.id, &subtask.id).await.unwrap();
    assert_eq!(h.store.history().redo_len(), 0);

    assert_eq!(h.store.history().undo_len(), 1);
    assert_eq!(h.store.tasks().len(), 1);
}

#[tokio::test]
async fn unknown_targets_never_reach_the_table() {
    let mut h = harness();
    let task = h
        .store
        .create("A", "", TaskStatus::Pending)
        .await
        .unwrap();

    let err = h
        .store
        .add_subtask(&task.id, "orphan", Some("missing"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BoardError::SubtaskNotFound { ref subtask_id, .. } if subtask_id == "missing"
    ));
    assert!(h
        .store
        .toggle_subtask(&task.id, "missing")
        .await
        .unwrap_err()
        .is_not_found());
    assert!(h
        .store
        .remove_subtask(&task.id, "missing")
        .await
        .unwrap_err()
        .is_not_found());
    assert!(matches!(
        h.store.add_subtask("nope", "text", None).await.unwrap_err(),
        BoardError::NotFound(_)
    ));

    assert_eq!(h.remote.calls(RemoteOp::Update), 0);
    assert_eq!(h.toasts.last().unwrap().severity, Severity::Error);
}

#[tokio::test]
async fn failed_subtask_write_reloads_from_the_table() {
    let mut parent = row("A", TaskStatus::Pending, 1);
    parent.subtasks.push(Subtask::new("from the table"));
    let mut h = harness_with(vec![parent.clone()]);
    h.store.load().await.unwrap();
    let selects = h.remote.calls(RemoteOp::Select);
    h.remote.fail_once(RemoteOp::Update);

    let err = h
        .store
        .add_subtask(&parent.id, "lost", None)
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert_eq!(h.remote.calls(RemoteOp::Select), selects + 1);
    assert_eq!(h.store.tasks(), vec![parent].as_slice());
    // the reload toast follows the error toast
    let messages = h.toasts.messages();
    assert!(messages.iter().any(|m| m.contains("injected update failure")));
    assert_eq!(messages.last().map(String::as_str), Some("Loaded 1 tasks"));
}

#[tokio::test]
async fn failed_reload_keeps_the_list_untouched() {
    let mut h = harness();
    let task = h
        .store
        .create("A", "", TaskStatus::Pending)
        .await
        .unwrap();
    h.remote.fail(RemoteOp::Update);
    h.remote.fail(RemoteOp::Select);

    assert!(h.store.toggle_subtask(&task.id, "missing").await.is_err());
    assert!(h.store.add_subtask(&task.id, "lost", None).await.is_err());

    assert_eq!(h.store.tasks(), vec![task].as_slice());
    assert_eq!(h.remote.calls(RemoteOp::Select), 1);
}
