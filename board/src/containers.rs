//! Traversal containers mirroring the task list.
//!
//! None of these are authoritative: [`TaskMirrors`] is rebuilt from the
//! store's task list after every change.

use std::collections::{linked_list, vec_deque, LinkedList, VecDeque};

use shared::Task;

/// Doubly linked list with O(1) operations at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct DoublyLinkedList<T> {
    nodes: LinkedList<T>,
}

impl<T> DoublyLinkedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: LinkedList::new(),
        }
    }

    pub fn append(&mut self, value: T) {
        self.nodes.push_back(value);
    }

    pub fn prepend(&mut self, value: T) {
        self.nodes.push_front(value);
    }

    pub fn remove_head(&mut self) -> Option<T> {
        self.nodes.pop_front()
    }

    pub fn remove_last(&mut self) -> Option<T> {
        self.nodes.pop_back()
    }

    pub fn head(&self) -> Option<&T> {
        self.nodes.front()
    }

    pub fn tail(&self) -> Option<&T> {
        self.nodes.back()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Head to tail.
    pub fn iter(&self) -> linked_list::Iter<'_, T> {
        self.nodes.iter()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.nodes.iter().cloned().collect()
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// LIFO stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// FIFO queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Front to back.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The task list copied into each traversal container, in store order.
#[derive(Debug, Clone, Default)]
pub struct TaskMirrors {
    pub list: DoublyLinkedList<Task>,
    pub stack: Stack<Task>,
    pub queue: Queue<Task>,
}

impl TaskMirrors {
    pub fn rebuild(tasks: &[Task]) -> Self {
        let mut mirrors = Self::default();
        for task in tasks {
            mirrors.list.append(task.clone());
            mirrors.stack.push(task.clone());
            mirrors.queue.enqueue(task.clone());
        }
        mirrors
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TaskStatus;

    #[test]
    fn linked_list_both_ends() {
        let mut list = DoublyLinkedList::new();
        list.append(2);
        list.append(3);
        list.prepend(1);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert_eq!(list.remove_head(), Some(1));
        assert_eq!(list.remove_last(), Some(3));
        assert_eq!(list.head(), list.tail());
        assert_eq!(list.remove_last(), Some(2));
        assert!(list.is_empty());
        assert_eq!(list.remove_head(), None);
    }

    #[test]
    fn stack_and_queue_order() {
        let mut stack = Stack::new();
        let mut queue = Queue::new();
        for n in 1..=3 {
            stack.push(n);
            queue.enqueue(n);
        }
        assert_eq!(stack.peek(), Some(&3));
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(queue.peek(), Some(&1));
        assert_eq!(queue.dequeue(), Some(1));
        assert_eq!((stack.len(), queue.len()), (2, 2));
        stack.clear();
        assert!(stack.is_empty());
    }

    #[test]
    fn mirrors_follow_store_order() {
        let tasks = vec![
            Task::new("a", "", TaskStatus::Pending),
            Task::new("b", "", TaskStatus::Completed),
        ];
        let mirrors = TaskMirrors::rebuild(&tasks);
        assert_eq!(mirrors.len(), 2);
        assert_eq!(mirrors.list.head().map(|t| t.title.as_str()), Some("a"));
        assert_eq!(mirrors.stack.peek().map(|t| t.title.as_str()), Some("b"));
        assert_eq!(mirrors.queue.peek().map(|t| t.title.as_str()), Some("a"));

        let empty = TaskMirrors::rebuild(&[]);
        assert!(empty.is_empty());
    }
}
