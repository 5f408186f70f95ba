use std::collections::VecDeque;

/// A ring of the last `max` items pushed
#[derive(Debug)]
pub struct Queue<T> {
    max: usize,
    queue: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::with_capacity(500)
    }
}

impl<T> Queue<T> {
    pub fn with_capacity(max: usize) -> Self {
        assert!(max != 0, "a queue must hold at least one item");
        Self {
            queue: VecDeque::with_capacity(max),
            max,
        }
    }

    /// Pushes `item`, dropping the oldest items to make room
    pub fn push(&mut self, item: T) {
        while self.queue.len() >= self.max {
            self.queue.pop_front();
        }
        self.queue.push_back(item)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + ExactSizeIterator + DoubleEndedIterator {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Queue;

    #[test]
    fn oldest_fall_off() {
        let mut queue = Queue::with_capacity(3);
        for i in 0..5 {
            queue.push(i);
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);

        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    #[should_panic]
    fn zero_capacity() {
        Queue::<()>::with_capacity(0);
    }
}
