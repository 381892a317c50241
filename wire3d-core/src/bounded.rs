/// Cap on the up-front reservation; larger limits grow on demand
const MAX_PREALLOCATION: usize = 1 << 16;

/// Fixed-capacity sequence that refuses, and counts, pushes past its limit
#[derive(Debug, Clone)]
pub struct Bounded<T> {
    items: Vec<T>,
    limit: usize,
    rejected: usize,
}

impl<T> Bounded<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            items: Vec::with_capacity(limit.min(MAX_PREALLOCATION)),
            limit,
            rejected: 0,
        }
    }

    /// Store `item`, or hand it back if the buffer is already full.
    pub fn try_push(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            self.rejected += 1;
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.limit
    }

    /// Number of pushes refused since creation or the last `clear`
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.rejected = 0;
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut buffer = Bounded::new(2);
        assert!(buffer.try_push(1).is_ok());
        assert!(!buffer.is_full());
        assert!(buffer.try_push(2).is_ok());
        assert!(buffer.is_full());

        assert_eq!(buffer.try_push(3), Err(3));
        assert_eq!(buffer.try_push(4), Err(4));
        assert_eq!(buffer.rejected(), 2);
        assert_eq!(buffer.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_clear_resets_rejections() {
        let mut buffer = Bounded::new(1);
        buffer.try_push('a').unwrap();
        buffer.try_push('b').unwrap_err();

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.rejected(), 0);
        assert_eq!(buffer.limit(), 1);
    }

    #[test]
    fn test_zero_limit_refuses_everything() {
        let mut buffer = Bounded::new(0);
        assert!(buffer.is_full());
        assert_eq!(buffer.try_push(7), Err(7));
        assert!(buffer.into_vec().is_empty());
    }
}
