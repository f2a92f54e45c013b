/// Selects every `divide`-th input line, starting at `modulo`.
///
/// Used to split one feature file across several processes; each process
/// gets the same `divide` and a distinct `modulo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShardFilter {
    divide: usize,
    modulo: usize,
}

impl Default for ShardFilter {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl ShardFilter {
    /// A `divide` of zero is treated as one.
    pub fn new(divide: usize, modulo: usize) -> Self {
        Self {
            divide: divide.max(1),
            modulo,
        }
    }

    pub fn divide(&self) -> usize {
        self.divide
    }

    pub fn modulo(&self) -> usize {
        self.modulo
    }

    /// Returns true if the line at (zero based) `index` belongs to this
    /// shard.
    pub fn accepts(&self, index: usize) -> bool {
        index % self.divide == self.modulo % self.divide
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_third_line() {
        let filter = ShardFilter::new(3, 1);
        let kept: Vec<_> = (0..9).filter(|&j| filter.accepts(j)).collect();
        assert_eq!(kept, [1, 4, 7]);
    }

    #[test]
    fn modulo_wraps() {
        let filter = ShardFilter::new(3, 4);
        let kept: Vec<_> = (0..6).filter(|&j| filter.accepts(j)).collect();
        assert_eq!(kept, [1, 4]);
    }

    #[test]
    fn default_keeps_everything() {
        let filter = ShardFilter::default();
        assert!((0..10).all(|j| filter.accepts(j)));
        assert_eq!(ShardFilter::new(0, 0), filter);
    }
}
