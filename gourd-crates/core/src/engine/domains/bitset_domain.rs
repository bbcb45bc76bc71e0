use super::integer_change;
use super::integer_domain::FiniteDomain;
use super::DomainChange;
use super::EmptyDomain;
use super::Interval;
use super::IntervalDomain;

const WORD_BITS: usize = u64::BITS as usize;

/// An integer domain over a fixed universe `[offset, universe_max]`, storing one bit per value.
/// Suited for small, dense domains where many interior values get removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitSetDomain {
    offset: i32,
    universe_max: i32,
    words: Vec<u64>,
    size: u64,
}

impl BitSetDomain {
    /// Creates the domain `[lower_bound, upper_bound]`; the universe is fixed to this range.
    ///
    /// Panics if `lower_bound > upper_bound`.
    pub fn new(lower_bound: i32, upper_bound: i32) -> BitSetDomain {
        assert!(
            lower_bound <= upper_bound,
            "a bitset domain cannot start empty"
        );

        let num_values = (upper_bound as i64 - lower_bound as i64 + 1) as usize;
        let mut words = vec![u64::MAX; num_values.div_ceil(WORD_BITS)];

        let remainder = num_values % WORD_BITS;
        if remainder != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << remainder) - 1;
            }
        }

        BitSetDomain {
            offset: lower_bound,
            universe_max: upper_bound,
            words,
            size: num_values as u64,
        }
    }

    /// Creates a domain containing exactly the given values. Returns `None` when there are none.
    pub fn from_values(values: impl IntoIterator<Item = i32>) -> Option<BitSetDomain> {
        let values = IntervalDomain::from_values(values);
        let (first, last) = (values.first()?, values.last()?);

        let mut domain = BitSetDomain::new(first, last);
        let _ = domain.intersect_with(&values).ok()?;
        Some(domain)
    }

    fn index_of(&self, value: i32) -> Option<usize> {
        if value < self.offset || value > self.universe_max {
            None
        } else {
            Some((value as i64 - self.offset as i64) as usize)
        }
    }

    fn value_of(&self, index: usize) -> i32 {
        (self.offset as i64 + index as i64) as i32
    }

    fn is_set(&self, index: usize) -> bool {
        self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    fn clear(&mut self, index: usize) {
        self.words[index / WORD_BITS] &= !(1 << (index % WORD_BITS));
    }

    /// Iterates the indices of the set bits in increasing order.
    fn set_indices(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, &word)| {
                (0..WORD_BITS)
                    .filter(move |bit| word & (1 << bit) != 0)
                    .map(move |bit| word_index * WORD_BITS + bit)
            })
    }

    /// Iterates the values in increasing order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = i32> + '_ {
        self.set_indices().map(|index| self.value_of(index))
    }

    /// The values of the universe that are no longer in the domain.
    pub fn complement(&self) -> IntervalDomain {
        IntervalDomain::new(self.offset, self.universe_max).difference(&self.to_interval_domain())
    }

    /// Clears every set index for which `remove` holds, failing without modification if that
    /// would clear all of them.
    fn remove_where(
        &mut self,
        remove: impl Fn(i32) -> bool,
    ) -> Result<DomainChange, EmptyDomain> {
        let removed = self
            .set_indices()
            .filter(|&index| remove(self.value_of(index)))
            .collect::<Vec<_>>();

        if removed.len() as u64 == self.size {
            return Err(EmptyDomain);
        }
        if removed.is_empty() {
            return Ok(DomainChange::empty());
        }

        let before = (self.min(), self.max(), self.size);
        for index in removed.iter() {
            self.clear(*index);
        }
        self.size -= removed.len() as u64;

        Ok(integer_change(before, (self.min(), self.max(), self.size)))
    }
}

impl FiniteDomain for BitSetDomain {
    fn cardinality(&self) -> u64 {
        self.size
    }

    fn min(&self) -> i32 {
        let index = self
            .words
            .iter()
            .position(|&word| word != 0)
            .map(|word_index| {
                word_index * WORD_BITS + self.words[word_index].trailing_zeros() as usize
            })
            .unwrap_or_else(|| panic!("minimum of an empty bitset domain"));
        self.value_of(index)
    }

    fn max(&self) -> i32 {
        let index = self
            .words
            .iter()
            .rposition(|&word| word != 0)
            .map(|word_index| {
                word_index * WORD_BITS + (WORD_BITS - 1)
                    - self.words[word_index].leading_zeros() as usize
            })
            .unwrap_or_else(|| panic!("maximum of an empty bitset domain"));
        self.value_of(index)
    }

    fn contains(&self, value: i32) -> bool {
        self.index_of(value).is_some_and(|index| self.is_set(index))
    }

    fn remove_range(&mut self, lower: i32, upper: i32) -> Result<DomainChange, EmptyDomain> {
        self.remove_where(|value| lower <= value && value <= upper)
    }

    fn retain_range(&mut self, lower: i32, upper: i32) -> Result<DomainChange, EmptyDomain> {
        self.remove_where(|value| value < lower || value > upper)
    }

    fn intersect_with(&mut self, other: &IntervalDomain) -> Result<DomainChange, EmptyDomain> {
        self.remove_where(|value| !other.contains_value(value))
    }

    fn to_interval_domain(&self) -> IntervalDomain {
        IntervalDomain::from_intervals(self.values().map(|value| Interval::new(value, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domains::DomainEvent;

    #[test]
    fn new_domain_spanning_multiple_words() {
        let domain = BitSetDomain::new(-10, 100);

        assert_eq!(111, domain.cardinality());
        assert_eq!(-10, domain.min());
        assert_eq!(100, domain.max());
        assert!(domain.contains(63));
        assert!(!domain.contains(101));
        assert!(!domain.contains(-11));
    }

    #[test]
    fn removing_the_maximum_moves_to_the_previous_word() {
        let mut domain = BitSetDomain::new(0, 64);

        let change = domain.remove_value(64).expect("non-empty");

        assert_eq!(63, domain.max());
        assert!(change.contains(DomainEvent::UpperBound));
    }

    #[test]
    fn from_values_keeps_only_the_given_values() {
        let domain = BitSetDomain::from_values([3, 7, 5]).expect("non-empty");

        assert_eq!(vec![3, 5, 7], domain.values().collect::<Vec<_>>());
        assert_eq!(IntervalDomain::from_values([4, 6]), domain.complement());
    }

    #[test]
    fn from_no_values_is_none() {
        assert!(BitSetDomain::from_values([]).is_none());
    }

    #[test]
    fn values_outside_the_universe_are_ignored_on_removal() {
        let mut domain = BitSetDomain::new(0, 3);

        assert!(domain.remove_value(10).expect("non-empty").is_empty());
        assert!(domain.remove_value(-1).expect("non-empty").is_empty());
    }
}
