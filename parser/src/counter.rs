//! Allocation of command-line tokens to positional arguments.
//!
//! Arguments are filled from left to right. When the number of positional
//! tokens is unknown, every argument takes as many tokens as it can; the last
//! argument with a non-zero minimum is split into a mandatory part and an
//! optional remainder so that the arguments after it are reached as soon as
//! all minimums are met. When the number of tokens is known in advance, each
//! argument gets its minimum plus as much of the surplus as it can hold,
//! again from the left.

use crate::argument::ArgumentSpec;

#[derive(Debug, Clone, Default)]
pub(crate) struct ArgumentCounter {
    /// Remaining capacity and the index of the argument it belongs to.
    counters: Vec<(usize, usize)>,
    index: usize,
    first_optional: usize,
    count: usize,
}

impl ArgumentCounter {
    /// A counter for an unknown number of tokens.
    pub(crate) fn new(arguments: &[ArgumentSpec]) -> Self {
        let first_optional = arguments
            .iter()
            .rposition(|a| a.min_count > 0)
            .map_or(0, |i| i + 1);
        let mut counters = Vec::with_capacity(arguments.len() + 1);
        for (i, a) in arguments.iter().enumerate() {
            let (min, max) = (a.min_count as usize, a.max_count as usize);
            if i + 1 == first_optional && min != max {
                counters.push((min, i));
                counters.push((max - min, i));
            } else {
                counters.push((max, i));
            }
        }
        Self {
            counters,
            index: 0,
            first_optional,
            count: 0,
        }
    }

    /// A counter for exactly `n` tokens. Counts outside the valid range are
    /// clamped.
    pub(crate) fn with_count(arguments: &[ArgumentSpec], n: usize) -> Self {
        let (lo, hi) = Self::min_max_count(arguments);
        let mut surplus = if n < lo {
            0
        } else if n > hi {
            hi - lo
        } else {
            n - lo
        };

        let mut counters = Vec::with_capacity(arguments.len());
        for (i, a) in arguments.iter().enumerate() {
            let (min, max) = (a.min_count as usize, a.max_count as usize);
            if surplus == 0 || min == max {
                counters.push((min, i));
            } else if min + surplus <= max {
                counters.push((min + surplus, i));
                surplus = 0;
            } else {
                counters.push((max, i));
                surplus -= max - min;
            }
        }
        let first_optional = counters.len();
        Self {
            counters,
            index: 0,
            first_optional,
            count: 0,
        }
    }

    /// Index of the argument that receives the next token, if any.
    pub(crate) fn next_argument(&mut self) -> Option<usize> {
        while self.index < self.counters.len() && self.counters[self.index].0 == 0 {
            self.index += 1;
        }
        let (remaining, argument) = self.counters.get_mut(self.index)?;
        *remaining -= 1;
        self.count += 1;
        Some(*argument)
    }

    /// Number of tokens handed out so far.
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// `true` once every mandatory argument has received its minimum.
    pub(crate) fn is_complete(&self) -> bool {
        self.index >= self.first_optional
            || self.counters[self.index..self.first_optional]
                .iter()
                .all(|(n, _)| *n == 0)
    }

    /// Sum of the minimum and maximum counts, saturating.
    pub(crate) fn min_max_count(arguments: &[ArgumentSpec]) -> (usize, usize) {
        arguments.iter().fold((0usize, 0usize), |(lo, hi), a| {
            (
                lo.saturating_add(a.min_count as usize),
                hi.saturating_add(a.max_count as usize),
            )
        })
    }

    /// `true` if an argument with a variable count is followed by another
    /// argument. Only then does allocation depend on the total token count.
    pub(crate) fn requires_argument_count(arguments: &[ArgumentSpec]) -> bool {
        arguments
            .iter()
            .position(|a| a.min_count != a.max_count)
            .is_some_and(|i| i + 1 < arguments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optional_then_pair() -> Vec<ArgumentSpec> {
        vec![
            ArgumentSpec::new("1").with_counts(0, 1),
            ArgumentSpec::new("2").with_count(2),
        ]
    }

    #[test]
    fn test_unknown_number_of_arguments() {
        let args = optional_then_pair();
        assert!(ArgumentCounter::requires_argument_count(&args));
        let mut counter = ArgumentCounter::new(&args);
        assert!(!counter.is_complete());
        assert_eq!(counter.next_argument(), Some(0));
        assert!(!counter.is_complete());
        assert_eq!(counter.next_argument(), Some(1));
        assert!(!counter.is_complete());
        assert_eq!(counter.next_argument(), Some(1));
        assert!(counter.is_complete());
        assert_eq!(counter.next_argument(), None);
        assert_eq!(counter.count(), 3);
    }

    #[test]
    fn test_known_number_of_arguments() {
        let args = optional_then_pair();
        let mut counter = ArgumentCounter::with_count(&args, 2);
        assert!(!counter.is_complete());
        assert_eq!(counter.next_argument(), Some(1));
        assert!(!counter.is_complete());
        assert_eq!(counter.next_argument(), Some(1));
        assert!(counter.is_complete());
        assert_eq!(counter.next_argument(), None);
    }

    #[test]
    fn test_leftmost_argument_is_filled_first() {
        let args = vec![
            ArgumentSpec::new("A"),
            ArgumentSpec::new("B").with_counts(0, 3),
        ];
        assert!(!ArgumentCounter::requires_argument_count(&args));

        let mut counter = ArgumentCounter::new(&args);
        assert!(!counter.is_complete());
        assert_eq!(counter.next_argument(), Some(0));
        assert!(counter.is_complete());
        for _ in 0..3 {
            assert_eq!(counter.next_argument(), Some(1));
        }
        assert_eq!(counter.next_argument(), None);
    }

    #[test]
    fn test_variable_argument_is_split_at_minimum() {
        let args = vec![
            ArgumentSpec::new("A").with_counts(1, 3),
            ArgumentSpec::new("B").with_counts(0, 1),
        ];
        let mut counter = ArgumentCounter::new(&args);
        assert_eq!(counter.next_argument(), Some(0));
        assert!(counter.is_complete());
        assert_eq!(counter.next_argument(), Some(0));
        assert_eq!(counter.next_argument(), Some(0));
        assert_eq!(counter.next_argument(), Some(1));
        assert_eq!(counter.next_argument(), None);
    }

    #[test]
    fn test_surplus_goes_to_the_left() {
        let args = vec![
            ArgumentSpec::new("A").with_counts(0, 2),
            ArgumentSpec::new("B").with_counts(0, 2),
            ArgumentSpec::new("C"),
        ];
        let mut counter = ArgumentCounter::with_count(&args, 4);
        let order: Vec<_> = std::iter::from_fn(|| counter.next_argument()).collect();
        assert_eq!(order, vec![0, 0, 1, 2]);
        assert!(counter.is_complete());
    }

    #[test]
    fn test_trailing_empty_counters_are_complete() {
        let args = vec![
            ArgumentSpec::new("A").with_counts(0, 2),
            ArgumentSpec::new("B").with_counts(0, 1),
            ArgumentSpec::new("C").with_counts(0, 1),
        ];
        let mut counter = ArgumentCounter::with_count(&args, 1);
        assert_eq!(counter.next_argument(), Some(0));
        assert!(counter.is_complete());
    }

    #[test]
    fn test_too_many_tokens_are_clamped() {
        let args = vec![ArgumentSpec::new("A").with_counts(0, 2), ArgumentSpec::new("B")];
        let mut counter = ArgumentCounter::with_count(&args, 10);
        let order: Vec<_> = std::iter::from_fn(|| counter.next_argument()).collect();
        assert_eq!(order, vec![0, 0, 1]);
    }

    #[test]
    fn test_min_max_count_saturates() {
        let args = vec![
            ArgumentSpec::new("A").with_counts(1, u32::MAX),
            ArgumentSpec::new("B").with_counts(2, u32::MAX),
        ];
        let (lo, hi) = ArgumentCounter::min_max_count(&args);
        assert_eq!(lo, 3);
        assert_eq!(hi, (u32::MAX as usize).saturating_mul(2));
    }

    #[test]
    fn test_no_arguments() {
        let mut counter = ArgumentCounter::new(&[]);
        assert!(counter.is_complete());
        assert_eq!(counter.next_argument(), None);
    }
}
