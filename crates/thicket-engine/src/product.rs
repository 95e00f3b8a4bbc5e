//! Cartesian products over sequences of alternatives.
//!
//! [`LazyProduct`] is the odometer at the heart of counted enumeration: it
//! combines k single-pass factors into every pick-one-from-each
//! combination without restarting or materializing any factor, given each
//! factor's length up front. [`EagerProduct`] is the fallback when lengths
//! are unknown: pools are materialized first, then stepped by index.

// ============================================================================
// Lazy Product
// ============================================================================

/// Lazy k-ary cartesian product in nested-loop order, last factor fastest.
///
/// Each factor is consumed at most once, in order, and only as far as the
/// requested outputs require: construction pulls nothing, and the first
/// output pulls exactly one element from each factor. Elements are
/// retained only while a later cycle still replays them, so memory tracks
/// the consumed prefixes of cycling factors rather than the full product.
///
/// A declared length of 0 empties the product without pulling anything;
/// zero factors yield exactly one empty combination.
///
/// # Panics
///
/// Panics if a factor ends before its declared length, or if the combined
/// length of all factors overflows `u64`. A factor longer than declared is
/// never detected: probing for the excess would consume an element no
/// output needs.
pub struct LazyProduct<I: Iterator> {
    factors: Vec<Factor<I>>,
    remaining: u64,
}

impl<I: Iterator> LazyProduct<I>
where
    I::Item: Clone,
{
    /// Build the product from factors paired with their declared lengths.
    pub fn new(factors: Vec<(I, u64)>) -> Self {
        if factors.iter().any(|(_, length)| *length == 0) {
            // Nothing will ever be yielded; leave every source untouched.
            return Self {
                factors: Vec::new(),
                remaining: 0,
            };
        }

        // Suffix products give each factor its repeat count without the
        // division a running total would need.
        let mut repeats = vec![1u64; factors.len()];
        let mut total = 1u64;
        for (i, (_, length)) in factors.iter().enumerate().rev() {
            repeats[i] = total;
            total = total
                .checked_mul(*length)
                .expect("lazy product: combined length overflows u64");
        }

        let mut cycle = 1u64;
        let factors = factors
            .into_iter()
            .zip(repeats)
            .enumerate()
            .map(|(index, ((source, length), repeat))| {
                let factor = Factor {
                    index,
                    source,
                    length,
                    repeat,
                    retain: cycle > 1,
                    buf: Vec::new(),
                    current: None,
                    pos: 0,
                    repeats_left: 0,
                    started: false,
                    pulled: 0,
                };
                cycle = cycle.checked_mul(length).expect("cycle count within total");
                factor
            })
            .collect();

        Self {
            factors,
            remaining: total,
        }
    }
}

impl<I: Iterator> Iterator for LazyProduct<I>
where
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.factors.iter_mut().map(Factor::next_item).collect())
    }
}

/// Per-factor odometer state.
///
/// On its own, a factor emits each of its elements `repeat` times in a
/// row, then starts over from the first element; the product reads its k
/// factors pointwise. `retain` marks factors a later cycle will replay,
/// which must keep everything they have pulled.
struct Factor<I: Iterator> {
    index: usize,
    source: I,
    length: u64,
    repeat: u64,
    retain: bool,
    buf: Vec<I::Item>,
    current: Option<I::Item>,
    pos: u64,
    repeats_left: u64,
    started: bool,
    pulled: u64,
}

impl<I: Iterator> Factor<I>
where
    I::Item: Clone,
{
    fn next_item(&mut self) -> I::Item {
        if self.repeats_left == 0 {
            self.advance();
            self.repeats_left = self.repeat;
        }
        self.repeats_left -= 1;
        if self.retain {
            self.buf[self.pos as usize].clone()
        } else {
            self.current.as_ref().expect("current element loaded").clone()
        }
    }

    /// Step to the next element, pulling from the source on first sight.
    fn advance(&mut self) {
        self.pos = if !self.started {
            self.started = true;
            0
        } else if self.pos + 1 == self.length {
            0
        } else {
            self.pos + 1
        };

        if self.retain {
            if (self.pos as usize) < self.buf.len() {
                return;
            }
            let item = self.pull();
            self.buf.push(item);
        } else {
            // Never replayed: the previous element can be dropped now.
            self.current = Some(self.pull());
        }
    }

    fn pull(&mut self) -> I::Item {
        match self.source.next() {
            Some(item) => {
                self.pulled += 1;
                item
            }
            None => panic!(
                "lazy product: factor {} ended after {} of {} declared elements",
                self.index, self.pulled, self.length
            ),
        }
    }
}

// ============================================================================
// Eager Product
// ============================================================================

/// Eager-input cartesian product: pools are fully materialized up front,
/// outputs are still produced one at a time in the same nested-loop order
/// as [`LazyProduct`].
///
/// Any empty pool makes the product empty; zero pools yield exactly one
/// empty combination.
pub struct EagerProduct<T> {
    pools: Vec<Vec<T>>,
    indices: Vec<usize>,
    done: bool,
}

impl<T: Clone> EagerProduct<T> {
    pub fn new(pools: Vec<Vec<T>>) -> Self {
        let done = pools.iter().any(Vec::is_empty);
        let indices = vec![0; pools.len()];
        Self {
            pools,
            indices,
            done,
        }
    }
}

impl<T: Clone> Iterator for EagerProduct<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let combination = self
            .pools
            .iter()
            .zip(&self.indices)
            .map(|(pool, &i)| pool[i].clone())
            .collect();

        // Odometer step, carrying from the last position.
        self.done = true;
        for i in (0..self.pools.len()).rev() {
            self.indices[i] += 1;
            if self.indices[i] < self.pools[i].len() {
                self.done = false;
                break;
            }
            self.indices[i] = 0;
        }
        Some(combination)
    }
}
