use std::iter::FusedIterator;

use ioclab_core::{
    Combinations, Position, PositionSymbolIndex, SymbolId, combination::mask_bits, combinations,
    pair_count,
};

use crate::{SearchStats, stage::StagePlanner};

/// One stage choice: commit `symbol` to exactly `size` positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StageHead {
    size: usize,
    symbol: SymbolId,
}

/// A partial solution and the bookkeeping needed to extend it.
///
/// Every child branch is built from a copy; a branch is never mutated once
/// its frame is on the stack.
#[derive(Debug, Clone)]
struct Branch {
    solution: Vec<Option<SymbolId>>,
    index: PositionSymbolIndex,
    committed: Vec<bool>,
    numerator: u64,
    filled: usize,
    /// Largest stage size allowed below this branch.
    ceiling: usize,
    /// The stage that produced this branch.
    last: Option<StageHead>,
    depth: usize,
}

impl Branch {
    fn root(index: PositionSymbolIndex, ceiling: usize) -> Self {
        Self {
            solution: vec![None; index.len()],
            committed: vec![false; index.symbol_count()],
            index,
            numerator: 0,
            filled: 0,
            ceiling,
            last: None,
            depth: 0,
        }
    }

    fn is_complete(&self) -> bool {
        self.filled == self.solution.len()
    }

    /// Stage sizes and symbols worth trying below this branch, in search
    /// order: size descending, then symbol id ascending.
    ///
    /// A stage of the same size as the previous one must use a larger
    /// symbol id, so each assignment is reached through exactly one path.
    fn heads(&self, planner: &StagePlanner, stats: &mut SearchStats) -> Vec<StageHead> {
        let (sizes, pruned) = planner.stage_sizes(self.numerator, self.filled, self.ceiling);
        stats.pruned_stage_sizes += pruned;

        let mut heads = Vec::new();
        for size in sizes {
            for symbol in self.index.symbols() {
                if self.committed[symbol.index()] || self.index.availability(symbol) < size {
                    continue;
                }
                if let Some(last) = self.last
                    && last.size == size
                    && symbol <= last.symbol
                {
                    continue;
                }
                heads.push(StageHead { size, symbol });
            }
        }
        heads
    }

    fn extend(&self, head: StageHead, chosen: &[Position]) -> Self {
        let mut solution = self.solution.clone();
        for &pos in chosen {
            debug_assert!(solution[pos.index()].is_none());
            solution[pos.index()] = Some(head.symbol);
        }
        let mut committed = self.committed.clone();
        committed[head.symbol.index()] = true;
        Self {
            solution,
            index: self.index.with_consumed(chosen.iter().copied()),
            committed,
            numerator: self.numerator + pair_count(head.size),
            filled: self.filled + head.size,
            ceiling: head.size,
            last: Some(head),
            depth: self.depth + 1,
        }
    }

    fn has_stranded_position(&self) -> bool {
        self.index
            .find_stranded(|symbol| !self.committed[symbol.index()])
            .is_some()
    }

    fn into_symbols<S: Clone>(self, symbols: &[S]) -> Vec<S> {
        debug_assert!(self.is_complete());
        self.solution
            .into_iter()
            .flatten()
            .map(|id| symbols[id.index()].clone())
            .collect()
    }
}

/// The masks of one stage head over its available positions.
#[derive(Debug, Clone)]
struct Placement {
    head: StageHead,
    positions: Vec<Position>,
    masks: Combinations,
}

/// A branch on the explicit search stack, with the cursor over its children.
#[derive(Debug, Clone)]
struct Frame {
    branch: Branch,
    heads: std::vec::IntoIter<StageHead>,
    current: Option<Placement>,
}

impl Frame {
    fn new(branch: Branch, heads: Vec<StageHead>) -> Self {
        Self {
            branch,
            heads: heads.into_iter(),
            current: None,
        }
    }

    /// Returns the next `(head, chosen positions)` child of this frame.
    fn next_child(&mut self) -> Option<(StageHead, Vec<Position>)> {
        loop {
            if let Some(placement) = &mut self.current
                && let Some(mask) = placement.masks.next()
            {
                let chosen = mask_bits(mask).map(|bit| placement.positions[bit]).collect();
                return Some((placement.head, chosen));
            }
            let head = self.heads.next()?;
            let positions = self.branch.index.positions(head.symbol).to_vec();
            let masks = combinations(positions.len(), head.size);
            self.current = Some(Placement {
                head,
                positions,
                masks,
            });
        }
    }
}

/// A lazy, forward-only sequence of complete assignments.
///
/// Returned by [`ReverseSearch::search`](crate::ReverseSearch::search). Each
/// item holds one symbol per position and its IoC lies within the target
/// range. The traversal is depth-first over an explicit stack, so pulling
/// the next item resumes exactly where the previous one stopped, and
/// dropping the iterator cancels the search.
#[derive(Debug, Clone)]
pub struct Assignments<S> {
    symbols: Vec<S>,
    planner: StagePlanner,
    stack: Vec<Frame>,
    stats: SearchStats,
}

impl<S> Assignments<S> {
    /// A sequence that yields nothing.
    pub(crate) fn empty(symbols: Vec<S>, planner: StagePlanner) -> Self {
        Self {
            symbols,
            planner,
            stack: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// A sequence exploring every branch below the root state.
    pub(crate) fn from_root(symbols: Vec<S>, planner: StagePlanner, index: PositionSymbolIndex) -> Self {
        let mut this = Self::empty(symbols, planner);
        let root = Branch::root(index, planner.max_global());
        let heads = root.heads(&planner, &mut this.stats);
        this.stack.push(Frame::new(root, heads));
        this
    }

    /// Splits the root into one sequence per top-level stage head.
    ///
    /// Consuming the returned sequences in order yields exactly the items of
    /// [`from_root`](Self::from_root).
    pub(crate) fn split_root(symbols: &[S], planner: StagePlanner, index: PositionSymbolIndex) -> Vec<Self>
    where
        S: Clone,
    {
        let root = Branch::root(index, planner.max_global());
        let mut stats = SearchStats::default();
        root.heads(&planner, &mut stats)
            .into_iter()
            .map(|head| {
                let mut branch = Self::empty(symbols.to_vec(), planner);
                branch.stack.push(Frame::new(root.clone(), vec![head]));
                branch
            })
            .collect()
    }

    /// Returns the counters for the part of the search explored so far.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl<S> Iterator for Assignments<S>
where
    S: Clone,
{
    type Item = Vec<S>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some((head, chosen)) = frame.next_child() else {
                self.stack.pop();
                continue;
            };
            self.stats.branches += 1;
            let child = frame.branch.extend(head, &chosen);
            self.stats.max_depth = self.stats.max_depth.max(child.depth);
            log::trace!(
                "stage {}: {} x{} at {:?} (numerator {})",
                child.depth,
                head.symbol,
                head.size,
                chosen,
                child.numerator
            );

            if child.is_complete() {
                if self.planner.accepts(child.numerator) {
                    self.stats.solutions += 1;
                    return Some(child.into_symbols(&self.symbols));
                }
                self.stats.rejected_terminals += 1;
                continue;
            }
            if child.has_stranded_position() {
                self.stats.dead_ends += 1;
                continue;
            }

            let heads = child.heads(&self.planner, &mut self.stats);
            self.stack.push(Frame::new(child, heads));
        }
    }
}

impl<S> FusedIterator for Assignments<S> where S: Clone {}
