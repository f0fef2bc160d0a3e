use rayon::prelude::*;

use crate::domain::{Grid, Rule, StepMode};

/// Where the simulation is within one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// Committed state only; safe to render
    #[default]
    Idle,
    /// Next generation staged in `alive_next`, `alive` untouched
    Ticking,
    /// Staged values promoted, generation counter advanced
    Committed,
}

/// Outcome of one committed tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub generation: u64,
    pub alive: usize,
}

/// Simulation owns the grid and advances it one generation per tick with
/// a two-phase update: every cell's next state is staged against the
/// committed generation, then all staged values are committed at once.
pub struct Simulation {
    grid: Grid,
    rule: Box<dyn Rule>,
    mode: StepMode,
    phase: Phase,
    generation: u64,
    /// Parallel staging target, allocated once
    scratch: Vec<bool>,
}

impl Simulation {
    pub fn new(grid: Grid, rule: Box<dyn Rule>) -> Self {
        Self::with_mode(grid, rule, StepMode::default())
    }

    pub fn with_mode(grid: Grid, rule: Box<dyn Rule>, mode: StepMode) -> Self {
        let scratch = match mode {
            StepMode::Serial => Vec::new(),
            StepMode::Parallel => vec![false; grid.cell_count()],
        };
        Self {
            grid,
            rule,
            mode,
            phase: Phase::Idle,
            generation: 0,
            scratch,
        }
    }

    /// Read-only view of the committed grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn alive_count(&self) -> usize {
        self.grid.alive_count()
    }

    /// Phase 1: compute every cell's next state from the committed generation
    /// and write it into the cell's staging slot. `alive` is not modified.
    pub fn stage(&mut self) {
        match self.mode {
            StepMode::Serial => {
                for idx in 0..self.grid.cell_count() {
                    let next = self.grid.next_state_at(idx, self.rule.as_ref());
                    self.grid.stage(idx, next);
                }
            }
            StepMode::Parallel => {
                let grid = &self.grid;
                let rule = self.rule.as_ref();
                self.scratch
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(idx, slot)| *slot = grid.next_state_at(idx, rule));
                for (idx, &next) in self.scratch.iter().enumerate() {
                    self.grid.stage(idx, next);
                }
            }
        }
        self.phase = Phase::Ticking;
    }

    /// Phase 2: promote every staged value and advance the generation counter.
    ///
    /// Returns `None` when nothing is staged, so a commit can never be applied twice.
    pub fn commit(&mut self) -> Option<TickReport> {
        if self.phase != Phase::Ticking {
            return None;
        }
        let alive = self.grid.commit();
        self.generation += 1;
        self.phase = Phase::Committed;
        Some(TickReport {
            generation: self.generation,
            alive,
        })
    }

    /// Run one full tick: stage, commit, back to idle
    pub fn tick(&mut self) -> TickReport {
        self.stage();
        let report = self.commit();
        self.phase = Phase::Idle;
        report.unwrap_or_else(|| TickReport {
            generation: self.generation,
            alive: self.grid.alive_count(),
        })
    }

    /// Run `n` ticks, returning the report of the last one
    pub fn advance(&mut self, n: u64) -> Option<TickReport> {
        (0..n).map(|_| self.tick()).last()
    }
}
