//! The demand-aware cursor state machine.
//!
//! [CursorState] has no I/O. Every transition returns [Effects] describing what the driver
//! has to do next: items to deliver, at most one fetch to issue, and the terminal signal.
//!
//! ```text
//!  Idle --(demand, buffer empty)--> Fetching --(page)--> Idle ...
//!   |                                  |
//!   +--> Completed | Cancelled         +--> Failed | Cancelled
//! ```

use razor_cursor_core::{CursorError, Page, Position};
use std::collections::VecDeque;

/// Demand that is never decremented
pub const UNBOUNDED: u64 = u64::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No fetch outstanding, the buffer may hold items
    Idle,
    /// Exactly one fetch outstanding
    Fetching,
    Completed,
    Cancelled,
    Failed,
}

impl Phase {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Completed | Phase::Cancelled | Phase::Failed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub after: Position,
    pub fetch_size: usize,
}

#[derive(Debug, PartialEq)]
pub enum Terminal {
    Completed,
    Failed(CursorError),
}

/// The output of one transition
pub struct Effects<T> {
    /// Items to hand to the consumer, in order
    pub deliver: Vec<T>,
    pub fetch: Option<FetchRequest>,
    pub terminal: Option<Terminal>,
}

impl<T> Default for Effects<T> {
    fn default() -> Self {
        Self { deliver: Vec::new(), fetch: None, terminal: None }
    }
}

impl<T> Effects<T> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deliver.is_empty() && self.fetch.is_none() && self.terminal.is_none()
    }
}

pub struct CursorState<T> {
    buffered: VecDeque<T>,
    pending_demand: u64,
    exhausted: bool,
    phase: Phase,
    position: Position,
    fetch_size: usize,
    requested: u64,
    delivered: u64,
    fetches: u64,
}

impl<T> CursorState<T> {
    pub fn new(fetch_size: usize) -> Self {
        assert!(fetch_size >= 1, "fetch_size must be >= 1");
        Self {
            buffered: VecDeque::with_capacity(fetch_size),
            pending_demand: 0,
            exhausted: false,
            phase: Phase::Idle,
            position: Position::START,
            fetch_size,
            requested: 0,
            delivered: 0,
            fetches: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn pending_demand(&self) -> u64 {
        self.pending_demand
    }

    #[inline]
    pub fn buffered(&self) -> usize {
        self.buffered.len()
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Total demand received, saturating at [UNBOUNDED]
    #[inline]
    pub fn requested(&self) -> u64 {
        self.requested
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    #[inline]
    pub fn fetches(&self) -> u64 {
        self.fetches
    }

    /// The consumer wants `n` more items. `n == 0` and demand after termination are ignored.
    pub fn on_demand(&mut self, n: u64) -> Effects<T> {
        let mut effects = Effects::default();
        if n == 0 || self.phase.is_terminal() {
            return effects;
        }
        self.pending_demand = self.pending_demand.saturating_add(n);
        self.requested = self.requested.saturating_add(n);
        // While Fetching the demand is kept for the page arrival
        if self.phase == Phase::Idle {
            self.drain(&mut effects);
        }
        effects
    }

    /// The outstanding fetch returned a page.
    ///
    /// # Panics
    ///
    /// When no fetch is outstanding, or the page is larger than `fetch_size`.
    pub fn on_page_arrival(&mut self, page: Page<T>) -> Effects<T> {
        let mut effects = Effects::default();
        match self.phase {
            Phase::Fetching => {}
            // the late page of a cancelled cursor is dropped
            Phase::Cancelled => return effects,
            phase => panic!("protocol violation: {:?} arrived while {:?}", page, phase),
        }
        assert!(
            page.len() <= self.fetch_size,
            "protocol violation: {:?} exceeds fetch_size {}",
            page,
            self.fetch_size
        );
        if page.end_of_data() {
            self.exhausted = true;
        }
        self.position = self.position.advance(page.len());
        self.buffered.extend(page.into_items());
        self.phase = Phase::Idle;
        self.drain(&mut effects);
        effects
    }

    /// Returns false if the cursor had already terminated.
    pub fn on_cancel(&mut self) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.phase = Phase::Cancelled;
        self.buffered.clear();
        true
    }

    /// The outstanding fetch failed.
    ///
    /// # Panics
    ///
    /// When no fetch is outstanding.
    pub fn on_source_failure(&mut self, err: CursorError) -> Effects<T> {
        let mut effects = Effects::default();
        match self.phase {
            Phase::Fetching => {}
            Phase::Cancelled => return effects,
            phase => panic!("protocol violation: fetch failure {:?} while {:?}", err, phase),
        }
        self.phase = Phase::Failed;
        self.buffered.clear();
        effects.terminal = Some(Terminal::Failed(err));
        effects
    }

    fn drain(&mut self, effects: &mut Effects<T>) {
        debug_assert_eq!(self.phase, Phase::Idle);
        while self.pending_demand > 0 {
            let Some(item) = self.buffered.pop_front() else {
                break;
            };
            effects.deliver.push(item);
            self.delivered += 1;
            if self.pending_demand != UNBOUNDED {
                self.pending_demand -= 1;
            }
        }
        if !self.buffered.is_empty() {
            return;
        }
        if self.exhausted {
            self.phase = Phase::Completed;
            effects.terminal = Some(Terminal::Completed);
        } else if self.pending_demand > 0 {
            self.phase = Phase::Fetching;
            self.fetches += 1;
            effects.fetch = Some(FetchRequest { after: self.position, fetch_size: self.fetch_size });
        }
    }
}
