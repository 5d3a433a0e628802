//! Logical clock, timer queue, and debouncing
//!
//! The page has no real event loop; deferred work (simulated submission
//! latency, banner auto-dismissal, debounced scroll handling) is expressed
//! as tasks on a logical millisecond clock. The embedder advances the
//! clock explicitly and the queue hands back every task that came due, in
//! deadline order. Ties fire in scheduling order.
//!
//! [`Debouncer`] layers a trailing-edge rate limiter on top of the queue:
//! each poke cancels the previously scheduled task and re-arms it one
//! quiet interval into the future, so a burst of pokes yields exactly one
//! firing after the burst goes quiet.

/// Identifier of a scheduled task
pub type TimerId = u64;

#[derive(Debug, Clone)]
struct TimerEntry<T> {
  id: TimerId,
  deadline: u64,
  task: T,
}

/// An ordered queue of deferred tasks on a logical millisecond clock
///
/// # Examples
///
/// ```
/// use vitrine::schedule::TimerQueue;
///
/// let mut queue: TimerQueue<&str> = TimerQueue::new();
/// queue.schedule_in(2000, "finish");
/// queue.schedule_in(10, "probe");
///
/// assert_eq!(queue.advance(100), vec!["probe"]);
/// assert_eq!(queue.advance(1900), vec!["finish"]);
/// assert_eq!(queue.now(), 2000);
/// ```
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
  now: u64,
  next_id: TimerId,
  entries: Vec<TimerEntry<T>>,
}

impl<T> Default for TimerQueue<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> TimerQueue<T> {
  /// Creates an empty queue at time zero
  pub fn new() -> Self {
    Self {
      now: 0,
      next_id: 0,
      entries: Vec::new(),
    }
  }

  /// Current logical time in milliseconds
  pub fn now(&self) -> u64 {
    self.now
  }

  /// Number of tasks not yet due
  pub fn pending(&self) -> usize {
    self.entries.len()
  }

  /// Schedules `task` to fire `delay_ms` from now
  pub fn schedule_in(&mut self, delay_ms: u64, task: T) -> TimerId {
    let id = self.next_id;
    self.next_id += 1;
    self.entries.push(TimerEntry {
      id,
      deadline: self.now.saturating_add(delay_ms),
      task,
    });
    id
  }

  /// Cancels a scheduled task; returns true when it was still pending
  pub fn cancel(&mut self, id: TimerId) -> bool {
    let before = self.entries.len();
    self.entries.retain(|entry| entry.id != id);
    self.entries.len() != before
  }

  /// Returns true while the task has not fired or been cancelled
  pub fn is_pending(&self, id: TimerId) -> bool {
    self.entries.iter().any(|entry| entry.id == id)
  }

  /// Moves the clock forward and returns every task that came due
  ///
  /// Tasks are returned ordered by deadline; equal deadlines fire in the
  /// order they were scheduled.
  pub fn advance(&mut self, delta_ms: u64) -> Vec<T> {
    self.now = self.now.saturating_add(delta_ms);
    let now = self.now;

    let mut due: Vec<TimerEntry<T>> = Vec::new();
    let mut remaining: Vec<TimerEntry<T>> = Vec::new();
    for entry in self.entries.drain(..) {
      if entry.deadline <= now {
        due.push(entry);
      } else {
        remaining.push(entry);
      }
    }
    self.entries = remaining;

    due.sort_by_key(|entry| (entry.deadline, entry.id));
    due.into_iter().map(|entry| entry.task).collect()
  }
}

/// Trailing-edge debouncer over a [`TimerQueue`]
///
/// Parameterized by its quiet interval so the scroll handler's 10 ms
/// window is just configuration, not a special case.
///
/// # Examples
///
/// ```
/// use vitrine::schedule::{Debouncer, TimerQueue};
///
/// let mut queue: TimerQueue<u32> = TimerQueue::new();
/// let mut debounce = Debouncer::new(10);
///
/// // Three pokes inside the quiet window collapse into one firing.
/// debounce.poke(&mut queue, 1);
/// debounce.poke(&mut queue, 2);
/// debounce.poke(&mut queue, 3);
/// assert_eq!(queue.advance(5), Vec::<u32>::new());
/// assert_eq!(queue.advance(5), vec![3]);
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer {
  quiet_ms: u64,
  armed: Option<TimerId>,
}

impl Debouncer {
  /// Creates a debouncer with the given quiet interval
  pub fn new(quiet_ms: u64) -> Self {
    Self {
      quiet_ms,
      armed: None,
    }
  }

  /// Quiet interval in milliseconds
  pub fn quiet_ms(&self) -> u64 {
    self.quiet_ms
  }

  /// Re-arms the debounced task, cancelling any pending one
  pub fn poke<T>(&mut self, queue: &mut TimerQueue<T>, task: T) -> TimerId {
    if let Some(id) = self.armed.take() {
      queue.cancel(id);
    }
    let id = queue.schedule_in(self.quiet_ms, task);
    self.armed = Some(id);
    id
  }

  /// True while a poked task has not yet fired
  pub fn is_armed<T>(&self, queue: &TimerQueue<T>) -> bool {
    self.armed.map(|id| queue.is_pending(id)).unwrap_or(false)
  }
}
