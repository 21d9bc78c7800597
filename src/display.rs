//! Holder for the most recently requested result.
//!
//! Generations may finish out of order. Each request takes a [`Ticket`]
//! before starting, and a finished raster is only shown if no newer request
//! has already been shown.

use crate::canvas::Raster;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Sequence number handed out when a generation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Shown {
    ticket: Ticket,
    raster: Arc<Raster>,
}

/// The currently displayed raster and its ticket.
#[derive(Debug, Default)]
pub struct DisplaySlot {
    next: AtomicU64,
    shown: Mutex<Option<Shown>>,
}

impl DisplaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next sequence number.
    pub fn begin(&self) -> Ticket {
        Ticket(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Shows `raster` unless a result from a later ticket is already shown.
    /// Returns whether it was accepted.
    pub fn publish(&self, ticket: Ticket, raster: Raster) -> bool {
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = shown.as_ref() {
            if current.ticket > ticket {
                log::warn!(
                    "Discarding stale generation #{} (showing #{})",
                    ticket.sequence(),
                    current.ticket.sequence()
                );
                return false;
            }
        }
        *shown = Some(Shown {
            ticket,
            raster: Arc::new(raster),
        });
        true
    }

    /// The raster on display, if any.
    pub fn current(&self) -> Option<Arc<Raster>> {
        let shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        shown.as_ref().map(|s| Arc::clone(&s.raster))
    }

    /// Ticket of the raster on display.
    pub fn current_ticket(&self) -> Option<Ticket> {
        let shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        shown.as_ref().map(|s| s.ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    fn raster(modules: usize) -> Raster {
        Canvas::new(4).unwrap().into_raster(modules)
    }

    #[test]
    fn test_tickets_increase() {
        let slot = DisplaySlot::new();
        let a = slot.begin();
        let b = slot.begin();
        assert!(b > a);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let slot = DisplaySlot::new();
        let older = slot.begin();
        let newer = slot.begin();
        assert!(slot.publish(newer, raster(2)));
        assert!(!slot.publish(older, raster(1)));
        assert_eq!(slot.current().unwrap().modules_drawn(), 2);
        assert_eq!(slot.current_ticket(), Some(newer));
    }

    #[test]
    fn test_in_order_results_replace() {
        let slot = DisplaySlot::new();
        assert!(slot.current().is_none());
        let first = slot.begin();
        assert!(slot.publish(first, raster(1)));
        let second = slot.begin();
        assert!(slot.publish(second, raster(2)));
        assert_eq!(slot.current().unwrap().modules_drawn(), 2);
    }
}
