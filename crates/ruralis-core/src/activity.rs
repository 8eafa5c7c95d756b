// ── Operation activity tracking ──
//
// Shared display indicators: how many remote calls are outstanding and
// the message of the most recent failure. Each operation still returns
// its own `Result`; these exist for UIs that render a spinner or banner.

use tokio::sync::watch;

pub(crate) struct Activity {
    in_flight: watch::Sender<usize>,
    last_error: watch::Sender<Option<String>>,
}

impl Activity {
    pub(crate) fn new() -> Self {
        let (in_flight, _) = watch::channel(0);
        let (last_error, _) = watch::channel(None);
        Self {
            in_flight,
            last_error,
        }
    }

    /// Clear the last-error slot at the start of an operation.
    pub(crate) fn reset_error(&self) {
        self.last_error.send_if_modified(|slot| slot.take().is_some());
    }

    pub(crate) fn record_error(&self, message: String) {
        self.last_error.send_replace(Some(message));
    }

    /// Mark a remote call as started. The count drops again when the
    /// returned guard goes out of scope, on every exit path.
    pub(crate) fn begin(&self) -> OperationGuard<'_> {
        self.in_flight.send_modify(|n| *n += 1);
        OperationGuard { activity: self }
    }

    pub(crate) fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    pub(crate) fn subscribe_in_flight(&self) -> watch::Receiver<usize> {
        self.in_flight.subscribe()
    }

    pub(crate) fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    pub(crate) fn subscribe_last_error(&self) -> watch::Receiver<Option<String>> {
        self.last_error.subscribe()
    }
}

/// RAII token for one outstanding remote call.
pub(crate) struct OperationGuard<'a> {
    activity: &'a Activity,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        self.activity
            .in_flight
            .send_modify(|n| *n = n.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_count_overlapping_calls() {
        let activity = Activity::new();
        let a = activity.begin();
        let b = activity.begin();
        assert_eq!(activity.in_flight(), 2);
        drop(a);
        assert_eq!(activity.in_flight(), 1);
        drop(b);
        assert_eq!(activity.in_flight(), 0);
    }

    #[test]
    fn guard_releases_on_early_return() {
        fn fails(activity: &Activity) -> Result<(), ()> {
            let _guard = activity.begin();
            Err(())
        }

        let activity = Activity::new();
        assert!(fails(&activity).is_err());
        assert_eq!(activity.in_flight(), 0);
    }

    #[test]
    fn error_slot_resets_and_records() {
        let activity = Activity::new();
        activity.record_error("Falha ao buscar produtores.".into());
        assert_eq!(
            activity.last_error().as_deref(),
            Some("Falha ao buscar produtores.")
        );
        activity.reset_error();
        assert!(activity.last_error().is_none());
    }
}
