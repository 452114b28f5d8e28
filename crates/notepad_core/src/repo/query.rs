//! Live query streams over note storage.
//!
//! # Responsibility
//! - Turn a blocking accessor query into a stream that re-emits after every
//!   storage mutation.
//! - Keep blocking SQLite reads off async tasks (tokio blocking pool).
//!
//! # Invariants
//! - The first item is the result at subscription time.
//! - Each invalidation observed after an emission causes exactly one re-run;
//!   invalidations that pile up while a query runs coalesce into one.
//! - The stream never ends on its own; dropping it stops observation.

use crate::repo::note_dao::{NoteDao, RepoError, RepoResult};
use futures_util::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;
use tokio::sync::watch;

struct ObserveState<D, F> {
    dao: D,
    changes: watch::Receiver<u64>,
    query: Arc<F>,
    primed: bool,
}

/// Observes `query` against `dao`, re-running it on every invalidation.
///
/// Must be polled inside a tokio runtime.
pub fn observe<D, T, F>(dao: D, query: F) -> BoxStream<'static, RepoResult<T>>
where
    D: NoteDao,
    T: Send + 'static,
    F: Fn(&D) -> RepoResult<T> + Send + Sync + 'static,
{
    let changes = dao.changes();
    let initial = ObserveState {
        dao,
        changes,
        query: Arc::new(query),
        primed: false,
    };

    stream::unfold(initial, |mut state| async move {
        if state.primed {
            state.changes.changed().await.ok()?;
        } else {
            state.changes.borrow_and_update();
            state.primed = true;
        }

        let dao = state.dao.clone();
        let query = Arc::clone(&state.query);
        let result = match tokio::task::spawn_blocking(move || (*query)(&dao)).await {
            Ok(result) => result,
            Err(err) => Err(RepoError::Background(err.to_string())),
        };
        Some((result, state))
    })
    .boxed()
}
