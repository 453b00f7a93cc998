use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use pick_core::{Candidate, RemoteError, SuggestionClient};
use pick_session::Query;
use tracing::debug;

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// Reply to one query, tagged with the query it answers.
#[derive(Debug)]
pub struct QueryResult {
    pub query: Query,
    pub outcome: Result<Vec<Candidate>, RemoteError>,
}

// ---------------------------------------------------------------------------
// Per-field lane
// ---------------------------------------------------------------------------

/// One field's share of the worker: the latest submitted sequence, and the
/// query waiting for the field's thread to come free.
#[derive(Default)]
struct Lane {
    generation: AtomicU64,
    queue: Mutex<LaneQueue>,
}

#[derive(Default)]
struct LaneQueue {
    busy: bool,
    next: Option<Query>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

// ---------------------------------------------------------------------------
// SuggestionWorker
// ---------------------------------------------------------------------------

/// Runs remote searches off the input thread.
///
/// Each field has at most one thread talking to the client. Queries typed
/// while that thread is busy replace each other in a one-slot queue, so a
/// stalled request costs one thread no matter how many keystrokes follow.
/// The field's generation lets the thread skip work already superseded; the
/// engine's dispatcher still makes the final staleness call.
pub struct SuggestionWorker {
    client: Arc<dyn SuggestionClient>,
    result_tx: mpsc::Sender<QueryResult>,
    result_rx: Mutex<mpsc::Receiver<QueryResult>>,
    lanes: Mutex<HashMap<String, Arc<Lane>>>,
    live: Arc<AtomicUsize>,
}

impl SuggestionWorker {
    pub fn new(client: Arc<dyn SuggestionClient>) -> Self {
        let (result_tx, result_rx) = mpsc::channel::<QueryResult>();
        Self {
            client,
            result_tx,
            result_rx: Mutex::new(result_rx),
            lanes: Mutex::new(HashMap::new()),
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn lane(&self, field_key: &str) -> Arc<Lane> {
        Arc::clone(lock(&self.lanes).entry(field_key.to_string()).or_default())
    }

    pub fn submit(&self, query: Query) {
        let lane = self.lane(&query.field_key);
        lane.generation.store(query.sequence, Ordering::SeqCst);

        {
            let mut queue = lock(&lane.queue);
            if queue.busy {
                debug!(
                    field_key = %query.field_key,
                    sequence = query.sequence,
                    "queued behind in-flight query"
                );
                queue.next = Some(query);
                return;
            }
            queue.busy = true;
            self.live.fetch_add(1, Ordering::SeqCst);
        }

        let client = Arc::clone(&self.client);
        let tx = self.result_tx.clone();
        let live = Arc::clone(&self.live);
        let worker_lane = Arc::clone(&lane);
        let first = query.clone();
        let spawned = thread::Builder::new()
            .name(format!("pick-query-{}", query.field_key))
            .spawn(move || lane_worker(first, client, tx, worker_lane, live));

        if let Err(e) = spawned {
            {
                let mut queue = lock(&lane.queue);
                queue.busy = false;
                queue.next = None;
                self.live.fetch_sub(1, Ordering::SeqCst);
            }
            let _ = self.result_tx.send(QueryResult {
                query,
                outcome: Err(RemoteError::Http(format!("cannot start query thread: {e}"))),
            });
        }
    }

    /// Mark every in-flight query for `field_key` as superseded and drop the
    /// queued one.
    pub fn invalidate(&self, field_key: &str) {
        let lane = self.lane(field_key);
        lane.generation.store(0, Ordering::SeqCst);
        lock(&lane.queue).next = None;
    }

    /// Number of query threads currently alive, across all fields.
    pub fn in_flight(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn try_recv(&self) -> Option<QueryResult> {
        let rx = self.result_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<QueryResult> {
        let rx = self.result_rx.lock().ok()?;
        rx.recv_timeout(timeout).ok()
    }
}

// ---------------------------------------------------------------------------
// Worker threads
// ---------------------------------------------------------------------------

fn lane_worker(
    mut query: Query,
    client: Arc<dyn SuggestionClient>,
    tx: mpsc::Sender<QueryResult>,
    lane: Arc<Lane>,
    live: Arc<AtomicUsize>,
) {
    loop {
        run_query(query, client.as_ref(), &tx, &lane.generation);

        let mut queue = lock(&lane.queue);
        match queue.next.take() {
            Some(next) => query = next,
            None => {
                queue.busy = false;
                live.fetch_sub(1, Ordering::SeqCst);
                return;
            }
        }
    }
}

fn run_query(
    query: Query,
    client: &dyn SuggestionClient,
    tx: &mpsc::Sender<QueryResult>,
    generation: &AtomicU64,
) {
    // Check staleness before doing work
    if query.sequence != generation.load(Ordering::SeqCst) {
        debug!(sequence = query.sequence, "skipping superseded query");
        return;
    }

    let outcome = client.search(&query.term, &query.field_key);

    // Check staleness after the round trip
    if query.sequence != generation.load(Ordering::SeqCst) {
        debug!(sequence = query.sequence, "discarding superseded reply");
        return;
    }

    let _ = tx.send(QueryResult { query, outcome });
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use pick_core::remote::StaticSuggestionClient;

    fn query(term: &str, sequence: u64) -> Query {
        Query {
            term: term.to_string(),
            field_key: "tags".to_string(),
            sequence,
        }
    }

    fn worker() -> SuggestionWorker {
        let client = StaticSuggestionClient::from_labels(["Rust", "Ruby"], 10);
        SuggestionWorker::new(Arc::new(client))
    }

    /// Blocks every search until the sending half of the gate is dropped.
    struct GatedClient {
        gate: Mutex<mpsc::Receiver<()>>,
        inner: StaticSuggestionClient,
    }

    impl SuggestionClient for GatedClient {
        fn search(&self, term: &str, field_key: &str) -> Result<Vec<Candidate>, RemoteError> {
            let _ = self.gate.lock().unwrap().recv();
            self.inner.search(term, field_key)
        }
    }

    fn wait_idle(w: &SuggestionWorker) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while w.in_flight() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn delivers_tagged_result() {
        let w = worker();
        w.submit(query("rub", 1));
        let result = w.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result.query.sequence, 1);
        assert_eq!(result.outcome.unwrap(), vec![Candidate::remote("ruby", "Ruby")]);
        wait_idle(&w);
        assert_eq!(w.in_flight(), 0);
    }

    #[test]
    fn invalidated_query_is_not_delivered() {
        let w = worker();
        w.invalidate("tags");
        let lane = w.lane("tags");
        // A query for sequence 1 running after invalidation.
        let (tx, rx) = mpsc::channel();
        run_query(query("rus", 1), &StaticSuggestionClient::default(), &tx, &lane.generation);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn generation_tracks_latest_submission() {
        let w = worker();
        w.submit(query("ru", 1));
        w.submit(query("rus", 2));
        assert_eq!(w.lane("tags").generation.load(Ordering::SeqCst), 2);
        w.invalidate("tags");
        assert_eq!(w.lane("tags").generation.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stalled_field_holds_a_single_thread() {
        let (open, gate) = mpsc::channel::<()>();
        let client = GatedClient {
            gate: Mutex::new(gate),
            inner: StaticSuggestionClient::from_labels(["Rust", "Ruby"], 10),
        };
        let w = SuggestionWorker::new(Arc::new(client));

        for seq in 1..=50 {
            w.submit(query("rus", seq));
            assert!(w.in_flight() <= 1, "{} threads after query {seq}", w.in_flight());
        }
        assert_eq!(w.in_flight(), 1);

        drop(open);
        let result = w.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result.query.sequence, 50);
        assert!(w.recv_timeout(Duration::from_millis(200)).is_none());
        wait_idle(&w);
        assert_eq!(w.in_flight(), 0);
    }

    #[test]
    fn fields_get_separate_threads() {
        let (open, gate) = mpsc::channel::<()>();
        let client = GatedClient {
            gate: Mutex::new(gate),
            inner: StaticSuggestionClient::from_labels(["Rust"], 10),
        };
        let w = SuggestionWorker::new(Arc::new(client));
        w.submit(query("rus", 1));
        w.submit(Query {
            field_key: "lang".to_string(),
            ..query("rus", 1)
        });
        assert_eq!(w.in_flight(), 2);
        drop(open);
        let mut fields: Vec<String> = (0..2)
            .filter_map(|_| w.recv_timeout(Duration::from_secs(5)))
            .map(|r| r.query.field_key)
            .collect();
        fields.sort();
        assert_eq!(fields, vec!["lang", "tags"]);
    }
}
