use super::{CursorCounter, CursorFacts, Event};
use crate::state::{CursorState, Effects, FetchRequest, Terminal};
use captains_log::filter::LogFilter;
use razor_cursor_core::{CursorError, FetchListener, Page, Source};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// The single task owning the state of one cursor
pub(crate) struct CursorTask<S: Source> {
    source: Arc<S>,
    query: String,
    state: CursorState<S::Item>,
    fetch_timeout: Duration,
    logger: Arc<LogFilter>,
    listener: Option<Arc<dyn FetchListener>>,
    /// Handed to fetch tasks to post their result
    events: mpsc::UnboundedSender<Event<S::Item>>,
    signals: mpsc::UnboundedSender<Result<S::Item, CursorError>>,
    counter: Arc<CursorCounter>,
}

impl<S: Source> CursorTask<S> {
    pub(crate) fn new<F: CursorFacts>(
        source: Arc<S>, facts: &Arc<F>, events: mpsc::UnboundedSender<Event<S::Item>>,
        signals: mpsc::UnboundedSender<Result<S::Item, CursorError>>, counter: Arc<CursorCounter>,
    ) -> Self {
        let config = facts.get_config();
        Self {
            query: source.describe(),
            source,
            state: CursorState::new(config.fetch_size),
            fetch_timeout: config.fetch_timeout,
            logger: facts.new_logger(),
            listener: facts.listener(),
            events,
            signals,
            counter,
        }
    }

    pub(crate) async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event<S::Item>>) {
        logger_trace!(self.logger, "cursor {:?} opened", self.query);
        while let Some(event) = events.recv().await {
            let effects = match event {
                Event::Demand(n) => {
                    logger_trace!(self.logger, "cursor {:?} request({})", self.query, n);
                    self.state.on_demand(n)
                }
                Event::Cancel => {
                    self.state.on_cancel();
                    logger_debug!(
                        self.logger,
                        "cursor {:?} cancelled after {} items",
                        self.query,
                        self.state.delivered()
                    );
                    return;
                }
                Event::Fetched(Ok(page)) => {
                    logger_trace!(self.logger, "cursor {:?} received {:?}", self.query, page);
                    if let Some(listener) = self.listener.as_ref() {
                        listener.on_fetch_succeeded(&self.query, page.len());
                    }
                    self.state.on_page_arrival(page)
                }
                Event::Fetched(Err(e)) => {
                    logger_warn!(self.logger, "cursor {:?} fetch failed: {}", self.query, e);
                    if let Some(listener) = self.listener.as_ref() {
                        listener.on_fetch_failed(&self.query, &e);
                    }
                    self.state.on_source_failure(e)
                }
            };
            if !self.apply(effects) {
                return;
            }
        }
    }

    /// Returns false once the cursor reached a terminal state
    fn apply(&mut self, effects: Effects<S::Item>) -> bool {
        for item in effects.deliver {
            self.counter.add_delivered();
            if self.signals.send(Ok(item)).is_err() {
                // the consumer is gone
                self.state.on_cancel();
                return false;
            }
        }
        if let Some(req) = effects.fetch {
            self.issue_fetch(req);
        }
        match effects.terminal {
            None => true,
            Some(Terminal::Completed) => {
                logger_debug!(
                    self.logger,
                    "cursor {:?} completed, {} items in {} fetches",
                    self.query,
                    self.state.delivered(),
                    self.state.fetches()
                );
                false
            }
            Some(Terminal::Failed(e)) => {
                let _ = self.signals.send(Err(e));
                false
            }
        }
    }

    fn issue_fetch(&self, req: FetchRequest) {
        self.counter.add_fetch();
        logger_debug!(
            self.logger,
            "cursor {:?} fetch after {} fetch_size {}",
            self.query,
            req.after,
            req.fetch_size
        );
        if let Some(listener) = self.listener.as_ref() {
            listener.on_fetch_issued(&self.query, req.fetch_size);
        }
        let source = self.source.clone();
        let events = self.events.clone();
        let timeout = self.fetch_timeout;
        tokio::spawn(async move {
            let res = fetch_with_timeout(source.as_ref(), req, timeout).await;
            // the cursor may have ended meanwhile, then the page is dropped
            let _ = events.send(Event::Fetched(res));
        });
    }
}

async fn fetch_with_timeout<S: Source>(
    source: &S, req: FetchRequest, timeout: Duration,
) -> Result<Page<S::Item>, CursorError> {
    if timeout == Duration::from_secs(0) {
        return source.fetch_page(req.after, req.fetch_size).await;
    }
    match tokio::time::timeout(timeout, source.fetch_page(req.after, req.fetch_size)).await {
        Ok(r) => r,
        Err(_) => Err(CursorError::Timeout),
    }
}
