use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinSet};

use super::{
    session::{update, Command, Intent, Session},
    theme::ThemeStore,
};
use crate::client::{Aggregator, ProxyTransport};

/// Executes the commands produced by `update` and turns their outcomes back
/// into intents
pub struct Runtime<T, S> {
    aggregator: Aggregator<T>,
    store: S,
}

impl<T, S> Runtime<T, S>
where
    T: ProxyTransport + 'static,
    S: ThemeStore + 'static,
{
    pub fn new(aggregator: Aggregator<T>, store: S) -> Self {
        Self { aggregator, store }
    }

    pub fn aggregator(&self) -> &Aggregator<T> {
        &self.aggregator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Restores the stored theme (light by default) and requests the first
    /// listing
    pub fn start(&self) -> (Session, Vec<Command>) {
        let mut session = Session::new(self.store.load_or_default());
        let commands = update(&mut session, Intent::LoadListing);
        (session, commands)
    }

    /// Runs one command to completion
    pub async fn execute(&self, command: Command) -> Option<Intent> {
        match command {
            Command::StartDebounce { token, delay } => {
                tokio::time::sleep(delay).await;
                Some(Intent::DebounceElapsed { token })
            }
            Command::LoadListing {
                generation,
                media_type,
                query,
            } => {
                let result = self.aggregator.load_listing(media_type, &query).await;
                Some(Intent::ListingLoaded { generation, result })
            }
            Command::LoadDetails {
                generation,
                media_type,
                id,
            } => {
                let result = self.aggregator.load_details(media_type, id).await;
                if let Err(e) = &result {
                    tracing::warn!(media_type = %media_type, id, error = %e, "Detail load failed");
                }
                Some(Intent::DetailsLoaded { generation, result })
            }
            Command::PersistTheme(theme) => {
                if let Err(e) = self.store.save(theme) {
                    tracing::warn!(theme = %theme, error = %e, "Failed to persist theme");
                }
                None
            }
        }
    }

    /// Event loop. External intents arrive on `events`; commands run
    /// concurrently and their results are fed back through `update`.
    /// `render` is called after every applied intent. Returns the final
    /// session once `events` is closed and nothing is in flight.
    pub async fn run<R>(
        self: Arc<Self>,
        mut session: Session,
        initial: Vec<Command>,
        mut events: mpsc::UnboundedReceiver<Intent>,
        mut render: R,
    ) -> Session
    where
        R: FnMut(&Session),
    {
        let mut tasks = JoinSet::new();
        for command in initial {
            self.spawn(&mut tasks, command);
        }

        let mut events_open = true;
        loop {
            tokio::select! {
                event = events.recv(), if events_open => match event {
                    Some(intent) => {
                        for command in update(&mut session, intent) {
                            self.spawn(&mut tasks, command);
                        }
                        render(&session);
                    }
                    None => events_open = false,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => match joined {
                    Ok(Some(intent)) => {
                        for command in update(&mut session, intent) {
                            self.spawn(&mut tasks, command);
                        }
                        render(&session);
                    }
                    Ok(None) => {}
                    Err(e) => tracing::error!(error = %e, "UI command task failed"),
                },
                else => break,
            }
        }

        session
    }

    fn spawn(self: &Arc<Self>, tasks: &mut JoinSet<Option<Intent>>, command: Command) {
        let runtime = Arc::clone(self);
        tasks.spawn(async move { runtime.execute(command).await });
    }
}
