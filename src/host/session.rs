use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use super::responder::Responder;
use super::store::Store;
use super::treatment::Treatments;
use crate::chat_core::Exchange;
use crate::frontend::ChatPage;

/// The host side of one participant's chat page.
pub struct Session {
    participant: String,
    responder: Arc<Responder>,
    treatments: Arc<Treatments>,
    store: Store,
    treatment: String,
}

impl Session {
    pub fn new(
        participant: impl Into<String>,
        responder: Arc<Responder>,
        treatments: Arc<Treatments>,
        store: Store,
    ) -> Session {
        Session {
            participant: participant.into(),
            responder,
            treatments,
            store,
            treatment: String::new(),
        }
    }

    /// Enrols the participant, loads their thread and connects a page to
    /// this session.
    ///
    /// The returned [`Host`] answers the page until the page goes away.
    pub async fn open(mut self) -> Result<(ChatPage, Host)> {
        let treatments = self.treatments.clone();
        let (treatment, history) = self
            .with_store(move |store, participant| {
                let treatment = store.enrol(participant, &treatments)?;
                Ok((treatment, store.thread(participant)?))
            })
            .await?;
        self.treatment = treatment.unwrap_or_default();

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        debug!(
            participant = %self.participant,
            treatment = %self.treatment,
            turns = history.len(),
            "session opened"
        );
        let page = ChatPage::new(history, outbound_tx, inbound_rx);
        let host = Host {
            session: self,
            outbound: outbound_rx,
            inbound: inbound_tx,
        };
        Ok((page, host))
    }

    async fn reply(&self, prompt: String) -> Result<String> {
        let thread = self
            .with_store(|store, participant| store.thread(participant))
            .await?;
        let response = self
            .responder
            .respond(&self.treatment, &thread, &prompt)
            .await?;

        let exchange = Exchange::new(prompt, response.clone());
        let recorded = self
            .with_store(move |store, participant| store.record(participant, &exchange))
            .await;
        if let Err(err) = recorded {
            warn!(participant = %self.participant, "exchange not recorded: {err:#}");
        }
        Ok(response)
    }

    /// Runs a store call off the async workers; pool checkout and SQLite both block.
    async fn with_store<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&Store, &str) -> Result<R> + Send + 'static,
    {
        let store = self.store.clone();
        let participant = self.participant.clone();
        tokio::task::spawn_blocking(move || f(&store, &participant)).await?
    }
}

/// The host end of a connected page.
pub struct Host {
    session: Session,
    outbound: UnboundedReceiver<String>,
    inbound: UnboundedSender<String>,
}

impl Host {
    /// Answers prompts in arrival order until the page drops its side.
    pub async fn serve(mut self) {
        let session = &self.session;
        info!(participant = %session.participant, "session started");
        while let Some(prompt) = self.outbound.recv().await {
            match session.reply(prompt).await {
                Ok(response) => {
                    if self.inbound.send(response).is_err() {
                        break;
                    }
                }
                Err(err) => error!(participant = %session.participant, "no response: {err:#}"),
            }
        }
        info!(participant = %session.participant, "session closed");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::host::treatment::Assignment;

    fn session(store: &Store, participant: &str, treatments: &Arc<Treatments>) -> Session {
        Session::new(participant, Arc::new(Responder::Echo), treatments.clone(), store.clone())
    }

    fn no_treatments() -> Arc<Treatments> {
        Arc::new(Treatments::new(Vec::new(), Assignment::Complete))
    }

    #[tokio::test]
    async fn test_round_trip_is_recorded() {
        let store = Store::open(":memory:").unwrap();
        let (page, host) = session(&store, "p1", &no_treatments()).open().await.unwrap();
        let serving = tokio::spawn(host.serve());

        page.outbound.send("hi".to_string()).unwrap();
        let mut inbound = page.take_inbound().unwrap();
        let reply = tokio::time::timeout(Duration::from_secs(5), inbound.recv())
            .await
            .unwrap();
        assert_eq!(reply.as_deref(), Some("hi"));

        drop(page);
        tokio::time::timeout(Duration::from_secs(5), serving)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(store.thread("p1").unwrap(), vec![Exchange::new("hi", "hi")]);
    }

    #[tokio::test]
    async fn test_history_comes_from_thread() {
        let store = Store::open(":memory:").unwrap();
        store.record("p1", &Exchange::new("hi", "hello")).unwrap();
        store.record("p2", &Exchange::new("not", "mine")).unwrap();

        let (page, _host) = session(&store, "p1", &no_treatments()).open().await.unwrap();

        assert_eq!(page.history, vec![Exchange::new("hi", "hello")]);
    }

    #[tokio::test]
    async fn test_treatment_assigned_on_first_open() {
        let store = Store::open(":memory:").unwrap();
        let treatments = Arc::new(Treatments::new(
            vec!["control".into(), "nudge".into()],
            Assignment::Complete,
        ));

        for (participant, expected) in [("p1", "control"), ("p2", "nudge"), ("p1", "control")] {
            let _ = session(&store, participant, &treatments).open().await.unwrap();
            let enrolled = store.enrol(participant, &treatments).unwrap();
            assert_eq!(enrolled.as_deref(), Some(expected));
        }
    }
}
