use std::{sync::Arc, time::Duration};

use jam_model::event::Event;
use jam_rooms::metadata::MetadataResolver;
use tokio::sync::{
    broadcast,
    mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use tracing::{debug, info, warn};

use crate::{Interrupted, Terminator};

use super::{
    action::Action,
    session::{Effect, Reaction, Session},
};

/// [StateStore] owns the hub. Actions are applied one at a time in arrival order and the resulting
/// events are handed to the console for writing.
pub struct StateStore {
    event_tx: UnboundedSender<Event>,
    resolver: Arc<dyn MetadataResolver>,
    eviction_delay: Duration,
}

impl StateStore {
    pub fn new(
        resolver: Arc<dyn MetadataResolver>,
        eviction_delay: Duration,
    ) -> (Self, UnboundedReceiver<Event>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

        (
            StateStore {
                event_tx,
                resolver,
                eviction_delay,
            },
            event_rx,
        )
    }
}

impl StateStore {
    pub async fn main_loop(
        self,
        mut session: Session,
        mut terminator: Terminator,
        mut action_rx: UnboundedReceiver<Action>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        // spawned effects report back here
        let (effect_tx, mut effect_rx) = mpsc::unbounded_channel::<Action>();

        let result = loop {
            tokio::select! {
                // Handle the commands coming from the console
                Some(action) = action_rx.recv() => match action {
                    Action::Exit => {
                        let _ = terminator.terminate(Interrupted::UserInt);

                        break Interrupted::UserInt;
                    },
                    action => self.apply(&mut session, action, &effect_tx)?,
                },
                // Handle the results of background work
                Some(action) = effect_rx.recv() => self.apply(&mut session, action, &effect_tx)?,
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break interrupted;
                }
            }
        };

        Ok(result)
    }

    fn apply(
        &self,
        session: &mut Session,
        action: Action,
        effect_tx: &UnboundedSender<Action>,
    ) -> anyhow::Result<()> {
        let reaction = match action {
            Action::Command(command) => session.apply(command),
            Action::EvictKicked {
                user_id,
                room_id,
                room_name,
            } => session.evict(&user_id, &room_id, &room_name),
            Action::LinkMetadata {
                room_id,
                link_id,
                metadata,
            } => session.apply_link_metadata(&room_id, &link_id, metadata),
            Action::Exit => Reaction::default(),
        };

        for effect in reaction.effects {
            self.spawn(effect, effect_tx.clone());
        }

        for event in reaction.events {
            self.event_tx.send(event)?;
        }

        Ok(())
    }

    /// Runs an effect in the background. Its result comes back as an action, or not at all.
    fn spawn(&self, effect: Effect, effect_tx: UnboundedSender<Action>) {
        match effect {
            Effect::Evict {
                user_id,
                room_id,
                room_name,
            } => {
                let delay = self.eviction_delay;

                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;

                    let _ = effect_tx.send(Action::EvictKicked {
                        user_id,
                        room_id,
                        room_name,
                    });
                });
            }
            Effect::FetchMetadata(track) => {
                let resolver = self.resolver.clone();

                tokio::spawn(async move {
                    match resolver.resolve(&track.url, track.platform).await {
                        Ok(Some(metadata)) => {
                            info!(link_id = %track.link_id, "link metadata found");

                            let _ = effect_tx.send(Action::LinkMetadata {
                                room_id: track.room_id,
                                link_id: track.link_id,
                                metadata,
                            });
                        }
                        Ok(None) => debug!(url = %track.url, "no metadata for link"),
                        Err(err) => warn!(url = %track.url, "metadata lookup failed: {:#}", err),
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use jam_model::{
        command::{
            AdminAction, AdminCommand, Command, CredentialsCommand, RoomCommand, SubmitCommand,
        },
        room::{Platform, RoomDetails},
    };
    use jam_rooms::{
        directory::MemoryStore,
        metadata::{LinkMetadata, NoMetadata},
        Hub, JamConfig,
    };

    use crate::termination::create_termination;

    use super::*;

    struct StubResolver;

    #[async_trait]
    impl MetadataResolver for StubResolver {
        async fn resolve(&self, url: &str, _: Platform) -> anyhow::Result<Option<LinkMetadata>> {
            Ok(Some(LinkMetadata {
                title: Some(format!("title of {}", url)),
                thumbnail: Some("https://img.example/t.jpg".into()),
            }))
        }
    }

    fn login(name: &str) -> Action {
        Action::Command(Command::Login(CredentialsCommand {
            name: name.into(),
            password: "secret1".into(),
        }))
    }

    fn signup(name: &str) -> Action {
        Action::Command(Command::Signup(CredentialsCommand {
            name: name.into(),
            password: "secret1".into(),
        }))
    }

    async fn next_matching<F>(event_rx: &mut UnboundedReceiver<Event>, predicate: F) -> Event
    where
        F: Fn(&Event) -> bool,
    {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                match event_rx.recv().await {
                    Some(event) if predicate(&event) => return event,
                    Some(_) => continue,
                    None => panic!("event channel closed"),
                }
            }
        })
        .await
        .expect("no matching event in time")
    }

    #[tokio::test]
    async fn test_kicked_user_is_evicted_after_the_delay() {
        let (terminator, interrupt_rx) = create_termination();
        let (store, mut event_rx) =
            StateStore::new(Arc::new(NoMetadata), Duration::from_millis(20));
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let session = Session::new(Hub::new(JamConfig::in_memory(), Box::new(MemoryStore::new())));

        let handle = tokio::spawn(store.main_loop(session, terminator, action_rx, interrupt_rx));

        action_tx.send(signup("alice")).unwrap();
        action_tx.send(signup("bob")).unwrap();
        action_tx.send(login("alice")).unwrap();
        action_tx
            .send(Action::Command(Command::CreateRoom(RoomDetails {
                name: "Tapes".into(),
                description: "Cassettes".into(),
                ..RoomDetails::default()
            })))
            .unwrap();

        let Event::Room(room) = next_matching(&mut event_rx, |e| matches!(e, Event::Room(_))).await
        else {
            unreachable!()
        };

        action_tx.send(login("bob")).unwrap();
        action_tx
            .send(Action::Command(Command::JoinRoom(RoomCommand {
                room: room.id.clone(),
            })))
            .unwrap();
        let Event::SignedIn(bob) = next_matching(&mut event_rx, |e| {
            matches!(e, Event::SignedIn(s) if s.user.name == "bob")
        })
        .await
        else {
            unreachable!()
        };

        // only alice can kick, bob is back at his desk before the eviction fires
        action_tx.send(login("alice")).unwrap();
        action_tx
            .send(Action::Command(Command::Admin(AdminCommand {
                room: room.id.clone(),
                action: AdminAction::Kick,
                target: bob.user.id.clone(),
            })))
            .unwrap();
        action_tx.send(login("bob")).unwrap();

        let Event::Notification(notification) =
            next_matching(&mut event_rx, |e| matches!(e, Event::Notification(_))).await
        else {
            unreachable!()
        };
        assert_eq!(notification.message, "You have been kicked from \"Tapes\".");

        let Event::Desk(desk) = next_matching(&mut event_rx, |e| matches!(e, Event::Desk(_))).await
        else {
            unreachable!()
        };
        assert!(desk.open.is_empty());

        action_tx.send(Action::Exit).unwrap();
        assert_eq!(handle.await.unwrap().unwrap(), Interrupted::UserInt);
    }

    #[tokio::test]
    async fn test_shared_link_gets_metadata() {
        let (terminator, interrupt_rx) = create_termination();
        let (store, mut event_rx) =
            StateStore::new(Arc::new(StubResolver), Duration::from_millis(20));
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let session = Session::new(Hub::new(JamConfig::in_memory(), Box::new(MemoryStore::new())));

        let handle = tokio::spawn(store.main_loop(session, terminator, action_rx, interrupt_rx));

        action_tx.send(signup("alice")).unwrap();
        action_tx
            .send(Action::Command(Command::JoinRoom(RoomCommand {
                room: "LOFIHIVE".into(),
            })))
            .unwrap();
        action_tx
            .send(Action::Command(Command::Submit(SubmitCommand {
                room: "LOFIHIVE".into(),
                input: "https://soundcloud.com/artist/night-drive".into(),
            })))
            .unwrap();

        let event = next_matching(&mut event_rx, |e| {
            matches!(e, Event::Room(room) if room.music_links.iter().any(|l| l.thumbnail.is_some()))
        })
        .await;
        let Event::Room(room) = event else {
            unreachable!()
        };
        let link = room.music_links.last().unwrap();
        assert_eq!(link.title, "title of https://soundcloud.com/artist/night-drive");

        action_tx.send(Action::Exit).unwrap();
        assert_eq!(handle.await.unwrap().unwrap(), Interrupted::UserInt);
    }
}
