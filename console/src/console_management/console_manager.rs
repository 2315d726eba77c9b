use anyhow::Context;
use jam_model::{command::Command, event::Event, transport};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    sync::{
        broadcast,
        mpsc::{self, UnboundedReceiver},
    },
};
use tokio_stream::StreamExt;
use tracing::{debug, warn};

use crate::{state_store::action::Action, Interrupted};

/// [ConsoleManager] reads commands from the console input and writes the events of the store out
pub struct ConsoleManager {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl ConsoleManager {
    pub fn new() -> (Self, UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        (Self { action_tx }, action_rx)
    }

    pub async fn main_loop<R, W>(
        self,
        reader: R,
        writer: W,
        mut event_rx: UnboundedReceiver<Event>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Unpin,
    {
        let (mut commands, mut event_writer) = transport::console::split(reader, writer);
        let mut input_open = true;

        let result: anyhow::Result<Interrupted> = loop {
            tokio::select! {
                // Handle the commands typed in, or piped in by a script
                maybe_command = commands.next(), if input_open => match maybe_command {
                    Some(Ok(Command::Quit(_))) | None => {
                        debug!("console input finished");
                        input_open = false;
                        self.action_tx.send(Action::Exit)?;
                    },
                    Some(Ok(command)) => {
                        self.action_tx.send(Action::Command(command))?;
                    },
                    Some(Err(err)) => {
                        warn!("skipping unreadable command: {:#}", err);
                    },
                },
                // Write out whatever the store emitted
                Some(event) = event_rx.recv() => {
                    event_writer
                        .write(&event)
                        .await
                        .context("could not write event")?;
                },
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break Ok(interrupted);
                }
            }
        };

        // events emitted right before the interrupt still go out
        while let Ok(event) = event_rx.try_recv() {
            event_writer
                .write(&event)
                .await
                .context("could not write event")?;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use jam_model::{
        command::{QuitCommand, SearchCommand},
        event::AuthFailedEvent,
        transport::driver,
    };
    use tokio::io::duplex;

    use crate::termination::create_termination;

    use super::*;

    #[tokio::test]
    async fn test_commands_in_events_out() {
        let (console_io, driver_io) = duplex(1024);
        let (console_reader, console_writer) = tokio::io::split(console_io);
        let (driver_reader, driver_writer) = tokio::io::split(driver_io);
        let (mut events, mut commands) = driver::split(driver_reader, driver_writer);

        let (mut terminator, interrupt_rx) = create_termination();
        let (console, mut action_rx) = ConsoleManager::new();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(console.main_loop(
            console_reader,
            console_writer,
            event_rx,
            interrupt_rx,
        ));

        commands
            .write(&Command::Search(SearchCommand {
                query: "lofi".into(),
            }))
            .await
            .unwrap();
        commands.write(&Command::Quit(QuitCommand)).await.unwrap();

        assert!(matches!(
            action_rx.recv().await,
            Some(Action::Command(Command::Search(_)))
        ));
        assert!(matches!(action_rx.recv().await, Some(Action::Exit)));

        let event = Event::AuthFailed(AuthFailedEvent {
            reason: "Sign in first.".into(),
        });
        event_tx.send(event.clone()).unwrap();
        assert_eq!(events.next().await.unwrap().unwrap(), event);

        terminator.terminate(Interrupted::UserInt).unwrap();
        assert_eq!(handle.await.unwrap().unwrap(), Interrupted::UserInt);
    }
}
