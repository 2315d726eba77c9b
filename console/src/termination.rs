#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::broadcast;
use tracing::{error, info};

/// Why the console session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    /// Ctrl-C
    OsSigInt,
    /// Stopped by a supervisor, e.g. `kill` or a container runtime
    OsSigTerm,
    /// A quit command, or the input was closed
    UserInt,
}

#[derive(Debug, Clone)]
pub struct Terminator {
    interrupt_tx: broadcast::Sender<Interrupted>,
}

impl Terminator {
    pub fn new(interrupt_tx: broadcast::Sender<Interrupted>) -> Self {
        Self { interrupt_tx }
    }

    pub fn terminate(&mut self, interrupted: Interrupted) -> anyhow::Result<()> {
        self.interrupt_tx.send(interrupted)?;

        Ok(())
    }
}

#[cfg(unix)]
async fn terminate_by_unix_signal(mut terminator: Terminator) {
    let signals = signal(SignalKind::interrupt())
        .and_then(|int| Ok((int, signal(SignalKind::terminate())?)));
    let (mut sig_int, mut sig_term) = match signals {
        Ok(signals) => signals,
        Err(err) => {
            error!(%err, "failed to listen for os signals");
            return;
        }
    };

    let interrupted = tokio::select! {
        _ = sig_int.recv() => Interrupted::OsSigInt,
        _ = sig_term.recv() => Interrupted::OsSigTerm,
    };
    info!(?interrupted, "received os signal");

    if let Err(err) = terminator.terminate(interrupted) {
        error!(%err, "failed to send interrupt signal");
    }
}

// create a broadcast channel for retrieving the application kill signal
pub fn create_termination() -> (Terminator, broadcast::Receiver<Interrupted>) {
    let (tx, rx) = broadcast::channel(1);
    let terminator = Terminator::new(tx);

    #[cfg(unix)]
    tokio::spawn(terminate_by_unix_signal(terminator.clone()));

    (terminator, rx)
}
