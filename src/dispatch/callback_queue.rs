use tokio::sync::mpsc;
use tracing::warn;

type Callback = Box<dyn FnOnce() + Send>;

/// Creates the context callbacks are delivered on. Network tasks post to
/// the `CallbackSender`; callbacks only run on the task driving the
/// `CallbackQueue`, in the order they were posted.
pub fn callback_queue() -> (CallbackSender, CallbackQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CallbackSender { tx }, CallbackQueue { rx })
}

#[derive(Debug, Clone)]
pub struct CallbackSender {
    tx: mpsc::UnboundedSender<Callback>,
}

impl CallbackSender {
    pub fn post(&self, callback: impl FnOnce() + Send + 'static) -> bool {
        match self.tx.send(Box::new(callback)) {
            Ok(_) => true,
            Err(_) => {
                warn!("Callback queue closed, dropping callback");
                false
            }
        }
    }
}

pub struct CallbackQueue {
    rx: mpsc::UnboundedReceiver<Callback>,
}

impl CallbackQueue {
    /// Waits for the next callback and runs it. Returns false once every
    /// sender is gone and the queue is drained.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub async fn run(mut self) {
        while self.run_next().await {}
    }
}
