use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Cancellation token handed to every invoked command.
///
/// The dispatcher never inspects it; a handler is solely responsible for
/// observing cancellation, e.g. by polling [`Context::is_cancelled`] between
/// units of work. Cloning yields a handle to the same token.
#[derive(Clone, Debug, Default)]
pub struct Context {
    cancelled: Arc<AtomicBool>,
}

impl Context {
    /// A token that is never cancelled unless [`Context::cancel`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token cancelled when the process receives SIGINT or SIGTERM.
    ///
    /// The signal handler is installed at most once per process; every token
    /// returned by this constructor shares the same flag. If another handler
    /// was already installed elsewhere, the token is never signalled.
    pub fn on_termination() -> Self {
        Context {
            cancelled: termination_flag(),
        }
    }

    /// Cancel the token. All clones observe the cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

fn termination_flag() -> Arc<AtomicBool> {
    static FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();
    FLAG.get_or_init(|| {
        let flag = Arc::new(AtomicBool::new(false));
        let handle = flag.clone();
        let _ = ctrlc::set_handler(move || handle.store(true, Ordering::SeqCst));
        flag
    })
    .clone()
}
