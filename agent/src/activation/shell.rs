use crate::screenshot::{self, Screenshot};
use crate::snapshot;
use crate::submission::TicketClient;
use common::snapshot::SystemSnapshot;
use common::ticket::{SubmitOutcome, TicketSubmission};
use std::sync::{
    mpsc::{channel, Receiver, Sender},
    Arc,
};
use std::thread;

/// Everything the UI-owning thread reacts to. Hotkey activations and worker
/// results both arrive here, so UI state is only ever touched on its own turn
pub enum UiEvent {
    Activate {
        snapshot: SystemSnapshot,
        screenshot: Option<Screenshot>,
    },
    SubmitResult(SubmitOutcome),
    Quit,
}

/// The presentation seam. The host window toolkit implements this, the agent
/// drives it from the event loop
pub trait TicketForm {
    /// Open the ticket window pre-filled with capture data and block until the
    /// user submits or closes. `None` means the window was closed
    fn open(
        &mut self,
        snapshot: SystemSnapshot,
        screenshot: Option<Screenshot>,
    ) -> Option<TicketSubmission>;

    /// A submission outcome arrived on the UI turn. Return a corrected ticket
    /// to resubmit, or `None` to close the window
    fn outcome(&mut self, outcome: SubmitOutcome) -> Option<TicketSubmission>;

    /// A second activation fired while the window is open. Refocus it
    fn refocus(&mut self);
}

/// Handle given to the tray/hotkey host. Safe to call from any thread, all it
/// does is post events to the UI loop
#[derive(Clone)]
pub struct ActivationShell {
    sender: Sender<UiEvent>,
}

impl ActivationShell {
    /// Post an activation with already-captured data
    pub fn activate(&self, snapshot: SystemSnapshot, screenshot: Option<Screenshot>) {
        let _ = self.sender.send(UiEvent::Activate {
            snapshot,
            screenshot,
        });
    }

    /// Gather a fresh snapshot and screenshot on the calling (hotkey) thread,
    /// then post the activation
    pub fn capture_and_activate(&self) {
        let snapshot = snapshot::collect();
        let screenshot = screenshot::capture();
        self.activate(snapshot, screenshot);
    }

    pub fn quit(&self) {
        let _ = self.sender.send(UiEvent::Quit);
    }
}

/// The UI-owning loop. At most one ticket window is open at a time, every
/// submission runs on a background worker, and results come back as events
pub struct EventLoop {
    sender: Sender<UiEvent>,
    receiver: Receiver<UiEvent>,
    window_open: bool,
}

impl EventLoop {
    pub fn new() -> (EventLoop, ActivationShell) {
        let (sender, receiver) = channel();
        let shell = ActivationShell {
            sender: sender.clone(),
        };

        (
            EventLoop {
                sender,
                receiver,
                window_open: false,
            },
            shell,
        )
    }

    /// Run until a quit event or until every shell handle is gone. Must be
    /// called on the thread that owns the UI
    pub fn run<F: TicketForm>(mut self, form: &mut F, client: &Arc<TicketClient>) {
        while let Ok(event) = self.receiver.recv() {
            match event {
                UiEvent::Activate {
                    snapshot,
                    screenshot,
                } => {
                    if self.window_open {
                        form.refocus();
                        continue;
                    }

                    self.window_open = true;
                    match form.open(snapshot, screenshot) {
                        Some(ticket) => self.dispatch(ticket, client),
                        None => self.window_open = false,
                    }
                }
                UiEvent::SubmitResult(outcome) => {
                    // Results arriving after the window closed are abandoned
                    if !self.window_open {
                        continue;
                    }

                    match form.outcome(outcome) {
                        Some(ticket) => self.dispatch(ticket, client),
                        None => self.window_open = false,
                    }
                }
                UiEvent::Quit => break,
            }
        }
    }

    /// Hand the ticket to a worker thread. The POST may block for its full
    /// timeout, the UI loop keeps consuming events meanwhile
    fn dispatch(&self, ticket: TicketSubmission, client: &Arc<TicketClient>) {
        let sender = self.sender.clone();
        let client = client.clone();

        thread::spawn(move || {
            let outcome = client.submit(&ticket);
            // A dead receiver just drops the result, no cancellation propagates
            let _ = sender.send(UiEvent::SubmitResult(outcome));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivationShell, EventLoop, TicketForm};
    use crate::submission::TicketClient;
    use crate::utils::config::Helpdesk;
    use common::snapshot::SystemSnapshot;
    use common::ticket::{Priority, SubmitOutcome, TicketSubmission};
    use httpmock::{
        Method::{GET, POST},
        MockServer,
    };
    use std::sync::{
        mpsc::{channel, Sender},
        Arc,
    };
    use std::thread;
    use std::time::Duration;

    struct FakeForm {
        events: Sender<String>,
        shell: ActivationShell,
        submits_left: usize,
    }

    fn fake_ticket() -> TicketSubmission {
        TicketSubmission {
            name: String::from("jdoe"),
            email: String::from("jdoe@example.com"),
            subject: String::from("Laptop will not boot"),
            description: String::from("Black screen since this morning."),
            priority: Priority::Medium,
            snapshot: SystemSnapshot::default(),
            screenshot: None,
        }
    }

    impl TicketForm for FakeForm {
        fn open(
            &mut self,
            _snapshot: SystemSnapshot,
            _screenshot: Option<crate::screenshot::Screenshot>,
        ) -> Option<TicketSubmission> {
            let _ = self.events.send(String::from("open"));
            if self.submits_left > 0 {
                self.submits_left -= 1;
                return Some(fake_ticket());
            }
            None
        }

        fn outcome(&mut self, outcome: SubmitOutcome) -> Option<TicketSubmission> {
            let _ = self.events.send(format!("outcome:{}", outcome.success));
            self.shell.quit();
            None
        }

        fn refocus(&mut self) {
            let _ = self.events.send(String::from("refocus"));
        }
    }

    fn test_client(port: u16) -> Arc<TicketClient> {
        Arc::new(TicketClient::new(&Helpdesk {
            endpoint: format!("http://127.0.0.1:{port}/api/1.1/json/tickets/"),
            api_key: String::from("my key"),
            auth_code: String::from("my code"),
            category: String::from("Helpdesk - Colorado"),
            default_category: 1,
            default_email: String::new(),
            log_path: String::from("./tmp/helpdesk-agent"),
            log_level: String::from("warn"),
        }))
    }

    #[test]
    fn test_second_activation_refocuses_open_window() {
        let mock_server = MockServer::start();

        let _categories = mock_server.mock(|when, then| {
            when.method(GET).path("/api/1.1/json/categories/");
            then.status(500);
        });
        let _tickets = mock_server.mock(|when, then| {
            when.method(POST).path("/api/1.1/json/tickets/");
            then.status(201);
        });

        let (event_loop, shell) = EventLoop::new();
        let (events, observed) = channel();
        let mut form = FakeForm {
            events,
            shell: shell.clone(),
            submits_left: 1,
        };

        shell.activate(SystemSnapshot::default(), None);
        shell.activate(SystemSnapshot::default(), None);

        let client = test_client(mock_server.port());
        let handle = thread::spawn(move || {
            event_loop.run(&mut form, &client);
        });

        let timeout = Duration::from_secs(10);
        assert_eq!(observed.recv_timeout(timeout).unwrap(), "open");
        assert_eq!(observed.recv_timeout(timeout).unwrap(), "refocus");
        assert_eq!(observed.recv_timeout(timeout).unwrap(), "outcome:true");

        handle.join().unwrap();
    }

    #[test]
    fn test_activation_reopens_after_close() {
        let (event_loop, shell) = EventLoop::new();
        let (events, observed) = channel();
        // The form closes immediately, no submission is dispatched
        let mut form = FakeForm {
            events,
            shell: shell.clone(),
            submits_left: 0,
        };

        shell.activate(SystemSnapshot::default(), None);
        shell.activate(SystemSnapshot::default(), None);
        shell.quit();

        let client = test_client(1);
        event_loop.run(&mut form, &client);

        assert_eq!(observed.recv().unwrap(), "open");
        assert_eq!(observed.recv().unwrap(), "open");
    }
}
