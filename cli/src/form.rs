use agent::activation::{ActivationShell, TicketForm};
use agent::screenshot::Screenshot;
use common::snapshot::SystemSnapshot;
use common::ticket::{Priority, SubmitOutcome, TicketSubmission};
use std::io::{self, BufRead, Write};

/// Console stand-in for the desktop ticket window. Prints the snapshot card,
/// collects the form fields, and drives resubmission after failures
pub(crate) struct ConsoleForm {
    shell: ActivationShell,
    last_ticket: Option<TicketSubmission>,
}

impl ConsoleForm {
    pub(crate) fn new(shell: ActivationShell) -> ConsoleForm {
        ConsoleForm {
            shell,
            last_ticket: None,
        }
    }
}

impl TicketForm for ConsoleForm {
    fn open(
        &mut self,
        snapshot: SystemSnapshot,
        screenshot: Option<Screenshot>,
    ) -> Option<TicketSubmission> {
        println!("--- System Information ---");
        println!("Host: {}  |  User: {}", snapshot.hostname, snapshot.username);
        println!("OS: {}  |  IP: {}", snapshot.os_info, snapshot.local_ip);
        println!(
            "CPU: {:.1}%  |  RAM: {:.1}% ({})  |  Disk: {:.1}%",
            snapshot.cpu_usage, snapshot.ram_usage, snapshot.total_ram, snapshot.disk_usage
        );
        println!(
            "Uptime: {}  |  Battery: {}",
            snapshot.uptime, snapshot.battery
        );

        let mut attach = None;
        if let Some(capture) = screenshot {
            println!(
                "Screenshot captured ({}x{})",
                capture.image.width(),
                capture.image.height()
            );
            // Mirrors the "remove screenshot" checkbox in the desktop window
            let keep = prompt("Attach screenshot? [Y/n]")?;
            if !keep.eq_ignore_ascii_case("n") {
                attach = Some(capture.png);
            }
        } else {
            println!("No screenshot available, the ticket will be text only");
        }

        let email = prompt("Your email")?;

        let default_subject = format!(
            "Support Request from {} on {}",
            snapshot.username, snapshot.hostname
        );
        let mut subject = prompt(&format!("Subject [{default_subject}]"))?;
        if subject.is_empty() {
            subject = default_subject;
        }

        let mut description = String::new();
        while description.is_empty() {
            description = prompt("Describe the problem")?;
            if description.is_empty() {
                println!("Description is required.");
            }
        }

        let priority = Priority::from_label(&prompt("Priority [Low/Medium/High]")?);

        let ticket = TicketSubmission {
            name: snapshot.username.clone(),
            email,
            subject,
            description,
            priority,
            snapshot,
            screenshot: attach,
        };

        println!("Sending...");
        self.last_ticket = Some(ticket.clone());
        Some(ticket)
    }

    fn outcome(&mut self, outcome: SubmitOutcome) -> Option<TicketSubmission> {
        if outcome.success {
            println!("{}", outcome.message);
            self.shell.quit();
            return None;
        }

        println!("Submission failed: {}", outcome.message);
        let answer = match prompt("Press Enter to resubmit, or type q to give up") {
            Some(result) => result,
            None => {
                self.shell.quit();
                return None;
            }
        };

        if answer.eq_ignore_ascii_case("q") {
            self.shell.quit();
            return None;
        }

        println!("Sending...");
        self.last_ticket.clone()
    }

    fn refocus(&mut self) {
        println!("A ticket is already being filled in.");
    }
}

/// Read one trimmed line. `None` means stdin is closed and the form gives up
fn prompt(label: &str) -> Option<String> {
    print!("{label}: ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}
