//! Terminal shell — stdin/stdout front end that drives the portal.
//!
//! One command per line. The shell renders the active screen after every
//! action, much like the browser re-renders after a callback.

use std::fmt::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use crate::error::FlowError;
use crate::onboarding::{FileField, Step, TextField, Viewport, VisibleField, options};
use crate::portal::Portal;
use crate::screen::Screen;
use crate::signup::CountdownEvent;

const HELP: &str = "\
Commands:
  show                      redraw the current screen
  login | signup            switch between the login and signup screens
  id <text>                 login id (mobile, email or partner id)
  password <text>           login password
  show-password             toggle password visibility (login or step 1)
  show-confirm-password     toggle confirm password visibility (step 1)
  mobile <digits>           signup mobile number
  otp <digits>              signup OTP
  send-otp                  send or resend the OTP
  set <field> <value>       set an onboarding field, e.g. `set pincode 560034`
  file <field> <name>       attach a document, e.g. `file panDocName pan.pdf`
  remove <field>            remove an attached document
  agree | disagree          accept or withdraw the partnership agreement
  next | back               move between onboarding steps
  submit                    submit the current screen
  home                      back to home from the success screen
  quit                      exit";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Help,
    Quit,
    Login,
    Signup,
    LoginId(String),
    Password(String),
    TogglePassword,
    ToggleConfirmPassword,
    Mobile(String),
    Otp(String),
    SendOtp,
    Set(TextField, String),
    File(FileField, String),
    Remove(FileField),
    Agree(bool),
    Next,
    Back,
    Submit,
    Home,
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let needs_arg = |what: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("`{head}` needs {what}"))
            } else {
                Ok(rest.to_string())
            }
        };

        let cmd = match head {
            "show" | "screen" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "login" => Self::Login,
            "signup" => Self::Signup,
            "id" => Self::LoginId(needs_arg("a login id")?),
            "password" => Self::Password(needs_arg("a password")?),
            "show-password" => Self::TogglePassword,
            "show-confirm-password" => Self::ToggleConfirmPassword,
            "mobile" => Self::Mobile(rest.to_string()),
            "otp" => Self::Otp(rest.to_string()),
            "send-otp" | "resend" => Self::SendOtp,
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = field.parse::<TextField>().map_err(|e| e.to_string())?;
                Self::Set(field, value.trim().to_string())
            }
            "file" => {
                let (field, name) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "`file` needs a field and a file name".to_string())?;
                let field = field.parse::<FileField>().map_err(|e| e.to_string())?;
                Self::File(field, name.trim().to_string())
            }
            "remove" => Self::Remove(
                needs_arg("a file field")?
                    .parse::<FileField>()
                    .map_err(|e| e.to_string())?,
            ),
            "agree" => Self::Agree(true),
            "disagree" => Self::Agree(false),
            "next" => Self::Next,
            "back" | "prev" => Self::Back,
            "submit" => Self::Submit,
            "home" => Self::Home,
            "" => Self::Show,
            other => return Err(format!("Unknown command `{other}`; type `help`")),
        };
        Ok(cmd)
    }
}

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Clears the terminal when the onboarding step changes.
#[derive(Debug, Default)]
pub struct TerminalViewport;

impl Viewport for TerminalViewport {
    fn scroll_to_top(&self, _step: Step) {
        print!("\x1b[2J\x1b[H");
    }
}

pub struct Shell {
    portal: Portal,
}

impl Shell {
    pub fn new(portal: Portal) -> Self {
        Self { portal }
    }

    pub fn portal(&self) -> &Portal {
        &self.portal
    }

    /// Read commands from stdin until EOF or `quit`.
    pub async fn run(mut self) {
        let mut countdown = self.portal.signup().subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("{}", render(&self.portal).await);
        eprint!("> ");

        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => match self.handle(&line).await {
                        Reply::Text(text) => {
                            println!("{text}");
                            eprint!("> ");
                        }
                        Reply::Quit => break,
                    },
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        break;
                    }
                },
                event = countdown.recv() => match event {
                    Ok(CountdownEvent::Finished) => {
                        println!("\nOTP countdown finished, resend is available.");
                        eprint!("> ");
                    }
                    Ok(CountdownEvent::Tick { .. }) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                },
            }
        }
    }

    /// Apply one input line and return what to print.
    pub async fn handle(&mut self, line: &str) -> Reply {
        let cmd = match Command::parse(line) {
            Ok(cmd) => cmd,
            Err(e) => return Reply::Text(e),
        };
        match cmd {
            Command::Quit => Reply::Quit,
            Command::Help => Reply::Text(HELP.to_string()),
            Command::Show => Reply::Text(render(&self.portal).await),
            cmd => match self.apply(cmd).await {
                Ok(()) => Reply::Text(render(&self.portal).await),
                Err(e) => Reply::Text(format!("✗ {e}")),
            },
        }
    }

    async fn apply(&mut self, cmd: Command) -> Result<(), FlowError> {
        let portal = &mut self.portal;
        match cmd {
            Command::Login => {
                portal.go_to_login().await?;
            }
            Command::Signup => {
                portal.go_to_signup().await?;
            }
            Command::LoginId(id) => portal.login_mut()?.set_login_id(id),
            Command::Password(password) => portal.login_mut()?.set_password(password),
            Command::TogglePassword => {
                if portal.screen() == Screen::Onboarding {
                    portal.form_mut()?.toggle_password_visibility();
                } else {
                    portal.login_mut()?.toggle_password_visibility();
                }
            }
            Command::ToggleConfirmPassword => {
                portal.form_mut()?.toggle_confirm_password_visibility();
            }
            Command::Mobile(raw) => {
                portal.signup_mut()?.set_mobile(&raw).await;
            }
            Command::Otp(raw) => {
                portal.signup_mut()?.set_otp(&raw).await;
            }
            Command::SendOtp => portal.signup_mut()?.send_otp().await?,
            Command::Set(field, value) => portal.form_mut()?.set_field(field, value).await,
            Command::File(field, name) => portal.form_mut()?.set_file(field, name).await,
            Command::Remove(field) => portal.form_mut()?.clear_file(field).await,
            Command::Agree(agreed) => portal.form_mut()?.set_partnership_agreed(agreed).await,
            Command::Next => {
                portal.form_mut()?.next_step().await;
            }
            Command::Back => {
                portal.form_mut()?.prev_step().await;
            }
            Command::Submit => {
                match portal.screen() {
                    Screen::Login => portal.submit_login().await?,
                    Screen::Signup => portal.submit_signup().await?,
                    Screen::Onboarding => portal.submit_onboarding().await?,
                    Screen::Success => portal.back_to_home().await?,
                };
            }
            Command::Home => {
                portal.back_to_home().await?;
            }
            Command::Show | Command::Help | Command::Quit => {}
        }
        Ok(())
    }
}

/// Text rendering of the active screen.
pub async fn render(portal: &Portal) -> String {
    let mut out = String::new();
    match portal.screen() {
        Screen::Login => {
            let login = portal.login();
            let _ = writeln!(out, "== Welcome back ==");
            let _ = writeln!(out, "Login id: {}", login.login_id);
            let _ = writeln!(out, "Password: {}", login.displayed_password());
            let _ = write!(
                out,
                "[submit: {}]  Don't have an account? `signup`",
                enabled(login.can_submit())
            );
        }
        Screen::Signup => {
            let session = portal.signup().snapshot().await;
            let _ = writeln!(out, "== Create Account ==");
            let _ = writeln!(
                out,
                "Mobile: {}  [{}: {}]",
                session.mobile(),
                session.otp_button_label(),
                enabled(session.can_send_otp())
            );
            let _ = writeln!(out, "OTP: {}", session.otp());
            let _ = write!(
                out,
                "[submit: {}]  Already have an account? `login`",
                enabled(session.can_submit())
            );
        }
        Screen::Onboarding => render_onboarding(portal, &mut out),
        Screen::Success => {
            let _ = writeln!(out, "== Submission Successful! ==");
            let _ = writeln!(
                out,
                "Our team will review your documents, and your account will be activated within 12-48 hours."
            );
            let _ = write!(out, "`home` to go back");
        }
    }
    out
}

fn render_onboarding(portal: &Portal, out: &mut String) {
    let form = portal.form();
    let record = form.record();
    let step = form.step();

    let progress: Vec<String> = Step::all()
        .map(|s| {
            let mark = if s < step {
                "✓"
            } else if s == step {
                "●"
            } else {
                "○"
            };
            format!("{mark} {}", s.title())
        })
        .collect();
    let _ = writeln!(out, "{}", progress.join("  "));
    let _ = writeln!(out, "== Step {step}: {} ==", step.title());
    let _ = writeln!(out, "{}", step.subtitle());

    for field in form.visible_fields() {
        match field {
            VisibleField::Text(f) => {
                let _ = writeln!(out, "  {f}: {}", form.displayed_value(f));
            }
            VisibleField::File(f) => {
                let name = record.file(f);
                let shown = if name.is_empty() { "(no file)" } else { name };
                let _ = writeln!(out, "  {f}: {shown}");
            }
            VisibleField::PartnershipAgreement => {
                let mark = if record.partnership_agreed { "x" } else { " " };
                let _ = writeln!(
                    out,
                    "  [{mark}] I agree to the Partnership Terms & Conditions"
                );
            }
        }
    }
    if step.get() == 2 {
        let _ = writeln!(
            out,
            "  preview: {} [{}]",
            if record.display_name.is_empty() {
                "Your Business Name"
            } else {
                record.display_name.as_str()
            },
            options::service_preview_label(&record.business_service)
        );
    }

    let _ = if step.is_last() {
        write!(out, "[submit: {}]", enabled(form.can_submit()))
    } else if step.is_first() {
        write!(out, "`next` to continue")
    } else {
        write!(out, "`back` / `next`")
    };
}

fn enabled(on: bool) -> &'static str {
    if on { "enabled" } else { "disabled" }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::PortalConfig;
    use crate::store::{MemoryStore, PersistenceStore, keys};

    async fn shell_with(store: Arc<MemoryStore>) -> Shell {
        Shell::new(Portal::restore(store, &PortalConfig::default()).await)
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("next").unwrap(), Command::Next);
        assert_eq!(Command::parse("  ").unwrap(), Command::Show);
        assert_eq!(
            Command::parse("set pincode 560034").unwrap(),
            Command::Set(TextField::Pincode, "560034".to_string())
        );
        assert_eq!(
            Command::parse("set displayName Spice Route Caterers").unwrap(),
            Command::Set(TextField::DisplayName, "Spice Route Caterers".to_string())
        );
        assert_eq!(
            Command::parse("set city").unwrap(),
            Command::Set(TextField::City, String::new())
        );
        assert_eq!(
            Command::parse("file panDocName my pan.pdf").unwrap(),
            Command::File(FileField::PanDoc, "my pan.pdf".to_string())
        );
        assert_eq!(
            Command::parse("remove bankDocName").unwrap(),
            Command::Remove(FileField::BankDoc)
        );
        assert_eq!(
            Command::parse("mobile 98765 43210").unwrap(),
            Command::Mobile("98765 43210".to_string())
        );
    }

    #[test]
    fn parse_errors() {
        assert!(Command::parse("dance").unwrap_err().contains("Unknown command"));
        assert!(Command::parse("set nickname Bob").unwrap_err().contains("nickname"));
        assert!(Command::parse("file panDocName").is_err());
        assert!(Command::parse("id").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn walk_through_signup_and_onboarding() {
        let store = Arc::new(MemoryStore::new());
        let mut shell = shell_with(store.clone()).await;

        text(shell.handle("signup").await);
        let out = text(shell.handle("mobile 98765-43210").await);
        assert!(out.contains("Mobile: 9876543210"));
        assert!(out.contains("[Send: enabled]"));

        let out = text(shell.handle("send-otp").await);
        assert!(out.contains("[0:59: disabled]"));

        text(shell.handle("otp 123456").await);
        let out = text(shell.handle("submit").await);
        assert!(out.contains("Step 1: Owner Details"));
        assert!(!shell.portal().signup().countdown_active());

        text(shell.handle("set ownerName Asha Rao").await);
        text(shell.handle("next").await);
        let out = text(shell.handle("set pincode 560034").await);
        assert!(out.contains("city: Bengaluru"));
        assert!(out.contains("state: Karnataka"));

        text(shell.handle("set businessService catering").await);
        let out = text(shell.handle("next").await);
        assert!(out.contains("fssaiNumber"));
        assert!(!out.contains("gstNumber"));

        let out = text(shell.handle("set gstRegistered Yes").await);
        assert!(out.contains("gstNumber"));

        text(shell.handle("next").await);
        let out = text(shell.handle("next").await);
        assert!(out.contains("[submit: disabled]"));

        let out = text(shell.handle("submit").await);
        assert!(out.contains("partnership agreement"));

        text(shell.handle("agree").await);
        let out = text(shell.handle("submit").await);
        assert!(out.contains("Submission Successful"));
        assert!(store.get(keys::FORM_DATA).await.unwrap().is_none());

        let out = text(shell.handle("home").await);
        assert!(out.contains("Welcome back"));
    }

    #[tokio::test]
    async fn wrong_screen_is_reported() {
        let store = Arc::new(MemoryStore::new());
        let mut shell = shell_with(store).await;
        let out = text(shell.handle("next").await);
        assert!(out.starts_with('✗'));
        assert!(out.contains("onboarding"));
    }

    #[tokio::test]
    async fn secrets_are_masked() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::SCREEN, "onboarding").await.unwrap();
        let mut shell = shell_with(store).await;
        let out = text(shell.handle("set password hunter2").await);
        assert!(out.contains("password: •••••••"));
        assert!(!out.contains("hunter2"));
    }

    #[tokio::test]
    async fn step_one_passwords_can_be_revealed() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::SCREEN, "onboarding").await.unwrap();
        let mut shell = shell_with(store).await;
        text(shell.handle("set password hunter2").await);
        text(shell.handle("set confirmPassword hunter3").await);

        let out = text(shell.handle("show-password").await);
        assert!(out.contains("password: hunter2"));
        assert!(out.contains("confirmPassword: •••••••"));

        let out = text(shell.handle("show-confirm-password").await);
        assert!(out.contains("confirmPassword: hunter3"));

        let out = text(shell.handle("show-password").await);
        assert!(out.contains("password: •••••••"));
        assert!(out.contains("confirmPassword: hunter3"));
    }

    #[tokio::test]
    async fn confirm_toggle_belongs_to_onboarding() {
        let store = Arc::new(MemoryStore::new());
        let mut shell = shell_with(store).await;
        let out = text(shell.handle("show-confirm-password").await);
        assert!(out.starts_with('✗'));
        assert_eq!(
            Command::parse("show-confirm-password").unwrap(),
            Command::ToggleConfirmPassword
        );
    }

    #[tokio::test]
    async fn quit() {
        let store = Arc::new(MemoryStore::new());
        let mut shell = shell_with(store).await;
        assert_eq!(shell.handle("quit").await, Reply::Quit);
    }
}
