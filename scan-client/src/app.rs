//! Front end driver
//!
//! Owns the [`SessionState`] and runs the effects its transitions ask for.
//! All events funnel through one channel into one task, so state is never
//! shared. Lookups are spawned and never cancelled: when two overlap, the
//! response that arrives last is the one shown.

use crate::debounce::Debouncer;
use crate::printing::PrintForwarder;
use crate::registration::ProductRegistrar;
use crate::resolver::ProductResolver;
use crate::session::{Effect, FormField, SessionEvent, SessionState, Tab};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Operator commands coming from the terminal (or a test)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Barcode field contents changed
    Input(String),
    Print,
    SwitchTab(Tab),
    Edit(FormField, String),
    Submit,
    Quit,
}

impl UiCommand {
    /// Parse one terminal line
    ///
    /// Plain lines are scanner input; lines starting with `:` are commands
    /// (`:print`, `:tab search|add`, `:set <field> <value>`, `:submit`, `:quit`).
    pub fn parse_line(line: &str) -> Result<Self, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Input(line.to_string()));
        };

        let mut parts = command.splitn(3, ' ');
        match (parts.next().unwrap_or_default(), parts.next(), parts.next()) {
            ("print", None, None) => Ok(Self::Print),
            ("submit", None, None) => Ok(Self::Submit),
            ("quit" | "q", None, None) => Ok(Self::Quit),
            ("tab", Some("search"), None) => Ok(Self::SwitchTab(Tab::Search)),
            ("tab", Some("add"), None) => Ok(Self::SwitchTab(Tab::Register)),
            ("set", Some(field), value) => Ok(Self::Edit(
                field.parse()?,
                value.unwrap_or_default().to_string(),
            )),
            _ => Err(format!("unknown command: {}", line)),
        }
    }
}

/// Rendering surface
pub trait View: Send {
    fn render(&mut self, state: &SessionState);

    /// Blocking notification (print results)
    fn alert(&mut self, message: &str);
}

/// The scanning front end: state, resolver and the two actions
pub struct ScanApp {
    state: SessionState,
    resolver: Arc<dyn ProductResolver>,
    forwarder: PrintForwarder,
    registrar: ProductRegistrar,
    debounce_window: Duration,
}

impl ScanApp {
    pub fn new(
        resolver: Arc<dyn ProductResolver>,
        forwarder: PrintForwarder,
        registrar: ProductRegistrar,
        debounce_window: Duration,
    ) -> Self {
        let state = SessionState::new(resolver.clear_policy());
        Self {
            state,
            resolver,
            forwarder,
            registrar,
            debounce_window,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run until `Quit` or until the command channel closes
    ///
    /// Returns the final state. Pending debounced input and clear timers are
    /// cancelled on the way out; in-flight requests are left to finish.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<UiCommand>,
        view: &mut dyn View,
    ) -> SessionState {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel::<SessionEvent>();
        let shutdown = CancellationToken::new();

        let debouncer = {
            let resolver = self.resolver.clone();
            let events_tx = events_tx.clone();
            Debouncer::spawn(self.debounce_window, move |barcode: String| {
                let resolver = resolver.clone();
                let events_tx = events_tx.clone();
                async move {
                    // spawned so a slow lookup never delays the next burst
                    tokio::spawn(async move {
                        debug!(%barcode, "Resolving");
                        let result = resolver.resolve(&barcode).await;
                        let _ = events_tx.send(SessionEvent::LookupCompleted(result));
                    });
                }
            })
        };

        {
            let resolver = self.resolver.clone();
            let events_tx = events_tx.clone();
            tokio::spawn(async move {
                let result = resolver.load().await;
                let _ = events_tx.send(SessionEvent::ResolverLoaded(result));
            });
        }

        view.render(&self.state);

        loop {
            let event = tokio::select! {
                command = commands.recv() => match command.and_then(Self::to_event) {
                    Some(event) => event,
                    None => break,
                },
                Some(event) = events_rx.recv() => event,
            };

            let transition = self.state.apply(event);
            let changed = transition.state != self.state;
            self.state = transition.state;

            for effect in transition.effects {
                self.run_effect(effect, &debouncer, &events_tx, &shutdown, view);
            }
            if changed {
                view.render(&self.state);
            }
        }

        info!("Scan session closing");
        shutdown.cancel();
        debouncer.shutdown().await;
        self.state
    }

    /// `None` ends the session
    fn to_event(command: UiCommand) -> Option<SessionEvent> {
        let event = match command {
            UiCommand::Input(raw) => SessionEvent::InputChanged(raw),
            UiCommand::Print => SessionEvent::PrintRequested,
            UiCommand::SwitchTab(tab) => SessionEvent::TabSwitched(tab),
            UiCommand::Edit(field, value) => SessionEvent::FormEdited(field, value),
            UiCommand::Submit => SessionEvent::SubmitRequested,
            UiCommand::Quit => return None,
        };
        Some(event)
    }

    fn run_effect(
        &self,
        effect: Effect,
        debouncer: &Debouncer<String>,
        events_tx: &mpsc::UnboundedSender<SessionEvent>,
        shutdown: &CancellationToken,
        view: &mut dyn View,
    ) {
        match effect {
            Effect::Lookup(barcode) => debouncer.push(barcode),
            Effect::ClearInputAfter(delay) if delay.is_zero() => {
                let _ = events_tx.send(SessionEvent::InputCleared);
            }
            Effect::ClearInputAfter(delay) => {
                let events_tx = events_tx.clone();
                let shutdown = shutdown.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = shutdown.cancelled() => {}
                        _ = tokio::time::sleep(delay) => {
                            let _ = events_tx.send(SessionEvent::InputCleared);
                        }
                    }
                });
            }
            Effect::SendPrint(product) => {
                let forwarder = self.forwarder.clone();
                let events_tx = events_tx.clone();
                tokio::spawn(async move {
                    let result = forwarder.send(Some(&product)).await;
                    let _ = events_tx.send(SessionEvent::PrintCompleted(result));
                });
            }
            Effect::Register(body) => {
                let registrar = self.registrar.clone();
                let events_tx = events_tx.clone();
                tokio::spawn(async move {
                    let result = registrar.add_product(&body).await;
                    let _ = events_tx.send(SessionEvent::ProductAdded(result));
                });
            }
            Effect::Alert(message) => view.alert(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_line_is_input() {
        assert_eq!(
            UiCommand::parse_line("5701234567890\r\n"),
            Ok(UiCommand::Input("5701234567890".into()))
        );
        assert_eq!(UiCommand::parse_line(""), Ok(UiCommand::Input(String::new())));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(UiCommand::parse_line(":print"), Ok(UiCommand::Print));
        assert_eq!(UiCommand::parse_line(":q"), Ok(UiCommand::Quit));
        assert_eq!(
            UiCommand::parse_line(":tab add"),
            Ok(UiCommand::SwitchTab(Tab::Register))
        );
        assert_eq!(
            UiCommand::parse_line(":set name Rød pølse"),
            Ok(UiCommand::Edit(FormField::Name, "Rød pølse".into()))
        );
        assert_eq!(
            UiCommand::parse_line(":set price"),
            Ok(UiCommand::Edit(FormField::Price, String::new()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(UiCommand::parse_line(":launch").is_err());
        assert!(UiCommand::parse_line(":tab settings").is_err());
        assert!(UiCommand::parse_line(":set colour red").is_err());
    }
}
