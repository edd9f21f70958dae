pub mod form;
pub mod view;

use std::time::Duration;

use api_types::transaction::{SubmitResponse, TransactionRecord};
use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent};
use engine::DateConvention;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

use self::{
    form::{FormField, FormState},
    view::{StatusLevel, ViewState},
};

const LOAD_FAILED: &str = "Could not load data.";
const SAVING: &str = "Saving…";
const SAVED: &str = "Saved!";
const SUBMIT_FAILED: &str = "Failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Form,
}

/// Completion of a network task, handed back to the event loop.
#[derive(Debug)]
pub enum WorkflowEvent {
    Loaded {
        generation: u64,
        result: std::result::Result<Vec<TransactionRecord>, ClientError>,
    },
    Submitted {
        result: std::result::Result<SubmitResponse, ClientError>,
    },
}

#[derive(Debug)]
pub struct AppState {
    pub view: ViewState,
    pub form: FormState,
    pub focus: Focus,
    pub endpoint: String,
    pub saving: bool,
    pub loading: bool,
    pub last_refresh: Option<DateTime<Local>>,
}

pub struct App {
    client: Client,
    pub state: AppState,
    events_tx: UnboundedSender<WorkflowEvent>,
    events_rx: UnboundedReceiver<WorkflowEvent>,
    /// Ticket of the most recently started load.
    load_generation: u64,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.endpoint)?;
        let convention = DateConvention::from_name(config.timezone.as_deref())?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let state = AppState {
            view: ViewState::new(&config.currency_symbol, convention),
            form: FormState::new(today()),
            focus: Focus::Table,
            endpoint: client.endpoint().to_string(),
            saving: false,
            loading: false,
            last_refresh: None,
        };

        Ok(Self {
            client,
            state,
            events_tx,
            events_rx,
            load_generation: 0,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.start_load();
        let result = self.event_loop(&mut terminal).await;
        self.state.view.chart.teardown();
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            while let Ok(event) = self.events_rx.try_recv() {
                self.handle_workflow_event(event);
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.focus {
            Focus::Table => self.handle_table_action(action),
            Focus::Form => self.handle_form_action(action),
        }
    }

    fn handle_table_action(&mut self, action: AppAction) {
        let view = &mut self.state.view;
        match action {
            AppAction::Input('q' | 'Q') => self.should_quit = true,
            AppAction::Input('r' | 'R') => self.start_load(),
            AppAction::Input('a' | 'A') | AppAction::NextField => {
                self.state.focus = Focus::Form;
            }
            AppAction::Up => view.select_prev(),
            AppAction::Down => view.select_next(),
            AppAction::Left => view.tooltip_prev(),
            AppAction::Right => view.tooltip_next(),
            AppAction::Cancel => view.tooltip = None,
            _ => {}
        }
    }

    fn handle_form_action(&mut self, action: AppAction) {
        let form = &mut self.state.form;
        match action {
            AppAction::Cancel => self.state.focus = Focus::Table,
            AppAction::NextField | AppAction::Down => form.focus_next(),
            AppAction::PrevField | AppAction::Up => form.focus_prev(),
            AppAction::Left | AppAction::Right if form.focus == FormField::Type => form.toggle(),
            AppAction::Backspace => form.backspace(),
            AppAction::Input(ch) => form.input(ch),
            AppAction::Submit => self.submit_form(),
            _ => {}
        }
    }

    /// Fetches every row in the background. Only the newest load is applied.
    fn start_load(&mut self) {
        self.load_generation += 1;
        let generation = self.load_generation;
        self.state.loading = true;
        tracing::debug!(generation, "load started");

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.list_transactions().await;
            let _ = tx.send(WorkflowEvent::Loaded { generation, result });
        });
    }

    fn submit_form(&mut self) {
        if self.state.saving {
            tracing::debug!("submit ignored, one is already in flight");
            return;
        }
        self.state.saving = true;
        self.state.view.set_status(StatusLevel::Pending, SAVING);

        let payload = self.state.form.payload();
        tracing::info!(
            kind = %payload.kind,
            category = %payload.category,
            amount = ?payload.amount,
            "submitting transaction"
        );

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.submit_transaction(&payload).await;
            let _ = tx.send(WorkflowEvent::Submitted { result });
        });
    }

    fn handle_workflow_event(&mut self, event: WorkflowEvent) {
        match event {
            WorkflowEvent::Loaded { generation, result } => {
                if generation != self.load_generation {
                    tracing::debug!(
                        generation,
                        latest = self.load_generation,
                        "stale load discarded"
                    );
                    return;
                }
                self.state.loading = false;

                match result {
                    Ok(records) => {
                        tracing::info!(rows = records.len(), "transactions loaded");
                        self.state.view.apply_records(&records);
                        self.state.last_refresh = Some(Local::now());
                    }
                    Err(err) => {
                        tracing::warn!("load failed: {err}");
                        self.state.view.set_status(StatusLevel::Error, LOAD_FAILED);
                    }
                }
            }
            WorkflowEvent::Submitted { result } => {
                self.state.saving = false;

                match result {
                    Ok(response) if response.is_ok() => {
                        tracing::info!("transaction saved");
                        self.state.view.set_status(StatusLevel::Success, SAVED);
                        self.state.form.reset(today());
                        self.start_load();
                    }
                    Ok(response) => {
                        let message = response.error_message().unwrap_or(SUBMIT_FAILED);
                        tracing::warn!("submit rejected: {message}");
                        self.state.view.set_status(StatusLevel::Error, message);
                    }
                    Err(err) => {
                        tracing::warn!("submit failed: {err}");
                        self.state.view.set_status(StatusLevel::Error, err.to_string());
                    }
                }
            }
        }
    }

    /// Waits for the next task completion and applies it.
    #[cfg(test)]
    async fn next_workflow_event(&mut self) {
        let event = tokio::time::timeout(Duration::from_secs(5), self.events_rx.recv())
            .await
            .expect("workflow did not report back")
            .expect("channel closed");
        self.handle_workflow_event(event);
    }
}

fn today() -> chrono::NaiveDate {
    Local::now().date_naive()
}
