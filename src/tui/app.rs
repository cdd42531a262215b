use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::backend::{BackendError, ContentBackend};
use crate::intake::{Intake, IntakeError, Payload};
use crate::model::{ActivityDraft, UserSession, authorize_content};
use crate::storage::{Receipt, ReceiptStore};
use crate::wizard::Position;

use super::action::Action;
use super::error::AppError;
use super::screens::{
    ActivitiesState, ActivityFormState, DELETE_DENIED, HelpState, HomeState, LoginState,
    RegistrationState, draw_activities, draw_activity_form, draw_help, draw_home, draw_login,
    draw_registration,
};
use super::widgets::{StatusBarContext, draw_status_bar};

/// How long one loop iteration waits for a key or a finished delivery.
const TICK: Duration = Duration::from_millis(100);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Main menu.
    Home,
    /// The registration wizard.
    Registration,
    /// Sign-in for content editors.
    Login,
    /// Activities list; requires an editor or admin session.
    Activities,
    /// Create or edit one activity; same access as the list.
    ActivityForm,
    /// Keybinding help.
    Help,
}

impl Screen {
    /// Human-readable label used in titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Beranda",
            Self::Registration => "Pendaftaran",
            Self::Login => "Masuk",
            Self::Activities => "Kegiatan",
            Self::ActivityForm => "Form Kegiatan",
            Self::Help => "Bantuan",
        }
    }

    fn requires_content_access(self) -> bool {
        matches!(self, Self::Activities | Self::ActivityForm)
    }
}

/// A registration being delivered on the runtime.
struct PendingSubmission {
    payload: Payload,
    handle: JoinHandle<Result<(), IntakeError>>,
}

/// Top-level application state.
pub struct App<I: Intake, B: ContentBackend> {
    screen: Screen,
    runtime: Runtime,
    intake: I,
    backend: B,
    receipts: ReceiptStore,
    session: Option<UserSession>,
    pending: Option<PendingSubmission>,
    home: HomeState,
    registration: RegistrationState,
    login: LoginState,
    activities: ActivitiesState,
    activity_form: ActivityFormState,
    help: HelpState,
    should_quit: bool,
}

impl<I: Intake, B: ContentBackend> App<I, B> {
    /// Creates a new `App` on the [`Screen::Home`] screen with its own
    /// single-threaded runtime.
    pub fn new(intake: I, backend: B, receipts: ReceiptStore) -> Result<Self, AppError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(AppError::Runtime)?;
        Ok(Self {
            screen: Screen::Home,
            runtime,
            intake,
            backend,
            receipts,
            session: None,
            pending: None,
            home: HomeState::new(),
            registration: RegistrationState::new(),
            login: LoginState::new(),
            activities: ActivitiesState::new(),
            activity_form: ActivityFormState::new(),
            help: HelpState::new(),
            should_quit: false,
        })
    }

    /// Main event loop: poll delivery → draw → read event → dispatch.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<T: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<T>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            self.poll_submission();
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(TICK)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [status_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

        let position = (self.screen == Screen::Registration)
            .then(|| self.registration.session().position());
        let ctx = StatusBarContext::new(
            self.session.as_ref(),
            position,
            self.registration.session().is_submitting(),
        );
        draw_status_bar(&ctx, frame, status_area);

        match self.screen {
            Screen::Home => draw_home(&self.home, frame, body_area),
            Screen::Registration => draw_registration(&self.registration, frame, body_area),
            Screen::Login => draw_login(&self.login, frame, body_area),
            Screen::Activities => draw_activities(&self.activities, frame, body_area),
            Screen::ActivityForm => draw_activity_form(&self.activity_form, frame, body_area),
            Screen::Help => draw_help(&self.help, frame, body_area),
        }
    }

    /// Handles a key event: global keys first, then the current screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.navigate(Screen::Help);
            }
            return;
        }

        let action = match self.screen {
            Screen::Home => self.home.handle_key(key),
            Screen::Registration => self.registration.handle_key(key),
            Screen::Login => self.login.handle_key(key),
            Screen::Activities => self.activities.handle_key(key),
            Screen::ActivityForm => self.activity_form.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::SubmitRegistration(payload) => self.start_submission(payload),
            Action::SignIn { email, password } => self.sign_in(&email, &password),
            Action::SignOut => self.sign_out(),
            Action::RefreshActivities => self.refresh_activities(),
            Action::NewActivity => {
                self.activity_form.reset();
                self.navigate(Screen::ActivityForm);
            }
            Action::EditActivity(activity) => {
                self.activity_form.load(&activity);
                self.navigate(Screen::ActivityForm);
            }
            Action::SaveActivity { id, draft } => self.save_activity(id, draft),
            Action::TogglePublished { id, published } => self.toggle_published(&id, published),
            Action::DeleteActivity(id) => self.delete_activity(&id),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Switches screens, redirecting to login when content access is missing.
    fn navigate(&mut self, screen: Screen) {
        if screen.requires_content_access()
            && let Err(denied) = authorize_content(self.session.as_ref())
        {
            info!(target_screen = ?screen, reason = %denied, "redirected to login");
            self.login.set_error(denied.to_string());
            self.screen = Screen::Login;
            return;
        }
        match screen {
            Screen::Help => self.help.open_from(self.screen),
            Screen::Activities => self.refresh_activities(),
            _ => {}
        }
        self.screen = screen;
    }

    fn start_submission(&mut self, payload: Payload) {
        if self.pending.is_some() {
            warn!("submission already in flight");
            return;
        }
        match self.receipts.find_duplicate(&Receipt::from_payload(&payload)) {
            Ok(Some(previous)) => warn!(
                full_name = %previous.full_name,
                previous_at = %previous.submitted_at,
                "same applicant was already submitted from this machine"
            ),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "could not read receipts"),
        }

        let intake = self.intake.clone();
        let task_payload = payload.clone();
        let handle = self
            .runtime
            .spawn(async move { intake.deliver(&task_payload).await });
        self.pending = Some(PendingSubmission { payload, handle });
    }

    /// Drives the runtime for up to one tick and applies a finished delivery.
    fn poll_submission(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let handle = &mut pending.handle;
        // The timer must be created inside the runtime.
        let polled = self
            .runtime
            .block_on(async { tokio::time::timeout(TICK, handle).await });
        let outcome = match polled {
            Err(_elapsed) => return,
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(IntakeError::Aborted(join_error.to_string())),
        };
        let Some(pending) = self.pending.take() else {
            return;
        };

        if self.registration.finish_submit(outcome).is_ok()
            && let Err(e) = self.receipts.append(&Receipt::from_payload(&pending.payload))
        {
            warn!(error = %e, "could not record receipt");
        }
    }

    fn sign_in(&mut self, email: &str, password: &str) {
        match self.runtime.block_on(self.backend.sign_in(email, password)) {
            Ok(session) => {
                self.login.clear_password();
                if let Err(denied) = authorize_content(Some(&session)) {
                    info!(%email, "signed-in user has no content role");
                    if let Err(e) = self.runtime.block_on(self.backend.sign_out(&session)) {
                        warn!(error = %e, "sign-out request failed");
                    }
                    self.login.set_error(denied.to_string());
                    return;
                }
                self.session = Some(session);
                self.navigate(Screen::Activities);
            }
            Err(e) => {
                warn!(%email, error = %e, "sign-in failed");
                self.login.clear_password();
                self.login.set_error(e.to_string());
            }
        }
    }

    fn sign_out(&mut self) {
        if let Some(session) = self.session.take()
            && let Err(e) = self.runtime.block_on(self.backend.sign_out(&session))
        {
            warn!(error = %e, "sign-out request failed");
        }
        self.activities.clear();
        self.activity_form.reset();
        self.login.reset();
        self.screen = Screen::Home;
    }

    fn refresh_activities(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let can_delete = session.can_delete();
        match self.runtime.block_on(self.backend.list_activities(session)) {
            Ok(list) => self.activities.set_activities(list, can_delete),
            Err(e) => self.report_backend_error(e),
        }
    }

    fn save_activity(&mut self, id: Option<String>, draft: ActivityDraft) {
        let Some(session) = self.session.as_ref() else {
            self.navigate(Screen::Login);
            return;
        };
        let result = match id.as_deref() {
            Some(id) => self
                .runtime
                .block_on(self.backend.update_activity(session, id, &draft)),
            None => self
                .runtime
                .block_on(self.backend.create_activity(session, &draft)),
        };
        match result {
            Ok(_) => {
                self.activity_form.reset();
                self.screen = Screen::Activities;
                self.refresh_activities();
            }
            Err(e @ BackendError::Unauthorized) => self.report_backend_error(e),
            Err(e) => {
                warn!(error = %e, "saving activity failed");
                self.activity_form.set_error(e.to_string());
            }
        }
    }

    fn toggle_published(&mut self, id: &str, published: bool) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        match self
            .runtime
            .block_on(self.backend.set_published(session, id, published))
        {
            Ok(_) => self.refresh_activities(),
            Err(e) => self.report_backend_error(e),
        }
    }

    fn delete_activity(&mut self, id: &str) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.can_delete() {
            self.activities.set_error(DELETE_DENIED.to_string());
            return;
        }
        match self.runtime.block_on(self.backend.delete_activity(session, id)) {
            Ok(()) => self.refresh_activities(),
            Err(e) => self.report_backend_error(e),
        }
    }

    /// An expired session sends the user back to login; anything else is
    /// shown on the activities list.
    fn report_backend_error(&mut self, e: BackendError) {
        warn!(error = %e, "backend call failed");
        if matches!(e, BackendError::Unauthorized) {
            self.session = None;
            self.activities.clear();
            self.login.set_error(e.to_string());
            self.screen = Screen::Login;
        } else {
            self.activities.set_error(e.to_string());
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the signed-in user, if any.
    pub fn session(&self) -> Option<&UserSession> {
        self.session.as_ref()
    }

    /// Returns `true` while a registration is being delivered.
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the wizard position.
    pub fn wizard_position(&self) -> Position {
        self.registration.session().position()
    }

    /// Returns the local receipt journal.
    pub fn receipts(&self) -> &ReceiptStore {
        &self.receipts
    }
}
