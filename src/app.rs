use crate::api::{Api, ApiError};
use crate::command::{Command, CommandOutcome, Notification};
use crate::config::StartView;
use crate::favourites::{filter_by_tab, next_tab, prev_tab, reconcile, stale_ids, ALL_TAB};
use crate::forms::FormInput;
use crate::model::{Category, FavouriteRecord, ItemId};
use std::borrow::Cow;
use std::collections::HashSet;

// ============================================================================
// View and Slot Types
// ============================================================================

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,       // Full catalog with tabs
    Favourites, // Reconciled favourites with tabs
    Login,
    Signup,
}

impl From<StartView> for View {
    fn from(start: StartView) -> Self {
        match start {
            StartView::Home => View::Home,
            StartView::Favourites => View::Favourites,
        }
    }
}

/// One independently fetched piece of state.
///
/// Each fetch writes only its own slot, so no coordination is needed
/// between concurrent fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Slot<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Slot::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Slot::Loading)
    }

    /// Mark a fetch as started. Loaded data is kept until a result replaces it.
    fn begin(&mut self) {
        if !matches!(self, Slot::Loaded(_)) {
            *self = Slot::Loading;
        }
    }

    /// Record a failed fetch. Loaded data is kept; only empty slots become `Failed`.
    fn fail(&mut self, error: &ApiError) {
        if !matches!(self, Slot::Loaded(_)) {
            *self = Slot::Failed(error.to_string());
        }
    }
}

/// Fetches the UI layer must start after a view activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPlan {
    pub generation: u64,
    pub catalog: bool,
    pub favourites: bool,
}

/// Events from background tasks
pub enum AppEvent {
    /// Catalog fetch finished for the activation numbered `generation`.
    CatalogLoaded {
        generation: u64,
        result: Result<Vec<Category>, ApiError>,
    },
    /// Favourites fetch finished for the activation numbered `generation`.
    FavouritesLoaded {
        generation: u64,
        result: Result<Vec<FavouriteRecord>, ApiError>,
    },
    /// A user command finished. The command is handed back so a failure can be retried.
    CommandFinished {
        command: Command,
        result: Result<CommandOutcome, ApiError>,
    },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub api: Api,

    pub view: View,
    /// Where a successful login or signup lands.
    pub landing_view: View,

    // Data slots
    pub catalog: Slot<Vec<Category>>,
    pub favourites: Slot<Vec<FavouriteRecord>>,
    /// Derived from `catalog` and `favourites`; never edited directly.
    pub favourited: Vec<Category>,
    /// Ids added this session that no favourites response has confirmed yet.
    /// A list fetched before the add landed would otherwise drop them.
    pending_adds: HashSet<ItemId>,

    // Browse state
    pub tab: &'static str,
    pub selected: usize,
    pub show_detail: bool,
    pub show_help: bool,

    // Forms
    pub login_input: FormInput,
    pub signup_input: FormInput,

    pub notification: Option<Notification>,

    /// Bumped on every view activation. Fetch results tagged with an older
    /// generation belong to a view that is gone and are dropped.
    pub generation: u64,

    pub needs_redraw: bool,
    pub spinner_frame: usize,
}

impl App {
    pub fn new(api: Api, landing_view: View) -> Self {
        Self {
            api,
            view: landing_view,
            landing_view,
            catalog: Slot::Idle,
            favourites: Slot::Idle,
            favourited: Vec::new(),
            pending_adds: HashSet::new(),
            tab: ALL_TAB,
            selected: 0,
            show_detail: false,
            show_help: false,
            login_input: FormInput::login(),
            signup_input: FormInput::signup(),
            notification: None,
            generation: 0,
            needs_redraw: true,
            spinner_frame: 0,
        }
    }

    /// Switch to `view` and report which fetches it needs.
    pub fn activate(&mut self, view: View) -> FetchPlan {
        self.generation = self.generation.wrapping_add(1);
        self.view = view;
        self.selected = 0;
        self.show_detail = false;
        self.needs_redraw = true;

        let (catalog, favourites) = match view {
            View::Home => (true, false),
            View::Favourites => (true, true),
            View::Login | View::Signup => (false, false),
        };
        if catalog {
            self.catalog.begin();
        }
        if favourites {
            self.favourites.begin();
        }

        tracing::debug!(?view, generation = self.generation, "Activated view");
        FetchPlan {
            generation: self.generation,
            catalog,
            favourites,
        }
    }

    /// Apply a catalog result. Returns false if it was stale and dropped.
    pub fn apply_catalog(
        &mut self,
        generation: u64,
        result: Result<Vec<Category>, ApiError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale catalog result"
            );
            return false;
        }

        match result {
            Ok(categories) => self.catalog = Slot::Loaded(categories),
            Err(e) => {
                tracing::warn!(error = %e, "Catalog fetch failed");
                self.catalog.fail(&e);
            }
        }
        self.recompute_favourited();
        true
    }

    /// Apply a favourites result. Returns the view to switch to, if any.
    ///
    /// An unauthenticated response clears the slot so nothing stale is shown,
    /// and asks for the login view.
    pub fn apply_favourites(
        &mut self,
        generation: u64,
        result: Result<Vec<FavouriteRecord>, ApiError>,
    ) -> Option<View> {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale favourites result"
            );
            return None;
        }

        let redirect = match result {
            Ok(mut records) => {
                self.merge_pending_adds(&mut records);
                self.favourites = Slot::Loaded(records);
                None
            }
            Err(ApiError::Unauthenticated(status)) => {
                tracing::info!(status, "Favourites need a session, redirecting to login");
                self.favourites = Slot::Failed("Not logged in".to_string());
                self.pending_adds.clear();
                self.notification = Some(Notification::info(
                    "Please log in",
                    "Log in to see your favourites",
                ));
                Some(View::Login)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Favourites fetch failed");
                self.favourites.fail(&e);
                None
            }
        };
        self.recompute_favourited();
        redirect
    }

    /// Apply a finished command. Returns the view to switch to, if any.
    pub fn apply_command(
        &mut self,
        command: Command,
        result: Result<CommandOutcome, ApiError>,
    ) -> Option<View> {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    command = command.name(),
                    error = %e,
                    retryable = e.is_retryable(),
                    "Command failed"
                );
                self.notification = Some(Notification::failure(command, &e));
                return None;
            }
        };

        self.notification = Some(Notification::success(&outcome));
        match outcome {
            CommandOutcome::FavouriteAdded { id, .. } => {
                // Kept until a favourites response includes it; a list
                // requested before this write may still be in flight.
                self.pending_adds.insert(id);
                if let Slot::Loaded(records) = &mut self.favourites {
                    if !records.iter().any(|r| r.item_id == id) {
                        records.push(FavouriteRecord { item_id: id });
                    }
                }
                self.recompute_favourited();
                None
            }
            CommandOutcome::LoggedOut => {
                self.favourites = Slot::Idle;
                self.pending_adds.clear();
                self.favourited.clear();
                Some(View::Login)
            }
            CommandOutcome::LoggedIn | CommandOutcome::SignedUp => {
                self.pending_adds.clear();
                self.login_input.reset();
                self.signup_input.reset();
                Some(self.landing_view)
            }
        }
    }

    /// Fold unconfirmed adds into a fresh server list.
    ///
    /// Ids the server already reports are confirmed and forgotten; the rest
    /// are appended so a list fetched before the add landed cannot drop them.
    fn merge_pending_adds(&mut self, records: &mut Vec<FavouriteRecord>) {
        if self.pending_adds.is_empty() {
            return;
        }
        let confirmed: HashSet<ItemId> = records.iter().map(|r| r.item_id).collect();
        self.pending_adds.retain(|id| !confirmed.contains(id));

        let mut pending: Vec<ItemId> = self.pending_adds.iter().copied().collect();
        pending.sort_unstable();
        if !pending.is_empty() {
            tracing::debug!(?pending, "Keeping favourites not yet in server list");
        }
        records.extend(pending.into_iter().map(|item_id| FavouriteRecord { item_id }));
    }

    /// Re-derive the favourited list from the current slot snapshots.
    ///
    /// A side that is not loaded counts as empty.
    pub fn recompute_favourited(&mut self) {
        let catalog = self.catalog.loaded().map(Vec::as_slice).unwrap_or(&[]);
        let records = self.favourites.loaded().map(Vec::as_slice).unwrap_or(&[]);

        self.favourited = reconcile(catalog, records);

        if !catalog.is_empty() && !records.is_empty() {
            let stale = stale_ids(catalog, records);
            if !stale.is_empty() {
                tracing::debug!(?stale, "Favourites reference ids missing from catalog");
            }
        }
        self.clamp_selection();
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Categories shown for the current view and tab.
    pub fn visible_categories(&self) -> Cow<'_, [Category]> {
        let source: &[Category] = match self.view {
            View::Home => self.catalog.loaded().map(Vec::as_slice).unwrap_or(&[]),
            View::Favourites => &self.favourited,
            View::Login | View::Signup => &[],
        };
        filter_by_tab(source, self.tab)
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.visible_categories().get(self.selected).cloned()
    }

    /// True while a fetch the current view depends on is still outstanding.
    pub fn is_loading(&self) -> bool {
        match self.view {
            View::Home => self.catalog.is_loading(),
            View::Favourites => self.catalog.is_loading() || self.favourites.is_loading(),
            View::Login | View::Signup => false,
        }
    }

    pub fn is_favourited(&self, id: ItemId) -> bool {
        self.favourites
            .loaded()
            .is_some_and(|records| records.iter().any(|r| r.item_id == id))
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn nav_down(&mut self) {
        let len = self.visible_categories().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn nav_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn next_tab(&mut self) {
        self.tab = next_tab(self.tab);
        self.selected = 0;
    }

    pub fn prev_tab(&mut self) {
        self.tab = prev_tab(self.tab);
        self.selected = 0;
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_categories().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Build the add-favourite command for the selected category.
    pub fn favourite_selected(&self) -> Option<Command> {
        self.selected_category().map(|c| Command::AddFavourite {
            id: c.id,
            name: c.name,
        })
    }

    /// Validate the login form; on success return the command to send.
    pub fn submit_login(&mut self) -> Option<Command> {
        let form = self.login_input.to_login_form();
        match form.validate() {
            Ok(()) => {
                self.login_input.errors.clear();
                Some(Command::Login(form))
            }
            Err(errors) => {
                self.login_input.errors = errors;
                None
            }
        }
    }

    /// Validate the signup form; on success return the command to send.
    pub fn submit_signup(&mut self) -> Option<Command> {
        let form = self.signup_input.to_signup_form();
        match form.validate() {
            Ok(()) => {
                self.signup_input.errors.clear();
                Some(Command::Signup(form))
            }
            Err(errors) => {
                self.signup_input.errors = errors;
                None
            }
        }
    }

    /// Take the command behind the current failure notification, if it has one.
    pub fn take_retry(&mut self) -> Option<Command> {
        let command = self.notification.as_mut()?.take_retry()?;
        self.notification = None;
        Some(command)
    }

    /// Drop an expired notification. Returns true if one was removed.
    pub fn clear_expired_notification(&mut self) -> bool {
        if self.notification.as_ref().is_some_and(Notification::is_expired) {
            self.notification = None;
            return true;
        }
        false
    }
}
