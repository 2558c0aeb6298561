//! User-triggered writes as explicit, re-runnable commands.
//!
//! A command owns every argument of its call. When one fails, the resulting
//! [`Notification`] keeps the command so "retry" can run the exact same call
//! again. Writes are not queued or coalesced: two submissions send two requests.
use crate::api::{Api, ApiError};
use crate::forms::{LoginForm, SignupForm};
use crate::model::ItemId;
use std::time::Duration;
use tokio::time::Instant;

/// How long a success notification stays on screen.
const SUCCESS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug)]
pub enum Command {
    AddFavourite { id: ItemId, name: String },
    Logout,
    Login(LoginForm),
    Signup(SignupForm),
}

/// What a successful command did, for the caller to update its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    FavouriteAdded { id: ItemId, name: String },
    LoggedOut,
    LoggedIn,
    SignedUp,
}

impl Command {
    /// Short name used in logs and task names.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddFavourite { .. } => "add_favourite",
            Command::Logout => "logout",
            Command::Login(_) => "login",
            Command::Signup(_) => "signup",
        }
    }

    pub async fn execute(&self, api: &Api) -> Result<CommandOutcome, ApiError> {
        match self {
            Command::AddFavourite { id, name } => {
                api.favourites.add(*id, name).await?;
                Ok(CommandOutcome::FavouriteAdded {
                    id: *id,
                    name: name.clone(),
                })
            }
            Command::Logout => {
                api.auth.logout().await?;
                Ok(CommandOutcome::LoggedOut)
            }
            Command::Login(form) => {
                api.auth.login(form).await?;
                Ok(CommandOutcome::LoggedIn)
            }
            Command::Signup(form) => {
                api.auth.signup(form).await?;
                Ok(CommandOutcome::SignedUp)
            }
        }
    }

    fn failure_title(&self) -> &'static str {
        match self {
            Command::AddFavourite { .. } => "Failed to add favourite",
            Command::Logout => "Failed to log out",
            Command::Login(_) => "Failed to log in",
            Command::Signup(_) => "Failed to sign up",
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
    Info,
}

/// A toast-style message, optionally carrying a command to retry.
#[derive(Debug)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    retry: Option<Command>,
    created: Instant,
}

impl Notification {
    pub fn success(outcome: &CommandOutcome) -> Self {
        let (title, description) = match outcome {
            CommandOutcome::FavouriteAdded { name, .. } => (
                "Added to favourites".to_string(),
                format!("{} was added to your favourites", name),
            ),
            CommandOutcome::LoggedOut => ("Logged out".to_string(), "See you soon".to_string()),
            CommandOutcome::LoggedIn => ("Logged in".to_string(), "Welcome back".to_string()),
            CommandOutcome::SignedUp => (
                "Signed up".to_string(),
                "Your account is ready".to_string(),
            ),
        };
        Self::new(NotificationKind::Success, title, description, None)
    }

    /// A failure that can be retried by re-running `command`.
    pub fn failure(command: Command, error: &ApiError) -> Self {
        let title = command.failure_title().to_string();
        let description = format!("Something went wrong! ({})", error);
        Self::new(NotificationKind::Failure, title, description, Some(command))
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title.into(), description.into(), None)
    }

    fn new(
        kind: NotificationKind,
        title: String,
        description: String,
        retry: Option<Command>,
    ) -> Self {
        Self {
            kind,
            title,
            description,
            retry,
            created: Instant::now(),
        }
    }

    pub fn can_retry(&self) -> bool {
        self.retry.is_some()
    }

    /// Take the command to re-run, leaving the notification without a retry.
    pub fn take_retry(&mut self) -> Option<Command> {
        self.retry.take()
    }

    /// Success and info messages expire; failures stay until retried or dismissed.
    pub fn is_expired(&self) -> bool {
        self.kind != NotificationKind::Failure && self.created.elapsed() >= SUCCESS_TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoints;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> Api {
        let base = Url::parse(&server.uri()).unwrap();
        let endpoints = Endpoints {
            catalog: base.join("categories.php").unwrap(),
            api_base: base,
        };
        Api::new(&endpoints, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_failed_add_retries_identical_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/add-to-favourite"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/add-to-favourite"))
            .and(body_json(serde_json::json!({"id": 3, "name": "Dessert"})))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let command = Command::AddFavourite {
            id: ItemId::new(3),
            name: "Dessert".to_string(),
        };

        let error = command.execute(&api).await.unwrap_err();
        assert!(matches!(error, ApiError::HttpStatus(500)));

        let mut notification = Notification::failure(command, &error);
        assert_eq!(notification.kind, NotificationKind::Failure);
        assert!(notification.can_retry());

        let retry = notification.take_retry().unwrap();
        let outcome = retry.execute(&api).await.unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::FavouriteAdded {
                id: ItemId::new(3),
                name: "Dessert".to_string()
            }
        );
        assert!(!notification.can_retry());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        let first: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, serde_json::json!({"id": 3, "name": "Dessert"}));
    }

    #[tokio::test]
    async fn test_logout_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logout-user"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let outcome = Command::Logout.execute(&api_for(&server)).await.unwrap();
        assert_eq!(outcome, CommandOutcome::LoggedOut);
    }

    #[test]
    fn test_failure_notification_text() {
        let n = Notification::failure(Command::Logout, &ApiError::HttpStatus(502));
        assert_eq!(n.title, "Failed to log out");
        assert!(n.description.contains("502"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_expires_failure_does_not() {
        let ok = Notification::success(&CommandOutcome::LoggedIn);
        let failed = Notification::failure(Command::Logout, &ApiError::Timeout);
        assert!(!ok.is_expired());

        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(ok.is_expired());
        assert!(!failed.is_expired());
    }
}
