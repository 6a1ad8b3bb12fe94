use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    api::{ApiError, StorefrontApi},
    models::user::{FormError, LoginForm, RegisterForm, Session},
};

pub const REGISTER_SUCCESS_MESSAGE: &str = "Registered Successfully";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Logged in successfully";

#[derive(Error, Debug)]
pub enum AuthServiceError {
    #[error("{0}")]
    Validation(#[from] FormError),

    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    #[error("Session not found")]
    SessionNotFound,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AuthServiceError {
    /// The notice to show the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AuthServiceError::Validation(e) => e.message.clone(),
            AuthServiceError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

pub struct AuthService {
    api: Arc<dyn StorefrontApi>,
    session_file_path: PathBuf,
}

impl AuthService {
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        session_dir: Option<PathBuf>,
    ) -> Result<Self, AuthServiceError> {
        let session_dir = session_dir.unwrap_or_else(|| {
            let mut path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            path.push(".storefront");
            path
        });

        if !session_dir.exists() {
            fs::create_dir_all(&session_dir).context("Failed to create session directory")?;
        }

        let mut session_file_path = session_dir;
        session_file_path.push("session.json");

        Ok(Self {
            api,
            session_file_path,
        })
    }

    pub fn session_file_path(&self) -> &Path {
        &self.session_file_path
    }

    /// Register a new account. The form is validated before any request is sent.
    pub async fn register(&self, form: &RegisterForm) -> Result<(), AuthServiceError> {
        if let Err(e) = form.validate_input() {
            warn!("Registration form rejected: {}", e);
            return Err(e.into());
        }

        info!("Registering user: {}", form.username);
        self.api.register(&form.credentials()).await.map_err(|e| {
            warn!("Registration failed for {}: {}", form.username, e);
            e
        })?;

        info!("User {} registered successfully", form.username);
        Ok(())
    }

    /// Login and persist the resulting session.
    pub async fn login(&self, form: &LoginForm) -> Result<Session, AuthServiceError> {
        form.validate_input()?;

        info!("Login attempt for user: {}", form.username);
        let response = self.api.login(&form.credentials()).await?;
        let session = Session::from_login(response);

        self.save_session(&session)?;

        info!("User {} logged in successfully", session.username);
        Ok(session)
    }

    /// Logout and clear the persisted session
    pub async fn logout(&self) -> Result<(), AuthServiceError> {
        info!("Logging out user");

        if self.session_file_path.exists() {
            fs::remove_file(&self.session_file_path).context("Failed to remove session file")?;
            info!("Session cleared successfully");
        }

        Ok(())
    }

    /// The persisted session, if there is a readable one.
    pub fn current_session(&self) -> Result<Option<Session>, AuthServiceError> {
        if !self.session_file_path.exists() {
            return Ok(None);
        }

        match self.load_session() {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                debug!("Failed to load session: {}", e);
                Ok(None)
            }
        }
    }

    pub fn require_session(&self) -> Result<Session, AuthServiceError> {
        self.current_session()?
            .ok_or(AuthServiceError::SessionNotFound)
    }

    /// Save session to file with owner-only permissions
    fn save_session(&self, session: &Session) -> Result<(), AuthServiceError> {
        let json_data = serde_json::to_string_pretty(session)?;

        let mut file = fs::File::create(&self.session_file_path)?;
        file.write_all(json_data.as_bytes())?;
        file.flush()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = file.metadata()?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.session_file_path, perms)?;
        }

        debug!("Session saved successfully");
        Ok(())
    }

    fn load_session(&self) -> Result<Session, AuthServiceError> {
        if !self.session_file_path.exists() {
            return Err(AuthServiceError::SessionNotFound);
        }

        let json_data = fs::read_to_string(&self.session_file_path)?;
        let session: Session = serde_json::from_str(&json_data)?;

        debug!("Session loaded successfully for user: {}", session.username);
        Ok(session)
    }
}
