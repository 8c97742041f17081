//! Portal — coordinates the screen controller, the signup flow, the login
//! form and the onboarding form.
//!
//! Every user-facing action lives here so the cross-component effects stay
//! in one place: leaving signup stops the countdown, a final submission
//! clears the store, and "back to home" resets the OTP session and step.

use std::sync::Arc;

use tracing::info;

use crate::config::PortalConfig;
use crate::error::{self, FlowError};
use crate::login::LoginForm;
use crate::onboarding::{OnboardingForm, Viewport};
use crate::screen::{Screen, ScreenController};
use crate::signup::SignupFlow;
use crate::store::{self, PersistenceStore};

pub struct Portal {
    screen: ScreenController,
    login: LoginForm,
    signup: SignupFlow,
    form: OnboardingForm,
}

impl Portal {
    /// Validate the configuration, open the configured store and restore
    /// the portal from it.
    pub async fn open(config: &PortalConfig) -> error::Result<Self> {
        config.validate()?;
        let store = store::open(config).await?;
        Ok(Self::restore(store, config).await)
    }

    /// Rebuild the portal from whatever the store holds.
    ///
    /// Reads only; nothing is written back during startup.
    pub async fn restore(store: Arc<dyn PersistenceStore>, config: &PortalConfig) -> Self {
        let screen = ScreenController::restore(Arc::clone(&store)).await;
        // A saved step only matters when resuming the onboarding screen.
        let resume_step = screen.current() == Screen::Onboarding;
        let form =
            OnboardingForm::restore_with(Arc::clone(&store), config.persist_step, resume_step)
                .await;
        info!(
            screen = %screen.current(),
            step = %form.step(),
            "Portal restored"
        );
        Self {
            screen,
            login: LoginForm::default(),
            signup: SignupFlow::new(config.otp_countdown_secs, config.tick_interval),
            form,
        }
    }

    /// Attach the presentation viewport to the onboarding form.
    pub fn with_viewport(mut self, viewport: Arc<dyn Viewport>) -> Self {
        self.form = self.form.with_viewport(viewport);
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen.current()
    }

    pub fn login(&self) -> &LoginForm {
        &self.login
    }

    pub fn signup(&self) -> &SignupFlow {
        &self.signup
    }

    pub fn form(&self) -> &OnboardingForm {
        &self.form
    }

    /// Login inputs, editable only on the login screen.
    pub fn login_mut(&mut self) -> Result<&mut LoginForm, FlowError> {
        self.require(Screen::Login)?;
        Ok(&mut self.login)
    }

    /// Signup inputs, editable only on the signup screen.
    pub fn signup_mut(&mut self) -> Result<&mut SignupFlow, FlowError> {
        self.require(Screen::Signup)?;
        Ok(&mut self.signup)
    }

    /// Onboarding answers, editable only on the onboarding screen.
    pub fn form_mut(&mut self) -> Result<&mut OnboardingForm, FlowError> {
        self.require(Screen::Onboarding)?;
        Ok(&mut self.form)
    }

    /// "Create Account" link on the login screen.
    pub async fn go_to_signup(&mut self) -> Result<Screen, FlowError> {
        self.screen.transition_to(Screen::Signup).await
    }

    /// "Login" link from signup or onboarding.
    ///
    /// Leaving onboarding this way abandons it but keeps the saved answers.
    pub async fn go_to_login(&mut self) -> Result<Screen, FlowError> {
        let from = self.screen.current();
        if from == Screen::Success {
            return Err(FlowError::InvalidTransition {
                from,
                to: Screen::Login,
            });
        }
        let to = self.screen.transition_to(Screen::Login).await?;
        if from == Screen::Signup {
            self.signup.teardown().await;
        }
        Ok(to)
    }

    /// Login button. No credentials are checked.
    pub async fn submit_login(&mut self) -> Result<Screen, FlowError> {
        self.require(Screen::Login)?;
        self.login.check_submit()?;
        info!(login_id = %self.login.login_id, "Login submitted");
        self.enter_onboarding().await
    }

    /// "Create Account" button. The OTP is not verified.
    pub async fn submit_signup(&mut self) -> Result<Screen, FlowError> {
        self.require(Screen::Signup)?;
        self.signup.check_submit().await?;
        let to = self.enter_onboarding().await?;
        self.signup.teardown().await;
        info!("Signup submitted");
        Ok(to)
    }

    /// Final submit on step five. Clears every persisted key.
    pub async fn submit_onboarding(&mut self) -> Result<Screen, FlowError> {
        self.require(Screen::Onboarding)?;
        self.form.check_submit()?;
        info!(
            owner = %self.form.record().owner_name,
            business = %self.form.record().display_name,
            "Onboarding submitted"
        );
        let to = self.screen.transition_to(Screen::Success).await?;
        self.screen.clear_persisted().await;
        self.form.discard();
        Ok(to)
    }

    /// "Back to Home" on the success screen.
    pub async fn back_to_home(&mut self) -> Result<Screen, FlowError> {
        self.require(Screen::Success)?;
        let to = self.screen.transition_to(Screen::Login).await?;
        self.signup.reset().await;
        self.form.reset_step().await;
        Ok(to)
    }

    /// Move to onboarding and record the step the form opens on, so a
    /// step left over from an earlier visit is not resumed later.
    async fn enter_onboarding(&mut self) -> Result<Screen, FlowError> {
        let to = self.screen.transition_to(Screen::Onboarding).await?;
        self.form.save_step().await;
        Ok(to)
    }

    fn require(&self, expected: Screen) -> Result<(), FlowError> {
        let current = self.screen.current();
        if current == expected {
            Ok(())
        } else {
            Err(FlowError::WrongScreen { expected, current })
        }
    }
}
