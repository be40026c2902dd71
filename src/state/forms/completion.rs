//! Signup completion: turn a validated form into a saved farm profile

use super::signup::SignupForm;
use crate::storage::{FarmLocation, FarmProfile, ProfileStore};
use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

impl FarmProfile {
    /// Build a profile from a fully set signup form
    pub fn from_signup(form: &SignupForm) -> Option<Self> {
        Some(Self {
            id: Uuid::new_v4(),
            username: form.username.clone()?,
            email: form.email.clone()?,
            location: FarmLocation {
                latitude: form.latitude?,
                longitude: form.longitude?,
            },
            created_at: Utc::now(),
        })
    }
}

/// Persist the profile for a finished signup.
///
/// Called from `Wizard::finish`, so it runs once per wizard and only with a
/// form whose every step validated.
pub fn complete_signup(form: &SignupForm, store: &dyn ProfileStore) -> Result<FarmProfile> {
    let profile = FarmProfile::from_signup(form).context("signup form is incomplete")?;
    store.save(&profile)?;
    tracing::info!(
        username = %profile.username,
        latitude = profile.location.latitude,
        longitude = profile.location.longitude,
        "signup complete"
    );
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::signup::{signup_steps, SignupAction, SignupStore};
    use crate::state::forms::wizard::Wizard;
    use crate::storage::MockProfileStore;
    use anyhow::anyhow;

    fn complete_form() -> SignupForm {
        SignupForm {
            username: Some("validuser".into()),
            email: Some("user@example.com".into()),
            password: Some("Abcdef1!".into()),
            confirm_password: Some("Abcdef1!".into()),
            longitude: Some(31.23),
            latitude: Some(30.04),
        }
    }

    #[test]
    fn test_from_signup_requires_all_fields() {
        let mut form = complete_form();
        assert!(FarmProfile::from_signup(&form).is_some());
        form.latitude = None;
        assert!(FarmProfile::from_signup(&form).is_none());
    }

    #[test]
    fn test_complete_signup_saves_once() {
        let mut store = MockProfileStore::new();
        store
            .expect_save()
            .withf(|p| {
                p.username == "validuser"
                    && p.location
                        == FarmLocation {
                            latitude: 30.04,
                            longitude: 31.23,
                        }
            })
            .times(1)
            .returning(|_| Ok(()));

        let profile = complete_signup(&complete_form(), &store).unwrap();
        assert_eq!(profile.email, "user@example.com");
    }

    #[test]
    fn test_complete_signup_surfaces_store_failure() {
        let mut store = MockProfileStore::new();
        store
            .expect_save()
            .times(1)
            .returning(|_| Err(anyhow!("disk full")));

        let err = complete_signup(&complete_form(), &store).unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_incomplete_form_never_reaches_store() {
        let mut store = MockProfileStore::new();
        store.expect_save().times(0);

        let form = SignupForm {
            latitude: None,
            ..complete_form()
        };
        assert!(complete_signup(&form, &store).is_err());
    }

    #[test]
    fn test_wizard_finish_drives_completion() {
        let mut store = MockProfileStore::new();
        store.expect_save().times(1).returning(|_| Ok(()));

        let mut signup = SignupStore::new();
        let mut wizard = Wizard::new(signup_steps()).unwrap();
        signup.dispatch(SignupAction::SetUsername("validuser".into()));
        wizard.next(signup.state()).unwrap();
        signup.dispatch(SignupAction::SetEmail("user@example.com".into()));
        signup.dispatch(SignupAction::SetPassword("Abcdef1!".into()));
        signup.dispatch(SignupAction::SetConfirmPassword("Abcdef1!".into()));
        wizard.next(signup.state()).unwrap();
        signup.dispatch(SignupAction::SetLongitude(31.23));
        signup.dispatch(SignupAction::SetLatitude(30.04));

        let profile = wizard
            .finish(signup.state(), |form| complete_signup(form, &store))
            .expect("wizard finishes")
            .expect("profile saved");
        assert_eq!(profile.username, "validuser");
    }
}
