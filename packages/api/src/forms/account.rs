use crate::models::{ChangePassword, CreateUser, Role, UpdateProfile, UpdateUser, User};

use super::{is_valid_email, non_blank, require, FormErrors};

const MIN_PASSWORD: usize = 6;
const MIN_USERNAME: usize = 3;

/// Validated login input.
#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FormErrors> {
        let mut errors = FormErrors::new();
        let username = require(&mut errors, "username", &self.username, "Username wajib diisi");
        if self.password.chars().count() < MIN_PASSWORD {
            errors.add("password", "Password minimal 6 karakter");
        }
        errors.finish(|| Credentials {
            username,
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<ChangePassword, FormErrors> {
        let mut errors = FormErrors::new();
        if self.current_password.is_empty() {
            errors.add("current_password", "Password saat ini wajib diisi");
        }
        if self.new_password.chars().count() < MIN_PASSWORD {
            errors.add("new_password", "Password baru minimal 6 karakter");
        }
        if self.confirm_password.is_empty() {
            errors.add("confirm_password", "Konfirmasi password wajib diisi");
        } else if self.confirm_password != self.new_password {
            errors.add("confirm_password", "Konfirmasi password tidak cocok");
        }
        if !self.current_password.is_empty() && self.new_password == self.current_password {
            errors.add("new_password", "Password baru harus berbeda dari password saat ini");
        }
        errors.finish(|| ChangePassword {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
        }
    }

    pub fn validate(&self) -> Result<UpdateProfile, FormErrors> {
        let mut errors = FormErrors::new();
        let full_name = require(&mut errors, "full_name", &self.full_name, "Nama lengkap wajib diisi");
        if !is_valid_email(&self.email) {
            errors.add("email", "Email tidak valid");
        }
        errors.finish(|| UpdateProfile {
            full_name: Some(full_name),
            email: Some(self.email.trim().to_string()),
            avatar: None,
        })
    }
}

/// Admin create/edit dialog for an account.
#[derive(Clone, Debug, PartialEq)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub password: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            full_name: String::new(),
            role: Role::Staff,
            is_active: true,
            password: String::new(),
        }
    }
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            is_active: user.is_active,
            password: String::new(),
        }
    }

    fn check_common(&self, errors: &mut FormErrors) -> String {
        let full_name = require(errors, "full_name", &self.full_name, "Nama lengkap wajib diisi");
        if !is_valid_email(&self.email) {
            errors.add("email", "Email tidak valid");
        }
        full_name
    }

    pub fn validate_create(&self) -> Result<CreateUser, FormErrors> {
        let mut errors = FormErrors::new();
        let username = self.username.trim().to_string();
        if username.chars().count() < MIN_USERNAME {
            errors.add("username", "Username minimal 3 karakter");
        }
        let full_name = self.check_common(&mut errors);
        if self.password.is_empty() {
            errors.add("password", "Password wajib diisi");
        } else if self.password.chars().count() < MIN_PASSWORD {
            errors.add("password", "Password minimal 6 karakter");
        }
        errors.finish(|| CreateUser {
            username,
            email: self.email.trim().to_string(),
            full_name,
            password: self.password.clone(),
            role: self.role,
        })
    }

    /// Username is fixed after creation; a blank password leaves it unchanged.
    pub fn validate_update(&self) -> Result<UpdateUser, FormErrors> {
        let mut errors = FormErrors::new();
        let full_name = self.check_common(&mut errors);
        let password = non_blank(&self.password);
        if password
            .as_ref()
            .is_some_and(|p| p.chars().count() < MIN_PASSWORD)
        {
            errors.add("password", "Password minimal 6 karakter");
        }
        errors.finish(|| UpdateUser {
            full_name: Some(full_name),
            email: Some(self.email.trim().to_string()),
            role: Some(self.role),
            is_active: Some(self.is_active),
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_username_and_long_password() {
        let form = LoginForm {
            username: "  ".into(),
            password: "12345".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("username"), Some("Username wajib diisi"));
        assert_eq!(errors.get("password"), Some("Password minimal 6 karakter"));

        let ok = LoginForm {
            username: " admin ".into(),
            password: "rahasia".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.username, "admin");
    }

    #[test]
    fn test_change_password_rules() {
        let mismatch = ChangePasswordForm {
            current_password: "lama123".into(),
            new_password: "baru456".into(),
            confirm_password: "baru457".into(),
        };
        assert_eq!(
            mismatch.validate().unwrap_err().get("confirm_password"),
            Some("Konfirmasi password tidak cocok")
        );

        let same = ChangePasswordForm {
            current_password: "lama123".into(),
            new_password: "lama123".into(),
            confirm_password: "lama123".into(),
        };
        assert_eq!(
            same.validate().unwrap_err().get("new_password"),
            Some("Password baru harus berbeda dari password saat ini")
        );

        let ok = ChangePasswordForm {
            current_password: "lama123".into(),
            new_password: "baru456".into(),
            confirm_password: "baru456".into(),
        };
        assert_eq!(ok.validate().unwrap().new_password, "baru456");
    }

    #[test]
    fn test_user_create_and_update() {
        let form = UserForm {
            username: "ab".into(),
            email: "bukan-email".into(),
            full_name: String::new(),
            ..Default::default()
        };
        let errors = form.validate_create().unwrap_err();
        assert_eq!(errors.get("username"), Some("Username minimal 3 karakter"));
        assert_eq!(errors.get("email"), Some("Email tidak valid"));
        assert_eq!(errors.get("full_name"), Some("Nama lengkap wajib diisi"));
        assert_eq!(errors.get("password"), Some("Password wajib diisi"));

        let edit = UserForm {
            username: "staff1".into(),
            email: "staff1@arsip.go.id".into(),
            full_name: "Staff Satu".into(),
            role: Role::Pimpinan,
            is_active: false,
            password: String::new(),
        };
        let update = edit.validate_update().unwrap();
        assert_eq!(update.password, None);
        assert_eq!(update.role, Some(Role::Pimpinan));
        assert_eq!(update.is_active, Some(false));

        let short = UserForm {
            password: "123".into(),
            ..edit
        };
        assert!(short.validate_update().is_err());
    }

    #[test]
    fn test_profile() {
        let form = ProfileForm {
            full_name: "Admin".into(),
            email: "admin@arsip.go.id".into(),
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.full_name.as_deref(), Some("Admin"));
        assert!(ProfileForm::default().validate().is_err());
    }
}
