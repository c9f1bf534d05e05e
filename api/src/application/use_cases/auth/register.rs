use crate::application::error::{AppError, AppResult};
use crate::application::ports::account_repository::AccountRepository;
use crate::application::use_cases::auth::password::{check_password_policy, hash_password};
use crate::application::use_cases::non_blank;
use crate::domain::accounts::{Account, NewAccount, Role};
use crate::domain::customers::{normalize_email, normalize_phone};

pub struct Register<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl<'a, R: AccountRepository + ?Sized> Register<'a, R> {
    /// `caller` is the signed-in account's role, if any. Without one only the
    /// first owner can be created; after that owners create every account.
    pub async fn execute(&self, caller: Option<Role>, req: &RegisterRequest) -> AppResult<Account> {
        let (Some(name), Some(email), Some(username), Some(password), Some(role)) = (
            non_blank(req.name.as_deref()),
            non_blank(req.email.as_deref()),
            non_blank(req.username.as_deref()),
            req.password.as_deref().filter(|p| !p.is_empty()),
            non_blank(req.role.as_deref()),
        ) else {
            return Err(AppError::validation(
                "name, email, username, password and role are required",
            ));
        };
        let role: Role = role.parse().map_err(AppError::Validation)?;
        match (caller, role) {
            (Some(Role::Owner), _) | (None, Role::Owner) => {}
            (Some(Role::Staff), _) => {
                return Err(AppError::Forbidden("only owners can create accounts".into()));
            }
            (None, Role::Staff) => {
                return Err(AppError::Unauthorized(
                    "sign in as an owner to create staff accounts".into(),
                ));
            }
        }
        let email = normalize_email(email)
            .map_err(AppError::Validation)?
            .ok_or_else(|| AppError::validation("email is required"))?;
        let phone = non_blank(req.phone.as_deref())
            .map(normalize_phone)
            .transpose()
            .map_err(AppError::Validation)?;
        check_password_policy(password).map_err(AppError::Validation)?;

        if self.repo.find_by_username(role, username).await?.is_some() {
            return Err(AppError::conflict("username is already registered"));
        }
        if self.repo.find_by_email(role, &email).await?.is_some() {
            return Err(AppError::conflict("email is already registered"));
        }

        let account = NewAccount {
            name: name.to_string(),
            email,
            username: username.to_string(),
            phone,
            password_hash: hash_password(password)?,
        };
        let created = match caller {
            Some(_) => self.repo.create(role, &account).await?,
            None => self.repo.create_first_owner(&account).await?.ok_or_else(|| {
                AppError::Unauthorized(
                    "an owner already exists; sign in as an owner to create accounts".into(),
                )
            })?,
        };
        tracing::info!(account_id = created.id, role = %role, "account_registered");
        Ok(created)
    }
}
