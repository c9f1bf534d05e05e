pub mod create_membership;
pub mod delete_membership;
pub mod get_membership;
pub mod import_memberships;
pub mod list_memberships;
pub mod update_membership;
