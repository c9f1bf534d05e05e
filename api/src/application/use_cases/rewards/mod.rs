pub mod create_reward;
pub mod delete_reward;
pub mod get_reward;
pub mod import_rewards;
pub mod list_rewards;
pub mod redeem_reward;
pub mod update_reward;
