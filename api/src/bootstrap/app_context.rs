use std::sync::Arc;

use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::customer_repository::CustomerRepository;
use crate::application::ports::import_history_repository::ImportHistoryRepository;
use crate::application::ports::membership_repository::MembershipRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::product_repository::ProductRepository;
use crate::application::ports::report_repository::ReportRepository;
use crate::application::ports::reward_repository::RewardRepository;
use crate::application::ports::transaction_repository::TransactionRepository;
use crate::bootstrap::config::Config;
use crate::domain::transactions::PointsPolicy;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    account_repo: Arc<dyn AccountRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    product_repo: Arc<dyn ProductRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    reward_repo: Arc<dyn RewardRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    transaction_repo: Arc<dyn TransactionRepository>,
    report_repo: Arc<dyn ReportRepository>,
    import_history_repo: Arc<dyn ImportHistoryRepository>,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        product_repo: Arc<dyn ProductRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        reward_repo: Arc<dyn RewardRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        transaction_repo: Arc<dyn TransactionRepository>,
        report_repo: Arc<dyn ReportRepository>,
        import_history_repo: Arc<dyn ImportHistoryRepository>,
    ) -> Self {
        Self {
            account_repo,
            customer_repo,
            product_repo,
            membership_repo,
            reward_repo,
            notification_repo,
            transaction_repo,
            report_repo,
            import_history_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn account_repo(&self) -> Arc<dyn AccountRepository> {
        self.services.account_repo.clone()
    }

    pub fn customer_repo(&self) -> Arc<dyn CustomerRepository> {
        self.services.customer_repo.clone()
    }

    pub fn product_repo(&self) -> Arc<dyn ProductRepository> {
        self.services.product_repo.clone()
    }

    pub fn membership_repo(&self) -> Arc<dyn MembershipRepository> {
        self.services.membership_repo.clone()
    }

    pub fn reward_repo(&self) -> Arc<dyn RewardRepository> {
        self.services.reward_repo.clone()
    }

    pub fn notification_repo(&self) -> Arc<dyn NotificationRepository> {
        self.services.notification_repo.clone()
    }

    pub fn transaction_repo(&self) -> Arc<dyn TransactionRepository> {
        self.services.transaction_repo.clone()
    }

    pub fn report_repo(&self) -> Arc<dyn ReportRepository> {
        self.services.report_repo.clone()
    }

    pub fn import_history_repo(&self) -> Arc<dyn ImportHistoryRepository> {
        self.services.import_history_repo.clone()
    }

    pub fn points_policy(&self) -> PointsPolicy {
        PointsPolicy::new(self.cfg.points_earning_rate)
    }
}
