pub mod account_repository_sqlx;
pub mod customer_repository_sqlx;
pub mod import_history_repository_sqlx;
pub mod membership_repository_sqlx;
pub mod notification_repository_sqlx;
pub mod product_repository_sqlx;
pub mod report_repository_sqlx;
pub mod reward_repository_sqlx;
pub mod transaction_repository_sqlx;

/// Re-derives every customer's tier after the tier table changed.
pub(crate) const RESYNC_TIERS: &str = r#"
    UPDATE customers c
       SET tier = t.tier
      FROM (
            SELECT cu.id,
                   (SELECT m.tier FROM memberships m
                     WHERE m.required_points <= cu.points
                     ORDER BY m.required_points DESC LIMIT 1) AS tier
              FROM customers cu
           ) t
     WHERE c.id = t.id AND c.tier IS DISTINCT FROM t.tier"#;
