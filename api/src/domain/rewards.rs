#[derive(Debug, Clone, PartialEq)]
pub struct Reward {
    pub id: i64,
    pub name: String,
    pub points_required: i64,
    pub stock: i64,
    pub claimed: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReward {
    pub name: String,
    pub points_required: i64,
    pub stock: i64,
}

#[derive(Debug, Clone, Default)]
pub struct RewardPatch {
    pub name: Option<String>,
    pub points_required: Option<i64>,
    pub stock: Option<i64>,
}
