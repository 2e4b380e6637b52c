use crate::models::{CompositeKey, LineItem};
use bigdecimal::BigDecimal;
use serde::Serialize;

/// 差异结果行 (一对 Actual / Budget)
///
/// 字段私有: variance 只能由 `new` 从两笔金额算出, 不会与输入脱节。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceRecord {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Entity")]
    entity: String,
    #[serde(rename = "Account")]
    account: String,
    #[serde(rename = "Actual_Amount")]
    actual_amount: BigDecimal,
    #[serde(rename = "Budget_Amount")]
    budget_amount: BigDecimal,
    #[serde(rename = "Variance")]
    variance: BigDecimal,
}

impl VarianceRecord {
    pub fn new(key: CompositeKey, actual_amount: BigDecimal, budget_amount: BigDecimal) -> Self {
        let variance = &actual_amount - &budget_amount;
        Self {
            month: key.month,
            entity: key.entity,
            account: key.account,
            actual_amount,
            budget_amount,
            variance,
        }
    }

    /// 由一对已匹配的明细构建
    pub fn from_pair(actual: &LineItem, budget: &LineItem) -> Self {
        Self::new(actual.key(), actual.amount.clone(), budget.amount.clone())
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn actual_amount(&self) -> &BigDecimal {
        &self.actual_amount
    }

    pub fn budget_amount(&self) -> &BigDecimal {
        &self.budget_amount
    }

    /// Actual - Budget, 负数表示低于预算
    pub fn variance(&self) -> &BigDecimal {
        &self.variance
    }
}
