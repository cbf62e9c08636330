//! 条件评估器
//!
//! 实现各操作符的比较逻辑。任何错误（格式错误、未知操作符、字段缺失、
//! 类型不兼容）都在 [`ConditionEvaluator::evaluate`] 中折叠为 `false`，
//! 一条坏规则不会中断整个决策。

use crate::error::{Result, RuleError};
use crate::models::{ConditionSpec, Facts, value_type_name};
use crate::operators::Operator;
use serde_json::Value;
use std::cmp::Ordering;

/// 条件评估器
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// 评估条件，任何错误都视为不满足
    pub fn evaluate(facts: &Facts, condition: &ConditionSpec) -> bool {
        Self::try_evaluate(facts, condition).unwrap_or(false)
    }

    /// 评估条件并保留失败原因（用于追踪）
    pub fn try_evaluate(facts: &Facts, condition: &ConditionSpec) -> Result<bool> {
        let cond = condition.parse()?;

        let fact = facts
            .get(&cond.field)
            .ok_or_else(|| RuleError::FieldNotFound(cond.field.clone()))?;

        Self::apply(fact, cond.operator, &cond.value)
    }

    /// 对单个事实值应用操作符
    ///
    /// # Arguments
    /// * `fact` - 事实集合中的字段值
    /// * `operator` - 操作符
    /// * `expected` - 规则中定义的比较值
    pub fn apply(fact: &Value, operator: Operator, expected: &Value) -> Result<bool> {
        match operator {
            Operator::Eq => Ok(Self::eq(fact, expected)),
            Operator::Neq => Ok(!Self::eq(fact, expected)),
            Operator::Gt => Self::compare(fact, expected, operator).map(Ordering::is_gt),
            Operator::Gte => Self::compare(fact, expected, operator).map(Ordering::is_ge),
            Operator::Lt => Self::compare(fact, expected, operator).map(Ordering::is_lt),
            Operator::Lte => Self::compare(fact, expected, operator).map(Ordering::is_le),
            Operator::In => Self::contains(expected, fact, operator),
            // 与 in 共享错误：容器类型不对时两者都不满足
            Operator::NotIn => Self::contains(expected, fact, operator).map(|r| !r),
        }
    }

    /// 相等比较
    fn eq(a: &Value, b: &Value) -> bool {
        match (a, b) {
            // 整数与浮点数按数值比较（30 == 30.0）
            (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
                (Some(i), Some(j)) => i == j,
                _ => x.as_f64() == y.as_f64(),
            },
            (Value::Array(xs), Value::Array(ys)) => {
                xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| Self::eq(x, y))
            }
            (Value::Object(xs), Value::Object(ys)) => {
                xs.len() == ys.len()
                    && xs
                        .iter()
                        .all(|(k, x)| ys.get(k).is_some_and(|y| Self::eq(x, y)))
            }
            _ => a == b,
        }
    }

    /// 大小比较，仅支持同类值（数值、字符串、布尔、数组按字典序）
    fn compare(a: &Value, b: &Value, operator: Operator) -> Result<Ordering> {
        let ordering = match (a, b) {
            (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
                (Some(i), Some(j)) => Some(i.cmp(&j)),
                _ => x
                    .as_f64()
                    .zip(y.as_f64())
                    .and_then(|(x, y)| x.partial_cmp(&y)),
            },
            (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
            (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
            (Value::Array(xs), Value::Array(ys)) => {
                for (x, y) in xs.iter().zip(ys) {
                    match Self::compare(x, y, operator)? {
                        Ordering::Equal => continue,
                        other => return Ok(other),
                    }
                }
                Some(xs.len().cmp(&ys.len()))
            }
            _ => None,
        };

        ordering.ok_or_else(|| Self::mismatch(operator, a, b))
    }

    /// 成员检查：`needle` 是否在 `haystack` 中
    ///
    /// - 数组：任一元素相等
    /// - 字符串：子串
    /// - 对象：键存在，键总是字符串，其他标量恒不在其中
    fn contains(haystack: &Value, needle: &Value, operator: Operator) -> Result<bool> {
        match (haystack, needle) {
            (Value::Array(items), _) => Ok(items.iter().any(|item| Self::eq(needle, item))),
            (Value::String(s), Value::String(sub)) => Ok(s.contains(sub.as_str())),
            (Value::Object(map), Value::String(key)) => Ok(map.contains_key(key)),
            (Value::Object(_), Value::Null | Value::Bool(_) | Value::Number(_)) => Ok(false),
            _ => Err(Self::mismatch(operator, needle, haystack)),
        }
    }

    fn mismatch(operator: Operator, actual: &Value, expected: &Value) -> RuleError {
        RuleError::TypeMismatch {
            operator: operator.to_string(),
            actual: value_type_name(actual).to_string(),
            expected: value_type_name(expected).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn facts() -> Facts {
        Facts::default()
            .with("temperature", 30.0)
            .with("humidity", 70)
            .with("occupancy", "OCCUPIED")
            .with("windows_open", false)
    }

    fn check(field: &str, op: &str, value: Value) -> bool {
        ConditionEvaluator::evaluate(&facts(), &ConditionSpec::new(field, op, value))
    }

    #[test]
    fn test_eq_numbers() {
        assert!(check("humidity", "==", json!(70)));
        assert!(check("humidity", "==", json!(70.0)));
        assert!(check("temperature", "==", json!(30)));
        assert!(!check("humidity", "==", json!(71)));
    }

    #[test]
    fn test_eq_strings_and_bools() {
        assert!(check("occupancy", "==", json!("OCCUPIED")));
        assert!(!check("occupancy", "==", json!("EMPTY")));
        assert!(check("occupancy", "!=", json!("EMPTY")));
        assert!(check("windows_open", "==", json!(false)));
        assert!(check("windows_open", "!=", json!(true)));
    }

    #[test]
    fn test_eq_across_types_is_false_not_error() {
        assert!(!check("humidity", "==", json!("70")));
        assert!(check("humidity", "!=", json!("70")));
        assert!(!check("windows_open", "==", json!(0)));
    }

    #[test]
    fn test_numeric_comparisons() {
        assert!(check("temperature", ">", json!(28)));
        assert!(!check("temperature", ">", json!(30)));
        assert!(check("temperature", ">=", json!(30)));
        assert!(check("humidity", "<", json!(70.5)));
        assert!(check("humidity", "<=", json!(70)));
        assert!(!check("humidity", "<", json!(70)));
    }

    #[test]
    fn test_string_ordering_is_lexicographic() {
        assert!(check("occupancy", ">", json!("EMPTY")));
        assert!(check("occupancy", "<", json!("P")));
    }

    #[test]
    fn test_incompatible_ordering_is_error() {
        let err = ConditionEvaluator::try_evaluate(
            &facts(),
            &ConditionSpec::new("occupancy", ">", json!(5)),
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::TypeMismatch { .. }));

        assert!(!check("occupancy", ">", json!(5)));
        assert!(!check("occupancy", "<=", json!(5)));
        assert!(!check("temperature", "<", Value::Null));
    }

    #[test]
    fn test_in_list() {
        assert!(check("occupancy", "in", json!(["OCCUPIED", "AWAY"])));
        assert!(!check("occupancy", "in", json!(["EMPTY"])));
        assert!(check("humidity", "in", json!([60, 70.0, 80])));
        assert!(check("occupancy", "not_in", json!(["EMPTY"])));
        assert!(!check("occupancy", "not_in", json!(["OCCUPIED"])));
    }

    #[test]
    fn test_in_string_and_object() {
        assert!(check("occupancy", "in", json!("UNOCCUPIED")));
        assert!(check("occupancy", "in", json!({"OCCUPIED": 1})));
        assert!(!check("occupancy", "in", json!({"EMPTY": 1})));

        // 对象的键都是字符串，数值和布尔事实不在其中
        assert!(!check("humidity", "in", json!({"70": true})));
        assert!(check("humidity", "not_in", json!({"70": true})));
        assert!(check("windows_open", "not_in", json!({"true": 1})));
    }

    #[test]
    fn test_in_object_with_container_needle_is_false_both_ways() {
        let facts = Facts::default().with("modes", json!(["COOL"]));
        for op in ["in", "not_in"] {
            assert!(!ConditionEvaluator::evaluate(
                &facts,
                &ConditionSpec::new("modes", op, json!({"COOL": 1}))
            ));
        }
    }

    #[test]
    fn test_in_non_container_is_false_both_ways() {
        assert!(!check("humidity", "in", json!(70)));
        assert!(!check("humidity", "not_in", json!(70)));
        // 数字不能作为字符串的子串检查
        assert!(!check("humidity", "in", json!("70")));
        assert!(!check("humidity", "not_in", json!("70")));
    }

    #[test]
    fn test_missing_field() {
        for op in Operator::ALL {
            assert!(!check("co2", op.symbol(), json!(400)), "operator {op}");
            assert!(!check("co2", op.symbol(), json!([400])), "operator {op}");
        }

        let err = ConditionEvaluator::try_evaluate(
            &facts(),
            &ConditionSpec::new("co2", "!=", json!(400)),
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::FieldNotFound(f) if f == "co2"));
    }

    #[test]
    fn test_unknown_operator() {
        assert!(!check("temperature", "=>", json!(20)));
        assert!(!check("temperature", "between", json!([20, 40])));
    }

    #[test]
    fn test_wrong_arity() {
        let facts = facts();
        for raw in [
            json!([]),
            json!(["temperature", ">"]),
            json!(["temperature", ">", 20, "extra"]),
            json!({"field": "temperature"}),
            json!("temperature > 20"),
        ] {
            assert!(!ConditionEvaluator::evaluate(&facts, &ConditionSpec(raw)));
        }
    }

    #[test]
    fn test_apply_direct() {
        assert!(ConditionEvaluator::apply(&json!(5), Operator::Lt, &json!(6)).unwrap());
        assert!(ConditionEvaluator::apply(&json!([1, 2]), Operator::Lt, &json!([1, 3])).unwrap());
        assert!(ConditionEvaluator::apply(&json!(true), Operator::Gt, &json!(false)).unwrap());
    }
}
