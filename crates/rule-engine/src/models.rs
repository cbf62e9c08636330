//! 规则引擎领域模型

use crate::error::{Result, RuleError};
use crate::operators::Operator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 事实集合 - 一次评估的输入数据
///
/// 扁平的 `字段名 -> 标量值` 映射，评估期间只读。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Facts {
    data: Map<String, Value>,
}

impl Facts {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// 从 JSON 对象字符串创建
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 从任意 JSON 值创建，非对象返回 None
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(data) => Some(Self { data }),
            _ => None,
        }
    }

    /// 追加一个事实（构建器风格）
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// 获取底层数据
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

/// 规则文件中的原始条件
///
/// 保留 JSON 原样，直到评估时才解析为 [`Condition`]。
/// 格式错误的条件（元素个数不为 3、未知操作符等）可以正常加载，
/// 只是永远不会满足。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionSpec(pub Value);

impl ConditionSpec {
    pub fn new(field: impl Into<String>, operator: &str, value: impl Into<Value>) -> Self {
        Self(Value::Array(vec![
            Value::String(field.into()),
            Value::String(operator.to_string()),
            value.into(),
        ]))
    }

    /// 解析为 `(field, operator, value)` 三元组
    pub fn parse(&self) -> Result<Condition> {
        let parts = match &self.0 {
            Value::Array(parts) if parts.len() == 3 => parts,
            Value::Array(parts) => {
                return Err(RuleError::MalformedCondition(format!(
                    "需要 3 个元素，实际 {} 个",
                    parts.len()
                )));
            }
            other => {
                return Err(RuleError::MalformedCondition(format!(
                    "需要数组，实际为 {}",
                    value_type_name(other)
                )));
            }
        };

        let field = parts[0].as_str().ok_or_else(|| {
            RuleError::MalformedCondition(format!("字段名必须是字符串: {}", parts[0]))
        })?;

        let operator = match &parts[1] {
            Value::String(s) => s.parse::<Operator>()?,
            other => return Err(RuleError::InvalidOperator(other.to_string())),
        };

        Ok(Condition {
            field: field.to_string(),
            operator,
            value: parts[2].clone(),
        })
    }
}

impl fmt::Display for ConditionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 已解析的条件
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

impl From<Condition> for ConditionSpec {
    fn from(cond: Condition) -> Self {
        Self(Value::Array(vec![
            Value::String(cond.field),
            Value::String(cond.operator.symbol().to_string()),
            cond.value,
        ]))
    }
}

/// 规则输出动作
///
/// 对引擎不透明，胜出时原样返回。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(pub Map<String, Value>);

impl Action {
    pub const MODE_REVIEW: &'static str = "REVIEW";
    pub const REASON_NO_RULE_MATCHED: &'static str = "No rule matched";
    pub const REASON_NO_ACTION: &'static str = "No action";

    /// 没有任何规则匹配时返回的哨兵动作
    pub fn no_rule_matched() -> Self {
        Self::review(Self::REASON_NO_RULE_MATCHED)
    }

    /// 胜出规则缺少 action 时的替代动作
    pub fn no_action() -> Self {
        Self::review(Self::REASON_NO_ACTION)
    }

    fn review(reason: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("ac_mode".to_string(), Value::from(Self::MODE_REVIEW));
        fields.insert("fan_speed".to_string(), Value::from("-"));
        fields.insert("setpoint".to_string(), Value::Null);
        fields.insert("reason".to_string(), Value::from(reason));
        Self(fields)
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn is_review(&self) -> bool {
        self.get("ac_mode").and_then(Value::as_str) == Some(Self::MODE_REVIEW)
    }
}

/// 规则定义
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// 仅用于展示
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub conditions: Vec<ConditionSpec>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl Rule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_condition(
        mut self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        self.conditions
            .push(Condition::new(field, operator, value).into());
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// 展示名称，未命名时为 `(unnamed)`
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }
}

/// JSON 值的类型名称，用于错误信息
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
