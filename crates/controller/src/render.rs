//! 决策结果渲染
//!
//! 将动作和触发规则渲染为人类可读的文本。

use rule_engine::{Action, Decision, Facts, LoadedRules};
use serde_json::Value;
use std::fmt::{self, Write as _};

/// 动作摘要，如 `AC Mode: COOL | Fan Speed: HIGH | Setpoint: 24°C`
pub struct ActionSummary<'a>(pub &'a Action);

impl fmt::Display for ActionSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let setpoint = match self.0.get("setpoint") {
            None | Some(Value::Null) => "-".to_string(),
            Some(v) => format!("{}°C", display_value(v)),
        };

        write!(
            f,
            "AC Mode: {} | Fan Speed: {} | Setpoint: {}",
            field_or_dash(self.0, "ac_mode"),
            field_or_dash(self.0, "fan_speed"),
            setpoint
        )
    }
}

/// 动作中的 reason 字段，缺失时为 `-`
pub fn reason(action: &Action) -> String {
    field_or_dash(action, "reason")
}

fn field_or_dash(action: &Action, field: &str) -> String {
    action
        .get(field)
        .map(display_value)
        .unwrap_or_else(|| "-".to_string())
}

/// 字符串不带引号，其余按 JSON 输出
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 渲染完整的文本报告（命令行输出）
pub fn render_report(facts: &Facts, loaded: &LoadedRules, decision: &Decision<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== Home Facts ==");
    for (field, value) in facts.data() {
        let _ = writeln!(out, "{}: {}", field, display_value(value));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Rules: {}", loaded.source);
    if let Some(error) = &loaded.error {
        let _ = writeln!(out, "Failed to load rules, using fallback rules. Details: {}", error);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "== AC Decision (Highest Priority Match) ==");
    let _ = writeln!(out, "{}", ActionSummary(&decision.action));
    let _ = writeln!(out, "Reason: {}", reason(&decision.action));

    let _ = writeln!(out);
    let _ = writeln!(out, "== Matched Rules (by priority) ==");
    if decision.fired.is_empty() {
        let _ = writeln!(out, "No rules matched.");
    }
    for (i, fired) in decision.fired.iter().enumerate() {
        let rule = fired.rule;
        let _ = writeln!(
            out,
            "{}. {} | priority={}",
            i + 1,
            rule.display_name(),
            rule.priority
        );
        let action = rule
            .action
            .as_ref()
            .map(|a| Value::Object(a.0.clone()))
            .unwrap_or_else(|| Value::Object(Default::default()));
        let _ = writeln!(out, "   Action: {}", action);
        for cond in &rule.conditions {
            let _ = writeln!(out, "   - {}", cond);
        }
    }

    out
}
