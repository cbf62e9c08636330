//! 家居事实输入
//!
//! 空调场景下采集的输入：温度、湿度、在室状态、时段、窗户状态。
//! 校验取值范围后转换为规则引擎使用的扁平 [`Facts`]。

use clap::ValueEnum;
use rule_engine::Facts;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// 在室状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Occupancy {
    #[default]
    Occupied,
    Empty,
}

impl Occupancy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Occupied => "OCCUPIED",
            Self::Empty => "EMPTY",
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 时段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "MORNING",
            Self::Afternoon => "AFTERNOON",
            Self::Evening => "EVENING",
            Self::Night => "NIGHT",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 家居事实
///
/// 缺省字段取表单默认值：22.0°C / 46% / OCCUPIED / NIGHT / 窗户关闭。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HomeFacts {
    /// 温度（°C）
    #[validate(range(min = -10.0, max = 60.0, message = "温度必须在 -10.0 到 60.0 °C 之间"))]
    pub temperature: f64,

    /// 相对湿度（%）
    #[validate(range(max = 100, message = "湿度必须在 0 到 100 之间"))]
    pub humidity: u32,

    pub occupancy: Occupancy,
    pub time_of_day: TimeOfDay,
    pub windows_open: bool,
}

impl Default for HomeFacts {
    fn default() -> Self {
        Self {
            temperature: 22.0,
            humidity: 46,
            occupancy: Occupancy::default(),
            time_of_day: TimeOfDay::default(),
            windows_open: false,
        }
    }
}

impl HomeFacts {
    /// 转换为规则引擎的事实集合
    ///
    /// 温度始终为浮点数，湿度为整数，枚举为大写字符串。
    pub fn to_facts(&self) -> Facts {
        Facts::default()
            .with("temperature", self.temperature)
            .with("humidity", self.humidity)
            .with("occupancy", self.occupancy.as_str())
            .with("time_of_day", self.time_of_day.as_str())
            .with("windows_open", self.windows_open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let facts: HomeFacts = serde_json::from_str("{}").unwrap();
        assert_eq!(facts, HomeFacts::default());
        assert!(facts.validate().is_ok());
    }

    #[test]
    fn test_deserialize_upper_case_enums() {
        let facts: HomeFacts = serde_json::from_value(json!({
            "temperature": 31.5,
            "humidity": 72,
            "occupancy": "EMPTY",
            "time_of_day": "AFTERNOON",
            "windows_open": true
        }))
        .unwrap();

        assert_eq!(facts.occupancy, Occupancy::Empty);
        assert_eq!(facts.time_of_day, TimeOfDay::Afternoon);
        assert!(facts.windows_open);
    }

    #[test]
    fn test_unknown_enum_rejected() {
        let result = serde_json::from_value::<HomeFacts>(json!({"occupancy": "AWAY"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_range_validation() {
        let too_hot = HomeFacts {
            temperature: 61.0,
            ..Default::default()
        };
        assert!(too_hot.validate().is_err());

        let too_cold = HomeFacts {
            temperature: -10.5,
            ..Default::default()
        };
        assert!(too_cold.validate().is_err());

        let too_humid = HomeFacts {
            humidity: 101,
            ..Default::default()
        };
        let errors = too_humid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("humidity"));

        let edge = HomeFacts {
            temperature: 60.0,
            humidity: 100,
            ..Default::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_to_facts() {
        let facts = HomeFacts::default().to_facts();

        assert_eq!(facts.data().len(), 5);
        assert_eq!(facts.get("temperature"), Some(&json!(22.0)));
        assert_eq!(facts.get("humidity"), Some(&json!(46)));
        assert_eq!(facts.get("occupancy"), Some(&json!("OCCUPIED")));
        assert_eq!(facts.get("time_of_day"), Some(&json!("NIGHT")));
        assert_eq!(facts.get("windows_open"), Some(&json!(false)));
    }
}
