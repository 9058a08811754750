use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =========================================================
// 序列化辅助 (Serde Helpers)
// =========================================================

/// 后端对缺失字段有时返回 `null`，统一按默认值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =========================================================
// 基础类型
// =========================================================

/// 后端记录 ID
///
/// 不同服务分别以 JSON 数字或字符串返回 ID，比较时统一按字符串形式。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for RecordId {}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    pub id: RecordId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    pub location: Location,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedType {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, alias = "minQuantity", deserialize_with = "null_as_default")]
    pub min_quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
}

impl Default for AcceptedType {
    fn default() -> Self {
        Self {
            kind: "raw".to_string(),
            min_quantity: 0,
            unit: "kg".to_string(),
        }
    }
}

/// 营业时间：星期 -> 时间段列表，如 `"monday" -> ["10:00-21:00"]`
pub type OpenHours = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    pub location: Location,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accepted_types: Vec<AcceptedType>,
    #[serde(
        default,
        alias = "capabilities",
        deserialize_with = "null_as_default"
    )]
    pub special_capabilities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage_capabilities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open_hours: OpenHours,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// 已校验的捐赠内容，`donation_pickup_time` 为 UTC ISO-8601
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: u32,
    pub unit: String,
    pub special_capabilities: Vec<String>,
    pub donation_pickup_time: String,
    pub packaging_type: String,
    pub storage_capability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiRecommendation {
    pub recipient_id: RecordId,
    pub recipient_name: String,
    #[serde(default)]
    pub justification: String,
}

/// 登录/注册返回的凭据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub donor_id: RecordId,
    pub access_token: String,
}

/// 捐赠历史记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRecord {
    #[serde(default)]
    pub donation_id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub donation_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipient_name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage_capability: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub special_capabilities: Vec<String>,
}

// =========================================================
// 库存 (Inventory)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryStatus {
    Fulfilled,
    Unfulfilled,
    Pending,
    Other,
}

impl InventoryStatus {
    /// 大小写不敏感地解析状态文本
    pub fn parse(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "fulfilled" => Self::Fulfilled,
            "unfulfilled" => Self::Unfulfilled,
            "pending" => Self::Pending,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub packaging_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage_capability: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub special_capabilities: Vec<String>,
}

impl InventoryItem {
    pub fn status_kind(&self) -> InventoryStatus {
        InventoryStatus::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_ids_compare_by_string_form() {
        assert_eq!(RecordId::from(7), RecordId::from("7"));
        assert_ne!(RecordId::from(7), RecordId::from("8"));
    }

    #[test]
    fn recipient_tolerates_nulls_and_legacy_capabilities_key() {
        let recipient: Recipient = serde_json::from_value(json!({
            "id": 3,
            "name": "Food Bank",
            "address": "1 Main St",
            "description": null,
            "location": { "latitude": 1.0, "longitude": 2.0 },
            "capabilities": ["halal"],
            "open_hours": null,
            "contact": { "email": "a@b.c", "phone": "1" }
        }))
        .unwrap();

        assert_eq!(recipient.id, RecordId::from("3"));
        assert_eq!(recipient.description, "");
        assert_eq!(recipient.special_capabilities, vec!["halal"]);
        assert!(recipient.open_hours.is_empty());
    }

    #[test]
    fn inventory_items_use_camel_case_and_classify_status() {
        let item: InventoryItem = serde_json::from_value(json!({
            "id": 1,
            "name": "Rice",
            "status": "FULFILLED",
            "type": "raw",
            "quantity": 12,
            "unit": "kg",
            "packagingType": "bulk",
            "storageCapability": "dry",
            "specialCapabilities": ["vegan"]
        }))
        .unwrap();

        assert_eq!(item.packaging_type, "bulk");
        assert_eq!(item.special_capabilities, vec!["vegan"]);
        assert_eq!(item.status_kind(), InventoryStatus::Fulfilled);
        assert_eq!(InventoryStatus::parse("shipped"), InventoryStatus::Other);
    }
}
