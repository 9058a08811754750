//! 表单状态与提交前校验
//!
//! 每个表单持有原始输入（字符串为主），`validate` 执行必填与格式检查，
//! 成功时返回可直接发送的请求对象。

use crate::date::normalize_pickup_time;
use crate::error::ValidationError;
use crate::model::*;
use crate::protocol::*;

/// 一周七天，顺序即界面展示顺序
pub const DAYS_OF_WEEK: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

pub const STORAGE_OPTIONS: [&str; 4] = ["refrigerated", "frozen", "dry", "ambient"];
pub const ACCEPTED_TYPE_OPTIONS: [&str; 4] = ["raw", "cooked", "packaged", "canned"];
pub const UNIT_OPTIONS: [&str; 4] = ["kg", "lbs", "pieces", "liters"];

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

// =========================================================
// 账户表单 (Account Forms)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        if self.name.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(LoginRequest {
            name: self.name.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub name: String,
    pub password: String,
    pub address: String,
    pub location: Option<Location>,
    pub email: String,
    pub phone: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<SignupRequest, ValidationError> {
        let location = self.location.ok_or(ValidationError::MissingRequiredFields)?;
        if blank(&self.name)
            || self.password.is_empty()
            || blank(&self.address)
            || blank(&self.email)
            || blank(&self.phone)
        {
            return Err(ValidationError::MissingRequiredFields);
        }

        Ok(SignupRequest {
            name: self.name.clone(),
            password: self.password.clone(),
            address: self.address.clone(),
            location,
            contact: Contact {
                name: None,
                email: self.email.clone(),
                phone: self.phone.clone(),
            },
        })
    }
}

/// 修改显示名称
pub fn validate_name(name: &str) -> Result<UpdateNameRequest, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::InvalidName);
    }
    Ok(UpdateNameRequest {
        name: name.to_string(),
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordForm {
    pub old_password: String,
    pub new_password: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<UpdatePasswordRequest, ValidationError> {
        if self.old_password.is_empty() || self.new_password.is_empty() {
            return Err(ValidationError::MissingPasswords);
        }
        Ok(UpdatePasswordRequest {
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

/// 设置页的联系方式与位置
///
/// 经纬度以文本输入，提交时解析。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsForm {
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    pub email: String,
    pub phone: String,
}

impl DetailsForm {
    /// 由已有资料预填
    pub fn from_donor(donor: &Donor) -> Self {
        Self {
            address: donor.address.clone(),
            latitude: donor.location.latitude.to_string(),
            longitude: donor.location.longitude.to_string(),
            email: donor.contact.email.clone(),
            phone: donor.contact.phone.clone(),
        }
    }

    pub fn validate(&self) -> Result<UpdateDetailsRequest, ValidationError> {
        if blank(&self.address) || blank(&self.email) || blank(&self.phone) {
            return Err(ValidationError::MissingRequiredFields);
        }
        let location = parse_coordinates(&self.latitude, &self.longitude)
            .ok_or(ValidationError::InvalidCoordinates)?;

        Ok(UpdateDetailsRequest {
            address: self.address.clone(),
            location,
            contact: Contact {
                name: None,
                email: self.email.clone(),
                phone: self.phone.clone(),
            },
        })
    }
}

/// 解析经纬度文本，任一无法解析或非有限值时返回 None
pub fn parse_coordinates(latitude: &str, longitude: &str) -> Option<Location> {
    let latitude: f64 = latitude.trim().parse().ok()?;
    let longitude: f64 = longitude.trim().parse().ok()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    Some(Location::new(latitude, longitude))
}

// =========================================================
// 接收方注册 (Recipient Registration)
// =========================================================

/// 将每天的文本（逗号分隔的时间段）转为请求格式，空白的天被省略
///
/// `"10:00-21:00, 14:00-18:00"` -> `["10:00-21:00", "14:00-18:00"]`
pub fn parse_open_hours<'a, I>(days: I) -> OpenHours
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    days.into_iter()
        .filter_map(|(day, raw)| {
            let ranges: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string)
                .collect();
            (!ranges.is_empty()).then(|| (day.to_string(), ranges))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipientForm {
    pub name: String,
    pub address: String,
    pub location: Option<Location>,
    pub status: String,
    pub timezone: String,
    pub accepted_types: Vec<AcceptedType>,
    pub special_capabilities: Vec<String>,
    pub storage_capabilities: Vec<String>,
    /// 与 `DAYS_OF_WEEK` 一一对应的原始文本
    pub open_hours: [String; 7],
    pub email: String,
    pub phone: String,
    pub description: String,
}

impl Default for RecipientForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            location: None,
            status: "active".to_string(),
            timezone: "Asia/Kolkata".to_string(),
            accepted_types: vec![AcceptedType::default()],
            special_capabilities: Vec::new(),
            storage_capabilities: Vec::new(),
            open_hours: Default::default(),
            email: String::new(),
            phone: String::new(),
            description: String::new(),
        }
    }
}

impl RecipientForm {
    pub fn toggle_storage(&mut self, capability: &str) {
        if let Some(pos) = self
            .storage_capabilities
            .iter()
            .position(|c| c == capability)
        {
            self.storage_capabilities.remove(pos);
        } else {
            self.storage_capabilities.push(capability.to_string());
        }
    }

    pub fn add_accepted_type(&mut self) {
        self.accepted_types.push(AcceptedType::default());
    }

    /// 至少保留一行
    pub fn remove_accepted_type(&mut self, index: usize) {
        if self.accepted_types.len() > 1 && index < self.accepted_types.len() {
            self.accepted_types.remove(index);
        }
    }

    pub fn validate(&self) -> Result<AddRecipientRequest, ValidationError> {
        let location = self.location.ok_or(ValidationError::MissingRequiredFields)?;
        if blank(&self.name)
            || blank(&self.address)
            || blank(&self.email)
            || blank(&self.phone)
            || self.accepted_types.is_empty()
            || self.storage_capabilities.is_empty()
        {
            return Err(ValidationError::MissingRequiredFields);
        }

        let open_hours = parse_open_hours(
            DAYS_OF_WEEK
                .iter()
                .copied()
                .zip(self.open_hours.iter().map(String::as_str)),
        );
        if open_hours.is_empty() {
            return Err(ValidationError::MissingOpenHours);
        }

        Ok(AddRecipientRequest {
            name: self.name.clone(),
            address: self.address.clone(),
            location,
            status: self.status.clone(),
            timezone: self.timezone.clone(),
            accepted_types: self.accepted_types.clone(),
            special_capabilities: self.special_capabilities.clone(),
            storage_capabilities: self.storage_capabilities.clone(),
            open_hours,
            contact: Contact {
                name: None,
                email: self.email.clone(),
                phone: self.phone.clone(),
            },
            description: self.description.clone(),
        })
    }
}

// =========================================================
// 捐赠表单 (Donation Form)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DonationForm {
    pub name: String,
    pub kind: String,
    pub quantity: String,
    pub unit: String,
    pub special_capabilities: Vec<String>,
    /// `datetime-local` 原始值
    pub donation_pickup_time: String,
    pub packaging_type: String,
    pub storage_capability: String,
}

impl Default for DonationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: "raw".to_string(),
            quantity: String::new(),
            unit: "meals".to_string(),
            special_capabilities: Vec::new(),
            donation_pickup_time: String::new(),
            packaging_type: "bulk".to_string(),
            storage_capability: "frozen".to_string(),
        }
    }
}

impl DonationForm {
    /// 勾选/取消一个特殊能力
    pub fn set_capability(&mut self, capability: &str, checked: bool) {
        self.special_capabilities.retain(|c| c != capability);
        if checked {
            self.special_capabilities.push(capability.to_string());
        }
    }

    /// 添加自由输入的饮食选项（小写、去重）；返回是否添加
    pub fn add_capability(&mut self, raw: &str) -> bool {
        let option = raw.trim().to_lowercase();
        if option.is_empty() || self.special_capabilities.contains(&option) {
            return false;
        }
        self.special_capabilities.push(option);
        true
    }

    fn parse_quantity(&self) -> Result<u32, ValidationError> {
        self.quantity
            .trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidQuantity)
    }

    /// 校验并生成 `Donation`（取件时间转为 UTC ISO-8601）
    pub fn validate(&self) -> Result<Donation, ValidationError> {
        if blank(&self.name) {
            return Err(ValidationError::MissingDonationName);
        }
        let quantity = self.parse_quantity()?;
        let donation_pickup_time = normalize_pickup_time(&self.donation_pickup_time)?;

        Ok(Donation {
            name: self.name.clone(),
            kind: self.kind.clone(),
            quantity,
            unit: self.unit.clone(),
            special_capabilities: self.special_capabilities.clone(),
            donation_pickup_time,
            packaging_type: self.packaging_type.clone(),
            storage_capability: self.storage_capability.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn open_hours_are_split_trimmed_and_blank_days_dropped() {
        let hours = parse_open_hours([
            ("monday", "10:00-21:00, 14:00-18:00"),
            ("tuesday", "   "),
            ("wednesday", "09:00-12:00,,"),
        ]);

        assert_eq!(hours.len(), 2);
        assert_eq!(hours["monday"], vec!["10:00-21:00", "14:00-18:00"]);
        assert_eq!(hours["wednesday"], vec!["09:00-12:00"]);
        assert!(!hours.contains_key("tuesday"));
    }

    fn filled_recipient() -> RecipientForm {
        let mut form = RecipientForm {
            name: "Shelter".to_string(),
            address: "2 Side St".to_string(),
            location: Some(Location::new(12.9, 77.6)),
            email: "s@x.org".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        };
        form.toggle_storage("dry");
        form.open_hours[0] = "10:00-21:00, 14:00-18:00".to_string();
        form
    }

    #[test]
    fn recipient_payload_contains_only_filled_days() {
        let req = filled_recipient().validate().unwrap();
        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(
            value["open_hours"],
            serde_json::json!({ "monday": ["10:00-21:00", "14:00-18:00"] })
        );
        assert_eq!(value["storage_capabilities"], serde_json::json!(["dry"]));
        assert_eq!(value["accepted_types"][0]["type"], "raw");
    }

    #[test]
    fn recipient_requires_open_hours_and_storage() {
        let mut form = filled_recipient();
        form.open_hours[0] = " , ".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MissingOpenHours));

        let mut form = filled_recipient();
        form.toggle_storage("dry");
        assert_eq!(form.validate(), Err(ValidationError::MissingRequiredFields));

        let mut form = filled_recipient();
        form.location = None;
        assert_eq!(form.validate(), Err(ValidationError::MissingRequiredFields));
    }

    #[test]
    fn accepted_types_keep_at_least_one_row() {
        let mut form = RecipientForm::default();
        form.remove_accepted_type(0);
        assert_eq!(form.accepted_types.len(), 1);

        form.add_accepted_type();
        form.accepted_types[1].kind = "canned".to_string();
        form.remove_accepted_type(0);
        assert_eq!(form.accepted_types[0].kind, "canned");
    }

    #[test]
    fn donation_payload_has_iso_pickup_time() {
        let form = DonationForm {
            name: "Rice".to_string(),
            quantity: "25".to_string(),
            donation_pickup_time: "2025-06-01T12:00".to_string(),
            ..Default::default()
        };

        let donation = form.validate().unwrap();

        assert_eq!(donation.quantity, 25);
        assert_eq!(donation.kind, "raw");
        assert!(DateTime::parse_from_rfc3339(&donation.donation_pickup_time).is_ok());
    }

    #[test]
    fn donation_rejects_bad_quantity_and_missing_time() {
        let mut form = DonationForm {
            name: "Rice".to_string(),
            quantity: "lots".to_string(),
            donation_pickup_time: "2025-06-01T12:00".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::InvalidQuantity));

        form.quantity = "3".to_string();
        form.donation_pickup_time.clear();
        assert_eq!(form.validate(), Err(ValidationError::PickupTimeRequired));
    }

    #[test]
    fn capabilities_toggle_without_duplicates() {
        let mut form = DonationForm::default();
        form.set_capability("halal", true);
        form.set_capability("halal", true);
        form.set_capability("vegan", true);
        form.set_capability("halal", false);
        assert_eq!(form.special_capabilities, vec!["vegan"]);

        assert!(form.add_capability("  Gluten-Free "));
        assert!(!form.add_capability("gluten-free"));
        assert!(!form.add_capability("   "));
        assert_eq!(form.special_capabilities, vec!["vegan", "gluten-free"]);
    }

    #[test]
    fn details_require_numeric_coordinates() {
        let mut form = DetailsForm {
            address: "1 Main St".to_string(),
            latitude: "37.77".to_string(),
            longitude: "west".to_string(),
            email: "a@b.c".to_string(),
            phone: "1".to_string(),
        };
        assert_eq!(form.validate(), Err(ValidationError::InvalidCoordinates));

        form.longitude = "-122.41".to_string();
        let req = form.validate().unwrap();
        assert_eq!(req.location, Location::new(37.77, -122.41));
    }

    #[test]
    fn signup_and_login_require_every_field() {
        assert_eq!(
            LoginForm::default().validate(),
            Err(ValidationError::MissingCredentials)
        );

        let mut form = SignupForm {
            name: "Cafe".to_string(),
            password: "pw".to_string(),
            address: "1 Main St".to_string(),
            location: None,
            email: "c@x.com".to_string(),
            phone: "1".to_string(),
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingRequiredFields));

        form.location = Some(Location::new(1.0, 2.0));
        assert!(form.validate().is_ok());

        assert_eq!(validate_name("   "), Err(ValidationError::InvalidName));
        assert_eq!(validate_name(" Cafe ").unwrap().name, "Cafe");
    }
}
