use crate::config::Service;
use crate::error::{ClientError, ClientResult};
use crate::model::*;
use crate::request::HttpMethod;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// 请求需要附带的身份信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// 无需身份头
    Anonymous,
    /// `Authorization: Bearer` + `donor_id`，401 时登出
    Donor,
    /// `recipient-id`
    Recipient,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The service that owns the endpoint.
    const SERVICE: Service = Service::Gateway;
    const IDENTITY: Identity = Identity::Anonymous;
    /// Send cookies along with the request.
    const WITH_CREDENTIALS: bool = false;

    /// Decode a successful response body.
    fn decode(body: &str) -> ClientResult<Self::Response> {
        serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// 只关心状态码的端点
macro_rules! ack_response {
    () => {
        fn decode(_body: &str) -> ClientResult<()> {
            Ok(())
        }
    };
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub password: String,
    pub address: String,
    pub location: Location,
    pub contact: Contact,
}

impl ApiRequest for SignupRequest {
    type Response = AuthTokens;
    const PATH: &'static str = "/auth/v1/signup";
    const METHOD: HttpMethod = HttpMethod::Post;
    const WITH_CREDENTIALS: bool = true;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthTokens;
    const PATH: &'static str = "/auth/v1/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNameRequest {
    pub name: String,
}

impl ApiRequest for UpdateNameRequest {
    type Response = ();
    const PATH: &'static str = "/auth/v1/updateName";
    const METHOD: HttpMethod = HttpMethod::Put;
    const IDENTITY: Identity = Identity::Donor;
    ack_response!();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

impl ApiRequest for UpdatePasswordRequest {
    type Response = ();
    const PATH: &'static str = "/auth/v1/updatePassword";
    const METHOD: HttpMethod = HttpMethod::Put;
    const IDENTITY: Identity = Identity::Donor;
    ack_response!();
}

// =========================================================
// 捐赠者 (Donor)
// =========================================================

/// Fetch the signed-in donor's profile
#[derive(Debug, Serialize)]
pub struct GetDonorRequest;

impl ApiRequest for GetDonorRequest {
    type Response = Donor;
    const PATH: &'static str = "/donor/v1/getDonor";
    const METHOD: HttpMethod = HttpMethod::Get;
    const IDENTITY: Identity = Identity::Donor;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDetailsRequest {
    pub address: String,
    pub location: Location,
    pub contact: Contact,
}

impl ApiRequest for UpdateDetailsRequest {
    type Response = ();
    const PATH: &'static str = "/donor/v1/updateDetails";
    const METHOD: HttpMethod = HttpMethod::Put;
    const IDENTITY: Identity = Identity::Donor;
    ack_response!();
}

// =========================================================
// 接收方 (Recipient)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRecipientRequest {
    pub name: String,
    pub address: String,
    pub location: Location,
    pub status: String,
    pub timezone: String,
    pub accepted_types: Vec<AcceptedType>,
    pub special_capabilities: Vec<String>,
    pub storage_capabilities: Vec<String>,
    pub open_hours: OpenHours,
    pub contact: Contact,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRecipientResponse {
    #[serde(rename = "recipient-id", default)]
    pub recipient_id: Option<RecordId>,
}

impl ApiRequest for AddRecipientRequest {
    type Response = AddRecipientResponse;
    const PATH: &'static str = "/recipient/v1/addRecipient";
    const METHOD: HttpMethod = HttpMethod::Post;
    const SERVICE: Service = Service::Recipient;
    const WITH_CREDENTIALS: bool = true;
}

/// List the stored recipient's inventory
#[derive(Debug, Serialize)]
pub struct GetInventoryRequest;

impl ApiRequest for GetInventoryRequest {
    type Response = Vec<InventoryItem>;
    const PATH: &'static str = "/getInventoryDetail";
    const METHOD: HttpMethod = HttpMethod::Get;
    const SERVICE: Service = Service::Inventory;
    const IDENTITY: Identity = Identity::Recipient;
}

// =========================================================
// 匹配与捐赠 (Matching & Donation)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindRecipientsRequest {
    pub donor: Donor,
    pub donation: Donation,
}

impl ApiRequest for FindRecipientsRequest {
    type Response = Vec<Recipient>;
    const PATH: &'static str = "/recipient/v1/findRecipients";
    const METHOD: HttpMethod = HttpMethod::Post;
    const SERVICE: Service = Service::Recipient;
    const IDENTITY: Identity = Identity::Donor;
}

const DEFAULT_PACKAGING: &str = "bulk";
const DEFAULT_STORAGE: &str = "frozen";
const DEFAULT_STATUS: &str = "active";
const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
const DEFAULT_CONTACT_NAME: &str = "Unknown Contact";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDonation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: u32,
    pub unit: String,
}

/// 匹配服务视角下的捐赠者：捐赠内容内嵌在 donor 中
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDonor {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: Location,
    pub donation: MatchDonation,
    pub special_capabilities: Vec<String>,
    pub donation_pickup_time: String,
    pub packaging_type: String,
    pub storage_capability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecipient {
    pub id: String,
    pub name: String,
    pub address: String,
    pub description: String,
    pub location: Location,
    pub status: String,
    pub timezone: String,
    pub contact: Contact,
    pub accepted_types: Vec<AcceptedType>,
    pub special_capabilities: Vec<String>,
    pub storage_capabilities: Vec<String>,
    pub open_hours: OpenHours,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub donor: MatchDonor,
    pub eligible_recipients: Vec<MatchRecipient>,
}

fn or_default(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

impl MatchRequest {
    pub fn new(donor: &Donor, donation: &Donation, candidates: &[Recipient]) -> Self {
        let donor = MatchDonor {
            id: donor.id.as_string(),
            name: donor.name.clone(),
            address: donor.address.clone(),
            location: donor.location,
            donation: MatchDonation {
                name: donation.name.clone(),
                kind: donation.kind.clone(),
                quantity: donation.quantity,
                unit: donation.unit.clone(),
            },
            special_capabilities: donation.special_capabilities.clone(),
            donation_pickup_time: donation.donation_pickup_time.clone(),
            packaging_type: or_default(&donation.packaging_type, DEFAULT_PACKAGING),
            storage_capability: or_default(&donation.storage_capability, DEFAULT_STORAGE),
        };

        let eligible_recipients = candidates
            .iter()
            .map(|r| MatchRecipient {
                id: r.id.as_string(),
                name: r.name.clone(),
                address: r.address.clone(),
                description: r.description.clone(),
                location: r.location,
                status: or_default(&r.status, DEFAULT_STATUS),
                timezone: or_default(&r.timezone, DEFAULT_TIMEZONE),
                contact: Contact {
                    name: Some(
                        r.contact
                            .name
                            .clone()
                            .filter(|n| !n.trim().is_empty())
                            .unwrap_or_else(|| DEFAULT_CONTACT_NAME.to_string()),
                    ),
                    ..r.contact.clone()
                },
                accepted_types: r.accepted_types.clone(),
                special_capabilities: r.special_capabilities.clone(),
                storage_capabilities: r.storage_capabilities.clone(),
                open_hours: r.open_hours.clone(),
            })
            .collect();

        Self {
            donor,
            eligible_recipients,
        }
    }
}

impl ApiRequest for MatchRequest {
    type Response = AiRecommendation;
    const PATH: &'static str = "/match/getBest";
    const METHOD: HttpMethod = HttpMethod::Post;
    const IDENTITY: Identity = Identity::Donor;
}

/// 最终捐赠记录中的接收方摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRecipient {
    pub id: RecordId,
    pub name: String,
    pub address: String,
    pub location: Location,
    pub contact: Contact,
}

impl From<&Recipient> for DonationRecipient {
    fn from(r: &Recipient) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            address: r.address.clone(),
            location: r.location,
            contact: r.contact.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDonationRequest {
    pub donor: Donor,
    pub donation: Donation,
    pub recipient: DonationRecipient,
}

impl ApiRequest for CreateDonationRequest {
    type Response = ();
    const PATH: &'static str = "/donation/v1/createDonation";
    const METHOD: HttpMethod = HttpMethod::Post;
    const IDENTITY: Identity = Identity::Donor;
    ack_response!();
}

/// The donor's past donations
#[derive(Debug, Serialize)]
pub struct FetchDonationHistoryRequest;

impl ApiRequest for FetchDonationHistoryRequest {
    type Response = Vec<DonationRecord>;
    const PATH: &'static str = "/donation/v1/fetchDonationHistory";
    const METHOD: HttpMethod = HttpMethod::Get;
    const IDENTITY: Identity = Identity::Donor;
}
