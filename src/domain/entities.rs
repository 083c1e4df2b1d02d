use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::status::StatusTier;

/// A managed client with its documentation header fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

/// The id/name pair used by selects and the sidebar scope lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientSummary {
    pub id: Uuid,
    pub name: String,
}

/// An inbound delivery being tracked until someone signs it off.
///
/// `tier` is derived from `expected_date` at read time and is deliberately
/// absent from the stored row.
#[derive(Clone, Debug, PartialEq)]
pub struct InboundPackage {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    pub package_type: String,
    pub received_by: String,
    pub ticket_id: Option<String>,
    pub serial_number: Option<String>,
    pub received_date: OffsetDateTime,
    pub expected_date: Date,
    pub tier: StatusTier,
    pub completed: bool,
    pub completed_at: Option<OffsetDateTime>,
    pub completed_by: Option<String>,
}

/// Partial edit applied to a package row; unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackageEdit {
    pub package_type: Option<String>,
    pub received_by: Option<String>,
    pub ticket_id: Option<String>,
    pub serial_number: Option<String>,
}

impl PackageEdit {
    pub fn is_empty(&self) -> bool {
        self.package_type.is_none()
            && self.received_by.is_none()
            && self.ticket_id.is_none()
            && self.serial_number.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkKind {
    Lan,
    Wan,
}

impl NetworkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Lan => "LAN",
            NetworkKind::Wan => "WAN",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub kind: NetworkKind,
    pub description: String,
    pub subnets: Vec<Subnet>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subnet {
    pub id: Uuid,
    pub subnet_address: String,
    pub gateway: String,
    pub dns: Vec<String>,
    pub dhcp_range: String,
    pub vlan: u16,
}

/// Subnet fields as edited in the network form, before the store assigns ids.
#[derive(Clone, Debug, PartialEq)]
pub struct SubnetDraft {
    pub subnet_address: String,
    pub gateway: String,
    pub dns: Vec<String>,
    pub dhcp_range: String,
    pub vlan: u16,
}

impl Default for SubnetDraft {
    fn default() -> Self {
        Self {
            subnet_address: String::new(),
            gateway: String::new(),
            dns: vec![String::new()],
            dhcp_range: String::new(),
            vlan: 1,
        }
    }
}

impl From<&Subnet> for SubnetDraft {
    fn from(subnet: &Subnet) -> Self {
        Self {
            subnet_address: subnet.subnet_address.clone(),
            gateway: subnet.gateway.clone(),
            dns: subnet.dns.clone(),
            dhcp_range: subnet.dhcp_range.clone(),
            vlan: subnet.vlan,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Printer {
    pub id: Uuid,
    pub client_id: Uuid,
    pub location: String,
    pub ip_address: String,
    pub vendor: String,
    pub model: String,
    pub print_deploy_info: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
    Retired,
}

impl AssetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AssetStatus::Active => "ACTIVE",
            AssetStatus::Inactive => "INACTIVE",
            AssetStatus::Maintenance => "MAINTENANCE",
            AssetStatus::Retired => "RETIRED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Some(AssetStatus::Active),
            "INACTIVE" => Some(AssetStatus::Inactive),
            "MAINTENANCE" => Some(AssetStatus::Maintenance),
            "RETIRED" => Some(AssetStatus::Retired),
            _ => None,
        }
    }

    pub const ALL: [AssetStatus; 4] = [
        AssetStatus::Active,
        AssetStatus::Inactive,
        AssetStatus::Maintenance,
        AssetStatus::Retired,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct Asset {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub asset_type: String,
    pub model: String,
    pub serial_number: String,
    pub purchase_date: Option<Date>,
    pub warranty_expiry: Option<Date>,
    pub location: String,
    pub status: AssetStatus,
    pub assigned_to: String,
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Application {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub vendor: String,
    pub version: String,
    pub license_type: String,
    pub expiry_date: Option<Date>,
    pub installation_path: String,
    pub support_url: String,
    pub notes: String,
    pub critical: bool,
}

/// What happened to a resource, for the activity feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Create,
    Update,
    Delete,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Create => "CREATE",
            ActionKind::Update => "UPDATE",
            ActionKind::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Client,
    Network,
    Printer,
    InboundPackage,
    Asset,
    Application,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Client => "CLIENT",
            ResourceKind::Network => "NETWORK",
            ResourceKind::Printer => "PRINTER",
            ResourceKind::InboundPackage => "INBOUND_PACKAGE",
            ResourceKind::Asset => "ASSET",
            ResourceKind::Application => "APPLICATION",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub actor: String,
    pub action: String,
    pub resource: String,
    pub resource_id: String,
    pub details: String,
    pub created_at: OffsetDateTime,
}

/// Connection settings for the third-party ticketing system, stored remotely.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TicketingSettings {
    pub id: Option<Uuid>,
    pub api_key: String,
    pub api_url: String,
}

/// A customer record from the ticketing system, fetched through the relay.
#[derive(Clone, Debug, PartialEq)]
pub struct TicketingCustomer {
    pub id: i64,
    pub name: String,
}

/// One-to-one association between a local client and a ticketing customer.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomerMapping {
    pub client_id: Uuid,
    pub customer_id: String,
}
