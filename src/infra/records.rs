//! Row and payload types for the store tables, with conversions into the
//! domain model. Kept separate from the query layer so serde detail stays in
//! one place.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::domain::{
    classify, ActivityEntry, Application, Asset, AssetStatus, Client, ClientSummary,
    CustomerMapping, InboundPackage, Network, NetworkKind, Printer, Subnet, SubnetDraft,
    TicketingSettings,
};

/// Calendar-date columns as the store sends them (`2025-06-02`).
pub mod date_format {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

    const FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let rendered = date.format(&FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&rendered)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, &FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw {
                Some(value) if !value.trim().is_empty() => {
                    Date::parse(value.trim(), &super::FORMAT)
                        .map(Some)
                        .map_err(serde::de::Error::custom)
                }
                _ => Ok(None),
            }
        }
    }
}

pub fn format_date(date: Date) -> String {
    use time::macros::format_description;
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

pub fn parse_date(raw: &str) -> Option<Date> {
    use time::macros::format_description;
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

// ---------------------------------------------------------------------------
// clients

#[derive(Debug, Deserialize)]
pub struct ClientRow {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            contact_person: row.contact_person.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            address: row.address.unwrap_or_default(),
            notes: row.notes.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClientSummaryRow {
    pub id: Uuid,
    pub name: String,
}

impl From<ClientSummaryRow> for ClientSummary {
    fn from(row: ClientSummaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientPayload {
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct ClientDetailsPatch {
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

// ---------------------------------------------------------------------------
// inbound packages

#[derive(Debug, Deserialize)]
pub struct PackageRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub package_type: String,
    pub received_by: String,
    #[serde(default)]
    pub ticket_id: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub received_date: OffsetDateTime,
    #[serde(with = "date_format")]
    pub expected_date: Date,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub completed_by: Option<String>,
    #[serde(default)]
    pub client: Option<ClientNameRef>,
}

#[derive(Debug, Deserialize)]
pub struct ClientNameRef {
    pub name: String,
}

impl PackageRow {
    /// Converts into the domain type, deriving the tier for `today`. The
    /// stored row never carries a tier.
    pub fn into_package(self, today: Date) -> InboundPackage {
        InboundPackage {
            tier: classify(self.expected_date, today),
            id: self.id,
            client_id: self.client_id,
            client_name: self.client.map(|c| c.name).unwrap_or_default(),
            package_type: self.package_type,
            received_by: self.received_by,
            ticket_id: self.ticket_id.filter(|value| !value.is_empty()),
            serial_number: self.serial_number.filter(|value| !value.is_empty()),
            received_date: self.received_date,
            expected_date: self.expected_date,
            completed: self.completed,
            completed_at: self.completed_at,
            completed_by: self.completed_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewPackage {
    pub client_id: Uuid,
    pub package_type: String,
    pub received_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub received_date: OffsetDateTime,
    #[serde(with = "date_format")]
    pub expected_date: Date,
}

#[derive(Debug, Default, Serialize)]
pub struct PackagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompletionPatch {
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub completed_at: OffsetDateTime,
    pub completed_by: String,
}

// ---------------------------------------------------------------------------
// networks and subnets

#[derive(Debug, Deserialize)]
pub struct NetworkRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub network_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subnets: Vec<SubnetRow>,
}

impl From<NetworkRow> for Network {
    fn from(row: NetworkRow) -> Self {
        let kind = if row.network_type.eq_ignore_ascii_case("WAN") {
            NetworkKind::Wan
        } else {
            NetworkKind::Lan
        };
        Self {
            id: row.id,
            client_id: row.client_id,
            name: row.name,
            kind,
            description: row.description.unwrap_or_default(),
            subnets: row.subnets.into_iter().map(Subnet::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubnetRow {
    pub id: Uuid,
    pub subnet_address: String,
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default)]
    pub dns: Vec<String>,
    #[serde(default)]
    pub dhcp_range: Option<String>,
    #[serde(default)]
    pub vlan: Option<u16>,
}

impl From<SubnetRow> for Subnet {
    fn from(row: SubnetRow) -> Self {
        Self {
            id: row.id,
            subnet_address: row.subnet_address,
            gateway: row.gateway.unwrap_or_default(),
            dns: row.dns,
            dhcp_range: row.dhcp_range.unwrap_or_default(),
            vlan: row.vlan.unwrap_or(1),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NetworkPayload {
    pub client_id: Uuid,
    pub network_type: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct NetworkPatch {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubnetInsert {
    pub network_id: Uuid,
    pub subnet_address: String,
    pub gateway: String,
    pub dns: Vec<String>,
    pub dhcp_range: String,
    pub vlan: u16,
}

impl SubnetInsert {
    pub fn from_draft(network_id: Uuid, draft: &SubnetDraft) -> Self {
        Self {
            network_id,
            subnet_address: draft.subnet_address.clone(),
            gateway: draft.gateway.clone(),
            dns: draft.dns.clone(),
            dhcp_range: draft.dhcp_range.clone(),
            vlan: draft.vlan,
        }
    }

    pub fn from_subnet(network_id: Uuid, subnet: &Subnet) -> Self {
        Self {
            network_id,
            subnet_address: subnet.subnet_address.clone(),
            gateway: subnet.gateway.clone(),
            dns: subnet.dns.clone(),
            dhcp_range: subnet.dhcp_range.clone(),
            vlan: subnet.vlan,
        }
    }
}

// ---------------------------------------------------------------------------
// printers

#[derive(Debug, Deserialize)]
pub struct PrinterRow {
    pub id: Uuid,
    pub client_id: Uuid,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub print_deploy_info: Option<String>,
}

impl From<PrinterRow> for Printer {
    fn from(row: PrinterRow) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            location: row.location.unwrap_or_default(),
            ip_address: row.ip_address.unwrap_or_default(),
            vendor: row.vendor.unwrap_or_default(),
            model: row.model.unwrap_or_default(),
            print_deploy_info: row.print_deploy_info.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PrinterPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    pub location: String,
    pub ip_address: String,
    pub vendor: String,
    pub model: String,
    pub print_deploy_info: String,
}

// ---------------------------------------------------------------------------
// assets

#[derive(Debug, Deserialize)]
pub struct AssetRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    #[serde(default, rename = "type")]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default, with = "date_format::option")]
    pub purchase_date: Option<Date>,
    #[serde(default, with = "date_format::option")]
    pub warranty_expiry: Option<Date>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<AssetRow> for Asset {
    fn from(row: AssetRow) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            name: row.name,
            asset_type: row.asset_type.unwrap_or_default(),
            model: row.model.unwrap_or_default(),
            serial_number: row.serial_number.unwrap_or_default(),
            purchase_date: row.purchase_date,
            warranty_expiry: row.warranty_expiry,
            location: row.location.unwrap_or_default(),
            status: row
                .status
                .as_deref()
                .and_then(AssetStatus::parse)
                .unwrap_or_default(),
            assigned_to: row.assigned_to.unwrap_or_default(),
            notes: row.notes.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssetPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub model: String,
    pub serial_number: String,
    #[serde(with = "date_format::option")]
    pub purchase_date: Option<Date>,
    #[serde(with = "date_format::option")]
    pub warranty_expiry: Option<Date>,
    pub location: String,
    pub status: String,
    pub assigned_to: String,
    pub notes: String,
}

// ---------------------------------------------------------------------------
// applications

#[derive(Debug, Deserialize)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub license_type: Option<String>,
    #[serde(default, with = "date_format::option")]
    pub expiry_date: Option<Date>,
    #[serde(default)]
    pub installation_path: Option<String>,
    #[serde(default)]
    pub support_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub critical: bool,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            name: row.name,
            vendor: row.vendor.unwrap_or_default(),
            version: row.version.unwrap_or_default(),
            license_type: row.license_type.unwrap_or_default(),
            expiry_date: row.expiry_date,
            installation_path: row.installation_path.unwrap_or_default(),
            support_url: row.support_url.unwrap_or_default(),
            notes: row.notes.unwrap_or_default(),
            critical: row.critical,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplicationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    pub name: String,
    pub vendor: String,
    pub version: String,
    pub license_type: String,
    #[serde(with = "date_format::option")]
    pub expiry_date: Option<Date>,
    pub installation_path: String,
    pub support_url: String,
    pub notes: String,
    pub critical: bool,
}

// ---------------------------------------------------------------------------
// activity log

#[derive(Debug, Deserialize)]
pub struct ActivityRow {
    pub id: Uuid,
    #[serde(default)]
    pub actor: Option<String>,
    pub action_type: String,
    pub resource_type: String,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<ActivityRow> for ActivityEntry {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: row.id,
            actor: row.actor.unwrap_or_default(),
            action: row.action_type,
            resource: row.resource_type,
            resource_id: row.resource_id.unwrap_or_default(),
            details: row.details.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivityInsert {
    pub actor: String,
    pub action_type: String,
    pub resource_type: String,
    pub resource_id: String,
    pub details: String,
}

// ---------------------------------------------------------------------------
// ticketing settings and mappings

#[derive(Debug, Deserialize)]
pub struct SettingsRow {
    pub id: Uuid,
    pub api_key: String,
    pub api_url: String,
}

impl From<SettingsRow> for TicketingSettings {
    fn from(row: SettingsRow) -> Self {
        Self {
            id: Some(row.id),
            api_key: row.api_key,
            api_url: row.api_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettingsPayload {
    pub api_key: String,
    pub api_url: String,
}

#[derive(Debug, Deserialize)]
pub struct MappingRow {
    pub client_id: Uuid,
    pub customer_id: String,
}

impl From<MappingRow> for CustomerMapping {
    fn from(row: MappingRow) -> Self {
        Self {
            client_id: row.client_id,
            customer_id: row.customer_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MappingInsert {
    pub client_id: Uuid,
    pub customer_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn package_row_derives_tier_instead_of_trusting_storage() {
        let row: PackageRow = serde_json::from_value(json!({
            "id": "8f14e45f-ceea-467f-a2c8-6f71ee2b5d7a",
            "client_id": "16fd2706-8baf-433b-82eb-8c7fada847da",
            "package_type": "Laptop",
            "received_by": "Dana",
            "received_date": "2025-06-02T09:30:00Z",
            "expected_date": "2025-06-02",
            "completed": false,
            "client": {"name": "Northwind"},
        }))
        .expect("row decodes");

        // A week after the expected Monday: six business days, critical.
        let package = row.into_package(date!(2025 - 06 - 09));
        assert_eq!(package.tier, crate::domain::StatusTier::Critical);
        assert_eq!(package.client_name, "Northwind");
        assert_eq!(package.ticket_id, None);
    }

    #[test]
    fn optional_dates_roundtrip() {
        let payload = AssetPayload {
            client_id: None,
            name: "Switch".into(),
            asset_type: "Network".into(),
            model: "X-200".into(),
            serial_number: "SN".into(),
            purchase_date: Some(date!(2024 - 11 - 30)),
            warranty_expiry: None,
            location: "Rack 3".into(),
            status: "ACTIVE".into(),
            assigned_to: String::new(),
            notes: String::new(),
        };
        let value = serde_json::to_value(&payload).expect("serializes");
        assert_eq!(value["purchase_date"], json!("2024-11-30"));
        assert_eq!(value["warranty_expiry"], json!(null));
        assert!(value.get("client_id").is_none());
    }

    #[test]
    fn date_helpers_parse_and_format() {
        let parsed = parse_date("2025-06-02").expect("valid date");
        assert_eq!(format_date(parsed), "2025-06-02");
        assert!(parse_date("junk").is_none());
    }
}
