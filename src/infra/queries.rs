//! Typed operations over [`StoreClient`], one group per table.
//!
//! Every mutation returns enough of the stored row for the caller to write a
//! useful activity entry. Reads that annotate packages take `today`
//! explicitly so the tier derivation stays a pure function of its inputs.

use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::domain::{
    ActivityEntry, Application, Asset, Client, ClientSummary, CustomerMapping, InboundPackage,
    Network, NetworkKind, Printer, Subnet, SubnetDraft, TicketingSettings,
};
use crate::infra::records::{
    format_date, ActivityRow, ApplicationPayload, ApplicationRow, AssetPayload, AssetRow,
    ClientDetailsPatch, ClientPayload, ClientRow, ClientSummaryRow, CompletionPatch, MappingInsert,
    MappingRow, NetworkPatch, NetworkPayload, NetworkRow, NewPackage, PackagePatch, PackageRow,
    PrinterPayload, PrinterRow, SettingsPayload, SettingsRow, SubnetInsert,
};
use crate::infra::store::{StoreClient, StoreError};

const PACKAGE_COLUMNS: &str = "*,client:clients(name)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total_clients: u64,
    pub pending_inbound: u64,
    pub overdue: u64,
}

impl StoreClient {
    // -- clients ------------------------------------------------------------

    pub async fn client_directory(&self) -> Result<Vec<ClientSummary>, StoreError> {
        let rows: Vec<ClientSummaryRow> = self
            .select("clients", "id,name")
            .order("name", false)
            .fetch()
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn clients(&self) -> Result<Vec<Client>, StoreError> {
        let rows: Vec<ClientRow> = self
            .select("clients", "*")
            .order("name", false)
            .fetch()
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn client(&self, id: Uuid) -> Result<Client, StoreError> {
        let row: ClientRow = self.select("clients", "*").eq("id", id).fetch_one().await?;
        Ok(row.into())
    }

    pub async fn create_client(&self, payload: &ClientPayload) -> Result<Client, StoreError> {
        let mut rows: Vec<ClientRow> = self.insert_returning("clients", &[payload]).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    pub async fn update_client(
        &self,
        id: Uuid,
        patch: &ClientDetailsPatch,
    ) -> Result<Client, StoreError> {
        let mut rows: Vec<ClientRow> = self
            .update_returning("clients", patch, &[("id", id.to_string())], "*")
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    pub async fn delete_client(&self, id: Uuid) -> Result<Client, StoreError> {
        let mut rows: Vec<ClientRow> = self
            .delete_returning("clients", &[("id", id.to_string())], "*")
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    // -- inbound packages ---------------------------------------------------

    /// Full package list, newest expected date first, optionally pinned to
    /// one client. Tiers are derived against `today`.
    pub async fn packages(
        &self,
        scope: Option<Uuid>,
        today: Date,
    ) -> Result<Vec<InboundPackage>, StoreError> {
        let mut query = self
            .select("inbound_packages", PACKAGE_COLUMNS)
            .order("expected_date", true);
        if let Some(client_id) = scope {
            query = query.eq("client_id", client_id);
        }
        let rows: Vec<PackageRow> = query.fetch().await?;
        Ok(rows.into_iter().map(|row| row.into_package(today)).collect())
    }

    pub async fn recent_packages(
        &self,
        limit: usize,
        today: Date,
    ) -> Result<Vec<InboundPackage>, StoreError> {
        let rows: Vec<PackageRow> = self
            .select("inbound_packages", PACKAGE_COLUMNS)
            .order("received_date", true)
            .limit(limit)
            .fetch()
            .await?;
        Ok(rows.into_iter().map(|row| row.into_package(today)).collect())
    }

    pub async fn create_package(
        &self,
        payload: &NewPackage,
        today: Date,
    ) -> Result<InboundPackage, StoreError> {
        let mut rows: Vec<PackageRow> = self
            .insert_returning("inbound_packages", &[payload])
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into_package(today))
    }

    pub async fn update_package(&self, id: Uuid, patch: &PackagePatch) -> Result<(), StoreError> {
        self.update("inbound_packages", patch, &[("id", id.to_string())])
            .await
    }

    /// One-way completion; stamps the completion time and the operator.
    pub async fn complete_package(
        &self,
        id: Uuid,
        completed_by: &str,
        today: Date,
    ) -> Result<InboundPackage, StoreError> {
        let patch = CompletionPatch {
            completed: true,
            completed_at: OffsetDateTime::now_utc(),
            completed_by: completed_by.to_string(),
        };
        let mut rows: Vec<PackageRow> = self
            .update_returning(
                "inbound_packages",
                &patch,
                &[("id", id.to_string())],
                PACKAGE_COLUMNS,
            )
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into_package(today))
    }

    // -- dashboard ----------------------------------------------------------

    pub async fn dashboard_counts(&self, today: Date) -> Result<DashboardCounts, StoreError> {
        let total_clients = self.select("clients", "id").count().await?;
        let pending_inbound = self
            .select("inbound_packages", "id")
            .eq("completed", "false")
            .count()
            .await?;
        let overdue = self
            .select("inbound_packages", "id")
            .eq("completed", "false")
            .lt("expected_date", format_date(today))
            .count()
            .await?;
        Ok(DashboardCounts {
            total_clients,
            pending_inbound,
            overdue,
        })
    }

    pub async fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityEntry>, StoreError> {
        let rows: Vec<ActivityRow> = self
            .select("activity_logs", "*")
            .order("created_at", true)
            .limit(limit)
            .fetch()
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    // -- networks -----------------------------------------------------------

    pub async fn networks(
        &self,
        client_id: Uuid,
        kind: NetworkKind,
    ) -> Result<Vec<Network>, StoreError> {
        let rows: Vec<NetworkRow> = self
            .select("networks", "*,subnets(*)")
            .eq("client_id", client_id)
            .eq("network_type", kind.as_str())
            .fetch()
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create_network(
        &self,
        client_id: Uuid,
        kind: NetworkKind,
        name: &str,
        description: &str,
        subnets: &[SubnetDraft],
    ) -> Result<Network, StoreError> {
        let payload = NetworkPayload {
            client_id,
            network_type: kind.as_str().to_string(),
            name: name.to_string(),
            description: description.to_string(),
        };
        let mut rows: Vec<NetworkRow> = self.insert_returning("networks", &[payload]).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        let network: Network = rows.swap_remove(0).into();

        let inserts: Vec<SubnetInsert> = subnets
            .iter()
            .map(|draft| SubnetInsert::from_draft(network.id, draft))
            .collect();
        if !inserts.is_empty() {
            self.insert("subnets", &inserts).await?;
        }
        Ok(network)
    }

    /// Renames/redescribes the network row, then swaps its subnet set via
    /// [`replace_subnets`] so a partial failure can never strand the network
    /// without any subnets.
    pub async fn update_network(
        &self,
        network: &Network,
        name: &str,
        description: &str,
        subnets: &[SubnetDraft],
    ) -> Result<(), SubnetReplaceError> {
        let patch = NetworkPatch {
            name: name.to_string(),
            description: description.to_string(),
        };
        self.update("networks", &patch, &[("id", network.id.to_string())])
            .await
            .map_err(SubnetReplaceError::Update)?;

        replace_subnets(self, network.id, &network.subnets, subnets).await
    }

    pub async fn delete_network(&self, id: Uuid) -> Result<Network, StoreError> {
        let mut rows: Vec<NetworkRow> = self
            .delete_returning("networks", &[("id", id.to_string())], "*")
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    // -- printers -----------------------------------------------------------

    pub async fn printers(&self, client_id: Uuid) -> Result<Vec<Printer>, StoreError> {
        let rows: Vec<PrinterRow> = self
            .select("printers", "*")
            .eq("client_id", client_id)
            .order("location", false)
            .fetch()
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create_printer(&self, payload: &PrinterPayload) -> Result<Printer, StoreError> {
        let mut rows: Vec<PrinterRow> = self.insert_returning("printers", &[payload]).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    pub async fn update_printer(
        &self,
        id: Uuid,
        payload: &PrinterPayload,
    ) -> Result<Printer, StoreError> {
        let mut rows: Vec<PrinterRow> = self
            .update_returning("printers", payload, &[("id", id.to_string())], "*")
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    pub async fn delete_printer(&self, id: Uuid) -> Result<Printer, StoreError> {
        let mut rows: Vec<PrinterRow> = self
            .delete_returning("printers", &[("id", id.to_string())], "*")
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    // -- assets -------------------------------------------------------------

    pub async fn assets(&self, client_id: Uuid) -> Result<Vec<Asset>, StoreError> {
        let rows: Vec<AssetRow> = self
            .select("assets", "*")
            .eq("client_id", client_id)
            .order("name", false)
            .fetch()
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create_asset(&self, payload: &AssetPayload) -> Result<Asset, StoreError> {
        let mut rows: Vec<AssetRow> = self.insert_returning("assets", &[payload]).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    pub async fn update_asset(&self, id: Uuid, payload: &AssetPayload) -> Result<Asset, StoreError> {
        let mut rows: Vec<AssetRow> = self
            .update_returning("assets", payload, &[("id", id.to_string())], "*")
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    pub async fn delete_asset(&self, id: Uuid) -> Result<Asset, StoreError> {
        let mut rows: Vec<AssetRow> = self
            .delete_returning("assets", &[("id", id.to_string())], "*")
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    // -- applications -------------------------------------------------------

    pub async fn applications(&self, client_id: Uuid) -> Result<Vec<Application>, StoreError> {
        let rows: Vec<ApplicationRow> = self
            .select("applications", "*")
            .eq("client_id", client_id)
            .order("name", false)
            .fetch()
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<Application, StoreError> {
        let mut rows: Vec<ApplicationRow> =
            self.insert_returning("applications", &[payload]).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    pub async fn update_application(
        &self,
        id: Uuid,
        payload: &ApplicationPayload,
    ) -> Result<Application, StoreError> {
        let mut rows: Vec<ApplicationRow> = self
            .update_returning("applications", payload, &[("id", id.to_string())], "*")
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    pub async fn delete_application(&self, id: Uuid) -> Result<Application, StoreError> {
        let mut rows: Vec<ApplicationRow> = self
            .delete_returning("applications", &[("id", id.to_string())], "*")
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    // -- ticketing settings and mappings -------------------------------------

    pub async fn ticketing_settings(&self) -> Result<Option<TicketingSettings>, StoreError> {
        let row: Option<SettingsRow> = self
            .select("ticketing_settings", "*")
            .fetch_optional()
            .await?;
        Ok(row.map(Into::into))
    }

    pub async fn save_ticketing_settings(
        &self,
        settings: &TicketingSettings,
    ) -> Result<TicketingSettings, StoreError> {
        let payload = SettingsPayload {
            api_key: settings.api_key.clone(),
            api_url: settings.api_url.clone(),
        };
        let mut rows: Vec<SettingsRow> = match settings.id {
            Some(id) => {
                self.update_returning("ticketing_settings", &payload, &[("id", id.to_string())], "*")
                    .await?
            }
            None => {
                self.insert_returning("ticketing_settings", &[payload])
                    .await?
            }
        };
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.swap_remove(0).into())
    }

    pub async fn customer_mappings(&self) -> Result<Vec<CustomerMapping>, StoreError> {
        let rows: Vec<MappingRow> = self.select("customer_mappings", "*").fetch().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Replaces whatever mapping the client had with the given customer.
    pub async fn set_customer_mapping(
        &self,
        client_id: Uuid,
        customer_id: &str,
    ) -> Result<(), StoreError> {
        self.delete("customer_mappings", &[("client_id", client_id.to_string())])
            .await?;
        if customer_id.is_empty() {
            return Ok(());
        }
        let insert = MappingInsert {
            client_id,
            customer_id: customer_id.to_string(),
        };
        self.insert("customer_mappings", &[insert]).await
    }
}

// ---------------------------------------------------------------------------
// subnet replacement

/// The two subnet bulk operations behind a seam so the rollback sequencing is
/// testable without a live store.
#[allow(async_fn_in_trait)]
pub trait SubnetWriter {
    async fn delete_subnets(&self, network_id: Uuid) -> Result<(), StoreError>;
    async fn insert_subnets(&self, rows: &[SubnetInsert]) -> Result<(), StoreError>;
}

impl SubnetWriter for StoreClient {
    async fn delete_subnets(&self, network_id: Uuid) -> Result<(), StoreError> {
        self.delete("subnets", &[("network_id", network_id.to_string())])
            .await
    }

    async fn insert_subnets(&self, rows: &[SubnetInsert]) -> Result<(), StoreError> {
        if rows.is_empty() {
            return Ok(());
        }
        self.insert("subnets", rows).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubnetReplaceError {
    #[error("failed to update network: {0}")]
    Update(StoreError),
    #[error("failed to clear existing subnets: {0}")]
    Delete(StoreError),
    /// The new set could not be written; the previous set was restored.
    #[error("failed to apply new subnets (previous set restored): {0}")]
    RolledBack(StoreError),
    /// Both the apply and the restore failed; the network has no subnets.
    #[error("failed to apply new subnets and to restore the previous set: {apply}; {restore}")]
    RestoreFailed {
        apply: StoreError,
        restore: StoreError,
    },
}

/// Swaps a network's subnet set: delete all rows, insert the new set, and on
/// insert failure re-insert the snapshot of the old rows. The outcome is the
/// old set or the new set; only a double failure (reported as
/// [`SubnetReplaceError::RestoreFailed`]) can leave neither.
pub async fn replace_subnets<W: SubnetWriter>(
    writer: &W,
    network_id: Uuid,
    previous: &[Subnet],
    next: &[SubnetDraft],
) -> Result<(), SubnetReplaceError> {
    writer
        .delete_subnets(network_id)
        .await
        .map_err(SubnetReplaceError::Delete)?;

    let rows: Vec<SubnetInsert> = next
        .iter()
        .map(|draft| SubnetInsert::from_draft(network_id, draft))
        .collect();

    match writer.insert_subnets(&rows).await {
        Ok(()) => Ok(()),
        Err(apply) => {
            let snapshot: Vec<SubnetInsert> = previous
                .iter()
                .map(|subnet| SubnetInsert::from_subnet(network_id, subnet))
                .collect();
            match writer.insert_subnets(&snapshot).await {
                Ok(()) => Err(SubnetReplaceError::RolledBack(apply)),
                Err(restore) => Err(SubnetReplaceError::RestoreFailed { apply, restore }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FlakyWriter {
        /// Insert calls to fail before succeeding.
        failures_left: RefCell<u32>,
        deleted: RefCell<bool>,
        inserted: RefCell<Vec<Vec<SubnetInsert>>>,
    }

    impl FlakyWriter {
        fn failing(times: u32) -> Self {
            Self {
                failures_left: RefCell::new(times),
                deleted: RefCell::new(false),
                inserted: RefCell::new(Vec::new()),
            }
        }
    }

    impl SubnetWriter for FlakyWriter {
        async fn delete_subnets(&self, _network_id: Uuid) -> Result<(), StoreError> {
            *self.deleted.borrow_mut() = true;
            Ok(())
        }

        async fn insert_subnets(&self, rows: &[SubnetInsert]) -> Result<(), StoreError> {
            let mut failures = self.failures_left.borrow_mut();
            if *failures > 0 {
                *failures -= 1;
                return Err(StoreError::Api {
                    code: "57014".to_string(),
                    message: "statement timeout".to_string(),
                });
            }
            self.inserted.borrow_mut().push(rows.to_vec());
            Ok(())
        }
    }

    fn old_subnet() -> Subnet {
        Subnet {
            id: Uuid::new_v4(),
            subnet_address: "10.0.0.0/24".to_string(),
            gateway: "10.0.0.1".to_string(),
            dns: vec!["10.0.0.53".to_string()],
            dhcp_range: "10.0.0.100-10.0.0.200".to_string(),
            vlan: 10,
        }
    }

    fn new_draft() -> SubnetDraft {
        SubnetDraft {
            subnet_address: "192.168.1.0/24".to_string(),
            gateway: "192.168.1.1".to_string(),
            dns: vec!["1.1.1.1".to_string()],
            dhcp_range: "192.168.1.50-192.168.1.150".to_string(),
            vlan: 20,
        }
    }

    #[tokio::test]
    async fn happy_path_writes_the_new_set() {
        let writer = FlakyWriter::failing(0);
        let network_id = Uuid::new_v4();
        replace_subnets(&writer, network_id, &[old_subnet()], &[new_draft()])
            .await
            .expect("replacement succeeds");

        assert!(*writer.deleted.borrow());
        let inserted = writer.inserted.borrow();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0][0].subnet_address, "192.168.1.0/24");
    }

    #[tokio::test]
    async fn failed_insert_restores_the_previous_set() {
        let writer = FlakyWriter::failing(1);
        let network_id = Uuid::new_v4();
        let previous = vec![old_subnet()];

        let error = replace_subnets(&writer, network_id, &previous, &[new_draft()])
            .await
            .expect_err("apply must fail");
        assert!(matches!(error, SubnetReplaceError::RolledBack(_)));

        // The only successful insert is the compensating one, carrying the
        // old rows: the network keeps its previous subnet set.
        let inserted = writer.inserted.borrow();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].len(), 1);
        assert_eq!(inserted[0][0].subnet_address, "10.0.0.0/24");
        assert_eq!(inserted[0][0].vlan, 10);
    }

    #[tokio::test]
    async fn double_failure_is_reported_distinctly() {
        let writer = FlakyWriter::failing(2);
        let network_id = Uuid::new_v4();

        let error = replace_subnets(&writer, network_id, &[old_subnet()], &[new_draft()])
            .await
            .expect_err("both inserts fail");
        assert!(matches!(error, SubnetReplaceError::RestoreFailed { .. }));
        assert!(writer.inserted.borrow().is_empty());
    }
}
