//! Domain types and the pure logic that drives the console.

pub mod entities;
pub mod filters;
pub mod session;
pub mod status;

#[allow(unused_imports)]
pub use entities::{
    ActionKind, ActivityEntry, Application, Asset, AssetStatus, Client, ClientSummary,
    CustomerMapping, InboundPackage, Network, NetworkKind, PackageEdit, Printer, ResourceKind,
    Subnet, SubnetDraft, TicketingCustomer, TicketingSettings,
};
#[allow(unused_imports)]
pub use filters::{tier_counts, visible_packages, PackageFilter, TierCounts};
#[allow(unused_imports)]
pub use session::{ClientScope, Operator, PersistedState, SessionState};
#[allow(unused_imports)]
pub use status::{business_days_elapsed, classify, today, StatusTier};
