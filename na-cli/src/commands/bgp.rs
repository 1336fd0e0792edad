//! BGP commands.

use clap::Subcommand;
use console::style;

use na_api::PrefixOrder;
use na_core::config::ApiConfig;
use na_core::error::{NaError, NaResult};

use super::{create_driver, print_value};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum BgpAction {
    /// List BGP sessions, or show one.
    Sessions { session_id: Option<u64> },
    /// Show the BGP session summary.
    Summary,
    /// List BGP groups, or show one.
    Groups { group_id: Option<u64> },
    /// List ASNs available for BGP.
    Asns,
    /// Create BGP sessions for a server in a group.
    CreateSessions {
        /// Package id of the server.
        mbpkgid: u64,
        /// BGP group to join.
        group_id: u64,
        /// Also create IPv6 sessions.
        #[arg(long)]
        ipv6: bool,
        /// Create redundant sessions.
        #[arg(long)]
        redundant: bool,
    },
    /// Buy a BGP prefix for a group or an ASN.
    BuyPrefix {
        /// Prefix name.
        name: String,
        /// Agreement the purchase is billed to.
        #[arg(long)]
        agreement_id: u64,
        /// Announce for this BGP group.
        #[arg(long, conflicts_with = "asn_id")]
        group_id: Option<u64>,
        /// Announce for this ASN.
        #[arg(long)]
        asn_id: Option<u64>,
        /// Anycast profile for ASN orders.
        #[arg(long, default_value = "1")]
        anycast_profile: u64,
    },
}

pub async fn run(config: &ApiConfig, action: BgpAction, format: OutputFormat) -> NaResult<()> {
    let driver = create_driver(config)?;

    let result = match action {
        BgpAction::Sessions { session_id } => driver.bgp_sessions(session_id).await?,
        BgpAction::Summary => driver.bgp_summary().await?,
        BgpAction::Groups { group_id } => driver.bgp_groups(group_id).await?,
        BgpAction::Asns => driver.bgp_asns().await?,
        BgpAction::CreateSessions {
            mbpkgid,
            group_id,
            ipv6,
            redundant,
        } => {
            let created = driver
                .bgp_create_sessions(mbpkgid, group_id, ipv6, redundant)
                .await?;
            if let OutputFormat::Text = format {
                println!(
                    "  {} sessions for {mbpkgid} in group {group_id}",
                    style("Created").green().bold()
                );
            }
            created
        }
        BgpAction::BuyPrefix {
            name,
            agreement_id,
            group_id,
            asn_id,
            anycast_profile,
        } => {
            let order = match (group_id, asn_id) {
                (Some(group_id), _) => PrefixOrder::for_group(name, agreement_id, group_id),
                (None, Some(asn_id)) => PrefixOrder::for_asn(name, agreement_id, asn_id)
                    .with_anycast_profile(anycast_profile),
                (None, None) => {
                    return Err(NaError::InvalidRequest(
                        "either --group-id or --asn-id is required".into(),
                    ))
                }
            };
            driver.bgp_buy_prefixes(&order).await?
        }
    };

    print_value(&result, format);
    Ok(())
}
