//! Server and package commands.

use clap::Subcommand;
use console::style;
use serde_json::Value;

use na_api::{BuildParams, Params};
use na_core::config::ApiConfig;
use na_core::error::NaResult;

use super::{create_driver, object_table, print_value};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ServersAction {
    /// List all servers.
    List,
    /// Show details for one server.
    Get {
        /// Package id.
        mbpkgid: u64,
    },
    /// Show the summary overview of a server.
    Summary { mbpkgid: u64 },
    /// Show the current status of a server.
    Status { mbpkgid: u64 },
    /// Show IP assignments of a server.
    Ips {
        mbpkgid: u64,
        /// Only IPv4 assignments.
        #[arg(long, conflicts_with = "v6")]
        v4: bool,
        /// Only IPv6 assignments.
        #[arg(long)]
        v6: bool,
    },
    /// Show the monthly bandwidth report.
    Bandwidth { mbpkgid: u64 },
    /// Start an offline server.
    Start { mbpkgid: u64 },
    /// Shut a server down.
    Shutdown {
        mbpkgid: u64,
        /// Kill the server instead of a clean shutdown.
        #[arg(long)]
        force: bool,
    },
    /// Reboot a server.
    Reboot {
        mbpkgid: u64,
        #[arg(long)]
        force: bool,
    },
    /// Boot a server into rescue mode.
    Rescue {
        mbpkgid: u64,
        /// Root password for the rescue system.
        #[arg(short, long)]
        password: String,
    },
    /// Leave rescue mode.
    RescueStop { mbpkgid: u64 },
    /// Build a VM onto an existing package.
    Build {
        mbpkgid: u64,
        #[command(flatten)]
        args: BuildArgs,
    },
    /// Buy a package and build a VM on it.
    BuyBuild {
        #[command(flatten)]
        args: BuildArgs,
        /// Plan to buy.
        #[arg(long)]
        plan: String,
    },
    /// Delete a server.
    Delete {
        mbpkgid: u64,
        /// Also cancel billing for the package.
        #[arg(long)]
        cancel_billing: bool,
    },
    /// Release the location and IP allocation of a server.
    Unlink { mbpkgid: u64 },
    /// List packages, or show one.
    Packages { mbpkgid: Option<u64> },
    /// Cancel a package immediately.
    Cancel { mbpkgid: u64 },
}

#[derive(clap::Args)]
pub struct BuildArgs {
    /// Location id.
    #[arg(short, long)]
    location: String,
    /// OS image id.
    #[arg(short, long)]
    image: String,
    /// Hostname of the new server.
    #[arg(long)]
    fqdn: String,
    /// Root password.
    #[arg(short, long)]
    password: String,
}

impl BuildArgs {
    fn into_params(self) -> BuildParams {
        BuildParams::new(self.location, self.image, self.fqdn, self.password)
    }
}

pub async fn run(config: &ApiConfig, action: ServersAction, format: OutputFormat) -> NaResult<()> {
    let driver = create_driver(config)?;

    match action {
        ServersAction::List => {
            let servers = driver.servers(None).await?;
            match (format, &servers) {
                (OutputFormat::Text, Value::Array(rows)) if !rows.is_empty() => {
                    println!(
                        "{}",
                        object_table(rows, &["mbpkgid", "fqdn", "status", "ip", "os"])
                    );
                }
                _ => print_value(&servers, format),
            }
        }
        ServersAction::Get { mbpkgid } => print_value(&driver.servers(Some(mbpkgid)).await?, format),
        ServersAction::Summary { mbpkgid } => print_value(&driver.summary(mbpkgid).await?, format),
        ServersAction::Status { mbpkgid } => print_value(&driver.status(mbpkgid).await?, format),
        ServersAction::Ips { mbpkgid, v4, v6 } => {
            let ips = if v4 {
                driver.ipv4(mbpkgid).await?
            } else if v6 {
                driver.ipv6(mbpkgid).await?
            } else {
                driver.networkips(mbpkgid).await?
            };
            print_value(&ips, format);
        }
        ServersAction::Bandwidth { mbpkgid } => {
            print_value(&driver.bandwidth_report(mbpkgid).await?, format)
        }
        ServersAction::Start { mbpkgid } => {
            print_action("start", mbpkgid, &driver.start(mbpkgid).await?, format)
        }
        ServersAction::Shutdown { mbpkgid, force } => {
            print_action("shutdown", mbpkgid, &driver.shutdown(mbpkgid, force).await?, format)
        }
        ServersAction::Reboot { mbpkgid, force } => {
            print_action("reboot", mbpkgid, &driver.reboot(mbpkgid, force).await?, format)
        }
        ServersAction::Rescue { mbpkgid, password } => {
            print_action("rescue", mbpkgid, &driver.rescue(mbpkgid, &password).await?, format)
        }
        ServersAction::RescueStop { mbpkgid } => {
            print_action("rescue stop", mbpkgid, &driver.rescue_stop(mbpkgid).await?, format)
        }
        ServersAction::Build { mbpkgid, args } => {
            let params = args.into_params().with_mbpkgid(mbpkgid);
            print_action("build", mbpkgid, &driver.build(&params).await?, format)
        }
        ServersAction::BuyBuild { args, plan } => {
            let params = args.into_params().with_plan(plan);
            print_value(&driver.buy_build(&params).await?, format);
        }
        ServersAction::Delete {
            mbpkgid,
            cancel_billing,
        } => {
            let extra = cancel_billing.then(|| {
                let mut extra = Params::new();
                extra.insert("cancel_billing".into(), Value::from(1));
                extra
            });
            print_action("delete", mbpkgid, &driver.delete(mbpkgid, extra).await?, format)
        }
        ServersAction::Unlink { mbpkgid } => {
            print_action("unlink", mbpkgid, &driver.unlink(mbpkgid).await?, format)
        }
        ServersAction::Packages { mbpkgid } => {
            print_value(&driver.packages(mbpkgid).await?, format)
        }
        ServersAction::Cancel { mbpkgid } => {
            print_action("cancel", mbpkgid, &driver.cancel(mbpkgid).await?, format)
        }
    }

    Ok(())
}

/// Report an action result, pointing at the job to follow when there is one.
fn print_action(action: &str, mbpkgid: u64, result: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_value(result, format),
        OutputFormat::Text => {
            println!("  {} {action} on {mbpkgid}", style("OK").green().bold());
            if let Some(job_id) = result.get("id").filter(|id| !id.is_null()) {
                let job_id = super::cell(job_id);
                println!("  Job {job_id}: follow with `naapi job {mbpkgid} {job_id} --wait`");
            }
        }
    }
}
