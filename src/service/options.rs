use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use serde::{Serialize, Serializer};

use crate::runtime::{
    CoreSection, DataProvider, Drivers, HttpSection, HttpServices, OwnCloudDriver,
    RuntimeDescriptor, SharedSection,
};

/// Name of the storage public-link data command; also the runtime's service name.
pub const STORAGE_PUBLIC_LINK_DATA: &str = "storage-public-link-data";

#[derive(Parser, Debug)]
#[command(name = "storagevisor")]
#[command(author, version, about, long_about = None)]
pub struct Opts {
    #[command(flatten)]
    pub log: LogOptions,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the storage public-link data provider
    #[command(name = "storage-public-link-data")]
    StoragePublicLinkData(StoragePublicLinkDataOptions),
}

#[derive(Args, Debug, Clone)]
pub struct LogOptions {
    /// log level (or an `EnvFilter` directive list)
    #[arg(long, global = true, env = "REVA_LOG_LEVEL", default_value("info"))]
    pub log_level: String,
    /// human readable output instead of JSON
    #[arg(long, global = true, env = "REVA_LOG_PRETTY")]
    pub log_pretty: bool,
    /// colorize human readable output
    #[arg(long, global = true, env = "REVA_LOG_COLOR")]
    pub log_color: bool,
}

#[derive(Args, Debug, Clone, Serialize)]
pub struct TracingOptions {
    #[arg(long, env = "REVA_TRACING_ENABLED")]
    pub tracing_enabled: bool,
    /// tracing backend, only `jaeger` is understood by the runtime
    #[arg(long, env = "REVA_TRACING_TYPE", default_value("jaeger"))]
    pub tracing_type: String,
    /// jaeger agent endpoint
    #[arg(long, env = "REVA_TRACING_ENDPOINT", default_value(""))]
    pub tracing_endpoint: String,
    /// jaeger collector endpoint
    #[arg(long, env = "REVA_TRACING_COLLECTOR", default_value(""))]
    pub tracing_collector: String,
    #[arg(long, env = "REVA_TRACING_SERVICE", default_value("reva"))]
    pub tracing_service: String,
}

#[derive(Args, Debug, Clone, Serialize)]
pub struct StoragePublicLinkDataOptions {
    #[command(flatten)]
    pub tracing: TracingOptions,

    /// address of the debug server
    #[arg(
        long,
        env = "REVA_STORAGE_PUBLIC_LINK_DATA_DEBUG_ADDR",
        default_value("0.0.0.0:9181")
    )]
    pub debug_addr: String,
    /// seconds the debug server may take to shut down, 0 waits forever
    #[arg(long, env = "REVA_DEBUG_SHUTDOWN_SECS", default_value_t = 5)]
    pub debug_shutdown_secs: u64,

    /// shared secret used to sign tokens
    #[arg(long, env = "REVA_JWT_SECRET", default_value("Pive-Fumkiu4"))]
    #[serde(serialize_with = "redact")]
    pub jwt_secret: String,
    #[arg(long, env = "REVA_GATEWAY_URL", default_value("localhost:9142"))]
    pub gateway_url: String,

    #[arg(
        long,
        env = "REVA_STORAGE_PUBLIC_LINK_DATA_MAX_CPUS",
        default_value("2")
    )]
    pub max_cpus: String,
    #[arg(
        long,
        env = "REVA_STORAGE_PUBLIC_LINK_DATA_NETWORK",
        default_value("tcp")
    )]
    pub network: String,
    #[arg(
        long,
        env = "REVA_STORAGE_PUBLIC_LINK_DATA_ADDR",
        default_value("0.0.0.0:9180")
    )]
    pub addr: String,
    /// url prefix of the data provider
    #[arg(
        long,
        env = "REVA_STORAGE_PUBLIC_LINK_DATA_PREFIX",
        default_value("data")
    )]
    pub prefix: String,
    /// storage driver
    #[arg(
        long,
        env = "REVA_STORAGE_PUBLIC_LINK_DATA_DRIVER",
        default_value("owncloud")
    )]
    pub driver: String,
    #[arg(
        long,
        env = "REVA_STORAGE_PUBLIC_LINK_DATA_TEMP_FOLDER",
        default_value("/var/tmp/")
    )]
    pub temp_folder: String,

    #[arg(
        long,
        env = "REVA_STORAGE_OWNCLOUD_DATADIR",
        default_value("/var/tmp/reva/data")
    )]
    pub storage_owncloud_datadir: String,
    /// scan files on startup
    #[arg(
        long,
        env = "REVA_STORAGE_OWNCLOUD_SCAN",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub storage_owncloud_scan: bool,
    #[arg(long, env = "REVA_STORAGE_OWNCLOUD_REDIS_ADDR", default_value(":6379"))]
    pub storage_owncloud_redis: String,
    #[arg(long, env = "REVA_STORAGE_OWNCLOUD_ENABLE_HOME")]
    pub storage_owncloud_enable_home: bool,
    /// user directory layout, a template over the user record
    #[arg(
        long,
        env = "REVA_STORAGE_OWNCLOUD_LAYOUT",
        default_value("{{.Username}}")
    )]
    pub storage_owncloud_layout: String,

    /// runtime binary to launch
    #[arg(long, env = "REVA_REVAD_BIN", default_value("revad"))]
    pub revad_bin: String,
}

impl StoragePublicLinkDataOptions {
    /// Interrupt budget of the debug server; `None` when unbounded.
    pub fn debug_shutdown_budget(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.debug_shutdown_secs)).filter(|d| !d.is_zero())
    }

    /// Configuration tree handed to the runtime.
    pub fn descriptor(&self) -> RuntimeDescriptor {
        RuntimeDescriptor {
            core: CoreSection {
                max_cpus: self.max_cpus.clone(),
                tracing_enabled: self.tracing.tracing_enabled,
                tracing_endpoint: self.tracing.tracing_endpoint.clone(),
                tracing_collector: self.tracing.tracing_collector.clone(),
                tracing_service_name: STORAGE_PUBLIC_LINK_DATA.to_string(),
            },
            shared: SharedSection {
                jwt_secret: self.jwt_secret.clone(),
                gatewaysvc: self.gateway_url.clone(),
            },
            http: HttpSection {
                network: self.network.clone(),
                address: self.addr.clone(),
                services: HttpServices {
                    dataprovider: DataProvider {
                        prefix: self.prefix.clone(),
                        driver: self.driver.clone(),
                        temp_folder: self.temp_folder.clone(),
                        drivers: Drivers {
                            owncloud: OwnCloudDriver {
                                datadirectory: self.storage_owncloud_datadir.clone(),
                                scan: self.storage_owncloud_scan,
                                redis: self.storage_owncloud_redis.clone(),
                                enable_home: self.storage_owncloud_enable_home,
                                user_layout: self.storage_owncloud_layout.clone(),
                            },
                        },
                    },
                },
            },
        }
    }
}

fn redact<T: AsRef<str>, S: Serializer>(secret: &T, serializer: S) -> Result<S::Ok, S::Error> {
    if secret.as_ref().is_empty() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_str("REDACTED")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> StoragePublicLinkDataOptions {
        let argv = ["storagevisor", STORAGE_PUBLIC_LINK_DATA]
            .into_iter()
            .chain(args.iter().copied());
        match Opts::try_parse_from(argv).unwrap().command {
            Command::StoragePublicLinkData(opts) => opts,
        }
    }

    #[test]
    fn descriptor_follows_options() {
        let opts = parse(&[
            "--addr",
            "127.0.0.1:19180",
            "--storage-owncloud-scan",
            "false",
            "--tracing-enabled",
            "--tracing-endpoint",
            "jaeger:6831",
        ]);
        let descriptor = opts.descriptor();

        assert_eq!(descriptor.http.address, "127.0.0.1:19180");
        assert!(!descriptor.http.services.dataprovider.drivers.owncloud.scan);
        assert!(descriptor.core.tracing_enabled);
        assert_eq!(descriptor.core.tracing_endpoint, "jaeger:6831");
        assert_eq!(descriptor.core.tracing_service_name, STORAGE_PUBLIC_LINK_DATA);
    }

    #[test]
    fn exposed_config_hides_the_secret() {
        let opts = parse(&["--jwt-secret", "hunter2"]);
        let json = serde_json::to_value(&opts).unwrap();

        assert_eq!(json["jwt_secret"], "REDACTED");
        assert_eq!(opts.descriptor().shared.jwt_secret, "hunter2");
        assert!(!json.to_string().contains("hunter2"));
    }

    #[test]
    fn zero_budget_means_unbounded() {
        let opts = parse(&["--debug-shutdown-secs", "0"]);
        assert_eq!(opts.debug_shutdown_budget(), None);
    }

    #[test]
    fn global_log_flags_are_accepted_after_the_subcommand() {
        let opts = Opts::try_parse_from([
            "storagevisor",
            STORAGE_PUBLIC_LINK_DATA,
            "--log-pretty",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(opts.log.log_pretty);
        assert_eq!(opts.log.log_level, "debug");
    }
}
