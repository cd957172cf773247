//! # Runtime descriptor.
//!
//! [`RuntimeDescriptor`] is the configuration tree handed to the external storage
//! runtime. It is serialized to TOML:
//!
//! ```text
//! [core]                       max_cpus, tracing_*
//! [shared]                     jwt_secret, gatewaysvc
//! [http]                       network, address
//! [http.services.dataprovider] prefix, driver, temp_folder
//! [http.services.dataprovider.drivers.owncloud]
//!                              datadirectory, scan, redis, enable_home, user_layout
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

use crate::error::StartupError;

/// Top-level runtime configuration.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RuntimeDescriptor {
    pub core: CoreSection,
    pub shared: SharedSection,
    pub http: HttpSection,
}

/// Process-wide runtime settings.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CoreSection {
    pub max_cpus: String,
    pub tracing_enabled: bool,
    pub tracing_endpoint: String,
    pub tracing_collector: String,
    pub tracing_service_name: String,
}

/// Settings shared by every service of the runtime.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SharedSection {
    pub jwt_secret: String,
    pub gatewaysvc: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HttpSection {
    pub network: String,
    pub address: String,
    pub services: HttpServices,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HttpServices {
    pub dataprovider: DataProvider,
}

/// The data provider service and its storage driver selection.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DataProvider {
    pub prefix: String,
    pub driver: String,
    pub temp_folder: String,
    pub drivers: Drivers,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Drivers {
    pub owncloud: OwnCloudDriver,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OwnCloudDriver {
    pub datadirectory: String,
    pub scan: bool,
    pub redis: String,
    pub enable_home: bool,
    pub user_layout: String,
}

impl RuntimeDescriptor {
    /// Renders the descriptor as TOML.
    pub fn to_toml(&self) -> Result<String, StartupError> {
        Ok(toml::to_string(self)?)
    }
}

/// Unique pid-file path for one runtime invocation: `<dir>/revad-<command>-<uuid>.pid`.
pub fn pid_file_path(dir: &Path, command: &str) -> PathBuf {
    dir.join(format!("revad-{command}-{}.pid", Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> RuntimeDescriptor {
        RuntimeDescriptor {
            core: CoreSection {
                max_cpus: "2".into(),
                tracing_enabled: false,
                tracing_endpoint: "localhost:6831".into(),
                tracing_collector: "http://localhost:14268/api/traces".into(),
                tracing_service_name: "storage-public-link-data".into(),
            },
            shared: SharedSection {
                jwt_secret: "secret".into(),
                gatewaysvc: "localhost:9142".into(),
            },
            http: HttpSection {
                network: "tcp".into(),
                address: "0.0.0.0:9180".into(),
                services: HttpServices {
                    dataprovider: DataProvider {
                        prefix: "data".into(),
                        driver: "owncloud".into(),
                        temp_folder: "/var/tmp/".into(),
                        drivers: Drivers {
                            owncloud: OwnCloudDriver {
                                datadirectory: "/var/tmp/reva/data".into(),
                                scan: true,
                                redis: ":6379".into(),
                                enable_home: false,
                                user_layout: "{{.Username}}".into(),
                            },
                        },
                    },
                },
            },
        }
    }

    #[test]
    fn toml_keeps_nested_layout() {
        let rendered = descriptor().to_toml().unwrap();
        let parsed: toml::Table = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed["core"]["max_cpus"].as_str(), Some("2"));
        assert_eq!(parsed["shared"]["gatewaysvc"].as_str(), Some("localhost:9142"));
        let dp = &parsed["http"]["services"]["dataprovider"];
        assert_eq!(dp["driver"].as_str(), Some("owncloud"));
        assert_eq!(dp["drivers"]["owncloud"]["scan"].as_bool(), Some(true));
        assert_eq!(dp["temp_folder"].as_str(), Some("/var/tmp/"));
    }

    #[test]
    fn pid_files_are_unique_per_invocation() {
        let dir = Path::new("/tmp");
        let a = pid_file_path(dir, "storage-public-link-data");
        let b = pid_file_path(dir, "storage-public-link-data");

        assert_ne!(a, b);
        let name = a.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("revad-storage-public-link-data-"));
        assert!(name.ends_with(".pid"));
    }
}
