//! Allow-list authorizer backed by a JSON file of provider
//! descriptions.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use moka::sync::Cache;

use crate::registry::{bool_option, string_option, DriverError, Options};

use super::{ocm_host, Authorizer, AuthorizerError, ProviderInfo};

const DEFAULT_PROVIDERS_FILE: &str = "/etc/revad/ocm-providers.json";

/// Resolved provider IPs are cached per host; entries expire so that a
/// re-homed provider is picked up without a restart.
const IP_CACHE_TTL: Duration = Duration::from_secs(3600);
const IP_CACHE_CAPACITY: u64 = 1024;

pub struct JsonAuthorizer {
    providers: Vec<ProviderInfo>,
    verify_request_hostname: bool,
    provider_ips: Cache<String, Vec<IpAddr>>,
}

impl JsonAuthorizer {
    /// Options: `providers` (path to the allow-list file),
    /// `verify_request_hostname` (DNS-verify the claimed IP).
    pub fn from_options(options: &Options) -> Result<Self, DriverError> {
        let providers_file = string_option(options, "providers", DEFAULT_PROVIDERS_FILE)?;
        let verify_request_hostname = bool_option(options, "verify_request_hostname", false)?;

        let data = std::fs::read(&providers_file)?;
        let providers: Vec<ProviderInfo> = serde_json::from_slice(&data)?;

        Ok(Self::from_providers(providers, verify_request_hostname))
    }

    pub fn from_providers(providers: Vec<ProviderInfo>, verify_request_hostname: bool) -> Self {
        Self {
            providers,
            verify_request_hostname,
            provider_ips: Cache::builder()
                .max_capacity(IP_CACHE_CAPACITY)
                .time_to_live(IP_CACHE_TTL)
                .build(),
        }
    }

    async fn resolved_ips(&self, host: &str) -> Result<Vec<IpAddr>, AuthorizerError> {
        if let Some(ips) = self.provider_ips.get(host) {
            return Ok(ips);
        }

        let ips: Vec<IpAddr> = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| AuthorizerError::Lookup(host.to_string(), e))?
            .map(|addr| addr.ip())
            .collect();

        tracing::debug!(host, ?ips, "resolved mesh provider host");
        self.provider_ips.insert(host.to_string(), ips.clone());
        Ok(ips)
    }
}

#[async_trait]
impl Authorizer for JsonAuthorizer {
    async fn get_info_by_domain(&self, domain: &str) -> Result<ProviderInfo, AuthorizerError> {
        self.providers
            .iter()
            .find(|p| p.domain.contains(domain))
            .cloned()
            .ok_or_else(|| AuthorizerError::NotFound(domain.to_string()))
    }

    async fn is_provider_allowed(&self, provider: &ProviderInfo) -> Result<(), AuthorizerError> {
        // a request without a domain claim is only subject to the
        // hostname check below
        let authorized = provider.domain.is_empty()
            || self.providers.iter().any(|p| p.domain == provider.domain);
        if !authorized {
            return Err(AuthorizerError::NotFound(provider.domain.clone()));
        }

        if !self.verify_request_hostname {
            return Ok(());
        }
        if provider.services.is_empty() {
            return Err(AuthorizerError::NotSupported("no IP provided".to_string()));
        }

        let host = ocm_host(provider)
            .ok_or_else(|| AuthorizerError::NotFound("OCM host".to_string()))?;
        let ips = self.resolved_ips(&host).await?;

        // the first service's host carries the claimed IP
        let claimed = &provider.services[0].host;
        if ips.iter().any(|ip| ip.to_string() == *claimed) {
            Ok(())
        } else {
            Err(AuthorizerError::NotFound("OCM host".to_string()))
        }
    }

    async fn list_all_providers(&self) -> Result<Vec<ProviderInfo>, AuthorizerError> {
        Ok(self.providers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Service, ServiceEndpoint};

    fn mesh_provider(domain: &str) -> ProviderInfo {
        ProviderInfo {
            name: domain.to_string(),
            full_name: domain.to_string(),
            domain: domain.to_string(),
            services: vec![Service {
                host: format!("https://{}", domain),
                endpoint: ServiceEndpoint {
                    kind: "OCM".to_string(),
                    path: format!("https://{}/ocm/", domain),
                },
            }],
        }
    }

    #[tokio::test]
    async fn test_allowed_domain() {
        let authorizer =
            JsonAuthorizer::from_providers(vec![mesh_provider("cernbox.cern.ch")], false);

        authorizer
            .is_provider_allowed(&mesh_provider("cernbox.cern.ch"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_domain_rejected() {
        let authorizer =
            JsonAuthorizer::from_providers(vec![mesh_provider("cernbox.cern.ch")], false);

        let err = authorizer
            .is_provider_allowed(&mesh_provider("evil.example.org"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthorizerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_domain_passes_allow_list() {
        let authorizer =
            JsonAuthorizer::from_providers(vec![mesh_provider("cernbox.cern.ch")], false);

        let anonymous = ProviderInfo::default();
        authorizer.is_provider_allowed(&anonymous).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_info_by_domain_matches_substring() {
        let authorizer =
            JsonAuthorizer::from_providers(vec![mesh_provider("cernbox.cern.ch")], false);

        let info = authorizer.get_info_by_domain("cern.ch").await.unwrap();
        assert_eq!(info.domain, "cernbox.cern.ch");

        let err = authorizer
            .get_info_by_domain("example.org")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthorizerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_hostname_verification_requires_services() {
        let authorizer =
            JsonAuthorizer::from_providers(vec![mesh_provider("cernbox.cern.ch")], true);

        let mut bare = mesh_provider("cernbox.cern.ch");
        bare.services.clear();
        let err = authorizer.is_provider_allowed(&bare).await.unwrap_err();
        assert!(matches!(err, AuthorizerError::NotSupported(_)));
    }

    #[tokio::test]
    async fn test_hostname_verification_resolves_claimed_host() {
        let authorizer = JsonAuthorizer::from_providers(vec![], true);

        // an IP literal resolves to itself and passes
        let mut claiming = ProviderInfo {
            services: vec![Service {
                host: "127.0.0.1".to_string(),
                endpoint: ServiceEndpoint {
                    kind: "OCM".to_string(),
                    path: "http://127.0.0.1/ocm/".to_string(),
                },
            }],
            ..Default::default()
        };
        authorizer.is_provider_allowed(&claiming).await.unwrap();

        // a hostname never equals the IPs it resolves to
        claiming.services[0].host = "localhost".to_string();
        let err = authorizer.is_provider_allowed(&claiming).await.unwrap_err();
        assert!(matches!(err, AuthorizerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_from_options_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("providers.json");
        std::fs::write(
            &path,
            serde_json::to_vec(&vec![mesh_provider("cernbox.cern.ch")]).unwrap(),
        )
        .unwrap();

        let mut options = Options::new();
        options.insert(
            "providers".to_string(),
            serde_json::json!(path.to_str().unwrap()),
        );
        let authorizer = JsonAuthorizer::from_options(&options).unwrap();
        assert_eq!(authorizer.list_all_providers().await.unwrap().len(), 1);
    }
}
