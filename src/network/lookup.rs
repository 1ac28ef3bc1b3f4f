use std::net::{IpAddr, Ipv4Addr};

use tracing::{debug, warn};
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::core::{Announcement, Config, Error, Result};
use crate::protocol::{decode, from_octets};

/// A successfully decoded answer and the address it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    /// Address that carried the announcement
    pub address: Ipv4Addr,
    /// Decoded announcement
    pub announcement: Announcement,
}

/// Picks the first candidate that decodes.
///
/// When no candidate decodes, the error of the last one is returned.
pub fn select<I>(candidates: I) -> Result<Lookup>
where
    I: IntoIterator<Item = Ipv4Addr>,
{
    let mut last_error = None;

    for address in candidates {
        match decode(from_octets(address.octets())) {
            Ok(announcement) => {
                debug!(%address, ?announcement, "Decoded announcement");
                return Ok(Lookup {
                    address,
                    announcement,
                });
            }
            Err(e) => {
                warn!(%address, error = %e, "Rejected candidate address");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => Err(e.into()),
        None => Err(Error::no_announcement("No IPv4 addresses returned")),
    }
}

/// Resolves the published announcement
pub struct AnnouncementResolver {
    /// Underlying DNS resolver
    resolver: TokioAsyncResolver,
    /// Lookup configuration
    config: Config,
}

impl AnnouncementResolver {
    /// Creates a resolver from the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let (resolver_config, mut opts) = if config.use_system_conf {
            trust_dns_resolver::system_conf::read_system_conf().map_err(|e| {
                Error::resolve(format!("Failed to read system resolver configuration: {}", e))
            })?
        } else {
            (ResolverConfig::default(), ResolverOpts::default())
        };

        opts.timeout = config.timeout;
        opts.attempts = config.attempts;

        let resolver = TokioAsyncResolver::tokio(resolver_config, opts)
            .map_err(|e| Error::resolve(format!("Failed to create resolver: {}", e)))?;

        Ok(AnnouncementResolver { resolver, config })
    }

    /// Returns the configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Looks up the configured name and decodes the first valid answer
    pub async fn query(&self) -> Result<Lookup> {
        let fqdn = self.config.fqdn.as_str();
        debug!(fqdn, "Querying leap-second announcement");

        let response = self
            .resolver
            .lookup_ip(fqdn)
            .await
            .map_err(|e| Error::resolve(format!("Lookup of {} failed: {}", fqdn, e)))?;

        let candidates: Vec<Ipv4Addr> = response
            .iter()
            .filter_map(|ip| match ip {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .collect();

        debug!(fqdn, count = candidates.len(), "Received candidate addresses");

        select(candidates)
    }
}
