use crate::EthService;

/// Network id, as configured at startup.
pub fn net_version(service: &EthService) -> String {
    service.config().network_id.clone()
}
