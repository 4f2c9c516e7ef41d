use hostgen_alloc::{Allocator, AllocatorConfig, HostnameRegistry};
use hostgen_core::{AllocationRequest, catalog};
use hostgen_state::NewHostname;
use tracing::warn;

use crate::target::Portal;

pub async fn generate(
    portal: Portal,
    request: &AllocationRequest,
    config: AllocatorConfig,
    register: bool,
) -> anyhow::Result<()> {
    for warning in unknown_codes(request) {
        warn!("{warning}");
    }

    let line = match portal {
        Portal::Remote(client) => run(Allocator::new(client, config), request, register).await?,
        Portal::Local(store) => run(Allocator::new(store, config), request, register).await?,
    };
    println!("{line}");
    Ok(())
}

async fn run<B: HostnameRegistry>(
    allocator: Allocator<B>,
    request: &AllocationRequest,
    register: bool,
) -> anyhow::Result<String> {
    if !register {
        return Ok(allocator.allocate(request).await?);
    }
    let record = allocator
        .allocate_and_register(request, NewHostname::default())
        .await?;
    Ok(format!("✓ Registered {} (id {})", record.hostname, record.id))
}

/// Request values the portal does not offer. Allocation still proceeds with them.
fn unknown_codes(request: &AllocationRequest) -> Vec<String> {
    let mut warnings = Vec::new();
    if catalog::os_template(&request.os).is_none() {
        warnings.push(format!("OS {:?} matches no portal template", request.os));
    }
    if catalog::environment_label(&request.environment).is_none() {
        warnings.push(format!("unknown environment code {:?}", request.environment));
    }
    if catalog::server_function_label(&request.server_function).is_none() {
        warnings.push(format!(
            "unknown server function code {:?}",
            request.server_function
        ));
    }
    if request.node.len() != 1 || !request.node.chars().all(|c| c.is_ascii_digit()) {
        warnings.push(format!("node {:?} is not a single digit", request.node));
    }
    warnings
}
